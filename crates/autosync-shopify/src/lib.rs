pub mod client;
pub mod error;
pub mod pagination;
pub mod types;

pub use client::{PageRequest, ShopifyAdminClient};
pub use error::ShopifyError;
pub use types::{CatalogProduct, CatalogVariant, Collect};
