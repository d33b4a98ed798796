//! Read-only clients for dropshipping supplier catalogs.
//!
//! AutoDS and CJ Dropshipping return differently shaped listings; both are
//! decoded into [`RawSupplierProduct`] and normalized into
//! [`autosync_core::SupplierProduct`] before any sync logic sees them.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::SupplierClient;
pub use error::SupplierError;
pub use normalize::normalize_product;
pub use types::{AutodsProduct, CjProduct, RawSupplierProduct};
