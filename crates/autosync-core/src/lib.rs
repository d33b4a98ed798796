//! Domain types, configuration, and the pure sync decision engine.
//!
//! Nothing in this crate performs I/O other than reading the environment and
//! the classifier rules file at startup. The HTTP clients live in
//! `autosync-shopify` and `autosync-supplier`; the run loop lives in the CLI.

pub mod app_config;
pub mod classify;
pub mod config;
pub mod policy;
pub mod products;
pub mod retire;
pub mod rules;
pub mod transform;

use thiserror::Error;

pub use app_config::{AppConfig, LookupMode, SupplierKind};
pub use classify::{Classification, Classifier};
pub use config::{load_app_config, load_app_config_from_env};
pub use policy::{is_bad_product, is_suspicious_vendor, SkuSet};
pub use products::{
    CatalogStatus, NewCatalogImage, NewCatalogProduct, NewCatalogVariant, SupplierProduct,
};
pub use retire::{plan_retirement, Retirement};
pub use rules::{load_rules, parse_rules, ClassifierRule, RulesFile};
pub use transform::{format_price, shorten_title, to_create_payload, TransformOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[source] serde_yaml::Error),

    #[error("invalid rules file: {0}")]
    Validation(String),
}
