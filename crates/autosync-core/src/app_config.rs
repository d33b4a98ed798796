use std::path::PathBuf;

use rust_decimal::Decimal;

/// Which dropshipping supplier API the run pulls from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierKind {
    AutoDs,
    Cj,
}

impl SupplierKind {
    /// Production API root for this supplier.
    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            SupplierKind::AutoDs => "https://api.autods.com",
            SupplierKind::Cj => "https://developers.cjdropshipping.com",
        }
    }

    /// Vendor name written to the catalog when a supplier record has none.
    #[must_use]
    pub fn default_vendor(self) -> &'static str {
        match self {
            SupplierKind::AutoDs => "AutoDS Supplier",
            SupplierKind::Cj => "CJ Dropshipping",
        }
    }

    /// Environment variable holding this supplier's API credential.
    #[must_use]
    pub fn token_var(self) -> &'static str {
        match self {
            SupplierKind::AutoDs => "AUTODS_API_TOKEN",
            SupplierKind::Cj => "CJ_ACCESS_TOKEN",
        }
    }
}

impl std::fmt::Display for SupplierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupplierKind::AutoDs => write!(f, "autods"),
            SupplierKind::Cj => write!(f, "cj"),
        }
    }
}

/// How the destination-catalog duplicate check is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Page through the catalog for every candidate SKU.
    Scan,
    /// List the catalog once per run and answer from a SKU map.
    Index,
}

impl std::fmt::Display for LookupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupMode::Scan => write!(f, "scan"),
            LookupMode::Index => write!(f, "index"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub shopify_store_domain: String,
    pub shopify_access_token: String,
    pub shopify_api_version: String,
    pub supplier: SupplierKind,
    pub supplier_token: String,
    pub supplier_base_url: String,
    pub margin_multiplier: Option<Decimal>,
    pub fixed_tags: Option<Vec<String>>,
    pub default_inventory: u32,
    pub default_vendor: String,
    pub retire_orphans: bool,
    pub catalog_lookup: LookupMode,
    pub page_size: u32,
    pub rules_path: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    /// Admin REST API root for the configured store, e.g.
    /// `https://example.myshopify.com/admin/api/2025-04`.
    #[must_use]
    pub fn shopify_base_url(&self) -> String {
        format!(
            "https://{}/admin/api/{}",
            self.shopify_store_domain, self.shopify_api_version
        )
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("shopify_store_domain", &self.shopify_store_domain)
            .field("shopify_access_token", &"[redacted]")
            .field("shopify_api_version", &self.shopify_api_version)
            .field("supplier", &self.supplier)
            .field("supplier_token", &"[redacted]")
            .field("supplier_base_url", &self.supplier_base_url)
            .field("margin_multiplier", &self.margin_multiplier)
            .field("fixed_tags", &self.fixed_tags)
            .field("default_inventory", &self.default_inventory)
            .field("default_vendor", &self.default_vendor)
            .field("retire_orphans", &self.retire_orphans)
            .field("catalog_lookup", &self.catalog_lookup)
            .field("page_size", &self.page_size)
            .field("rules_path", &self.rules_path)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
