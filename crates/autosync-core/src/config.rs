use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, LookupMode, SupplierKind};
use crate::ConfigError;

/// Shopify rejects `limit` values above this on the REST products listing.
const MAX_PAGE_SIZE: u32 = 250;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let shopify_store_domain = normalize_store_domain(&require("SHOPIFY_STORE_DOMAIN")?);
    let shopify_access_token = require("SHOPIFY_ACCESS_TOKEN")?;
    let shopify_api_version = or_default("SHOPIFY_API_VERSION", "2025-04");

    let supplier = parse_supplier(&or_default("AUTOSYNC_SUPPLIER", "autods"))?;
    let supplier_token = require(supplier.token_var())?;
    let supplier_base_url = or_default("AUTOSYNC_SUPPLIER_BASE_URL", supplier.default_base_url());

    let margin_multiplier = optional("AUTOSYNC_MARGIN_MULTIPLIER")
        .map(|raw| parse_margin(&raw))
        .transpose()?;

    let fixed_tags = optional("AUTOSYNC_FIXED_TAGS")
        .map(|raw| parse_tag_list(&raw))
        .filter(|tags| !tags.is_empty());

    let default_inventory = parse_u32("AUTOSYNC_DEFAULT_INVENTORY", "100")?;
    let default_vendor = or_default("AUTOSYNC_DEFAULT_VENDOR", supplier.default_vendor());
    let retire_orphans = parse_bool(
        "AUTOSYNC_RETIRE_ORPHANS",
        &or_default("AUTOSYNC_RETIRE_ORPHANS", "false"),
    )?;
    let catalog_lookup = parse_lookup_mode(&or_default("AUTOSYNC_CATALOG_LOOKUP", "scan"))?;

    let page_size = parse_u32("AUTOSYNC_PAGE_SIZE", "250")?;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(invalid(
            "AUTOSYNC_PAGE_SIZE",
            format!("must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"),
        ));
    }

    let rules_path = PathBuf::from(or_default(
        "AUTOSYNC_RULES_PATH",
        "./config/catalog_rules.yaml",
    ));
    let log_level = or_default("AUTOSYNC_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("AUTOSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("AUTOSYNC_USER_AGENT", "autosync/0.1 (catalog-sync)");

    Ok(AppConfig {
        shopify_store_domain,
        shopify_access_token,
        shopify_api_version,
        supplier,
        supplier_token,
        supplier_base_url,
        margin_multiplier,
        fixed_tags,
        default_inventory,
        default_vendor,
        retire_orphans,
        catalog_lookup,
        page_size,
        rules_path,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}

/// Strips a leading scheme and any trailing slashes so the domain can be
/// embedded in the Admin API URL.
fn normalize_store_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

fn parse_supplier(s: &str) -> Result<SupplierKind, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "autods" => Ok(SupplierKind::AutoDs),
        "cj" | "cjdropshipping" => Ok(SupplierKind::Cj),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AUTOSYNC_SUPPLIER".to_string(),
            reason: format!("unknown supplier '{other}'; expected 'autods' or 'cj'"),
        }),
    }
}

fn parse_lookup_mode(s: &str) -> Result<LookupMode, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "scan" => Ok(LookupMode::Scan),
        "index" => Ok(LookupMode::Index),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AUTOSYNC_CATALOG_LOOKUP".to_string(),
            reason: format!("unknown lookup mode '{other}'; expected 'scan' or 'index'"),
        }),
    }
}

fn parse_bool(var: &str, s: &str) -> Result<bool, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

fn parse_margin(raw: &str) -> Result<Decimal, ConfigError> {
    let margin = Decimal::from_str(raw).map_err(|e| ConfigError::InvalidEnvVar {
        var: "AUTOSYNC_MARGIN_MULTIPLIER".to_string(),
        reason: e.to_string(),
    })?;
    if margin <= Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar {
            var: "AUTOSYNC_MARGIN_MULTIPLIER".to_string(),
            reason: format!("must be positive, got {margin}"),
        });
    }
    Ok(margin)
}

fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
