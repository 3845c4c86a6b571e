//! # Application Configuration
//!
//! Configuration for the harvester: pipeline/store settings, outbound HTTP
//! settings and log output settings. Values come from built-in defaults,
//! optionally overridden by a config file and `WONS*` environment
//! variables. The WONS portal's own addresses and parameter names live in
//! the [`wons`] constants module; the [`utils`] module renders target
//! addresses from them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub harvest: HarvestConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Pipeline and store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Portal base URL that relative target addresses resolve against.
    pub base_url: String,
    /// Path of the append-only CSV store.
    pub store_path: PathBuf,
    /// Upper bound on fetches in flight at once.
    pub max_concurrent_fetches: usize,
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter, overridable with `RUST_LOG`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json_format: bool,
    /// Also write to a daily-rolled file under `log_dir`.
    pub file_output: bool,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            harvest: HarvestConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: wons::BASE_URL.to_string(),
            store_path: PathBuf::from(defaults::STORE_PATH),
            max_concurrent_fetches: defaults::MAX_CONCURRENT_FETCHES,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: PathBuf::from(defaults::LOG_DIR),
        }
    }
}

impl AppConfig {
    /// Loads configuration from defaults, an optional file, and `WONS*`
    /// environment variables (e.g. `WONS_HARVEST__MAX_CONCURRENT_FETCHES`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!("Loading configuration file: {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }
        let loaded: Self = builder
            .add_source(
                config::Environment::with_prefix("WONS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.harvest.base_url.starts_with("http") {
            return Err(ConfigError::Validation {
                message: format!("base_url `{}` is not an http(s) URL", self.harvest.base_url),
            });
        }
        if self.harvest.store_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                message: "store_path is empty".to_string(),
            });
        }
        if self.harvest.max_concurrent_fetches == 0 {
            return Err(ConfigError::Validation {
                message: "max_concurrent_fetches must be at least 1".to_string(),
            });
        }
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                message: "timeout_seconds must be at least 1".to_string(),
            });
        }
        if self.logging.level.is_empty() {
            return Err(ConfigError::Validation {
                message: "logging level is empty".to_string(),
            });
        }
        Ok(())
    }
}

/// WONS portal addresses and parameter names.
pub mod wons {
    /// Base URL for the WONS portal.
    pub const BASE_URL: &str = "https://itportal.decc.gov.uk";

    /// Listing endpoint: one query yields every well in the requested
    /// quadrant/block product.
    pub const WELL_SEARCH_PATH: &str = "/pls/wons/wdep0100.qryWell";

    /// Well header endpoint: one query yields one well's data page.
    pub const WELL_HEADER_PATH: &str = "/pls/wons/wdep0100.wellHeaderData";

    /// Marker value opening the repeated quadrant parameter group.
    pub const QUAD_LIST_MARKER: &str = "***";

    /// Marker value opening the repeated block parameter group.
    pub const BLOCK_LIST_MARKER: &str = "**";

    /// Repeated listing parameter carrying one quadrant value.
    pub const PARAM_QUAD_LIST: &str = "f_quadNoList";

    /// Repeated listing parameter carrying one block value.
    pub const PARAM_BLOCK_LIST: &str = "f_blockNoList";

    /// Detail parameters, in the exact order the portal emits them. The
    /// positional address decoder depends on this order never changing.
    pub mod detail_params {
        pub const QUAD: &str = "p_quadNo";
        pub const BLOCK: &str = "p_blockNo";
        pub const BLOCK_SUFFIX: &str = "p_block_suffix";
        pub const PLATFORM: &str = "p_platform";
        pub const DRILLING_SEQ: &str = "p_drilling_seq_no";
        pub const WELL_SUFFIX: &str = "p_well_suffix";
    }
}

/// Default configuration values.
pub mod defaults {
    /// Default store file, created beside the working directory.
    pub const STORE_PATH: &str = "oil_data.csv";

    /// Default quadrant spec when none is given.
    pub const QUADRANT_SPEC: &str = "1";

    /// Default block spec when none is given.
    pub const BLOCK_SPEC: &str = "1-30";

    /// Default maximum fetches in flight.
    pub const MAX_CONCURRENT_FETCHES: usize = 100;

    /// Default request timeout in seconds.
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    /// Default user agent presented to the portal.
    pub const USER_AGENT: &str = "wons-harvester/0.3";

    /// Default log level.
    pub const LOG_LEVEL: &str = "info";

    /// Default JSON format setting.
    pub const LOG_JSON_FORMAT: bool = false;

    /// Default file output setting.
    pub const LOG_FILE_OUTPUT: bool = false;

    /// Default log directory.
    pub const LOG_DIR: &str = "logs";
}

/// Address building helpers over the [`wons`] constants.
pub mod utils {
    use super::wons::{
        BLOCK_LIST_MARKER, PARAM_BLOCK_LIST, PARAM_QUAD_LIST, QUAD_LIST_MARKER, WELL_HEADER_PATH,
        WELL_SEARCH_PATH, detail_params,
    };
    use crate::domain::range::CoordinateRange;
    use crate::domain::well_code::{SENTINEL, WellCode};

    /// Builds the server-relative listing address for a quadrant range and a
    /// block range. Each expanded value rides as a repeated parameter after
    /// its group's marker value; the portal expands the cross product
    /// server-side.
    #[must_use]
    pub fn listing_address(quadrants: &CoordinateRange, blocks: &CoordinateRange) -> String {
        let mut address = format!("{WELL_SEARCH_PATH}?{PARAM_QUAD_LIST}={QUAD_LIST_MARKER}");
        for value in quadrants.values() {
            address.push('&');
            address.push_str(PARAM_QUAD_LIST);
            address.push('=');
            address.push_str(&value);
        }
        address.push('&');
        address.push_str(PARAM_BLOCK_LIST);
        address.push('=');
        address.push_str(BLOCK_LIST_MARKER);
        for value in blocks.values() {
            address.push('&');
            address.push_str(PARAM_BLOCK_LIST);
            address.push('=');
            address.push_str(&value);
        }
        address
    }

    /// Builds the server-relative detail address for one well, rendering
    /// absent optional fields as the wire sentinel.
    #[must_use]
    pub fn well_detail_address(quadrant: &str, code: &WellCode) -> String {
        format!(
            "{WELL_HEADER_PATH}?{}={}&{}={}&{}={}&{}={}&{}={}&{}={}",
            detail_params::QUAD,
            quadrant,
            detail_params::BLOCK,
            code.block_no,
            detail_params::BLOCK_SUFFIX,
            code.block_suffix.as_deref().unwrap_or(SENTINEL),
            detail_params::PLATFORM,
            code.platform.as_deref().unwrap_or(SENTINEL),
            detail_params::DRILLING_SEQ,
            code.drilling_seq,
            detail_params::WELL_SUFFIX,
            code.well_suffix.as_deref().unwrap_or(SENTINEL),
        )
    }

    /// Resolves a server-relative address against a base URL; absolute
    /// addresses pass through unchanged.
    #[must_use]
    pub fn resolve_url(base_url: &str, address: &str) -> String {
        if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else if address.starts_with('/') {
            format!("{}{}", base_url.trim_end_matches('/'), address)
        } else {
            format!("{}/{}", base_url.trim_end_matches('/'), address)
        }
    }

    /// Resolves a link found on a page against that page's URL. The portal
    /// emits listing links relative to the listing page's directory, so
    /// plain base-URL concatenation would lose the path prefix.
    #[must_use]
    pub fn resolve_link(page_url: &str, href: &str) -> Option<String> {
        let page = url::Url::parse(page_url).ok()?;
        page.join(href).ok().map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::key_codec::decode_detail_address;
    use crate::domain::range::CoordinateRange;
    use crate::domain::well_code::WellCode;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.harvest.max_concurrent_fetches, 100);
        assert_eq!(config.harvest.store_path, PathBuf::from("oil_data.csv"));
    }

    #[test]
    fn validation_rejects_zero_cap() {
        let mut config = AppConfig::default();
        config.harvest.max_concurrent_fetches = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn validation_rejects_non_http_base_url() {
        let mut config = AppConfig::default();
        config.harvest.base_url = "ftp://example.org".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[harvest]\nmax_concurrent_fetches = 7").unwrap();
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.harvest.max_concurrent_fetches, 7);
        assert_eq!(config.http.timeout_seconds, 30);
    }

    #[test]
    fn listing_address_matches_portal_shape() {
        let quadrants = CoordinateRange::parse("15").unwrap();
        let blocks = CoordinateRange::parse("1-2").unwrap();
        assert_eq!(
            utils::listing_address(&quadrants, &blocks),
            "/pls/wons/wdep0100.qryWell?f_quadNoList=***&f_quadNoList=15\
             &f_blockNoList=**&f_blockNoList=1&f_blockNoList=2"
        );
    }

    #[test]
    fn detail_address_renders_sentinels() {
        let code = WellCode::decompose("12", "1").unwrap();
        assert_eq!(
            utils::well_detail_address("15", &code),
            "/pls/wons/wdep0100.wellHeaderData?p_quadNo=15&p_blockNo=12\
             &p_block_suffix=+&p_platform=+&p_drilling_seq_no=1&p_well_suffix=+"
        );
    }

    #[test]
    fn detail_address_round_trips_through_decoder() {
        let code = WellCode::decompose("9a", "B21z").unwrap();
        let address = utils::well_detail_address("15", &code);
        let parts = decode_detail_address(&address).unwrap();
        assert_eq!(parts.quadrant, "15");
        assert_eq!(parts.block_no, "9");
        assert_eq!(parts.block_suffix.as_deref(), Some("a"));
        assert_eq!(parts.platform.as_deref(), Some("B"));
        assert_eq!(parts.drilling_seq, "21");
        assert_eq!(parts.well_suffix.as_deref(), Some("z"));
    }

    #[test]
    fn resolve_url_handles_all_shapes() {
        assert_eq!(
            utils::resolve_url("https://itportal.decc.gov.uk", "/pls/wons/x"),
            "https://itportal.decc.gov.uk/pls/wons/x"
        );
        assert_eq!(
            utils::resolve_url("https://itportal.decc.gov.uk/", "pls/wons/x"),
            "https://itportal.decc.gov.uk/pls/wons/x"
        );
        assert_eq!(
            utils::resolve_url("https://itportal.decc.gov.uk", "https://other.example/x"),
            "https://other.example/x"
        );
    }

    #[test]
    fn listing_links_resolve_into_the_listing_directory() {
        let page = "https://itportal.decc.gov.uk/pls/wons/wdep0100.qryWell?f_quadNoList=***";
        assert_eq!(
            utils::resolve_link(page, "wdep0100.wellHeaderData?p_quadNo=15").as_deref(),
            Some("https://itportal.decc.gov.uk/pls/wons/wdep0100.wellHeaderData?p_quadNo=15")
        );
        assert_eq!(
            utils::resolve_link(page, "https://other.example/x").as_deref(),
            Some("https://other.example/x")
        );
        assert!(utils::resolve_link("not a url", "x").is_none());
    }
}
