//! Configuration constants and profile loading for pantry
//!
//! Profiles live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! base_url = http://localhost:8000/api
//! timeout_secs = 10
//! search_debounce_ms = 300
//! ```

use crate::cmd_args::CommandLineArgs;
use anyhow::{Context, Result};
use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default profile file path for pantry
pub const DEFAULT_PROFILE_PATH: &str = "~/.pantry/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "PANTRY_PROFILE_PATH";

/// Environment variable holding the log filter directive
pub const LOG_LEVEL_ENV_VAR: &str = "PANTRY_LOG_LEVEL";

/// Catalog API used when the profile does not name one
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Quiet period after the last keystroke before a search is issued
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Expand `~` and environment variables in a user supplied path
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(path).as_ref()),
    }
}

/// Connection and UI settings of one profile
#[derive(Debug, Clone, PartialEq)]
pub struct ApiProfile {
    pub name: String,
    pub base_url: String,
    /// Transport timeout; `None` leaves it to reqwest's defaults
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
    pub search_debounce: Duration,
    pub log_file: Option<PathBuf>,
}

impl ApiProfile {
    /// Profile with every setting at its default
    pub fn blank(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: None,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            log_file: None,
        }
    }
}

/// Reads profiles from an INI file
pub struct IniProfileStore {
    path: PathBuf,
}

impl IniProfileStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: expand_path(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load a profile by section name; `Ok(None)` when the file or section is missing
    pub fn get_profile(&self, name: &str) -> Result<Option<ApiProfile>> {
        if !self.path.exists() {
            tracing::debug!("Profile file '{}' does not exist", self.path.display());
            return Ok(None);
        }

        let ini = Ini::load_from_file(&self.path)
            .with_context(|| format!("Failed to read profile file '{}'", self.path.display()))?;

        let Some(section) = ini.section(Some(name)) else {
            return Ok(None);
        };

        let mut profile = ApiProfile::blank(name);

        if let Some(base_url) = section.get("base_url").filter(|v| !v.trim().is_empty()) {
            profile.base_url = base_url.trim().to_string();
        }

        if let Some(timeout) = section.get("timeout_secs") {
            let secs: u64 = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid timeout_secs '{timeout}' in [{name}]"))?;
            profile.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(debounce) = section.get("search_debounce_ms") {
            let millis: u64 = debounce
                .trim()
                .parse()
                .with_context(|| format!("Invalid search_debounce_ms '{debounce}' in [{name}]"))?;
            profile.search_debounce = Duration::from_millis(millis);
        }

        profile.user_agent = section
            .get("user_agent")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        profile.log_file = section
            .get("log_file")
            .filter(|v| !v.trim().is_empty())
            .map(|v| expand_path(v.trim()));

        Ok(Some(profile))
    }
}

/// Profile named on the command line with its overrides applied
///
/// A missing profile is not an error: the built-in defaults are used.
pub fn load_profile(store: &IniProfileStore, args: &CommandLineArgs) -> Result<ApiProfile> {
    tracing::debug!(
        "Loading profile '{}' from '{}'",
        args.profile(),
        store.path().display()
    );
    let mut profile = match store.get_profile(args.profile())? {
        Some(profile) => profile,
        None => {
            tracing::debug!("Profile '{}' not found, using defaults", args.profile());
            ApiProfile::blank(args.profile())
        }
    };

    if let Some(base_url) = args.base_url() {
        profile.base_url = base_url.to_string();
    }
    if let Some(log_file) = args.log_file() {
        profile.log_file = Some(log_file.clone());
    }
    Ok(profile)
}
