//! User settings and on-disk paths.
//!
//! Settings live in `fundsea.toml` under the XDG config directory. A missing
//! or invalid file silently falls back to [`Settings::default`]; Fundsea never
//! refuses to start over configuration.

use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::{debug, warn};

/// Default backend root when the config file and CLI both stay silent.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// User-configurable application settings parsed from `fundsea.toml`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root URL of the catalog REST API (no trailing slash).
    pub base_url: String,
    /// Percentage width of the list pane (the detail pane takes the rest).
    pub layout_list_pct: u16,
    /// Whether list views re-fetch the current page when the terminal regains
    /// focus. Detail and metrics views never do.
    pub revalidate_lists_on_focus: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            layout_list_pct: 55,
            revalidate_lists_on_focus: true,
        }
    }
}

/// What: Resolve the Fundsea config directory, creating it when absent.
///
/// Inputs: None (reads `FUNDSEA_CONFIG_DIR`, `XDG_CONFIG_HOME`, `HOME`).
///
/// Output:
/// - `PathBuf` to the config directory; falls back to the current directory
///   when no home can be determined.
#[must_use]
pub fn config_dir() -> PathBuf {
    let dir = std::env::var_os("FUNDSEA_CONFIG_DIR").map_or_else(
        || {
            std::env::var_os("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
                .unwrap_or_else(|| PathBuf::from("."))
                .join("fundsea")
        },
        PathBuf::from,
    );
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// What: Directory for log files under the config dir.
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// What: Path of the settings file.
#[must_use]
pub fn settings_path() -> PathBuf {
    config_dir().join("fundsea.toml")
}

/// What: Parse settings from a TOML string, falling back field-by-field.
fn parse_settings(text: &str) -> Settings {
    match toml::from_str::<Settings>(text) {
        Ok(st) => st,
        Err(e) => {
            warn!(error = %e, "invalid fundsea.toml; using defaults");
            Settings::default()
        }
    }
}

/// What: Load user settings, cached for the lifetime of the process.
///
/// Output:
/// - `Settings` from `fundsea.toml` when present and valid, otherwise
///   [`Settings::default`].
#[must_use]
pub fn settings() -> Settings {
    static CACHE: OnceLock<Settings> = OnceLock::new();
    CACHE
        .get_or_init(|| {
            let path = settings_path();
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    debug!(path = %path.display(), "loaded settings");
                    parse_settings(&text)
                }
                Err(_) => Settings::default(),
            }
        })
        .clone()
}
