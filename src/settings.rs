// User settings.
// Small JSON file holding the optional access token, the viewer login, and
// the private-repo opt-in. A missing file means defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::paths;
use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// GitHub access token. `GITHUB_TOKEN` and `--token` take precedence.
    pub access_token: Option<String>,
    /// Login of the viewer, used to classify rate-limit messages.
    pub login: Option<String>,
    /// Look up stats on private repositories too.
    #[serde(default)]
    pub show_private_repos: bool,
}

impl Settings {
    /// Load settings from the default per-user config location.
    pub fn load() -> Result<Self> {
        match paths::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }
}
