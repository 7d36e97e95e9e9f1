use std::{fs, path::Path};

use engine::Filter;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_STATE_PATH: &str = "config/fintrack_state.json";

/// What survives between invocations: the session flag and the last operation filter.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LocalState {
    pub authenticated: bool,
    pub username: Option<String>,
    pub filters: Option<Filter>,
}

impl LocalState {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    /// The saved filter, or the default view when nothing was saved.
    pub fn saved_filters(&self) -> Filter {
        self.filters.clone().unwrap_or_default()
    }

    pub fn set_filters(&mut self, filter: Filter) {
        self.filters = Some(filter);
    }

    pub fn login(&mut self, username: &str) {
        self.authenticated = true;
        self.username = Some(username.to_string());
    }

    /// Logging out also forgets the saved filter.
    pub fn logout(&mut self) {
        *self = Self::default();
    }
}

pub fn default_state_path() -> &'static str {
    DEFAULT_STATE_PATH
}
