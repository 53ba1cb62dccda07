//! Registry configuration.
//!
//! Settings are layered with the `config` crate: an optional file first,
//! then `BOLTON_*` environment variables on top, e.g. `BOLTON_INJECTION=false`.

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const ENV_PREFIX: &str = "BOLTON";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Install trampolines on concrete targets when an implementation is registered.
    pub injection: bool,
    /// Reject dispatcher calls for method names the capability does not declare.
    pub strict_dispatch: bool,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            injection: true,
            strict_dispatch: false,
        }
    }
}

impl RegistrySettings {
    /// Reads settings from `path` (format taken from its extension, a missing
    /// file is fine) and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
