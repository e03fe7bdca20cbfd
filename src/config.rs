use std::{fs::File, io::Read, path::PathBuf};

use serde::Deserialize;

use crate::Bootstrap;

/// Optional overrides read from a TOML file. Anything left out keeps its
/// default.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    pub members: Option<PathBuf>,
    pub issues: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl Configuration {
    /// Lay these overrides on top of an existing bootstrap
    pub fn apply(self, bootstrap: Bootstrap) -> Bootstrap {
        Bootstrap {
            members: self.members.unwrap_or(bootstrap.members),
            issues: self.issues.unwrap_or(bootstrap.issues),
            output: self.output.unwrap_or(bootstrap.output),
            quiet: bootstrap.quiet,
        }
    }
}

/// Read the configuration file at the given path
pub fn get_configuration(path: impl Into<PathBuf>) -> Result<Configuration, String> {
    let path = path.into();
    let mut file = File::open(&path).map_err(|e| format!("Failed to open config file: {}", e))?;
    let mut buf = String::new();
    file.read_to_string(&mut buf)
        .map_err(|e| format!("Failed to read config file: {}", e))?;
    parse_configuration(&buf)
}

pub fn parse_configuration(content: &str) -> Result<Configuration, String> {
    toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))
}
