//! naviseccli invocation settings

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// =============================================================================
// Constants
// =============================================================================

pub const DEFAULT_BINARY: &str = "/opt/Navisphere/bin/naviseccli";
pub const DEFAULT_SECFILE: &str = "/var/local/loadmon";

// =============================================================================
// Credentials
// =============================================================================

/// Explicit login, used instead of a security file when set
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
    /// 0 = global, 1 = local, 2 = LDAP
    #[serde(default)]
    pub scope: u8,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// How to run naviseccli
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NaviSecConfig {
    /// Path to the naviseccli binary
    pub binary_path: PathBuf,
    /// Security file directory (`-secfilepath`)
    pub secfile_path: Option<PathBuf>,
    /// Login used instead of the security file
    pub credentials: Option<Credentials>,
    /// Kill the tool after this many seconds
    pub timeout_secs: Option<u64>,
}

impl Default for NaviSecConfig {
    fn default() -> Self {
        Self {
            binary_path: PathBuf::from(DEFAULT_BINARY),
            secfile_path: Some(PathBuf::from(DEFAULT_SECFILE)),
            credentials: None,
            timeout_secs: None,
        }
    }
}

impl NaviSecConfig {
    /// Load from a YAML file; missing keys keep their defaults
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.binary_path.as_os_str().is_empty() {
            return Err(Error::Configuration("naviseccli path is empty".into()));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::Configuration("timeout must be at least 1 second".into()));
        }
        if let Some(creds) = &self.credentials {
            if creds.user.is_empty() {
                return Err(Error::Configuration("credentials need a user".into()));
            }
            if creds.scope > 2 {
                return Err(Error::Configuration(format!(
                    "invalid login scope {}",
                    creds.scope
                )));
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Authentication arguments: explicit login wins over the security file
    pub fn auth_args(&self) -> Vec<String> {
        if let Some(creds) = &self.credentials {
            return vec![
                "-user".into(),
                creds.user.clone(),
                "-password".into(),
                creds.password.clone(),
                "-scope".into(),
                creds.scope.to_string(),
            ];
        }
        match &self.secfile_path {
            Some(path) => vec!["-secfilepath".into(), path.display().to_string()],
            None => Vec::new(),
        }
    }
}
