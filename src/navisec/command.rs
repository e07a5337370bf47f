//! naviseccli subprocess runner
//!
//! Runs `naviseccli -address <endpoint> <auth> -xml <report args>` and hands
//! back stdout untouched. Decoding and validation happen elsewhere.

use super::config::NaviSecConfig;
use crate::domain::{ReportKind, ReportSource};
use crate::error::{Error, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

/// [`ReportSource`] backed by the real naviseccli binary
#[derive(Debug, Clone)]
pub struct NaviSecCli {
    config: NaviSecConfig,
}

impl NaviSecCli {
    pub fn new(config: NaviSecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NaviSecConfig {
        &self.config
    }

    /// Full argument list for one report
    pub fn build_args(&self, endpoint: &str, kind: ReportKind) -> Vec<String> {
        let mut args = vec!["-address".to_string(), endpoint.to_string()];
        args.extend(self.config.auth_args());
        args.push("-xml".into());
        args.extend(kind.command_args().iter().map(|a| a.to_string()));
        args
    }

    /// Check if the configured binary can be started
    pub fn is_available(&self) -> bool {
        std::process::Command::new(&self.config.binary_path)
            .arg("-help")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

/// Printable command, without credentials
fn describe(endpoint: &str, kind: ReportKind) -> String {
    format!("{} @ {}", kind.command_args().join(" "), endpoint)
}

#[async_trait]
impl ReportSource for NaviSecCli {
    async fn fetch(&self, endpoint: &str, kind: ReportKind) -> Result<Vec<u8>> {
        let command = describe(endpoint, kind);
        debug!("Running naviseccli: {}", command);

        let mut cmd = Command::new(&self.config.binary_path);
        cmd.args(self.build_args(endpoint, kind)).kill_on_drop(true);

        let output = match self.config.timeout() {
            Some(after) => match tokio::time::timeout(after, cmd.output()).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("naviseccli timed out after {:?}: {}", after, command);
                    return Err(Error::Timeout { command, after });
                }
            },
            None => cmd.output().await,
        }
        .map_err(|e| Error::Invocation {
            command: command.clone(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("naviseccli failed ({}): {}", output.status, command);
            return Err(Error::Invocation {
                command,
                reason: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::EmptyOutput { command });
        }

        debug!("naviseccli returned {} bytes: {}", output.stdout.len(), command);
        Ok(output.stdout)
    }
}
