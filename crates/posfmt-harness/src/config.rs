//! Harness configuration.
//!
//! Values come from the environment and can be overridden by CLI flags:
//! - `POSFMT_SCAN_POLICY`: `strict` (default) or `lenient`.
//! - `POSFMT_LOG`: path of the structured JSONL log written by `verify`.

use std::path::PathBuf;

use posfmt_core::ScanPolicy;

pub const ENV_SCAN_POLICY: &str = "POSFMT_SCAN_POLICY";
pub const ENV_LOG_PATH: &str = "POSFMT_LOG";

/// Resolved harness settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Policy used by `render`.
    pub policy: ScanPolicy,
    /// Structured log destination, if any.
    pub log_path: Option<PathBuf>,
}

impl HarnessConfig {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let policy = lookup(ENV_SCAN_POLICY)
            .map(|raw| ScanPolicy::from_str_loose(&raw))
            .unwrap_or_default();
        let log_path = lookup(ENV_LOG_PATH)
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);
        Self { policy, log_path }
    }

    /// Apply a `--policy` flag, if given.
    #[must_use]
    pub fn with_policy_override(mut self, policy: Option<&str>) -> Self {
        if let Some(raw) = policy {
            self.policy = ScanPolicy::from_str_loose(raw);
        }
        self
    }

    /// Apply a `--log` flag, if given.
    #[must_use]
    pub fn with_log_override(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.log_path = path;
        }
        self
    }
}
