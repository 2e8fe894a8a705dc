//! ---
//! park_section: "01-core-functionality"
//! park_subsection: "module"
//! park_type: "source"
//! park_scope: "code"
//! park_description: "Shared primitives for the simulator runtime."
//! park_version: "v0.1.0"
//! park_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use url::Url;

use crate::logging::LogFormat;

fn default_interval() -> Duration {
    Duration::from_millis(3000)
}

fn default_slot_count() -> u32 {
    10
}

/// Connection settings for the remote occupancy store.
///
/// Both values are mandatory and come from the process environment. The
/// service-role credential authorises row updates and must be kept out of
/// logs and serialised output, so this struct deliberately derives neither
/// `Serialize` nor `Display`.
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    /// Base URL of the hosted backend, e.g. `https://project.supabase.co`.
    pub base_url: Url,
    /// Service-role key sent as both the api key and the bearer token.
    pub service_role: String,
}

impl RemoteSettings {
    pub const ENV_BASE_URL: &'static str = "SUPABASE_URL";
    pub const ENV_SERVICE_ROLE: &'static str = "SUPABASE_SERVICE_ROLE";

    /// Resolve settings from the process environment.
    ///
    /// Fails before any network activity when either variable is missing,
    /// empty, or not an absolute URL; the daemon turns that failure into a
    /// non-zero exit.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an injected lookup so tests can exercise
    /// the missing/empty/malformed paths without touching the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = require(&lookup, Self::ENV_BASE_URL)?;
        let service_role = require(&lookup, Self::ENV_SERVICE_ROLE)?;
        let base_url = Url::parse(&raw_url)
            .with_context(|| format!("{} is not a valid absolute URL: {raw_url}", Self::ENV_BASE_URL))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!(
                "{} must be an http(s) base URL, got {raw_url}",
                Self::ENV_BASE_URL
            ));
        }
        Ok(Self {
            base_url,
            service_role,
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
        Some(_) => Err(anyhow!(
            "environment variable {key} is empty; set {} and {} before starting the simulator",
            RemoteSettings::ENV_BASE_URL,
            RemoteSettings::ENV_SERVICE_ROLE
        )),
        None => Err(anyhow!(
            "missing environment variable {key}; set {} and {} before starting the simulator",
            RemoteSettings::ENV_BASE_URL,
            RemoteSettings::ENV_SERVICE_ROLE
        )),
    }
}

/// Operational settings for the simulator loop.
#[derive(Debug, Clone)]
pub struct SimulatorSettings {
    /// Period between update attempts.
    pub interval: Duration,
    /// Number of slots the backend tracks; samples draw from `[1, slots]`.
    pub slots: u32,
    /// Stop after this many ticks instead of running forever.
    pub max_ticks: Option<u64>,
}

impl SimulatorSettings {
    /// Validate structural invariants before the loop starts.
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(anyhow!("interval must be greater than zero"));
        }
        if self.slots == 0 {
            return Err(anyhow!("slot count must be at least 1"));
        }
        if let Some(0) = self.max_ticks {
            return Err(anyhow!("tick limit must be greater than zero when set"));
        }
        Ok(())
    }
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            slots: default_slot_count(),
            max_ticks: None,
        }
    }
}

/// Logging output configuration for the daemon.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Console output format.
    pub format: LogFormat,
    /// Optional directory for rolling daily JSON log files.
    pub directory: Option<PathBuf>,
    /// Override for the log file prefix; defaults to the service name.
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            directory: None,
            file_prefix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(entries: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = entries.iter().copied().collect();
        move |key: &str| map.get(key).map(|value| (*value).to_owned())
    }

    #[test]
    fn remote_settings_resolve_when_both_variables_present() {
        let settings = RemoteSettings::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_SERVICE_ROLE", "role-key"),
        ]))
        .unwrap();
        assert_eq!(settings.base_url.as_str(), "https://demo.supabase.co/");
        assert_eq!(settings.service_role, "role-key");
    }

    #[test]
    fn remote_settings_reject_missing_url() {
        let err = RemoteSettings::from_lookup(lookup_from(&[(
            "SUPABASE_SERVICE_ROLE",
            "role-key",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));
    }

    #[test]
    fn remote_settings_reject_empty_credential() {
        let err = RemoteSettings::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_SERVICE_ROLE", "   "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SUPABASE_SERVICE_ROLE"));
    }

    #[test]
    fn remote_settings_reject_malformed_url() {
        let err = RemoteSettings::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "not a url"),
            ("SUPABASE_SERVICE_ROLE", "role-key"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));
    }

    #[test]
    fn simulator_settings_defaults_are_valid() {
        let settings = SimulatorSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.interval, Duration::from_millis(3000));
        assert_eq!(settings.slots, 10);
    }

    #[test]
    fn simulator_settings_reject_zero_interval() {
        let settings = SimulatorSettings {
            interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn simulator_settings_reject_zero_slots() {
        let settings = SimulatorSettings {
            slots: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
