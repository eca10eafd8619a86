//! Subscriber installation from the engine's `log_profile`

use serde::Deserialize;
use std::sync::OnceLock;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Crates whose events the default filters admit
const CRATE_TARGETS: [&str; 3] = ["crosscut_core", "crosscut_store", "crosscut_engine"];

/// How the engine reports its log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Human-readable lines, executor transitions included
    #[default]
    Development,
    /// One JSON object per boundary event
    Production,
    /// Installs nothing, leaving the global subscriber to the test harness
    Test,
}

impl Profile {
    fn default_filter(self) -> EnvFilter {
        let level = match self {
            Profile::Development | Profile::Test => "debug",
            Profile::Production => "info",
        };
        let directives: Vec<String> = CRATE_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect();
        EnvFilter::new(directives.join(","))
    }
}

static ACTIVE: OnceLock<Profile> = OnceLock::new();

/// Install the subscriber for `profile`
///
/// The first call in a process wins; later calls leave the subscriber
/// alone and return the profile already active. `RUST_LOG` replaces the
/// default per-crate filter. A subscriber installed by someone else (a
/// test capture layer, an embedding application) is never replaced.
///
/// # Example
///
/// ```
/// use crosscut_core::logging_facility::{init, Profile};
///
/// let active = init(Profile::Test);
/// assert_eq!(init(Profile::Production), active);
/// ```
pub fn init(profile: Profile) -> Profile {
    *ACTIVE.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| profile.default_filter());
        match profile {
            Profile::Development => {
                let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
            }
            Profile::Production => {
                let _ = tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .try_init();
            }
            Profile::Test => {}
        }
        profile
    })
}

/// Profile installed by the first [`init`] call, if any
pub fn active_profile() -> Option<Profile> {
    ACTIVE.get().copied()
}
