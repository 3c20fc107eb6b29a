use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{AdherenceWindow, DuplicateLogPolicy, RosterWeighting};

/// Application-level constants
pub const APP_NAME: &str = "MediTrack";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Loopback only: the API serves a local front end.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7421";

/// Adherence at or above this percentage is reported as on track.
pub const DEFAULT_ON_TRACK_THRESHOLD: u32 = 80;

/// Number of log entries shown under recent activity.
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 10;

const ENV_ADDR: &str = "MEDITRACK_ADDR";
const ENV_DUPLICATE_POLICY: &str = "MEDITRACK_DUPLICATE_POLICY";
const ENV_ADHERENCE_WINDOW: &str = "MEDITRACK_ADHERENCE_WINDOW";
const ENV_ROSTER_WEIGHTING: &str = "MEDITRACK_ROSTER_WEIGHTING";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "meditrack=info,meditrack_lib=info,warn"
}

/// Socket address for the local API, `MEDITRACK_ADDR` or the default.
pub fn bind_addr() -> SocketAddr {
    let fallback = || {
        DEFAULT_BIND_ADDR
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 7421)))
    };
    match std::env::var(ENV_ADDR) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "Invalid {ENV_ADDR}, using default");
            fallback()
        }),
        Err(_) => fallback(),
    }
}

/// Policies for the behaviours the tracker leaves open: duplicate
/// logging, the adherence window, and historical roster weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub duplicate_policy: DuplicateLogPolicy,
    pub adherence_window: AdherenceWindow,
    pub roster_weighting: RosterWeighting,
    pub on_track_threshold: u32,
    pub recent_activity_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicateLogPolicy::Reject,
            adherence_window: AdherenceWindow::Rolling,
            roster_weighting: RosterWeighting::CurrentRoster,
            on_track_threshold: DEFAULT_ON_TRACK_THRESHOLD,
            recent_activity_limit: DEFAULT_RECENT_ACTIVITY_LIMIT,
        }
    }
}

impl TrackerConfig {
    /// Defaults overridden by `MEDITRACK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            duplicate_policy: parse_or(
                &lookup,
                ENV_DUPLICATE_POLICY,
                defaults.duplicate_policy,
            ),
            adherence_window: parse_or(
                &lookup,
                ENV_ADHERENCE_WINDOW,
                defaults.adherence_window,
            ),
            roster_weighting: parse_or(
                &lookup,
                ENV_ROSTER_WEIGHTING,
                defaults.roster_weighting,
            ),
            ..defaults
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, fallback = %default, "Unrecognised setting");
            default
        }),
        None => default,
    }
}
