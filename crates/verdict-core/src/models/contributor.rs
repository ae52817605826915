//! Contributor registry types.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of recent observed-quality samples backing the
/// recent-performance score.
pub const RECENT_WINDOW_LEN: usize = 8;

/// The bounded recent-quality window, oldest first.
pub type RecentWindow = SmallVec<[f64; RECENT_WINDOW_LEN]>;

/// Stable identifier for a contributor (expert reviewer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributorId(String);

impl ContributorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContributorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContributorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attributes consumed by bias dimension strategies. All optional — a
/// contributor who declined to self-describe simply contributes less signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributorProfile {
    /// Coarse demographic band (e.g. seniority cohort).
    pub demographic_group: Option<String>,
    /// Professional cluster (e.g. firm, chamber, academic department).
    pub professional_cluster: Option<String>,
    /// Jurisdiction the contributor practices in.
    pub jurisdiction: Option<String>,
    pub years_experience: Option<u32>,
}

/// A registered expert. Owned by the Authority Tracker; mutated only through
/// Authority Updater outputs; never deleted, only deactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub id: ContributorId,
    /// Static credential score set at onboarding, in [0, 1].
    pub baseline_credential_score: f64,
    /// Exponentially smoothed historical accuracy, in [0, 1].
    pub track_record_score: f64,
    /// Mean of the recent observed-quality window, in [0, 1].
    pub recent_performance_score: f64,
    /// The bounded window backing `recent_performance_score`, oldest first.
    #[serde(default)]
    pub recent_window: RecentWindow,
    pub active: bool,
    #[serde(default)]
    pub profile: ContributorProfile,
}

impl Contributor {
    /// Register a new contributor. Track record starts at the neutral prior
    /// 0.5 until the first finalized round updates it; recent performance
    /// likewise.
    pub fn onboard(id: impl Into<ContributorId>, baseline_credential_score: f64) -> Self {
        Self {
            id: id.into(),
            baseline_credential_score: baseline_credential_score.clamp(0.0, 1.0),
            track_record_score: 0.5,
            recent_performance_score: 0.5,
            recent_window: SmallVec::new(),
            active: true,
            profile: ContributorProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: ContributorProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Contributors are never deleted — deactivation removes them from
    /// future quorum mass without losing their history.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
