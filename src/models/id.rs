/// ID generation utilities
///
/// Stations carry random u64 identifiers; lines use UUIDs (see
/// [`crate::models::Line`]). Identity lives entirely in the id — display
/// names are free to collide.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generate a new random u64 ID
///
/// Uses cryptographically secure random number generation to ensure
/// IDs are unpredictable and have minimal collision risk.
#[must_use]
pub fn generate_id() -> u64 {
    rand::thread_rng().gen()
}

/// Opaque station identifier
///
/// Registries that already number their stations can wrap their own ids;
/// everyone else gets a random one via [`StationId::random`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StationId(pub u64);

impl StationId {
    #[must_use]
    pub fn random() -> Self {
        Self(generate_id())
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
