use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::id::StationId;

/// A station on the network
///
/// Stations are compared by id, never by name: two `Station` values with the
/// same id are the same station even if one carries a stale display name.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Station {
    id: StationId,
    name: String,
}

impl Station {
    /// Create a station with a fresh random id
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StationId::random(),
            name: name.into(),
        }
    }

    /// Create a station with an id owned by an external registry
    #[must_use]
    pub fn with_id(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> StationId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
