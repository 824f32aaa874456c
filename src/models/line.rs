use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::path::{Path, PathError};
use super::segment::Segment;
use super::station::Station;

/// A named, colored line owning its path of segments
///
/// The line is the unit of ownership: its path starts empty at creation and
/// lives exactly as long as the line. Station identities are owned by an
/// external registry and only referenced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    name: String,
    color: String,
    #[serde(default)]
    path: Path,
}

impl Line {
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            path: Path::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn recolor(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a segment to the line's path
    pub fn add_segment(
        &mut self,
        up: Station,
        down: Station,
        distance: u32,
    ) -> Result<(), PathError> {
        self.path.insert(up, down, distance)
    }

    /// Remove a station from the line's path
    pub fn remove_station(&mut self, station: &Station) -> Result<(), PathError> {
        self.path.remove(station)
    }

    /// Segments in travel order
    #[must_use]
    pub fn segments(&self) -> Vec<&Segment> {
        self.path.ordered_segments()
    }

    /// Stations in travel order
    #[must_use]
    pub fn stations(&self) -> Vec<&Station> {
        self.path.ordered_stations()
    }
}
