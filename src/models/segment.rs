use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::station::Station;

/// Why a segment could not be constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("a segment cannot start and end at the same station")]
    SameEndpoints,
    #[error("a segment must span a strictly positive distance")]
    ZeroDistance,
}

/// A directed, distance-weighted edge between two stations
///
/// Traversal flows from `up` to `down`. The endpoints are always distinct
/// stations and the distance is always strictly positive; both are enforced
/// at construction and preserved by the split/merge mutators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    up: Station,
    down: Station,
    distance: u32,
}

impl Segment {
    pub fn new(up: Station, down: Station, distance: u32) -> Result<Self, SegmentError> {
        if up == down {
            return Err(SegmentError::SameEndpoints);
        }
        if distance == 0 {
            return Err(SegmentError::ZeroDistance);
        }
        Ok(Self { up, down, distance })
    }

    #[must_use]
    pub fn up(&self) -> &Station {
        &self.up
    }

    #[must_use]
    pub fn down(&self) -> &Station {
        &self.down
    }

    #[must_use]
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Move the up endpoint forward after a split, giving `taken` of the
    /// span to the inserted segment. Caller guarantees `taken < distance`.
    pub(crate) fn split_up(&mut self, up: Station, taken: u32) {
        self.up = up;
        self.distance -= taken;
    }

    /// Pull the down endpoint back after a split, giving `taken` of the
    /// span to the inserted segment. Caller guarantees `taken < distance`.
    pub(crate) fn split_down(&mut self, down: Station, taken: u32) {
        self.down = down;
        self.distance -= taken;
    }

    /// Extend the down endpoint over a removed neighbour. Caller provides
    /// the merged span, already checked against overflow.
    pub(crate) fn merge_down(&mut self, down: Station, merged: u32) {
        self.down = down;
        self.distance = merged;
    }
}
