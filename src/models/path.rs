use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::id::StationId;
use super::segment::{Segment, SegmentError};
use super::station::Station;

/// Why a path mutation was rejected
///
/// Every rejection is total: the path is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Both stations of the inserted segment are already on the line
    #[error("both stations are already connected on this line")]
    DuplicateSegment,
    /// The inserted segment shares no station with the line
    #[error("neither station is part of this line")]
    DisconnectedSegment,
    /// A split must leave a strictly positive remainder of the split segment
    #[error("cannot carve a segment of length {inserted} out of one of length {existing}")]
    InvalidSplitLength { existing: u32, inserted: u32 },
    /// No segment starts at the station the index claimed one does.
    /// Unreachable when the membership checks above it passed.
    #[error("no segment starts at station {0}")]
    UnknownUpStation(StationId),
    /// No segment ends at the station the index claimed one does.
    /// Unreachable when the membership checks above it passed.
    #[error("no segment ends at station {0}")]
    UnknownDownStation(StationId),
    /// The removal target is not on the line
    #[error("station {0} is not on this line")]
    StationNotInPath(StationId),
    /// Merging the two segments around a removed station would overflow the
    /// distance range
    #[error("cannot merge segments of length {arriving} and {leaving}: distance overflows")]
    DistanceOverflow { arriving: u32, leaving: u32 },
    /// A line keeps at least one segment once it has any
    #[error("the last remaining segment cannot be removed")]
    SinglePathSegment,
    #[error(transparent)]
    InvalidSegment(#[from] SegmentError),
}

/// Where an inserted segment attaches to the existing path
///
/// Computed once per insertion, before any mutation; exactly one variant
/// applies to a segment that passed the duplicate/disconnected checks.
#[derive(Debug, Clone, Copy)]
enum Attachment {
    /// First segment of an empty path
    Bootstrap,
    /// Shares its up station with the segment at this index; that segment
    /// is shortened from its up end
    SplitAtUp(usize),
    /// Shares its down station with the segment at this index; that segment
    /// is shortened from its down end
    SplitAtDown(usize),
    /// Attaches before the first or after the last station
    Extend,
}

/// Identity-keyed lookup over a segment collection
///
/// On a valid path each station is the up endpoint of at most one segment
/// and the down endpoint of at most one, so both maps are injective.
struct PathIndex {
    by_up: HashMap<StationId, usize>,
    by_down: HashMap<StationId, usize>,
}

impl PathIndex {
    fn build(segments: &[Segment]) -> Self {
        let mut by_up = HashMap::with_capacity(segments.len());
        let mut by_down = HashMap::with_capacity(segments.len());
        for (at, segment) in segments.iter().enumerate() {
            by_up.insert(segment.up().id(), at);
            by_down.insert(segment.down().id(), at);
        }
        Self { by_up, by_down }
    }

    /// Whether the station is an endpoint of any segment
    fn knows(&self, id: StationId) -> bool {
        self.by_up.contains_key(&id) || self.by_down.contains_key(&id)
    }
}

/// An ordered, non-branching chain of segments representing one transit line
///
/// The segment collection is unordered in memory; at every observable moment
/// it chains into a single simple path (or is empty). Mutations either fully
/// apply and restore that invariant or fail without touching the path.
/// Callers mutating one `Path` from several threads must serialize access
/// themselves.
///
/// Deserialization trusts its input: only this crate's mutations are
/// guarded, so a `Path` decoded from external data is assumed to already
/// satisfy the chain invariant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Number of segments on the path
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the station is an endpoint of any segment on the path
    #[must_use]
    pub fn contains(&self, station: &Station) -> bool {
        PathIndex::build(&self.segments).knows(station.id())
    }

    /// Sum of all segment distances; conserved by splits and merges
    #[must_use]
    pub fn total_distance(&self) -> u64 {
        self.segments
            .iter()
            .map(|segment| u64::from(segment.distance()))
            .sum()
    }

    /// Segments in travel order, upstream terminus first
    ///
    /// The upstream terminus is the one segment whose up station is nobody's
    /// down station; from there each segment's down station keys the next.
    #[must_use]
    pub fn ordered_segments(&self) -> Vec<&Segment> {
        let index = PathIndex::build(&self.segments);
        let mut ordered = Vec::with_capacity(self.segments.len());

        let mut current = self
            .segments
            .iter()
            .find(|segment| !index.by_down.contains_key(&segment.up().id()));

        while let Some(segment) = current {
            ordered.push(segment);
            current = index
                .by_up
                .get(&segment.down().id())
                .map(|&at| &self.segments[at]);
        }

        ordered
    }

    /// Stations in travel order: the upstream terminus followed by the down
    /// station of each segment
    #[must_use]
    pub fn ordered_stations(&self) -> Vec<&Station> {
        let segments = self.ordered_segments();
        let mut stations = Vec::with_capacity(segments.len() + 1);

        if let Some(first) = segments.first() {
            stations.push(first.up());
        }
        for segment in &segments {
            stations.push(segment.down());
        }

        stations
    }

    /// Upstream terminus of the path
    #[must_use]
    pub fn first_station(&self) -> Option<&Station> {
        self.ordered_segments().first().map(|segment| segment.up())
    }

    /// Downstream terminus of the path
    #[must_use]
    pub fn last_station(&self) -> Option<&Station> {
        self.ordered_segments().last().map(|segment| segment.down())
    }

    /// Add a segment to the path
    ///
    /// An empty path accepts any valid segment. Otherwise exactly one
    /// endpoint of the new segment must already be on the line: the segment
    /// then either extends the path past a terminus, or splits the existing
    /// segment that shares the matching endpoint, carving its own distance
    /// out of it.
    pub fn insert(&mut self, up: Station, down: Station, distance: u32) -> Result<(), PathError> {
        let segment = Segment::new(up, down, distance)?;
        let attachment = self.classify(&segment)?;

        debug!(
            "path insert {} -> {} ({}) as {attachment:?}",
            segment.up().name(),
            segment.down().name(),
            segment.distance(),
        );

        match attachment {
            Attachment::Bootstrap | Attachment::Extend => {}
            Attachment::SplitAtUp(at) => {
                let new_up = segment.down().clone();
                self.segments[at].split_up(new_up, segment.distance());
            }
            Attachment::SplitAtDown(at) => {
                let new_down = segment.up().clone();
                self.segments[at].split_down(new_down, segment.distance());
            }
        }
        self.segments.push(segment);

        Ok(())
    }

    /// Remove a station, dropping a terminus segment or merging the two
    /// segments around an interior station
    pub fn remove(&mut self, station: &Station) -> Result<(), PathError> {
        if self.segments.len() == 1 {
            return Err(PathError::SinglePathSegment);
        }

        let id = station.id();
        let index = PathIndex::build(&self.segments);
        if !index.knows(id) {
            return Err(PathError::StationNotInPath(id));
        }

        let is_first = !index.by_down.contains_key(&id);
        let is_last = !index.by_up.contains_key(&id);

        if is_first {
            let at = index
                .by_up
                .get(&id)
                .copied()
                .ok_or(PathError::UnknownUpStation(id))?;
            debug!("path remove {}: dropping head segment", station.name());
            self.segments.remove(at);
        } else if is_last {
            let at = index
                .by_down
                .get(&id)
                .copied()
                .ok_or(PathError::UnknownDownStation(id))?;
            debug!("path remove {}: dropping tail segment", station.name());
            self.segments.remove(at);
        } else {
            // Interior station: the arriving segment absorbs the leaving one.
            let arriving = index
                .by_down
                .get(&id)
                .copied()
                .ok_or(PathError::UnknownDownStation(id))?;
            let leaving = index
                .by_up
                .get(&id)
                .copied()
                .ok_or(PathError::UnknownUpStation(id))?;
            debug!("path remove {}: merging adjacent segments", station.name());

            let absorbed = self.segments[leaving].clone();
            let merged = self.segments[arriving]
                .distance()
                .checked_add(absorbed.distance())
                .ok_or(PathError::DistanceOverflow {
                    arriving: self.segments[arriving].distance(),
                    leaving: absorbed.distance(),
                })?;
            self.segments[arriving].merge_down(absorbed.down().clone(), merged);
            self.segments.remove(leaving);
        }

        Ok(())
    }

    /// Decide where the segment attaches, rejecting it if it cannot
    ///
    /// All of insertion's guards run here, before any mutation: duplicate
    /// pair, disconnected pair, and the split length check.
    fn classify(&self, new: &Segment) -> Result<Attachment, PathError> {
        if self.segments.is_empty() {
            return Ok(Attachment::Bootstrap);
        }

        let index = PathIndex::build(&self.segments);
        let up_known = index.knows(new.up().id());
        let down_known = index.knows(new.down().id());

        // A segment whose stations are both already on the line would close
        // a cycle or duplicate an existing span.
        if up_known && down_known {
            return Err(PathError::DuplicateSegment);
        }
        if !up_known && !down_known {
            return Err(PathError::DisconnectedSegment);
        }

        match (
            index.by_up.get(&new.up().id()).copied(),
            index.by_down.get(&new.down().id()).copied(),
        ) {
            (Some(at), _) => {
                self.check_split(at, new)?;
                Ok(Attachment::SplitAtUp(at))
            }
            (None, Some(at)) => {
                self.check_split(at, new)?;
                Ok(Attachment::SplitAtDown(at))
            }
            (None, None) => Ok(Attachment::Extend),
        }
    }

    /// The inserted segment must be strictly shorter than the one it splits
    fn check_split(&self, at: usize, new: &Segment) -> Result<(), PathError> {
        let existing = self.segments[at].distance();
        if new.distance() >= existing {
            return Err(PathError::InvalidSplitLength {
                existing,
                inserted: new.distance(),
            });
        }
        Ok(())
    }
}
