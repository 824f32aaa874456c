pub mod models;

pub use models::{Line, Path, PathError, Segment, SegmentError, Station, StationId};
