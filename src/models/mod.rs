mod id;
mod line;
mod path;
mod segment;
mod station;

pub use id::{generate_id, StationId};
pub use line::Line;
pub use path::{Path, PathError};
pub use segment::{Segment, SegmentError};
pub use station::Station;
