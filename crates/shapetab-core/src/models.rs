pub mod coordinate;
pub mod rings;
pub mod table;

pub use coordinate::{Coordinate, ProjectedCoordinate};
pub use rings::{Ring, RingSet};
pub use table::{ConversionSummary, OutputRow, OutputTable};
