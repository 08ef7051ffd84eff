//! shapetab geo - Coordinate formatting, projection and ring serialization
//!
//! Every function here is pure and works on one feature at a time.

pub mod dms;
pub mod rings;
pub mod transform;

pub use dms::{format_dms, parse_dms, to_dms, DmsParts};
pub use rings::{to_ring_set, DEFAULT_TOLERANCE};
pub use transform::{
    build_transform, project, CoordinateTransform, SphericalMercator, WEB_MERCATOR,
};
