//! WGS 84 to Web Mercator transformation
//!
//! The transform definition is immutable process-wide state: the spherical
//! implementation is a `static`, and the PROJ-backed one is built once and
//! passed around behind an `Arc`.

use shapetab_core::config::TransformKind;
use shapetab_core::error::{Result, ShapetabError};
use shapetab_core::models::{Coordinate, ProjectedCoordinate};
use std::f64::consts::FRAC_PI_4;
use std::sync::Arc;

/// WGS 84 semi-major axis in meters, the sphere radius of EPSG:3857
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Forward transform from geographic to projected coordinates.
///
/// Input and output are always x-first: (longitude, latitude) in,
/// (easting, northing) out.
pub trait CoordinateTransform: Send + Sync {
    fn transform(&self, coord: Coordinate) -> Result<(f64, f64)>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Closed-form spherical Mercator on the WGS 84 semi-major axis.
///
/// Latitudes of ±90° diverge to infinity; they are not guarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalMercator {
    radius: f64,
}

impl SphericalMercator {
    pub const fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = self.radius * lon.to_radians();
        let y = self.radius * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
        (x, y)
    }
}

impl CoordinateTransform for SphericalMercator {
    fn transform(&self, coord: Coordinate) -> Result<(f64, f64)> {
        Ok(self.forward(coord.lon, coord.lat))
    }

    fn name(&self) -> &str {
        "spherical-mercator"
    }
}

/// EPSG:4326 to EPSG:3857, shared by every conversion in the process
pub static WEB_MERCATOR: SphericalMercator = SphericalMercator::new(EARTH_RADIUS);

/// Project a coordinate and round it to whole meters
pub fn project(
    coord: Coordinate,
    transform: &dyn CoordinateTransform,
) -> Result<ProjectedCoordinate> {
    let (x, y) = transform.transform(coord)?;
    Ok(ProjectedCoordinate::from_meters(x, y))
}

/// Build the transform selected by configuration
pub fn build_transform(kind: TransformKind) -> Result<Arc<dyn CoordinateTransform>> {
    match kind {
        TransformKind::Spherical => Ok(Arc::new(WEB_MERCATOR)),
        #[cfg(feature = "proj")]
        TransformKind::Proj => Ok(Arc::new(ProjTransform::web_mercator()?)),
        #[cfg(not(feature = "proj"))]
        TransformKind::Proj => Err(ShapetabError::ConfigInvalid {
            key: "transform".to_string(),
            reason: "shapetab was built without the `proj` feature".to_string(),
        }),
    }
}

#[cfg(feature = "proj")]
pub use self::proj_backend::ProjTransform;

#[cfg(feature = "proj")]
mod proj_backend {
    use super::*;
    use proj::Proj;
    use std::sync::Mutex;

    /// PROJ pipeline for EPSG:4326 to EPSG:3857.
    ///
    /// `Proj` is not `Sync`, so conversions are serialized through a mutex.
    pub struct ProjTransform {
        proj: Mutex<Proj>,
    }

    impl ProjTransform {
        pub fn web_mercator() -> Result<Self> {
            // new_known_crs normalizes axis order to lon/lat
            let proj = Proj::new_known_crs("EPSG:4326", "EPSG:3857", None).map_err(|e| {
                ShapetabError::Projection {
                    message: format!(
                        "Failed to create projection from EPSG:4326 to EPSG:3857: {}",
                        e
                    ),
                }
            })?;
            Ok(Self { proj: Mutex::new(proj) })
        }
    }

    impl CoordinateTransform for ProjTransform {
        fn transform(&self, coord: Coordinate) -> Result<(f64, f64)> {
            let proj = self.proj.lock().map_err(|_| ShapetabError::Projection {
                message: "Projection lock poisoned".to_string(),
            })?;
            proj.convert((coord.lon, coord.lat)).map_err(|e| ShapetabError::Projection {
                message: format!("Projection failed: {}", e),
            })
        }

        fn name(&self) -> &str {
            "proj"
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_origin_maps_to_origin() {
        let projected = project(Coordinate::new(0.0, 0.0), &WEB_MERCATOR).unwrap();
        assert_eq!(projected, ProjectedCoordinate { x: 0, y: 0 });
    }

    #[test]
    fn test_antimeridian_x_extent() {
        let (x, _) = WEB_MERCATOR.forward(180.0, 0.0);
        assert!((x - 20_037_508.342_789_244).abs() < 1e-6);
    }

    #[test]
    fn test_known_point() {
        // Monas, Jakarta
        let projected = project(Coordinate::new(106.8271, -6.1754), &WEB_MERCATOR).unwrap();
        assert_eq!(projected.x, 11_891_938);
        assert_eq!(projected.y, -688_777);
    }

    #[test]
    fn test_pole_diverges() {
        let (_, y) = WEB_MERCATOR.forward(0.0, 90.0);
        assert!(y > 1e8 || y.is_infinite());
    }

    #[test]
    fn test_build_spherical() {
        let transform = build_transform(TransformKind::Spherical).unwrap();
        assert_eq!(transform.name(), "spherical-mercator");
    }

    #[cfg(not(feature = "proj"))]
    #[test]
    fn test_proj_unavailable_without_feature() {
        assert!(matches!(
            build_transform(TransformKind::Proj),
            Err(ShapetabError::ConfigInvalid { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_deterministic(lon in -180.0f64..=180.0, lat in -85.0f64..=85.0) {
            let coord = Coordinate::new(lon, lat);
            let first = project(coord, &WEB_MERCATOR).unwrap();
            let second = project(coord, &WEB_MERCATOR).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_hemisphere_signs(lon in -180.0f64..=180.0, lat in -85.0f64..=85.0) {
            let (x, y) = WEB_MERCATOR.forward(lon, lat);
            prop_assert!(x * lon >= 0.0);
            prop_assert!(y * lat >= 0.0);
        }
    }
}
