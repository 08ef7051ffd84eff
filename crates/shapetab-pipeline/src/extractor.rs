//! Per-feature conversion of one shapefile into output rows

use geo::{Centroid, Geometry};
use shapetab_core::error::{Result, ShapetabError};
use shapetab_core::formats::ShapefileReader;
use shapetab_core::models::{Coordinate, OutputRow};
use shapetab_geo::{format_dms, project, to_ring_set, CoordinateTransform};
use std::path::Path;

/// Turns the features of one shapefile into output rows
pub struct FeatureExtractor<'a> {
    transform: &'a dyn CoordinateTransform,
    tolerance: f64,
}

impl<'a> FeatureExtractor<'a> {
    pub fn new(transform: &'a dyn CoordinateTransform, tolerance: f64) -> Self {
        Self { transform, tolerance }
    }

    /// Read every feature of `path` in file order, one row per feature.
    ///
    /// The first failing feature aborts the file; no partial rows are returned.
    pub fn extract(&self, path: &Path) -> Result<Vec<OutputRow>> {
        let mut reader = ShapefileReader::open(path)?;
        let mut rows = Vec::new();

        for feature in reader.features() {
            let feature = feature?;
            let geometry = feature.geometry.ok_or_else(|| ShapetabError::EmptyGeometry {
                reason: format!("feature {} of {} has a null shape", feature.index, path.display()),
            })?;

            let row = self.convert(&geometry).map_err(|e| {
                tracing::error!(
                    path = %path.display(),
                    feature = feature.index,
                    error = %e,
                    "Failed to convert feature"
                );
                e
            })?;
            rows.push(row);
        }

        tracing::debug!(path = %path.display(), features = rows.len(), "Extracted shapefile");

        Ok(rows)
    }

    /// Convert one geometry: centroid four ways plus its ring set
    pub fn convert(&self, geometry: &Geometry<f64>) -> Result<OutputRow> {
        let centroid = geometry.centroid().ok_or_else(|| ShapetabError::EmptyGeometry {
            reason: "geometry has no centroid".to_string(),
        })?;
        let coordinate = Coordinate::from(centroid);
        let projected = project(coordinate, self.transform)?;
        let rings = to_ring_set(geometry, self.tolerance)?;

        Ok(OutputRow {
            x: coordinate.lon,
            y: coordinate.lat,
            x_dms: format_dms(coordinate.lon),
            y_dms: format_dms(coordinate.lat),
            x_wm: projected.x,
            y_wm: projected.y,
            esri_json_polygons: rings.to_compact_json()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon};
    use shapefile::{Point, Polygon, PolygonRing, ShapeWriter};
    use shapetab_core::models::RingSet;
    use shapetab_geo::{parse_dms, DEFAULT_TOLERANCE, WEB_MERCATOR};
    use tempfile::TempDir;

    fn extractor() -> FeatureExtractor<'static> {
        FeatureExtractor::new(&WEB_MERCATOR, DEFAULT_TOLERANCE)
    }

    fn shp_square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::new(PolygonRing::Outer(vec![
            Point::new(x0, y0),
            Point::new(x0, y0 + size),
            Point::new(x0 + size, y0 + size),
            Point::new(x0 + size, y0),
            Point::new(x0, y0),
        ]))
    }

    #[test]
    fn test_convert_polygon_row_is_consistent() {
        let square = polygon![
            (x: 106.0, y: -7.0),
            (x: 106.0, y: -6.0),
            (x: 107.0, y: -6.0),
            (x: 107.0, y: -7.0),
            (x: 106.0, y: -7.0)
        ];
        let row = extractor().convert(&Geometry::Polygon(square)).unwrap();

        assert!((row.x - 106.5).abs() < 1e-9);
        assert!((row.y - -6.5).abs() < 1e-9);
        assert_eq!(row.x_dms, "106° 30' 0.00\"");
        assert_eq!(row.y_dms, "6° 30' 0.00\"");

        let expected = project(Coordinate::new(row.x, row.y), &WEB_MERCATOR).unwrap();
        assert_eq!((row.x_wm, row.y_wm), (expected.x, expected.y));

        let rings = RingSet::from_json(&row.esri_json_polygons).unwrap();
        assert_eq!(rings.len(), 1);
    }

    #[test]
    fn test_convert_multipolygon_has_ring_per_part() {
        let multi = MultiPolygon::new(vec![
            polygon![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)],
            polygon![(x: 2.0, y: 2.0), (x: 2.0, y: 3.0), (x: 3.0, y: 3.0), (x: 2.0, y: 2.0)],
        ]);
        let row = extractor().convert(&Geometry::MultiPolygon(multi)).unwrap();
        let rings = RingSet::from_json(&row.esri_json_polygons).unwrap();

        assert_eq!(rings.len(), 2);
    }

    #[test]
    fn test_convert_point_is_rejected() {
        let result = extractor().convert(&Geometry::Point(geo::Point::new(1.0, 1.0)));
        assert!(matches!(result, Err(ShapetabError::UnsupportedGeometry { .. })));
    }

    #[test]
    fn test_extract_preserves_file_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("parcels.shp");
        let shapes = vec![shp_square(10.0, 20.0, 1.0), shp_square(-30.0, -40.0, 2.0)];
        ShapeWriter::from_path(&path).unwrap().write_shapes(&shapes).unwrap();

        let rows = extractor().extract(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert!((rows[0].x - 10.5).abs() < 1e-9);
        assert!((rows[0].y - 20.5).abs() < 1e-9);
        assert!((rows[1].x - -29.0).abs() < 1e-9);
        assert!((rows[1].y - -39.0).abs() < 1e-9);

        for row in &rows {
            let x = parse_dms(&row.x_dms).unwrap();
            let y = parse_dms(&row.y_dms).unwrap();
            assert!((x - row.x.abs()).abs() <= 0.01 / 3600.0);
            assert!((y - row.y.abs()).abs() <= 0.01 / 3600.0);
        }
    }

    #[test]
    fn test_extract_empty_shapefile_yields_no_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.shp");
        let shapes: Vec<Polygon> = Vec::new();
        ShapeWriter::from_path(&path).unwrap().write_shapes(&shapes).unwrap();

        let rows = extractor().extract(&path).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_extract_garbage_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.shp");
        std::fs::write(&path, b"definitely not a shapefile").unwrap();

        let result = extractor().extract(&path);
        assert!(matches!(result, Err(ShapetabError::ShapefileRead { .. })));
    }
}
