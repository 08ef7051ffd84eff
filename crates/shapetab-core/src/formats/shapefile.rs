//! Shapefile reader implementation
//!
//! Shapefiles consist of multiple component files (.shp, .shx, .dbf, .prj).
//! Only the .shp geometry stream is needed here; missing siblings are logged
//! and otherwise ignored. Attribute tables are not read.

use geo::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use shapefile::{PolygonRing, Shape, ShapeReader};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{Result, ShapetabError};
use crate::formats::{has_extension, SHAPEFILE_EXTENSION};

/// EPSG code of WGS 84, the only source CRS shapetab understands
pub const WGS84_EPSG: u32 = 4326;

/// One record of a shapefile, converted to a `geo` geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeFeature {
    /// Zero-based record position in the file
    pub index: usize,
    /// `None` for null shapes
    pub geometry: Option<Geometry<f64>>,
}

/// Streaming reader over the records of one `.shp` file
pub struct ShapefileReader {
    path: PathBuf,
    reader: ShapeReader<BufReader<File>>,
}

impl ShapefileReader {
    /// Open a shapefile for reading
    pub fn open(path: &Path) -> Result<Self> {
        if !has_extension(path, SHAPEFILE_EXTENSION) {
            return Err(ShapetabError::ShapefileRead {
                path: path.to_path_buf(),
                message: "Not a Shapefile (.shp)".to_string(),
            });
        }

        warn_on_missing_components(path);
        warn_on_foreign_crs(path);

        let reader = ShapeReader::from_path(path).map_err(|e| ShapetabError::ShapefileRead {
            path: path.to_path_buf(),
            message: format!("Failed to open Shapefile: {}", e),
        })?;

        Ok(Self { path: path.to_path_buf(), reader })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterate records in file order
    pub fn features(&mut self) -> impl Iterator<Item = Result<ShapeFeature>> + '_ {
        let path = &self.path;
        self.reader.iter_shapes().enumerate().map(move |(index, result)| {
            let shape = result.map_err(|e| ShapetabError::ShapefileRead {
                path: path.clone(),
                message: format!("Failed to read feature {}: {}", index, e),
            })?;
            Ok(ShapeFeature { index, geometry: shape_to_geometry(&shape)? })
        })
    }
}

/// Log which of the usual sibling files are absent
fn warn_on_missing_components(path: &Path) {
    let missing: Vec<String> = ["shx", "dbf"]
        .iter()
        .filter(|ext| !path.with_extension(ext).exists())
        .map(|ext| format!(".{}", ext))
        .collect();

    if !missing.is_empty() {
        tracing::warn!(
            path = %path.display(),
            missing = %missing.join(", "),
            "Shapefile is missing component files; reading geometry only"
        );
    }
}

/// Log when the .prj declares something other than WGS 84.
///
/// Coordinates are still read as decimal degrees.
fn warn_on_foreign_crs(path: &Path) {
    let prj_path = path.with_extension("prj");
    let Ok(content) = fs::read_to_string(&prj_path) else {
        return;
    };

    match declared_epsg(&content) {
        Some(WGS84_EPSG) => {}
        Some(code) => tracing::warn!(
            path = %path.display(),
            epsg = code,
            "Shapefile declares a non-WGS 84 CRS; coordinates are treated as WGS 84"
        ),
        None if content.trim_start().starts_with("PROJCS") => tracing::warn!(
            path = %path.display(),
            "Shapefile declares a projected CRS; coordinates are treated as WGS 84"
        ),
        None => {}
    }
}

/// Extract the EPSG code a .prj WKT declares, if any
pub fn declared_epsg(wkt: &str) -> Option<u32> {
    // A PROJCS wraps a GEOGCS, so the outermost AUTHORITY is the last one.
    if let Some(start) = wkt.rfind("AUTHORITY[\"EPSG\",\"") {
        let code_start = start + "AUTHORITY[\"EPSG\",\"".len();
        if let Some(end) = wkt[code_start..].find('"') {
            if let Ok(code) = wkt[code_start..code_start + end].parse::<u32>() {
                return Some(code);
            }
        }
    }

    if let Some(start) = wkt.find("EPSG:") {
        let code_str: String =
            wkt[start + 5..].chars().take_while(|c| c.is_ascii_digit()).collect();
        if let Ok(code) = code_str.parse::<u32>() {
            return Some(code);
        }
    }

    // ESRI-flavoured .prj files name the datum but carry no authority
    let trimmed = wkt.trim_start();
    if trimmed.starts_with("GEOGCS") && (wkt.contains("WGS_1984") || wkt.contains("WGS 84")) {
        return Some(WGS84_EPSG);
    }

    None
}

/// Planar access shared by the shapefile point flavours
trait PlanarPoint {
    fn coord(&self) -> Coord<f64>;
}

impl PlanarPoint for shapefile::Point {
    fn coord(&self) -> Coord<f64> {
        Coord { x: self.x, y: self.y }
    }
}

impl PlanarPoint for shapefile::PointM {
    fn coord(&self) -> Coord<f64> {
        Coord { x: self.x, y: self.y }
    }
}

impl PlanarPoint for shapefile::PointZ {
    fn coord(&self) -> Coord<f64> {
        Coord { x: self.x, y: self.y }
    }
}

fn line_string<P: PlanarPoint>(points: &[P]) -> LineString<f64> {
    LineString::new(points.iter().map(PlanarPoint::coord).collect())
}

fn parts_to_geometry<P: PlanarPoint>(parts: &[Vec<P>]) -> Geometry<f64> {
    let mut lines: Vec<LineString<f64>> = parts.iter().map(|part| line_string(part)).collect();
    if lines.len() == 1 {
        Geometry::LineString(lines.remove(0))
    } else {
        Geometry::MultiLineString(MultiLineString::new(lines))
    }
}

/// Group shapefile rings into polygons.
///
/// Each outer ring opens a new polygon and inner rings attach to the most
/// recent outer ring. An inner ring with no preceding outer ring is promoted
/// to an exterior.
fn rings_to_geometry<P: PlanarPoint>(rings: &[PolygonRing<P>]) -> Geometry<f64> {
    let mut grouped: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();

    for ring in rings {
        let line = line_string(ring.points());
        match ring {
            PolygonRing::Outer(_) => grouped.push((line, Vec::new())),
            PolygonRing::Inner(_) => match grouped.last_mut() {
                Some((_, holes)) => holes.push(line),
                None => grouped.push((line, Vec::new())),
            },
        }
    }

    let mut polygons: Vec<Polygon<f64>> = grouped
        .into_iter()
        .map(|(exterior, interiors)| Polygon::new(exterior, interiors))
        .collect();

    if polygons.len() == 1 {
        Geometry::Polygon(polygons.remove(0))
    } else {
        Geometry::MultiPolygon(MultiPolygon::new(polygons))
    }
}

fn points_to_geometry<P: PlanarPoint>(points: &[P]) -> Geometry<f64> {
    Geometry::MultiPoint(MultiPoint::new(
        points.iter().map(|p| Point::from(p.coord())).collect(),
    ))
}

/// Convert a shapefile Shape to a `geo` geometry, dropping Z and M
fn shape_to_geometry(shape: &Shape) -> Result<Option<Geometry<f64>>> {
    let geometry = match shape {
        Shape::NullShape => return Ok(None),
        Shape::Point(point) => Geometry::Point(Point::from(point.coord())),
        Shape::PointM(point) => Geometry::Point(Point::from(point.coord())),
        Shape::PointZ(point) => Geometry::Point(Point::from(point.coord())),
        Shape::Polyline(polyline) => parts_to_geometry(polyline.parts()),
        Shape::PolylineM(polyline) => parts_to_geometry(polyline.parts()),
        Shape::PolylineZ(polyline) => parts_to_geometry(polyline.parts()),
        Shape::Polygon(polygon) => rings_to_geometry(polygon.rings()),
        Shape::PolygonM(polygon) => rings_to_geometry(polygon.rings()),
        Shape::PolygonZ(polygon) => rings_to_geometry(polygon.rings()),
        Shape::Multipoint(multipoint) => points_to_geometry(multipoint.points()),
        Shape::MultipointM(multipoint) => points_to_geometry(multipoint.points()),
        Shape::MultipointZ(multipoint) => points_to_geometry(multipoint.points()),
        Shape::Multipatch(_) => {
            return Err(ShapetabError::UnsupportedGeometry { kind: "Multipatch".to_string() })
        }
    };
    Ok(Some(geometry))
}
