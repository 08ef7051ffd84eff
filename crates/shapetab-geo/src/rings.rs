//! Polygon simplification and ring extraction
//!
//! Exterior rings are simplified with Ramer-Douglas-Peucker at the given
//! tolerance and emitted as a [`RingSet`]. A simplified ring that crosses
//! itself is retried at half the tolerance, and the original vertices are
//! kept once the retries run out. Parts of a MultiPolygon whose simplified
//! rings cross each other keep their original vertices as well.
//!
//! Interior rings are dropped, so consumers of the ring set lose holes; area
//! computed from it overstates polygons that had them.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{BoundingRect, Geometry, Intersects, Line, LineString, Polygon, Simplify};
use shapetab_core::error::{Result, ShapetabError};
use shapetab_core::models::{Ring, RingSet};

pub use shapetab_core::config::DEFAULT_TOLERANCE;

/// Smallest coordinate count of a closed ring
const MIN_RING_COORDS: usize = 4;

/// Tolerance halvings tried before a ring keeps its original vertices
const MAX_TOLERANCE_HALVINGS: u32 = 8;

/// Simplify a Polygon or MultiPolygon and collect one exterior ring per polygon.
///
/// Other geometry kinds fail with [`ShapetabError::UnsupportedGeometry`];
/// an empty exterior or an empty MultiPolygon fails with
/// [`ShapetabError::EmptyGeometry`].
pub fn to_ring_set(geometry: &Geometry<f64>, tolerance: f64) -> Result<RingSet> {
    let polygons: Vec<&Polygon<f64>> = match geometry {
        Geometry::Polygon(polygon) => vec![polygon],
        Geometry::MultiPolygon(multi) => multi.0.iter().collect(),
        other => {
            return Err(ShapetabError::UnsupportedGeometry {
                kind: geometry_kind(other).to_string(),
            })
        }
    };

    if polygons.is_empty() {
        return Err(ShapetabError::EmptyGeometry {
            reason: "MultiPolygon contains no polygons".to_string(),
        });
    }

    let exteriors = polygons
        .into_iter()
        .enumerate()
        .map(|(i, polygon)| {
            let exterior = polygon.exterior();
            if exterior.0.is_empty() {
                return Err(ShapetabError::EmptyGeometry {
                    reason: format!("Polygon {} has an empty exterior ring", i),
                });
            }
            Ok(exterior)
        })
        .collect::<Result<Vec<&LineString<f64>>>>()?;

    let mut simplified: Vec<LineString<f64>> = exteriors
        .iter()
        .enumerate()
        .map(|(i, exterior)| simplify_ring(exterior, tolerance, i))
        .collect();
    restore_crossing_parts(&exteriors, &mut simplified);

    Ok(RingSet::new(
        simplified
            .iter()
            .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect::<Ring>())
            .collect(),
    ))
}

/// Simplify one exterior ring without letting it collapse or cross itself.
fn simplify_ring(exterior: &LineString<f64>, tolerance: f64, index: usize) -> LineString<f64> {
    let mut epsilon = tolerance;
    for _ in 0..=MAX_TOLERANCE_HALVINGS {
        let candidate: LineString<f64> = exterior.simplify(&epsilon);
        if candidate.0.len() >= MIN_RING_COORDS && !self_intersects(&candidate) {
            if epsilon < tolerance {
                tracing::debug!(
                    polygon = index,
                    tolerance,
                    epsilon,
                    "Simplified ring crossed itself; used a smaller tolerance"
                );
            }
            return candidate;
        }
        epsilon /= 2.0;
    }

    tracing::debug!(
        polygon = index,
        vertices = exterior.0.len(),
        "Simplification collapsed or crossed ring; keeping original vertices"
    );
    exterior.clone()
}

/// Put back the original vertices of parts whose simplified rings cross
/// although the originals did not.
///
/// Each pass restores at least one more part, so the loop ends.
fn restore_crossing_parts(originals: &[&LineString<f64>], simplified: &mut [LineString<f64>]) {
    let mut restored = vec![false; simplified.len()];
    loop {
        let mut changed = false;
        for i in 0..simplified.len() {
            for j in (i + 1)..simplified.len() {
                if restored[i] && restored[j] {
                    continue;
                }
                if rings_cross(&simplified[i], &simplified[j])
                    && !rings_cross(originals[i], originals[j])
                {
                    tracing::debug!(
                        first = i,
                        second = j,
                        "Simplified parts cross; keeping original vertices"
                    );
                    for k in [i, j] {
                        simplified[k] = originals[k].clone();
                        restored[k] = true;
                    }
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// Ring segments with zero-length segments removed
fn segments(ring: &LineString<f64>) -> Vec<Line<f64>> {
    ring.lines().filter(|line| line.start != line.end).collect()
}

/// Whether two segments meet, with a bounding box check first
fn segments_meet(a: Line<f64>, b: Line<f64>) -> Option<LineIntersection<f64>> {
    if !a.bounding_rect().intersects(&b.bounding_rect()) {
        return None;
    }
    line_intersection(a, b)
}

/// Whether a closed ring touches or crosses itself anywhere other than at
/// the shared vertex of neighbouring segments.
fn self_intersects(ring: &LineString<f64>) -> bool {
    let lines = segments(ring);
    let count = lines.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let neighbours = j == i + 1 || (i == 0 && j == count - 1);
            match segments_meet(lines[i], lines[j]) {
                None => {}
                Some(LineIntersection::SinglePoint { .. }) if neighbours => {}
                Some(_) => return true,
            }
        }
    }
    false
}

/// Whether any segment of one ring meets any segment of the other
fn rings_cross(a: &LineString<f64>, b: &LineString<f64>) -> bool {
    match (a.bounding_rect(), b.bounding_rect()) {
        (Some(a_bounds), Some(b_bounds)) if a_bounds.intersects(&b_bounds) => {}
        _ => return false,
    }
    let b_lines = segments(b);
    segments(a)
        .into_iter()
        .any(|line| b_lines.iter().any(|other| segments_meet(line, *other).is_some()))
}

/// Human-readable name of a geometry variant
pub fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
