//! Planar polygon primitives and a well-known-text (WKT) reader.
//!
//! Only the `POLYGON((x y, ...), (x y, ...))` form is understood. Coordinates
//! are projected Web Mercator meters; no reprojection happens here.

use crate::error::CoreError;

/// Minimum number of coordinate pairs in a closed linear ring.
const MIN_RING_POINTS: usize = 4;

const POLYGON_KEYWORD: &str = "POLYGON";

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// A polygon with one exterior ring and zero or more holes.
///
/// Rings are stored closed: the first and last points are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<Point>,
    pub interiors: Vec<Vec<Point>>,
}

impl Polygon {
    /// Bounding box of the exterior ring.
    pub fn bbox(&self) -> BoundingBox {
        ring_bbox(&self.exterior)
    }

    /// Unsigned area enclosed by the exterior ring.
    pub fn exterior_area(&self) -> f64 {
        ring_area(&self.exterior)
    }
}

/* --------------------------------------------------------------------------
Ring math
-------------------------------------------------------------------------- */

/// Bounding box of a non-empty ring.
pub fn ring_bbox(ring: &[Point]) -> BoundingBox {
    ring.iter().fold(
        BoundingBox {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        },
        |acc, p| BoundingBox {
            min_x: acc.min_x.min(p.x),
            min_y: acc.min_y.min(p.y),
            max_x: acc.max_x.max(p.x),
            max_y: acc.max_y.max(p.y),
        },
    )
}

/// Shoelace area of a ring. Works on open or closed rings.
pub fn ring_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        twice_area += a.x * b.y - b.x * a.y;
    }
    (twice_area / 2.0).abs()
}

/// One side of a clipping rectangle.
#[derive(Debug, Clone, Copy)]
enum ClipEdge {
    MinX(f64),
    MaxX(f64),
    MinY(f64),
    MaxY(f64),
}

impl ClipEdge {
    fn contains(self, p: Point) -> bool {
        match self {
            ClipEdge::MinX(v) => p.x >= v,
            ClipEdge::MaxX(v) => p.x <= v,
            ClipEdge::MinY(v) => p.y >= v,
            ClipEdge::MaxY(v) => p.y <= v,
        }
    }

    /// Crossing point of segment `a -> b` with this edge.
    ///
    /// Only called when exactly one endpoint is inside, so the segment is
    /// never parallel to the edge.
    fn intersect(self, a: Point, b: Point) -> Point {
        match self {
            ClipEdge::MinX(v) | ClipEdge::MaxX(v) => {
                let t = (v - a.x) / (b.x - a.x);
                Point::new(v, a.y + t * (b.y - a.y))
            }
            ClipEdge::MinY(v) | ClipEdge::MaxY(v) => {
                let t = (v - a.y) / (b.y - a.y);
                Point::new(a.x + t * (b.x - a.x), v)
            }
        }
    }
}

/// Clip a ring against a rectangle (Sutherland-Hodgman).
///
/// The subject ring may be concave; the result can then contain degenerate
/// zero-width spikes, which do not change its area.
pub fn clip_ring(ring: &[Point], rect: &BoundingBox) -> Vec<Point> {
    let edges = [
        ClipEdge::MinX(rect.min_x),
        ClipEdge::MaxX(rect.max_x),
        ClipEdge::MinY(rect.min_y),
        ClipEdge::MaxY(rect.max_y),
    ];

    let mut output = open_ring(ring).to_vec();
    for edge in edges {
        let input = std::mem::take(&mut output);
        let Some(&last) = input.last() else {
            break;
        };
        let mut prev = last;
        for &cur in &input {
            let cur_in = edge.contains(cur);
            if cur_in {
                if !edge.contains(prev) {
                    output.push(edge.intersect(prev, cur));
                }
                output.push(cur);
            } else if edge.contains(prev) {
                output.push(edge.intersect(prev, cur));
            }
            prev = cur;
        }
    }
    output
}

/// Drop the closing point of a closed ring.
fn open_ring(ring: &[Point]) -> &[Point] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/* --------------------------------------------------------------------------
WKT
-------------------------------------------------------------------------- */

fn parse_error(reason: impl Into<String>) -> CoreError {
    CoreError::GeometryParse(reason.into())
}

/// Parse a `POLYGON((...))` WKT string.
///
/// The keyword is case-insensitive and whitespace is free-form. Every ring
/// must be closed and hold at least four coordinate pairs.
pub fn parse_polygon(text: &str) -> Result<Polygon, CoreError> {
    let trimmed = text.trim();
    let keyword = trimmed
        .get(..POLYGON_KEYWORD.len())
        .filter(|k| k.eq_ignore_ascii_case(POLYGON_KEYWORD))
        .ok_or_else(|| parse_error("expected a POLYGON"))?;

    let body = trimmed[keyword.len()..].trim();
    let inner = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or_else(|| parse_error("polygon body must be wrapped in parentheses"))?;

    let mut rings = Vec::new();
    let mut rest = inner.trim();
    loop {
        let after_open = rest
            .strip_prefix('(')
            .ok_or_else(|| parse_error("expected '(' to open a ring"))?;
        let close = after_open
            .find(')')
            .ok_or_else(|| parse_error("unterminated ring"))?;
        rings.push(parse_ring(&after_open[..close])?);

        rest = after_open[close + 1..].trim_start();
        if rest.is_empty() {
            break;
        }
        rest = rest
            .strip_prefix(',')
            .ok_or_else(|| parse_error("expected ',' between rings"))?
            .trim_start();
    }

    let mut rings = rings.into_iter();
    let exterior = rings
        .next()
        .ok_or_else(|| parse_error("polygon has no rings"))?;

    Ok(Polygon {
        exterior,
        interiors: rings.collect(),
    })
}

fn parse_ring(text: &str) -> Result<Vec<Point>, CoreError> {
    let points = text
        .split(',')
        .map(parse_point)
        .collect::<Result<Vec<_>, _>>()?;

    if points.len() < MIN_RING_POINTS {
        return Err(parse_error(format!(
            "a ring needs at least {MIN_RING_POINTS} points, got {}",
            points.len()
        )));
    }
    if points.first() != points.last() {
        return Err(parse_error("ring is not closed"));
    }
    Ok(points)
}

fn parse_point(text: &str) -> Result<Point, CoreError> {
    let mut parts = text.split_whitespace();
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(parse_error(format!(
            "expected an 'x y' coordinate pair, got '{}'",
            text.trim()
        )));
    };
    Ok(Point::new(parse_ordinate(x)?, parse_ordinate(y)?))
}

fn parse_ordinate(text: &str) -> Result<f64, CoreError> {
    let value: f64 = text
        .parse()
        .map_err(|_| parse_error(format!("'{text}' is not a number")))?;
    if !value.is_finite() {
        return Err(parse_error(format!("'{text}' is not a finite number")));
    }
    Ok(value)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const SQUARE: &str = "POLYGON((0 0, 100 0, 100 100, 0 100, 0 0))";

    #[test]
    fn parses_simple_square() {
        let polygon = parse_polygon(SQUARE).unwrap();
        assert_eq!(polygon.exterior.len(), 5);
        assert!(polygon.interiors.is_empty());
        assert_eq!(
            polygon.bbox(),
            BoundingBox {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 100.0,
                max_y: 100.0
            }
        );
        assert_eq!(polygon.exterior_area(), 10_000.0);
    }

    #[test]
    fn keyword_is_case_insensitive_and_whitespace_is_free() {
        let polygon = parse_polygon("  polygon ( ( 0 0,1 0 , 1 1,0 1, 0 0 ) )  ").unwrap();
        assert_eq!(polygon.exterior.len(), 5);
    }

    #[test]
    fn parses_holes() {
        let polygon = parse_polygon(
            "POLYGON((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 4 2, 4 4, 2 4, 2 2))",
        )
        .unwrap();
        assert_eq!(polygon.interiors.len(), 1);
        assert_eq!(polygon.interiors[0][1], Point::new(4.0, 2.0));
    }

    #[test]
    fn accepts_negative_and_fractional_coordinates() {
        let polygon =
            parse_polygon("POLYGON((-1.5 -2, 3e2 -2, 3e2 4.25, -1.5 4.25, -1.5 -2))").unwrap();
        assert_eq!(polygon.bbox().max_x, 300.0);
        assert_eq!(polygon.bbox().min_y, -2.0);
    }

    #[test]
    fn rejects_garbage() {
        assert_matches!(
            parse_polygon("some geometry"),
            Err(CoreError::GeometryParse(_))
        );
        assert_matches!(parse_polygon(""), Err(CoreError::GeometryParse(_)));
        assert_matches!(
            parse_polygon("POINT(0 0)"),
            Err(CoreError::GeometryParse(_))
        );
    }

    #[test]
    fn rejects_unclosed_ring() {
        let result = parse_polygon("POLYGON((0 0, 1 0, 1 1, 0 1))");
        assert_matches!(result, Err(CoreError::GeometryParse(msg)) if msg.contains("not closed"));
    }

    #[test]
    fn rejects_short_ring() {
        let result = parse_polygon("POLYGON((0 0, 1 1, 0 0))");
        assert_matches!(result, Err(CoreError::GeometryParse(msg)) if msg.contains("at least 4"));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert_matches!(
            parse_polygon("POLYGON((0 0, a 0, 1 1, 0 0))"),
            Err(CoreError::GeometryParse(_))
        );
        assert_matches!(
            parse_polygon("POLYGON((0 0, inf 0, 1 1, 0 0))"),
            Err(CoreError::GeometryParse(_))
        );
        assert_matches!(
            parse_polygon("POLYGON((0 0 0, 1 0 0, 1 1 0, 0 0 0))"),
            Err(CoreError::GeometryParse(_))
        );
    }

    #[test]
    fn rejects_unbalanced_parentheses() {
        assert_matches!(
            parse_polygon("POLYGON((0 0, 1 0, 1 1, 0 0)"),
            Err(CoreError::GeometryParse(_))
        );
        assert_matches!(
            parse_polygon("POLYGON((0 0, 1 0, 1 1, 0 0) (0 0, 1 0, 1 1, 0 0))"),
            Err(CoreError::GeometryParse(_))
        );
    }

    #[test]
    fn clip_keeps_overlap_area() {
        let polygon = parse_polygon(SQUARE).unwrap();
        let rect = BoundingBox {
            min_x: 50.0,
            min_y: 50.0,
            max_x: 150.0,
            max_y: 150.0,
        };
        let clipped = clip_ring(&polygon.exterior, &rect);
        assert!((ring_area(&clipped) - 2_500.0).abs() < 1e-9);
    }

    #[test]
    fn clip_disjoint_is_empty_area() {
        let polygon = parse_polygon(SQUARE).unwrap();
        let rect = BoundingBox {
            min_x: 200.0,
            min_y: 200.0,
            max_x: 300.0,
            max_y: 300.0,
        };
        assert_eq!(ring_area(&clip_ring(&polygon.exterior, &rect)), 0.0);
    }

    #[test]
    fn clip_concave_ring() {
        // An L shape; the rectangle covers only the notch.
        let polygon =
            parse_polygon("POLYGON((0 0, 20 0, 20 10, 10 10, 10 20, 0 20, 0 0))").unwrap();
        let notch = BoundingBox {
            min_x: 11.0,
            min_y: 11.0,
            max_x: 19.0,
            max_y: 19.0,
        };
        assert_eq!(ring_area(&clip_ring(&polygon.exterior, &notch)), 0.0);
        assert_eq!(polygon.exterior_area(), 300.0);
    }
}
