use crate::{
    controller::scale_value,
    core::{ContourEnd, DrawStyle, Point, PointGroup},
    error::{DistortError, DistortResult},
    math::{lerp, map},
};

/// Default gap (in canvas units) between consecutive glyph points beyond
/// which a new contour starts. Separates disjoint strokes such as the dot
/// of an "i".
pub const GLYPH_DISTANCE_THRESHOLD: f64 = 3.0;

/// Boundary description of an animated shape.
///
/// A `Shape` is a pure spec: [`Shape::sample`] turns it into point groups
/// arranged along the boundary, centered on the origin. The owning element
/// adds its position afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    Circle {
        size: f64,
        detail: u32,
    },
    Ellipse {
        width: f64,
        height: f64,
        detail: u32,
    },
    Polygon {
        corners: Vec<Point>, // ordered, relative to center
        detail: u32,
    },
    Rect {
        width: f64,
        height: f64,
        detail: u32,
    },
    Line {
        a: Point,
        b: Point,
        detail: u32,
    },
    Glyph {
        /// Raw outline points from an external outliner, relative to the
        /// element center.
        points: Vec<Point>,
        size: f64,
        /// Gap beyond which consecutive points start a new contour.
        distance_threshold: f64,
    },
}

impl Shape {
    /// A circle of diameter `size` sampled at `detail` points.
    pub fn circle(size: f64, detail: u32) -> DistortResult<Self> {
        if detail < 1 {
            return Err(DistortError::configuration(
                "Circle requires a detail of at least 1",
            ));
        }
        Ok(Self::Circle { size, detail })
    }

    /// An axis-aligned ellipse sampled at `detail` points.
    pub fn ellipse(width: f64, height: f64, detail: u32) -> DistortResult<Self> {
        if detail < 1 {
            return Err(DistortError::configuration(
                "Ellipse requires a detail of at least 1",
            ));
        }
        Ok(Self::Ellipse {
            width,
            height,
            detail,
        })
    }

    /// A closed polygon over `corners`, sampled at up to `detail` points
    /// distributed proportionally to edge length.
    pub fn polygon(corners: Vec<Point>, detail: u32) -> DistortResult<Self> {
        if corners.len() < 3 {
            return Err(DistortError::configuration(
                "Polygon requires at least 3 corners",
            ));
        }
        if (detail as usize) < corners.len() {
            return Err(DistortError::configuration(format!(
                "Polygon with {} corners requires a detail of at least {}, got {detail}",
                corners.len(),
                corners.len(),
            )));
        }
        Ok(Self::Polygon { corners, detail })
    }

    pub fn triangle(p0: Point, p1: Point, p2: Point, detail: u32) -> DistortResult<Self> {
        if detail < 6 {
            return Err(DistortError::configuration(format!(
                "Triangle requires a detail of at least 6, got {detail}"
            )));
        }
        Self::polygon(vec![p0, p1, p2], detail)
    }

    pub fn quad(p0: Point, p1: Point, p2: Point, p3: Point, detail: u32) -> DistortResult<Self> {
        if detail < 8 {
            return Err(DistortError::configuration(format!(
                "Quad requires a detail of at least 8, got {detail}"
            )));
        }
        Self::polygon(vec![p0, p1, p2, p3], detail)
    }

    /// An axis-aligned rectangle centered on the origin. Width and height
    /// are distortion-scaled at sampling time, like circle and ellipse
    /// dimensions.
    pub fn rect(width: f64, height: f64, detail: u32) -> DistortResult<Self> {
        if detail < 8 {
            return Err(DistortError::configuration(format!(
                "Rect requires a detail of at least 8, got {detail}"
            )));
        }
        Ok(Self::Rect {
            width,
            height,
            detail,
        })
    }

    /// An open line segment from `a` to `b`.
    pub fn line(a: Point, b: Point, detail: u32) -> DistortResult<Self> {
        if detail < 2 {
            return Err(DistortError::configuration(format!(
                "Line requires a detail of at least 2, got {detail}"
            )));
        }
        Ok(Self::Line { a, b, detail })
    }

    /// A glyph outline from externally supplied points, re-segmented into
    /// contours with the default distance threshold.
    pub fn glyph(points: Vec<Point>, size: f64) -> Self {
        Self::glyph_with_threshold(points, size, GLYPH_DISTANCE_THRESHOLD)
    }

    pub fn glyph_with_threshold(points: Vec<Point>, size: f64, distance_threshold: f64) -> Self {
        Self::Glyph {
            points,
            size,
            distance_threshold,
        }
    }

    /// How this shape's outer contour terminates when rendered.
    pub fn end(&self) -> ContourEnd {
        match self {
            Self::Line { .. } => ContourEnd::Open,
            _ => ContourEnd::Closed,
        }
    }

    /// The draw style used when the element carries no override.
    pub fn default_style(&self) -> DrawStyle {
        match self {
            Self::Line { .. } => DrawStyle::stroked(),
            _ => DrawStyle::filled(),
        }
    }

    /// Length of edge `index` (corner `index` to the next corner, wrapping).
    ///
    /// Only polygonal shapes have sides; out-of-range indices are a
    /// configuration error.
    pub fn side(&self, index: usize) -> DistortResult<f64> {
        match self {
            Self::Polygon { corners, .. } => side_of(corners, index),
            Self::Line { a, b, .. } => side_of(&[*a, *b], index),
            _ => Err(DistortError::configuration(
                "side queries only apply to polygonal shapes",
            )),
        }
    }

    /// Sum of all edge lengths of a polygonal shape.
    pub fn perimeter(&self) -> DistortResult<f64> {
        match self {
            Self::Polygon { corners, .. } => Ok(perimeter_of(corners)),
            Self::Line { a, b, .. } => Ok(perimeter_of(&[*a, *b])),
            _ => Err(DistortError::configuration(
                "perimeter queries only apply to polygonal shapes",
            )),
        }
    }

    /// Sample the boundary into point groups centered on the origin.
    ///
    /// The realized point count is at most the requested detail: per-edge
    /// allocation truncates, and the remainder is dropped rather than
    /// redistributed.
    pub fn sample(&self, distort_factor: f64) -> Vec<PointGroup> {
        match self {
            Self::Circle { size, detail } => {
                let r = scale_value(*size, distort_factor) / 2.0;
                vec![sample_arc(r, r, *detail)]
            }
            Self::Ellipse {
                width,
                height,
                detail,
            } => {
                let rx = scale_value(*width, distort_factor) / 2.0;
                let ry = scale_value(*height, distort_factor) / 2.0;
                vec![sample_arc(rx, ry, *detail)]
            }
            Self::Polygon { corners, detail } => vec![sample_polygon(corners, *detail)],
            Self::Rect {
                width,
                height,
                detail,
            } => {
                let hw = scale_value(*width, distort_factor) / 2.0;
                let hh = scale_value(*height, distort_factor) / 2.0;
                let corners = [
                    Point::new(-hw, -hh),
                    Point::new(hw, -hh),
                    Point::new(hw, hh),
                    Point::new(-hw, hh),
                ];
                vec![sample_polygon(&corners, *detail)]
            }
            Self::Line { a, b, detail } => vec![sample_polygon(&[*a, *b], *detail)],
            Self::Glyph {
                points,
                distance_threshold,
                ..
            } => segment_glyph(points, *distance_threshold),
        }
    }

    /// Nominal size driving the sine displacement wavelength and amplitude.
    pub(crate) fn nominal_size(&self) -> f64 {
        match self {
            Self::Circle { size, .. } | Self::Glyph { size, .. } => *size,
            Self::Ellipse { width, height, .. } | Self::Rect { width, height, .. } => {
                width.max(*height)
            }
            Self::Polygon { corners, .. } => bounds_extent(corners),
            Self::Line { a, b, .. } => bounds_extent(&[*a, *b]),
        }
    }
}

fn side_of(corners: &[Point], index: usize) -> DistortResult<f64> {
    // `>=` also covers corner lists that bypassed the validated
    // constructors (the enum fields are public and serde does not
    // re-validate), including the empty one.
    if index >= corners.len() {
        return Err(DistortError::configuration(format!(
            "side index must be less than {}, got {index}",
            corners.len(),
        )));
    }
    Ok(edge_length(corners, index))
}

fn perimeter_of(corners: &[Point]) -> f64 {
    (0..corners.len()).map(|i| edge_length(corners, i)).sum()
}

fn edge_length(corners: &[Point], index: usize) -> f64 {
    let next = (index + 1) % corners.len();
    corners[index].distance(corners[next])
}

fn bounds_extent(points: &[Point]) -> f64 {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }
    (max.x - min.x).max(max.y - min.y)
}

fn sample_arc(rx: f64, ry: f64, detail: u32) -> PointGroup {
    (0..detail)
        .map(|i| {
            let angle = map(f64::from(i), 0.0, f64::from(detail), 0.0, std::f64::consts::TAU);
            Point::new(rx * angle.cos(), ry * angle.sin())
        })
        .collect()
}

/// Walk the corner cycle, giving each edge `floor(edge/perimeter * detail)`
/// interpolated points. The target corner of an edge is excluded; it is the
/// first point of the next edge.
fn sample_polygon(corners: &[Point], detail: u32) -> PointGroup {
    let n = corners.len();
    let perimeter = perimeter_of(corners);
    let mut points = Vec::with_capacity(detail as usize);
    for i in 0..n {
        let k = (i + 1) % n;
        let count = (edge_length(corners, i) / perimeter * f64::from(detail)).floor() as usize;
        for j in 0..count {
            let t = j as f64 / count as f64;
            points.push(Point::new(
                lerp(corners[i].x, corners[k].x, t),
                lerp(corners[i].y, corners[k].y, t),
            ));
        }
    }
    PointGroup::new(points)
}

/// Split raw glyph points into contours wherever the gap to the previous
/// point exceeds the threshold.
fn segment_glyph(points: &[Point], threshold: f64) -> Vec<PointGroup> {
    if points.is_empty() {
        return Vec::new();
    }
    let mut groups = Vec::new();
    let mut current = vec![points[0]];
    for pair in points.windows(2) {
        if pair[0].distance(pair[1]) > threshold {
            groups.push(PointGroup::new(std::mem::take(&mut current)));
        }
        current.push(pair[1]);
    }
    groups.push(PointGroup::new(current));
    groups
}
