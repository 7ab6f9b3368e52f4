pub use kurbo::{BezPath, Point, Vec2};

/// One open or closed contour, as an ordered point sequence.
///
/// Groups are immutable by convention: transforms return a new group rather
/// than mutating in place.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointGroup(Vec<Point>);

impl PointGroup {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a copy of this group with every point shifted by `delta`.
    pub fn translate(&self, delta: Vec2) -> Self {
        Self(self.0.iter().map(|p| *p + delta).collect())
    }
}

impl FromIterator<Point> for PointGroup {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// How the outermost contour of a shape terminates when rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ContourEnd {
    /// A closing segment joins the last emitted point back to the first.
    Closed,
    /// The path is left open, as for a line.
    Open,
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Stroke parameters for outlined rendering.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeStyle {
    pub color: Rgba8,
    /// Stroke width in canvas units.
    pub weight: f64,
}

/// Fill and stroke state pushed to the sink before an element's path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawStyle {
    pub fill: Option<Rgba8>,
    pub stroke: Option<StrokeStyle>,
}

impl DrawStyle {
    /// Solid black fill, no stroke. The default for closed shapes.
    pub fn filled() -> Self {
        Self {
            fill: Some(Rgba8::BLACK),
            stroke: None,
        }
    }

    /// Black 1-unit stroke, no fill. The default for open contours.
    pub fn stroked() -> Self {
        Self {
            fill: None,
            stroke: Some(StrokeStyle {
                color: Rgba8::BLACK,
                weight: 1.0,
            }),
        }
    }
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self::filled()
    }
}
