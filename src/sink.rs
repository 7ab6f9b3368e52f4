//! Seams to the external rendering collaborators.
//!
//! The core never draws. It emits displaced vertices into a [`PathSink`]
//! and consumes glyph outlines from a [`GlyphOutliner`]; what happens on
//! the other side of either trait is the host's business.

use crate::core::{BezPath, ContourEnd, DrawStyle, Point};

/// Receiver for an element's displaced outline, one path per render call.
///
/// Call order per element: `set_style`, `begin_path`, vertices of the outer
/// contour, then for each hole `begin_contour` / vertices / `end_contour`,
/// and finally `end_path`.
pub trait PathSink {
    /// Fill/stroke state for the path that follows.
    fn set_style(&mut self, style: &DrawStyle);
    fn begin_path(&mut self);
    /// Start a sub-contour (a hole, as in the counters of an "o").
    fn begin_contour(&mut self);
    fn end_contour(&mut self);
    fn vertex(&mut self, point: Point);
    /// Finish the path, closing the outer contour unless `end` is open.
    fn end_path(&mut self, end: ContourEnd);
}

/// A finished path together with the style it was emitted under.
#[derive(Clone, Debug)]
pub struct StyledPath {
    pub style: DrawStyle,
    pub path: BezPath,
}

/// Provided [`PathSink`] that accumulates styled [`BezPath`]s, for hosts
/// that want drawable geometry without writing a sink of their own.
#[derive(Debug, Default)]
pub struct BezPathSink {
    paths: Vec<StyledPath>,
    style: DrawStyle,
    path: BezPath,
    needs_move: bool,
    open_subpath: bool,
}

impl BezPathSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths finished so far, in emission order.
    pub fn paths(&self) -> &[StyledPath] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<StyledPath> {
        self.paths
    }

    /// Drop accumulated paths, keeping the sink reusable across frames.
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    fn close_subpath(&mut self) {
        if self.open_subpath {
            self.path.close_path();
            self.open_subpath = false;
        }
    }
}

impl PathSink for BezPathSink {
    fn set_style(&mut self, style: &DrawStyle) {
        self.style = *style;
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.needs_move = true;
        self.open_subpath = false;
    }

    fn begin_contour(&mut self) {
        self.close_subpath();
        self.needs_move = true;
    }

    fn end_contour(&mut self) {
        self.close_subpath();
    }

    fn vertex(&mut self, point: Point) {
        if self.needs_move {
            self.path.move_to(point);
            self.needs_move = false;
        } else {
            self.path.line_to(point);
        }
        self.open_subpath = true;
    }

    fn end_path(&mut self, end: ContourEnd) {
        if end == ContourEnd::Closed {
            self.close_subpath();
        }
        self.paths.push(StyledPath {
            style: self.style,
            path: std::mem::take(&mut self.path),
        });
        self.open_subpath = false;
    }
}

/// Options forwarded to the external text-to-points collaborator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphSampling {
    /// Outline sampling density multiplier.
    pub sample_factor: f64,
    /// Outline simplification tolerance; 0 keeps every sampled point.
    pub simplify_threshold: f64,
}

impl Default for GlyphSampling {
    fn default() -> Self {
        Self {
            sample_factor: 1.0,
            simplify_threshold: 0.0,
        }
    }
}

/// External text-to-points collaborator. The core only consumes the output
/// point sequence, re-segmenting it into contours by distance threshold
/// (see [`Shape::glyph`]).
///
/// Points are expected relative to the element center; outliners producing
/// absolute coordinates should subtract the anchor before returning.
///
/// [`Shape::glyph`]: crate::shape::Shape::glyph
pub trait GlyphOutliner {
    fn glyph_outline(
        &self,
        text: &str,
        origin: Point,
        size: f64,
        options: &GlyphSampling,
    ) -> Vec<Point>;
}
