use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    core::{ContourEnd, DrawStyle, Point, PointGroup},
    displace::{Displace, FrameCtx, SineWave},
    math::map,
    shape::Shape,
    sink::PathSink,
};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of an element, stable across controller transfers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

impl ElementId {
    fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One animated, displaced shape owned by a [`Controller`].
///
/// An element holds the canonical point groups produced by sampling its
/// shape spec. The groups never change after construction except when the
/// element is repositioned; displacement is applied per point at render
/// time only.
///
/// [`Controller`]: crate::controller::Controller
pub struct Element {
    id: ElementId,
    position: Point,
    size: f64,
    point_groups: Vec<PointGroup>,
    end: ContourEnd,
    /// Sine-policy travel, recomputed once per frame by [`Element::update`].
    offset: f64,
    style: DrawStyle,
    displace: Box<dyn Displace>,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("point_groups", &self.point_groups.len())
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

impl Element {
    /// Sample `shape` and anchor the resulting points at `position`.
    ///
    /// Elements are created through [`Controller::spawn`], which registers
    /// them into the controller's collection in the same step.
    ///
    /// [`Controller::spawn`]: crate::controller::Controller::spawn
    pub(crate) fn new(shape: &Shape, position: Point, distort_factor: f64) -> Self {
        let point_groups = shape
            .sample(distort_factor)
            .iter()
            .map(|g| g.translate(position.to_vec2()))
            .collect();
        Self {
            id: ElementId::next(),
            position,
            size: shape.nominal_size(),
            point_groups,
            end: shape.end(),
            offset: 0.0,
            style: shape.default_style(),
            displace: Box::new(SineWave),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// The canonical, undisplaced contours.
    pub fn point_groups(&self) -> &[PointGroup] {
        &self.point_groups
    }

    /// Wavelength of the default sine displacement.
    pub fn section_size(&self) -> f64 {
        self.size / 3.0
    }

    pub(crate) fn offset(&self) -> f64 {
        self.offset
    }

    /// Phase angle of the default sine wave at `point`, in `[0, 2pi)`.
    ///
    /// Exposed so custom displacement functions can reuse the traveling-wave
    /// phase instead of deriving their own.
    pub fn progress(&self, point: Point) -> f64 {
        let section = self.section_size();
        map(
            (point.x + self.offset).rem_euclid(section),
            0.0,
            section,
            0.0,
            std::f64::consts::TAU,
        )
    }

    /// Install a displacement function, replacing the default sine wave.
    pub fn set_displace(&mut self, displace: impl Displace + 'static) {
        self.displace = Box::new(displace);
    }

    /// Override the fill/stroke state pushed before this element's path.
    pub fn set_draw_style(&mut self, style: DrawStyle) {
        self.style = style;
    }

    pub fn draw_style(&self) -> DrawStyle {
        self.style
    }

    /// Recompute per-frame derived state. Called once per frame, in
    /// collection order, by the owning controller, before the clock
    /// advances.
    pub fn update(&mut self, ctx: &FrameCtx) {
        self.offset = map(
            ctx.frame as f64,
            0.0,
            ctx.frames_per_cycle as f64,
            0.0,
            self.section_size(),
        );
    }

    /// Emit every canonical point through the displacement function into
    /// `sink`. Contours after the first are sub-contours (holes); the outer
    /// path closes unless the shape is an open contour.
    pub fn render(&self, ctx: &FrameCtx, sink: &mut dyn PathSink) {
        sink.set_style(&self.style);
        sink.begin_path();
        for (i, group) in self.point_groups.iter().enumerate() {
            if i != 0 {
                sink.begin_contour();
            }
            for &point in group.points() {
                sink.vertex(self.displace.displace(ctx, self, point));
            }
            if i != 0 {
                sink.end_contour();
            }
        }
        sink.end_path(self.end);
    }

    /// Move the element, translating every stored point by the position
    /// delta. O(total points); repeated calls with the same target are
    /// idempotent.
    pub fn set_position(&mut self, position: Point) {
        let delta = position - self.position;
        self.point_groups = self
            .point_groups
            .iter()
            .map(|g| g.translate(delta))
            .collect();
        self.position = position;
    }
}
