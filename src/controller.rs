use crate::{
    core::Point,
    displace::FrameCtx,
    element::{Element, ElementId},
    error::{DistortError, DistortResult},
    shape::Shape,
    sink::PathSink,
};

/// Distortion-adjusted size: shrinks a dimension by twice the distort
/// factor so the displaced outline stays inside the nominal bounds.
pub(crate) fn scale_value(value: f64, distort_factor: f64) -> f64 {
    value - 2.0 * distort_factor
}

/// Owns the animation clock and the ordered collection of elements it
/// drives.
///
/// One external tick is one [`Controller::update`] followed by one
/// [`Controller::render`]. Everything is synchronous and single-threaded;
/// the cascade runs to completion before the next tick begins.
#[derive(Debug)]
pub struct Controller {
    distort_factor: f64,
    frames_per_cycle: u64,
    /// Monotonic frame counter. Never wrapped by the core; callers wanting
    /// a reset use [`Controller::set_frame`].
    current_frame: u64,
    elements: Vec<Element>,
}

impl Controller {
    /// Create a controller with the given displacement amplitude divisor
    /// and cycle length. Both must be positive.
    pub fn new(distort_factor: f64, frames_per_cycle: u64) -> DistortResult<Self> {
        if distort_factor <= 0.0 || distort_factor.is_nan() {
            return Err(DistortError::configuration(
                "distort factor must be greater than 0",
            ));
        }
        if frames_per_cycle == 0 {
            return Err(DistortError::configuration(
                "frames per cycle must be greater than 0",
            ));
        }
        Ok(Self {
            distort_factor,
            frames_per_cycle,
            current_frame: 0,
            elements: Vec::new(),
        })
    }

    pub fn distort_factor(&self) -> f64 {
        self.distort_factor
    }

    pub fn frames_per_cycle(&self) -> u64 {
        self.frames_per_cycle
    }

    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    /// Reset or reposition the clock. The core itself never wraps it.
    pub fn set_frame(&mut self, frame: u64) {
        self.current_frame = frame;
    }

    /// Location in the frame cycle: frames elapsed over cycle length.
    /// Real-valued and unbounded.
    pub fn current_time(&self) -> f64 {
        self.current_frame as f64 / self.frames_per_cycle as f64
    }

    /// Scale a size to account for the distort factor.
    pub fn scale_value(&self, value: f64) -> f64 {
        scale_value(value, self.distort_factor)
    }

    /// Sample `shape`, build an element anchored at `position`, and append
    /// it to the collection. Registration happens here, in the same step as
    /// construction.
    pub fn spawn(&mut self, shape: &Shape, position: Point) -> ElementId {
        self.adopt(Element::new(shape, position, self.distort_factor))
    }

    /// Append an already-built element (one previously removed from another
    /// controller). Its identity is preserved.
    pub fn adopt(&mut self, element: Element) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        id
    }

    /// Remove an element by identity. `None` when it is not in this
    /// collection, so removal is safe to call defensively.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.element_index(id)?;
        Some(self.elements.remove(index))
    }

    /// Move an element into `other`, preserving its identity. Combined with
    /// ownership of the collections this keeps every element in at most one
    /// controller at a time.
    pub fn transfer_to(&mut self, id: ElementId, other: &mut Controller) -> Option<ElementId> {
        let element = self.remove(id)?;
        Some(other.adopt(element))
    }

    /// Position of an element in the collection, by identity. Insertion
    /// order; the index feeds noise-phase decorrelation.
    pub fn element_index(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.element_index(id).map(|i| &self.elements[i])
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let index = self.element_index(id)?;
        Some(&mut self.elements[index])
    }

    /// All elements, in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Update every element in insertion order, then advance the clock.
    ///
    /// Elements read the pre-advance frame during their own update; the
    /// sine offset formula depends on this ordering.
    #[tracing::instrument(skip(self), fields(frame = self.current_frame, elements = self.elements.len()))]
    pub fn update(&mut self) {
        let frame = self.current_frame;
        let frames_per_cycle = self.frames_per_cycle;
        let distort_factor = self.distort_factor;
        for (index, element) in self.elements.iter_mut().enumerate() {
            element.update(&FrameCtx {
                frame,
                frames_per_cycle,
                distort_factor,
                element_index: index,
            });
        }
        self.current_frame += 1;
    }

    /// Render every element in insertion order. Does not advance the clock.
    #[tracing::instrument(skip(self, sink), fields(frame = self.current_frame))]
    pub fn render(&self, sink: &mut dyn PathSink) {
        for (index, element) in self.elements.iter().enumerate() {
            element.render(&self.frame_ctx(index), sink);
        }
    }

    pub(crate) fn frame_ctx(&self, element_index: usize) -> FrameCtx {
        FrameCtx {
            frame: self.current_frame,
            frames_per_cycle: self.frames_per_cycle,
            distort_factor: self.distort_factor,
            element_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn controller() -> Controller {
        Controller::new(10.0, 30).unwrap()
    }

    fn circle() -> Shape {
        Shape::circle(220.0, 8).unwrap()
    }

    #[test]
    fn construction_rejects_non_positive_config() {
        assert!(Controller::new(0.0, 30).is_err());
        assert!(Controller::new(-1.0, 30).is_err());
        assert!(Controller::new(10.0, 0).is_err());
    }

    #[test]
    fn scale_value_applies_the_constant_margin() {
        let c = controller();
        assert!((c.scale_value(220.0) - 200.0).abs() < EPS);
    }

    #[test]
    fn update_increments_the_frame_by_exactly_one() {
        let mut c = controller();
        c.spawn(&circle(), Point::ORIGIN);
        assert_eq!(c.current_frame(), 0);
        c.update();
        assert_eq!(c.current_frame(), 1);
        c.update();
        assert_eq!(c.current_frame(), 2);
    }

    #[test]
    fn elements_observe_the_pre_advance_frame() {
        let mut c = controller();
        let id = c.spawn(&circle(), Point::ORIGIN);

        // First update runs against frame 0, so the offset stays 0 even
        // though the clock has advanced by the time we look.
        c.update();
        assert_eq!(c.current_frame(), 1);
        assert!((c.element(id).unwrap().offset() - 0.0).abs() < EPS);

        // Second update runs against frame 1.
        c.update();
        let section = c.element(id).unwrap().section_size();
        assert!((c.element(id).unwrap().offset() - section / 30.0).abs() < EPS);
    }

    #[test]
    fn update_touches_every_element() {
        let mut c = controller();
        let ids: Vec<_> = (0..3).map(|_| c.spawn(&circle(), Point::ORIGIN)).collect();
        c.update();
        c.update();
        for id in ids {
            assert!(c.element(id).unwrap().offset() > 0.0);
        }
    }

    #[test]
    fn collection_preserves_insertion_order() {
        let mut c = controller();
        let a = c.spawn(&circle(), Point::ORIGIN);
        let b = c.spawn(&circle(), Point::ORIGIN);
        let d = c.spawn(&circle(), Point::ORIGIN);
        assert_eq!(c.element_index(a), Some(0));
        assert_eq!(c.element_index(b), Some(1));
        assert_eq!(c.element_index(d), Some(2));

        c.remove(b).unwrap();
        assert_eq!(c.element_index(a), Some(0));
        assert_eq!(c.element_index(d), Some(1));
    }

    #[test]
    fn transfer_keeps_an_element_in_exactly_one_controller() {
        let mut a = controller();
        let mut b = controller();
        let id = a.spawn(&circle(), Point::ORIGIN);

        let moved = a.transfer_to(id, &mut b).unwrap();
        assert_eq!(moved, id);
        assert_eq!(a.len(), 0);
        assert_eq!(b.len(), 1);
        assert_eq!(a.element_index(id), None);
        assert_eq!(b.element_index(id), Some(0));

        // Transferring back lands it in `a` again, never both.
        b.transfer_to(id, &mut a).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 0);
    }

    #[test]
    fn remove_is_noop_safe_for_absent_elements() {
        let mut a = controller();
        let mut b = controller();
        let id = b.spawn(&circle(), Point::ORIGIN);
        assert!(a.remove(id).is_none());
        assert!(a.transfer_to(id, &mut b).is_none());
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn set_frame_repositions_the_clock() {
        let mut c = controller();
        c.set_frame(90);
        assert!((c.current_time() - 3.0).abs() < EPS);
        c.update();
        assert_eq!(c.current_frame(), 91);
    }

    #[test]
    fn reposition_through_the_controller_does_not_resample() {
        let mut c = controller();
        let id = c.spawn(&circle(), Point::new(100.0, 100.0));
        let count = c.element(id).unwrap().point_groups()[0].len();
        c.element_mut(id)
            .unwrap()
            .set_position(Point::new(300.0, 50.0));
        let element = c.element(id).unwrap();
        assert_eq!(element.point_groups()[0].len(), count);
        assert!((element.position().x - 300.0).abs() < EPS);
    }
}
