use noise::{NoiseFn, Perlin};

use crate::{core::Point, element::Element, math::map};

/// Per-frame snapshot handed to element updates and displacement functions.
///
/// Carries everything a displacement needs from the controller: the
/// pre-advance frame, the cycle length, the distortion amplitude divisor,
/// and the element's stable index inside its controller's collection.
#[derive(Clone, Copy, Debug)]
pub struct FrameCtx {
    pub frame: u64,
    pub frames_per_cycle: u64,
    pub distort_factor: f64,
    pub element_index: usize,
}

impl FrameCtx {
    /// Frames elapsed divided by cycle length. Real-valued and unbounded;
    /// callers wanting a `[0, 1)` loop take the fractional part themselves.
    pub fn current_time(&self) -> f64 {
        self.frame as f64 / self.frames_per_cycle as f64
    }
}

/// Per-point displacement applied at render time.
///
/// Implementations must be pure with respect to their inputs: read the
/// element and context freely, return a new point, mutate nothing. The
/// canonical point set is never touched.
pub trait Displace {
    fn displace(&self, ctx: &FrameCtx, element: &Element, point: Point) -> Point;
}

impl<F> Displace for F
where
    F: Fn(&FrameCtx, &Element, Point) -> Point,
{
    fn displace(&self, ctx: &FrameCtx, element: &Element, point: Point) -> Point {
        self(ctx, element, point)
    }
}

/// Default displacement: a traveling sine wave along the x axis.
///
/// The wavelength is the element's section size (a third of its size) and
/// the wave advances one full section per cycle, so the motion loops every
/// `frames_per_cycle` frames. Only y is displaced.
#[derive(Clone, Copy, Debug, Default)]
pub struct SineWave;

impl Displace for SineWave {
    fn displace(&self, ctx: &FrameCtx, element: &Element, point: Point) -> Point {
        let amplitude = element.size() / ctx.distort_factor;
        let dy = map(element.progress(point).sin(), -1.0, 1.0, -amplitude, amplitude);
        Point::new(point.x, point.y + dy)
    }
}

/// Deterministic 2-argument coherent noise in `[0, 1]`.
pub trait Noise2 {
    fn noise2(&self, a: f64, b: f64) -> f64;
}

/// [`Noise2`] adapter over Perlin noise, rescaled from `[-1, 1]` to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct PerlinNoise2 {
    noise: Perlin,
}

impl PerlinNoise2 {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }
}

impl Default for PerlinNoise2 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Noise2 for PerlinNoise2 {
    fn noise2(&self, a: f64, b: f64) -> f64 {
        (self.noise.get([a, b]) + 1.0) * 0.5
    }
}

/// Coherent-noise displacement of both axes.
///
/// Each axis samples the noise field at the point's signed distance from
/// the element center, scaled by `noise_scale`, against a phase that mixes
/// the current frame with the element's collection index. Elements sharing
/// one controller therefore sample disjoint regions of the field and do not
/// jitter in lockstep.
#[derive(Clone, Debug)]
pub struct NoiseField<N = PerlinNoise2> {
    noise: N,
    noise_scale: f64,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self::with_noise(PerlinNoise2::new(seed))
    }
}

impl<N: Noise2> NoiseField<N> {
    /// Build over any [`Noise2`] source, with the default scale of 0.01.
    pub fn with_noise(noise: N) -> Self {
        Self {
            noise,
            noise_scale: 0.01,
        }
    }

    pub fn noise_scale(mut self, noise_scale: f64) -> Self {
        self.noise_scale = noise_scale;
        self
    }
}

impl<N: Noise2> Displace for NoiseField<N> {
    fn displace(&self, ctx: &FrameCtx, element: &Element, point: Point) -> Point {
        let scale = self.noise_scale;
        let dx = point.x - element.position().x;
        let dy = point.y - element.position().y;
        let phase =
            ctx.frame as f64 * scale + ctx.element_index as f64 * ctx.frames_per_cycle as f64;
        let amp = ctx.distort_factor;

        // Out-of-contract noise sources are clamped so displacement stays
        // within +-distort_factor on each axis.
        let nx = self.noise.noise2(dx * scale, phase).clamp(0.0, 1.0);
        let ny = self.noise.noise2(dy * scale, phase).clamp(0.0, 1.0);
        Point::new(
            point.x + map(nx, 0.0, 1.0, -amp, amp),
            point.y + map(ny, 0.0, 1.0, -amp, amp),
        )
    }
}
