//! Distort animates 2D outline shapes with a hand-drawn jitter.
//!
//! A shape spec ([`Shape`]) is sampled once into ordered boundary points;
//! every frame, a [`Controller`] advances its cyclic clock and each
//! [`Element`] re-emits its canonical points through a pluggable
//! displacement function ([`SineWave`] by default, [`NoiseField`] built in)
//! into a [`PathSink`]. Canonical points are never mutated, so the output
//! is deterministic and reproducible for fixed inputs.
//!
//! ```
//! use distort::{BezPathSink, Controller, Point, Shape};
//!
//! let mut controller = Controller::new(32.0, 30)?;
//! let circle = controller.spawn(
//!     &Shape::circle(220.0, 128)?,
//!     Point::new(320.0, 240.0),
//! );
//!
//! let mut sink = BezPathSink::new();
//! for _ in 0..3 {
//!     controller.update();
//!     sink.clear();
//!     controller.render(&mut sink);
//! }
//! assert!(controller.element(circle).is_some());
//! # Ok::<(), distort::DistortError>(())
//! ```
#![forbid(unsafe_code)]

pub mod controller;
pub mod core;
pub mod displace;
pub mod element;
pub mod error;
pub(crate) mod math;
pub mod shape;
pub mod sink;

pub use crate::controller::Controller;
pub use crate::core::{
    BezPath, ContourEnd, DrawStyle, Point, PointGroup, Rgba8, StrokeStyle, Vec2,
};
pub use crate::displace::{Displace, FrameCtx, Noise2, NoiseField, PerlinNoise2, SineWave};
pub use crate::element::{Element, ElementId};
pub use crate::error::{DistortError, DistortResult};
pub use crate::shape::Shape;
pub use crate::sink::{BezPathSink, GlyphOutliner, GlyphSampling, PathSink, StyledPath};
