//! Parametric motion component.
//!
//! A [`CustomMotion`] moves an entity along caller-supplied functions of
//! simulation time, bypassing physics. The origin the functions are offset
//! from is captured the first time the custom motion system sees the entity.

use std::fmt;
use std::sync::Arc;

use sim_math::{Aabb, DVec2};

/// A displacement function of simulation time, `f(t) -> Δ`.
#[derive(Clone)]
pub struct MotionFn(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl MotionFn {
    pub fn new(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluate the displacement at time `t`.
    #[must_use]
    pub fn eval(&self, t: f64) -> f64 {
        (self.0)(t)
    }
}

impl fmt::Debug for MotionFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MotionFn(..)")
    }
}

/// Moves an entity along `origin + f(t)` per axis.
///
/// An axis without a function is left untouched. `origin` and `box_origin`
/// start empty and are set exactly once; the box origin is captured
/// separately so a box attached after the first update still follows.
#[derive(Debug, Clone, Default)]
pub struct CustomMotion {
    pub fx: Option<MotionFn>,
    pub fy: Option<MotionFn>,
    pub origin: Option<DVec2>,
    pub box_origin: Option<Aabb>,
}

impl CustomMotion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal displacement function.
    #[must_use]
    pub fn with_x(mut self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.fx = Some(MotionFn::new(f));
        self
    }

    /// Set the vertical displacement function.
    #[must_use]
    pub fn with_y(mut self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.fy = Some(MotionFn::new(f));
        self
    }
}
