//! Random sampling utilities for circles.

use core::f32::consts::PI;
use libm::{cosf, sinf};

use crate::math::Vec2;
use crate::rng::Rng;

/// Uniform sampling on the unit circle S¹.
///
/// One uniform draw fixes the angle `t = 2π·u`; the result `(cos t, sin t)`
/// has unit norm up to floating error and uniformly distributed angle.
#[inline]
pub fn sample_unit_circle(rng: &mut Rng) -> Vec2 {
    let t = 2.0 * PI * rng.uniform_f32();
    Vec2::new(cosf(t), sinf(t))
}

/// Walk-on-Spheres step: jump to a uniformly random point on the circle `S(x, radius)`.
///
/// This is the mean-value step: for a harmonic `u` and a circle inscribed in
/// the domain, `E[u(x + radius·dir)] = u(x)`.
#[inline]
pub fn wos_jump(x: Vec2, radius: f32, rng: &mut Rng) -> Vec2 {
    x + sample_unit_circle(rng) * radius
}
