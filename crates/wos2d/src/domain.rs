//! Domain representations and boundary-distance queries.

use crate::math::Vec2;

/// A **planar domain Ω** exposes the one query WoS needs: the distance from a
/// point to the boundary `∂Ω`, which bounds the largest empty circle centred
/// there.
///
/// ### Contract
/// The magnitude of [`boundary_distance`](Domain::boundary_distance) must
/// never overestimate the true distance to `∂Ω`. The walker uses it as the
/// radius of a circle assumed to lie entirely inside the domain; an
/// overestimate would let walks escape and silently corrupt every sample
/// drawn downstream. An underestimate merely slows convergence.
///
/// Implementations may return a *signed* distance (negative inside, positive
/// outside, SDF convention); the walker takes the absolute value.
///
/// Implementations:
/// - [`UnitSquare`]
/// - [`SdfDomain`] (arbitrary signed distance functions)
pub trait Domain: Send + Sync {
    /// Distance from `x` to `∂Ω`, possibly signed.
    fn boundary_distance(&self, x: Vec2) -> f32;

    /// Is a point considered **inside** the domain Ω?
    ///
    /// Used for starting points. For SDFs this is `φ(x) < 0`.
    fn is_inside(&self, x: Vec2) -> bool;
}

/// The axis-aligned unit square `(0,1) × (0,1)`.
///
/// Distance is the minimum of the four perpendicular distances to the edge
/// lines `x = 0`, `x = 1`, `y = 0`, `y = 1`. It is not clipped to the square's
/// extent, so it is a valid (exact inside, conservative outside) bound for any
/// query point.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnitSquare;

impl Domain for UnitSquare {
    #[inline]
    fn boundary_distance(&self, x: Vec2) -> f32 {
        let dx = x.x.abs().min((x.x - 1.0).abs());
        let dy = x.y.abs().min((x.y - 1.0).abs());
        dx.min(dy)
    }

    #[inline]
    fn is_inside(&self, x: Vec2) -> bool {
        x.x > 0.0 && x.x < 1.0 && x.y > 0.0 && x.y < 1.0
    }
}

/// Wrap any signed distance function `φ: ℝ²→ℝ`. Inside is `φ(x) < 0`.
///
/// `φ` must be 1-Lipschitz (or at least never overestimate the distance in
/// magnitude) for the WoS invariant to hold.
pub struct SdfDomain<F>
where
    F: Fn(Vec2) -> f32 + Send + Sync,
{
    phi: F,
}

impl<F> SdfDomain<F>
where
    F: Fn(Vec2) -> f32 + Send + Sync,
{
    pub fn new(phi: F) -> Self {
        Self { phi }
    }
}

impl<F> Domain for SdfDomain<F>
where
    F: Fn(Vec2) -> f32 + Send + Sync,
{
    #[inline]
    fn boundary_distance(&self, x: Vec2) -> f32 {
        (self.phi)(x)
    }

    #[inline]
    fn is_inside(&self, x: Vec2) -> bool {
        (self.phi)(x) < 0.0
    }
}

/// Boolean combinators for SDFs (CSG-style)
///
/// Standard Lipschitz-respecting compositions:
///
/// - **Union**: `min(φ₁, φ₂)`
/// - **Intersection**: `max(φ₁, φ₂)`
/// - **Difference**: `max(φ₁, −φ₂)`
pub mod sdf_csg {
    use super::Vec2;

    /// Union φ = min(φ1, φ2)
    pub fn union<F1, F2>(phi1: F1, phi2: F2) -> impl Fn(Vec2) -> f32 + Send + Sync
    where
        F1: Fn(Vec2) -> f32 + Send + Sync,
        F2: Fn(Vec2) -> f32 + Send + Sync,
    {
        move |x| (phi1)(x).min((phi2)(x))
    }

    /// Intersection φ = max(φ1, φ2)
    pub fn intersection<F1, F2>(phi1: F1, phi2: F2) -> impl Fn(Vec2) -> f32 + Send + Sync
    where
        F1: Fn(Vec2) -> f32 + Send + Sync,
        F2: Fn(Vec2) -> f32 + Send + Sync,
    {
        move |x| (phi1)(x).max((phi2)(x))
    }

    /// Difference φ = max(φ1, -φ2)
    pub fn difference<F1, F2>(phi1: F1, phi2: F2) -> impl Fn(Vec2) -> f32 + Send + Sync
    where
        F1: Fn(Vec2) -> f32 + Send + Sync,
        F2: Fn(Vec2) -> f32 + Send + Sync,
    {
        move |x| (phi1)(x).max(-(phi2)(x))
    }
}
