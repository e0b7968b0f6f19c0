//! Boundary condition abstractions.

use crate::math::Vec2;

/// Encodes Dirichlet data `g(p)` sampled on `∂Ω`.
pub trait BoundaryDirichlet: Send + Sync {
    /// Evaluate boundary value at a point `p` on (or within tolerance of) `∂Ω`.
    ///
    /// Under truncation the walk may stop at an interior point up to ε from
    /// the boundary, so `g` must extend continuously to a neighbourhood of
    /// `∂Ω` rather than being defined on the boundary curve alone.
    fn value(&self, p: Vec2) -> f32;
}

/// Simple functional wrapper implementing `BoundaryDirichlet`.
pub struct BoundaryDirichletFn<F>
where
    F: Fn(Vec2) -> f32 + Send + Sync,
{
    f: F,
}

impl<F> BoundaryDirichletFn<F>
where
    F: Fn(Vec2) -> f32 + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> BoundaryDirichlet for BoundaryDirichletFn<F>
where
    F: Fn(Vec2) -> f32 + Send + Sync,
{
    #[inline]
    fn value(&self, p: Vec2) -> f32 {
        (self.f)(p)
    }
}
