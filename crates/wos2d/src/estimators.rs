//! Core Monte Carlo estimators.
//!
//! The routines in this module implement the Walk-on-Spheres estimator for the
//! planar Laplace equation with Dirichlet data. A single walk reports a
//! [`WalkOutcome`](crate::observer::WalkOutcome) carrying the termination
//! reason, and the multi-path estimator averages independent walks into one
//! value per query point.

use crate::boundary::BoundaryDirichlet;
use crate::domain::Domain;
use crate::math::Vec2;
use crate::observer::{
    TerminationReason, WalkObserver, WalkOutcome, WalkStart, WalkStep, WalkTerminate,
};
use crate::params::WalkBudget;
use crate::rng::Rng;
use crate::sampling::wos_jump;
use crate::stats::Stats;

/// Walk-on-Spheres Laplace estimator: one walk, one boundary sample.
///
/// Starting at `x`, the walk repeatedly jumps to a uniform point on the
/// largest boundary-free circle centred at the current position. It stops as
/// soon as the boundary distance falls below `budget.epsilon`, or after
/// `budget.max_steps` jumps. In both cases the sample is `g` evaluated at the
/// walk's final position: truncation evaluates near-boundary interior points
/// as if they were boundary data, a bias that shrinks with `epsilon` and
/// grows smaller as `max_steps` grows.
///
/// The walk never aborts for numerical reasons; a degenerate distance simply
/// runs the walk to the step cap. Taking `|d|` lets walks started slightly
/// outside a signed-distance domain fall back inward instead of escaping.
pub fn wos_laplace_dirichlet<D, G, O>(
    domain: &D,
    g: &G,
    budget: WalkBudget,
    rng: &mut Rng,
    mut x: Vec2,
    observer: &O,
) -> WalkOutcome
where
    D: Domain,
    G: BoundaryDirichlet,
    O: WalkObserver,
{
    debug_assert!(
        domain.is_inside(x),
        "wos_laplace_dirichlet: x must start inside Ω"
    );

    observer.on_start(WalkStart { position: x });

    let mut steps = 0u32;
    loop {
        let radius = domain.boundary_distance(x).abs();
        if radius < budget.epsilon {
            observer.on_terminate(WalkTerminate {
                position: x,
                reason: TerminationReason::HitBoundary,
                depth: steps,
            });
            return WalkOutcome::new(g.value(x), TerminationReason::HitBoundary, steps);
        }

        observer.on_step(WalkStep {
            position: x,
            radius,
            depth: steps,
        });
        x = wos_jump(x, radius, rng);
        steps += 1;
        if steps >= budget.max_steps {
            observer.on_terminate(WalkTerminate {
                position: x,
                reason: TerminationReason::MaxSteps,
                depth: steps,
            });
            return WalkOutcome::new(g.value(x), TerminationReason::MaxSteps, steps);
        }
    }
}

/// Monte Carlo estimate of the harmonic solution at `x`: the arithmetic mean
/// of `num_paths` independent walks.
///
/// Each walk draws fresh randomness from `rng`, so samples are independent
/// and the statistical error scales as `O(1/√num_paths)`. No variance
/// reduction beyond plain averaging is applied. `num_paths` is clamped to at
/// least one.
pub fn estimate_laplace_dirichlet<D, G, O>(
    domain: &D,
    g: &G,
    budget: WalkBudget,
    num_paths: u32,
    rng: &mut Rng,
    x: Vec2,
    observer: &O,
) -> f32
where
    D: Domain,
    G: BoundaryDirichlet,
    O: WalkObserver,
{
    let n = num_paths.max(1);
    let mut stats = Stats::default();
    for _ in 0..n {
        let outcome = wos_laplace_dirichlet(domain, g, budget, rng, x, observer);
        stats.push(outcome.value);
    }
    stats.mean()
}
