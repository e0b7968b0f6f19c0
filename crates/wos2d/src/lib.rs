#![no_std]

//! Grid-free Monte Carlo estimation of planar harmonic functions.
//!
//! This crate provides safe, `no_std` implementations of the Walk-on-Spheres
//! estimator for Laplace problems with Dirichlet data on planar domains,
//! along with domain abstractions, explicit seedable randomness, and walk
//! observers for diagnostics and visualisation.
//!
//! The value of a harmonic function at an interior point equals its average
//! over any circle centred there that stays inside the domain. A walk
//! repeatedly jumps to a uniform point on the largest such inscribed circle
//! until it lands within tolerance of the boundary; averaging the boundary
//! values reached by many independent walks yields an unbiased (up to
//! truncation) estimate, with no interior discretization at all.

extern crate alloc;

pub mod boundary;
pub mod domain;
pub mod estimators;
pub mod math;
pub mod observer;
pub mod params;
pub mod rng;
pub mod sampling;
pub mod solver;
pub mod stats;

pub use boundary::{BoundaryDirichlet, BoundaryDirichletFn};
pub use domain::sdf_csg;
pub use domain::{Domain, SdfDomain, UnitSquare};
pub use estimators::{estimate_laplace_dirichlet, wos_laplace_dirichlet};
pub use math::Vec2;
pub use observer::{
    NoopObserver, StatsObserver, TerminationReason, TraceRecorder, WalkObserver, WalkOutcome,
    WalkStatsSnapshot,
};
pub use params::WalkBudget;
pub use rng::{splitmix64, Rng, DEFAULT_SEED};
pub use sampling::sample_unit_circle;
pub use solver::{Solver, SolverBuilder};
pub use stats::Stats;

#[cfg(test)]
mod tests {
    use crate::observer::{WalkStart, WalkStep, WalkTerminate};
    use crate::*;
    use spin::Mutex;

    /// The shipped saddle `g(x,y) = x² − y²`: harmonic everywhere, so the
    /// estimator must reproduce `g` itself at interior points.
    fn saddle() -> BoundaryDirichletFn<impl Fn(Vec2) -> f32 + Send + Sync> {
        BoundaryDirichletFn::new(|p: Vec2| p.x * p.x - p.y * p.y)
    }

    /// Run `trials` independent estimates and return Welford stats over them.
    fn estimate_repeat_and_stats<D, G>(
        domain: &D,
        g: &G,
        budget: WalkBudget,
        num_paths: u32,
        trials: u32,
        x: Vec2,
        seed: u64,
    ) -> Stats
    where
        D: Domain,
        G: BoundaryDirichlet,
    {
        let mut stats = Stats::default();
        let mut rng = Rng::seed_from(seed);
        for _ in 0..trials {
            let u = estimate_laplace_dirichlet(
                domain,
                g,
                budget,
                num_paths,
                &mut rng,
                x,
                &NoopObserver,
            );
            stats.push(u);
        }
        stats
    }

    #[test]
    fn unit_square_distance_is_min_of_edge_distances() {
        let square = UnitSquare;
        // Interior, edge, and exterior probes.
        let probes = [
            (Vec2::new(0.5, 0.5), 0.5),
            (Vec2::new(0.25, 0.5), 0.25),
            (Vec2::new(0.9, 0.7), 0.1),
            (Vec2::new(0.0, 0.3), 0.0),
            (Vec2::new(0.3, 1.0), 0.0),
            (Vec2::new(-0.2, 0.5), 0.2),
            (Vec2::new(0.5, 1.4), 0.4),
        ];
        for (p, want) in probes {
            let d = square.boundary_distance(p);
            assert!(d >= 0.0, "distance must be non-negative at {p:?}");
            assert!(
                (d - want).abs() < 1e-6,
                "distance at {p:?}: got {d}, want {want}"
            );
            // Same value as the explicit min over the four edge lines.
            let expl = p
                .x
                .abs()
                .min((p.x - 1.0).abs())
                .min(p.y.abs())
                .min((p.y - 1.0).abs());
            assert!((d - expl).abs() < 1e-6);
        }
        assert!(square.is_inside(Vec2::new(0.5, 0.5)));
        assert!(!square.is_inside(Vec2::new(1.0, 0.5)));
        assert!(!square.is_inside(Vec2::new(0.5, -0.1)));
    }

    #[test]
    fn unit_circle_sampling_is_uniform() {
        use core::f32::consts::PI;

        let mut rng = Rng::seed_from(0xD1CE);
        const DRAWS: usize = 10_000;
        const BINS: usize = 16;
        let mut counts = [0u32; BINS];

        for _ in 0..DRAWS {
            let d = sample_unit_circle(&mut rng);
            assert!(
                (d.length_sq() - 1.0).abs() < 1e-5,
                "direction must be unit length"
            );
            let mut angle = libm::atan2f(d.y, d.x);
            if angle < 0.0 {
                angle += 2.0 * PI;
            }
            let bin = ((angle / (2.0 * PI)) * BINS as f32) as usize;
            counts[bin.min(BINS - 1)] += 1;
        }

        // Chi-square against uniform: df = 15, critical value 37.7 at p = 0.999.
        let expected = (DRAWS / BINS) as f32;
        let chi2: f32 = counts
            .iter()
            .map(|&c| {
                let d = c as f32 - expected;
                d * d / expected
            })
            .sum();
        assert!(chi2 < 37.7, "angular distribution not uniform: chi2 = {chi2}");
    }

    /// Records the final event of the most recent walk.
    struct LastTerminate(Mutex<Option<WalkTerminate>>);

    impl WalkObserver for LastTerminate {
        fn on_start(&self, _event: WalkStart) {}
        fn on_step(&self, _event: WalkStep) {}
        fn on_terminate(&self, event: WalkTerminate) {
            *self.0.lock() = Some(event);
        }
    }

    #[test]
    fn walks_terminate_within_budget_and_tolerance() {
        let square = UnitSquare;
        let g = saddle();
        let budget = WalkBudget::new(1e-3, 128);
        let stats = StatsObserver::new();
        let last = LastTerminate(Mutex::new(None));
        let mut rng = Rng::seed_from(9);

        for _ in 0..200 {
            let outcome = wos_laplace_dirichlet(
                &square,
                &g,
                budget,
                &mut rng,
                Vec2::new(0.5, 0.5),
                &stats,
            );
            assert!(outcome.steps <= budget.max_steps);
        }
        let snap = stats.snapshot();
        assert_eq!(snap.walks, 200);
        assert_eq!(snap.boundary_hits + snap.max_steps_hits, 200);
        assert!(snap.total_steps <= 200 * budget.max_steps as u64);

        // An early-terminating walk must stop within tolerance of the boundary.
        loop {
            let outcome = wos_laplace_dirichlet(
                &square,
                &g,
                budget,
                &mut rng,
                Vec2::new(0.5, 0.5),
                &last,
            );
            if outcome.reason == TerminationReason::HitBoundary {
                let event = last.0.lock().expect("terminate event recorded");
                assert!(square.boundary_distance(event.position) < budget.epsilon);
                break;
            }
        }
    }

    #[test]
    fn harmonic_saddle_is_reproduced_at_center() {
        let square = UnitSquare;
        let g = saddle();
        let mut rng = Rng::seed_from(42);
        let u = estimate_laplace_dirichlet(
            &square,
            &g,
            WalkBudget::new(1e-3, 128),
            100_000,
            &mut rng,
            Vec2::new(0.5, 0.5),
            &NoopObserver,
        );
        // g(0.5, 0.5) = 0; margin covers Monte Carlo error plus truncation bias.
        assert!(u.abs() < 0.02, "u(0.5,0.5) ≈ 0, got {u}");
    }

    #[test]
    fn harmonic_saddle_is_reproduced_off_center() {
        let square = UnitSquare;
        let g = saddle();
        let mut rng = Rng::seed_from(1234);
        let u = estimate_laplace_dirichlet(
            &square,
            &g,
            WalkBudget::new(1e-3, 128),
            100_000,
            &mut rng,
            Vec2::new(0.2, 0.8),
            &NoopObserver,
        );
        let exact = 0.2 * 0.2 - 0.8 * 0.8; // -0.60
        assert!((u - exact).abs() < 0.02, "u(0.2,0.8) ≈ {exact}, got {u}");
    }

    /// Std-dev of repeated estimates should halve when num_paths quadruples.
    #[test]
    fn variance_shrinks_with_path_count() {
        let square = UnitSquare;
        let g = saddle();
        let budget = WalkBudget::new(1e-3, 128);
        let x = Vec2::new(0.3, 0.7);

        let trials = 200;
        let s16 = estimate_repeat_and_stats(&square, &g, budget, 16, trials, x, 777);
        let s64 = estimate_repeat_and_stats(&square, &g, budget, 64, trials, x, 888);

        let ratio = s16.std_dev() / s64.std_dev();
        // Expected ratio is 2 (σ ∝ 1/√N); leave stochastic slack on both sides.
        assert!(
            ratio > 1.4 && ratio < 2.9,
            "std-dev ratio off: sd16 = {}, sd64 = {}, ratio = {ratio}",
            s16.std_dev(),
            s64.std_dev()
        );
    }

    #[test]
    fn sdf_disk_reproduces_linear_data() {
        // Unit disk centred at origin; g(p) = p.x is harmonic, so u = x inside.
        let disk = SdfDomain::new(|p: Vec2| p.length() - 1.0);
        let g = BoundaryDirichletFn::new(|p: Vec2| p.x);
        let solver = Solver::builder(&disk).build();
        let mut rng = Rng::seed_from(7);
        let u = solver.estimate_laplace_dirichlet(
            &g,
            WalkBudget::new(1e-3, 256),
            20_000,
            &mut rng,
            Vec2::new(0.25, -0.1),
        );
        assert!((u - 0.25).abs() < 0.03, "u(0.25,-0.1) ≈ 0.25, got {u}");
    }

    #[test]
    fn observers_capture_walk_data() {
        let square = UnitSquare;
        let stats = StatsObserver::new();
        let trace = TraceRecorder::new();
        let mut solver = Solver::builder(&square).with_observer(stats.clone()).build();
        // Observers can also join after the solver is frozen.
        solver.add_observer(trace.clone());

        let g = saddle();
        let mut rng = Rng::seed_from(5);
        let _ = solver.sample_laplace_dirichlet(
            &g,
            WalkBudget::new(1e-3, 128),
            &mut rng,
            Vec2::new(0.4, 0.6),
        );

        let snap = stats.snapshot();
        assert_eq!(snap.walks, 1);
        assert!(snap.total_steps > 0);

        assert!(!trace.is_empty());
        let ply_text = trace.to_ascii_ply();
        assert!(ply_text.contains("ply"));
        assert!(ply_text.contains("element vertex"));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let square = UnitSquare;
        let g = saddle();
        let budget = WalkBudget::new(1e-3, 128);
        let x = Vec2::new(0.6, 0.4);

        let mut a = Rng::seed_from(2024);
        let mut b = Rng::seed_from(2024);
        let ua = estimate_laplace_dirichlet(&square, &g, budget, 64, &mut a, x, &NoopObserver);
        let ub = estimate_laplace_dirichlet(&square, &g, budget, 64, &mut b, x, &NoopObserver);
        assert_eq!(ua, ub);

        // Split children must not replay the parent stream.
        let mut parent = Rng::seed_from(2024);
        let mut child = parent.split();
        assert_ne!(parent.uniform_f32(), child.uniform_f32());
    }
}
