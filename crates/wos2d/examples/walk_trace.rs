use std::fs;
use std::path::PathBuf;

use wos2d::{
    BoundaryDirichletFn, Rng, Solver, StatsObserver, TraceRecorder, UnitSquare, Vec2, WalkBudget,
};

fn main() -> std::io::Result<()> {
    let domain = UnitSquare;

    // Attach observers to capture walk statistics and dump the paths as PLY.
    let stats = StatsObserver::new();
    let trace = TraceRecorder::new();
    let solver = Solver::builder(&domain)
        .with_observer(stats.clone())
        .with_observer(trace.clone())
        .build();

    // Dirichlet boundary: the harmonic saddle.
    let bc = BoundaryDirichletFn::new(|p: Vec2| p.x * p.x - p.y * p.y);
    let mut rng = Rng::seed_from(42);

    // Average a handful of walks from an interior point.
    let query = Vec2::new(0.3, 0.6);
    let value =
        solver.estimate_laplace_dirichlet(&bc, WalkBudget::new(1e-3, 128), 32, &mut rng, query);

    let snapshot = stats.snapshot();
    println!("Estimated u({query:?}) = {value}");
    println!(
        "Walks: {}, boundary hits: {}, max-step exits: {}, total steps: {}",
        snapshot.walks, snapshot.boundary_hits, snapshot.max_steps_hits, snapshot.total_steps
    );

    let out_path = PathBuf::from("walk.ply");
    fs::write(&out_path, trace.to_ascii_ply())?;
    println!("Saved walk traces to {}", out_path.display());

    Ok(())
}
