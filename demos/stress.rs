//! Random stress harness: solves many random problems, verifies every plan
//! and reports how the solutions spread over the profile shapes.

use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scurve_solver::{solve_with, MotionConstraints, SolverConfig};

#[derive(Parser, Debug)]
#[command(about = "Solve random S-curve problems and verify every plan")]
struct Args {
    /// Number of problems to solve
    #[arg(short = 'n', long, default_value_t = 100_000)]
    count: usize,

    /// RNG seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Smallest value drawn for the limits and velocities
    #[arg(long, default_value_t = 0.01)]
    min_limit: f64,

    /// Largest value drawn for the limits and velocities
    #[arg(long, default_value_t = 1.667)]
    max_limit: f64,

    /// Largest distance drawn
    #[arg(long, default_value_t = 100.0)]
    max_dist: f64,

    /// Draw limits and distances log-uniformly instead of uniformly
    #[arg(long)]
    log_uniform: bool,

    /// Pick each velocity from rest, the velocity ceiling or anywhere between
    #[arg(long)]
    boundary_velocities: bool,

    /// Solver config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trace every case solver attempt
    #[arg(long)]
    trace: bool,
}

fn draw(rng: &mut StdRng, min: f64, max: f64, log_uniform: bool) -> f64 {
    if log_uniform {
        10f64.powf(rng.random_range(min.log10()..max.log10()))
    } else {
        rng.random_range(min..max)
    }
}

fn random_problem(rng: &mut StdRng, args: &Args) -> MotionConstraints {
    let limit = |rng: &mut StdRng| draw(rng, args.min_limit, args.max_limit, args.log_uniform);
    let (vel_lim, acc_lim, dec_lim, jrk_lim) = (limit(rng), limit(rng), limit(rng), limit(rng));

    let velocity = |rng: &mut StdRng| {
        if !args.boundary_velocities {
            return limit(rng);
        }
        match rng.random_range(0..3) {
            0 => 0.0,
            1 => vel_lim,
            _ => rng.random_range(0.0..vel_lim),
        }
    };
    let (vel_init, vel_exit) = (velocity(rng), velocity(rng));

    let dist = draw(rng, 1e-3, args.max_dist, args.log_uniform);
    MotionConstraints::new(vel_lim, acc_lim, dec_lim, jrk_lim, dist, vel_init, vel_exit)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = if args.trace {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    config.trace |= args.trace;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut per_kind = BTreeMap::new();
    let mut skipped = 0usize;
    let mut infeasible = 0usize;
    let mut defects = 0usize;

    let start = Instant::now();
    for _ in 0..args.count {
        let c = random_problem(&mut rng, &args);
        if c.validate().is_err() {
            skipped += 1;
            continue;
        }

        let Some(plan) = solve_with(&c, &config) else {
            tracing::warn!("No solution: {}", c);
            infeasible += 1;
            continue;
        };

        if let Err(defect) = plan.verify(&c, &config) {
            tracing::error!("{}\n  problem: {}\n{}", defect, c, plan);
            defects += 1;
        }
        *per_kind.entry(plan.kind.to_string()).or_insert(0usize) += 1;
    }
    let elapsed = start.elapsed();

    let solved: usize = per_kind.values().sum();
    tracing::info!(
        "{} problems ({} skipped as invalid) in {:.3?}: {} solved, {} infeasible, {} defects",
        args.count,
        skipped,
        elapsed,
        solved,
        infeasible,
        defects
    );
    for (kind, n) in &per_kind {
        tracing::info!("  {:>8}  {}", n, kind);
    }

    if infeasible + defects > 0 {
        return Err(format!("{infeasible} infeasible, {defects} defective plans").into());
    }
    Ok(())
}
