use std::error::Error;

use gnuplot::*;
use scurve_solver::{MotionConstraints, PlanSampler};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // -----------------------
    // 1. Set up parameters
    // -----------------------
    let vel_lim = 20.0; // Maximum velocity
    let acc_lim = 10.0; // Maximum acceleration
    let dec_lim = 15.0; // Maximum deceleration
    let jrk_lim = 40.0; // Maximum jerk

    let dist = 50.0; // Distance to travel
    let vel_init = 2.0; // Initial velocity
    let vel_exit = 5.0; // Target velocity

    let constraints = MotionConstraints::new(
        vel_lim, acc_lim, dec_lim, jrk_lim, dist, vel_init, vel_exit,
    );

    // ---------------------
    // 2. Solve
    // ---------------------
    let plan = scurve_solver::try_solve(&constraints)?;
    println!("{plan}");

    // -------------------------
    // 3. Sample the plan
    // -------------------------
    let sampling_rate = 1000.0; // points per second
    let sampler = PlanSampler::new(&plan, sampling_rate)?;
    let num_points = sampler.len();

    let mut time_axis = Vec::with_capacity(num_points);
    let mut positions = Vec::with_capacity(num_points);
    let mut velocities = Vec::with_capacity(num_points);
    let mut accelerations = Vec::with_capacity(num_points);

    for sample in sampler {
        time_axis.push(sample.time);
        positions.push(sample.pos);
        velocities.push(sample.vel);
        accelerations.push(sample.acc);
    }

    let final_position = positions.last().copied().unwrap_or(0.0);
    if (final_position - dist).abs() > 1e-6 {
        eprintln!("Warning: final position is off by {:e}", final_position - dist);
    }

    // --------------
    // 4. Plot data
    // --------------
    let mut fg = Figure::new();
    {
        let axes = fg.axes2d();
        axes.set_title(&format!("{}", plan.kind), &[]);
        axes.set_x_label("Time (s)", &[]);
        axes.set_y_label("Position derivatives", &[]);
        axes.lines(&time_axis, &positions, &[Color("blue"), Caption("Position")]);
        axes.lines(&time_axis, &velocities, &[Color("red"), Caption("Velocity")]);
        axes.lines(&time_axis, &accelerations, &[Color("green"), Caption("Acceleration")]);
    }

    // Attempt to show in a pop-up window (requires gnuplot installed)
    fg.show().map_err(|e| format!("Failed to display plot: {e}"))?;

    println!("Plot generated. Total motion time: {:.3} seconds.", plan.time());
    Ok(())
}
