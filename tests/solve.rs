use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scurve_solver::{
    solve, solve_with, MotionConstraints, Orientation, ProfileShape, RampKind, SolverConfig,
};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn small_move_from_rest_is_a_jerk_only_triangle() {
    let c = MotionConstraints::new(1.0, 1.0, 1.0, 1.0, 0.1, 0.0, 0.0);
    let plan = solve(&c).expect("feasible");

    assert!(!plan.has_cruise_phase());
    assert_eq!(
        plan.kind.shape,
        ProfileShape::Peak {
            accel: RampKind::JerkOnly,
            decel: RampKind::JerkOnly
        }
    );
    let [t1, t2, t3, ..] = plan.phases.0;
    assert!(close(t1, t3, 1e-12));
    assert_eq!(t2, 0.0);
    assert!(close(plan.distance(), 0.1, 1e-9));
    assert!(plan.final_velocity().abs() < 1e-9);
}

#[test]
fn long_move_cruises_at_the_limit() {
    let c = MotionConstraints::new(1.0, 1.0, 1.0, 2.0, 10.0, 0.0, 0.0);
    let plan = solve(&c).expect("feasible");
    assert!(plan.has_cruise_phase());
    assert!(close(plan.peak_velocity(), 1.0, 1e-12));
    assert!(close(plan.phases.cruise(), 8.5, 1e-12));
    assert_eq!(plan.verify(&c, &SolverConfig::default()), Ok(()));
}

#[test]
fn short_move_towards_higher_exit_velocity_is_partial() {
    let c = MotionConstraints::new(1.0, 1.0, 1.0, 1.0, 0.1, 0.0, 1.0);
    let plan = solve(&c).expect("feasible");
    assert_eq!(plan.kind.shape, ProfileShape::Partial(RampKind::JerkOnly));
    assert_eq!(plan.orientation(), Orientation::AccelerationFirst);
    assert!(plan.final_velocity() < 1.0);
    assert_eq!(plan.verify(&c, &SolverConfig::default()), Ok(()));
}

#[test]
fn asymmetric_limits_pick_mixed_peak() {
    let c = MotionConstraints::new(10.0, 0.5, 2.0, 1.0, 7.5, 0.0, 1.0);
    let plan = solve(&c).expect("feasible");
    assert_eq!(
        plan.kind.shape,
        ProfileShape::Peak {
            accel: RampKind::Limited,
            decel: RampKind::JerkOnly
        }
    );
    assert!(close(plan.peak_velocity(), 2.0, 1e-9));
}

#[test]
fn deceleration_first_matches_mirrored_problem() {
    let c = MotionConstraints::new(2.0, 1.0, 1.0, 1.0, 0.2, 1.5, 0.5);
    let direct = solve(&c).expect("feasible");
    let mirrored = solve(&c.mirrored()).expect("feasible");

    assert_eq!(direct.orientation(), Orientation::DecelerationFirst);
    assert_eq!(mirrored.orientation(), Orientation::DecelerationFirst);
    assert!(close(
        direct.physical_final_velocity(),
        mirrored.physical_final_velocity(),
        1e-12
    ));

    let fv = direct.physical_final_velocity();
    assert!(fv > c.vel_exit && fv < c.vel_init);
    assert_eq!(direct.verify(&c, &SolverConfig::default()), Ok(()));
}

#[test]
fn evaluator_is_consistent_with_the_plan() {
    let problems = [
        MotionConstraints::new(1.0, 1.0, 1.0, 2.0, 10.0, 0.0, 0.0),
        MotionConstraints::new(1.0, 1.0, 1.0, 1.0, 0.1, 0.0, 1.0),
        MotionConstraints::new(2.0, 1.0, 1.0, 1.0, 0.2, 1.5, 0.5),
        MotionConstraints::new(10.0, 1.0, 1.0, 2.0, 5.0, 0.0, 0.0),
    ];
    for c in problems {
        let plan = solve(&c).expect("feasible");
        assert_eq!(plan.velocity_at(0.0), plan.constraints.vel_init);
        assert!(close(plan.velocity_at(plan.time()), plan.final_velocity(), 1e-12));
        assert!(close(plan.state_at(plan.time()).pos, plan.distance(), 1e-12));
    }
}

#[test]
fn simulation_args_replay_the_plan() {
    let c = MotionConstraints::new(10.0, 1.0, 1.0, 2.0, 5.0, 0.0, 0.0);
    let plan = solve(&c).expect("feasible");
    let args = plan.simulation_args();
    assert_eq!(&args[..7], &plan.phases.0);
    assert_eq!(args[7], plan.constraints.jrk_lim);
    assert_eq!(args[8], plan.constraints.vel_init);
}

#[test]
fn moves_between_rest_states_take_mixed_peaks() {
    let config = SolverConfig::default();
    let problems = [
        (
            MotionConstraints::new(1.5128, 1.5306, 0.466, 1.0811, 0.4829, 0.0, 0.0),
            RampKind::JerkOnly,
            RampKind::Limited,
        ),
        (
            MotionConstraints::new(1.6577, 0.0866, 1.3314, 1.431, 3.1964, 0.0, 0.0),
            RampKind::Limited,
            RampKind::JerkOnly,
        ),
    ];
    for (c, accel, decel) in problems {
        let plan = solve(&c).unwrap_or_else(|| panic!("no solution for {c}"));
        assert_eq!(plan.kind.shape, ProfileShape::Peak { accel, decel });
        assert_eq!(plan.verify(&c, &config), Ok(()));
    }
}

#[test]
fn tiny_move_at_high_speed_brakes_briefly() {
    let c = MotionConstraints::new(643.15, 0.6006, 8.264, 1.2963, 0.0019437, 527.5, 82.49);
    let plan = solve(&c).expect("feasible");
    assert_eq!(plan.orientation(), Orientation::DecelerationFirst);
    assert_eq!(plan.kind.shape, ProfileShape::Partial(RampKind::JerkOnly));
    assert_eq!(plan.verify(&c, &SolverConfig::default()), Ok(()));
    assert!(close(plan.distance().abs(), 0.0019437, 1e-11));
}

#[test]
fn tiny_deceleration_ceiling_still_peaks() {
    let c = MotionConstraints::new(0.3162, 15.11, 0.001364, 189.4, 0.10345, 0.01315, 0.2316);
    let plan = solve(&c).expect("feasible");
    assert_eq!(
        plan.kind.shape,
        ProfileShape::Peak {
            accel: RampKind::JerkOnly,
            decel: RampKind::Limited
        }
    );
    assert_eq!(plan.verify(&c, &SolverConfig::default()), Ok(()));
}

fn solve_and_verify(c: &MotionConstraints, config: &SolverConfig) {
    let plan = solve_with(c, config).unwrap_or_else(|| panic!("no solution for {c}"));
    if let Err(defect) = plan.verify(c, config) {
        panic!("{defect}\n  problem: {c}\n{plan}");
    }
}

/// Draws problems the way the stress harness does and checks every plan.
#[test]
fn random_problems_are_solved_and_verified() {
    let config = SolverConfig::default();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut solved = 0;
    let mut tried = 0;

    while tried < 20_000 {
        let mut draw = || rng.random_range(0.01..1.667);
        let c = MotionConstraints::new(draw(), draw(), draw(), draw(), 0.0, draw(), draw());
        let c = MotionConstraints {
            dist: rng.random_range(1e-3..100.0),
            ..c
        };
        if c.validate().is_err() {
            continue;
        }
        tried += 1;

        solve_and_verify(&c, &config);
        solved += 1;
    }

    assert_eq!(solved, tried);
}

fn log_uniform(rng: &mut StdRng, min_exp: f64, max_exp: f64) -> f64 {
    10f64.powf(rng.random_range(min_exp..max_exp))
}

/// Starts and ends at rest, at the ceiling or anywhere between, with limits
/// spread over four decades.
#[test]
fn rest_and_ceiling_velocities_over_wide_limits() {
    let config = SolverConfig::default();
    let mut rng = StdRng::seed_from_u64(0xdecade);

    for _ in 0..20_000 {
        let vel_lim = log_uniform(&mut rng, -2.0, 2.0);
        let acc_lim = log_uniform(&mut rng, -2.0, 2.0);
        let dec_lim = log_uniform(&mut rng, -2.0, 2.0);
        let jrk_lim = log_uniform(&mut rng, -2.0, 2.0);
        let dist = log_uniform(&mut rng, -3.0, 3.0);
        let mut velocity = || match rng.random_range(0..3) {
            0 => 0.0,
            1 => vel_lim,
            _ => rng.random_range(0.0..vel_lim),
        };
        let (vel_init, vel_exit) = (velocity(), velocity());

        let c = MotionConstraints::new(
            vel_lim, acc_lim, dec_lim, jrk_lim, dist, vel_init, vel_exit,
        );
        assert_eq!(c.validate(), Ok(()));
        solve_and_verify(&c, &config);
    }
}
