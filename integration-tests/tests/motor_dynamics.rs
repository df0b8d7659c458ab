use approx::assert_relative_eq;
use integration_tests::init_logging;
use recalc_core::constraint::UnitInterval;
use recalc_motor::{
    Motor, MotorModel, MotorRules, Operating,
    dynamics::{MotorOdeRequest, MotorSimConfig, solve_motor_ode},
};
use uom::si::{
    angle::revolution,
    angular_velocity::radian_per_second,
    electric_current::ampere,
    electric_potential::volt,
    f64::{ElectricCurrent, ElectricPotential, MomentOfInertia, Time, Torque},
    moment_of_inertia::kilogram_square_meter,
    time::second,
    torque::newton_meter,
};

fn request(stator_limit: f64, inertia: f64) -> MotorOdeRequest {
    MotorOdeRequest {
        stator_voltage: ElectricPotential::new::<volt>(12.0),
        supply_voltage: ElectricPotential::new::<volt>(12.0),
        supply_limit: ElectricCurrent::new::<ampere>(1000.0),
        stator_limit: ElectricCurrent::new::<ampere>(stator_limit),
        inertia: MomentOfInertia::new::<kilogram_square_meter>(inertia),
        antagonist_torque: Torque::new::<newton_meter>(0.0),
        efficiency: UnitInterval::one(),
    }
}

#[test]
fn settles_at_the_steady_state_operating_point() {
    init_logging();
    let motor = Motor::from_model(MotorModel::Cim, 1);
    let config = MotorSimConfig::new(Time::new::<second>(3.0), 1000).unwrap();

    let samples = solve_motor_ode(&motor, &request(60.0, 0.002), &config, |_| false).unwrap();
    let last = samples.last().unwrap();

    let steady = MotorRules::new(
        &motor,
        ElectricCurrent::new::<ampere>(60.0),
        Operating::Speed {
            speed: last.velocity,
            voltage: ElectricPotential::new::<volt>(12.0),
        },
    )
    .solve();

    assert_relative_eq!(
        last.stator_current.get::<ampere>(),
        steady.current.get::<ampere>(),
        max_relative = 1e-2
    );
}

#[test]
fn more_motors_accelerate_faster() {
    init_logging();
    let config = MotorSimConfig::new(Time::new::<second>(0.5), 1000).unwrap();

    let speed_at_end = |quantity| {
        let motor = Motor::from_model(MotorModel::KrakenX60, quantity);
        let samples = solve_motor_ode(&motor, &request(40.0, 0.05), &config, |_| false).unwrap();
        samples.last().unwrap().velocity.get::<radian_per_second>()
    };

    assert!(speed_at_end(2) > speed_at_end(1));
}

#[test]
fn stops_after_reaching_a_travel_distance() {
    init_logging();
    let motor = Motor::from_model(MotorModel::KrakenX60, 1);

    let samples = solve_motor_ode(
        &motor,
        &request(40.0, 0.01),
        &MotorSimConfig::default(),
        |info| info.position.get::<revolution>() >= 20.0,
    )
    .unwrap();

    let last = samples.last().unwrap();
    assert!(last.position.get::<revolution>() < 20.0);
    assert!(last.time.get::<second>() < 30.0);
    assert!(samples.len() < 30_001);
}
