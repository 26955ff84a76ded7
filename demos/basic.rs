// demos/basic.rs

use basic_heading_pilot::angle::resolve;
use basic_heading_pilot::{AutopilotState, BasicPilot, GainId, HeadingPilot, Mode};

// Simulated boat: rudder command turns the hull with some lag.
struct Boat {
    heading: f64,
    rate: f64,
    rate_of_rate: f64,
}

impl Boat {
    fn step(&mut self, rudder: f64, dt: f64) {
        let target_rate = -40.0 * rudder;
        let accel = (target_rate - self.rate) * 0.8;
        self.rate_of_rate = accel;
        self.rate += accel * dt;
        self.heading = (self.heading + self.rate * dt).rem_euclid(360.0);
    }
}

fn main() {
    let mut pilot = BasicPilot::new();
    pilot.gains().gain(GainId::R).set(0.1);

    let mut boat = Boat {
        heading: 350.0,
        rate: 0.0,
        rate_of_rate: 0.0,
    };
    let dt: f64 = 0.1;
    let mut integral: f64 = 0.0;
    let mut rudder: f64 = 0.0;

    for step in 0..300 {
        let time = step as f64 * dt;
        // Turn to starboard halfway through.
        let heading_command = if time < 15.0 { 20.0 } else { 60.0 };
        let heading_error = resolve(boat.heading - heading_command);
        integral = (integral + heading_error * dt).clamp(-50.0, 50.0);

        let state = AutopilotState {
            time,
            mode: Mode::Compass,
            enabled: true,
            heading_command,
            heading_error,
            heading_error_integral: integral,
            gyro_rate: boat.rate,
            gyro_rate_of_rate: boat.rate_of_rate,
        };
        if let Some(command) = pilot.process(&state, step == 0) {
            rudder = command.clamp(-1.0, 1.0);
        }
        boat.step(rudder, dt);

        if step % 10 == 0 {
            let signals = pilot.signals();
            println!(
                "t={:5.1} heading={:6.1} error={:6.1} rudder={:6.3} rate={:6.3} reactive={:6.3}",
                time, boat.heading, heading_error, rudder, signals.command_rate, signals.reactive_value
            );
        }
    }
}
