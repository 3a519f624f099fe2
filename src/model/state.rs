use super::{BodyRole, BodySnapshot, CelestialBody, ModelError};
use crate::astro::RateStrategy;

/// The complete state of the simulated system at one instant.
///
/// Updating it is a plain function of the previous state and a time factor;
/// nothing else is consulted, so two states can be stepped side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    star: CelestialBody,
    primary: CelestialBody,
    satellite: CelestialBody,
    strategy: RateStrategy,
    /// Sum of all time factors applied so far
    time: f64,
}

impl SimulationState {
    pub fn new(
        star: CelestialBody,
        primary: CelestialBody,
        satellite: CelestialBody,
        strategy: RateStrategy,
    ) -> Result<Self, ModelError> {
        for (body, role, should_orbit) in [
            (&star, BodyRole::Star, false),
            (&primary, BodyRole::Primary, true),
            (&satellite, BodyRole::Satellite, true),
        ] {
            if body.role() != role || body.orbit().is_some() != should_orbit {
                return Err(ModelError::InvalidRole {
                    name: body.name().to_owned(),
                    role,
                });
            }
        }

        let mut state = SimulationState {
            star,
            primary,
            satellite,
            strategy,
            time: 0.0,
        };
        state.place_bodies();

        tracing::debug!(
            "Created system: {} orbiting {} at {:.1}, {} orbiting at {:.1}, rate strategy {}",
            state.primary.name(),
            state.star.name(),
            state.primary.distance(),
            state.satellite.name(),
            state.satellite.distance(),
            state.strategy,
        );
        Ok(state)
    }

    // -- Accessors --

    pub fn star(&self) -> &CelestialBody {
        &self.star
    }

    pub fn primary(&self) -> &CelestialBody {
        &self.primary
    }

    pub fn satellite(&self) -> &CelestialBody {
        &self.satellite
    }

    pub fn body(&self, role: BodyRole) -> &CelestialBody {
        match role {
            BodyRole::Star => &self.star,
            BodyRole::Primary => &self.primary,
            BodyRole::Satellite => &self.satellite,
        }
    }

    /// Bodies in update order: each one comes after its parent.
    pub fn bodies(&self) -> [&CelestialBody; 3] {
        [&self.star, &self.primary, &self.satellite]
    }

    pub fn snapshots(&self) -> [BodySnapshot; 3] {
        self.bodies().map(CelestialBody::snapshot)
    }

    pub fn strategy(&self) -> RateStrategy {
        self.strategy
    }

    /// Swaps the angular-rate model. Takes effect from the next tick.
    pub fn set_strategy(&mut self, strategy: RateStrategy) {
        self.strategy = strategy;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    // -- Updates --

    /// Returns the state one tick of `time_factor` later, leaving `self` alone.
    pub fn advance(&self, time_factor: f64) -> SimulationState {
        let mut next = self.clone();
        next.step(time_factor);
        next
    }

    /// Advances every body by one tick of `time_factor`, in place.
    pub fn step(&mut self, time_factor: f64) {
        let strategy = self.strategy;

        self.star.spin(time_factor);

        // The satellite's position is relative to the primary, so the primary
        // must have moved first.
        self.primary.spin(time_factor);
        self.primary
            .advance_orbit(time_factor, strategy, &self.star.position());

        self.satellite.spin(time_factor);
        self.satellite
            .advance_orbit(time_factor, strategy, &self.primary.position());

        self.time += time_factor;
    }

    fn place_bodies(&mut self) {
        self.primary.place(&self.star.position());
        self.satellite.place(&self.primary.position());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::BodyInfo;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    fn info(name: &str, radius: f64, rotation_speed: f64) -> BodyInfo {
        BodyInfo {
            name: name.to_owned(),
            radius,
            rotation_speed,
        }
    }

    fn sample_state(strategy: RateStrategy) -> SimulationState {
        let star = CelestialBody::fixed(BodyRole::Star, info("Sun", 75.0, 0.01)).unwrap();
        let primary = CelestialBody::orbiting(
            BodyRole::Primary,
            info("Earth", 20.0, 0.02),
            300.0,
            0.0167,
            0.005,
            0.0,
        )
        .unwrap();
        let satellite = CelestialBody::orbiting(
            BodyRole::Satellite,
            info("Moon", 12.0, 0.03),
            75.0,
            0.0554,
            0.03,
            0.0,
        )
        .unwrap();
        SimulationState::new(star, primary, satellite, strategy).unwrap()
    }

    #[test]
    fn test_initial_placement() {
        let state = sample_state(RateStrategy::default());
        let primary_peri = 300.0 * (1.0 - 0.0167);
        let satellite_peri = 75.0 * (1.0 - 0.0554);
        assert_relative_eq!(state.primary().position().x, primary_peri, max_relative = 1e-14);
        assert_relative_eq!(
            state.satellite().position().x,
            primary_peri + satellite_peri,
            max_relative = 1e-14
        );
        assert_eq!(state.time(), 0.0);
    }

    #[test]
    fn test_satellite_follows_primary() {
        let mut state = sample_state(RateStrategy::default());
        for _ in 0..250 {
            state.step(0.16);
            let relative = state.satellite().position() - state.primary().position();
            assert_relative_eq!(relative.norm(), state.satellite().distance(), max_relative = 1e-12);
            assert_relative_eq!(
                state.primary().position().coords.norm(),
                state.primary().distance(),
                max_relative = 1e-12
            );
            // Everything stays in the orbital plane
            assert_eq!(state.satellite().position().y, 0.0);
        }
        assert_relative_eq!(state.time(), 250.0 * 0.16, max_relative = 1e-12);
    }

    #[test]
    fn test_advance_is_pure() {
        let state = sample_state(RateStrategy::default());
        let copy = state.clone();
        let next = state.advance(3.0);
        assert_eq!(state, copy);
        assert_ne!(next, state);

        let mut stepped = state.clone();
        stepped.step(3.0);
        assert_eq!(next, stepped);
    }

    #[test]
    fn test_first_tick_uses_periapsis_rate() {
        let state = sample_state(RateStrategy::PeriapsisNormalized).advance(2.0);
        // Factor is exactly 1 at periapsis, where both bodies start
        assert_relative_eq!(state.primary().orbit_angle(), 0.005 * 2.0, max_relative = 1e-15);
        assert_relative_eq!(state.satellite().orbit_angle(), 0.03 * 2.0, max_relative = 1e-15);
        assert_relative_eq!(state.star().rotation_angle(), 0.01 * 2.0, max_relative = 1e-15);
    }

    #[test]
    fn test_full_turns_return_to_start() {
        // Spin only depends on the time factor, so any split of a whole
        // number of turns must land back where it started.
        let mut state = sample_state(RateStrategy::default());
        let start = state.star().rotation_angle();
        let turns = 3.0;
        let total = turns * TAU / 0.01;
        let pieces = [0.1, 0.25, 0.05, 0.3, 0.3];
        for fraction in pieces {
            state.step(total * fraction);
        }
        let end = state.star().rotation_angle();
        let diff = crate::math::angle::angular_separation(start, end);
        assert!(diff < 1e-9, "ended {} away from the start", diff);
    }

    #[test]
    fn test_negative_time_reverses_increments() {
        let start = sample_state(RateStrategy::PeriapsisNormalized).advance(40.0);
        let forward = start.advance(1.5);
        let backward = start.advance(-1.5);

        for role in BodyRole::ALL {
            let d_fwd = crate::math::angle::signed_angle(
                forward.body(role).orbit_angle() - start.body(role).orbit_angle(),
            );
            let d_bwd = crate::math::angle::signed_angle(
                backward.body(role).orbit_angle() - start.body(role).orbit_angle(),
            );
            assert_relative_eq!(d_fwd, -d_bwd, epsilon = 1e-12);

            let r_fwd = crate::math::angle::signed_angle(
                forward.body(role).rotation_angle() - start.body(role).rotation_angle(),
            );
            let r_bwd = crate::math::angle::signed_angle(
                backward.body(role).rotation_angle() - start.body(role).rotation_angle(),
            );
            assert_relative_eq!(r_fwd, -r_bwd, epsilon = 1e-12);
        }
        assert!(backward.satellite().orbit_angle() != start.satellite().orbit_angle());
        assert_relative_eq!(backward.time(), 40.0 - 1.5);
    }

    #[test]
    fn test_angles_stay_wrapped() {
        let mut state = sample_state(RateStrategy::AngularMomentum);
        for i in 0..500 {
            let time_factor = if i % 3 == 0 { -7.0 } else { 11.0 };
            state.step(time_factor);
            for body in state.bodies() {
                assert!((0.0..TAU).contains(&body.orbit_angle()));
                assert!((0.0..TAU).contains(&body.rotation_angle()));
            }
        }
    }

    #[test]
    fn test_wrong_roles_rejected() {
        let star = CelestialBody::fixed(BodyRole::Star, info("Sun", 75.0, 0.01)).unwrap();
        let fixed_primary = CelestialBody::fixed(BodyRole::Primary, info("Earth", 20.0, 0.0)).unwrap();
        let satellite = CelestialBody::orbiting(
            BodyRole::Satellite,
            info("Moon", 12.0, 0.03),
            75.0,
            0.0,
            0.03,
            0.0,
        )
        .unwrap();
        assert_eq!(
            SimulationState::new(star, fixed_primary, satellite, RateStrategy::default()),
            Err(ModelError::InvalidRole {
                name: "Earth".to_owned(),
                role: BodyRole::Primary
            })
        );
    }
}
