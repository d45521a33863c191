use crate::error::ConfigError;

pub const SIM_WIDTH: f64 = 800.;
pub const SIM_HEIGHT: f64 = 600.;

pub const INITIAL_AGENTS: usize = 5;
pub const MAX_PLANTS: usize = 100;

pub const TICK_RATE: f64 = 60.;
/// how long a glide towards a freshly chosen target takes
pub const GLIDE_SECONDS: f64 = 1.;

/// only outcome 0 of a roll in 0..=REPRODUCTION_ROLL spawns a child
pub const REPRODUCTION_ROLL: u32 = 40;

/// print a report every this many ticks
pub const REPORT_INTERVAL: u64 = 600;

/// herbivore constants
pub mod h {
    pub const RADIUS: f64 = 5.;
    pub const SPEED: f64 = 20.;
    pub const START_HEALTH: f64 = 100.;
    pub const EAT_GAIN: f64 = 30.;
    pub const MOVE_COST: f64 = 1.;
    pub const COLOR: [u8; 3] = [155, 40, 155];

    pub const MUTATION_STD_DEV: f64 = 0.1;
    /// each colour channel drifts by up to this much per generation
    pub const COLOR_JITTER: i16 = 10;
}

/// plant constants
pub mod p {
    pub const RADIUS: f64 = 3.;
    pub const COLOR: [u8; 3] = [0, 255, 0];
}

/// Everything a [`World`](crate::world::World) needs to know about its surroundings.
///
/// Defaults to the constants above, tests tweak single fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub width: f64,
    pub height: f64,
    pub initial_agents: usize,
    pub max_plants: usize,
    pub tick_rate: f64,
    pub glide_seconds: f64,
    pub reproduction_roll: u32,
    pub report_interval: u64,

    pub agent_radius: f64,
    pub agent_speed: f64,
    pub start_health: f64,
    pub eat_gain: f64,
    pub move_cost: f64,
    pub agent_color: [u8; 3],
    pub mutation_std_dev: f64,
    pub color_jitter: i16,

    pub plant_radius: f64,
    pub plant_color: [u8; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: SIM_WIDTH,
            height: SIM_HEIGHT,
            initial_agents: INITIAL_AGENTS,
            max_plants: MAX_PLANTS,
            tick_rate: TICK_RATE,
            glide_seconds: GLIDE_SECONDS,
            reproduction_roll: REPRODUCTION_ROLL,
            report_interval: REPORT_INTERVAL,

            agent_radius: h::RADIUS,
            agent_speed: h::SPEED,
            start_health: h::START_HEALTH,
            eat_gain: h::EAT_GAIN,
            move_cost: h::MOVE_COST,
            agent_color: h::COLOR,
            mutation_std_dev: h::MUTATION_STD_DEV,
            color_jitter: h::COLOR_JITTER,

            plant_radius: p::RADIUS,
            plant_color: p::COLOR,
        }
    }
}

impl Config {
    /// number of ticks a full glide takes
    pub fn glide_ticks(&self) -> f64 {
        self.glide_seconds * self.tick_rate
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("tick_rate", self.tick_rate),
            ("glide_seconds", self.glide_seconds),
            ("agent_radius", self.agent_radius),
            ("plant_radius", self.plant_radius),
        ];
        for (name, value) in positive {
            // also catches NaN
            if !(value > 0.) || !value.is_finite() {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !self.agent_speed.is_finite() || self.agent_speed < 0. {
            return Err(ConfigError::Speed(self.agent_speed));
        }
        if !self.mutation_std_dev.is_finite() || self.mutation_std_dev < 0. {
            return Err(ConfigError::MutationStdDev(self.mutation_std_dev));
        }
        if !(0..=255).contains(&self.color_jitter) {
            return Err(ConfigError::ColorJitter(self.color_jitter));
        }
        Ok(())
    }
}

#[test]
fn default_is_valid() {
    assert_eq!(Config::default().validate(), Ok(()));
}

#[test]
fn glide_takes_one_second_of_ticks() {
    assert_eq!(Config::default().glide_ticks(), 60.);
}

#[test]
fn rejects_broken_canvas() {
    let mut c = Config::default();
    c.width = 0.;
    assert_eq!(
        c.validate(),
        Err(ConfigError::NotPositive {
            name: "width",
            value: 0.
        })
    );
    c.width = f64::NAN;
    assert!(c.validate().is_err());
}

#[test]
fn rejects_negative_noise() {
    let c = Config {
        mutation_std_dev: -0.1,
        ..Config::default()
    };
    assert_eq!(c.validate(), Err(ConfigError::MutationStdDev(-0.1)));
}

#[test]
fn rejects_jitter_beyond_a_channel() {
    for jitter in [-1, 256, i16::MAX] {
        let c = Config {
            color_jitter: jitter,
            ..Config::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ColorJitter(jitter)));
    }
    let c = Config {
        color_jitter: 255,
        ..Config::default()
    };
    assert_eq!(c.validate(), Ok(()));
}
