use crate::config::Config;
use crate::display::Drawable;
use crate::vecmath::Vector;
use rand::Rng;

/// food. does nothing but wait to be eaten
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Plant {
    pub pos: Vector,
    pub radius: f64,
    pub color: [u8; 3],
}

impl Plant {
    pub fn new(pos: Vector, config: &Config) -> Self {
        Self {
            pos,
            radius: config.plant_radius,
            color: config.plant_color,
        }
    }

    /// somewhere on the canvas, edges included, whole-number coordinates
    pub fn random<R: Rng>(mut rng: R, config: &Config) -> Self {
        let x = rng.random_range(0..=config.width as u32);
        let y = rng.random_range(0..=config.height as u32);
        Self::new([x as f64, y as f64], config)
    }

    pub fn drawable(&self) -> Drawable {
        Drawable {
            pos: self.pos,
            radius: self.radius,
            color: self.color,
        }
    }
}
