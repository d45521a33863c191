use crate::brains::{Action, Brain, Inputs};
use crate::config::Config;
use crate::display::Drawable;
use crate::plant::Plant;
use crate::vecmath;
use crate::vecmath::Vector;
use rand::Rng;
use rand_distr::Normal;

/// a plant eater.
///
/// Each tick it asks its brain whether to wander off, walk towards the nearest plant or do
/// nothing new. Choosing something new costs health and sets a fresh target, the herbivore
/// then glides towards it over [`Config::glide_ticks`] ticks.
#[derive(Clone, PartialEq, Debug)]
pub struct Herbivore<B: Brain> {
    pub pos: Vector,
    pub radius: f64,
    pub color: [u8; 3],
    pub speed: f64,
    /// no upper bound, can dip below 0 until the world removes the herbivore
    pub health: f64,
    /// where the current glide ends
    pub target: Vector,
    /// how far the current glide is, 0..=1
    pub progress: f64,
    /// ticks lived
    pub age: u64,
    pub generation: usize,
    pub children: usize,
    pub brain: B,
}

impl<B: Brain> Herbivore<B> {
    pub fn new(pos: Vector, brain: B, config: &Config) -> Self {
        Self {
            pos,
            radius: config.agent_radius,
            color: config.agent_color,
            speed: config.agent_speed,
            health: config.start_health,
            target: pos,
            progress: 0.,
            age: 0,
            generation: 0,
            children: 0,
            brain,
        }
    }

    /// a fresh herbivore with a fresh brain somewhere on the canvas
    pub fn random<R: Rng>(mut rng: R, config: &Config) -> Self {
        let x = rng.random_range(0..=config.width as u32);
        let y = rng.random_range(0..=config.height as u32);
        let brain = B::init(&mut rng);
        Self::new([x as f64, y as f64], brain, config)
    }

    /// think, act and move.
    ///
    /// returns the action taken.
    /// without a plant to look at there is nothing to think about, the whole step is skipped
    /// and None is returned.
    pub fn step<R: Rng>(
        &mut self,
        mut rng: R,
        nearest: Option<&Plant>,
        config: &Config,
    ) -> Option<Action> {
        let plant = nearest?;
        let to_plant = vecmath::sub(plant.pos, self.pos);

        let mut inputs: Inputs = Default::default();
        *inputs.dx_mut() = to_plant[0];
        *inputs.dy_mut() = to_plant[1];
        *inputs.health_mut() = self.health;

        let action = self.brain.think(&inputs).choose(&mut rng);
        match action {
            Action::Wander => {
                let reach = self.speed.abs().round() as i64;
                let offset = [
                    rng.random_range(-reach..=reach) as f64,
                    rng.random_range(-reach..=reach) as f64,
                ];
                self.retarget(vecmath::add(self.pos, offset), config.move_cost);
            }
            Action::Forage => {
                // standing right on top of it, there is no direction to go
                if let Some(dir) = vecmath::norm(to_plant) {
                    let target = vecmath::add(self.pos, vecmath::scale(dir, self.speed));
                    self.retarget(target, config.move_cost);
                }
            }
            Action::Rest => (),
        }

        self.glide(config.glide_ticks());
        Some(action)
    }

    fn retarget(&mut self, target: Vector, cost: f64) {
        self.target = target;
        self.progress = 0.;
        self.health -= cost;
    }

    /// moves a bit further towards the target, if not already there.
    /// glides started on earlier ticks keep going even if nothing new was chosen
    pub fn glide(&mut self, glide_ticks: f64) {
        if self.progress < 1. {
            // clamped so the last step lands exactly on the target
            self.progress = (self.progress + 1. / glide_ticks).min(1.);
            self.pos = vecmath::lerp(self.pos, self.target, self.progress);
        }
    }

    /// hit circles touch or overlap
    pub fn touches(&self, plant: &Plant) -> bool {
        vecmath::dist(self.pos, plant.pos) <= self.radius + plant.radius
    }

    /// unmutated child at the same spot, sharing nothing with the parent.
    #[must_use]
    pub fn offspring(&mut self, start_health: f64) -> Self {
        self.children += 1;
        Self {
            pos: self.pos,
            radius: self.radius,
            color: self.color,
            speed: self.speed,
            health: start_health,
            target: self.pos,
            progress: 0.,
            age: 0,
            generation: self.generation + 1,
            children: 0,
            brain: self.brain.clone(),
        }
    }

    /// perturbs the brain and drifts each colour channel by up to `jitter`
    pub fn mutate<R: Rng>(&mut self, mut rng: R, noise: &Normal<f64>, jitter: i16) {
        self.brain.mutate(&mut rng, noise);
        let jitter = i32::from(jitter);
        for c in self.color.iter_mut() {
            let drifted = i32::from(*c) + rng.random_range(-jitter..=jitter);
            *c = drifted.clamp(0, 255) as u8;
        }
    }

    pub fn drawable(&self) -> Drawable {
        Drawable {
            pos: self.pos,
            radius: self.radius,
            color: self.color,
        }
    }
}
