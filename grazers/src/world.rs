use crate::brains::Brain;
use crate::config::Config;
use crate::display::Drawable;
use crate::error::ConfigError;
use crate::herbivore::Herbivore;
use crate::plant::Plant;
use crate::vecmath;
use crate::vecmath::Vector;
use rand::Rng;
use rand::SeedableRng;
use rand_distr::Normal;
use rand_pcg::Pcg64Mcg as DetRng;
use tracing::{debug, info};

/// owns everything that lives on the canvas, and the one rng all randomness is drawn from.
///
/// [`World::tick`] runs the steps in a fixed order:
/// replenish plants, let every herbivore think and move, resolve meals and deaths,
/// maybe spawn one child, then everyone alive gets a tick older.
#[derive(Clone, Debug)]
pub struct World<B: Brain> {
    config: Config,
    agents: Vec<Herbivore<B>>,
    plants: Vec<Plant>,
    rng: DetRng,
    noise: Normal<f64>,
    time: u64,
    births: usize,
    deaths: usize,
    eaten: usize,
    last_report: u64,
}

impl<B: Brain> World<B> {
    /// a world with `config.initial_agents` fresh herbivores and no plants yet,
    /// the first tick plants them.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        let mut world = Self::from_parts(config, seed, Vec::new(), Vec::new())?;
        for _ in 0..config.initial_agents {
            let agent = Herbivore::random(&mut world.rng, &world.config);
            world.agents.push(agent);
        }
        Ok(world)
    }

    /// a world with exactly the given inhabitants
    pub fn from_parts(
        config: Config,
        seed: u64,
        agents: Vec<Herbivore<B>>,
        plants: Vec<Plant>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let noise = Normal::new(0., config.mutation_std_dev)
            .map_err(|_| ConfigError::MutationStdDev(config.mutation_std_dev))?;
        Ok(Self {
            config,
            agents,
            plants,
            rng: DetRng::seed_from_u64(seed),
            noise,
            time: 0,
            births: 0,
            deaths: 0,
            eaten: 0,
            last_report: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn agents(&self) -> &[Herbivore<B>] {
        &self.agents
    }
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }
    pub fn time(&self) -> u64 {
        self.time
    }
    pub fn births(&self) -> usize {
        self.births
    }
    pub fn deaths(&self) -> usize {
        self.deaths
    }
    pub fn eaten(&self) -> usize {
        self.eaten
    }

    pub fn tick(&mut self) {
        self.time += 1;
        self.replenish_plants();

        for agent in self.agents.iter_mut() {
            let nearest = find_nearest(agent.pos, &self.plants);
            agent.step(&mut self.rng, nearest, &self.config);
        }

        self.resolve_health_and_collisions();
        self.reproduce();

        // children born this tick count it too
        for agent in self.agents.iter_mut() {
            agent.age += 1;
        }

        if self.time - self.last_report >= self.config.report_interval {
            self.log_report();
            self.last_report = self.time;
        }
    }

    /// tops the plants up to the cap, never above it
    pub fn replenish_plants(&mut self) {
        while self.plants.len() < self.config.max_plants {
            let plant = Plant::random(&mut self.rng, &self.config);
            self.plants.push(plant);
        }
    }

    /// living herbivores eat every plant they touch, then the dead are removed.
    ///
    /// a plant goes to the first herbivore (in list order) that touches it.
    /// herbivores that are already at or below 0 health don't get to eat anymore.
    pub fn resolve_health_and_collisions(&mut self) {
        // read-only pass, nothing is removed while scanning
        let mut eaten = vec![false; self.plants.len()];
        let mut meals = vec![0_usize; self.agents.len()];
        for (agent, count) in self.agents.iter().zip(meals.iter_mut()) {
            if agent.health <= 0. {
                continue;
            }
            for (plant, gone) in self.plants.iter().zip(eaten.iter_mut()) {
                if !*gone && agent.touches(plant) {
                    *gone = true;
                    *count += 1;
                }
            }
        }

        for (index, (agent, &count)) in self.agents.iter_mut().zip(&meals).enumerate() {
            for _ in 0..count {
                agent.health += self.config.eat_gain;
            }
            if count > 0 {
                debug!(index, meals = count, health = agent.health, "herbivore ate");
            }
        }
        self.eaten += meals.iter().sum::<usize>();

        let plants = std::mem::take(&mut self.plants);
        self.plants = plants
            .into_iter()
            .zip(eaten)
            .filter_map(|(plant, eaten)| (!eaten).then_some(plant))
            .collect();

        let before = self.agents.len();
        self.agents.retain(|agent| {
            // nan counts as dead too
            let alive = agent.health > 0.;
            if !alive {
                debug!(age = agent.age, generation = agent.generation, "herbivore starved");
            }
            alive
        });
        self.deaths += before - self.agents.len();
    }

    /// one roll per tick, on a hit a random herbivore gets a mutated child next to it.
    /// returns whether a child was born. an empty world never breeds.
    pub fn reproduce(&mut self) -> bool {
        if self.rng.random_range(0..=self.config.reproduction_roll) != 0 {
            return false;
        }
        if self.agents.is_empty() {
            return false;
        }
        let parent = self.rng.random_range(0..self.agents.len());
        let mut child = self.agents[parent].offspring(self.config.start_health);
        child.mutate(&mut self.rng, &self.noise, self.config.color_jitter);
        debug!(
            parent,
            generation = child.generation,
            color = ?child.color,
            "herbivore born"
        );
        self.agents.push(child);
        self.births += 1;
        true
    }

    /// everything to draw, plants first
    pub fn frame(&self) -> Vec<Drawable> {
        self.plants
            .iter()
            .map(Plant::drawable)
            .chain(self.agents.iter().map(Herbivore::drawable))
            .collect()
    }
}

/// the plant closest to pos, the first one wins on ties.
/// None if there are no plants at all.
pub fn find_nearest(pos: Vector, plants: &[Plant]) -> Option<&Plant> {
    plants
        .iter()
        .map(|p| (vecmath::dist(pos, p.pos), p))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_d, p)| p)
}

#[derive(Debug, PartialEq, Clone)]
pub struct Report {
    pub time: u64,
    pub agents: usize,
    pub plants: usize,
    pub oldest: u64,
    pub generation: usize,
    pub children: usize,
    pub mean_health: f64,
    pub births: usize,
    pub deaths: usize,
    pub eaten: usize,
}

impl<B: Brain> World<B> {
    /// None if nobody is alive
    pub fn report(&self) -> Option<Report> {
        if self.agents.is_empty() {
            return None;
        }
        let health: f64 = self.agents.iter().map(|a| a.health).sum();
        Report {
            time: self.time,
            agents: self.agents.len(),
            plants: self.plants.len(),
            oldest: self.agents.iter().map(|a| a.age).max().unwrap_or(0),
            generation: self.agents.iter().map(|a| a.generation).max().unwrap_or(0),
            children: self.agents.iter().map(|a| a.children).max().unwrap_or(0),
            mean_health: health / self.agents.len() as f64,
            births: self.births,
            deaths: self.deaths,
            eaten: self.eaten,
        }
        .into()
    }

    pub fn log_report(&self) {
        if let Some(r) = self.report() {
            info!(
                time = r.time,
                herbivores = r.agents,
                plants = r.plants,
                oldest = r.oldest,
                generation = r.generation,
                most_children = r.children,
                mean_health = r.mean_health,
                births = r.births,
                deaths = r.deaths,
                eaten = r.eaten,
                "report"
            );
        } else {
            info!(time = self.time, "no herbivores at all");
        }
    }
}

impl<B> PartialEq for World<B>
where
    B: Brain + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.agents == other.agents
            && self.plants == other.plants
            && self.time == other.time
            && self.births == other.births
            && self.deaths == other.deaths
            && self.eaten == other.eaten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brains::{Action, Network};
    use crate::herbivore::tests::Fixed;

    fn herbivore(pos: Vector, action: Action, config: &Config) -> Herbivore<Fixed> {
        Herbivore::new(pos, Fixed(action), config)
    }

    /// never breeds
    fn sterile() -> Config {
        Config {
            reproduction_roll: u32::MAX,
            ..Config::default()
        }
    }

    #[test]
    fn nearest_of_three() {
        let config = Config::default();
        let plants = [
            Plant::new([5., 0.], &config),
            Plant::new([0., -3.], &config),
            Plant::new([0., 9.], &config),
        ];
        let nearest = find_nearest([0., 0.], &plants).unwrap();
        assert_eq!(nearest.pos, [0., -3.]);
        assert_eq!(find_nearest([0., 0.], &[]), None);
    }

    #[test]
    fn nearest_tie_goes_to_first() {
        let config = Config::default();
        let plants = [
            Plant::new([4., 0.], &config),
            Plant::new([0., 4.], &config),
            Plant::new([-4., 0.], &config),
        ];
        assert_eq!(find_nearest([0., 0.], &plants).unwrap().pos, [4., 0.]);
    }

    #[test]
    fn empty_world_never_breeds() {
        let mut world = World::<Network>::from_parts(Config::default(), 3, vec![], vec![]).unwrap();
        for _ in 0..1000 {
            assert!(!world.reproduce());
        }
        assert!(world.agents().is_empty());
        assert_eq!(world.births(), 0);

        // ticking an empty world is fine too
        for _ in 0..100 {
            world.tick();
        }
        assert!(world.agents().is_empty());
        assert_eq!(world.report(), None);
    }

    #[test]
    fn replenish_fills_to_cap() {
        let config = Config::default();
        let mut world = World::<Network>::from_parts(config, 3, vec![], vec![]).unwrap();
        world.replenish_plants();
        assert_eq!(world.plants().len(), config.max_plants);
        for p in world.plants() {
            assert!(p.pos[0] >= 0. && p.pos[0] <= config.width);
            assert!(p.pos[1] >= 0. && p.pos[1] <= config.height);
        }

        let some = vec![Plant::new([1., 1.], &config); 40];
        let mut world = World::<Network>::from_parts(config, 3, vec![], some).unwrap();
        world.replenish_plants();
        assert_eq!(world.plants().len(), config.max_plants);

        let too_many = vec![Plant::new([1., 1.], &config); 150];
        let mut world = World::<Network>::from_parts(config, 3, vec![], too_many).unwrap();
        world.replenish_plants();
        assert_eq!(world.plants().len(), 150);
    }

    #[test]
    fn plant_is_eaten_once() {
        let config = Config::default();
        let agents = vec![
            herbivore([0., 0.], Action::Rest, &config),
            herbivore([1., 0.], Action::Rest, &config),
        ];
        let plants = vec![Plant::new([0.5, 0.], &config)];
        let mut world = World::from_parts(config, 1, agents, plants).unwrap();
        world.resolve_health_and_collisions();

        assert!(world.plants().is_empty());
        assert_eq!(world.eaten(), 1);
        assert_eq!(world.agents()[0].health, 130.);
        assert_eq!(world.agents()[1].health, 100.);
    }

    #[test]
    fn one_herbivore_many_plants() {
        let config = Config::default();
        let agents = vec![herbivore([50., 50.], Action::Rest, &config)];
        let plants = vec![
            Plant::new([50., 54.], &config),
            Plant::new([300., 300.], &config),
            Plant::new([46., 50.], &config),
        ];
        let mut world = World::from_parts(config, 1, agents, plants).unwrap();
        world.resolve_health_and_collisions();

        assert_eq!(world.agents()[0].health, 160.);
        assert_eq!(world.plants().len(), 1);
        assert_eq!(world.plants()[0].pos, [300., 300.]);
        assert_eq!(world.eaten(), 2);
    }

    #[test]
    fn the_dead_are_removed_and_dont_eat() {
        let config = Config::default();
        let mut starving = herbivore([0., 0.], Action::Rest, &config);
        starving.health = 0.;
        let mut gone = herbivore([100., 100.], Action::Rest, &config);
        gone.health = -3.;
        let fine = herbivore([200., 200.], Action::Rest, &config);
        let plants = vec![Plant::new([1., 0.], &config)];

        let mut world =
            World::from_parts(config, 1, vec![starving, gone, fine], plants).unwrap();
        world.resolve_health_and_collisions();

        assert_eq!(world.agents().len(), 1);
        assert_eq!(world.agents()[0].pos, [200., 200.]);
        assert_eq!(world.deaths(), 2);
        // nobody alive touched it
        assert_eq!(world.plants().len(), 1);
        assert_eq!(world.eaten(), 0);
    }

    #[test]
    fn last_step_kills_within_the_tick() {
        let config = sterile();
        let mut h = herbivore([0., 0.], Action::Wander, &config);
        h.health = 1.;
        let mut world = World::from_parts(config, 1, vec![h], vec![]).unwrap();
        world.tick();
        // wandering cost the last point of health
        assert!(world.agents().is_empty());
        assert_eq!(world.deaths(), 1);
    }

    #[test]
    fn forage_until_eaten() {
        let config = Config {
            max_plants: 1,
            ..sterile()
        };
        let agents = vec![herbivore([0., 0.], Action::Forage, &config)];
        let plants = vec![Plant::new([10., 0.], &config)];
        let mut world = World::from_parts(config, 42, agents, plants).unwrap();

        let mut ticks = 0;
        while !world.plants().is_empty() {
            world.tick();
            ticks += 1;
            assert!(ticks < 60, "never reached the plant");
            if !world.plants().is_empty() {
                assert_eq!(world.agents()[0].health, 100. - ticks as f64);
                assert_eq!(world.plants()[0].pos, [10., 0.]);
            }
        }
        // a third of a unit per tick, eaten once the hit circles (5 + 3) touch
        assert!(ticks == 6 || ticks == 7, "{}", ticks);
        let h = &world.agents()[0];
        assert_eq!(h.health, 100. - ticks as f64 + 30.);
        // thirds of a unit don't add up to exactly 2
        assert!(h.pos[0] > 2. - 1e-9 && h.pos[0] < 2.5, "{:?}", h.pos);
        assert!(vecmath::dist(h.pos, [10., 0.]) <= 8.);
        assert_eq!(h.pos[1], 0.);
        assert_eq!(world.eaten(), 1);

        world.tick();
        assert_eq!(world.plants().len(), 1);
        assert_eq!(world.eaten(), 1);
    }

    #[test]
    fn reproduction_rate() {
        let config = Config::default();
        let agents = vec![herbivore([0., 0.], Action::Rest, &config)];
        let mut world = World::from_parts(config, 77, agents, vec![]).unwrap();
        let rolls = 82_000;
        let births = (0..rolls).filter(|_| world.reproduce()).count();
        let expected = rolls as f64 / 41.;
        assert!(
            (births as f64 - expected).abs() < expected * 0.1,
            "{} births",
            births
        );
        assert_eq!(world.agents().len(), births + 1);
        assert_eq!(world.births(), births);
    }

    #[test]
    fn children_start_at_parent() {
        let config = Config::default();
        let agents = vec![herbivore([33., 44.], Action::Rest, &config)];
        let mut world = World::from_parts(config, 5, agents, vec![]).unwrap();
        while !world.reproduce() {}
        let child = &world.agents()[1];
        assert_eq!(child.pos, [33., 44.]);
        assert_eq!(child.health, config.start_health);
        assert_eq!(child.generation, 1);
        assert_eq!(world.agents()[0].children, 1);
    }

    #[test]
    fn newborns_age_in_their_first_tick() {
        let config = Config::default();
        let agents = vec![herbivore([300., 300.], Action::Rest, &config)];
        let mut world = World::from_parts(config, 5, agents, vec![]).unwrap();
        while world.births() == 0 {
            world.tick();
            assert!(world.time() < 10_000, "nobody was ever born");
        }
        let parent = &world.agents()[0];
        let child = &world.agents()[1];
        assert_eq!(child.generation, 1);
        assert_eq!(child.age, 1);
        assert_eq!(parent.age, world.time());
    }

    #[test]
    fn population_bookkeeping() {
        let config = Config::default();
        let mut world = World::<Network>::new(config, 99).unwrap();
        assert_eq!(world.agents().len(), config.initial_agents);
        for _ in 0..3000 {
            world.tick();
            assert!(world.plants().len() <= config.max_plants);
            assert!(world.agents().iter().all(|a| a.health > 0.));
            assert_eq!(
                world.agents().len() + world.deaths(),
                config.initial_agents + world.births()
            );
        }
        assert_eq!(world.time(), 3000);
    }

    #[test]
    fn determinism() {
        let mut world1 = World::<Network>::new(Config::default(), 1234).unwrap();
        let mut world2 = World::<Network>::new(Config::default(), 1234).unwrap();
        for i in 0..5_000 {
            world1.tick();
            world2.tick();
            assert_eq!(world1, world2, "diverged at tick {}", i);
        }

        let mut other = World::<Network>::new(Config::default(), 4321).unwrap();
        other.tick();
        let mut fresh = World::<Network>::new(Config::default(), 1234).unwrap();
        fresh.tick();
        assert_ne!(fresh, other);
    }

    #[test]
    fn broken_config_is_rejected() {
        let config = Config {
            tick_rate: 0.,
            ..Config::default()
        };
        assert!(World::<Network>::new(config, 1).is_err());
    }

    #[test]
    fn report_counts() {
        let config = sterile();
        let agents = vec![
            herbivore([0., 0.], Action::Rest, &config),
            herbivore([100., 0.], Action::Rest, &config),
        ];
        let mut world = World::from_parts(config, 1, agents, vec![]).unwrap();
        world.tick();
        let r = world.report().unwrap();
        assert_eq!(r.time, 1);
        assert_eq!(r.agents, 2);
        assert_eq!(r.oldest, 1);
        assert_eq!(r.generation, 0);
        assert_eq!(r.mean_health, 100. + 30. * r.eaten as f64 / 2.);
    }
}
