//! Grazers is a tiny deterministic sandbox of plant eating animals.
//!
//! ## The World
//! The world is a flat rectangle, 800 by 600 units.
//! Scattered on it are plants, there are always up to 100 of them, whenever one gets eaten a
//! new one grows at a random place.
//!
//! In this world live herbivores. They only ever see one thing: where the closest plant is
//! relative to themselves. They also know how healthy they are.
//! From that they decide between three things: hop somewhere random, take a step towards the
//! plant, or do nothing new. Hopping and stepping cost one point of health,
//! eating a plant gives back 30. Hitting 0 is death.
//!
//! The decision is made by a brain, a very small neural network that is never trained.
//! Every once in a while a random herbivore gets a child, an exact copy, except that the
//! childs network weights and colour are slightly mutated.
//!
//! ## Deterministic
//! All randomness comes from one seeded rng owned by the world, the same seed always results
//! in the same simulation.
//!
//! # Hacking
//! [`world::World::tick`] is where everything happens, [`herbivore::Herbivore::step`] is
//! where a single herbivore thinks and moves.
//! Constants live in the [`config`] module.
//! The simulation knows nothing about windows or clocks, [`display::run`] connects it to
//! anything implementing [`display::Display`], the grazers-view crate has a piston window.

pub mod config;

pub mod error;

pub mod vecmath;

pub mod brains;

pub mod plant;

pub mod herbivore;

pub mod world;

pub mod display;

pub use brains::{Brain, Network};
pub use config::Config;
pub use display::{Display, Drawable, Event, run};
pub use error::ConfigError;
pub use world::World;
