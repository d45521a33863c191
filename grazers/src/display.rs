//! the boundary to whatever shows the simulation and decides when time passes.
//!
//! The simulation itself has no idea about windows or wall clocks, it gets told when a tick is
//! due, and after each tick it hands over a list of circles to draw.

use crate::brains::Brain;
use crate::vecmath::Vector;
use crate::world::World;

/// a filled circle in canvas coordinates
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Drawable {
    pub pos: Vector,
    pub radius: f64,
    pub color: [u8; 3],
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    /// time to advance the world by one step
    Tick,
    /// the user closed the window or similar, stop running
    Quit,
}

/// the display/clock collaborator
pub trait Display {
    /// blocks until something happens
    fn next_event(&mut self) -> Event;
    /// plants first, then herbivores
    fn present(&mut self, frame: &[Drawable]);
}

/// ticks the world once per [`Event::Tick`] and presents the result, until [`Event::Quit`].
/// returns how many ticks were run.
pub fn run<B, D>(world: &mut World<B>, display: &mut D) -> u64
where
    B: Brain,
    D: Display,
{
    let mut ticks = 0;
    while let Event::Tick = display.next_event() {
        world.tick();
        display.present(&world.frame());
        ticks += 1;
    }
    tracing::info!("quit after {} ticks", ticks);
    ticks
}
