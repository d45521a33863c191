//! A window to watch the grazers in.
//!
//! Runs the simulation at a fixed 60 ticks per second, closing the window (or escape) quits.
//! Space pauses.

use anyhow::anyhow;
use grazers::{Config, Display, Drawable, Event, Network, World};
use opengl_graphics::{GlGraphics, OpenGL};
use piston::event_loop::{EventLoop, EventSettings, Events};
use piston::input;
use piston::input::{ButtonEvent, RenderEvent, UpdateEvent};
use piston::window::WindowSettings;
use sdl2_window::Sdl2Window as Window;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod renderer;
use renderer::Renderer;

/// the piston side of the simulation loop.
/// updates become ticks, renders draw the last frame handed over.
struct Viewer {
    window: Window,
    events: Events,
    renderer: Renderer,
    frame: Vec<Drawable>,
    pause: bool,
}

impl Display for Viewer {
    fn next_event(&mut self) -> Event {
        while let Some(e) = self.events.next(&mut self.window) {
            if let Some(args) = e.button_args() {
                let space = input::Button::Keyboard(input::keyboard::Key::Space);
                if args.button == space && args.state == input::ButtonState::Release {
                    self.pause = !self.pause;
                    info!("pausing {}", self.pause);
                }
            }
            if let Some(args) = e.render_args() {
                self.renderer.render(&self.frame, &args);
            }
            if e.update_args().is_some() && !self.pause {
                return Event::Tick;
            }
        }
        // no more events, the window is gone
        Event::Quit
    }

    fn present(&mut self, frame: &[Drawable]) {
        self.frame.clear();
        self.frame.extend_from_slice(frame);
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::default();
    let mut world: World<Network> = World::new(config, 1234)?;

    // fixme: i don't want to manually be guessing opengl versions
    let opengl = OpenGL::V3_2;
    let size = [config.width as u32, config.height as u32];
    let window: Window = WindowSettings::new("grazers", size)
        .graphics_api(opengl)
        .exit_on_esc(true)
        .build()
        .map_err(|e| anyhow!("could not open a window: {}", e))?;

    // always running fixed step, the simulation has no notion of wall clock time
    let ticks_per_second = config.tick_rate as u64;
    let events = Events::new(
        EventSettings::new()
            .ups(ticks_per_second)
            .max_fps(ticks_per_second),
    );

    let mut viewer = Viewer {
        window,
        events,
        renderer: Renderer {
            gl: GlGraphics::new(opengl),
            canvas: [config.width, config.height],
        },
        frame: world.frame(),
        pause: false,
    };

    info!("starting with {} herbivores", world.agents().len());
    grazers::run(&mut world, &mut viewer);
    world.log_report();
    info!("goodbye!");
    Ok(())
}
