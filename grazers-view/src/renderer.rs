use grazers::Drawable;
use opengl_graphics::GlGraphics;
use piston::input::RenderArgs;

pub struct Renderer {
    pub gl: GlGraphics,
    /// simulation size, everything is scaled from this to the window size
    pub canvas: [f64; 2],
}

impl Renderer {
    pub fn render(&mut self, frame: &[Drawable], args: &RenderArgs) {
        use graphics::*;

        const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

        let (width, height) = (args.window_size[0], args.window_size[1]);
        let scale_x = width / self.canvas[0];
        let scale_y = height / self.canvas[1];
        // keep circles round when the window is stretched
        let scale_r = scale_x.min(scale_y);

        let c = self.gl.draw_begin(args.viewport());
        let gl = &mut self.gl;
        clear(BLACK, gl);
        for d in frame {
            let (x, y) = (d.pos[0] * scale_x, d.pos[1] * scale_y);
            let rect = ellipse::circle(x, y, d.radius * scale_r);
            ellipse(rgba(d.color), rect, c.transform, gl);
        }
        self.gl.draw_end();
    }
}

fn rgba(c: [u8; 3]) -> [f32; 4] {
    [
        c[0] as f32 / 255.,
        c[1] as f32 / 255.,
        c[2] as f32 / 255.,
        1.,
    ]
}

#[test]
fn colour_range() {
    assert_eq!(rgba([0, 255, 0]), [0., 1., 0., 1.]);
    assert_eq!(rgba([255, 255, 255]), [1.; 4]);
}
