// Window + software drawing utilities.
// 1) `Surface`: what the particle field draws through.
// 2) `Canvas`: a CPU pixel buffer implementing it with alpha compositing.
// 3) `Drawer`: the minifb window that shows the canvas and reports input.

use crate::config::RenderingConfig;
use crate::error::Error;
use crate::gamma::GammaLut;
use crate::types::{FrameBuffer, Rgb, Rgba};
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

/// A 2D drawing target with straight-alpha compositing.
pub trait Surface {
    /// Current size in pixels. A zero extent means nothing can be drawn.
    fn size(&self) -> (usize, usize);
    /// Start a frame over an opaque background colour.
    fn clear(&mut self, background: Rgb);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba);
    /// 1-pixel line between two points.
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba);
    /// Called once after the last draw of a frame.
    fn flush(&mut self) {}
}

/// Pixel buffer the backdrop is rendered into before being presented.
///
/// Points and lines land on a transparent layer; `flush` composites that layer
/// over the background once, at `layer_opacity`, so overlaps build up the way
/// they would inside a single semi-transparent canvas.
pub struct Canvas {
    frame: FrameBuffer,
    background: Rgb,
    // premultiplied [r, g, b, a] in 0..1, linear light when `lut` is set
    layer: Vec<[f32; 4]>,
    layer_opacity: f32,
    lut: Option<GammaLut>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, rendering: &RenderingConfig) -> Self {
        Self {
            frame: FrameBuffer::new(width, height),
            background: Rgb(0, 0, 0),
            layer: vec![[0.0; 4]; width * height],
            layer_opacity: rendering.layer_opacity.clamp(0.0, 1.0),
            lut: rendering.linear_blending.then(GammaLut::new),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.frame.resize(width, height);
        self.layer.clear();
        self.layer.resize(width * height, [0.0; 4]);
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    #[inline]
    fn channel(&self, v: u8) -> f32 {
        match &self.lut {
            Some(lut) => lut.srgb_u8_to_linear(v),
            None => v as f32 / 255.0,
        }
    }

    /// Paint `color` over the layer pixel at (x,y) if it is inside bounds.
    #[inline]
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.frame.width || y >= self.frame.height {
            return;
        }
        let a = color.alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }

        let src = [self.channel(color.rgb.0), self.channel(color.rgb.1), self.channel(color.rgb.2)];
        let dst = &mut self.layer[y * self.frame.width + x];
        let keep = 1.0 - a;
        for c in 0..3 {
            dst[c] = src[c] * a + dst[c] * keep;
        }
        dst[3] = a + dst[3] * keep;
    }
}

/// Background channel under `premul` of layer colour covering `coverage`, in sRGB.
#[inline]
fn over_srgb(dst: u8, premul: f32, coverage: f32) -> u8 {
    ((dst as f32 / 255.0 * (1.0 - coverage) + premul) * 255.0).round().clamp(0.0, 255.0) as u8
}

impl Surface for Canvas {
    fn size(&self) -> (usize, usize) {
        (self.frame.width, self.frame.height)
    }

    fn clear(&mut self, background: Rgb) {
        self.background = background;
        self.layer.fill([0.0; 4]);
        self.frame.pixels.fill(background.packed());
    }

    /// Blend every pixel whose centre lies within `radius` of (cx,cy).
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;

        // Scan just the bounding box
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Bresenham between the rounded endpoints; every pixel is blended once.
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba) {
        let (mut x0, mut y0) = (from.0.round() as i32, from.1.round() as i32);
        let (x1, y1) = (to.0.round() as i32, to.1.round() as i32);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x0 += sx; }
            if e2 <= dx { err += dx; y0 += sy; }
        }
    }

    /// Composite the layer over the background into the frame buffer.
    fn flush(&mut self) {
        let op = self.layer_opacity;
        let bg = self.background;
        for (px, l) in self.frame.pixels.iter_mut().zip(&self.layer) {
            let coverage = l[3] * op;
            if coverage <= 0.0 {
                *px = bg.packed();
                continue;
            }
            let (r, g, b) = (l[0] * op, l[1] * op, l[2] * op);
            *px = match &self.lut {
                Some(lut) => Rgb(lut.over(bg.0, r, coverage), lut.over(bg.1, g, coverage), lut.over(bg.2, b, coverage)),
                None => Rgb(over_srgb(bg.0, r, coverage), over_srgb(bg.1, g, coverage), over_srgb(bg.2, b, coverage)),
            }
            .packed();
        }
    }
}

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Open a resizable window at the configured size and frame rate.
    pub fn new(title: &str, width: usize, height: usize, target_fps: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(target_fps);
        log::info!("Opened {width}x{height} window targeting {target_fps} fps");
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Pump window events without presenting (used while the viewport is empty).
    pub fn poll(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current client-area size; (0, 0) while minimized on some platforms.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Pointer position in window pixels, or None while it is outside the window.
    pub fn pointer(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn theme_toggle_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::T, KeyRepeat::No)
    }

    pub fn snapshot_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }
}
