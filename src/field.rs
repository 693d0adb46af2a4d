// The particle field: a fixed set of drifting points, pulled weakly toward the
// pointer and joined by faint lines when close.
//
// Velocities are in pixels per frame. There is no timestep, so apparent speed
// follows the host's refresh rate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FieldConfig;
use crate::draw::Surface;
use crate::theme::Palette;
use crate::types::{Connection, Point, Pointer};

/// Alpha of a line between two points `distance` apart.
///
/// Falls off linearly from `cap` at distance 0 to exactly 0 at `threshold`,
/// and stays 0 beyond it.
pub fn connection_alpha(distance: f32, threshold: f32, cap: f32) -> f32 {
    if threshold <= 0.0 || distance >= threshold {
        return 0.0;
    }
    (1.0 - distance / threshold) * cap
}

pub struct ParticleField {
    config: FieldConfig,
    width: f32,
    height: f32,
    points: Vec<Point>,
    rng: StdRng,
}

impl ParticleField {
    /// Create a field for a `width` x `height` viewport with `config.point_count` points.
    pub fn new(width: usize, height: usize, config: FieldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut field = Self {
            config,
            width: 0.0,
            height: 0.0,
            points: Vec::new(),
            rng,
        };
        field.reset(width, height);
        field
    }

    /// Build a field around an explicit point set. The session's point count
    /// becomes `points.len()`; a later `reset` regenerates that many points.
    pub fn from_points(width: usize, height: usize, mut config: FieldConfig, points: Vec<Point>) -> Self {
        config.point_count = points.len();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            width: width as f32,
            height: height as f32,
            points,
            rng,
        }
    }

    /// Discard every point and scatter a fresh set over the new viewport.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width as f32;
        self.height = height as f32;

        let count = self.config.point_count;
        let speed = self.config.max_speed.abs();
        let (r_lo, r_hi) = ordered(self.config.min_radius, self.config.max_radius);

        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            let x = sample_extent(&mut self.rng, self.width);
            let y = sample_extent(&mut self.rng, self.height);
            points.push(Point {
                x,
                y,
                vx: self.rng.random_range(-speed..=speed),
                vy: self.rng.random_range(-speed..=speed),
                radius: self.rng.random_range(r_lo..=r_hi),
            });
        }
        self.points = points;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Move every point one frame: drift, bounce off the walls, then get
    /// pulled toward the pointer if it is close enough.
    pub fn advance(&mut self, pointer: Pointer) {
        let (w, h) = (self.width, self.height);
        let reach = self.config.pointer_radius;
        let strength = self.config.pointer_strength;

        for p in &mut self.points {
            p.x += p.vx;
            p.y += p.vy;

            // No clamping: an overshoot comes back once the velocity has flipped
            if p.x < 0.0 || p.x > w { p.vx = -p.vx; }
            if p.y < 0.0 || p.y > h { p.vy = -p.vy; }

            let dx = pointer.x - p.x;
            let dy = pointer.y - p.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < reach {
                p.x += dx * strength;
                p.y += dy * strength;
            }
        }
    }

    /// Every unordered pair closer than the connection distance.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let threshold = self.config.connection_distance;
        let cap = self.config.connection_alpha;
        let pts = &self.points;

        (0..pts.len()).flat_map(move |a| {
            ((a + 1)..pts.len()).filter_map(move |b| {
                let distance = pts[a].distance_to(pts[b].x, pts[b].y);
                if distance < threshold {
                    Some(Connection { a, b, distance, alpha: connection_alpha(distance, threshold, cap) })
                } else {
                    None
                }
            })
        })
    }

    /// Clear the surface, draw points, then the lines between them, then flush.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, palette: Palette) {
        surface.clear(palette.background);

        let dot = palette.accent.with_alpha(self.config.point_alpha);
        for p in &self.points {
            surface.fill_circle(p.x, p.y, p.radius, dot);
        }

        for c in self.connections() {
            let (a, b) = (self.points[c.a], self.points[c.b]);
            surface.stroke_line((a.x, a.y), (b.x, b.y), palette.accent.with_alpha(c.alpha));
        }
        surface.flush();
    }

    /// Advance one frame and draw the result.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S, pointer: Pointer, palette: Palette) {
        self.advance(pointer);
        self.render(surface, palette);
    }
}

fn sample_extent(rng: &mut StdRng, extent: f32) -> f32 {
    if extent > 0.0 { rng.random_range(0.0..extent) } else { 0.0 }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}
