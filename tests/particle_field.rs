// End-to-end behaviour of the particle field through the public API.

use neural_backdrop::{
    Backdrop, FieldConfig, HostEvent, ParticleField, Point, Pointer, Rgb, Rgba, Surface, Theme,
    ThemeConfig,
};

/// Records draw calls instead of touching pixels.
#[derive(Default)]
struct Recorder {
    size: (usize, usize),
    clears: Vec<Rgb>,
    circles: Vec<(f32, f32, f32, Rgba)>,
    lines: Vec<((f32, f32), (f32, f32), Rgba)>,
    flushes: usize,
}

impl Recorder {
    fn new(width: usize, height: usize) -> Self {
        Self { size: (width, height), ..Default::default() }
    }
}

impl Surface for Recorder {
    fn size(&self) -> (usize, usize) {
        self.size
    }
    fn clear(&mut self, background: Rgb) {
        self.clears.push(background);
    }
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        self.circles.push((cx, cy, radius, color));
    }
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgba) {
        self.lines.push((from, to, color));
    }
    fn flush(&mut self) {
        self.flushes += 1;
    }
}

fn seeded(seed: u64) -> FieldConfig {
    FieldConfig { seed: Some(seed), ..FieldConfig::default() }
}

fn still(x: f32, y: f32) -> Point {
    Point { x, y, vx: 0.0, vy: 0.0, radius: 1.5 }
}

#[test]
fn test_fresh_field_moves_by_velocity() {
    let mut field = ParticleField::new(1000, 800, seeded(42));
    assert_eq!(field.points().len(), 60);
    assert!(field.points().iter().all(|p| p.x >= 0.0 && p.x < 1000.0 && p.y >= 0.0 && p.y < 800.0));

    let before = field.points().to_vec();
    field.advance(Pointer::SENTINEL);

    for (old, new) in before.iter().zip(field.points()) {
        assert_eq!(new.x, old.x + old.vx);
        assert_eq!(new.y, old.y + old.vy);
        // A flip only happens when the step crossed a wall
        let out_x = new.x < 0.0 || new.x > 1000.0;
        let out_y = new.y < 0.0 || new.y > 800.0;
        assert_eq!(new.vx, if out_x { -old.vx } else { old.vx });
        assert_eq!(new.vy, if out_y { -old.vy } else { old.vy });
    }
}

#[test]
fn test_interior_points_never_flip() {
    let pts = vec![
        Point { x: 300.0, y: 300.0, vx: 0.25, vy: -0.2, radius: 1.0 },
        Point { x: 700.0, y: 100.0, vx: -0.1, vy: 0.25, radius: 3.0 },
    ];
    let mut field = ParticleField::from_points(1000, 800, seeded(1), pts.clone());
    field.advance(Pointer::SENTINEL);
    for (old, new) in pts.iter().zip(field.points()) {
        assert_eq!((new.vx, new.vy), (old.vx, old.vy));
        assert_eq!((new.x, new.y), (old.x + old.vx, old.y + old.vy));
    }
}

#[test]
fn test_near_point_pulled_far_point_untouched() {
    let pointer = Pointer::at(500.0, 400.0);
    let mut field = ParticleField::from_points(
        1000,
        800,
        seeded(1),
        vec![still(500.0, 450.0), still(500.0, 700.0)],
    );
    field.advance(pointer);

    let near = field.points()[0];
    let far = field.points()[1];
    let near_moved = 50.0 - near.distance_to(pointer.x, pointer.y);
    let far_moved = 300.0 - far.distance_to(pointer.x, pointer.y);
    assert!(near_moved > 0.0);
    assert_eq!(far_moved, 0.0);
    assert!(near_moved > far_moved);
}

#[test]
fn test_pull_converges_without_reaching() {
    let pointer = Pointer::at(100.0, 100.0);
    let mut field = ParticleField::from_points(200, 200, seeded(1), vec![still(150.0, 100.0)]);
    let mut last = 50.0;
    for _ in 0..20 {
        field.advance(pointer);
        let d = field.points()[0].distance_to(pointer.x, pointer.y);
        assert!(d < last);
        assert!(d > 0.0);
        last = d;
    }
}

#[test]
fn test_boundary_pair_draws_no_line() {
    let field = ParticleField::from_points(500, 500, seeded(1), vec![still(100.0, 100.0), still(250.0, 100.0)]);
    assert_eq!(field.connections().count(), 0);

    let mut surface = Recorder::new(500, 500);
    field.render(&mut surface, ThemeConfig::default().dark);
    assert!(surface.lines.is_empty());
    assert_eq!(surface.circles.len(), 2);
}

#[test]
fn test_half_distance_pair_at_tenth_alpha() {
    let field = ParticleField::from_points(500, 500, seeded(1), vec![still(100.0, 100.0), still(175.0, 100.0)]);
    let mut surface = Recorder::new(500, 500);
    let palette = ThemeConfig::default().light;
    field.render(&mut surface, palette);

    assert_eq!(surface.lines.len(), 1);
    let (_, _, color) = surface.lines[0];
    assert_eq!(color.rgb, palette.accent);
    assert!((color.alpha - 0.1).abs() < 1e-6);
}

#[test]
fn test_render_order_and_colours() {
    let field = ParticleField::new(400, 300, seeded(9));
    let mut surface = Recorder::new(400, 300);
    let palette = ThemeConfig::default().dark;
    field.render(&mut surface, palette);

    assert_eq!(surface.clears, vec![palette.background]);
    assert_eq!(surface.circles.len(), 60);
    for (p, (cx, cy, r, color)) in field.points().iter().zip(&surface.circles) {
        assert_eq!((p.x, p.y, p.radius), (*cx, *cy, *r));
        assert_eq!(*color, palette.accent.with_alpha(0.5));
    }
    assert_eq!(surface.lines.len(), field.connections().count());
    assert_eq!(surface.flushes, 1);
}

#[test]
fn test_backdrop_session() {
    let mut backdrop = Backdrop::new(seeded(5), ThemeConfig::default(), Box::new(|| Theme::Light));
    let mut surface = Recorder::new(1000, 800);

    assert!(!backdrop.frame(&mut surface));
    assert!(surface.clears.is_empty());

    assert!(backdrop.start(Some((1000, 800))));
    assert!(backdrop.frame(&mut surface));
    assert_eq!(surface.clears, vec![ThemeConfig::default().light.background]);

    backdrop.handle(HostEvent::Resized { width: 640, height: 480 });
    assert_eq!(backdrop.field().map(|f| f.points().len()), Some(60));

    backdrop.stop();
    assert!(!backdrop.frame(&mut surface));
    assert_eq!(surface.clears.len(), 1);
}

#[test]
fn test_zero_sized_surface_skips_frame() {
    let mut backdrop = Backdrop::new(seeded(5), ThemeConfig::default(), Box::new(|| Theme::Dark));
    backdrop.start(Some((100, 100)));
    let before = backdrop.field().unwrap().points().to_vec();

    let mut surface = Recorder::new(0, 0);
    assert!(!backdrop.frame(&mut surface));
    assert_eq!(backdrop.field().unwrap().points(), before.as_slice());
}
