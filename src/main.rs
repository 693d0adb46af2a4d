// What you SEE:
// • Drifting points joined by faint lines; points near the cursor drift toward it.
// • Resizing the window scatters a fresh set of points over the new area.
// • T toggles dark/light theme. S saves a PNG snapshot. ESC quits.

use neural_backdrop::snapshot;
use neural_backdrop::{AppConfig, Backdrop, Canvas, Drawer, Error, HostEvent};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let mut drawer = Drawer::new(
        &config.window.title,
        config.window.width,
        config.window.height,
        config.window.target_fps,
    )?;

    let (w, h) = drawer.size();
    let mut canvas = Canvas::new(w, h, &config.rendering);

    // Shared with the backdrop, which reads it once per frame
    let theme = Rc::new(Cell::new(config.theme.initial));
    let theme_reader = Rc::clone(&theme);
    let mut backdrop = Backdrop::new(
        config.field.clone(),
        config.theme.clone(),
        Box::new(move || theme_reader.get()),
    );
    backdrop.start(Some((w, h)));

    let mut last_size = (w, h);
    let mut last_pointer: Option<(f32, f32)> = None;
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Host events: size and pointer changes since the last frame */
        let size = drawer.size();
        if size != last_size {
            last_size = size;
            canvas.resize(size.0, size.1);
            if backdrop.is_running() {
                backdrop.handle(HostEvent::Resized { width: size.0, height: size.1 });
            } else {
                backdrop.start(Some(size));
            }
        }

        let pointer = drawer.pointer();
        // Leaving the window keeps the last position, like a page without mousemove
        if let (Some((x, y)), true) = (pointer, pointer != last_pointer) {
            backdrop.handle(HostEvent::PointerMoved { x, y });
        }
        last_pointer = pointer;

        /* 2) Keys */
        if drawer.theme_toggle_pressed() {
            theme.set(theme.get().toggled());
            log::info!("Theme: {:?}", theme.get());
        }

        /* 3) Frame: nothing to draw into while the window has no area */
        if !backdrop.frame(&mut canvas) {
            drawer.poll();
            continue;
        }

        if drawer.snapshot_pressed() {
            if let Err(e) = snapshot::save_png(canvas.frame(), &config.snapshot.directory) {
                log::warn!("{e}");
            }
        }

        /* 4) Present */
        drawer.present(canvas.frame())?;

        /* 5) FPS, once per second */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    backdrop.stop();
    Ok(())
}
