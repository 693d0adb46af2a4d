// Start/stop lifecycle around the particle field.
//
// `start` acquires the viewport, `stop` releases everything. Host events and
// frame callbacks that arrive while stopped do nothing, so a late resize or
// pointer move can never touch a stale surface.

use crate::config::FieldConfig;
use crate::draw::Surface;
use crate::field::ParticleField;
use crate::theme::{Theme, ThemeConfig};
use crate::types::Pointer;

/// Input delivered by the host window between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    PointerMoved { x: f32, y: f32 },
    Resized { width: usize, height: usize },
}

pub struct Backdrop {
    config: FieldConfig,
    themes: ThemeConfig,
    theme: Box<dyn Fn() -> Theme>,
    pointer: Pointer,
    field: Option<ParticleField>,
}

impl Backdrop {
    /// `theme` is read once per frame; the backdrop never subscribes to changes.
    pub fn new(config: FieldConfig, themes: ThemeConfig, theme: Box<dyn Fn() -> Theme>) -> Self {
        Self {
            config,
            themes,
            theme,
            pointer: Pointer::SENTINEL,
            field: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.field.is_some()
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Begin a session over `viewport`. With no usable surface the backdrop
    /// stays stopped and returns false.
    pub fn start(&mut self, viewport: Option<(usize, usize)>) -> bool {
        let Some((width, height)) = viewport.filter(|&(w, h)| w > 0 && h > 0) else {
            log::debug!("No drawing surface, backdrop stays idle");
            return false;
        };
        if self.field.is_some() {
            self.stop();
        }
        self.pointer = Pointer::SENTINEL;
        self.field = Some(ParticleField::new(width, height, self.config.clone()));
        log::info!("Backdrop started: {} points over {width}x{height}", self.config.point_count);
        true
    }

    /// End the session. Later events and frames are no-ops until the next `start`.
    pub fn stop(&mut self) {
        if self.field.take().is_some() {
            log::info!("Backdrop stopped");
        }
        self.pointer = Pointer::SENTINEL;
    }

    pub fn handle(&mut self, event: HostEvent) {
        let Some(field) = self.field.as_mut() else {
            log::trace!("Ignoring {event:?} while stopped");
            return;
        };
        match event {
            HostEvent::PointerMoved { x, y } => self.pointer = Pointer::at(x, y),
            HostEvent::Resized { width, height } => {
                if width == 0 || height == 0 {
                    log::debug!("Ignoring resize to {width}x{height}");
                    return;
                }
                field.reset(width, height);
                log::info!("Viewport resized to {width}x{height}, field regenerated");
            }
        }
    }

    /// Advance and draw one frame. Returns false without doing any work while
    /// stopped or when the surface has no area.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let Some(field) = self.field.as_mut() else {
            return false;
        };
        let (w, h) = surface.size();
        if w == 0 || h == 0 {
            return false;
        }
        let palette = self.themes.palette((self.theme)());
        field.step(surface, self.pointer, palette);
        true
    }
}
