// Neural Backdrop
//
// An ambient animated backdrop: drifting points joined by faint lines,
// pulled gently toward the pointer, rendered in software.

pub mod backdrop;
pub mod config;
pub mod draw;
pub mod error;
pub mod field;
pub mod gamma;
pub mod snapshot;
pub mod theme;
pub mod types;

pub use backdrop::{Backdrop, HostEvent};
pub use config::{AppConfig, FieldConfig};
pub use draw::{Canvas, Drawer, Surface};
pub use error::Error;
pub use field::{ParticleField, connection_alpha};
pub use theme::{Palette, Theme, ThemeConfig};
pub use types::{Connection, FrameBuffer, Point, Pointer, Rgb, Rgba};
