// Saves the presented frame as a PNG so a backdrop can be reused as a still.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{Rgb as Px, RgbImage};

use crate::error::Error;
use crate::types::{FrameBuffer, Rgb};

/// Convert the 0x00RRGGBB buffer into an RGB image.
pub fn to_image(fb: &FrameBuffer) -> RgbImage {
    RgbImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let Rgb(r, g, b) = Rgb::unpack(fb.pixels[y as usize * fb.width + x as usize]);
        Px([r, g, b])
    })
}

/// Write `fb` to `dir/backdrop-<unix seconds>.png`, creating `dir` if needed.
/// Returns the path written.
pub fn save_png(fb: &FrameBuffer, dir: &Path) -> Result<PathBuf, Error> {
    if fb.width == 0 || fb.height == 0 {
        return Err(Error::Snapshot("frame has no pixels".into()));
    }
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::Snapshot(format!("{}: {e}", dir.display())))?;

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = dir.join(format!("backdrop-{stamp}.png"));

    to_image(fb)
        .save(&path)
        .map_err(|e| Error::Snapshot(format!("{}: {e}", path.display())))?;
    log::info!("Saved snapshot to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_image_keeps_channels() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.pixels[1] = Rgb(217, 70, 239).packed();
        let img = to_image(&fb);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [217, 70, 239]);
    }

    #[test]
    fn test_empty_frame_rejected() {
        let fb = FrameBuffer::new(0, 0);
        assert!(matches!(save_png(&fb, Path::new("unused")), Err(Error::Snapshot(_))));
    }

    #[test]
    fn test_save_writes_png() {
        let dir = std::env::temp_dir().join(format!("backdrop-snapshot-{}", std::process::id()));
        let fb = FrameBuffer::new(4, 4);
        let path = save_png(&fb, &dir).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
