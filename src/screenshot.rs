//! PNG export of a framebuffer.

use std::path::Path;

use image::RgbaImage;
use log::info;

use crate::error::{Error, Result};
use crate::ppu::{FRAME_BYTES, NES_HEIGHT, NES_WIDTH};

/// Write a 256x240 RGBA8 framebuffer to `path`; the format follows the extension.
pub fn save_png<P: AsRef<Path>>(buffer: &[u8], path: P) -> Result<()> {
    if buffer.len() != FRAME_BYTES {
        return Err(Error::FrameSize(buffer.len()));
    }
    let image = RgbaImage::from_raw(NES_WIDTH as u32, NES_HEIGHT as u32, buffer.to_vec())
        .ok_or(Error::FrameSize(buffer.len()))?;
    image.save(path.as_ref())?;
    info!("screenshot written to {}", path.as_ref().display());
    Ok(())
}
