use crate::core::framebuffer::FrameBuffer;
use crate::error::{RenderError, Result};
use image::{ImageBuffer, Rgb};
use log::info;
use std::fs;
use std::path::Path;

/// Saves a packed 0xAARRGGBB buffer as an RGB image; alpha is dropped. The format follows the file extension.
pub fn save_buffer_to_image<P: AsRef<Path>>(
    buffer: &[u32],
    width: usize,
    height: usize,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let img_buf = ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        let packed = buffer
            .get(y as usize * width + x as usize)
            .copied()
            .unwrap_or(0);
        Rgb([(packed >> 16) as u8, (packed >> 8) as u8, packed as u8])
    });

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RenderError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    img_buf.save(path)?;
    info!("Saved {}x{} image to {:?}", width, height, path);
    Ok(())
}

pub fn save_framebuffer<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<()> {
    save_buffer_to_image(
        &framebuffer.to_packed(),
        framebuffer.width,
        framebuffer.height,
        path,
    )
}
