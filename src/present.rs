//! SDL2 texture upload
//!
//! Canvas bytes are already row-major R, G, B, A, so they go to a streaming
//! `RGBA32` texture unchanged with a pitch of `width * 4`.

use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Texture, TextureCreator};

use crate::canvas::Canvas;

/// Create a streaming texture sized to `canvas` and upload its pixels
pub fn create_texture<'a, T>(
    creator: &'a TextureCreator<T>,
    canvas: &Canvas,
) -> Result<Texture<'a>, String> {
    let mut texture = creator
        .create_texture_streaming(PixelFormatEnum::RGBA32, canvas.width(), canvas.height())
        .map_err(|e| e.to_string())?;
    upload(&mut texture, canvas)?;
    Ok(texture)
}

/// Copy the canvas into an existing texture of the same size
pub fn upload(texture: &mut Texture, canvas: &Canvas) -> Result<(), String> {
    let query = texture.query();
    if query.width != canvas.width() || query.height != canvas.height() {
        return Err(format!(
            "texture is {}x{}, canvas is {}x{}",
            query.width,
            query.height,
            canvas.width(),
            canvas.height()
        ));
    }

    texture
        .update(None, &canvas.to_rgba_bytes(), canvas.width() as usize * 4)
        .map_err(|e| e.to_string())
}
