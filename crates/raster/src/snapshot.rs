//! PNG output of a [`PixelSurface`].
//!
//! Feature-gated behind `png` (default on) so the `image` crate stays out of
//! builds that only need the in-memory surface.

use confetti_core::error::ConfettiError;
use std::path::Path;

use crate::pixel::PixelSurface;

/// Writes the surface as an RGBA PNG, keeping transparency.
///
/// Returns `ConfettiError::InvalidDimensions` if a side does not fit in
/// `u32`, or `ConfettiError::Io` on write failure.
pub fn write_png(surface: &PixelSurface, path: &Path) -> Result<(), ConfettiError> {
    let w = u32::try_from(surface.width()).map_err(|_| ConfettiError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| ConfettiError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, surface.pixels().to_vec())
        .ok_or_else(|| ConfettiError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| ConfettiError::Io(e.to_string()))
}
