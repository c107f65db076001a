//! Software [`Surface`] over an RGBA8 pixel buffer.
//!
//! Mirrors the subset of canvas semantics confetti uses: a transparent
//! clear, a save/restore stack of affine transforms, and solid rectangle
//! fills in the current transform. A pixel is covered when its center maps
//! inside the rectangle, so there is no anti-aliasing.

use confetti_core::error::ConfettiError;
use confetti_core::{Srgb, Surface};
use glam::{DAffine2, DVec2};

/// Largest width or height a surface may have, in pixels.
pub const MAX_SIDE: usize = 16_384;

/// An RGBA8 image with a canvas-style transform stack.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    transform: DAffine2,
    stack: Vec<DAffine2>,
}

impl PixelSurface {
    /// Creates a fully transparent surface.
    ///
    /// Returns `ConfettiError::InvalidDimensions` if either side is zero or
    /// larger than [`MAX_SIDE`], or the buffer size overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfettiError> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            return Err(ConfettiError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(ConfettiError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
            transform: DAffine2::IDENTITY,
            stack: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGBA value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Current transform stack depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn put(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * 4;
        self.pixels[i..i + 4].copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.transform = self.transform * DAffine2::from_translation(DVec2::new(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        self.transform = self.transform * DAffine2::from_angle(angle);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Srgb) {
        if self.transform.matrix2.determinant() == 0.0 {
            return;
        }
        let (x0, x1) = (x.min(x + width), x.max(x + width));
        let (y0, y1) = (y.min(y + height), y.max(y + height));
        if x0 == x1 || y0 == y1 {
            return;
        }

        let corners = [
            DVec2::new(x0, y0),
            DVec2::new(x1, y0),
            DVec2::new(x1, y1),
            DVec2::new(x0, y1),
        ]
        .map(|c| self.transform.transform_point2(c));
        let lo = corners.iter().fold(DVec2::INFINITY, |m, c| m.min(*c));
        let hi = corners.iter().fold(DVec2::NEG_INFINITY, |m, c| m.max(*c));
        if !lo.is_finite() || !hi.is_finite() {
            return;
        }

        let clamp_x = |v: f64| v.clamp(0.0, self.width as f64) as usize;
        let clamp_y = |v: f64| v.clamp(0.0, self.height as f64) as usize;
        let (px0, px1) = (clamp_x(lo.x.floor()), clamp_x(hi.x.ceil()));
        let (py0, py1) = (clamp_y(lo.y.floor()), clamp_y(hi.y.ceil()));

        let inverse = self.transform.inverse();
        let rgb = color.to_rgb8();
        for py in py0..py1 {
            for px in px0..px1 {
                let local = inverse.transform_point2(DVec2::new(px as f64 + 0.5, py as f64 + 0.5));
                if local.x >= x0 && local.x < x1 && local.y >= y0 && local.y < y1 {
                    self.put(px, py, rgb);
                }
            }
        }
    }
}
