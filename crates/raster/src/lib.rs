#![deny(unsafe_code)]
//! Offscreen rendering for the confetti engine.
//!
//! [`PixelSurface`] implements the core `Surface` trait in software so a
//! seeded session can be run headless and inspected or saved. Both the CLI
//! and tests use [`render_session`] rather than wiring field and surface
//! together themselves.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use confetti_core::error::ConfettiError;
use confetti_core::{FieldConfig, ParticleField};

pub use pixel::PixelSurface;

/// Runs a seeded field for `frames` ticks and renders the final frame.
pub fn render_session(
    config: &FieldConfig,
    width: usize,
    height: usize,
    seed: u64,
    frames: usize,
) -> Result<(ParticleField, PixelSurface), ConfettiError> {
    let mut surface = PixelSurface::new(width, height)?;
    let mut field = ParticleField::start(config, width as f64, height as f64, seed)?;
    for _ in 0..frames {
        field.tick();
    }
    field.render(&mut surface);
    Ok((field, surface))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_frame_is_empty_because_pieces_start_above() {
        let (_, surface) = render_session(&FieldConfig::default(), 200, 100, 42, 0).unwrap();
        // A piece centered at y < 0 can still poke its corner into row 0,
        // but nothing reaches the lower half yet.
        for y in 50..100 {
            for x in 0..200 {
                assert_eq!(surface.pixel(x, y).unwrap()[3], 0, "({x}, {y}) drawn");
            }
        }
    }

    #[test]
    fn pieces_are_visible_after_falling() {
        let (field, surface) = render_session(&FieldConfig::default(), 200, 100, 42, 60).unwrap();
        assert_eq!(field.frame(), 60);
        assert!(surface.covered() > 0);
    }

    #[test]
    fn same_seed_same_pixels() {
        let config = FieldConfig::from_json(&json!({"particle_count": 30}));
        let (_, a) = render_session(&config, 64, 64, 7, 25).unwrap();
        let (_, b) = render_session(&config, 64, 64, 7, 25).unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            render_session(&FieldConfig::default(), 0, 10, 1, 1),
            Err(ConfettiError::InvalidDimensions)
        ));
    }

    #[test]
    fn drawn_colors_come_from_the_palette() {
        let config = FieldConfig::from_json(&json!({"palette": "mono"}));
        let (_, surface) = render_session(&config, 120, 120, 3, 40).unwrap();
        let allowed: Vec<[u8; 3]> = config
            .palette()
            .unwrap()
            .colors()
            .iter()
            .map(|c| c.to_rgb8())
            .collect();
        for px in surface.pixels().chunks_exact(4).filter(|px| px[3] != 0) {
            assert!(allowed.contains(&[px[0], px[1], px[2]]), "unexpected color {px:?}");
        }
    }
}
