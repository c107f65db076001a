//! A single confetti piece.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::config::FieldConfig;
use crate::palette::Palette;
use crate::prng::Xorshift64;
use crate::surface::{scoped, Surface};

/// One square piece of confetti.
///
/// Size, velocity, color and spin are fixed when the piece is spawned; only
/// position and angle change from frame to frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Center of the piece in surface pixels.
    pub position: DVec2,
    /// Displacement per frame.
    pub velocity: DVec2,
    /// Edge length in pixels.
    pub size: f64,
    pub color: Srgb,
    /// Rotation in radians.
    pub angle: f64,
    /// Rotation added per frame, in radians.
    pub spin: f64,
}

impl Particle {
    /// Spawns a piece at `position` with attributes drawn from `config`'s ranges.
    pub fn spawn(
        position: DVec2,
        config: &FieldConfig,
        palette: &Palette,
        rng: &mut Xorshift64,
    ) -> Self {
        let size = rng.next_range(config.size_min, config.size_max);
        let velocity = DVec2::new(
            rng.next_range(config.vx_min, config.vx_max),
            rng.next_range(config.vy_min, config.vy_max),
        );
        let color = palette.pick(rng);
        let angle = rng.next_angle();
        let spin = rng.next_range(-config.spin_max, config.spin_max);
        Self {
            position,
            velocity,
            size,
            color,
            angle,
            spin,
        }
    }

    /// Moves the piece one frame along its velocity and spins it.
    pub fn advance(&mut self) {
        self.position += self.velocity;
        self.angle += self.spin;
    }

    /// Puts the piece back just above the top edge at a random column.
    ///
    /// Keeps size, velocity, color and spin.
    pub fn respawn_above(&mut self, width: f64, rng: &mut Xorshift64) {
        self.position = DVec2::new(rng.next_range(0.0, width), -self.size);
    }

    /// Whether the piece has fallen past the bottom edge.
    pub fn is_below(&self, height: f64) -> bool {
        self.position.y > height
    }

    /// Draws the piece as a rotated square centered on its position.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        scoped(surface, |s| {
            s.translate(self.position.x, self.position.y);
            s.rotate(self.angle);
            let half = self.size / 2.0;
            s.fill_rect(-half, -half, self.size, self.size, self.color);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use std::f64::consts::TAU;

    fn piece() -> Particle {
        Particle {
            position: DVec2::new(100.0, 50.0),
            velocity: DVec2::new(-1.5, 4.0),
            size: 8.0,
            color: Srgb::from_hex("#a78bfa").unwrap(),
            angle: 1.0,
            spin: 0.02,
        }
    }

    #[test]
    fn spawn_draws_attributes_from_default_ranges() {
        let config = FieldConfig::default();
        let palette = Palette::confetti();
        let mut rng = Xorshift64::new(77);
        for _ in 0..2000 {
            let p = Particle::spawn(DVec2::ZERO, &config, &palette, &mut rng);
            assert!((4.0..12.0).contains(&p.size), "size {}", p.size);
            assert!((-2.0..2.0).contains(&p.velocity.x), "vx {}", p.velocity.x);
            assert!((2.0..7.0).contains(&p.velocity.y), "vy {}", p.velocity.y);
            assert!((0.0..TAU).contains(&p.angle), "angle {}", p.angle);
            assert!((-0.05..0.05).contains(&p.spin), "spin {}", p.spin);
            assert!(palette.colors().contains(&p.color));
        }
    }

    #[test]
    fn advance_moves_by_velocity_and_spins() {
        let mut p = piece();
        p.advance();
        assert_eq!(p.position, DVec2::new(98.5, 54.0));
        assert!((p.angle - 1.02).abs() < 1e-12);
    }

    #[test]
    fn respawn_above_places_piece_one_size_above_top() {
        let mut p = piece();
        let mut rng = Xorshift64::new(3);
        p.respawn_above(640.0, &mut rng);
        assert_eq!(p.position.y, -8.0);
        assert!((0.0..640.0).contains(&p.position.x));
        assert_eq!(p.velocity, DVec2::new(-1.5, 4.0));
    }

    #[test]
    fn is_below_is_strict() {
        let mut p = piece();
        p.position.y = 600.0;
        assert!(!p.is_below(600.0));
        p.position.y = 600.5;
        assert!(p.is_below(600.0));
    }

    #[test]
    fn draw_emits_scoped_centered_square() {
        let p = piece();
        let mut s = RecordingSurface::new(800.0, 600.0);
        p.draw(&mut s);
        assert_eq!(
            s.commands(),
            &[
                DrawCommand::Save,
                DrawCommand::Translate { x: 100.0, y: 50.0 },
                DrawCommand::Rotate { angle: 1.0 },
                DrawCommand::FillRect {
                    x: -4.0,
                    y: -4.0,
                    width: 8.0,
                    height: 8.0,
                    color: p.color,
                },
                DrawCommand::Restore,
            ]
        );
        assert_eq!(s.depth(), 0);
    }
}
