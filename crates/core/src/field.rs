//! The falling-confetti particle field.
//!
//! A [`ParticleField`] owns a fixed-size set of [`Particle`]s over a surface
//! of known size. Each frame the host calls [`tick`](ParticleField::tick)
//! then [`render`](ParticleField::render). Pieces that fall past the bottom
//! edge are recycled in place to just above the top, so the number of pieces
//! never changes for the lifetime of the field.

use glam::DVec2;
use tracing::{debug, trace};

use crate::config::FieldConfig;
use crate::error::ConfettiError;
use crate::particle::Particle;
use crate::prng::Xorshift64;
use crate::surface::Surface;

/// A fixed-size set of confetti pieces falling across a surface.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    rng: Xorshift64,
    frame: u64,
}

impl ParticleField {
    /// Creates the field for a `width` x `height` surface.
    ///
    /// Every piece starts at a uniformly random column in `[0, width)` and a
    /// uniformly random height in `[-height, 0)`, i.e. stacked above the
    /// visible area so they enter staggered rather than all at once.
    ///
    /// Returns `ConfettiError::InvalidDimensions` for a non-positive or
    /// non-finite size, or the config's validation error.
    pub fn start(
        config: &FieldConfig,
        width: f64,
        height: f64,
        seed: u64,
    ) -> Result<Self, ConfettiError> {
        check_dimensions(width, height)?;
        config.validate()?;
        let palette = config.palette()?;
        let mut rng = Xorshift64::new(seed);

        let particles = (0..config.particle_count)
            .map(|_| {
                let x = rng.next_range(0.0, width);
                let y = rng.next_range(-height, 0.0);
                Particle::spawn(DVec2::new(x, y), config, &palette, &mut rng)
            })
            .collect();

        debug!(
            count = config.particle_count,
            width, height, seed, "confetti field started"
        );

        Ok(Self {
            particles,
            width,
            height,
            rng,
            frame: 0,
        })
    }

    /// Advances every piece by one frame.
    ///
    /// A piece already below the bottom edge is recycled instead of moved:
    /// it goes to a random column at `y = -size`. Its angle still advances.
    /// So a piece seen below the bottom after one tick is above the top
    /// after the next.
    pub fn tick(&mut self) {
        let mut recycled = 0usize;
        for p in &mut self.particles {
            if p.is_below(self.height) {
                p.angle += p.spin;
                p.respawn_above(self.width, &mut self.rng);
                recycled += 1;
            } else {
                p.advance();
            }
        }
        self.frame += 1;
        trace!(frame = self.frame, recycled, "confetti tick");
    }

    /// Clears `surface` and draws every piece.
    ///
    /// Each piece is drawn inside its own save/restore scope. Rendering
    /// never touches particle state, so rendering twice without a tick in
    /// between produces the same draw calls.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for p in &self.particles {
            p.draw(surface);
        }
    }

    /// Updates the bounds used for recycling. Pieces are not moved.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ConfettiError> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the pieces. A slice, so the count cannot change.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of ticks since start.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

fn check_dimensions(width: f64, height: f64) -> Result<(), ConfettiError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(ConfettiError::InvalidDimensions)
    }
}
