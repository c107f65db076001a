#![deny(unsafe_code)]
//! Core types for the confetti engine behind the birthday-greeting page.
//!
//! Provides the `ParticleField` falling-confetti simulation, the `Surface`
//! drawing seam, the cancelable `Animation` frame loop with its
//! `FrameScheduler` host trait, `Palette`/`Srgb` colors, the `Xorshift64`
//! PRNG, `FieldConfig` parameters, and greeting record helpers.

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod greeting;
pub mod palette;
pub mod params;
pub mod particle;
pub mod prng;
pub mod surface;

pub use animation::{Animation, FrameHandle, FrameScheduler};
pub use color::Srgb;
pub use config::FieldConfig;
pub use error::ConfettiError;
pub use field::ParticleField;
pub use palette::Palette;
pub use particle::Particle;
pub use prng::Xorshift64;
pub use surface::{DrawCommand, RecordingSurface, Surface};
