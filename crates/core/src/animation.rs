//! Cancelable frame loop driving a [`ParticleField`] onto a [`Surface`].
//!
//! The host owns the clock. [`Animation`] asks a [`FrameScheduler`] for one
//! callback at a time (`requestAnimationFrame` in a browser), and the host
//! calls [`Animation::on_frame`] when it fires. Each delivered frame runs
//! exactly one tick followed by one render, then registers the next frame.
//!
//! [`Animation::stop`] revokes the pending registration before returning, so
//! once it returns no further frame touches the surface.

use tracing::{debug, warn};

use crate::config::FieldConfig;
use crate::error::ConfettiError;
use crate::field::ParticleField;
use crate::surface::Surface;

/// Identifier of one pending frame callback, as issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host-side per-frame callback registration.
pub trait FrameScheduler {
    /// Registers one callback for the next display refresh.
    fn request_frame(&mut self) -> Result<FrameHandle, ConfettiError>;

    /// Revokes a registration made by [`request_frame`](Self::request_frame).
    fn cancel_frame(&mut self, handle: FrameHandle);
}

struct Session<S> {
    field: ParticleField,
    surface: S,
}

/// A confetti animation bound to one host scheduler.
///
/// At most one frame is pending at any time.
pub struct Animation<S, F: FrameScheduler> {
    config: FieldConfig,
    seed: u64,
    scheduler: F,
    session: Option<Session<S>>,
    pending: Option<FrameHandle>,
}

impl<S: Surface, F: FrameScheduler> Animation<S, F> {
    pub fn new(config: FieldConfig, seed: u64, scheduler: F) -> Self {
        Self {
            config,
            seed,
            scheduler,
            session: None,
            pending: None,
        }
    }

    /// Starts a session on `surface`, drawing the first frame immediately.
    ///
    /// Returns `false` and does nothing if the surface is missing, has no
    /// usable size, or the config is invalid. A running session is stopped
    /// first.
    pub fn start(&mut self, surface: Option<S>) -> bool {
        self.stop();
        let Some(mut surface) = surface else {
            debug!("confetti start skipped: no surface");
            return false;
        };
        let (width, height) = surface.size();
        let field = match ParticleField::start(&self.config, width, height, self.seed) {
            Ok(field) => field,
            Err(e) => {
                debug!(error = %e, "confetti start skipped");
                return false;
            }
        };
        field.render(&mut surface);
        self.session = Some(Session { field, surface });
        self.schedule_next();
        self.is_running()
    }

    /// Runs one frame: tick, render, then register the next frame.
    ///
    /// Called by the host when the registered callback fires. Does nothing
    /// after [`stop`](Self::stop).
    pub fn on_frame(&mut self) {
        self.pending = None;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.field.tick();
        session.field.render(&mut session.surface);
        self.schedule_next();
    }

    /// Stops the loop and drops the field and surface. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if let Some(session) = self.session.take() {
            debug!(frames = session.field.frame(), "confetti stopped");
        }
    }

    /// Tells the running field about a new surface size.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ConfettiError> {
        match self.session.as_mut() {
            Some(session) => session.field.resize(width, height),
            None => Ok(()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// The registration that will deliver the next frame, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.session.as_ref().map(|s| &s.field)
    }

    pub fn surface(&self) -> Option<&S> {
        self.session.as_ref().map(|s| &s.surface)
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.session.as_mut().map(|s| &mut s.surface)
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    fn schedule_next(&mut self) {
        match self.scheduler.request_frame() {
            Ok(handle) => self.pending = Some(handle),
            Err(e) => {
                warn!(error = %e, "confetti frame request failed, stopping");
                self.stop();
            }
        }
    }
}

impl<S, F: FrameScheduler> Drop for Animation<S, F> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}
