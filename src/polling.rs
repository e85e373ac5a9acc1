//! Polling session lifecycle.
//!
//! A session is `inactive` until a submission starts it, and goes back to
//! `inactive` on completion or reset, and when the dashboard is shut down or
//! dropped. It owns at most one repeating timer task. Every start and stop
//! bumps the session generation; a status response is only applied if it was
//! requested under the current generation and the session is still active.

use tokio::task::JoinHandle;

/// Identifies one run of the polling timer.
pub type Generation = u64;

#[derive(Debug, Default)]
pub struct PollingSession {
    timer: Option<JoinHandle<()>>,
    generation: Generation,
}

impl PollingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any running timer and installs the one produced by `spawn`.
    ///
    /// `spawn` receives the new generation so the timer can tag its fetches.
    pub fn start<F>(&mut self, spawn: F) -> Generation
    where
        F: FnOnce(Generation) -> JoinHandle<()>,
    {
        self.cancel_timer();
        self.generation += 1;
        let generation = self.generation;
        self.timer = Some(spawn(generation));
        tracing::debug!("Polling session started (generation {})", generation);
        generation
    }

    /// Cancels the timer. No-op when already inactive.
    pub fn stop(&mut self) {
        if self.cancel_timer() {
            tracing::debug!("Polling session stopped (generation {})", self.generation);
        }
        self.generation += 1;
    }

    /// Stops the session only if `generation` is still the running one.
    ///
    /// Returns `false` when the session was restarted or stopped meanwhile.
    pub fn stop_if_current(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.stop();
        true
    }

    /// True while a timer is installed.
    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    /// True if results requested under `generation` may still be applied.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.is_active() && self.generation == generation
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    fn cancel_timer(&mut self) -> bool {
        match self.timer.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for PollingSession {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
