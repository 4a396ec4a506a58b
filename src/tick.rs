//! The real-time tick: frame → match → control → command, with overrun detection
//! (spec §4.5, §5).
//!
//! Mirrors the cooperative-scheduler discipline used elsewhere in this crate: a flag is
//! set while a tick is being dispatched, and a new frame arriving while it is still set
//! is a fatal overrun rather than something to queue or drop silently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use flume::Receiver;

use crate::error::{Error, Result};
use crate::marker::Frame;
use crate::swarm::{Dispatched, Swarm};

/// Drives the swarm's control loop from a stream of tracker frames.
///
/// `tick_in_progress` is the one-bit overrun detector: a new frame must never arrive
/// while the previous tick is still being dispatched.
pub struct TickDriver {
    frames: Receiver<Frame>,
    tick_in_progress: Arc<AtomicBool>,
    tick_period_s: f64,
}

impl TickDriver {
    pub fn new(frames: Receiver<Frame>, tick_period_s: f64) -> Self {
        TickDriver {
            frames,
            tick_in_progress: Arc::new(AtomicBool::new(false)),
            tick_period_s,
        }
    }

    /// Runs until the frame channel closes (tracker disconnect) or a fatal,
    /// swarm-wide error occurs (marker count mismatch, overrun).
    ///
    /// On any fatal error every agent is sent a stop setpoint before the loop ends.
    pub async fn run(&mut self, swarm: &mut Swarm) -> Result<()> {
        while let Ok(frame) = self.frames.recv_async().await {
            if let Err(e) = self.run_one_tick(swarm, frame).await {
                self.stop_all(swarm).await;
                return Err(e);
            }
        }
        self.stop_all(swarm).await;
        Ok(())
    }

    async fn run_one_tick(&self, swarm: &mut Swarm, frame: Frame) -> Result<Vec<Dispatched>> {
        if self.tick_in_progress.swap(true, Ordering::SeqCst) {
            return Err(Error::RealtimeOverrun);
        }
        let result = swarm.dispatch_tick(&frame, self.tick_period_s).await;
        self.tick_in_progress.store(false, Ordering::SeqCst);
        result
    }

    async fn stop_all(&self, swarm: &mut Swarm) {
        swarm.stop_all().await;
    }
}
