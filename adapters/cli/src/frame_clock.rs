//! Frame limiter measuring the real time between loop iterations.

use std::{
    collections::VecDeque,
    thread,
    time::{Duration, Instant},
};

/// Number of recent frame durations averaged by [`FrameClock::fps`].
const FPS_WINDOW: usize = 10;

/// Wall clock that paces the loop and tracks recent frame durations.
#[derive(Debug)]
pub(crate) struct FrameClock {
    last_tick: Instant,
    recent: VecDeque<Duration>,
}

impl FrameClock {
    /// Starts the clock at the current instant.
    pub(crate) fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            recent: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    /// Sleeps for whatever remains of the frame budget and returns the real
    /// time elapsed since the previous tick.
    ///
    /// A `target_fps` of zero disables the limiter.
    pub(crate) fn tick(&mut self, target_fps: u32) -> Duration {
        if let Some(budget) = frame_budget(target_fps) {
            let spent = self.last_tick.elapsed();
            if spent < budget {
                thread::sleep(budget - spent);
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        elapsed
    }

    /// Records a completed frame duration for the rate indicator.
    pub(crate) fn record(&mut self, frame: Duration) {
        if self.recent.len() == FPS_WINDOW {
            let _ = self.recent.pop_front();
        }
        self.recent.push_back(frame);
    }

    /// Frames per second averaged over the recently recorded frames.
    pub(crate) fn fps(&self) -> f32 {
        let total: Duration = self.recent.iter().sum();
        let seconds = total.as_secs_f32();
        if seconds <= f32::EPSILON {
            return 0.0;
        }
        self.recent.len() as f32 / seconds
    }
}

fn frame_budget(target_fps: u32) -> Option<Duration> {
    (target_fps > 0).then(|| Duration::from_secs(1) / target_fps)
}
