//! `SuspicionCountdown`: the in-process single-shot countdown a camera runs
//! while Suspicious, backed by a Bevy [`Timer`].

use std::time::Duration;

use bevy::prelude::*;

use crate::collaborators::{CountdownHandle, CountdownTimer};

#[derive(Clone, Debug, Default)]
pub struct SuspicionCountdown {
    running: Option<(CountdownHandle, Timer)>,
    next_id: u64,
}

impl SuspicionCountdown {
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn active_handle(&self) -> Option<CountdownHandle> {
        self.running.as_ref().map(|(handle, _)| *handle)
    }

    /// Seconds left on the running countdown.
    pub fn remaining_secs(&self) -> Option<f32> {
        self.running.as_ref().map(|(_, timer)| timer.remaining_secs())
    }

    /// Tick the countdown. Returns the handle once, on the tick it expires.
    pub fn advance(&mut self, dt: Duration) -> Option<CountdownHandle> {
        let (handle, timer) = self.running.as_mut()?;
        timer.tick(dt);
        if !timer.finished() {
            return None;
        }
        let handle = *handle;
        self.running = None;
        Some(handle)
    }
}

impl CountdownTimer for SuspicionCountdown {
    fn start(&mut self, seconds: f32) -> CountdownHandle {
        self.next_id += 1;
        let handle = CountdownHandle(self.next_id);
        self.running = Some((handle, Timer::from_seconds(seconds.max(0.0), TimerMode::Once)));
        handle
    }

    fn stop(&mut self, handle: CountdownHandle) {
        if self.active_handle() == Some(handle) {
            self.running = None;
        }
    }
}
