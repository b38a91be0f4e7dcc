//! Run-state machine shared by the microphone and speaker drivers.
//!
//! Start/stop requests arrive from the call-control layer; the actual
//! channel enable/disable happens in the driver's polled loop and may fail.
//! The machine separates the request (edge-triggered, cheap) from the
//! transition (polled, fallible), matching the drivers' loop structure.

/// Operation state of an audio driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Channel disabled.
    Stopped,
    /// Start requested, channel not yet enabled.
    Starting,
    /// Channel enabled and streaming.
    Running,
    /// Stop requested, channel not yet disabled.
    Stopping,
}

/// Work the polled driver loop must do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverRequest {
    /// Enable the channel, then confirm with `driver_enabled`.
    Enable,
    /// Disable the channel, then confirm with `driver_disabled`.
    Disable,
}

/// Start/stop control for one audio driver.
#[derive(Clone, Copy, Debug)]
pub struct RunControl {
    state: RunState,
    failed: bool,
}

impl RunControl {
    pub const fn new() -> Self {
        Self {
            state: RunState::Stopped,
            failed: false,
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Whether the driver gave up after a channel failure.
    #[inline]
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Request a start. Ignored unless fully stopped, and refused once the
    /// driver has failed.
    pub fn request_start(&mut self) {
        if self.failed || self.state != RunState::Stopped {
            return;
        }
        self.state = RunState::Starting;
    }

    /// Request a stop.
    ///
    /// A start that has not reached the channel yet is simply withdrawn;
    /// a running channel enters the Stopping phase.
    pub fn request_stop(&mut self) {
        if self.failed {
            return;
        }
        match self.state {
            RunState::Starting => self.state = RunState::Stopped,
            RunState::Running => self.state = RunState::Stopping,
            RunState::Stopped | RunState::Stopping => {}
        }
    }

    /// What the driver loop should do this iteration, if anything.
    pub fn poll(&self) -> Option<DriverRequest> {
        match self.state {
            RunState::Starting => Some(DriverRequest::Enable),
            RunState::Stopping => Some(DriverRequest::Disable),
            RunState::Stopped | RunState::Running => None,
        }
    }

    /// The driver enabled its channel.
    pub fn driver_enabled(&mut self) {
        if self.state == RunState::Starting {
            self.state = RunState::Running;
        }
    }

    /// The driver disabled its channel.
    pub fn driver_disabled(&mut self) {
        if self.state == RunState::Stopping {
            self.state = RunState::Stopped;
        }
    }

    /// The channel operation failed. The driver latches failed and refuses
    /// further requests until recreated.
    pub fn driver_failed(&mut self) {
        self.failed = true;
        self.state = RunState::Stopped;
    }
}

impl Default for RunControl {
    fn default() -> Self {
        Self::new()
    }
}
