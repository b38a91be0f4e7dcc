//! Audio-path logic shared by the I2S microphone and speaker drivers.
//!
//! The I2S channels themselves are owned by the host layer; what lives here
//! is what the drivers delegate to:
//! - sample-level transforms (output attenuation, mic width conversion)
//! - the start/stop run-state machine both drivers poll from their loop

pub mod level;
pub mod state;

pub use level::{DEFAULT_GAIN_SHIFT, MIC_SAMPLE_SHIFT, SAMPLE_RATE_HZ};
pub use state::{DriverRequest, RunControl, RunState};
