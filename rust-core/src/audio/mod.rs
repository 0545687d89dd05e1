//! Audio capture with cpal

pub mod buffer;
pub mod capture;
pub mod input;

pub use buffer::AudioRingBuffer;
pub use capture::CaptureSource;
pub use input::{list_input_devices, AudioDeviceInfo, AudioError, AudioInput};
