//! Platform media backends for the capture controller.

mod microphone;
mod preview;
mod simulated;

pub(crate) use {
    microphone::{MicrophoneDevices, MicrophoneStream},
    preview::ConsolePreview,
    simulated::{SimulatedDevices, SimulatedStream},
};

#[cfg(test)]
pub(crate) use microphone::stream_label;
