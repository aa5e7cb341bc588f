//! ESP32-S3 firmware-specific modules for currmon
//!
//! This crate contains the hardware-facing implementations of the core's
//! collaborator traits: the on-chip ADC as an [`AnalogSource`] and the
//! embassy time driver as a [`Clock`].
//!
//! [`AnalogSource`]: currmon_core::sensors::AnalogSource
//! [`Clock`]: currmon_core::clock::Clock

#![no_std]

pub mod analog;
pub mod clock;
