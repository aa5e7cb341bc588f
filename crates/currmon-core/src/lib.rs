//! Hardware-independent core library for currmon
//!
//! This crate contains all platform-agnostic logic for the current monitor:
//! sensor conversion, the moving-average filter, charge integration, peak
//! tracking, screen rotation, and rendering of the three status screens.
//!
//! It is `#![no_std]` so it compiles on both the ESP32-S3 firmware and
//! desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

pub mod app_state;
pub mod clock;
pub mod config;
pub mod display_manager;
pub mod filter;
pub mod framebuffer;
pub mod metrics;
pub mod monitor;
pub mod pages;
pub mod sensors;
pub mod ui;
