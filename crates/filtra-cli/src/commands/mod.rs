//! CLI command implementations.

pub mod common;
pub mod config;
pub mod filter;
pub mod info;
pub mod plot;
pub mod spectrum;
pub mod waveform;
