//! Test utilities shared by the unit tests.
//!
//! Fixtures for API envelopes and sensors, a scripted sample source and
//! builders for configuration values.

#![cfg(test)]

pub mod config;
pub mod fixtures;
pub mod mocks;
