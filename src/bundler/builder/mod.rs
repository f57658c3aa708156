//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that runs the
//! packaging steps in order.
//!
//! # Overview
//!
//! The bundler:
//! 1. Compiles the release binary
//! 2. Assembles the `.app` bundle
//! 3. Generates and compiles the icon
//! 4. Signs executables, then the bundle
//! 5. Builds the DMG installer and removes intermediates
//! 6. Returns a [`BundledArtifact`](crate::bundler::BundledArtifact) with the checksum
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`compile`] - `cargo build` invocation
//! - [`orchestrator`] - Main [`Bundler`] struct
//! - [`steps`] - Ordered build steps and their preconditions
//! - [`tool_detection`] - External tool availability checking

mod checksum;
mod compile;
mod orchestrator;
mod steps;
pub mod tool_detection;

pub use orchestrator::Bundler;
pub use steps::{BuildStep, PathKind, Precondition};
