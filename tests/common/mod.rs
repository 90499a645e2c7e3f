//! Common test utilities for Summon scenario and property tests.
//!
//! This module provides:
//! - `ScriptedBackend` / `CountingRepository`: in-process stubs that count calls
//! - `TestEnv`: isolated project directory plus helpers to run the `summon` CLI
//! - Fixtures: a shell compiler driven by the same directive language

#![allow(dead_code)]

pub mod env;
pub mod stubs;

pub use env::*;
pub use fixtures::*;
pub use stubs::*;
