#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Flower`**: The device's actuator state (opening, color, configuration mode, detection indicator)
//! - **`FlowerHardware`**: Trait to implement for your servo, LED and indicator outputs
//! - **`Sequence`**: One animation policy plus an optional one-shot completion callback
//! - **`SequenceKind`**: The built-in policies (`Idle`, `Rainbow`, `Transition`)
//! - **`SequenceRunner`**: Runs at most one sequence, one frame per tick
//! - **`RandomSource`**: Injectable random draws for wandering sequences
//! - **`ExpressionFlower`**: Controller owning the flower and runner, driven by `FlowerEvent`s
//!
//! Openings are `f32` fractions in 0.0-1.0 and colors are `Srgb<f32>` in 0.0-1.0.
//! When implementing `FlowerHardware`, convert these to your device's native
//! format; `ServoCalibration` handles the servo side.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod colors;
pub mod command;
pub mod config;
pub mod controller;
pub mod flower;
pub mod random;
pub mod runner;
pub mod sequence;
pub mod servo;
pub mod types;

pub use command::FlowerEvent;
pub use config::FlowerConfig;
pub use controller::ExpressionFlower;
pub use flower::{COLOR_OFF, Flower, FlowerHardware};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use runner::{DefaultSequence, SequenceRunner};
pub use sequence::{IdleSequence, RainbowSequence, Sequence, SequenceKind, TransitionSequence};
pub use servo::ServoCalibration;
pub use types::{
    Actuator, CONFIG_MODE_OPENING, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_HUE_STEP_DEGREES,
    DEFAULT_IDLE_INCREMENT, FlowerError, StepError, TickOutcome,
};
