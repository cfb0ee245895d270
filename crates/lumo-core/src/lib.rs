//! Core value types for the lumo animation engine.
//!
//! This crate holds the pieces every other crate agrees on: the resolved
//! color type with its tolerant parser, and the animation configuration
//! object in its serialized wire shape.

mod color;
mod config;

pub use color::Rgba;
pub use config::AnimationConfig;
