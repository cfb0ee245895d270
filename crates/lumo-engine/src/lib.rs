//! Procedural looping background animations rendered to a software
//! raster surface.
//!
//! The pieces fit together like this: a [`Registry`] maps variant names
//! to factories, a [`Player`] owns a [`Canvas`] plus at most one mounted
//! [`Animation`], and [`Player::tick`] drives the clear-update-render
//! loop. Everything is configured once at mount time through
//! [`lumo_core::AnimationConfig`].

mod animation;
pub mod animations;
mod canvas;
pub mod custom;
mod error;
mod player;
mod registry;

pub use animation::Animation;
pub use canvas::Canvas;
pub use error::Error;
pub use player::{Handle, Player};
pub use registry::{Factory, Registry};
