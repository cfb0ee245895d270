//! Built-in animation variants.
//!
//! Each module is one self-contained simulation plus renderer. The
//! numeric tuning constants are part of each variant's visual identity
//! and are deliberately spelled out rather than shared.

mod aurora;
mod breathing;
mod bubbles;
mod clouds;
mod constellation;
mod embers;
mod fireworks;
mod flames;
mod floating;
mod flow;
mod helix;
mod leaves;
mod orbit;
mod plasma;
mod rain;
mod ripples;
mod snowfall;
mod spirals;
mod starfield;
mod waves;

pub use aurora::Aurora;
pub use breathing::Breathing;
pub use bubbles::Bubbles;
pub use clouds::Clouds;
pub use constellation::Constellation;
pub use embers::Embers;
pub use fireworks::Fireworks;
pub use flames::Flames;
pub use floating::Floating;
pub use flow::Flow;
pub use helix::Helix;
pub use leaves::Leaves;
pub use orbit::Orbit;
pub use plasma::Plasma;
pub use rain::Rain;
pub use ripples::Ripples;
pub use snowfall::Snowfall;
pub use spirals::Spirals;
pub use starfield::Starfield;
pub use waves::Waves;
