//! The store-image composer: grid layout plus rendering.

pub mod layout;
pub mod render;

pub use render::{compose, ComposedImage};
