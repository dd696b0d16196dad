//! Core data models: source table records and derived view structures.

mod ids;
mod pairing;
mod placement;
mod player;
mod rating;
mod stats;

pub use ids::*;
pub use pairing::*;
pub use placement::*;
pub use player::*;
pub use rating::*;
pub use stats::*;

#[cfg(test)]
pub(crate) use pairing::fixtures;
