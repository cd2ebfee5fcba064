//! Spaced item placement over the arena.
//!
//! A [`request::PlacementRequest`] describes the spawn area and spacing rules; a
//! [`sampler::PlacementSampler`] turns it into positions by bounded rejection sampling, resting
//! each candidate on the ground via a [`crate::terrain::GroundProbe`]. Progress can be observed
//! through [`events::EventSink`].
pub mod events;
pub mod request;
pub mod sampler;

pub use request::PlacementRequest;
pub use sampler::{place_items, PlacementResult, PlacementSampler};
