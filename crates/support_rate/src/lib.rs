#![forbid(unsafe_code)]
//! support_rate: headless core of a collect-the-items arena game.
//!
//! Modules:
//! - sampling: candidate drawing over the rectangular spawn area
//! - terrain: ground-height probes (flat, none, closures, height grids)
//! - placement: spaced item placement by bounded rejection sampling, with events
//! - game: countdown/score session, collectible items, player motion, joystick, world loop
//! - config: top-level game configuration
pub mod config;
pub mod error;
pub mod game;
pub mod placement;
pub mod sampling;
pub mod terrain;

/// Convenient re-exports for common types. Import with `use support_rate::prelude::*;`.
pub mod prelude {
    pub use crate::config::GameConfig;
    pub use crate::error::{Error, Result};
    pub use crate::game::camera::{CameraConfig, OrbitCamera};
    pub use crate::game::item::{CollectibleItem, ItemConfig};
    pub use crate::game::joystick::VirtualJoystick;
    pub use crate::game::player::{FrameInput, Player, PlayerConfig};
    pub use crate::game::session::{
        FinalSummary, GameSession, ResultTier, SessionConfig, SessionEvent, SessionPhase,
    };
    pub use crate::game::world::{GameWorld, StepReport};
    pub use crate::placement::events::{
        EventSink, FnSink, MultiSink, PlacementEvent, PlacementEventKind, RejectReason, VecSink,
    };
    pub use crate::placement::request::PlacementRequest;
    pub use crate::placement::sampler::{place_items, PlacementResult, PlacementSampler};
    pub use crate::sampling::{CandidateSampling, UniformRectSampling};
    pub use crate::terrain::{FlatGround, FnProbe, GroundProbe, HeightGrid, NoGround};
}
