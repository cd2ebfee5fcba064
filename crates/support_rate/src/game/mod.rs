//! Headless gameplay state driven by an explicit loop.
//!
//! [`world::GameWorld`] owns everything a round needs and is advanced with
//! [`world::GameWorld::step`]; there is no global game instance.
pub mod camera;
pub mod item;
pub mod joystick;
pub mod player;
pub mod session;
pub mod world;
