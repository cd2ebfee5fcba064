//! Top-level game configuration.
//!
//! [`GameConfig`] bundles the tuning of every subsystem. With the `ron` feature it can be loaded
//! from RON text or files:
//!
//! ```ignore
//! let config = GameConfig::from_ron_str("(session: (duration_secs: 90.0))")?;
//! ```
use crate::error::Result;
use crate::game::camera::CameraConfig;
use crate::game::item::ItemConfig;
use crate::game::player::PlayerConfig;
use crate::game::session::SessionConfig;
use crate::placement::request::PlacementRequest;

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub session: SessionConfig,
    pub placement: PlacementRequest,
    pub item: ItemConfig,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    pub fn with_placement(mut self, placement: PlacementRequest) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_item(mut self, item: ItemConfig) -> Self {
        self.item = item;
        self
    }

    pub fn with_player(mut self, player: PlayerConfig) -> Self {
        self.player = player;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    /// Validates every section.
    ///
    /// A placement count below `session.total_items` is accepted: the round still plays, but the
    /// completion bonus cannot be reached. [`GameWorld`](crate::game::world::GameWorld) logs a
    /// warning when that happens.
    pub fn validate(&self) -> Result<()> {
        self.session.validate()?;
        self.placement.validate()?;
        self.item.validate()?;
        self.player.validate()?;
        self.camera.validate()?;
        Ok(())
    }
}

#[cfg(feature = "ron")]
impl GameConfig {
    /// Parses and validates a RON document. Missing fields take their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: GameConfig =
            ron::from_str(text).map_err(|e| crate::error::Error::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a RON file from disk.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| crate::error::Error::Other(e.to_string()))
    }
}
