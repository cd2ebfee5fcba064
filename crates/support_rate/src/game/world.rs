//! One round of play: session, items, player and camera advanced by an explicit loop.
use glam::Vec3;
use rand::Rng;
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::error::Result;
use crate::game::camera::OrbitCamera;
use crate::game::item::CollectibleItem;
use crate::game::player::{blend_input, FrameInput, Player};
use crate::game::session::{GameSession, SessionEvent};
use crate::placement::sampler::PlacementSampler;
use crate::terrain::GroundProbe;

/// What happened during one [`GameWorld::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Session changes, in order.
    pub events: Vec<SessionEvent>,
    /// Indices of items picked up this step.
    pub collected_items: Vec<usize>,
}

impl StepReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.collected_items.is_empty()
    }

    /// `true` if the round ended during this step.
    pub fn time_up(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, SessionEvent::TimeUp { .. }))
    }
}

pub struct GameWorld<P: GroundProbe> {
    config: GameConfig,
    probe: P,
    sampler: PlacementSampler,
    session: GameSession,
    items: Vec<CollectibleItem>,
    player: Player,
    camera: OrbitCamera,
    elapsed: f32,
}

impl<P: GroundProbe> GameWorld<P> {
    /// Validates `config`, places the items and puts the player at the origin.
    pub fn new<R: Rng>(config: GameConfig, probe: P, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let sampler = PlacementSampler::new(config.placement);
        let session = GameSession::new(config.session.clone());
        let player = Player::new(config.player, Vec3::ZERO);
        let camera = OrbitCamera::new(config.camera);

        let mut world = Self {
            config,
            probe,
            sampler,
            session,
            items: Vec::new(),
            player,
            camera,
            elapsed: 0.0,
        };
        world.spawn_items(rng);
        Ok(world)
    }

    fn spawn_items<R: Rng>(&mut self, rng: &mut R) {
        let result = self.sampler.sample(&self.probe, rng);
        self.items = result
            .iter()
            .map(|p| CollectibleItem::new(*p, self.config.item))
            .collect();
        info!("Spawned {} items.", self.items.len());
        if self.items.len() < self.session.config().total_items {
            warn!(
                "Only {} items spawned but {} are needed for the completion bonus.",
                self.items.len(),
                self.session.config().total_items
            );
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn items(&self) -> &[CollectibleItem] {
        &self.items
    }

    /// Items still on the field.
    pub fn remaining_items(&self) -> impl Iterator<Item = &CollectibleItem> {
        self.items.iter().filter(|i| !i.is_collected())
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Seconds of play simulated this round.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advances the round by `dt` seconds. Once the round is over the world is frozen and every
    /// step returns an empty report.
    pub fn step(&mut self, dt: f32, input: &FrameInput) -> StepReport {
        let mut report = StepReport::default();
        if self.session.is_over() {
            return report;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;

        let axes = blend_input(
            input.keyboard,
            input.joystick,
            self.player.config().joystick_dead_zone,
        );
        self.camera.orbit(input.camera_drag);
        self.player.update(dt, axes, &self.camera, &self.probe);
        self.camera.follow(dt, self.player.position());

        for (index, item) in self.items.iter_mut().enumerate() {
            item.update(dt, self.elapsed);
            if item.is_collected() || !self.player.touches(item.position(), item.trigger_radius())
            {
                continue;
            }
            if let Some(points) = item.collect() {
                report.collected_items.push(index);
                if let Some(event) = self.session.add_score(points) {
                    report.events.push(event);
                }
            }
        }

        if let Some(event) = self.session.tick(dt) {
            report.events.push(event);
        }
        report
    }

    /// Starts a fresh round with newly placed items.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) {
        self.session.restart();
        self.player.reset(Vec3::ZERO);
        self.camera.reset();
        self.elapsed = 0.0;
        self.spawn_items(rng);
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3Swizzles};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::session::SessionConfig;
    use crate::placement::request::PlacementRequest;
    use crate::terrain::FlatGround;

    fn world(config: GameConfig, seed: u64) -> GameWorld<FlatGround> {
        let mut rng = StdRng::seed_from_u64(seed);
        GameWorld::new(config, FlatGround::new(0.0), &mut rng).expect("valid config")
    }

    /// Steer straight toward the nearest remaining item, expressed in camera-relative axes.
    fn chase_input(w: &GameWorld<FlatGround>) -> FrameInput {
        let player = w.player().position().xz();
        let Some(target) = w
            .remaining_items()
            .map(|i| i.position().xz())
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
        else {
            return FrameInput::default();
        };
        let to = (target - player).normalize_or_zero();
        let forward = w.camera().forward().xz().normalize_or_zero();
        let right = w.camera().right().xz().normalize_or_zero();
        FrameInput::joystick(Vec2::new(to.dot(right), to.dot(forward)))
    }

    #[test]
    fn new_world_spawns_requested_items() {
        let w = world(GameConfig::default(), 1);
        assert!(!w.items().is_empty());
        assert!(w.items().len() <= 20);
        for item in w.items() {
            assert!(item.base_position().length() >= 3.0 - 1e-4);
            assert_eq!(item.base_position().y, 1.0);
        }
        assert_eq!(w.player().position(), Vec3::ZERO);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let config =
            GameConfig::default().with_session(SessionConfig::default().with_duration(-1.0));
        assert!(GameWorld::new(config, FlatGround::new(0.0), &mut rng).is_err());
    }

    #[test]
    fn round_ends_and_freezes() {
        let config =
            GameConfig::default().with_session(SessionConfig::default().with_duration(1.0));
        let mut w = world(config, 2);
        let mut ended = false;
        for _ in 0..20 {
            if w.step(0.1, &FrameInput::default()).time_up() {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert!(w.session().is_over());

        let before = w.player().position();
        let report = w.step(0.1, &FrameInput::keyboard(Vec2::new(0.0, 1.0)));
        assert!(report.is_empty());
        assert_eq!(w.player().position(), before);
    }

    #[test]
    fn walking_into_an_item_collects_it() {
        let config = GameConfig::default().with_placement(
            PlacementRequest::new(20.0, 20.0, 1)
                .with_exclusion_radius(3.0)
                .with_vertical_offset(1.0),
        );
        let mut w = world(config, 3);
        assert_eq!(w.items().len(), 1);

        let mut collected = false;
        for _ in 0..600 {
            let input = chase_input(&w);
            let report = w.step(1.0 / 60.0, &input);
            if report.collected_items == vec![0] {
                assert!(matches!(
                    report.events.as_slice(),
                    [SessionEvent::ItemCollected {
                        points: 10,
                        score: 10
                    }]
                ));
                collected = true;
                break;
            }
        }
        assert!(collected, "player never reached the item");
        assert_eq!(w.session().collected(), 1);
        assert_eq!(w.remaining_items().count(), 0);
    }

    #[test]
    fn collecting_everything_awards_bonus() {
        let config = GameConfig::default()
            .with_placement(
                PlacementRequest::new(12.0, 12.0, 3)
                    .with_min_separation(2.0)
                    .with_exclusion_radius(3.0),
            )
            .with_session(SessionConfig::default().with_total_items(3));
        let mut w = world(config, 4);
        assert_eq!(w.items().len(), 3);

        let mut events = Vec::new();
        for _ in 0..60 * 30 {
            let input = chase_input(&w);
            events.extend(w.step(1.0 / 60.0, &input).events);
            if w.remaining_items().count() == 0 {
                break;
            }
        }
        assert_eq!(w.session().collected(), 3);
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::AllCollected { bonus: 100, .. })));
        assert_eq!(w.session().score(), 130);
        assert_eq!(w.session().support_rate(), 39.0);
    }

    #[test]
    fn restart_resets_round() {
        let config =
            GameConfig::default().with_session(SessionConfig::default().with_duration(0.5));
        let mut w = world(config, 5);
        for _ in 0..10 {
            w.step(0.1, &FrameInput::keyboard(Vec2::new(1.0, 0.0)));
        }
        assert!(w.session().is_over());

        let mut rng = StdRng::seed_from_u64(6);
        w.restart(&mut rng);
        assert!(!w.session().is_over());
        assert_eq!(w.elapsed(), 0.0);
        assert_eq!(w.player().position(), Vec3::ZERO);
        assert!(w.remaining_items().count() > 0);
    }

    #[test]
    fn same_seed_same_round() {
        let a = world(GameConfig::default(), 77);
        let b = world(GameConfig::default(), 77);
        let pa: Vec<Vec3> = a.items().iter().map(|i| i.base_position()).collect();
        let pb: Vec<Vec3> = b.items().iter().map(|i| i.base_position()).collect();
        assert_eq!(pa, pb);
    }
}
