use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use support_rate::prelude::*;
use support_rate_examples::{chase_nearest_item, init_tracing, Canvas, RenderConfig};

const FRAME: f32 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Optional RON config path as the first argument.
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut rng = StdRng::seed_from_u64(60);
    let mut world = GameWorld::new(config, FlatGround::new(0.0), &mut rng)?;
    let spawned: Vec<Vec2> = world
        .items()
        .iter()
        .map(|item| Vec2::new(item.base_position().x, item.base_position().z))
        .collect();

    let mut trail = vec![Vec2::ZERO];
    let mut last_second = u32::MAX;
    let mut frames = 0u32;

    loop {
        let input = chase_nearest_item(&world);
        let report = world.step(FRAME, &input);
        frames += 1;

        let p = world.player().position();
        trail.push(Vec2::new(p.x, p.z));

        for event in &report.events {
            match event {
                SessionEvent::ItemCollected { points, score } => {
                    println!("+{points} -> score {score}");
                }
                SessionEvent::AllCollected {
                    points,
                    bonus,
                    score,
                } => {
                    println!("+{points} and completion bonus +{bonus} -> score {score}");
                }
                SessionEvent::TimeUp { summary } => {
                    println!("\n{summary}\n{}", summary.tier);
                }
            }
        }

        let second = world.session().remaining_secs().ceil() as u32;
        if second != last_second && second % 10 == 0 {
            last_second = second;
            println!(
                "[{}] score {} | support {}",
                world.session().timer_display(),
                world.session().score(),
                world.session().support_rate_display()
            );
        }

        if report.time_up() || world.session().is_over() {
            break;
        }
    }
    println!("simulated {frames} frames");

    let half = world.config().player.arena_half_extent;
    let rc = RenderConfig::new((800, 800), Vec2::splat(half * 2.0 + 2.0));
    let mut canvas = Canvas::new(rc);
    canvas.rect(Vec2::splat(-half), Vec2::splat(half), [160, 160, 160]);
    for p in &spawned {
        canvas.disk(*p, 5, [255, 214, 0]);
    }
    canvas.polyline(&trail, [90, 200, 255]);
    canvas.save("session-autopilot.png")?;

    Ok(())
}
