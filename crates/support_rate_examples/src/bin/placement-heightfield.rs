use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use support_rate::prelude::*;
use support_rate_examples::{init_tracing, Canvas, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Rolling hills covering only part of the spawn area; items past the edge use the fallback.
    let hills = HeightGrid::from_fn(Vec2::new(-3.0, 0.0), 0.5, 41, 49, |x, z| {
        1.5 * (x * 0.35).sin() * (z * 0.25).cos() + 1.5
    })?;
    let (min, max) = hills.bounds();

    let request = PlacementRequest::new(30.0, 30.0, 60)
        .with_min_separation(2.0)
        .with_exclusion_radius(3.0)
        .with_fallback_height(0.0)
        .with_vertical_offset(0.5);

    let mut sink = VecSink::only([PlacementEventKind::CandidateAccepted]);
    let mut rng = StdRng::seed_from_u64(99);
    let result = PlacementSampler::try_new(request)?.sample_with_events(&hills, &mut rng, &mut sink);

    let rc = RenderConfig::new((900, 900), Vec2::new(32.0, 32.0));
    let mut canvas = Canvas::new(rc);
    canvas.shade(|p| {
        hills.height_at(p.x, p.y).map(|h| {
            let t = (h / 3.0).clamp(0.0, 1.0);
            let g = (60.0 + 140.0 * t) as u8;
            [30, g, 40]
        })
    });
    canvas.rect(min, max, [200, 200, 200]);
    canvas.ring(Vec2::ZERO, request.exclusion_radius, [200, 80, 80]);

    let mut grounded = 0;
    for event in sink.as_slice() {
        if let PlacementEvent::CandidateAccepted {
            position,
            grounded: on_hills,
            ..
        } = event
        {
            let color = if *on_hills {
                grounded += 1;
                [255, 214, 0]
            } else {
                [120, 170, 255]
            };
            canvas.disk(Vec2::new(position.x, position.z), 5, color);
        }
    }

    println!(
        "placed {} items: {} on the hills, {} on fallback height",
        result.len(),
        grounded,
        result.len() - grounded
    );
    canvas.save("placement-heightfield.png")?;

    Ok(())
}
