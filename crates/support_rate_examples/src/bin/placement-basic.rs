use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use support_rate::prelude::*;
use support_rate_examples::{init_tracing, render_placement_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // The stock arena: 20 items in a 20x20 area, 2 apart, 3 away from the player start.
    let request = PlacementRequest::new(20.0, 20.0, 20)
        .with_min_separation(2.0)
        .with_exclusion_radius(3.0)
        .with_attempts_multiplier(10);

    let mut rng = StdRng::seed_from_u64(2025);
    let result = place_items(&request, &FlatGround::new(0.0), &mut rng)?;

    println!(
        "placed {}/{} items in {} attempts ({} rejected)",
        result.len(),
        result.requested,
        result.attempts,
        result.rejected
    );

    let rc = RenderConfig::new((800, 800), Vec2::new(24.0, 24.0));
    render_placement_to_png(&result, &request, &rc, "placement-basic.png")?;

    Ok(())
}
