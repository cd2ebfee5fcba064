use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use support_rate::prelude::*;
use support_rate_examples::{init_tracing, render_placement_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Spacing far too wide for the area: the attempt budget runs out before the count is met.
    let request = PlacementRequest::new(20.0, 20.0, 40)
        .with_min_separation(5.0)
        .with_exclusion_radius(3.0)
        .with_attempts_multiplier(10);

    let mut sink = VecSink::only([PlacementEventKind::CandidateRejected]);
    let mut rng = StdRng::seed_from_u64(7);
    let result = PlacementSampler::try_new(request)?.sample_with_events(
        &FlatGround::new(0.0),
        &mut rng,
        &mut sink,
    );

    let (too_close, excluded) =
        sink.as_slice()
            .iter()
            .fold((0usize, 0usize), |(close, excl), event| match event {
                PlacementEvent::CandidateRejected {
                    reason: RejectReason::TooCloseToItem { .. },
                    ..
                } => (close + 1, excl),
                PlacementEvent::CandidateRejected {
                    reason: RejectReason::InsideExclusion { .. },
                    ..
                } => (close, excl + 1),
                _ => (close, excl),
            });

    println!(
        "placed {}/{} (shortfall {}); rejections: {} too close, {} in exclusion zone",
        result.len(),
        result.requested,
        result.shortfall(),
        too_close,
        excluded
    );

    let rc = RenderConfig::new((800, 800), Vec2::new(24.0, 24.0));
    render_placement_to_png(&result, &request, &rc, "placement-shortfall.png")?;

    Ok(())
}
