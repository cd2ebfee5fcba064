//! Bounded rejection sampling of spaced item positions.
use glam::{Vec2, Vec3, Vec3Swizzles};
use rand::Rng;
use tracing::{info, trace, warn};

use crate::error::Result;
use crate::placement::events::{EventSink, PlacementEvent, PlacementEventKind, RejectReason};
use crate::placement::request::PlacementRequest;
use crate::sampling::{CandidateSampling, UniformRectSampling};
use crate::terrain::GroundProbe;

/// Accepted positions of one placement run, in acceptance order.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementResult {
    /// Accepted world positions.
    pub positions: Vec<Vec3>,
    /// Number of positions that were asked for.
    pub requested: usize,
    /// Number of candidates drawn.
    pub attempts: usize,
    /// Number of candidates discarded.
    pub rejected: usize,
}

impl PlacementResult {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `true` when every requested position was placed.
    pub fn is_complete(&self) -> bool {
        self.positions.len() >= self.requested
    }

    /// How many requested positions could not be placed.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.positions.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.positions.iter()
    }
}

/// Places up to `request.count` positions by drawing candidates and testing the spacing rules.
pub struct PlacementSampler {
    /// Request served by this sampler.
    pub request: PlacementRequest,
    /// Strategy used to draw planar candidates.
    pub sampling: Box<dyn CandidateSampling>,
}

impl PlacementSampler {
    pub fn try_new(request: PlacementRequest) -> Result<Self> {
        request.validate()?;
        Ok(Self::new(request))
    }

    pub fn new(request: PlacementRequest) -> Self {
        debug_assert!(
            request.validate().is_ok(),
            "invalid placement request: {request:?}"
        );
        Self {
            request,
            sampling: Box::new(UniformRectSampling::new()),
        }
    }

    /// Replaces the candidate drawing strategy.
    pub fn with_sampling<S: CandidateSampling + 'static>(mut self, sampling: S) -> Self {
        self.sampling = Box::new(sampling);
        self
    }

    /// Runs the sampler.
    pub fn sample<P, R>(&self, probe: &P, rng: &mut R) -> PlacementResult
    where
        P: GroundProbe + ?Sized,
        R: Rng,
    {
        self.sample_with_events(probe, rng, &mut ())
    }

    /// Runs the sampler, reporting progress to `sink`.
    pub fn sample_with_events<P, R>(
        &self,
        probe: &P,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> PlacementResult
    where
        P: GroundProbe + ?Sized,
        R: Rng,
    {
        let request = &self.request;
        let max_attempts = request.max_attempts();
        let extent = request.area_extent();

        if sink.wants(PlacementEventKind::RunStarted) {
            sink.send(PlacementEvent::RunStarted {
                request: *request,
                max_attempts,
            });
        }

        let mut accepted: Vec<Vec3> = Vec::with_capacity(initial_capacity(request));
        let mut attempts = 0;

        while accepted.len() < request.count && attempts < max_attempts {
            let attempt = attempts;
            attempts += 1;

            let planar = Vec2::from(self.sampling.draw(extent.into(), rng)) + request.origin;
            let ground = probe.probe_ground_height(planar.x, planar.y);
            if ground.is_none() {
                trace!(
                    "No ground at ({:.2}, {:.2}); using fallback height {}.",
                    planar.x,
                    planar.y,
                    request.fallback_height
                );
            }
            let y = ground.unwrap_or(request.fallback_height) + request.vertical_offset;
            let candidate = Vec3::new(planar.x, y, planar.y);

            match check_candidate(candidate, &accepted, request) {
                Ok(()) => {
                    if sink.wants(PlacementEventKind::CandidateAccepted) {
                        sink.send(PlacementEvent::CandidateAccepted {
                            attempt,
                            index: accepted.len(),
                            position: candidate,
                            grounded: ground.is_some(),
                        });
                    }
                    accepted.push(candidate);
                }
                Err(reason) => {
                    if sink.wants(PlacementEventKind::CandidateRejected) {
                        sink.send(PlacementEvent::CandidateRejected {
                            attempt,
                            position: candidate,
                            reason,
                        });
                    }
                }
            }
        }

        let result = PlacementResult {
            requested: request.count,
            attempts,
            rejected: attempts - accepted.len(),
            positions: accepted,
        };

        info!(
            "Placed {}/{} items in {} attempts.",
            result.len(),
            result.requested,
            result.attempts
        );
        if !result.is_complete() {
            warn!(
                "Attempt budget exhausted; {} item(s) could not be placed.",
                result.shortfall()
            );
        }

        if sink.wants(PlacementEventKind::RunFinished) {
            sink.send(PlacementEvent::RunFinished {
                result: result.clone(),
            });
        }

        result
    }
}

/// Upper bound on the up-front buffer; larger runs grow it as items are accepted.
const MAX_PREALLOCATED: usize = 4096;

fn initial_capacity(request: &PlacementRequest) -> usize {
    request.count.min(MAX_PREALLOCATED)
}

/// Planar spacing first, then the exclusion zone around the world origin.
fn check_candidate(
    candidate: Vec3,
    accepted: &[Vec3],
    request: &PlacementRequest,
) -> std::result::Result<(), RejectReason> {
    let planar = candidate.xz();
    for (index, existing) in accepted.iter().enumerate() {
        let distance = planar.distance(existing.xz());
        if distance < request.min_separation {
            return Err(RejectReason::TooCloseToItem { index, distance });
        }
    }

    let distance = candidate.length();
    if distance < request.exclusion_radius {
        return Err(RejectReason::InsideExclusion { distance });
    }

    Ok(())
}

/// Convenience wrapper: validate `request` and run a default [`PlacementSampler`].
pub fn place_items<P, R>(
    request: &PlacementRequest,
    probe: &P,
    rng: &mut R,
) -> Result<PlacementResult>
where
    P: GroundProbe + ?Sized,
    R: Rng,
{
    let sampler = PlacementSampler::try_new(*request)?;
    Ok(sampler.sample(probe, rng))
}
