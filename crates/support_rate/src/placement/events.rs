//! Event types and sinks for observing placement runs.
//!
//! This module defines [`PlacementEvent`] and a set of sinks to collect or forward events while
//! running [`crate::placement::sampler::PlacementSampler::sample_with_events`].
use glam::Vec3;

use crate::placement::request::PlacementRequest;
use crate::placement::sampler::PlacementResult;

/// Why a candidate position was discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    /// Closer than the minimum separation to an already accepted position.
    TooCloseToItem {
        /// Index of the accepted position that was too close.
        index: usize,
        /// Planar distance to it.
        distance: f32,
    },
    /// Inside the exclusion radius around the world origin.
    InsideExclusion {
        /// Distance to the world origin.
        distance: f32,
    },
}

/// Describes events emitted by placement runs.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum PlacementEvent {
    /// Emitted before the first attempt.
    RunStarted {
        /// The request being served.
        request: PlacementRequest,
        /// Attempt budget for this run.
        max_attempts: usize,
    },

    /// Emitted when a candidate was discarded.
    CandidateRejected {
        /// Zero-based attempt number.
        attempt: usize,
        /// Candidate world position.
        position: Vec3,
        /// Rejection cause.
        reason: RejectReason,
    },

    /// Emitted when a candidate was accepted.
    CandidateAccepted {
        /// Zero-based attempt number.
        attempt: usize,
        /// Index of the position in the result.
        index: usize,
        /// Accepted world position.
        position: Vec3,
        /// Whether the ground probe found a surface (otherwise the fallback height was used).
        grounded: bool,
    },

    /// Emitted once the run ended.
    RunFinished {
        /// Final result.
        result: PlacementResult,
    },
}

impl PlacementEvent {
    pub fn kind(&self) -> PlacementEventKind {
        match self {
            PlacementEvent::RunStarted { .. } => PlacementEventKind::RunStarted,
            PlacementEvent::CandidateRejected { .. } => PlacementEventKind::CandidateRejected,
            PlacementEvent::CandidateAccepted { .. } => PlacementEventKind::CandidateAccepted,
            PlacementEvent::RunFinished { .. } => PlacementEventKind::RunFinished,
        }
    }
}

/// Discriminant of [`PlacementEvent`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementEventKind {
    RunStarted,
    CandidateRejected,
    CandidateAccepted,
    RunFinished,
}

/// A generic event sink that accepts [`PlacementEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: PlacementEvent);

    /// Whether events of `kind` should be built at all. Defaults to `true`.
    #[inline]
    fn wants(&self, _kind: PlacementEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: PlacementEvent) {}

    #[inline]
    fn wants(&self, _kind: PlacementEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(PlacementEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(PlacementEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(PlacementEvent),
{
    #[inline]
    fn send(&mut self, event: PlacementEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<PlacementEvent>,
    only: Option<Vec<PlacementEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect only events whose kind is listed.
    pub fn only(kinds: impl IntoIterator<Item = PlacementEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<PlacementEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[PlacementEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: PlacementEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: PlacementEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: PlacementEvent) {
        let kind = event.kind();
        let Some(last_idx) = self.sinks.iter().rposition(|s| s.wants(kind)) else {
            return;
        };
        for i in 0..last_idx {
            if self.sinks[i].wants(kind) {
                self.sinks[i].send(event.clone());
            }
        }
        self.sinks[last_idx].send(event);
    }

    fn wants(&self, kind: PlacementEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected() -> PlacementEvent {
        PlacementEvent::CandidateRejected {
            attempt: 0,
            position: Vec3::ZERO,
            reason: RejectReason::InsideExclusion { distance: 0.0 },
        }
    }

    fn accepted() -> PlacementEvent {
        PlacementEvent::CandidateAccepted {
            attempt: 1,
            index: 0,
            position: Vec3::new(5.0, 1.0, 5.0),
            grounded: true,
        }
    }

    #[test]
    fn unit_sink_wants_nothing() {
        let sink = ();
        assert!(!sink.wants(PlacementEventKind::RunFinished));
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(rejected());
        sink.send(accepted());
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn vec_sink_filters_by_kind() {
        let mut sink = VecSink::only([PlacementEventKind::CandidateAccepted]);
        assert!(!sink.wants(PlacementEventKind::CandidateRejected));
        sink.send(rejected());
        sink.send(accepted());
        let events = sink.into_inner();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), PlacementEventKind::CandidateAccepted);
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![
            VecSink::new(),
            VecSink::only([PlacementEventKind::RunFinished]),
        ]);
        multi.send(accepted());
        assert!(multi.wants(PlacementEventKind::CandidateAccepted));
        let sinks = multi.into_inner();
        assert_eq!(sinks[0].len(), 1);
        assert_eq!(sinks[1].len(), 0);
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(accepted());
        sink.send(rejected());
        assert_eq!(count, 2);
    }
}
