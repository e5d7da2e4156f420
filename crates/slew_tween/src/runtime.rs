//! Tween runtime
//!
//! The runtime is the explicitly passed context that owns every pool and
//! timeline. There is no process-global state: hosts (and tests) create a
//! runtime, build chains on it, and tick it from their frame loop. Dropping
//! the runtime releases everything.

use crate::builder::TweenBuilder;
use crate::error::{Result, TweenError};
use crate::pool::Pool;
use crate::sequence::{Sequence, SequenceKey};
use crate::step::{Step, StepKey};
use crate::timeline::{Timeline, TimelineKey};
use slotmap::SlotMap;
use tracing::debug;

/// Owner of the step/sequence pools and all timelines for one target type.
pub struct TweenRuntime<T> {
    pub(crate) steps: Pool<StepKey, Step<T>>,
    pub(crate) sequences: Pool<SequenceKey, Sequence>,
    pub(crate) timelines: SlotMap<TimelineKey, Timeline>,
    default_timeline: Option<TimelineKey>,
}

impl<T: Clone + 'static> TweenRuntime<T> {
    pub fn new() -> Self {
        Self {
            steps: Pool::new(),
            sequences: Pool::new(),
            timelines: SlotMap::with_key(),
            default_timeline: None,
        }
    }

    /// Create an additional timeline for host-scoped ticking.
    pub fn add_timeline(&mut self) -> TimelineKey {
        self.timelines.insert(Timeline::new())
    }

    /// The default timeline, created on first use.
    pub fn default_timeline(&mut self) -> TimelineKey {
        match self.default_timeline {
            Some(key) => key,
            None => {
                let key = self.timelines.insert(Timeline::new());
                self.default_timeline = Some(key);
                key
            }
        }
    }

    /// Start a new animation chain on `target`, attached to the default
    /// timeline. The chain runs as soon as the runtime is advanced.
    pub fn tween(&mut self, target: T) -> TweenBuilder<'_, T> {
        let timeline = self.default_timeline();
        self.spawn(timeline, target)
    }

    /// Start a new animation chain on an explicit timeline.
    pub fn tween_on(&mut self, timeline: TimelineKey, target: T) -> Result<TweenBuilder<'_, T>> {
        if !self.timelines.contains_key(timeline) {
            return Err(TweenError::UnknownTimeline);
        }
        Ok(self.spawn(timeline, target))
    }

    fn spawn(&mut self, timeline: TimelineKey, target: T) -> TweenBuilder<'_, T> {
        let sequence = self.sequences.acquire();
        let step = self.steps.acquire();

        if let Some(slot) = self.steps.get_mut(step) {
            slot.target = Some(target.clone());
        }
        if let Some(slot) = self.sequences.get_mut(sequence) {
            slot.add_step(&mut self.steps, step);
            slot.run();
        }
        if let Some(slot) = self.timelines.get_mut(timeline) {
            slot.add_sequence(sequence);
        }
        debug!(sequence = ?sequence, "spawned tween sequence");

        TweenBuilder::new(self, sequence, step, target)
    }

    /// Advance every timeline by `delta` seconds. The host calls this once
    /// per tick; `delta` must be nonnegative (tick-source contract).
    pub fn advance(&mut self, delta: f32) {
        debug_assert!(delta >= 0.0, "tick delta must be nonnegative");
        for (_, timeline) in self.timelines.iter_mut() {
            timeline.advance(&mut self.sequences, &mut self.steps, delta);
        }
    }

    /// Advance a single timeline by `delta` seconds.
    pub fn advance_timeline(&mut self, timeline: TimelineKey, delta: f32) -> Result<()> {
        debug_assert!(delta >= 0.0, "tick delta must be nonnegative");
        let Some(slot) = self.timelines.get_mut(timeline) else {
            return Err(TweenError::UnknownTimeline);
        };
        slot.advance(&mut self.sequences, &mut self.steps, delta);
        Ok(())
    }

    /// Pause a running sequence in place.
    pub fn pause(&mut self, sequence: SequenceKey) -> Result<()> {
        self.live_sequence_mut(sequence)?.pause();
        Ok(())
    }

    /// Resume a paused sequence.
    pub fn resume(&mut self, sequence: SequenceKey) -> Result<()> {
        self.live_sequence_mut(sequence)?.run();
        Ok(())
    }

    /// Force the sequence's active step to complete now.
    pub fn skip_current(&mut self, sequence: SequenceKey) -> Result<()> {
        if !self.sequences.is_live(sequence) {
            return Err(TweenError::StaleSequence);
        }
        if let Some(slot) = self.sequences.get_mut(sequence) {
            slot.skip_current(&mut self.steps);
        }
        Ok(())
    }

    /// Whether the sequence ran past its last step. Completed sequences are
    /// reclaimed on the next tick, after which the handle goes stale.
    pub fn is_complete(&self, sequence: SequenceKey) -> Result<bool> {
        if !self.sequences.is_live(sequence) {
            return Err(TweenError::StaleSequence);
        }
        Ok(self.sequences.get(sequence).is_some_and(Sequence::is_complete))
    }

    /// Live (not yet reclaimed) sequences across all timelines.
    pub fn sequence_count(&self) -> usize {
        self.sequences.live_count()
    }

    /// Pooled slots waiting for reuse, `(sequences, steps)`.
    pub fn pooled_counts(&self) -> (usize, usize) {
        (self.sequences.free_count(), self.steps.free_count())
    }

    fn live_sequence_mut(&mut self, key: SequenceKey) -> Result<&mut Sequence> {
        if !self.sequences.is_live(key) {
            return Err(TweenError::StaleSequence);
        }
        self.sequences.get_mut(key).ok_or(TweenError::StaleSequence)
    }
}

impl<T: Clone + 'static> Default for TweenRuntime<T> {
    fn default() -> Self {
        Self::new()
    }
}
