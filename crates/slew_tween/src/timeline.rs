//! Timelines
//!
//! A timeline is a set of concurrently running sequences advanced together
//! once per tick. Sequences do not share state, so only insertion order is
//! fixed; completed sequences are reclaimed lazily after the update pass,
//! scanning in reverse so removal does not invalidate pending indices.

use crate::pool::Pool;
use crate::sequence::{Sequence, SequenceKey};
use crate::step::{Step, StepKey};
use slotmap::new_key_type;
use tracing::debug;

new_key_type! {
    /// Key of a timeline owned by a runtime.
    pub struct TimelineKey;
}

/// A set of independently running sequences.
#[derive(Default)]
pub struct Timeline {
    sequences: Vec<SequenceKey>,
    dirty: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequences currently attached (live and not yet reclaimed).
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub(crate) fn add_sequence(&mut self, key: SequenceKey) {
        self.sequences.push(key);
    }

    /// Advance every sequence by `delta`, then reclaim completed ones.
    ///
    /// Reclamation returns the whole step chain to the step pool before
    /// releasing the sequence itself.
    pub(crate) fn advance<T>(
        &mut self,
        sequences: &mut Pool<SequenceKey, Sequence>,
        steps: &mut Pool<StepKey, Step<T>>,
        delta: f32,
    ) {
        for &key in &self.sequences {
            let Some(sequence) = sequences.get_mut(key) else {
                continue;
            };
            sequence.update(steps, delta);
            if sequence.is_complete() {
                self.dirty = true;
            }
        }

        if self.dirty {
            for index in (0..self.sequences.len()).rev() {
                let key = self.sequences[index];
                let complete = sequences.get(key).is_some_and(Sequence::is_complete);
                if !complete {
                    continue;
                }
                self.sequences.remove(index);
                self.dispose(sequences, steps, key);
            }
            self.dirty = false;
        }
    }

    fn dispose<T>(
        &mut self,
        sequences: &mut Pool<SequenceKey, Sequence>,
        steps: &mut Pool<StepKey, Step<T>>,
        key: SequenceKey,
    ) {
        let mut cursor = sequences.get(key).and_then(|s| s.first);
        while let Some(step_key) = cursor {
            cursor = steps.get(step_key).and_then(|s| s.next);
            steps.release(step_key);
        }
        sequences.release(key);
        debug!(sequence = ?key, "disposed completed tween sequence");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delay_sequence(
        sequences: &mut Pool<SequenceKey, Sequence>,
        steps: &mut Pool<StepKey, Step<()>>,
        durations: &[f32],
    ) -> SequenceKey {
        let seq_key = sequences.acquire();
        for &duration in durations {
            let step_key = steps.acquire();
            if let Some(step) = steps.get_mut(step_key) {
                step.set_delay(duration);
            }
            if let Some(seq) = sequences.get_mut(seq_key) {
                seq.add_step(steps, step_key);
            }
        }
        if let Some(seq) = sequences.get_mut(seq_key) {
            seq.run();
        }
        seq_key
    }

    #[test]
    fn test_completed_sequences_are_reclaimed() {
        let mut sequences: Pool<SequenceKey, Sequence> = Pool::new();
        let mut steps: Pool<StepKey, Step<()>> = Pool::new();
        let mut timeline = Timeline::new();

        let short = delay_sequence(&mut sequences, &mut steps, &[1.0]);
        let long = delay_sequence(&mut sequences, &mut steps, &[5.0, 5.0]);
        timeline.add_sequence(short);
        timeline.add_sequence(long);

        timeline.advance(&mut sequences, &mut steps, 2.0);
        assert_eq!(timeline.len(), 1);
        assert!(!sequences.is_live(short));
        assert!(sequences.is_live(long));
        assert_eq!(steps.free_count(), 1, "short chain returned to the pool");

        timeline.advance(&mut sequences, &mut steps, 20.0);
        assert!(timeline.is_empty());
        assert_eq!(sequences.live_count(), 0);
        assert_eq!(steps.live_count(), 0);
    }

    #[test]
    fn test_advance_zero_changes_nothing() {
        let mut sequences: Pool<SequenceKey, Sequence> = Pool::new();
        let mut steps: Pool<StepKey, Step<()>> = Pool::new();
        let mut timeline = Timeline::new();

        let key = delay_sequence(&mut sequences, &mut steps, &[1.0]);
        timeline.add_sequence(key);
        timeline.advance(&mut sequences, &mut steps, 0.75);

        timeline.advance(&mut sequences, &mut steps, 0.0);
        assert_eq!(timeline.len(), 1);
        assert!(sequences.is_live(key));
        let elapsed = sequences
            .get(key)
            .and_then(|s| s.current)
            .and_then(|k| steps.get(k))
            .map(|s| s.elapsed());
        assert_eq!(elapsed, Some(0.75));
    }

    #[test]
    fn test_pool_reuse_across_generations() {
        let mut sequences: Pool<SequenceKey, Sequence> = Pool::new();
        let mut steps: Pool<StepKey, Step<()>> = Pool::new();
        let mut timeline = Timeline::new();

        let first = delay_sequence(&mut sequences, &mut steps, &[1.0]);
        timeline.add_sequence(first);
        timeline.advance(&mut sequences, &mut steps, 2.0);
        assert_eq!(sequences.free_count(), 1);

        // The next chain must not allocate new slots
        let second = delay_sequence(&mut sequences, &mut steps, &[1.0]);
        timeline.add_sequence(second);
        assert_eq!(second, first, "sequence slot recycled");
        assert_eq!(sequences.free_count(), 0);
        assert_eq!(steps.free_count(), 0);
    }
}
