//! Sequences
//!
//! A sequence is an ordered, pooled chain of steps executed one at a time.
//! Frame time left over when a step completes is fed to the next step within
//! the same update call, so chains of zero-duration or already-elapsed steps
//! resolve in a single tick instead of lagging a frame each.

use crate::pool::{Pool, Recycle};
use crate::step::{Step, StepExit, StepKey};
use slotmap::new_key_type;
use tracing::warn;

new_key_type! {
    /// Key of a pooled sequence slot.
    pub struct SequenceKey;
}

/// An ordered chain of steps for one animation chain.
#[derive(Default)]
pub struct Sequence {
    pub(crate) first: Option<StepKey>,
    pub(crate) current: Option<StepKey>,
    pub(crate) last: Option<StepKey>,
    pub(crate) count: usize,
    running: bool,
    complete: bool,
}

impl Recycle for Sequence {
    fn recycle(&mut self) {
        *self = Sequence::default();
    }
}

impl Sequence {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Set once the current step advanced past the last one.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of steps in the chain.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub(crate) fn run(&mut self) {
        self.running = true;
    }

    pub(crate) fn pause(&mut self) {
        self.running = false;
    }

    /// Advance by `delta` seconds, carrying step overflow forward within
    /// this call. Returns the time left after the whole chain completed
    /// (`delta` unchanged when not running).
    pub(crate) fn update<T>(&mut self, steps: &mut Pool<StepKey, Step<T>>, delta: f32) -> f32 {
        if !self.running {
            return delta;
        }

        let mut rest = delta;
        while rest > 0.0 {
            let Some(key) = self.current else {
                self.complete = true;
                break;
            };

            let (tick, next) = {
                let Some(step) = steps.get_mut(key) else {
                    panic!("sequence points at a released step slot");
                };
                let tick = step.update(rest);
                (tick, step.next)
            };
            rest = tick.rest;

            match tick.exit {
                None => {}
                Some(StepExit::Advance) => self.current = next,
                Some(StepExit::GoTo(id)) => self.jump_to(steps, &id),
            }
        }

        rest
    }

    /// Jump the current step to the one labeled `id`, scanning forward from
    /// the first step. A missing label completes the sequence.
    fn jump_to<T>(&mut self, steps: &Pool<StepKey, Step<T>>, id: &str) {
        let target = self.step_by_id(steps, id);
        if target.is_none() {
            warn!(step_id = %id, "loop target not found; completing sequence");
        }
        self.current = target;
    }

    pub(crate) fn step_by_id<T>(
        &self,
        steps: &Pool<StepKey, Step<T>>,
        id: &str,
    ) -> Option<StepKey> {
        let mut cursor = self.first;
        while let Some(key) = cursor {
            let step = steps.get(key)?;
            if step.id() == Some(id) {
                return Some(key);
            }
            cursor = step.next;
        }
        None
    }

    /// Append a step to the end of the chain.
    pub(crate) fn add_step<T>(&mut self, steps: &mut Pool<StepKey, Step<T>>, key: StepKey) {
        if self.current.is_none() {
            self.first = Some(key);
            self.last = Some(key);
            self.current = Some(key);
        } else if let Some(last) = self.last {
            if let Some(step) = steps.get_mut(last) {
                step.next = Some(key);
            }
            if let Some(step) = steps.get_mut(key) {
                step.prev = Some(last);
            }
            self.last = Some(key);
        }
        self.count += 1;
    }

    /// Force the current step to complete now, including its loop/advance
    /// transition. No-op when nothing is active.
    pub(crate) fn skip_current<T>(&mut self, steps: &mut Pool<StepKey, Step<T>>) {
        let Some(key) = self.current else {
            return;
        };
        let (exit, next) = {
            let Some(step) = steps.get_mut(key) else {
                return;
            };
            (step.skip(), step.next)
        };
        match exit {
            StepExit::Advance => self.current = next,
            StepExit::GoTo(id) => self.jump_to(steps, &id),
        }
    }
}
