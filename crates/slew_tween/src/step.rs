//! Steps
//!
//! A step is the atomic timed unit of a sequence: zero or more
//! interpolations sharing its clock, optional update/complete callbacks, and
//! optional loop control (jump back to a labeled step N times). A step with
//! no interpolations is a pure delay.

use crate::easing::EaseFn;
use crate::interp::TweenInterp;
use crate::pool::Recycle;
use slotmap::new_key_type;
use smallvec::SmallVec;
use std::rc::Rc;

new_key_type! {
    /// Key of a pooled step slot.
    pub struct StepKey;
}

/// Callback invoked with the step after its interpolations ran.
pub type StepCallback<T> = Rc<dyn Fn(&Step<T>)>;

/// What the sequence should do after a step finished this tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum StepExit {
    /// Move on to the next linked step.
    Advance,
    /// Jump back to the step labeled with this id.
    GoTo(String),
}

/// Result of advancing a step by one slice of frame time.
pub(crate) struct StepTick {
    /// Frame time left over past this step's duration.
    pub rest: f32,
    /// Present when the step finished during this update.
    pub exit: Option<StepExit>,
}

/// An atomic timed animation unit.
pub struct Step<T> {
    pub(crate) prev: Option<StepKey>,
    pub(crate) next: Option<StepKey>,
    pub(crate) target: Option<T>,
    pub(crate) id: Option<String>,
    pub(crate) elapsed: f32,
    pub(crate) duration: f32,
    /// Fresh placeholder: no interpolations or delay assigned yet. Consumed
    /// by the builder's delay rule.
    pub(crate) empty: bool,
    pub(crate) interps: SmallVec<[Box<dyn TweenInterp<T>>; 2]>,
    pub(crate) goto_id: Option<String>,
    pub(crate) goto_repeat: u32,
    pub(crate) goto_count: u32,
    pub(crate) on_update: Option<StepCallback<T>>,
    pub(crate) on_complete: Option<StepCallback<T>>,
}

impl<T> Default for Step<T> {
    fn default() -> Self {
        Self {
            prev: None,
            next: None,
            target: None,
            id: None,
            elapsed: 0.0,
            duration: 0.0,
            empty: true,
            interps: SmallVec::new(),
            goto_id: None,
            goto_repeat: 0,
            goto_count: 0,
            on_update: None,
            on_complete: None,
        }
    }
}

impl<T> Recycle for Step<T> {
    fn recycle(&mut self) {
        *self = Step::default();
    }
}

impl<T> Step<T> {
    /// Time accumulated toward this step's duration.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Step duration: the max over its interpolations' durations, or the
    /// explicit delay for interpolation-less steps.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Label, if the step was given one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Target handle shared by this step's interpolations.
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn interp_count(&self) -> usize {
        self.interps.len()
    }

    /// Downcast an interpolation to its concrete type, for callback
    /// inspection of its current value.
    pub fn interp_as<I: 'static>(&self, index: usize) -> Option<&I> {
        self.interps.get(index)?.as_any().downcast_ref()
    }

    pub(crate) fn add_interp(&mut self, interp: Box<dyn TweenInterp<T>>) {
        self.duration = self.duration.max(interp.duration());
        self.interps.push(interp);
        self.empty = false;
    }

    pub(crate) fn set_last_ease(&mut self, ease: EaseFn) {
        if let Some(interp) = self.interps.last_mut() {
            interp.set_ease(ease);
        }
    }

    pub(crate) fn set_all_eases(&mut self, ease: EaseFn) {
        for interp in self.interps.iter_mut() {
            interp.set_ease(ease);
        }
    }

    pub(crate) fn set_delay(&mut self, duration: f32) {
        self.duration = duration;
        self.empty = false;
    }

    /// Advance by `delta` seconds of frame time.
    ///
    /// Returns the unconsumed overflow past this step's duration plus, if
    /// the step finished, the transition the sequence should take. Ordering
    /// within one call: interpolations, then `on_update` (exactly once),
    /// then the completion check.
    pub(crate) fn update(&mut self, delta: f32) -> StepTick {
        self.elapsed += delta;

        let mut rest = 0.0;
        if self.elapsed >= self.duration {
            rest = self.elapsed - self.duration;
            self.elapsed = self.duration;
        }

        if !self.interps.is_empty() {
            let Some(target) = self.target.as_ref() else {
                panic!("tween step has interpolations but no target handle set");
            };
            let elapsed = self.elapsed;
            for interp in self.interps.iter_mut() {
                // Shorter interpolations freeze at their last value once
                // their own sub-duration is exceeded.
                if elapsed <= interp.duration() {
                    interp.advance(target, elapsed);
                }
            }
        }

        if let Some(on_update) = self.on_update.clone() {
            on_update(self);
        }

        let exit = if self.elapsed >= self.duration {
            Some(self.finish())
        } else {
            None
        };

        StepTick { rest, exit }
    }

    /// Complete the step: reset transient state, then either loop back or
    /// advance.
    pub(crate) fn finish(&mut self) -> StepExit {
        self.elapsed = 0.0;
        for interp in self.interps.iter_mut() {
            interp.reset();
        }

        if self.goto_count < self.goto_repeat {
            self.goto_count += 1;
            StepExit::GoTo(self.goto_id.clone().unwrap_or_default())
        } else {
            self.goto_count = 0;
            if let Some(on_complete) = self.on_complete.clone() {
                on_complete(self);
            }
            StepExit::Advance
        }
    }

    /// Force completion now. Interpolations that never ran are left
    /// untouched; they do not snap to their final values.
    pub(crate) fn skip(&mut self) -> StepExit {
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::Interp;
    use slew_core::PropertyAdapter;
    use std::cell::Cell;

    type Target = Rc<Cell<f32>>;

    struct ValueAdapter;

    impl PropertyAdapter<Target, f32> for ValueAdapter {
        fn read(&self, target: &Target) -> f32 {
            target.get()
        }
        fn write(&self, target: &Target, value: f32) {
            target.set(value);
        }
    }

    fn step_with_interp(target: &Target, to: f32, duration: f32) -> Step<Target> {
        let mut step = Step::default();
        step.target = Some(target.clone());
        step.add_interp(Box::new(Interp::from_to(ValueAdapter, 0.0, to, duration)));
        step
    }

    #[test]
    fn test_update_returns_overflow() {
        let target: Target = Rc::new(Cell::new(0.0));
        let mut step = step_with_interp(&target, 10.0, 1.0);

        let tick = step.update(0.4);
        assert_eq!(tick.rest, 0.0);
        assert!(tick.exit.is_none());

        let tick = step.update(0.9);
        assert!((tick.rest - 0.3).abs() < 1e-6);
        assert_eq!(tick.exit, Some(StepExit::Advance));
        assert_eq!(target.get(), 10.0);
    }

    #[test]
    fn test_pure_delay_step() {
        let mut step: Step<Target> = Step::default();
        step.set_delay(2.0);

        let tick = step.update(1.0);
        assert_eq!(tick.rest, 0.0);
        assert!(tick.exit.is_none());

        let tick = step.update(1.5);
        assert!((tick.rest - 0.5).abs() < 1e-6);
        assert_eq!(tick.exit, Some(StepExit::Advance));
    }

    #[test]
    fn test_step_duration_is_max_of_interps() {
        let target: Target = Rc::new(Cell::new(0.0));
        let mut step = Step::default();
        step.target = Some(target.clone());
        step.add_interp(Box::new(Interp::from_to(ValueAdapter, 0.0, 1.0, 0.5)));
        step.add_interp(Box::new(Interp::from_to(ValueAdapter, 0.0, 1.0, 2.0)));
        assert_eq!(step.duration(), 2.0);
    }

    #[test]
    fn test_shorter_interp_freezes_at_final_value() {
        let short_target: Target = Rc::new(Cell::new(0.0));
        let long_target: Target = Rc::new(Cell::new(0.0));
        let mut step = Step::default();
        step.target = Some(short_target.clone());

        // Both interps write through adapters bound to different cells so
        // the short one's frozen value is observable.
        struct CellAdapter(Target);
        impl PropertyAdapter<Target, f32> for CellAdapter {
            fn read(&self, _: &Target) -> f32 {
                self.0.get()
            }
            fn write(&self, _: &Target, value: f32) {
                self.0.set(value);
            }
        }

        step.add_interp(Box::new(Interp::from_to(
            CellAdapter(short_target.clone()),
            0.0,
            10.0,
            1.0,
        )));
        step.add_interp(Box::new(Interp::from_to(
            CellAdapter(long_target.clone()),
            0.0,
            10.0,
            2.0,
        )));

        step.update(1.0);
        assert_eq!(short_target.get(), 10.0);
        assert_eq!(long_target.get(), 5.0);

        step.update(0.5);
        // Short interp's sub-duration exceeded: it no longer updates
        assert_eq!(short_target.get(), 10.0);
        assert_eq!(long_target.get(), 7.5);
    }

    #[test]
    fn test_on_update_fires_once_per_call() {
        let target: Target = Rc::new(Cell::new(0.0));
        let calls = Rc::new(Cell::new(0u32));
        let calls_probe = calls.clone();

        let mut step = Step::default();
        step.target = Some(target.clone());
        step.add_interp(Box::new(Interp::from_to(ValueAdapter, 0.0, 1.0, 1.0)));
        step.add_interp(Box::new(Interp::from_to(ValueAdapter, 0.0, 2.0, 1.0)));
        step.on_update = Some(Rc::new(move |_| calls_probe.set(calls_probe.get() + 1)));

        step.update(0.5);
        assert_eq!(calls.get(), 1);
        step.update(0.25);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_finish_resets_elapsed_and_interps() {
        let target: Target = Rc::new(Cell::new(1.0));
        let mut step = Step::default();
        step.target = Some(target.clone());
        step.add_interp(Box::new(Interp::by(ValueAdapter, 4.0, 1.0)));

        step.update(1.0);
        assert_eq!(target.get(), 5.0);
        assert_eq!(step.elapsed(), 0.0);

        // After the reset the start is re-captured from the live value
        step.update(1.0);
        assert_eq!(target.get(), 9.0);
    }

    #[test]
    fn test_goto_counts_down_then_advances() {
        let completions = Rc::new(Cell::new(0u32));
        let probe = completions.clone();

        let mut step: Step<Target> = Step::default();
        step.set_delay(1.0);
        step.goto_id = Some("a".to_string());
        step.goto_repeat = 2;
        step.on_complete = Some(Rc::new(move |_| probe.set(probe.get() + 1)));

        assert_eq!(step.update(1.0).exit, Some(StepExit::GoTo("a".into())));
        assert_eq!(step.update(1.0).exit, Some(StepExit::GoTo("a".into())));
        assert_eq!(step.update(1.0).exit, Some(StepExit::Advance));
        assert_eq!(step.goto_count, 0, "counter rearms after the final pass");
        assert_eq!(completions.get(), 1, "on_complete only fires on the final pass");
    }

    #[test]
    fn test_skip_forces_completion_without_final_values() {
        let target: Target = Rc::new(Cell::new(0.0));
        let mut step = step_with_interp(&target, 10.0, 5.0);

        let exit = step.skip();
        assert_eq!(exit, StepExit::Advance);
        // Documented gap: the interp never ran, so no value was written
        assert_eq!(target.get(), 0.0);
    }

    #[test]
    fn test_recycle_restores_defaults() {
        let target: Target = Rc::new(Cell::new(0.0));
        let mut step = step_with_interp(&target, 10.0, 5.0);
        step.id = Some("x".into());
        step.update(1.0);

        step.recycle();
        assert_eq!(step.duration(), 0.0);
        assert_eq!(step.elapsed(), 0.0);
        assert_eq!(step.interp_count(), 0);
        assert!(step.id().is_none());
        assert!(step.target().is_none());
        assert!(step.on_update.is_none() && step.on_complete.is_none());
        assert!(step.prev.is_none() && step.next.is_none());
    }

    #[test]
    #[should_panic(expected = "no target handle")]
    fn test_interp_without_target_is_a_builder_bug() {
        let mut step: Step<Target> = Step::default();
        step.add_interp(Box::new(Interp::from_to(ValueAdapter, 0.0, 1.0, 1.0)));
        step.update(0.5);
    }
}
