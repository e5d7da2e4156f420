//! Fluent chain builder
//!
//! [`crate::TweenRuntime::tween`] hands out a builder positioned on the
//! chain's newest step. Every method returns the builder, so a whole chain
//! reads as one expression:
//!
//! ```ignore
//! runtime
//!     .tween(node.clone())
//!     .animate(PositionX, 120.0, 0.4)
//!     .ease(easing::quad_out)
//!     .delay(0.2)
//!     .animate_by(Opacity, -1.0, 0.3)
//!     .id("fade")
//!     .then()
//!     .animate(PositionX, 0.0, 0.4)
//!     .go_to("fade", 2);
//! ```
//!
//! Builder methods only touch steps that have not started accumulating
//! time; `ease`/`ease_all` are the exception and may be applied at any
//! point.

use crate::easing::EaseFn;
use crate::interp::{Interp, TweenInterp};
use crate::runtime::TweenRuntime;
use crate::sequence::SequenceKey;
use crate::step::{Step, StepKey};
use slew_core::{Animatable, PropertyAdapter};
use std::rc::Rc;

/// Builder over one sequence, positioned on its newest step.
pub struct TweenBuilder<'a, T: Clone + 'static> {
    runtime: &'a mut TweenRuntime<T>,
    sequence: SequenceKey,
    step: StepKey,
    target: T,
}

impl<'a, T: Clone + 'static> TweenBuilder<'a, T> {
    pub(crate) fn new(
        runtime: &'a mut TweenRuntime<T>,
        sequence: SequenceKey,
        step: StepKey,
        target: T,
    ) -> Self {
        Self {
            runtime,
            sequence,
            step,
            target,
        }
    }

    /// Animate to an absolute end value; the start is captured from the live
    /// object when this step first updates.
    pub fn animate<V, A>(mut self, adapter: A, to: V, duration: f32) -> Self
    where
        V: Animatable + 'static,
        A: PropertyAdapter<T, V> + 'static,
    {
        self.add_interp(Box::new(Interp::to(adapter, to, duration)));
        self
    }

    /// Animate by a relative delta on top of the live start value.
    pub fn animate_by<V, A>(mut self, adapter: A, delta: V, duration: f32) -> Self
    where
        V: Animatable + 'static,
        A: PropertyAdapter<T, V> + 'static,
    {
        self.add_interp(Box::new(Interp::by(adapter, delta, duration)));
        self
    }

    /// Animate between an explicit start and an absolute end value.
    pub fn animate_from<V, A>(mut self, adapter: A, from: V, to: V, duration: f32) -> Self
    where
        V: Animatable + 'static,
        A: PropertyAdapter<T, V> + 'static,
    {
        self.add_interp(Box::new(Interp::from_to(adapter, from, to, duration)));
        self
    }

    /// Animate from an explicit start by a relative delta.
    pub fn animate_from_by<V, A>(mut self, adapter: A, from: V, delta: V, duration: f32) -> Self
    where
        V: Animatable + 'static,
        A: PropertyAdapter<T, V> + 'static,
    {
        self.add_interp(Box::new(Interp::from_by(adapter, from, delta, duration)));
        self
    }

    /// Set the easing of the most recently added interpolation.
    pub fn ease(self, ease: EaseFn) -> Self {
        if let Some(step) = self.runtime.steps.get_mut(self.step) {
            step.set_last_ease(ease);
        }
        self
    }

    /// Set the easing of every interpolation on the current step.
    pub fn ease_all(self, ease: EaseFn) -> Self {
        if let Some(step) = self.runtime.steps.get_mut(self.step) {
            step.set_all_eases(ease);
        }
        self
    }

    /// Insert a delay of `duration` seconds before whatever comes next.
    ///
    /// A still-empty current step becomes the delay; otherwise a dedicated
    /// delay step is appended. Either way a fresh step is opened for the
    /// interpolations that follow.
    pub fn delay(mut self, duration: f32) -> Self {
        let fill_current = self
            .runtime
            .steps
            .get(self.step)
            .is_some_and(|step| step.empty);

        let delay_key = if fill_current {
            self.step
        } else {
            self.append_step(None)
        };
        if let Some(step) = self.runtime.steps.get_mut(delay_key) {
            step.set_delay(duration);
        }

        self.step = self.append_step(Some(self.target.clone()));
        self
    }

    /// Branch to a new step on the same target.
    pub fn then(mut self) -> Self {
        self.step = self.append_step(Some(self.target.clone()));
        self
    }

    /// Branch to a new step on a different target; subsequent steps inherit
    /// it.
    pub fn then_with(mut self, target: T) -> Self {
        self.target = target.clone();
        self.step = self.append_step(Some(target));
        self
    }

    /// Label the current step so a later `go_to` can jump back to it.
    pub fn id(self, id: impl Into<String>) -> Self {
        if let Some(step) = self.runtime.steps.get_mut(self.step) {
            step.id = Some(id.into());
        }
        self
    }

    /// When the current step completes, jump back to the step labeled `id`,
    /// `repeat` extra times (the labeled sub-chain runs `1 + repeat` times
    /// total).
    pub fn go_to(self, id: impl Into<String>, repeat: u32) -> Self {
        if let Some(step) = self.runtime.steps.get_mut(self.step) {
            step.goto_id = Some(id.into());
            step.goto_repeat = repeat;
        }
        self
    }

    /// Invoke `callback` after each update of the current step.
    pub fn on_update(self, callback: impl Fn(&Step<T>) + 'static) -> Self {
        if let Some(step) = self.runtime.steps.get_mut(self.step) {
            step.on_update = Some(Rc::new(callback));
        }
        self
    }

    /// Invoke `callback` when the current step completes its final pass.
    pub fn on_complete(self, callback: impl Fn(&Step<T>) + 'static) -> Self {
        if let Some(step) = self.runtime.steps.get_mut(self.step) {
            step.on_complete = Some(Rc::new(callback));
        }
        self
    }

    /// Handle of the sequence being built, for the runtime control surface.
    pub fn sequence(&self) -> SequenceKey {
        self.sequence
    }

    /// Handle of the step the builder is positioned on.
    pub fn step(&self) -> StepKey {
        self.step
    }

    fn add_interp(&mut self, interp: Box<dyn TweenInterp<T>>) {
        if let Some(step) = self.runtime.steps.get_mut(self.step) {
            step.add_interp(interp);
        }
    }

    fn append_step(&mut self, target: Option<T>) -> StepKey {
        let key = self.runtime.steps.acquire();
        if let Some(step) = self.runtime.steps.get_mut(key) {
            step.target = target;
        }
        if let Some(sequence) = self.runtime.sequences.get_mut(self.sequence) {
            sequence.add_step(&mut self.runtime.steps, key);
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing;
    use crate::sequence::Sequence;
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

    #[test]
    fn test_delay_on_empty_first_step_fills_it() {
        let mut runtime: TweenRuntime<Target> = TweenRuntime::new();
        let target: Target = Rc::new(Cell::new(0.0));

        let sequence = runtime.tween(target).delay(1.0).sequence();
        // Delay consumed the fresh first step, then opened one for what
        // follows
        assert_eq!(runtime.sequences.get(sequence).map(Sequence::len), Some(2));
    }

    #[test]
    fn test_delay_after_interp_appends_dedicated_step() {
        let mut runtime: TweenRuntime<Target> = TweenRuntime::new();
        let target: Target = Rc::new(Cell::new(0.0));

        let sequence = runtime
            .tween(target)
            .animate(ValueAdapter, 5.0, 1.0)
            .delay(0.5)
            .sequence();
        // interp step + delay step + fresh step
        assert_eq!(runtime.sequences.get(sequence).map(Sequence::len), Some(3));
    }

    #[test]
    fn test_then_branches_on_same_target() {
        let mut runtime: TweenRuntime<Target> = TweenRuntime::new();
        let target: Target = Rc::new(Cell::new(0.0));

        let builder = runtime
            .tween(target.clone())
            .animate(ValueAdapter, 5.0, 1.0)
            .then()
            .animate(ValueAdapter, 0.0, 1.0);
        let step = builder.step();
        drop(builder);

        assert!(Rc::ptr_eq(
            runtime.steps.get(step).and_then(|s| s.target()).unwrap(),
            &target
        ));
    }

    #[test]
    fn test_ease_targets_last_interp_only() {
        let mut runtime: TweenRuntime<Target> = TweenRuntime::new();
        let a: Target = Rc::new(Cell::new(0.0));
        let b: Target = Rc::new(Cell::new(0.0));

        struct CellAdapter(Target);
        impl PropertyAdapter<Target, f32> for CellAdapter {
            fn read(&self, _: &Target) -> f32 {
                self.0.get()
            }
            fn write(&self, _: &Target, value: f32) {
                self.0.set(value);
            }
        }

        runtime
            .tween(a.clone())
            .animate_from(CellAdapter(a.clone()), 0.0, 1.0, 1.0)
            .animate_from(CellAdapter(b.clone()), 0.0, 1.0, 1.0)
            .ease(easing::quad_in);

        runtime.advance(0.5);
        assert_eq!(a.get(), 0.5, "first interp keeps linear easing");
        assert_eq!(b.get(), 0.25, "last interp got quad_in");
    }

    #[test]
    fn test_callbacks_attach_to_current_step() {
        let mut runtime: TweenRuntime<Target> = TweenRuntime::new();
        let target: Target = Rc::new(Cell::new(0.0));
        let completed = Rc::new(Cell::new(false));
        let probe = completed.clone();

        runtime
            .tween(target)
            .delay(1.0)
            .on_complete(move |_| probe.set(true));

        runtime.advance(0.5);
        assert!(!completed.get());
        runtime.advance(1.0);
        assert!(completed.get(), "trailing step completion fires the hook");
    }
}
