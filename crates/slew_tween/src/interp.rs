//! Interpolations
//!
//! An interpolation binds an easing function, a duration, and a start/end
//! value pair to one property-adapter write. The start may be captured
//! lazily from the live object on the first update (not at construction:
//! earlier steps can run for an arbitrary number of frames first), and the
//! end may be relative to that start.

use crate::easing::{self, EaseFn};
use slew_core::{Animatable, PropertyAdapter};
use std::any::Any;
use std::marker::PhantomData;

/// Object-safe interpolation surface a [`crate::Step`] drives.
///
/// Erases the value type and adapter so one step can mix interpolations over
/// different value kinds on a shared clock.
pub trait TweenInterp<T> {
    /// Sub-duration of this interpolation within its step.
    fn duration(&self) -> f32;

    /// Replace the easing function.
    fn set_ease(&mut self, ease: EaseFn);

    /// Advance to `elapsed` seconds of step time and write the blended value
    /// through the adapter.
    fn advance(&mut self, target: &T, elapsed: f32);

    /// Clear the lazy-capture guard so the next update re-reads the start
    /// value (used when a step loops back).
    fn reset(&mut self);

    /// Downcast hook for callbacks inspecting the concrete interpolation.
    fn as_any(&self) -> &dyn Any;
}

/// The one generic interpolation type: value kind and adapter are chosen at
/// construction, blending goes through [`Animatable`].
pub struct Interp<T, V, A>
where
    V: Animatable,
    A: PropertyAdapter<T, V>,
{
    adapter: A,
    ease: EaseFn,
    duration: f32,
    from: V,
    to: V,
    start: V,
    end: V,
    current: V,
    relative: bool,
    reflect_from: bool,
    initialized: bool,
    _target: PhantomData<fn(&T)>,
}

impl<T, V, A> Interp<T, V, A>
where
    V: Animatable,
    A: PropertyAdapter<T, V>,
{
    fn new(adapter: A, from: V, to: V, reflect_from: bool, relative: bool, duration: f32) -> Self {
        Self {
            adapter,
            ease: easing::linear,
            duration,
            from,
            to,
            start: V::default(),
            end: V::default(),
            current: V::default(),
            relative,
            reflect_from,
            initialized: false,
            _target: PhantomData,
        }
    }

    /// Animate to an absolute end value, capturing the start from the live
    /// object on first update.
    pub fn to(adapter: A, to: V, duration: f32) -> Self {
        Self::new(adapter, V::default(), to, true, false, duration)
    }

    /// Animate by a relative delta, capturing the start from the live object
    /// on first update.
    pub fn by(adapter: A, delta: V, duration: f32) -> Self {
        Self::new(adapter, V::default(), delta, true, true, duration)
    }

    /// Animate between an explicit start and an absolute end value.
    pub fn from_to(adapter: A, from: V, to: V, duration: f32) -> Self {
        Self::new(adapter, from, to, false, false, duration)
    }

    /// Animate from an explicit start by a relative delta.
    pub fn from_by(adapter: A, from: V, delta: V, duration: f32) -> Self {
        Self::new(adapter, from, delta, false, true, duration)
    }

    /// Last value this interpolation computed.
    pub fn current(&self) -> V {
        self.current
    }

    /// Resolved start value (meaningful once the first update ran).
    pub fn start(&self) -> V {
        self.start
    }

    /// Resolved end value (meaningful once the first update ran).
    pub fn end(&self) -> V {
        self.end
    }
}

impl<T, V, A> TweenInterp<T> for Interp<T, V, A>
where
    T: 'static,
    V: Animatable + 'static,
    A: PropertyAdapter<T, V> + 'static,
{
    fn duration(&self) -> f32 {
        self.duration
    }

    fn set_ease(&mut self, ease: EaseFn) {
        self.ease = ease;
    }

    fn advance(&mut self, target: &T, elapsed: f32) {
        if !self.initialized {
            self.start = if self.reflect_from {
                self.adapter.read(target)
            } else {
                self.from
            };
            self.end = if self.relative {
                V::combine(self.start, self.to)
            } else {
                self.to
            };
            self.initialized = true;
        }

        // Zero-length interpolations snap straight to their end value.
        let t = if self.duration > 0.0 {
            elapsed / self.duration
        } else {
            1.0
        };
        let progress = (self.ease)(t);

        self.current = V::blend(self.start, self.end, progress);
        self.adapter.write(target, self.current);
    }

    fn reset(&mut self) {
        self.initialized = false;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
