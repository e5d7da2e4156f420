//! Slew Tween Engine
//!
//! Time-driven property animation: steps, sequences, and timelines.
//!
//! # Features
//!
//! - **Steps**: atomic timed units running any number of interpolations on a
//!   shared clock, with per-step callbacks and loop/repeat control flow
//! - **Sequences**: pooled chains of steps; unused frame time carries over to
//!   the next step within the same tick
//! - **Timelines**: sets of concurrently running sequences advanced together,
//!   with lazy reclamation of completed ones
//! - **Pooling**: steps and sequences are recycled through free lists, so the
//!   steady-state per-tick path allocates nothing
//!
//! The engine is single-threaded and tick-driven: the host calls
//! [`TweenRuntime::advance`] once per frame with its delta time. Property
//! access goes through the [`slew_core::PropertyAdapter`] seam; the engine
//! never inspects target handles.
//!
//! # Example
//!
//! ```rust
//! use slew_tween::{easing, TweenRuntime};
//! use slew_core::PropertyAdapter;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! struct ValueAdapter;
//!
//! impl PropertyAdapter<Rc<Cell<f32>>, f32> for ValueAdapter {
//!     fn read(&self, target: &Rc<Cell<f32>>) -> f32 {
//!         target.get()
//!     }
//!     fn write(&self, target: &Rc<Cell<f32>>, value: f32) {
//!         target.set(value);
//!     }
//! }
//!
//! let value = Rc::new(Cell::new(0.0f32));
//! let mut runtime = TweenRuntime::new();
//!
//! runtime
//!     .tween(value.clone())
//!     .animate(ValueAdapter, 10.0, 2.0)
//!     .ease(easing::quad_out);
//!
//! runtime.advance(1.0);
//! assert!(value.get() > 0.0);
//! ```

pub mod builder;
pub mod easing;
pub mod error;
pub mod interp;
pub mod pool;
pub mod runtime;
pub mod sequence;
pub mod step;
pub mod timeline;

pub use builder::TweenBuilder;
pub use easing::EaseFn;
pub use error::TweenError;
pub use interp::Interp;
pub use pool::{Pool, Recycle};
pub use runtime::TweenRuntime;
pub use sequence::{Sequence, SequenceKey};
pub use step::{Step, StepKey};
pub use timeline::{Timeline, TimelineKey};
