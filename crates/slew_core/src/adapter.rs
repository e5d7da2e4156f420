//! Property adapter seam
//!
//! An adapter is the engine's only way to touch a live object: one adapter
//! per (value type, semantic property) pair. The engine stores the target
//! handle opaquely and never inspects it, so `T` can be anything the host
//! uses to identify an object: an `Rc` to the object itself, an entity id
//! into a world the adapter holds, or a plain index.

use crate::value::Animatable;

/// Read/write capability for one animated property on a target.
///
/// Both methods take `&self`; adapters that mutate host state do so through
/// interior mutability on the adapter or the handle. The engine is
/// single-threaded (tick-driven), so `Cell`/`RefCell` suffice.
pub trait PropertyAdapter<T, V: Animatable> {
    /// Current value of the property on `target`.
    fn read(&self, target: &T) -> V;

    /// Write a new value for the property on `target`.
    fn write(&self, target: &T, value: V);
}
