//! Slew Core Primitives
//!
//! Foundational types shared by the Slew animation engine:
//!
//! - **Animatable Values**: scalar, vector, and rotation types with a common
//!   blend/combine capability
//! - **Property Adapters**: the read/write seam between the engine and a
//!   host's live objects

pub mod adapter;
pub mod value;

pub use adapter::PropertyAdapter;
pub use value::{Animatable, Quat, Vec3};
