//! Animatable value types
//!
//! Every value kind the engine can interpolate implements [`Animatable`]:
//! an unclamped linear blend plus a composition rule used for relative
//! targets (`+` for scalars and vectors, rotation composition for
//! quaternions).

use std::ops::{Add, Mul, Neg, Sub};

/// A value the engine can interpolate.
///
/// `blend` is deliberately unclamped: easing functions may return values
/// outside `[0, 1]` (overshoot, bounce), and the blend extrapolates with
/// them. Callers that want clamped output clamp the progress, not the value.
pub trait Animatable: Copy + Default {
    /// Linear (or type-appropriate) blend between `start` and `end`.
    fn blend(start: Self, end: Self, progress: f32) -> Self;

    /// Compose a relative delta onto a start value.
    fn combine(start: Self, delta: Self) -> Self;
}

impl Animatable for f32 {
    fn blend(start: Self, end: Self, progress: f32) -> Self {
        start + (end - start) * progress
    }

    fn combine(start: Self, delta: Self) -> Self {
        start + delta
    }
}

/// 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn dot(&self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Animatable for Vec3 {
    fn blend(start: Self, end: Self, progress: f32) -> Self {
        start + (end - start) * progress
    }

    fn combine(start: Self, delta: Self) -> Self {
        start + delta
    }
}

/// Rotation quaternion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around a (not necessarily unit) axis.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let len = axis.length();
        if len <= f32::EPSILON {
            return Quat::IDENTITY;
        }
        let half = angle * 0.5;
        let s = half.sin() / len;
        Quat::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    pub fn dot(&self, other: Quat) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn normalize(&self) -> Quat {
        let len = self.dot(*self).sqrt();
        if len <= f32::EPSILON {
            return Quat::IDENTITY;
        }
        Quat::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }
}

impl Default for Quat {
    fn default() -> Self {
        Quat::IDENTITY
    }
}

impl Mul for Quat {
    type Output = Quat;

    /// Hamilton product: `a * b` applies `b` first, then `a`.
    fn mul(self, rhs: Quat) -> Quat {
        Quat::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Animatable for Quat {
    /// Normalized component lerp with hemisphere correction (shortest path).
    fn blend(start: Self, end: Self, progress: f32) -> Self {
        let end = if start.dot(end) < 0.0 {
            Quat::new(-end.x, -end.y, -end.z, -end.w)
        } else {
            end
        };
        Quat::new(
            start.x + (end.x - start.x) * progress,
            start.y + (end.y - start.y) * progress,
            start.z + (end.z - start.z) * progress,
            start.w + (end.w - start.w) * progress,
        )
        .normalize()
    }

    fn combine(start: Self, delta: Self) -> Self {
        start * delta
    }
}
