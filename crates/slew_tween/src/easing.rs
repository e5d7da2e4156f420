//! Easing functions
//!
//! Every easing is a pure `fn(f32) -> f32` mapping progress in `[0, 1]` to a
//! blend factor. The factor may leave `[0, 1]` (back, bounce); the blend
//! extrapolates with it, which is how overshoot effects reach past their end
//! value.

use std::f32::consts::{FRAC_PI_2, PI};

/// Progress-shaping function applied before blending.
pub type EaseFn = fn(f32) -> f32;

const BACK_DRIVE: f32 = 1.70158;

/// Identity easing, the default everywhere.
pub fn linear(t: f32) -> f32 {
    t
}

pub fn sine_in(t: f32) -> f32 {
    1.0 - (t * FRAC_PI_2).cos()
}

pub fn sine_out(t: f32) -> f32 {
    (t * FRAC_PI_2).sin()
}

pub fn sine_in_out(t: f32) -> f32 {
    -0.5 * ((PI * t).cos() - 1.0)
}

pub fn quad_in(t: f32) -> f32 {
    t * t
}

pub fn quad_out(t: f32) -> f32 {
    -t * (t - 2.0)
}

pub fn quad_in_out(t: f32) -> f32 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t
    } else {
        -0.5 * ((t - 1.0) * (t - 3.0) - 1.0)
    }
}

pub fn cubic_in(t: f32) -> f32 {
    t * t * t
}

pub fn cubic_out(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * t + 1.0
}

pub fn cubic_in_out(t: f32) -> f32 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t * t
    } else {
        let t = t - 2.0;
        0.5 * (t * t * t + 2.0)
    }
}

pub fn quart_in(t: f32) -> f32 {
    t * t * t * t
}

pub fn quart_out(t: f32) -> f32 {
    let t = t - 1.0;
    -(t * t * t * t - 1.0)
}

pub fn quart_in_out(t: f32) -> f32 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t * t * t
    } else {
        let t = t - 2.0;
        -0.5 * (t * t * t * t - 2.0)
    }
}

pub fn quint_in(t: f32) -> f32 {
    t * t * t * t * t
}

pub fn quint_out(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * t * t * t + 1.0
}

pub fn quint_in_out(t: f32) -> f32 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t * t * t * t
    } else {
        let t = t - 2.0;
        0.5 * (t * t * t * t * t + 2.0)
    }
}

pub fn expo_in(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else {
        2.0_f32.powf(10.0 * (t - 1.0))
    }
}

pub fn expo_out(t: f32) -> f32 {
    if t == 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}

pub fn expo_in_out(t: f32) -> f32 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * 2.0_f32.powf(10.0 * (t - 1.0))
    } else {
        0.5 * (2.0 - 2.0_f32.powf(-10.0 * (t - 1.0)))
    }
}

/// Overshoots below 0 on the way in.
pub fn back_in(t: f32) -> f32 {
    t * t * ((BACK_DRIVE + 1.0) * t - BACK_DRIVE)
}

/// Overshoots above 1 on the way out.
pub fn back_out(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * ((BACK_DRIVE + 1.0) * t + BACK_DRIVE) + 1.0
}

pub fn back_in_out(t: f32) -> f32 {
    let s = BACK_DRIVE * 1.525;
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * (t * t * ((s + 1.0) * t - s))
    } else {
        let t = t - 2.0;
        0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
    }
}

pub fn bounce_out(t: f32) -> f32 {
    if t < 1.0 / 2.75 {
        7.5625 * t * t
    } else if t < 2.0 / 2.75 {
        let t = t - 1.5 / 2.75;
        7.5625 * t * t + 0.75
    } else if t < 2.5 / 2.75 {
        let t = t - 2.25 / 2.75;
        7.5625 * t * t + 0.9375
    } else {
        let t = t - 2.625 / 2.75;
        7.5625 * t * t + 0.984375
    }
}

pub fn bounce_in(t: f32) -> f32 {
    1.0 - bounce_out(1.0 - t)
}

pub fn bounce_in_out(t: f32) -> f32 {
    if t < 0.5 {
        bounce_in(t * 2.0) * 0.5
    } else {
        bounce_out(t * 2.0 - 1.0) * 0.5 + 0.5
    }
}
