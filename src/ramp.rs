//! Channel ramp speeds for animated modes.

use crate::color::Rgb;

/// Transition period of an animated effect in seconds.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Period(pub f64);

impl Period {
    pub const BREATHING: Self = Self(1.0);
    pub const BREATHING_IDLE: Self = Self(5.5);
    pub const WAVE: Self = Self(1.5);
    pub const WAVE_IDLE: Self = Self(6.0);
    pub const DUAL_COLOR: Self = Self(2.0);

    pub const fn breathing(idle: bool) -> Self {
        if idle {
            Self::BREATHING_IDLE
        } else {
            Self::BREATHING
        }
    }

    pub const fn wave(idle: bool) -> Self {
        if idle {
            Self::WAVE_IDLE
        } else {
            Self::WAVE
        }
    }
}

/// Speed byte animating one channel from `left` to `right` over `period` seconds.
///
/// Results which do not fit into a byte saturate at `0xff`.
pub fn compute_ramp_speed(left: u8, right: u8, period: Period) -> u8 {
    let delta = left.abs_diff(right);
    if delta == 0 {
        return 0;
    }

    let speed = (period.0 * 250. / f64::from(delta)).ceil();

    // Float to int casts saturate, NaN becomes zero.
    speed as u8
}

/// Per-channel speeds for a transition between two colors.
pub fn ramp_speeds(from: Rgb, to: Rgb, period: Period) -> Rgb {
    Rgb {
        r: compute_ramp_speed(from.r, to.r, period),
        g: compute_ramp_speed(from.g, to.g, period),
        b: compute_ramp_speed(from.b, to.b, period),
    }
}
