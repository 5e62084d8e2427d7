//! Translation of lighting requests into frame sequences.

use tracing::debug;

use crate::color::{filter_level, Color, Rgb};
use crate::frame::{Area, Frame, Opcode};
use crate::ramp::{ramp_speeds, Period};
use crate::request::{IntensityLevel, LightingRequest};

/// Frames applying `request`, terminated by a single commit frame.
pub fn build(request: &LightingRequest) -> Vec<Frame> {
    let mut frames = match *request {
        LightingRequest::Disabled => Vec::new(),
        LightingRequest::Normal { colors, level } => Area::ALL
            .iter()
            .zip(colors)
            .map(|(area, color)| static_frame(area.byte(), color, level))
            .collect(),
        LightingRequest::Gaming { color, level } => {
            vec![static_frame(Area::Left.byte(), color, level)]
        },
        LightingRequest::Breathing { colors, idle } => fade_frames(colors, Period::breathing(idle)),
        LightingRequest::Wave { colors, idle } => fade_frames(colors, Period::wave(idle)),
        LightingRequest::DualColor { colors: [first, second] } => {
            dual_color_frames(first, second, Period::DUAL_COLOR)
        },
    };

    frames.push(Frame::commit(request.mode().device_mode()));

    frames
}

/// Static area color.
fn static_frame(area: u8, color: Color, level: IntensityLevel) -> Frame {
    Frame::color(Opcode::SetArea, area, color, filter_level(color, level.byte()))
}

/// Breathing and wave layout.
///
/// Each color owns one triplet: the color itself, an empty segment and the speed of every
/// channel fading from the color to black.
fn fade_frames(colors: [Color; 3], period: Period) -> Vec<Frame> {
    let level = IntensityLevel::ANIMATION.byte();

    let mut frames = Vec::with_capacity(9);
    for (triplet, color) in (0..).zip(colors) {
        let speed = ramp_speeds(color.reference_rgb(), Rgb::default(), period);
        debug!("Ramp speed for {color}: {speed}");

        let left = Area::Left.segment(triplet);
        frames.push(Frame::color(Opcode::SetAnimatedArea, left, color, level));
        frames.push(Frame::area(
            Opcode::SetAnimatedArea,
            Area::Middle.segment(triplet),
            0x00,
            level,
            0x00,
        ));
        frames.push(Frame::speed(Area::Right.segment(triplet), speed));
    }
    frames
}

/// Dual color layout.
///
/// All three triplets carry the same two colors and the speed of the transition between them.
fn dual_color_frames(first: Color, second: Color, period: Period) -> Vec<Frame> {
    let level = IntensityLevel::ANIMATION.byte();
    let speed = ramp_speeds(first.reference_rgb(), second.reference_rgb(), period);
    debug!("Ramp speed from {first} to {second}: {speed}");

    let mut frames = Vec::with_capacity(9);
    for triplet in 0..3 {
        frames.push(Frame::color(
            Opcode::SetAnimatedArea,
            Area::Left.segment(triplet),
            first,
            filter_level(first, level),
        ));
        frames.push(Frame::color(
            Opcode::SetAnimatedArea,
            Area::Middle.segment(triplet),
            second,
            filter_level(second, level),
        ));
        frames.push(Frame::speed(Area::Right.segment(triplet), speed));
    }
    frames
}
