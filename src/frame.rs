//! Feature report frames understood by the keyboard firmware.
//!
//! Every frame carries eight logical bytes:
//!
//! ```text
//! 0x01 0x02 <opcode> <area|mode> <field1> <field2> <field3> 0xec
//! ```
//!
//! The first byte doubles as the HID report ID, the report is padded to nine bytes.

use std::fmt::{self, Display, Formatter};

use bytes::{BufMut, Bytes, BytesMut};

use crate::color::{Color, Rgb};

/// Size of a feature report on the wire.
pub const REPORT_SIZE: usize = 9;

/// Fixed frame prefix, the first byte is the report ID.
const PREFIX: [u8; 2] = [0x01, 0x02];

/// End of report marker.
const EOR: u8 = 0xec;

/// First frame opcode byte.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Opcode {
    /// Apply all staged area frames.
    Commit,
    /// Static area color.
    SetArea,
    /// Animated area segment.
    SetAnimatedArea,
}

impl Opcode {
    pub const fn byte(self) -> u8 {
        match self {
            Self::Commit => 0x41,
            Self::SetArea => 0x42,
            Self::SetAnimatedArea => 0x43,
        }
    }
}

/// Physical keyboard zone.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Area {
    Left,
    Middle,
    Right,
}

impl Area {
    pub const ALL: [Area; 3] = [Area::Left, Area::Middle, Area::Right];

    pub const fn byte(self) -> u8 {
        match self {
            Self::Left => 0x01,
            Self::Middle => 0x02,
            Self::Right => 0x03,
        }
    }

    /// Area address inside the animation triplet `triplet`.
    ///
    /// Animated modes address three triplets of segments, shifted by three each.
    pub const fn segment(self, triplet: u8) -> u8 {
        self.byte() + 3 * triplet
    }
}

/// Mode code consumed by the commit frame.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum DeviceMode {
    Disable,
    Normal,
    Gaming,
    Breathing,
    Wave,
    DualColor,
    BreathingIdle,
    WaveIdle,
}

impl DeviceMode {
    pub const fn byte(self) -> u8 {
        match self {
            Self::Disable => 0x00,
            Self::Normal => 0x01,
            Self::Gaming => 0x02,
            Self::Breathing => 0x03,
            Self::Wave => 0x05,
            Self::DualColor => 0x06,
            Self::BreathingIdle => 0x08,
            Self::WaveIdle => 0x09,
        }
    }
}

/// A single control frame.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Frame {
    opcode: Opcode,
    target: u8,
    fields: [u8; 3],
}

impl Frame {
    /// Area frame with raw field bytes.
    pub const fn area(opcode: Opcode, area: u8, field1: u8, field2: u8, field3: u8) -> Self {
        Self { opcode, target: area, fields: [field1, field2, field3] }
    }

    /// Area frame setting a color at a device level.
    pub const fn color(opcode: Opcode, area: u8, color: Color, level: u8) -> Self {
        Self::area(opcode, area, color.code(), level, 0x00)
    }

    /// Area frame carrying per-channel ramp speeds.
    pub const fn speed(area: u8, speed: Rgb) -> Self {
        Self::area(Opcode::SetAnimatedArea, area, speed.r, speed.g, speed.b)
    }

    /// Frame applying everything staged so far.
    pub const fn commit(mode: DeviceMode) -> Self {
        Self { opcode: Opcode::Commit, target: mode.byte(), fields: [0x00; 3] }
    }

    pub fn is_commit(&self) -> bool {
        self.opcode == Opcode::Commit
    }

    /// Serialize into a feature report.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(REPORT_SIZE);

        // Report ID and fixed report value.
        buf.put_slice(&PREFIX);

        buf.put_u8(self.opcode.byte());
        buf.put_u8(self.target);
        buf.put_slice(&self.fields);

        buf.put_u8(EOR);

        // Padding for the report size.
        buf.put_u8(0x00);

        buf.freeze()
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.to_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_frame_layout() {
        let frame = Frame::color(Opcode::SetArea, Area::Middle.byte(), Color::Blue, 0x02);
        assert_eq!(&frame.to_bytes()[..], &[0x01, 0x02, 0x42, 0x02, 0x06, 0x02, 0x00, 0xec, 0x00]);
    }

    #[test]
    fn commit_frame_layout() {
        let frame = Frame::commit(DeviceMode::WaveIdle);
        assert!(frame.is_commit());
        assert_eq!(&frame.to_bytes()[..], &[0x01, 0x02, 0x41, 0x09, 0x00, 0x00, 0x00, 0xec, 0x00]);
    }

    #[test]
    fn speed_frame_layout() {
        let frame = Frame::speed(Area::Right.segment(2), Rgb::new(1, 2, 3));
        assert_eq!(&frame.to_bytes()[..], &[0x01, 0x02, 0x43, 0x09, 0x01, 0x02, 0x03, 0xec, 0x00]);
    }

    #[test]
    fn reports_have_fixed_size() {
        assert_eq!(Frame::commit(DeviceMode::Disable).to_bytes().len(), REPORT_SIZE);
        assert_eq!(Frame::area(Opcode::SetArea, 1, 0xff, 0xff, 0xff).to_bytes().len(), REPORT_SIZE);
    }

    #[test]
    fn segments_shift_by_three() {
        assert_eq!(Area::Left.segment(0), 0x01);
        assert_eq!(Area::Middle.segment(1), 0x05);
        assert_eq!(Area::Right.segment(2), 0x09);
    }

    #[test]
    fn display_as_hex() {
        assert_eq!(Frame::commit(DeviceMode::Normal).to_string(), "01 02 41 01 00 00 00 ec 00");
    }
}
