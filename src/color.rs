//! Keyboard color table.
//!
//! The firmware only knows nine fixed colors. Animated modes additionally need the RGB
//! intensity of each color to derive channel ramp speeds, those values were measured at the
//! reference intensity level (device level `0x01`).

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

/// RGB color.
#[derive(Default, PartialEq, Eq, Debug, Copy, Clone)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Keyboard color.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Color {
    Black,
    Red,
    Orange,
    Yellow,
    Green,
    Sky,
    Blue,
    Purple,
    White,
}

impl Color {
    pub const ALL: [Color; 9] = [
        Color::Black,
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Sky,
        Color::Blue,
        Color::Purple,
        Color::White,
    ];

    /// Device color code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Black => 0x00,
            Self::Red => 0x01,
            Self::Orange => 0x02,
            Self::Yellow => 0x03,
            Self::Green => 0x04,
            Self::Sky => 0x05,
            Self::Blue => 0x06,
            Self::Purple => 0x07,
            Self::White => 0x08,
        }
    }

    /// RGB value of the color at the reference intensity.
    pub const fn reference_rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::new(0, 0, 0),
            Self::Red => Rgb::new(255, 0, 0),
            Self::Orange => Rgb::new(187, 112, 0),
            Self::Yellow => Rgb::new(238, 238, 0),
            Self::Green => Rgb::new(176, 255, 0),
            Self::Sky => Rgb::new(0, 255, 255),
            Self::Blue => Rgb::new(0, 0, 255),
            Self::Purple => Rgb::new(48, 0, 255),
            Self::White => Rgb::new(176, 255, 176),
        }
    }

    /// Black and white ignore the intensity level.
    pub const fn is_levelless(self) -> bool {
        matches!(self, Self::Black | Self::White)
    }

    /// Name accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Sky => "sky",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::White => "white",
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|color| color.name() == s)
            .ok_or_else(|| Error::InvalidColorName(s.to_owned()))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Level byte placed next to a color.
///
/// Black and white are always sent with level zero.
pub const fn filter_level(color: Color, level: u8) -> u8 {
    if color.is_levelless() {
        0
    } else {
        level
    }
}
