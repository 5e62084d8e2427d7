//! Lighting requests and their validation.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use clap::{crate_name, ValueEnum};

use crate::color::Color;
use crate::error::Error;
use crate::frame::DeviceMode;

/// Mode selected on the command line.
#[derive(ValueEnum, PartialEq, Eq, Debug, Copy, Clone)]
pub enum ModeName {
    Disable,
    Normal,
    Gaming,
    Breathing,
    Wave,
    #[value(name = "dualcolor")]
    DualColor,
}

/// Keyboard intensity level.
///
/// Levels are entered as digits where `0` is the most intense light. The firmware counts the
/// other way around.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone)]
pub enum IntensityLevel {
    Highest,
    High,
    Low,
    Lowest,
}

impl IntensityLevel {
    /// Level used by all animated modes.
    pub const ANIMATION: Self = Self::Low;

    pub const fn byte(self) -> u8 {
        match self {
            Self::Highest => 0x03,
            Self::High => 0x02,
            Self::Low => 0x01,
            Self::Lowest => 0x00,
        }
    }

    const fn digit(self) -> char {
        match self {
            Self::Highest => '0',
            Self::High => '1',
            Self::Low => '2',
            Self::Lowest => '3',
        }
    }
}

impl FromStr for IntensityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Highest),
            "1" => Ok(Self::High),
            "2" => Ok(Self::Low),
            "3" => Ok(Self::Lowest),
            _ => Err(Error::InvalidLevelDigit(s.to_owned())),
        }
    }
}

impl Display for IntensityLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

/// Lighting mode with its timing variant.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum LightingMode {
    Disabled,
    Normal,
    Gaming,
    Breathing { idle: bool },
    Wave { idle: bool },
    DualColor,
}

impl LightingMode {
    /// Mode code sent with the commit frame.
    pub const fn device_mode(self) -> DeviceMode {
        match self {
            Self::Disabled => DeviceMode::Disable,
            Self::Normal => DeviceMode::Normal,
            Self::Gaming => DeviceMode::Gaming,
            Self::Breathing { idle: false } => DeviceMode::Breathing,
            Self::Breathing { idle: true } => DeviceMode::BreathingIdle,
            Self::Wave { idle: false } => DeviceMode::Wave,
            Self::Wave { idle: true } => DeviceMode::WaveIdle,
            Self::DualColor => DeviceMode::DualColor,
        }
    }
}

/// Request fields as they came from the command line.
#[derive(Default, Debug, Clone)]
pub struct UnvalidatedRequest {
    pub mode: Option<ModeName>,
    pub color1: Option<Color>,
    pub color2: Option<Color>,
    pub color3: Option<Color>,
    pub level: Option<IntensityLevel>,
    pub idle: bool,
}

impl UnvalidatedRequest {
    /// Check that every field required by the mode is present.
    pub fn validate(&self) -> Result<LightingRequest, Error> {
        let mode = self.mode.ok_or(Error::MissingMode)?;

        if mode == ModeName::Disable {
            return Ok(LightingRequest::Disabled);
        }

        let color1 = self.color1.ok_or(Error::MissingColor(1))?;
        let color2 = || self.color2.ok_or(Error::MissingColor(2));
        let color3 = || self.color3.ok_or(Error::MissingColor(3));
        let level = || self.level.ok_or(Error::MissingLevel);

        let request = match mode {
            ModeName::Disable => LightingRequest::Disabled,
            ModeName::Normal => {
                let colors = [color1, self.color2.unwrap_or(color1), self.color3.unwrap_or(color1)];
                LightingRequest::Normal { colors, level: level()? }
            },
            ModeName::Gaming => LightingRequest::Gaming { color: color1, level: level()? },
            ModeName::Breathing => {
                let colors = [color1, color2()?, color3()?];
                LightingRequest::Breathing { colors, idle: self.idle }
            },
            ModeName::Wave => {
                let colors = [color1, color2()?, color3()?];
                LightingRequest::Wave { colors, idle: self.idle }
            },
            ModeName::DualColor => LightingRequest::DualColor { colors: [color1, color2()?] },
        };

        Ok(request)
    }
}

/// Complete lighting request.
///
/// Each variant carries exactly the fields its mode needs.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum LightingRequest {
    Disabled,
    /// Colors for the left, middle and right area.
    Normal { colors: [Color; 3], level: IntensityLevel },
    Gaming { color: Color, level: IntensityLevel },
    Breathing { colors: [Color; 3], idle: bool },
    Wave { colors: [Color; 3], idle: bool },
    DualColor { colors: [Color; 2] },
}

impl LightingRequest {
    pub const fn mode(&self) -> LightingMode {
        match *self {
            Self::Disabled => LightingMode::Disabled,
            Self::Normal { .. } => LightingMode::Normal,
            Self::Gaming { .. } => LightingMode::Gaming,
            Self::Breathing { idle, .. } => LightingMode::Breathing { idle },
            Self::Wave { idle, .. } => LightingMode::Wave { idle },
            Self::DualColor { .. } => LightingMode::DualColor,
        }
    }

    fn colors(&self) -> &[Color] {
        match self {
            Self::Disabled => &[],
            Self::Normal { colors, .. } => colors,
            Self::Gaming { color, .. } => std::slice::from_ref(color),
            Self::Breathing { colors, .. } | Self::Wave { colors, .. } => colors,
            Self::DualColor { colors } => colors,
        }
    }
}

/// Command line reproducing the request.
impl Display for LightingRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mode = match self.mode() {
            LightingMode::Disabled => "disable",
            LightingMode::Normal => "normal",
            LightingMode::Gaming => "gaming",
            LightingMode::Breathing { .. } => "breathing",
            LightingMode::Wave { .. } => "wave",
            LightingMode::DualColor => "dualcolor",
        };
        write!(f, "{} -mode {}", crate_name!(), mode)?;

        for (i, color) in self.colors().iter().enumerate() {
            write!(f, " -color{} {}", i + 1, color)?;
        }

        match *self {
            Self::Normal { level, .. } | Self::Gaming { level, .. } => write!(f, " -level {level}"),
            Self::Breathing { idle: true, .. } | Self::Wave { idle: true, .. } => {
                write!(f, " -idle 1")
            },
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: ModeName) -> UnvalidatedRequest {
        UnvalidatedRequest { mode: Some(mode), ..Default::default() }
    }

    #[test]
    fn mode_is_required() {
        let raw = UnvalidatedRequest { color1: Some(Color::Red), ..Default::default() };
        assert!(matches!(raw.validate(), Err(Error::MissingMode)));
    }

    #[test]
    fn disable_needs_nothing_else() {
        assert_eq!(request(ModeName::Disable).validate().unwrap(), LightingRequest::Disabled);
    }

    #[test]
    fn color1_is_required() {
        for mode in [ModeName::Normal, ModeName::Gaming, ModeName::Breathing, ModeName::Wave] {
            let mut raw = request(mode);
            raw.level = Some(IntensityLevel::High);
            assert!(matches!(raw.validate(), Err(Error::MissingColor(1))));
        }
    }

    #[test]
    fn animated_modes_need_more_colors() {
        let mut raw = request(ModeName::DualColor);
        raw.color1 = Some(Color::Red);
        assert!(matches!(raw.validate(), Err(Error::MissingColor(2))));

        for mode in [ModeName::Breathing, ModeName::Wave] {
            let mut raw = request(mode);
            raw.color1 = Some(Color::Red);
            raw.color2 = Some(Color::Blue);
            assert!(matches!(raw.validate(), Err(Error::MissingColor(3))));

            raw.color2 = None;
            raw.color3 = Some(Color::Blue);
            assert!(matches!(raw.validate(), Err(Error::MissingColor(2))));
        }
    }

    #[test]
    fn static_modes_need_level() {
        for mode in [ModeName::Normal, ModeName::Gaming] {
            let mut raw = request(mode);
            raw.color1 = Some(Color::Green);
            assert!(matches!(raw.validate(), Err(Error::MissingLevel)));
        }
    }

    #[test]
    fn normal_fills_missing_colors() {
        let mut raw = request(ModeName::Normal);
        raw.color1 = Some(Color::Blue);
        raw.color3 = Some(Color::Red);
        raw.level = Some(IntensityLevel::Lowest);

        let expected = LightingRequest::Normal {
            colors: [Color::Blue, Color::Blue, Color::Red],
            level: IntensityLevel::Lowest,
        };
        assert_eq!(raw.validate().unwrap(), expected);
    }

    #[test]
    fn idle_only_applies_to_animations() {
        let mut raw = request(ModeName::Wave);
        raw.color1 = Some(Color::Red);
        raw.color2 = Some(Color::Green);
        raw.color3 = Some(Color::Blue);
        raw.idle = true;
        assert_eq!(raw.validate().unwrap().mode(), LightingMode::Wave { idle: true });

        let mut raw = request(ModeName::DualColor);
        raw.color1 = Some(Color::Red);
        raw.color2 = Some(Color::Green);
        raw.idle = true;
        assert_eq!(raw.validate().unwrap().mode(), LightingMode::DualColor);
    }

    #[test]
    fn level_digits_are_inverted() {
        let bytes: Vec<u8> = ["0", "1", "2", "3"]
            .iter()
            .map(|digit| digit.parse::<IntensityLevel>().unwrap().byte())
            .collect();
        assert_eq!(bytes, [0x03, 0x02, 0x01, 0x00]);
    }

    #[test]
    fn invalid_level_digit() {
        for digit in ["4", "", "01", "x", "-1"] {
            assert!(matches!(digit.parse::<IntensityLevel>(), Err(Error::InvalidLevelDigit(_))));
        }
    }

    #[test]
    fn idle_variants_resolve_mode() {
        assert_eq!(LightingMode::Breathing { idle: true }.device_mode(), DeviceMode::BreathingIdle);
        assert_eq!(LightingMode::Breathing { idle: false }.device_mode(), DeviceMode::Breathing);
        assert_eq!(LightingMode::Wave { idle: true }.device_mode(), DeviceMode::WaveIdle);
        assert_eq!(LightingMode::Wave { idle: false }.device_mode(), DeviceMode::Wave);
    }

    #[test]
    fn display_reproduces_command() {
        let request =
            LightingRequest::Gaming { color: Color::Red, level: IntensityLevel::Highest };
        assert_eq!(request.to_string(), "msiled -mode gaming -color1 red -level 0");

        let colors = [Color::Blue, Color::Green, Color::Yellow];
        let request = LightingRequest::Breathing { colors, idle: true };
        assert_eq!(
            request.to_string(),
            "msiled -mode breathing -color1 blue -color2 green -color3 yellow -idle 1"
        );

        assert_eq!(LightingRequest::Disabled.to_string(), "msiled -mode disable");
    }
}
