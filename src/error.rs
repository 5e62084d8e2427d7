//! Errors reported to the user.

use thiserror::Error;

/// Everything that can stop a backlight update.
#[derive(Debug, Error)]
pub enum Error {
    #[error("No mode specified. (-mode). Use --help for more information")]
    MissingMode,

    #[error("No color specified. (-color{0}). Use --help for more information")]
    MissingColor(u8),

    #[error("No intensity level specified. (-level). Use --help for more information")]
    MissingLevel,

    #[error("Invalid color '{0}'. Valid colors: [black|red|orange|yellow|green|sky|blue|purple|white]")]
    InvalidColorName(String),

    #[error("Invalid intensity level '{0}'. Valid intensity levels: [0,1,2,3]")]
    InvalidLevelDigit(String),

    #[error("Unable to open MSI Led device: {0} (root permissions required)")]
    DeviceNotFound(String),

    #[error("Unable to access HID: {0}")]
    Hid(#[from] hidapi::HidError),

    #[error("Unable to send a feature report: {0}")]
    Transport(String),

    #[error("{failed} of {total} feature reports could not be sent")]
    IncompleteTransmission { failed: usize, total: usize },
}
