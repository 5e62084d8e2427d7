//! Keyboard controller abstraction.

use hidapi::{HidApi, HidDevice};
use tracing::{debug, error};

use crate::error::Error;
use crate::frame::Frame;

/// Open connection to the MSI GT60/GT70 SteelSeries keyboard.
///
/// The device is closed when this is dropped.
pub struct MsiKeyboard {
    device: HidDevice,
    _api: HidApi,
}

impl MsiKeyboard {
    /// HID vendor ID.
    pub const VENDOR_ID: u16 = 0x1770;

    /// HID product ID.
    pub const PRODUCT_ID: u16 = 0xff00;

    pub fn open() -> Result<Self, Error> {
        let api = HidApi::new()?;
        let device = match api.open(Self::VENDOR_ID, Self::PRODUCT_ID) {
            Ok(device) => device,
            Err(err) => return Err(Error::DeviceNotFound(err.to_string())),
        };

        debug!("Opened keyboard {:04x}:{:04x}", Self::VENDOR_ID, Self::PRODUCT_ID);

        Ok(Self { device, _api: api })
    }
}

/// Receiver of HID feature reports.
pub trait FeatureReportSink {
    fn send_feature_report(&mut self, report: &[u8]) -> Result<(), Error>;
}

impl FeatureReportSink for MsiKeyboard {
    fn send_feature_report(&mut self, report: &[u8]) -> Result<(), Error> {
        self.device.send_feature_report(report).map_err(|err| Error::Transport(err.to_string()))
    }
}

/// Send all frames in order.
///
/// A rejected frame does not stop the remaining ones, the failures are reported together once
/// every frame was attempted.
pub fn transmit<S>(sink: &mut S, frames: &[Frame]) -> Result<(), Error>
where
    S: FeatureReportSink + ?Sized,
{
    let mut failed = 0;

    for (i, frame) in frames.iter().enumerate() {
        let kind = if frame.is_commit() { "commit" } else { "area" };
        debug!("Sending {} frame {}/{}: {}", kind, i + 1, frames.len(), frame);

        if let Err(err) = sink.send_feature_report(&frame.to_bytes()) {
            error!("Frame {}/{} ({}): {}", i + 1, frames.len(), frame, err);
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(Error::IncompleteTransmission { failed, total: frames.len() });
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::frame::{DeviceMode, Opcode};

    /// In-memory keyboard recording every report.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub reports: Vec<Vec<u8>>,
        /// Indices of reports which should be rejected.
        pub reject: Vec<usize>,
    }

    impl FeatureReportSink for RecordingSink {
        fn send_feature_report(&mut self, report: &[u8]) -> Result<(), Error> {
            let index = self.reports.len();
            self.reports.push(report.to_vec());

            if self.reject.contains(&index) {
                return Err(Error::Transport(String::from("broken pipe")));
            }

            Ok(())
        }
    }

    fn frames() -> Vec<Frame> {
        vec![
            Frame::area(Opcode::SetArea, 1, 0x01, 0x02, 0x00),
            Frame::area(Opcode::SetArea, 2, 0x03, 0x02, 0x00),
            Frame::commit(DeviceMode::Normal),
        ]
    }

    #[test]
    fn sends_frames_in_order() {
        let mut sink = RecordingSink::default();
        let frames = frames();

        transmit(&mut sink, &frames).unwrap();

        let expected: Vec<Vec<u8>> = frames.iter().map(|frame| frame.to_bytes().to_vec()).collect();
        assert_eq!(sink.reports, expected);
    }

    #[test]
    fn failed_frame_does_not_stop_transmission() {
        let mut sink = RecordingSink { reject: vec![0], ..Default::default() };

        let result = transmit(&mut sink, &frames());

        assert!(matches!(result, Err(Error::IncompleteTransmission { failed: 1, total: 3 })));
        assert_eq!(sink.reports.len(), 3);
        assert_eq!(sink.reports[2][2], 0x41);
    }

    #[test]
    fn every_failure_is_counted() {
        let mut sink = RecordingSink { reject: vec![0, 1, 2], ..Default::default() };

        let result = transmit(&mut sink, &frames());

        assert!(matches!(result, Err(Error::IncompleteTransmission { failed: 3, total: 3 })));
    }
}
