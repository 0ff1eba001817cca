//! Fixed-size framing over a byte stream.
//!
//! The wire carries exactly [`FRAME_LEN`] bytes per report with no delimiter,
//! so framing is just exact-length reads. A frame is handed out whole or not
//! at all.

use std::io::{ErrorKind, Read, Write};

use crate::error::BridgeError;
use crate::wcc::{Frame, FRAME_LEN};

/// Reads whole frames from any byte stream.
pub struct FrameReader<R> {
    inner: R,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read exactly one frame.
    ///
    /// End of stream at a frame boundary is [`BridgeError::TransportClosed`];
    /// end of stream inside a frame is [`BridgeError::ShortFrame`].
    pub fn read_frame(&mut self) -> Result<Frame, BridgeError> {
        let mut frame = [0u8; FRAME_LEN];
        let mut filled = 0;
        while filled < FRAME_LEN {
            match self.inner.read(&mut frame[filled..]) {
                Ok(0) if filled == 0 => return Err(BridgeError::TransportClosed),
                Ok(0) => return Err(BridgeError::ShortFrame { got: filled }),
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(frame)
    }
}

/// Writes whole frames to any byte stream.
pub struct FrameWriter<W> {
    inner: W,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write one frame and flush it. A vanished reader surfaces as
    /// [`BridgeError::TransportClosed`].
    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), BridgeError> {
        self.inner
            .write_all(frame)
            .and_then(|()| self.inner.flush())
            .map_err(|err| match err.kind() {
                ErrorKind::BrokenPipe => BridgeError::TransportClosed,
                _ => err.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{FrameReader, FrameWriter};
    use crate::error::BridgeError;

    #[test]
    fn reads_consecutive_frames() {
        let bytes: Vec<u8> = (0..12).collect();
        let mut reader = FrameReader::new(Cursor::new(bytes));
        assert_eq!(reader.read_frame().unwrap(), [0, 1, 2, 3, 4, 5]);
        assert_eq!(reader.read_frame().unwrap(), [6, 7, 8, 9, 10, 11]);
        assert!(matches!(
            reader.read_frame(),
            Err(BridgeError::TransportClosed)
        ));
    }

    #[test]
    fn partial_frame_is_rejected_whole() {
        let mut reader = FrameReader::new(Cursor::new(vec![0xab, 0xcd, 0xef]));
        assert!(matches!(
            reader.read_frame(),
            Err(BridgeError::ShortFrame { got: 3 })
        ));
    }

    #[test]
    fn empty_stream_is_a_clean_close() {
        let mut reader = FrameReader::new(Cursor::new(Vec::new()));
        assert!(matches!(
            reader.read_frame(),
            Err(BridgeError::TransportClosed)
        ));
    }

    #[test]
    fn written_frames_round_trip() {
        let mut writer = FrameWriter::new(Vec::new());
        writer.write_frame(&[1, 2, 3, 4, 5, 6]).unwrap();
        writer.write_frame(&[7, 8, 9, 10, 11, 12]).unwrap();
        assert_eq!(writer.inner, (1..=12).collect::<Vec<u8>>());
    }
}
