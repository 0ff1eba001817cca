use std::io;

use thiserror::Error;

use crate::wcc::FRAME_LEN;

/// Failure modes of the transport and device layers.
///
/// The codec and the state tracker are total functions; every error in this
/// crate comes from I/O or configuration.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The stream ended in the middle of a frame. Nothing was decoded.
    #[error("short frame: stream ended after {got} of {FRAME_LEN} bytes")]
    ShortFrame { got: usize },

    /// The stream ended at a frame boundary, or the reading side went away.
    #[error("transport closed")]
    TransportClosed,

    /// The uinput device could not be created or written.
    #[error("virtual pad unavailable: {0}")]
    SinkUnavailable(#[source] io::Error),

    /// The input device could not be opened.
    #[error("cannot open input device {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The keymap file did not parse.
    #[error("keymap parse error: {0}")]
    KeymapParse(#[from] serde_yaml::Error),

    /// A keymap entry names a key this bridge does not know.
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),

    /// A keymap entry names a control that does not exist on the pad.
    #[error("unknown control name: {0:?}")]
    UnknownControl(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
