//! Bridges the Wii Classic Controller's 6-byte report stream onto Linux
//! virtual input devices.
//!
//! The [`wcc`] module holds the protocol core: the wire codec and the state
//! tracker that turns successive samples into discrete change events. The
//! remaining modules are the plumbing around it: fixed-size framing over a
//! byte stream, a uinput sink, and a keyboard-driven source for testing
//! without the physical controller.

pub mod error;
pub mod framing;
pub mod keyboard;
pub mod keymap;
pub mod virtual_pad;
pub mod wcc;

pub use error::BridgeError;
