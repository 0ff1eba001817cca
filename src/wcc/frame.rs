//! Wire codec for the controller's 6-byte report.
//!
//! The digital word in the last two bytes is active-low on the wire; decode
//! complements it into active-high semantics. The four d-pad bits exist only
//! on the wire and are folded into the two ternary d-pad axes.

use super::state::{Axis, WccState};

/// Length of one wire report.
pub const FRAME_LEN: usize = 6;

/// One wire report, without any framing or length prefix.
pub type Frame = [u8; FRAME_LEN];

// D-pad positions inside the decoded digital word.
const DPAD_RIGHT: u16 = 0x8000;
const DPAD_DOWN: u16 = 0x4000;
const DPAD_LEFT: u16 = 0x0002;
const DPAD_UP: u16 = 0x0001;
const DPAD_MASK: u16 = DPAD_RIGHT | DPAD_DOWN | DPAD_LEFT | DPAD_UP;

/// Decode one frame. Total: every byte combination yields a state.
pub fn decode(frame: &Frame) -> WccState {
    let mut axes = [0i8; 8];
    axes[Axis::LeftX.index()] = (frame[0] & 0x3f) as i8;
    axes[Axis::LeftY.index()] = (frame[1] & 0x3f) as i8;
    axes[Axis::LeftTrigger.index()] = (((frame[2] & 0x60) >> 2) | ((frame[3] & 0xe0) >> 5)) as i8;
    axes[Axis::RightX.index()] =
        (((frame[0] & 0xc0) >> 3) | ((frame[1] & 0xc0) >> 5) | ((frame[2] & 0x80) >> 7)) as i8;
    axes[Axis::RightY.index()] = (frame[2] & 0x1f) as i8;
    axes[Axis::RightTrigger.index()] = (frame[3] & 0x1f) as i8;

    let word = !u16::from_be_bytes([frame[4], frame[5]]);
    axes[Axis::DpadX.index()] = dpad_axis(word, DPAD_RIGHT, DPAD_LEFT);
    axes[Axis::DpadY.index()] = dpad_axis(word, DPAD_DOWN, DPAD_UP);

    WccState {
        axes,
        buttons: word & !DPAD_MASK,
    }
}

/// Encode one state into its frame. Inverse of [`decode`] for states whose
/// values sit inside the declared ranges.
pub fn encode(state: &WccState) -> Frame {
    let lx = state.axis(Axis::LeftX) as u8;
    let ly = state.axis(Axis::LeftY) as u8;
    let lt = state.axis(Axis::LeftTrigger) as u8;
    let rx = state.axis(Axis::RightX) as u8;
    let ry = state.axis(Axis::RightY) as u8;
    let rt = state.axis(Axis::RightTrigger) as u8;

    let mut word = state.buttons & !DPAD_MASK;
    word |= dpad_bits(state.axis(Axis::DpadX), DPAD_RIGHT, DPAD_LEFT);
    word |= dpad_bits(state.axis(Axis::DpadY), DPAD_DOWN, DPAD_UP);
    let wire = (!word).to_be_bytes();

    [
        (lx & 0x3f) | ((rx << 3) & 0xc0),
        (ly & 0x3f) | ((rx << 5) & 0xc0),
        ((lt << 2) & 0x60) | ((rx << 7) & 0x80) | (ry & 0x1f),
        ((lt << 5) & 0xe0) | (rt & 0x1f),
        wire[0],
        wire[1],
    ]
}

/// Ternary axis from an opposing bit pair; both bits held cancel to 0.
fn dpad_axis(word: u16, positive: u16, negative: u16) -> i8 {
    (word & positive != 0) as i8 - (word & negative != 0) as i8
}

fn dpad_bits(value: i8, positive: u16, negative: u16) -> u16 {
    match value {
        v if v > 0 => positive,
        v if v < 0 => negative,
        _ => 0,
    }
}
