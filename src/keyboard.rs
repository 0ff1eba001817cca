//! Keyboard-driven controller state, the feeder side's input.
//!
//! Key events accumulate into a [`WccState`]; a snapshot taken at each
//! `SYN_REPORT` boundary is what gets encoded onto the wire.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use evdev_rs::enums::{EventCode, EV_KEY, EV_SYN};
use evdev_rs::{Device, ReadFlag};
use tracing::trace;

use crate::error::BridgeError;
use crate::keymap::{Binding, DpadDirection, Keymap};
use crate::wcc::{Axis, Button, WccState};

/// Mutable controller state fed by key transitions.
///
/// Digital trigger keys drive the matching analog trigger axis to full or
/// rest. The four d-pad keys are tracked individually and recomputed into
/// the two ternary axes, so opposite keys held together cancel to center
/// and releasing one of them restores the other.
pub struct PadAccumulator {
    keymap: Keymap,
    state: WccState,
    dpad_held: [bool; 4],
}

impl PadAccumulator {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            state: WccState::default(),
            dpad_held: [false; 4],
        }
    }

    /// Fold one key transition into the state. Unbound keys are ignored.
    pub fn handle_key(&mut self, key: EV_KEY, down: bool) {
        match self.keymap.lookup(key) {
            Some(Binding::Button(button)) => {
                self.state.set_button(button, down);
                match button {
                    Button::Lt => self.set_trigger(Axis::LeftTrigger, down),
                    Button::Rt => self.set_trigger(Axis::RightTrigger, down),
                    _ => {}
                }
            }
            Some(Binding::Dpad(direction)) => {
                self.dpad_held[direction as usize] = down;
                self.recompute_dpad();
            }
            None => {}
        }
    }

    /// Current state by value.
    pub fn snapshot(&self) -> WccState {
        self.state
    }

    fn set_trigger(&mut self, axis: Axis, down: bool) {
        let (_, max) = axis.range();
        self.state.set_axis(axis, if down { max } else { 0 });
    }

    fn recompute_dpad(&mut self) {
        let held = |direction: DpadDirection| self.dpad_held[direction as usize] as i8;
        self.state.set_axis(
            Axis::DpadX,
            held(DpadDirection::Right) - held(DpadDirection::Left),
        );
        self.state.set_axis(
            Axis::DpadY,
            held(DpadDirection::Down) - held(DpadDirection::Up),
        );
    }
}

/// Evdev keyboard feeding a [`PadAccumulator`].
pub struct KeyboardSource {
    device: Device,
    accumulator: PadAccumulator,
}

impl KeyboardSource {
    /// Open an evdev device, e.g. `/dev/input/event3`.
    pub fn open(path: &Path, keymap: Keymap) -> Result<Self, BridgeError> {
        let file = File::open(path).map_err(|source| BridgeError::SourceUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        let device = Device::new_from_file(file).map_err(|source| BridgeError::SourceUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            device,
            accumulator: PadAccumulator::new(keymap),
        })
    }

    /// Block for the next device event and fold it in.
    ///
    /// Returns `true` at a `SYN_REPORT` boundary, the point where the
    /// accumulated state is complete and worth snapshotting. Key autorepeat
    /// is ignored.
    pub fn next_report(&mut self) -> Result<bool, BridgeError> {
        let (_, event) = match self.device.next_event(ReadFlag::NORMAL | ReadFlag::BLOCKING) {
            Ok(pair) => pair,
            Err(err) if err.kind() == ErrorKind::Interrupted => return Ok(false),
            Err(err) => return Err(err.into()),
        };
        match event.event_code {
            EventCode::EV_KEY(key) if event.value <= 1 => {
                trace!(?key, value = event.value, "key transition");
                self.accumulator.handle_key(key, event.value == 1);
                Ok(false)
            }
            EventCode::EV_SYN(EV_SYN::SYN_REPORT) => Ok(true),
            _ => Ok(false),
        }
    }

    pub fn snapshot(&self) -> WccState {
        self.accumulator.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::PadAccumulator;
    use crate::keymap::Keymap;
    use crate::wcc::{Axis, Button, WccState};
    use evdev_rs::enums::EV_KEY;

    fn accumulator() -> PadAccumulator {
        PadAccumulator::new(Keymap::default_map())
    }

    #[test]
    fn starts_neutral() {
        assert_eq!(accumulator().snapshot(), WccState::default());
    }

    #[test]
    fn bound_key_sets_its_button_bit() {
        let mut acc = accumulator();
        acc.handle_key(EV_KEY::KEY_Z, true);
        assert!(acc.snapshot().button(Button::A));
        acc.handle_key(EV_KEY::KEY_Z, false);
        assert!(!acc.snapshot().button(Button::A));
    }

    #[test]
    fn trigger_key_drives_button_and_axis_together() {
        let mut acc = accumulator();
        acc.handle_key(EV_KEY::KEY_D, true);
        let state = acc.snapshot();
        assert!(state.button(Button::Lt));
        assert_eq!(state.axis(Axis::LeftTrigger), 31);

        acc.handle_key(EV_KEY::KEY_D, false);
        let state = acc.snapshot();
        assert!(!state.button(Button::Lt));
        assert_eq!(state.axis(Axis::LeftTrigger), 0);
    }

    #[test]
    fn opposite_dpad_keys_cancel_and_recover() {
        let mut acc = accumulator();
        acc.handle_key(EV_KEY::KEY_LEFT, true);
        assert_eq!(acc.snapshot().axis(Axis::DpadX), -1);

        acc.handle_key(EV_KEY::KEY_RIGHT, true);
        assert_eq!(acc.snapshot().axis(Axis::DpadX), 0);

        acc.handle_key(EV_KEY::KEY_LEFT, false);
        assert_eq!(acc.snapshot().axis(Axis::DpadX), 1);

        acc.handle_key(EV_KEY::KEY_RIGHT, false);
        assert_eq!(acc.snapshot().axis(Axis::DpadX), 0);
    }

    #[test]
    fn unbound_keys_change_nothing() {
        let mut acc = accumulator();
        acc.handle_key(EV_KEY::KEY_Q, true);
        assert_eq!(acc.snapshot(), WccState::default());
    }
}
