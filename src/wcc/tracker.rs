use super::state::{Axis, Button, WccState};

/// One discrete change produced by [`StateTracker::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadEvent {
    Axis { axis: Axis, value: i8 },
    Button { button: Button, pressed: bool },
    /// Trails every non-empty batch; sinks coalesce the preceding events
    /// into one atomic update when they see it.
    Sync,
}

/// Turns successive controller samples into minimal ordered event batches.
///
/// Holds the last adopted sample. Emission order is a contract: axes in
/// canonical slot order, then buttons in ascending bit order, then [`PadEvent::Sync`].
/// An unchanged sample yields an empty batch with no `Sync`, so an idle
/// stream stays silent.
pub struct StateTracker {
    last: WccState,
}

impl StateTracker {
    pub fn new(initial: WccState) -> Self {
        Self { last: initial }
    }

    /// Diff `new` against the last sample, then adopt it.
    pub fn step(&mut self, new: WccState) -> Vec<PadEvent> {
        let mut events = Vec::new();

        for axis in Axis::ALL {
            let value = new.axis(axis);
            if value != self.last.axis(axis) {
                events.push(PadEvent::Axis { axis, value });
            }
        }
        for button in Button::ALL {
            let pressed = new.button(button);
            if pressed != self.last.button(button) {
                events.push(PadEvent::Button { button, pressed });
            }
        }

        self.last = new;
        if !events.is_empty() {
            events.push(PadEvent::Sync);
        }
        events
    }

    pub fn last(&self) -> &WccState {
        &self.last
    }
}

#[cfg(test)]
mod tests {
    use super::super::state::{Axis, Button, WccState};
    use super::{PadEvent, StateTracker};

    #[test]
    fn unchanged_sample_emits_nothing() {
        let mut tracker = StateTracker::new(WccState::default());
        let mut state = WccState::default();
        state.set_axis(Axis::LeftX, 40);
        state.set_button(Button::B, true);

        assert!(!tracker.step(state).is_empty());
        assert_eq!(tracker.step(state), vec![]);
    }

    #[test]
    fn batch_order_is_slots_then_bits_then_sync() {
        let mut tracker = StateTracker::new(WccState::default());
        let mut state = WccState::default();
        state.set_axis(Axis::LeftX, 10);
        state.set_axis(Axis::RightTrigger, 5);
        state.set_button(Button::A, true);

        assert_eq!(
            tracker.step(state),
            vec![
                PadEvent::Axis {
                    axis: Axis::LeftX,
                    value: 10
                },
                PadEvent::Axis {
                    axis: Axis::RightTrigger,
                    value: 5
                },
                PadEvent::Button {
                    button: Button::A,
                    pressed: true
                },
                PadEvent::Sync,
            ]
        );
    }

    #[test]
    fn buttons_come_out_in_ascending_bit_order() {
        let mut tracker = StateTracker::new(WccState::default());
        let mut state = WccState::default();
        state.set_button(Button::Lt, true);
        state.set_button(Button::Zr, true);
        state.set_button(Button::Plus, true);

        assert_eq!(
            tracker.step(state),
            vec![
                PadEvent::Button {
                    button: Button::Zr,
                    pressed: true
                },
                PadEvent::Button {
                    button: Button::Plus,
                    pressed: true
                },
                PadEvent::Button {
                    button: Button::Lt,
                    pressed: true
                },
                PadEvent::Sync,
            ]
        );
    }

    #[test]
    fn releases_are_reported_too() {
        let mut tracker = StateTracker::new(WccState::default());
        let mut held = WccState::default();
        held.set_button(Button::Y, true);
        tracker.step(held);

        assert_eq!(
            tracker.step(WccState::default()),
            vec![
                PadEvent::Button {
                    button: Button::Y,
                    pressed: false
                },
                PadEvent::Sync,
            ]
        );
    }

    #[test]
    fn dpad_changes_surface_as_axes_not_buttons() {
        let mut tracker = StateTracker::new(WccState::default());
        let mut state = WccState::default();
        state.set_axis(Axis::DpadX, 1);
        // A stray d-pad bit inside the button word is never a button event.
        state.buttons |= 0x8000;

        assert_eq!(
            tracker.step(state),
            vec![
                PadEvent::Axis {
                    axis: Axis::DpadX,
                    value: 1
                },
                PadEvent::Sync,
            ]
        );
    }

    #[test]
    fn adopts_new_sample_even_when_nothing_changed() {
        let mut tracker = StateTracker::new(WccState::default());
        tracker.step(WccState::default());
        assert_eq!(*tracker.last(), WccState::default());
    }
}
