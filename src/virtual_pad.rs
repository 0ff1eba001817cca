//! Virtual gamepad sink backed by a Linux uinput device.

use evdev_rs::enums::{BusType, EventCode, EventType, EV_ABS, EV_KEY, EV_SYN};
use evdev_rs::{DeviceWrapper, InputEvent, TimeVal, UInputDevice, UninitDevice};

use crate::error::BridgeError;
use crate::wcc::{Axis, Button, PadEvent};

const DEVICE_NAME: &str = "Wii Classic Controller Bridge";
const VENDOR_ID: u16 = 0x1b36;
const PRODUCT_ID: u16 = 0xbbbb;

/// Evdev axis backing a slot, if the pad layout exposes one.
///
/// The trigger slots stay unmapped: the pad advertises their state through
/// the LT/RT click buttons, like the physical device's input driver.
fn axis_code(axis: Axis) -> Option<EV_ABS> {
    match axis {
        Axis::LeftX => Some(EV_ABS::ABS_X),
        Axis::LeftY => Some(EV_ABS::ABS_Y),
        Axis::LeftTrigger => None,
        Axis::RightX => Some(EV_ABS::ABS_RX),
        Axis::RightY => Some(EV_ABS::ABS_RY),
        Axis::RightTrigger => None,
        Axis::DpadX => Some(EV_ABS::ABS_HAT0X),
        Axis::DpadY => Some(EV_ABS::ABS_HAT0Y),
    }
}

fn key_code(button: Button) -> EV_KEY {
    match button {
        Button::Zr => EV_KEY::BTN_TR2,
        Button::X => EV_KEY::BTN_NORTH,
        Button::A => EV_KEY::BTN_SOUTH,
        Button::Y => EV_KEY::BTN_WEST,
        Button::B => EV_KEY::BTN_EAST,
        Button::Zl => EV_KEY::BTN_TL2,
        Button::Rt => EV_KEY::BTN_TR,
        Button::Plus => EV_KEY::BTN_START,
        Button::Home => EV_KEY::BTN_MODE,
        Button::Minus => EV_KEY::BTN_SELECT,
        Button::Lt => EV_KEY::BTN_TL,
    }
}

fn abs_setup(axis: Axis) -> libc::input_absinfo {
    let (minimum, maximum) = axis.range();
    libc::input_absinfo {
        value: axis.neutral() as i32,
        minimum: minimum as i32,
        maximum: maximum as i32,
        fuzz: 0,
        flat: 0,
        resolution: 0,
    }
}

/// Virtual gamepad that consumes [`PadEvent`] batches.
pub struct VirtualPad {
    device: UInputDevice,
}

impl VirtualPad {
    /// Register the uinput device with the pad's axis and button layout.
    pub fn create() -> Result<Self, BridgeError> {
        let template = UninitDevice::new().ok_or_else(|| {
            BridgeError::SinkUnavailable(std::io::Error::new(
                std::io::ErrorKind::Other,
                "libevdev device allocation failed",
            ))
        })?;
        template.set_name(DEVICE_NAME);
        template.set_bustype(BusType::BUS_USB as u16);
        template.set_vendor_id(VENDOR_ID);
        template.set_product_id(PRODUCT_ID);

        template
            .enable(&EventType::EV_ABS)
            .map_err(BridgeError::SinkUnavailable)?;
        template
            .enable(&EventType::EV_KEY)
            .map_err(BridgeError::SinkUnavailable)?;

        for axis in Axis::ALL {
            if let Some(code) = axis_code(axis) {
                template
                    .enable_event_code(&EventCode::EV_ABS(code), Some(&abs_setup(axis)))
                    .map_err(BridgeError::SinkUnavailable)?;
            }
        }
        for button in Button::ALL {
            template
                .enable_event_code(&EventCode::EV_KEY(key_code(button)), None)
                .map_err(BridgeError::SinkUnavailable)?;
        }

        let device =
            UInputDevice::create_from_device(&template).map_err(BridgeError::SinkUnavailable)?;
        Ok(Self { device })
    }

    /// Path of the created device node, when the kernel reports one.
    pub fn devnode(&self) -> Option<String> {
        self.device.devnode().map(str::to_owned)
    }

    /// Translate one tracker batch into device events.
    ///
    /// Axis changes on unmapped slots are dropped here; everything else goes
    /// out in batch order, with `Sync` becoming the report separator.
    pub fn apply(&self, events: &[PadEvent]) -> Result<(), BridgeError> {
        for event in events {
            match *event {
                PadEvent::Axis { axis, value } => {
                    if let Some(code) = axis_code(axis) {
                        self.write(EventCode::EV_ABS(code), value as i32)?;
                    }
                }
                PadEvent::Button { button, pressed } => {
                    self.write(EventCode::EV_KEY(key_code(button)), pressed as i32)?;
                }
                PadEvent::Sync => {
                    self.write(EventCode::EV_SYN(EV_SYN::SYN_REPORT), 0)?;
                }
            }
        }
        Ok(())
    }

    fn write(&self, event_code: EventCode, value: i32) -> Result<(), BridgeError> {
        self.device
            .write_event(&InputEvent {
                time: TimeVal {
                    tv_sec: 0,
                    tv_usec: 0,
                },
                event_code,
                value,
            })
            .map_err(BridgeError::SinkUnavailable)
    }
}
