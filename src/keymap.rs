//! Keyboard-to-pad bindings for the feeder side.
//!
//! A binding table maps evdev keys to pad controls. A YAML file with
//! `buttons:` and `dpad:` sections can replace any part of the built-in
//! default (see `keymap.yml` at the repository root).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use evdev_rs::enums::EV_KEY;
use serde::Deserialize;

use crate::error::BridgeError;
use crate::wcc::Button;

/// One of the four d-pad directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpadDirection {
    Up,
    Down,
    Left,
    Right,
}

/// What a bound key drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Button(Button),
    Dpad(DpadDirection),
}

/// Resolved key bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Keymap {
    bindings: Vec<(EV_KEY, Binding)>,
}

const DEFAULT_BINDINGS: &[(EV_KEY, Binding)] = &[
    (EV_KEY::KEY_Z, Binding::Button(Button::A)),
    (EV_KEY::KEY_S, Binding::Button(Button::B)),
    (EV_KEY::KEY_W, Binding::Button(Button::X)),
    (EV_KEY::KEY_A, Binding::Button(Button::Y)),
    (EV_KEY::KEY_C, Binding::Button(Button::Zl)),
    (EV_KEY::KEY_V, Binding::Button(Button::Zr)),
    (EV_KEY::KEY_D, Binding::Button(Button::Lt)),
    (EV_KEY::KEY_F, Binding::Button(Button::Rt)),
    (EV_KEY::KEY_2, Binding::Button(Button::Plus)),
    (EV_KEY::KEY_1, Binding::Button(Button::Minus)),
    (EV_KEY::KEY_ESC, Binding::Button(Button::Home)),
    (EV_KEY::KEY_UP, Binding::Dpad(DpadDirection::Up)),
    (EV_KEY::KEY_DOWN, Binding::Dpad(DpadDirection::Down)),
    (EV_KEY::KEY_LEFT, Binding::Dpad(DpadDirection::Left)),
    (EV_KEY::KEY_RIGHT, Binding::Dpad(DpadDirection::Right)),
];

#[derive(Debug, Default, Deserialize)]
struct KeymapFile {
    #[serde(default)]
    buttons: BTreeMap<String, String>,
    #[serde(default)]
    dpad: BTreeMap<String, String>,
}

impl Keymap {
    /// The built-in binding table.
    pub fn default_map() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS.to_vec(),
        }
    }

    /// Parse a YAML keymap.
    pub fn from_yaml(text: &str) -> Result<Self, BridgeError> {
        let file: KeymapFile = serde_yaml::from_str(text)?;
        let mut bindings = Vec::new();
        for (control, key) in &file.buttons {
            let button = button_from_name(control)
                .ok_or_else(|| BridgeError::UnknownControl(control.clone()))?;
            bindings.push((resolve_key(key)?, Binding::Button(button)));
        }
        for (direction, key) in &file.dpad {
            let direction = direction_from_name(direction)
                .ok_or_else(|| BridgeError::UnknownControl(direction.clone()))?;
            bindings.push((resolve_key(key)?, Binding::Dpad(direction)));
        }
        Ok(Self { bindings })
    }

    pub fn from_file(path: &Path) -> Result<Self, BridgeError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Control driven by `key`, if the key is bound.
    pub fn lookup(&self, key: EV_KEY) -> Option<Binding> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, binding)| *binding)
    }
}

fn resolve_key(name: &str) -> Result<EV_KEY, BridgeError> {
    key_from_name(name).ok_or_else(|| BridgeError::UnknownKey(name.to_string()))
}

fn button_from_name(name: &str) -> Option<Button> {
    Some(match name {
        "a" => Button::A,
        "b" => Button::B,
        "x" => Button::X,
        "y" => Button::Y,
        "zl" => Button::Zl,
        "zr" => Button::Zr,
        "lt" => Button::Lt,
        "rt" => Button::Rt,
        "plus" => Button::Plus,
        "minus" => Button::Minus,
        "home" => Button::Home,
        _ => return None,
    })
}

fn direction_from_name(name: &str) -> Option<DpadDirection> {
    Some(match name {
        "up" => DpadDirection::Up,
        "down" => DpadDirection::Down,
        "left" => DpadDirection::Left,
        "right" => DpadDirection::Right,
        _ => return None,
    })
}

/// Key names accepted in keymap files: linux `KEY_*` codes, lower case,
/// without the prefix.
const KEY_NAMES: &[(&str, EV_KEY)] = &[
    ("a", EV_KEY::KEY_A),
    ("b", EV_KEY::KEY_B),
    ("c", EV_KEY::KEY_C),
    ("d", EV_KEY::KEY_D),
    ("e", EV_KEY::KEY_E),
    ("f", EV_KEY::KEY_F),
    ("g", EV_KEY::KEY_G),
    ("h", EV_KEY::KEY_H),
    ("i", EV_KEY::KEY_I),
    ("j", EV_KEY::KEY_J),
    ("k", EV_KEY::KEY_K),
    ("l", EV_KEY::KEY_L),
    ("m", EV_KEY::KEY_M),
    ("n", EV_KEY::KEY_N),
    ("o", EV_KEY::KEY_O),
    ("p", EV_KEY::KEY_P),
    ("q", EV_KEY::KEY_Q),
    ("r", EV_KEY::KEY_R),
    ("s", EV_KEY::KEY_S),
    ("t", EV_KEY::KEY_T),
    ("u", EV_KEY::KEY_U),
    ("v", EV_KEY::KEY_V),
    ("w", EV_KEY::KEY_W),
    ("x", EV_KEY::KEY_X),
    ("y", EV_KEY::KEY_Y),
    ("z", EV_KEY::KEY_Z),
    ("0", EV_KEY::KEY_0),
    ("1", EV_KEY::KEY_1),
    ("2", EV_KEY::KEY_2),
    ("3", EV_KEY::KEY_3),
    ("4", EV_KEY::KEY_4),
    ("5", EV_KEY::KEY_5),
    ("6", EV_KEY::KEY_6),
    ("7", EV_KEY::KEY_7),
    ("8", EV_KEY::KEY_8),
    ("9", EV_KEY::KEY_9),
    ("up", EV_KEY::KEY_UP),
    ("down", EV_KEY::KEY_DOWN),
    ("left", EV_KEY::KEY_LEFT),
    ("right", EV_KEY::KEY_RIGHT),
    ("esc", EV_KEY::KEY_ESC),
    ("space", EV_KEY::KEY_SPACE),
    ("enter", EV_KEY::KEY_ENTER),
    ("tab", EV_KEY::KEY_TAB),
    ("backspace", EV_KEY::KEY_BACKSPACE),
    ("leftshift", EV_KEY::KEY_LEFTSHIFT),
    ("rightshift", EV_KEY::KEY_RIGHTSHIFT),
    ("leftctrl", EV_KEY::KEY_LEFTCTRL),
    ("rightctrl", EV_KEY::KEY_RIGHTCTRL),
    ("leftalt", EV_KEY::KEY_LEFTALT),
    ("rightalt", EV_KEY::KEY_RIGHTALT),
    ("comma", EV_KEY::KEY_COMMA),
    ("dot", EV_KEY::KEY_DOT),
    ("slash", EV_KEY::KEY_SLASH),
    ("semicolon", EV_KEY::KEY_SEMICOLON),
    ("apostrophe", EV_KEY::KEY_APOSTROPHE),
    ("minus", EV_KEY::KEY_MINUS),
    ("equal", EV_KEY::KEY_EQUAL),
    ("grave", EV_KEY::KEY_GRAVE),
    ("capslock", EV_KEY::KEY_CAPSLOCK),
];

fn key_from_name(name: &str) -> Option<EV_KEY> {
    KEY_NAMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, key)| *key)
}

#[cfg(test)]
mod tests {
    use super::{Binding, DpadDirection, Keymap};
    use crate::error::BridgeError;
    use crate::wcc::Button;
    use evdev_rs::enums::EV_KEY;

    #[test]
    fn default_map_matches_the_shipped_layout() {
        let map = Keymap::default_map();
        assert_eq!(map.lookup(EV_KEY::KEY_Z), Some(Binding::Button(Button::A)));
        assert_eq!(map.lookup(EV_KEY::KEY_D), Some(Binding::Button(Button::Lt)));
        assert_eq!(
            map.lookup(EV_KEY::KEY_UP),
            Some(Binding::Dpad(DpadDirection::Up))
        );
        assert_eq!(map.lookup(EV_KEY::KEY_Q), None);
    }

    #[test]
    fn shipped_keymap_file_equals_the_default() {
        let parsed = Keymap::from_yaml(include_str!("../keymap.yml")).unwrap();
        let default = Keymap::default_map();
        for (key, binding) in &default.bindings {
            assert_eq!(parsed.lookup(*key), Some(*binding), "{key:?}");
        }
        assert_eq!(parsed.bindings.len(), default.bindings.len());
    }

    #[test]
    fn unknown_names_are_reported() {
        let err = Keymap::from_yaml("buttons:\n  warp: z\n").unwrap_err();
        assert!(matches!(err, BridgeError::UnknownControl(name) if name == "warp"));

        let err = Keymap::from_yaml("dpad:\n  up: hyperkey\n").unwrap_err();
        assert!(matches!(err, BridgeError::UnknownKey(name) if name == "hyperkey"));
    }

    #[test]
    fn partial_keymaps_are_allowed() {
        let map = Keymap::from_yaml("buttons:\n  a: space\n").unwrap();
        assert_eq!(
            map.lookup(EV_KEY::KEY_SPACE),
            Some(Binding::Button(Button::A))
        );
        assert_eq!(map.lookup(EV_KEY::KEY_UP), None);
    }
}
