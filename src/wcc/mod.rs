mod frame;
mod state;
mod tracker;

pub use frame::{decode, encode, Frame, FRAME_LEN};
pub use state::{Axis, Button, WccState};
pub use tracker::{PadEvent, StateTracker};
