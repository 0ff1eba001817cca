use std::io;

use argh::FromArgs;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use wcc_bridge::framing::FrameReader;
use wcc_bridge::virtual_pad::VirtualPad;
use wcc_bridge::wcc::{decode, StateTracker, WccState};
use wcc_bridge::BridgeError;

/// Feed controller frames from stdin into a virtual gamepad.
///
/// Pair it with a transport of your choice, e.g.:
/// systemd-socket-activate --inetd -d -l0.0.0.0:40000 wcc-pad
#[derive(FromArgs)]
struct Args {
    /// log level (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "tracing::Level::INFO")]
    log_level: tracing::Level,
}

fn main() -> Result<(), BridgeError> {
    let args: Args = argh::from_env();
    FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .init();

    let pad = VirtualPad::create()?;
    match pad.devnode() {
        Some(node) => info!("virtual pad created at {node}"),
        None => info!("virtual pad created"),
    }

    let mut tracker = StateTracker::new(WccState::default());
    let mut reader = FrameReader::new(io::stdin().lock());
    loop {
        match reader.read_frame() {
            Ok(frame) => pad.apply(&tracker.step(decode(&frame)))?,
            Err(BridgeError::TransportClosed) => {
                info!("frame stream closed");
                return Ok(());
            }
            Err(err) => return Err(err),
        }
    }
}
