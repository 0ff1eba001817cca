use std::io::{self, Write};
use std::path::PathBuf;

use argh::FromArgs;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use wcc_bridge::framing::FrameWriter;
use wcc_bridge::keyboard::KeyboardSource;
use wcc_bridge::keymap::Keymap;
use wcc_bridge::wcc::encode;
use wcc_bridge::BridgeError;

/// Read a keyboard's evdev events and write controller frames to stdout.
///
/// A debug-side stand-in for the physical controller, e.g.:
/// wcc-feed /dev/input/event3 > /dev/udp/other-host/40000
#[derive(FromArgs)]
struct Args {
    /// evdev keyboard device, e.g. /dev/input/event3
    #[argh(positional)]
    device: PathBuf,

    /// YAML keymap replacing the built-in bindings
    #[argh(option)]
    keymap: Option<PathBuf>,

    /// log level (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "tracing::Level::INFO")]
    log_level: tracing::Level,
}

/// Encode and send the current state; `Ok(false)` means the reader is gone.
fn emit<W: Write>(
    writer: &mut FrameWriter<W>,
    source: &KeyboardSource,
) -> Result<bool, BridgeError> {
    match writer.write_frame(&encode(&source.snapshot())) {
        Ok(()) => Ok(true),
        Err(BridgeError::TransportClosed) => Ok(false),
        Err(err) => Err(err),
    }
}

fn main() -> Result<(), BridgeError> {
    let args: Args = argh::from_env();
    // stdout carries frames, so diagnostics go to stderr.
    FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let keymap = match &args.keymap {
        Some(path) => Keymap::from_file(path)?,
        None => Keymap::default_map(),
    };
    let mut source = KeyboardSource::open(&args.device, keymap)?;
    info!("reading keys from {}", args.device.display());

    let mut writer = FrameWriter::new(io::stdout().lock());

    // One neutral frame up front so the receiving side starts aligned.
    if !emit(&mut writer, &source)? {
        return Ok(());
    }
    loop {
        if source.next_report()? && !emit(&mut writer, &source)? {
            info!("reader went away");
            return Ok(());
        }
    }
}
