//! Default click handler: open the URL with the platform opener.
//!
//! The launched opener is a detached process that holds no handle back to
//! the terminal. Failure to launch (no opener installed, host refusal) is
//! recovered locally with a logged warning and never surfaces to the caller.

use std::io;
use std::process::{Command, Stdio};

use crossterm::event::MouseEvent;
use log::warn;

/// Open a URL with the platform opener.
///
/// This is the default click handler for
/// [`WebLinksAddon`](crate::addon::WebLinksAddon); replace it via the addon
/// builder for a different policy or a test double.
pub fn open_link(_event: &MouseEvent, url: &str) {
    open_with(&launch, url);
}

/// Run `launcher` for the URL, degrading failure to a warning.
fn open_with(launcher: &dyn Fn(&str) -> io::Result<()>, url: &str) {
    if let Err(err) = launcher(url) {
        warn!("failed to open link '{}': {}", url, err);
    }
}

fn launch(url: &str) -> io::Result<()> {
    opener_command(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(windows)]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(not(any(target_os = "macos", windows)))]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}
