//! Open a URL in the user's default browser.
//!
//! The launcher is chosen at build time from the target OS. Callers treat a
//! failed launch as non-fatal since the URL is also printed.

use std::io;
use std::process::{Command, Stdio};

/// Build the platform command that opens `url` without waiting on it.
pub fn open_command(url: &str) -> Command {
    let mut cmd = platform_command(url);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

#[cfg(target_os = "windows")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("rundll32");
    cmd.args(["url.dll,FileProtocolHandler", url]);
    cmd
}

#[cfg(target_os = "macos")]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

/// Spawn the launcher. Only spawning is checked, not whether a window appeared.
pub fn open_browser(url: &str) -> io::Result<()> {
    let mut child = open_command(url).spawn()?;
    // Reap the launcher off-thread.
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}
