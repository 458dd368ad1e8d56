//! One-shot check whether the editor is currently running

use std::io;
use std::process::Command;

/// Substring identifying the editor's process name
pub const EDITOR_PROCESS_NAME: &str = "CapCut";

/// Outcome of the editor probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// A matching process was found
    Running,
    /// The process list was read and contains no match
    NotRunning,
    /// The process list could not be obtained on this system
    Unavailable,
}

/// Lists running processes once and looks for one whose name contains
/// `process_name`.
pub fn probe_editor(process_name: &str) -> ProbeStatus {
    match list_processes() {
        Ok(listing) => {
            if process_names(&listing).any(|name| name.contains(process_name)) {
                ProbeStatus::Running
            } else {
                ProbeStatus::NotRunning
            }
        }
        Err(e) => {
            tracing::warn!("process listing unavailable: {}", e);
            ProbeStatus::Unavailable
        }
    }
}

fn list_processes() -> io::Result<String> {
    let output = listing_command().output()?;
    if !output.status.success() {
        return Err(io::Error::other(format!(
            "process listing exited with {}",
            output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(windows)]
fn listing_command() -> Command {
    let mut cmd = Command::new("tasklist");
    cmd.args(["/FO", "CSV", "/NH"]);
    cmd
}

#[cfg(not(windows))]
fn listing_command() -> Command {
    let mut cmd = Command::new("ps");
    cmd.args(["-A", "-o", "comm="]);
    cmd
}

/// Extracts process names from listing output.
///
/// Handles both quoted CSV rows (`"name.exe","1234",...`) and plain
/// one-name-per-line output.
fn process_names<'a>(listing: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_prefix('"') {
            Some(rest) => rest.split('"').next().unwrap_or(rest),
            None => line,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_names_from_csv() {
        let listing = "\"System Idle Process\",\"0\",\"Services\",\"0\",\"8 K\"\r\n\
                       \"CapCut.exe\",\"4312\",\"Console\",\"1\",\"512,004 K\"\r\n";
        let names: Vec<_> = process_names(listing).collect();
        assert_eq!(names, vec!["System Idle Process", "CapCut.exe"]);
    }

    #[test]
    fn test_process_names_from_plain_lines() {
        let listing = "  systemd\nbash\n\n/Applications/CapCut.app/Contents/MacOS/CapCut\n";
        let names: Vec<_> = process_names(listing).collect();
        assert_eq!(
            names,
            vec!["systemd", "bash", "/Applications/CapCut.app/Contents/MacOS/CapCut"]
        );
    }

    #[test]
    fn test_match_on_name_only() {
        let listing = "\"explorer.exe\",\"100\",\"Console\",\"1\",\"CapCut K\"\n";
        assert!(!process_names(listing).any(|n| n.contains(EDITOR_PROCESS_NAME)));
    }
}
