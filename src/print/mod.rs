//! Hand finished PDFs to the operating system's print queue.
//!
//! Printing is best effort: callers keep the PDF bytes whatever happens here
//! and surface a [`PrintError`] as a warning.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Error)]
pub enum PrintError {
    /// No known dispatch mechanism on this platform
    #[error("direct printing is not supported on {0}")]
    Unsupported(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The spooler command ran but reported failure
    #[error("print command `{program}` failed: {detail}")]
    CommandFailed { program: String, detail: String },
}

pub type PrintResult<T> = Result<T, PrintError>;

/// Anything that can accept a rendered label sheet.
pub trait PrintSink {
    /// `printer` selects a named queue; `None` uses the system default.
    fn print(&self, pdf: &[u8], printer: Option<&str>) -> PrintResult<()>;
}

/// Spools through `lpr`/`lp` on Unix and the shell print verb on Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPrintSink;

impl PrintSink for SystemPrintSink {
    fn print(&self, pdf: &[u8], printer: Option<&str>) -> PrintResult<()> {
        let mut file = tempfile::Builder::new()
            .prefix("rotulos-")
            .suffix(".pdf")
            .tempfile()?;
        file.write_all(pdf)?;
        file.flush()?;

        // The Windows verb returns before the viewer has read the file.
        let path = if cfg!(windows) {
            file.into_temp_path().keep().map_err(std::io::Error::from)?
        } else {
            file.path().to_path_buf()
        };

        let mut command = print_command(&path, printer)?;
        let program = command.get_program().to_string_lossy().into_owned();
        log_info!("Sending {} bytes to printer via {}", pdf.len(), program);

        let output = command.output()?;
        if output.status.success() {
            return Ok(());
        }

        let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if detail.is_empty() {
            output.status.to_string()
        } else {
            detail
        };
        log_warn!("Print command {} failed: {}", program, detail);
        Err(PrintError::CommandFailed { program, detail })
    }
}

/// Build the platform spooler invocation for `path`.
pub fn print_command(path: &Path, printer: Option<&str>) -> PrintResult<Command> {
    if cfg!(windows) {
        let script = format!(
            "Start-Process -FilePath '{}' -Verb Print",
            path.display().to_string().replace('\'', "''")
        );
        let mut command = Command::new("powershell");
        command.args(["-NoProfile", "-Command", &script]);
        return Ok(command);
    }

    if cfg!(unix) {
        let command = match printer {
            Some(name) => {
                let mut command = Command::new("lp");
                command.arg("-d").arg(name).arg(path);
                command
            }
            None => {
                let mut command = Command::new("lpr");
                command.arg(path);
                command
            }
        };
        return Ok(command);
    }

    Err(PrintError::Unsupported(std::env::consts::OS))
}
