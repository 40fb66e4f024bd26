//! Logger setup.
//!
//! Lines are formatted as `<timestamp>: <message>` and always go to stdout.
//! When a log file is configured they are appended there too. The level
//! defaults to `info` and can be overridden with `RUST_LOG`.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes every byte to the console and, when present, a second sink.
pub struct DualWriter<C, F> {
    console: C,
    file: Option<F>,
}

impl<C: Write, F: Write> DualWriter<C, F> {
    pub fn new(console: C, file: Option<F>) -> Self {
        Self { console, file }
    }
}

impl<C: Write, F: Write> Write for DualWriter<C, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Render one log line body (without the trailing newline).
pub fn format_line(
    timestamp: &chrono::DateTime<chrono::Local>,
    message: &dyn std::fmt::Display,
) -> String {
    format!("{}: {}", timestamp.format(TIMESTAMP_FORMAT), message)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger.
///
/// Fails if the log file cannot be opened or a logger is already installed.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let file = log_file.map(open_log_file).transpose()?;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(buf, "{}", format_line(&chrono::Local::now(), record.args()))
        })
        .target(Target::Pipe(Box::new(DualWriter::new(io::stdout(), file))))
        .try_init()
        .map_err(io::Error::other)
}
