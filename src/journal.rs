//! Operator journal
//!
//! Human-readable record of every correction decision. Lines go to a text
//! file (`[HH:MM:SS] LEVEL > message`) and/or the console, depending on
//! `Config`. Writing is best-effort: failures are reported through the `log`
//! facade and otherwise ignored.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveTime};

use crate::consts::JOURNAL_STEM;
use crate::settings::Config;

/// Journal severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// File line: `[HH:MM:SS] LEVEL > message`
pub fn format_file_line(time: NaiveTime, level: LogLevel, message: &str) -> String {
    format!("[{}] {} > {}", time.format("%H:%M:%S"), level.as_str(), message)
}

/// Console line: the message on a single line
pub fn console_line(message: &str) -> String {
    message.replace("\r\n", " ").replace('\n', " ")
}

/// Writes journal lines according to the logging config
#[derive(Debug, Clone)]
pub struct Journal {
    config: Config,
    dir: PathBuf,
}

impl Journal {
    /// Journal writing files into `dir`
    pub fn new(config: Config, dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            dir: dir.into(),
        }
    }

    /// Journal with both sinks off
    pub fn silent() -> Self {
        Self::new(Config::silent(), PathBuf::new())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the default file or a named one
    pub fn file_path(&self, file_name: Option<&str>) -> PathBuf {
        match file_name.filter(|name| !name.is_empty()) {
            Some(name) => self.dir.join(format!("{}_{}.txt", JOURNAL_STEM, name)),
            None => self.dir.join(format!("{}.txt", JOURNAL_STEM)),
        }
    }

    pub fn info(&self, message: &str) {
        self.log(message, LogLevel::Info, None);
    }

    pub fn warn(&self, message: &str) {
        self.log(message, LogLevel::Warning, None);
    }

    pub fn error(&self, message: &str) {
        self.log(message, LogLevel::Error, None);
    }

    /// Record a message at `level`, optionally into a named file
    pub fn log(&self, message: &str, level: LogLevel, file_name: Option<&str>) {
        if self.config.log_in_file {
            let line = format_file_line(Local::now().time(), level, message);
            let path = self.file_path(file_name);
            if let Err(err) = append_line(&path, &line) {
                log::warn!("Journal write to {} failed: {}", path.display(), err);
            }
        }

        if self.config.log_in_console {
            log::log!(log::Level::from(level), "{}", console_line(message));
        }
    }
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "vessel-bounds-fix-journal-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_format_file_line() {
        let time = NaiveTime::from_hms_opt(14, 5, 9).unwrap();
        assert_eq!(
            format_file_line(time, LogLevel::Warning, "Vessel spawned out of bounds"),
            "[14:05:09] WARNING > Vessel spawned out of bounds"
        );
    }

    #[test]
    fn test_console_line_collapses_newlines() {
        assert_eq!(console_line("a\nb\r\nc"), "a b c");
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = scratch_dir("append");
        let journal = Journal::new(
            Config {
                log_in_file: true,
                log_in_console: false,
            },
            &dir,
        );

        journal.info("first");
        journal.error("second");

        let text = fs::read_to_string(journal.file_path(None)).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] INFO > first"));
        assert!(lines[1].ends_with("] ERROR > second"));
        // "[HH:MM:SS]" prefix
        assert_eq!(&lines[0][9..11], "] ");
    }

    #[test]
    fn test_named_file() {
        let dir = scratch_dir("named");
        let journal = Journal::new(Config::default(), &dir);
        journal.log("moved", LogLevel::Info, Some("positions"));

        let path = journal.file_path(Some("positions"));
        assert!(path.ends_with("vessel_bounds_fix_positions.txt"));
        assert!(path.exists());
        assert!(!journal.file_path(None).exists());
    }

    #[test]
    fn test_file_sink_disabled() {
        let dir = scratch_dir("disabled");
        let journal = Journal::new(
            Config {
                log_in_file: false,
                log_in_console: true,
            },
            &dir,
        );
        journal.warn("nothing on disk");
        assert!(!dir.exists());
    }
}
