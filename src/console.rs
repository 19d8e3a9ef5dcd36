//! Console output: colored status lines, the exit pause, and the `log` backend.

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};

use log::{Level, LevelFilter, Log, Metadata, Record};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Colors only on a terminal, and never when `NO_COLOR` is set.
fn use_color(stream_is_terminal: bool) -> bool {
    stream_is_terminal && env::var_os("NO_COLOR").is_none()
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, RESET)
    } else {
        text.to_string()
    }
}

/// Red error line on stderr, with an optional hint below it.
pub fn error(message: &str, suggestion: Option<&str>) {
    let color = use_color(io::stderr().is_terminal());
    eprintln!("{}", paint(&format!("[ERROR] {}", message), RED, color));
    if let Some(suggestion) = suggestion {
        eprintln!("        {}", suggestion);
    }
}

/// Yellow warning line on stderr.
pub fn warn(message: &str) {
    let color = use_color(io::stderr().is_terminal());
    eprintln!("{}", paint(&format!("[WARN] {}", message), YELLOW, color));
}

/// Green success line on stdout.
pub fn success(message: &str) {
    let color = use_color(io::stdout().is_terminal());
    println!("{}", paint(message, GREEN, color));
}

/// Wait for Enter so a double-clicked console window stays open.
///
/// Skipped when `enabled` is false or stdin is not a terminal.
pub fn pause(enabled: bool) {
    let stdin = io::stdin();
    if !enabled || !stdin.is_terminal() {
        return;
    }
    print!("\nPress Enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = stdin.lock().read_line(&mut line);
}

/// `log` backend writing `[LEVEL] message` to stderr.
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    /// Install as the global logger. `verbose` enables debug output.
    pub fn init(verbose: bool) {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        // Fails only if a logger is already set, which keeps the first one.
        if log::set_boxed_logger(Box::new(ConsoleLogger { level })).is_ok() {
            log::set_max_level(level);
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let color = match record.level() {
            Level::Error => Some(RED),
            Level::Warn => Some(YELLOW),
            _ => None,
        };
        let line = format!("[{}] {}", record.level(), record.args());
        match color {
            Some(color) => eprintln!("{}", paint(&line, color, use_color(io::stderr().is_terminal()))),
            None => eprintln!("{}", line),
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_disabled_is_plain() {
        assert_eq!(paint("done", GREEN, false), "done");
    }

    #[test]
    fn test_paint_wraps_in_escape_codes() {
        let painted = paint("failed", RED, true);
        assert!(painted.starts_with("\x1b[31m"));
        assert!(painted.ends_with("\x1b[0m"));
        assert!(painted.contains("failed"));
    }

    #[test]
    fn test_no_color_off_terminal() {
        assert!(!use_color(false));
    }

    #[test]
    fn test_logger_level_filter() {
        let logger = ConsoleLogger {
            level: LevelFilter::Warn,
        };
        let warn = Metadata::builder().level(Level::Warn).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }
}
