//! Terminal output for folio.
//!
//! Every line is prefixed with a colored module tag, e.g. `[build]` or
//! `[warn]`. Debug lines only appear when `--verbose` was passed.

use console::style;
use std::io::{Write, stderr, stdout};
use std::sync::atomic::{AtomicBool, Ordering};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a message with a colored module prefix
///
/// ```ignore
/// log!("build"; "rendered {} pages", count);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message only when --verbose is enabled
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    // warnings and errors go to stderr so `folio head > head.html` stays clean
    if matches!(module, "warn" | "error") {
        let mut err = stderr().lock();
        writeln!(err, "{prefix} {message}").ok();
    } else {
        let mut out = stdout().lock();
        writeln!(out, "{prefix} {message}").ok();
    }
}

/// Prints a dimmed `[n/total]` step line, as the build pipeline does.
pub fn step(n: usize, total: usize, message: &str) {
    println!("{} {}", style(format!("[{n}/{total}]")).dim(), message);
}

/// Prints the closing `success` line of a command.
pub fn success(message: &str) {
    println!("{} {}", style("success").cyan(), message);
}

fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module {
        "error" => style(prefix).red().bold().to_string(),
        "warn" => style(prefix).yellow().bold().to_string(),
        "build" => style(prefix).blue().bold().to_string(),
        _ => style(prefix).green().bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_prefix_contains_module() {
        assert!(colorize_prefix("warn").contains("[warn]"));
        assert!(colorize_prefix("config").contains("[config]"));
    }
}
