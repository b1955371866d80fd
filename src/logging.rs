//! Console Logging
//!
//! `[TAG] message` lines on the browser console. Native builds (unit
//! tests) print to stderr instead, since the console bindings only exist
//! inside a browser.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

pub fn format_line(tag: &str, message: &str) -> String {
    format!("[{}] {}", tag, message)
}

pub fn write(level: Level, tag: &str, message: &str) {
    let line = format_line(tag, message);
    #[cfg(target_arch = "wasm32")]
    {
        match level {
            Level::Info => gloo_console::log!(line),
            Level::Warn => gloo_console::warn!(line),
            Level::Error => gloo_console::error!(line),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("{:?} {}", level, line);
    }
}

pub fn info(tag: &str, message: impl AsRef<str>) {
    write(Level::Info, tag, message.as_ref());
}

pub fn warn(tag: &str, message: impl AsRef<str>) {
    write(Level::Warn, tag, message.as_ref());
}

pub fn error(tag: &str, message: impl AsRef<str>) {
    write(Level::Error, tag, message.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        assert_eq!(format_line("API", "GET /customers"), "[API] GET /customers");
    }
}
