//! Output functions for consistent CLI formatting

use console::style;

/// Display a success step
pub fn step_ok(message: &str) {
    println!("  {} {}", style("[OK]").green(), message);
}

/// Display a success step with detail
pub fn step_ok_detail(message: &str, detail: &str) {
    println!("  {} {} ({})", style("[OK]").green(), message, style(detail).dim());
}

/// Display a warning step with hint
pub fn step_warn_hint(message: &str, hint: &str) {
    println!("  {} {} - {}", style("[WARN]").yellow(), message, hint);
}

/// Display an error step with detail
pub fn step_error_detail(message: &str, detail: &str) {
    eprintln!("  {} {}: {}", style("[FAIL]").red(), message, detail);
}

/// Display a remark/hint
pub fn remark(message: &str) {
    eprintln!("  {}", style(message).dim());
}

/// Print styled key-value pair
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print key-value with status color
pub fn key_value_status(key: &str, value: &str, ok: bool) {
    let value = if ok {
        style(value).green()
    } else {
        style(value).yellow()
    };
    println!("  {}: {}", style(key).dim(), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_does_not_panic() {
        step_ok("Step completed");
        step_ok_detail("Saved", "/tmp/config.toml");
        step_warn_hint("Exists", "Use --force");
        key_value("path", "/tmp/x");
        key_value_status("present", "no", false);
    }
}
