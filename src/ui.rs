/// ANSI color codes
pub struct Colors;

impl Colors {
    pub const RED: &'static str = "\x1b[91m";
    pub const GREEN: &'static str = "\x1b[92m";
    pub const YELLOW: &'static str = "\x1b[93m";
    pub const BLUE: &'static str = "\x1b[94m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const RESET: &'static str = "\x1b[0m";
}

/// Wrap text in a color code and a reset
#[must_use]
pub fn paint(text: &str, color: &str) -> String {
    format!("{}{}{}", color, text, Colors::RESET)
}

/// Print colored text to stdout
pub fn print_colored(text: &str, color: &str) {
    println!("{}", paint(text, color));
}

/// Print success message
pub fn print_success(text: &str) {
    print_colored(&format!("[+] {text}"), Colors::GREEN);
}

/// Print error message. Failures go to stdout alongside the prompt.
pub fn print_error(text: &str) {
    print_colored(&format!("[!] {text}"), Colors::RED);
}

/// Print warning message
pub fn print_warning(text: &str) {
    print_colored(&format!("[!] {text}"), Colors::YELLOW);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_wraps_with_reset() {
        assert_eq!(paint("repo", Colors::BOLD), "\x1b[1mrepo\x1b[0m");
    }
}
