//! Colored terminal output.

use acw_content::{Diagnostic, Severity};
use console::{Style, Term};

/// Terminal output formatter.
///
/// Status and diagnostics go to stderr; [`Output::data`] writes command
/// results to stdout so they can be piped.
pub(crate) struct Output {
    stderr: Term,
    stdout: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stderr: Term::stderr(),
            stdout: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    fn line(&self, msg: &str) {
        let _ = self.stderr.write_line(msg);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    /// Print a section heading (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        self.line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a diagnostic: severity colored, location dimmed.
    pub(crate) fn diagnostic(&self, diagnostic: &Diagnostic) {
        let style = match diagnostic.severity {
            Severity::Error => &self.red,
            Severity::Warning => &self.yellow,
        };
        self.line(&format!(
            "{} {} {}",
            style.apply_to(format!("{}:", diagnostic.severity)),
            self.dim.apply_to(&diagnostic.location),
            diagnostic.message
        ));
    }

    /// Write command output to stdout.
    pub(crate) fn data(&self, text: &str) -> std::io::Result<()> {
        self.stdout.write_line(text.trim_end_matches('\n'))
    }
}
