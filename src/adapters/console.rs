use crate::domain::ports::AlertPresenter;
use console::style;

/// Terminal alert presenter. Errors and warnings go to stderr so they
/// survive piping; success notices go to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleAlerts;

impl ConsoleAlerts {
    pub fn new() -> Self {
        Self
    }
}

impl AlertPresenter for ConsoleAlerts {
    fn show_error(&self, title: &str, message: &str) {
        eprintln!("{} {}: {}", style("✗").red().bold(), style(title).bold(), message);
    }

    fn show_warning(&self, title: &str, message: &str) {
        eprintln!("{} {}: {}", style("⚠").yellow().bold(), style(title).bold(), message);
    }

    fn show_success(&self, title: &str, message: &str) {
        println!("{} {}: {}", style("✓").green().bold(), style(title).bold(), message);
    }
}
