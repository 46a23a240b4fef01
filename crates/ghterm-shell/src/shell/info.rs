//! Handlers that only print.

use strum::IntoEnumIterator;

use super::Shell;
use crate::output::{OutputKind, OutputSink};
use crate::registry::Verb;

const VERSION: &str = env!("CARGO_PKG_VERSION");

impl<O: OutputSink> Shell<O> {
    pub(super) fn cmd_help(&mut self) {
        self.emit("available commands:", OutputKind::Normal);
        for verb in Verb::iter() {
            let line = format!("  {:<34}{}", verb.usage(), verb.summary());
            self.emit(line, OutputKind::Normal);
        }
    }

    pub(super) fn cmd_hello(&mut self) {
        self.success("hello! welcome to the GitHub terminal.");
        self.info("type 'help' to see what you can do.");
    }

    pub(super) fn cmd_clear(&mut self) {
        self.output.clear();
        self.info("terminal cleared");
    }

    pub(super) fn cmd_time(&mut self) {
        let now = chrono::Local::now();
        self.info(format!("current time: {}", now.format("%H:%M:%S")));
    }

    pub(super) fn cmd_date(&mut self) {
        let now = chrono::Local::now();
        self.info(format!("current date: {}", now.format("%A, %B %-d, %Y")));
    }

    pub(super) fn cmd_echo(&mut self, args: &[&str]) {
        if args.is_empty() {
            self.error("usage: echo [text]");
            return;
        }
        self.emit(args.join(" "), OutputKind::Normal);
    }

    pub(super) fn cmd_about(&mut self) {
        self.info(format!("ghterm {VERSION}"));
        self.emit(
            "a command shell for browsing GitHub repositories as if they were local directories.",
            OutputKind::Normal,
        );
        self.emit(
            "load a repository with loadrepo, move around with cd and ls, and fetch files with scp.",
            OutputKind::Normal,
        );
        self.emit(
            "use the up and down arrows for history and tab to complete commands.",
            OutputKind::Normal,
        );
    }

    pub(super) fn cmd_system(&mut self) {
        let locale = std::env::var("LANG").unwrap_or_else(|_| "unknown".to_string());
        let terminal = match crossterm::terminal::size() {
            Ok((cols, rows)) => format!("{cols}x{rows}"),
            Err(_) => "unknown".to_string(),
        };

        self.info("system information:");
        let lines = [
            format!(
                "  os: {} ({})",
                std::env::consts::OS,
                std::env::consts::FAMILY
            ),
            format!("  architecture: {}", std::env::consts::ARCH),
            format!("  locale: {locale}"),
            format!("  terminal: {terminal}"),
            "  online: unknown".to_string(),
            format!("  process id: {}", std::process::id()),
        ];
        for line in lines {
            self.emit(line, OutputKind::Normal);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::output::OutputKind;
    use crate::shell::tests::loaded_shell;

    #[test]
    fn test_help_lists_every_verb() {
        let mut shell = loaded_shell();
        shell.dispatch("help");

        let lines = shell.output().texts_of(OutputKind::Normal);
        assert_eq!(lines[0], "available commands:");
        assert_eq!(lines.len(), 15);
        assert!(lines.iter().any(|l| l.contains("ls, list")));
        assert!(lines.iter().any(|l| l.contains("loadrepo [repo] [branch] [token]")));
    }

    #[test]
    fn test_echo() {
        let mut shell = loaded_shell();
        shell.dispatch("echo hello   world");
        shell.dispatch("echo");

        assert_eq!(shell.output().texts_of(OutputKind::Normal), ["hello   world"]);
        assert_eq!(
            shell.output().texts_of(OutputKind::Error),
            ["usage: echo [text]"]
        );
    }

    #[test]
    fn test_clear_keeps_only_notice() {
        let mut shell = loaded_shell();
        shell.dispatch("pwd");
        shell.dispatch("clear");

        let lines = shell.output().lines();
        assert_eq!(lines, [(OutputKind::Info, "terminal cleared".to_string())]);
    }

    #[test]
    fn test_hello_time_date() {
        let mut shell = loaded_shell();
        shell.dispatch("hello");
        shell.dispatch("time");
        shell.dispatch("date");

        assert_eq!(shell.output().texts_of(OutputKind::Success).len(), 1);
        let info = shell.output().texts_of(OutputKind::Info);
        assert_eq!(info.len(), 3);
        assert!(info[1].starts_with("current time: "));
        assert!(info[2].starts_with("current date: "));
    }

    #[test]
    fn test_about_and_system() {
        let mut shell = loaded_shell();
        shell.dispatch("about");
        shell.dispatch("system");

        let normal = shell.output().texts_of(OutputKind::Normal);
        assert!(normal.iter().any(|l| l.contains("tab")));
        assert!(normal.iter().any(|l| l.contains("process id")));
    }
}
