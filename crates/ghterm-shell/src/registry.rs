//! The fixed set of shell verbs.

use std::str::FromStr;

use strum::{EnumIter, EnumMessage, EnumString, IntoEnumIterator};

/// A command verb. Each variant lists every name it answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumMessage, EnumString)]
pub enum Verb {
    #[strum(serialize = "help", message = "show this help", detailed_message = "help")]
    Help,
    #[strum(serialize = "hello", message = "say hello", detailed_message = "hello")]
    Hello,
    #[strum(serialize = "clear", message = "clear the terminal", detailed_message = "clear")]
    Clear,
    #[strum(serialize = "time", message = "show the current time", detailed_message = "time")]
    Time,
    #[strum(serialize = "date", message = "show the current date", detailed_message = "date")]
    Date,
    #[strum(serialize = "echo", message = "print text", detailed_message = "echo [text]")]
    Echo,
    #[strum(serialize = "about", message = "about this terminal", detailed_message = "about")]
    About,
    #[strum(serialize = "system", message = "system information", detailed_message = "system")]
    System,
    #[strum(
        serialize = "ls",
        serialize = "list",
        message = "list the current directory",
        detailed_message = "ls, list"
    )]
    List,
    #[strum(serialize = "cd", message = "change directory", detailed_message = "cd [dir]")]
    Cd,
    #[strum(serialize = "scp", message = "download a file", detailed_message = "scp [file]")]
    Scp,
    #[strum(serialize = "pwd", message = "print the current path", detailed_message = "pwd")]
    Pwd,
    #[strum(
        serialize = "github",
        message = "show repository status",
        detailed_message = "github"
    )]
    GitHub,
    #[strum(
        serialize = "loadrepo",
        message = "load a GitHub repository",
        detailed_message = "loadrepo [repo] [branch] [token]"
    )]
    LoadRepo,
}

impl Verb {
    /// Resolve a typed verb, ignoring case.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::from_str(&name.to_lowercase()).ok()
    }

    /// Every registered name, aliases included, in table order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::iter().flat_map(|verb| verb.get_serializations().iter().copied())
    }

    /// Usage string shown by `help`.
    pub fn usage(self) -> &'static str {
        self.get_detailed_message().unwrap_or_default()
    }

    /// One-line description shown by `help`.
    pub fn summary(self) -> &'static str {
        self.get_message().unwrap_or_default()
    }
}

/// Outcome of completing a partially typed verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing matched.
    None,
    /// Exactly one verb matched.
    Unique(&'static str),
    /// Several verbs matched.
    Ambiguous(Vec<&'static str>),
}

/// Match `partial` against every registered name, ignoring case.
pub fn complete(partial: &str) -> Completion {
    let partial = partial.to_lowercase();
    let mut matches: Vec<&'static str> =
        Verb::names().filter(|name| name.starts_with(&partial)).collect();

    match matches.len() {
        0 => Completion::None,
        1 => Completion::Unique(matches.remove(0)),
        _ => Completion::Ambiguous(matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(Verb::lookup("ls"), Some(Verb::List));
        assert_eq!(Verb::lookup("LIST"), Some(Verb::List));
        assert_eq!(Verb::lookup("LoadRepo"), Some(Verb::LoadRepo));
        assert_eq!(Verb::lookup("foo"), None);
        assert_eq!(Verb::lookup(""), None);
    }

    #[test]
    fn test_names_include_aliases() {
        let names: Vec<_> = Verb::names().collect();
        assert_eq!(names.len(), 15);
        assert!(names.contains(&"ls"));
        assert!(names.contains(&"list"));
        assert_eq!(names.first(), Some(&"help"));
        assert_eq!(names.last(), Some(&"loadrepo"));
    }

    #[test]
    fn test_complete_unique() {
        assert_eq!(complete("pw"), Completion::Unique("pwd"));
        assert_eq!(complete("LOAD"), Completion::Unique("loadrepo"));
        assert_eq!(complete("sc"), Completion::Unique("scp"));
    }

    #[test]
    fn test_complete_ambiguous() {
        assert_eq!(complete("he"), Completion::Ambiguous(vec!["help", "hello"]));
        assert_eq!(complete("l"), Completion::Ambiguous(vec!["ls", "list", "loadrepo"]));
    }

    #[test]
    fn test_complete_none() {
        assert_eq!(complete("zz"), Completion::None);
        assert_eq!(complete("cd src"), Completion::None);
    }

    #[test]
    fn test_help_text() {
        assert_eq!(Verb::Echo.usage(), "echo [text]");
        assert_eq!(Verb::List.summary(), "list the current directory");
    }
}
