//! Handlers that read or move the cursor.

use tracing::debug;

use ghterm_core::NavError;

use super::Shell;
use crate::output::{ListingRow, OutputKind, OutputSink};

impl<O: OutputSink> Shell<O> {
    pub(super) fn cmd_list(&mut self) {
        let current = self.cursor.current();
        if current.is_empty() {
            self.emit("directory is empty", OutputKind::Normal);
            return;
        }

        let rows = current.entries().map(ListingRow::from_node).collect();
        self.output.emit_listing(rows);
    }

    pub(super) fn cmd_cd(&mut self, args: &[&str]) {
        let Some(&target) = args.first() else {
            self.cursor.reset(self.root.clone());
            self.emit("changed to home directory", OutputKind::Normal);
            return;
        };

        let moved = if target == ".." {
            self.cursor.ascend()
        } else {
            self.cursor.descend(target)
        };

        match moved {
            Ok(()) => {
                let prompt = self.prompt();
                self.emit(format!("changed directory: {prompt}"), OutputKind::Normal);
            }
            Err(NavError::NotFound { name }) => {
                self.error(format!("directory '{name}' does not exist"));
            }
            Err(err) => self.error(err.to_string()),
        }
    }

    pub(super) fn cmd_pwd(&mut self) {
        let path = self.cursor.path_string();
        self.emit(path, OutputKind::Normal);
    }

    pub(super) fn cmd_scp(&mut self, args: &[&str]) {
        let Some(&name) = args.first() else {
            self.error("usage: scp [file]");
            self.info("example: scp README.md");
            return;
        };

        let target = self
            .cursor
            .file(name)
            .map(|file| (self.cursor.locator_for(file), file.name.to_string()));

        let (locator, file_name) = match target {
            Ok(target) => target,
            Err(NavError::NotFound { name }) => {
                self.error(format!("file '{name}' does not exist"));
                return;
            }
            Err(err) => {
                self.error(err.to_string());
                return;
            }
        };

        if !self.config.is_configured() {
            self.error("no repository configured, cannot download");
            return;
        }

        debug!(locator = %locator, "download requested");
        self.info(format!("downloading: {file_name}"));
        self.downloads.trigger(&self.config, &locator, &file_name);
        self.success(format!("download started: {file_name}"));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ghterm_core::{DirectoryNode, FileNode, GitHubConfig, TreeBuilder, TreeEntry};
    use ghterm_remote::StaticSource;

    use super::*;
    use crate::output::TranscriptEntry;
    use crate::settings::MemoryConfigStore;
    use crate::shell::tests::{RecordingDownloads, loaded_shell, scenario};

    fn configured() -> GitHubConfig {
        GitHubConfig::builder().repo("octo/demo").build().unwrap()
    }

    #[test]
    fn test_ls_at_root() {
        let mut shell = loaded_shell();
        shell.dispatch("ls");

        let listing = shell.output().entries().last().cloned();
        let Some(TranscriptEntry::Listing(rows)) = listing else {
            panic!("expected a listing");
        };
        let rows: Vec<String> = rows.iter().map(ToString::to_string).collect();
        assert_eq!(rows, ["README.md (2KB)", "src/"]);
    }

    #[test]
    fn test_ls_empty_directory() {
        let mut shell = loaded_shell();
        shell.load_tree(TreeBuilder::build(&Vec::<TreeEntry>::new()).unwrap());
        shell.dispatch("list");
        assert_eq!(shell.output().texts_of(OutputKind::Normal), ["directory is empty"]);
    }

    #[test]
    fn test_cd_messages() {
        let mut shell = loaded_shell();
        shell.dispatch("cd src");
        shell.dispatch("cd");
        assert_eq!(
            shell.output().texts_of(OutputKind::Normal),
            [
                "changed directory: user@github-term:~/src$",
                "changed to home directory"
            ]
        );
        assert!(shell.cursor().at_root());
    }

    #[test]
    fn test_cd_errors_leave_cursor() {
        let mut shell = loaded_shell();
        shell.dispatch("cd ..");
        shell.dispatch("cd nope");
        shell.dispatch("cd README.md");

        assert_eq!(
            shell.output().texts_of(OutputKind::Error),
            [
                "already at the root directory",
                "directory 'nope' does not exist",
                "'README.md' is not a directory",
            ]
        );
        assert_eq!(shell.cursor().path_string(), "~");
    }

    #[test]
    fn test_scp_without_args() {
        let mut shell = loaded_shell();
        shell.dispatch("scp");
        assert_eq!(shell.output().texts_of(OutputKind::Error), ["usage: scp [file]"]);
        assert_eq!(
            shell.output().texts_of(OutputKind::Info),
            ["example: scp README.md"]
        );
    }

    #[test]
    fn test_scp_rejects_directories_and_missing() {
        let mut shell = loaded_shell().with_config(configured());
        shell.dispatch("scp src");
        shell.dispatch("scp ghost.txt");
        assert_eq!(
            shell.output().texts_of(OutputKind::Error),
            ["'src' is not a file", "file 'ghost.txt' does not exist"]
        );
    }

    #[test]
    fn test_scp_requires_repository() {
        let mut shell = loaded_shell();
        shell.dispatch("scp README.md");
        assert_eq!(shell.output().texts_of(OutputKind::Error).len(), 1);
        assert!(shell.output().texts_of(OutputKind::Success).is_empty());
    }

    #[test]
    fn test_scp_uses_source_path() {
        let downloads = Arc::new(RecordingDownloads::default());
        let mut shell = crate::shell::Shell::new(
            crate::output::Transcript::new(),
            Arc::new(StaticSource::new(scenario())),
            downloads.clone(),
            Box::new(MemoryConfigStore::with_config(configured())),
        );
        shell.load_tree(TreeBuilder::build(&scenario()).unwrap());

        shell.dispatch("cd src");
        shell.dispatch("scp a.txt");

        assert_eq!(
            *downloads.requests.lock().unwrap(),
            [("src/a.txt".to_string(), "a.txt".to_string())]
        );
        assert_eq!(
            shell.output().texts_of(OutputKind::Success),
            ["download started: a.txt"]
        );
    }

    #[test]
    fn test_scp_rebuilds_locator_without_source_path() {
        let mut docs = DirectoryNode::new("docs");
        docs.children.insert(
            "guide.md".into(),
            ghterm_core::TreeNode::File(FileNode::new("guide.md", 5)),
        );
        let mut root = DirectoryNode::root();
        root.children
            .insert("docs".into(), ghterm_core::TreeNode::Directory(Arc::new(docs)));

        let downloads = Arc::new(RecordingDownloads::default());
        let mut shell = crate::shell::Shell::new(
            crate::output::Transcript::new(),
            Arc::new(StaticSource::new(Vec::new())),
            downloads.clone(),
            Box::new(MemoryConfigStore::with_config(configured())),
        );
        shell.load_tree(Arc::new(root));

        shell.dispatch("cd docs");
        shell.dispatch("scp guide.md");
        assert_eq!(downloads.requests.lock().unwrap()[0].0, "docs/guide.md");
    }

    #[test]
    fn test_pwd() {
        let mut shell = loaded_shell();
        shell.dispatch("cd src");
        shell.dispatch("pwd");
        assert_eq!(shell.output().texts_of(OutputKind::Normal).last().unwrap(), "~/src");
    }
}
