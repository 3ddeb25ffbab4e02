//! Question bank: the ordered question list of every path.
//!
//! Content and order are deployment configuration. Nothing here is
//! generated at runtime.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::question::Question;
use crate::core::PathKind;

/// Ordered questions per path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    paths: FxHashMap<PathKind, Vec<Question>>,
}

impl QuestionBank {
    /// Create an empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the questions of a path.
    pub fn set_path(&mut self, path: PathKind, questions: Vec<Question>) {
        self.paths.insert(path, questions);
    }

    /// All questions of a path in order. Empty if the path has none.
    #[must_use]
    pub fn path(&self, path: PathKind) -> &[Question] {
        self.paths.get(&path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The question at `index` on a path.
    #[must_use]
    pub fn get(&self, path: PathKind, index: usize) -> Option<&Question> {
        self.path(path).get(index)
    }

    /// Number of questions on a path.
    #[must_use]
    pub fn len(&self, path: PathKind) -> usize {
        self.path(path).len()
    }

    /// Check if no path has any questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.values().all(Vec::is_empty)
    }

    /// The Linux command questions of the deployed maze game.
    #[must_use]
    pub fn linux_commands() -> Self {
        fn q(id: u32, text: &str, correct: &str, wrong: [&str; 3]) -> Question {
            wrong
                .into_iter()
                .fold(Question::new(id, text).with_correct(correct), |q, w| q.with_wrong(w))
        }

        let mut bank = Self::new();
        bank.set_path(
            PathKind::Easy,
            vec![
                q(
                    1,
                    "Which command lists files and directories in the current location?",
                    "ls",
                    ["cd", "pwd", "cat"],
                ),
                q(
                    2,
                    "Which command changes the current working directory?",
                    "cd",
                    ["ls", "mv", "cp"],
                ),
                q(
                    3,
                    "Which command searches for patterns in text files?",
                    "grep",
                    ["find", "sed", "awk"],
                ),
                q(
                    4,
                    "Which command changes file permissions using symbolic notation?",
                    "chmod",
                    ["chown", "chgrp", "umask"],
                ),
                q(
                    5,
                    "Which command displays currently running processes?",
                    "ps",
                    ["top", "kill", "jobs"],
                ),
                q(
                    6,
                    "Which command displays the manual pages for other commands?",
                    "man",
                    ["info", "help", "whatis"],
                ),
                q(
                    7,
                    "Which command outputs text to the terminal?",
                    "echo",
                    ["printf", "cat", "tee"],
                ),
                q(8, "Which command copies files and directories?", "cp", ["mv", "rm", "ln"]),
                q(
                    9,
                    "Which command displays the first 10 lines of a file by default?",
                    "head",
                    ["tail", "more", "less"],
                ),
                q(
                    10,
                    "Which command creates compressed archive files (.tar)?",
                    "tar",
                    ["gzip", "zip", "bzip2"],
                ),
            ],
        );
        bank.set_path(
            PathKind::Medium,
            vec![
                q(
                    1,
                    "Which command searches for files recursively using various criteria?",
                    "find",
                    ["locate", "which", "whereis"],
                ),
                q(
                    2,
                    "Which command is a pattern scanning and processing language?",
                    "awk",
                    ["sed", "grep", "cut"],
                ),
                q(
                    3,
                    "Which command builds and executes commands from standard input?",
                    "xargs",
                    ["parallel", "find", "exec"],
                ),
                q(
                    4,
                    "Which modern command displays network socket statistics (replaces netstat)?",
                    "ss",
                    ["netstat", "lsof", "nmap"],
                ),
                q(
                    5,
                    "Which command manages systemd services on modern Linux?",
                    "systemctl",
                    ["service", "init", "upstart"],
                ),
                q(
                    6,
                    "Which command efficiently syncs files and directories locally or remotely?",
                    "rsync",
                    ["scp", "sftp", "ftp"],
                ),
            ],
        );
        bank.set_path(
            PathKind::Hard,
            vec![
                q(
                    1,
                    "Which command traces system calls and signals made by a process?",
                    "strace",
                    ["ltrace", "gdb", "valgrind"],
                ),
                q(
                    2,
                    "Which is the legacy netfilter firewall administration tool for Linux?",
                    "iptables",
                    ["nftables", "ufw", "firewalld"],
                ),
                q(
                    3,
                    "Which command provides performance analysis tools for Linux?",
                    "perf",
                    ["dtrace", "ftrace", "bpftrace"],
                ),
                q(
                    4,
                    "Which command prints shared library dependencies of an executable?",
                    "ldd",
                    ["objdump", "readelf", "nm"],
                ),
            ],
        );
        bank
    }
}
