//! # Command Execution
//!
//! The materializer never touches the filesystem directly. It describes each
//! step as a [`Command`] and hands it to a [`CommandExecutor`]:
//!
//! - **`FsExecutor`** performs the step with `std::fs` calls.
//! - **`RecordingExecutor`** performs nothing. It writes one shell-equivalent
//!   line per step to a writer and keeps the commands for inspection.
//!
//! Both see the same commands in the same order, which is what makes a
//! preview run a faithful dry run of an execute run.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

/// A single filesystem action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a directory and all missing parents.
    MakeDirectory { path: PathBuf },
    /// Copy a file byte-for-byte, replacing the destination.
    CopyFile { from: PathBuf, to: PathBuf },
    /// Append `text` and a newline to a file.
    AppendText { path: PathBuf, text: String },
}

impl Command {
    /// Short name of the step, used in error reports.
    pub fn step(&self) -> &'static str {
        match self {
            Command::MakeDirectory { .. } => "mkdir",
            Command::CopyFile { .. } => "cp",
            Command::AppendText { .. } => "append",
        }
    }

    /// Dispatch this command to `executor`.
    pub fn apply(&self, executor: &mut dyn CommandExecutor) -> io::Result<()> {
        match self {
            Command::MakeDirectory { path } => executor.make_directory(path),
            Command::CopyFile { from, to } => executor.copy_file(from, to),
            Command::AppendText { path, text } => executor.append_text(path, text),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::MakeDirectory { path } => write!(f, "mkdir -p {}", quote_path(path)),
            Command::CopyFile { from, to } => {
                write!(f, "cp {} {}", quote_path(from), quote_path(to))
            }
            Command::AppendText { path, text } => match text.strip_prefix('\n') {
                Some(line) => write!(
                    f,
                    "printf '\\n%s\\n' {} >> {}",
                    shell_quote(line),
                    quote_path(path)
                ),
                None => write!(f, "echo {} >> {}", shell_quote(text), quote_path(path)),
            },
        }
    }
}

fn quote_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let safe = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+=:,@%".contains(c));
    if safe {
        raw.into_owned()
    } else {
        shell_quote(&raw)
    }
}

/// Single-quote `text` for a POSIX shell.
fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// The capability the materializer depends on.
pub trait CommandExecutor {
    /// Create `path` and any missing parent directories.
    fn make_directory(&mut self, path: &Path) -> io::Result<()>;

    /// Copy `from` to `to`, overwriting `to` if it exists.
    fn copy_file(&mut self, from: &Path, to: &Path) -> io::Result<()>;

    /// Append `text` followed by a newline to `path`.
    fn append_text(&mut self, path: &Path, text: &str) -> io::Result<()>;
}

/// Executor that performs real filesystem I/O.
#[derive(Debug, Default)]
pub struct FsExecutor;

impl FsExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for FsExecutor {
    fn make_directory(&mut self, path: &Path) -> io::Result<()> {
        debug!("mkdir -p {}", path.display());
        fs::create_dir_all(path)
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        debug!("cp {} {}", from.display(), to.display());
        fs::copy(from, to).map(|_| ())
    }

    fn append_text(&mut self, path: &Path, text: &str) -> io::Result<()> {
        debug!("append {:?} to {}", text, path.display());
        // Never create: appending to a file that was not copied is a bug upstream.
        let mut file = OpenOptions::new().append(true).open(path)?;
        file.write_all(text.as_bytes())?;
        file.write_all(b"\n")
    }
}

/// Executor that renders commands instead of running them.
///
/// Each command is written to `writer` as one line, in call order.
#[derive(Debug)]
pub struct RecordingExecutor<W: Write> {
    writer: W,
    commands: Vec<Command>,
}

impl<W: Write> RecordingExecutor<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    fn record(&mut self, command: Command) -> io::Result<()> {
        writeln!(self.writer, "{}", command)?;
        self.commands.push(command);
        Ok(())
    }
}

impl RecordingExecutor<io::Sink> {
    /// A recorder that keeps commands without printing them.
    pub fn silent() -> Self {
        Self::new(io::sink())
    }
}

impl<W: Write> CommandExecutor for RecordingExecutor<W> {
    fn make_directory(&mut self, path: &Path) -> io::Result<()> {
        self.record(Command::MakeDirectory {
            path: path.to_path_buf(),
        })
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        self.record(Command::CopyFile {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        })
    }

    fn append_text(&mut self, path: &Path, text: &str) -> io::Result<()> {
        self.record(Command::AppendText {
            path: path.to_path_buf(),
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_display() {
        let mkdir = Command::MakeDirectory {
            path: PathBuf::from("/out/envoy/type"),
        };
        assert_eq!(mkdir.to_string(), "mkdir -p /out/envoy/type");

        let cp = Command::CopyFile {
            from: PathBuf::from("/src/api/envoy/type/percent.proto"),
            to: PathBuf::from("/out/envoy/type/percent.proto"),
        };
        assert_eq!(
            cp.to_string(),
            "cp /src/api/envoy/type/percent.proto /out/envoy/type/percent.proto"
        );

        let append = Command::AppendText {
            path: PathBuf::from("/out/a.proto"),
            text: "option (gogoproto.equal_all) = true;".to_string(),
        };
        assert_eq!(
            append.to_string(),
            "echo 'option (gogoproto.equal_all) = true;' >> /out/a.proto"
        );
    }

    #[test]
    fn test_command_display_quotes_special_paths() {
        let mkdir = Command::MakeDirectory {
            path: PathBuf::from("/my dir/it's"),
        };
        assert_eq!(mkdir.to_string(), r"mkdir -p '/my dir/it'\''s'");
    }

    #[test]
    fn test_command_display_quotes_tilde() {
        // An unquoted leading `~` would be expanded by the shell.
        let cp = Command::CopyFile {
            from: PathBuf::from("~/api/a.proto"),
            to: PathBuf::from("out/~b.proto"),
        };
        assert_eq!(cp.to_string(), "cp '~/api/a.proto' 'out/~b.proto'");
    }

    #[test]
    fn test_command_display_leading_newline() {
        let append = Command::AppendText {
            path: PathBuf::from("/out/a.proto"),
            text: "\nimport \"x.proto\";".to_string(),
        };
        assert_eq!(
            append.to_string(),
            r#"printf '\n%s\n' 'import "x.proto";' >> /out/a.proto"#
        );
    }

    #[test]
    fn test_recording_executor_writes_one_line_per_command() {
        let mut out = Vec::new();
        {
            let mut recorder = RecordingExecutor::new(&mut out);
            recorder.make_directory(Path::new("/d")).unwrap();
            recorder
                .copy_file(Path::new("/s/a"), Path::new("/d/a"))
                .unwrap();
            recorder.append_text(Path::new("/d/a"), "x").unwrap();
            assert_eq!(recorder.commands().len(), 3);
        }
        let text = String::from_utf8(out).unwrap();
        insta::assert_snapshot!(text.trim_end(), @r"
        mkdir -p /d
        cp /s/a /d/a
        echo 'x' >> /d/a
        ");
    }

    #[test]
    fn test_recording_executor_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested/dir");

        let mut recorder = RecordingExecutor::silent();
        recorder.make_directory(&target).unwrap();
        recorder
            .copy_file(&temp_dir.path().join("missing"), &target.join("f"))
            .unwrap();

        assert!(!target.exists());
        assert_eq!(recorder.into_commands().len(), 2);
    }

    #[test]
    fn test_fs_executor_performs_commands() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src.proto");
        fs::write(&src, "syntax = \"proto3\";\n").unwrap();
        let dir = temp_dir.path().join("out/pkg");
        let dst = dir.join("src.proto");

        let mut executor = FsExecutor::new();
        let commands = vec![
            Command::MakeDirectory { path: dir.clone() },
            Command::CopyFile {
                from: src.clone(),
                to: dst.clone(),
            },
            Command::AppendText {
                path: dst.clone(),
                text: "// vendored".to_string(),
            },
        ];
        for command in &commands {
            command.apply(&mut executor).unwrap();
        }

        assert_eq!(
            fs::read_to_string(&dst).unwrap(),
            "syntax = \"proto3\";\n// vendored\n"
        );
    }

    #[test]
    fn test_fs_executor_copy_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("a");
        let dst = temp_dir.path().join("b");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old content").unwrap();

        FsExecutor::new().copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
    }

    #[test]
    fn test_fs_executor_append_requires_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = FsExecutor::new()
            .append_text(&temp_dir.path().join("absent"), "x")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
