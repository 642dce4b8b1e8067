//! # Tool Invocation Module
//!
//! Describes an external minifier and drives a single invocation of it.
//!
//! ## Protocol (fixed, for compatibility with existing tool binaries):
//! - full source text on stdin, then stdin is closed
//! - minified text on stdout when the tool exits 0
//! - diagnostic text on stderr when it exits nonzero
//!
//! ## Pipe handling:
//! The stdin write and the stdout/stderr drains run as three independent
//! futures joined before the exit status is read. A tool may block writing
//! output once the OS pipe buffer fills; writing all input before draining
//! any output deadlocks on large files, so the three flows must never be
//! serialized.
//!
//! Tools with a `.jar` extension are launched as `java -jar <name>`, others
//! directly. Either way the process runs in the tool's own containing
//! directory so its relative resource lookups resolve.

use crate::charset::Charset;
use crate::error::CompressError;
use crate::transcode::escape_non_ascii;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::debug;

/// An external minifier tool: executable location, fixed options, and
/// whether its input/output must pass through unicode escaping.
///
/// Constructed once per run and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Executable location (a `.jar` is run via `java -jar`)
    pub path: PathBuf,
    /// Option string passed on the command line
    pub options: Vec<String>,
    /// Escape non-ASCII input before sending, and the output on return
    pub escape_unicode: bool,
}

impl ToolSpec {
    /// The JavaScript compiler (Closure-style), unicode escaping on
    pub fn javascript(path: PathBuf, charset: Charset) -> Self {
        Self {
            path,
            options: vec!["--charset".to_string(), charset.name().to_string()],
            escape_unicode: true,
        }
    }

    /// The CSS compressor (YUI-style), unicode escaping off
    pub fn stylesheet(path: PathBuf, charset: Charset) -> Self {
        Self {
            path,
            options: vec![
                "--type".to_string(),
                "css".to_string(),
                "--charset".to_string(),
                charset.name().to_string(),
            ],
            escape_unicode: false,
        }
    }

    /// The tool's own containing directory
    fn working_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    fn is_jar(&self) -> bool {
        self.path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("jar"))
            .unwrap_or(false)
    }

    fn command(&self) -> Command {
        let mut cmd = if self.is_jar() {
            let mut cmd = Command::new("java");
            cmd.arg("-jar");
            match self.path.file_name() {
                Some(name) => cmd.arg(name),
                None => cmd.arg(&self.path),
            };
            cmd
        } else {
            // The child resolves a relative program path against its new
            // working directory, so hand it an absolute one.
            let exe = self
                .path
                .canonicalize()
                .unwrap_or_else(|_| self.path.clone());
            Command::new(exe)
        };
        cmd.args(&self.options).current_dir(self.working_dir());
        cmd
    }

    /// Pipe `source` through the tool and return its minified output.
    ///
    /// Fails with `ToolMissing` before anything is spawned if the executable
    /// is absent, with `ToolFailed` (captured stderr) on a nonzero exit, and
    /// with `Io` on any spawn/stream/wait error. A single attempt, no retry,
    /// no timeout; never panics past this boundary.
    pub async fn run(&self, source: &str, charset: Charset) -> Result<String, CompressError> {
        if !self.path.exists() {
            return Err(CompressError::ToolMissing(self.path.clone()));
        }

        let source = if self.escape_unicode {
            escape_non_ascii(source)
        } else {
            source.to_string()
        };
        let input = charset.encode(&source);

        debug!(
            "invoking {} ({} bytes in, cwd {})",
            self.path.display(),
            input.len(),
            self.working_dir().display()
        );

        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("child stdin not captured"))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout not captured"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("child stderr not captured"))?;

        // Three independent flows: input write, stdout drain, stderr drain.
        let feed = async {
            stdin.write_all(&input).await?;
            stdin.shutdown().await?;
            drop(stdin);
            Ok::<(), io::Error>(())
        };
        let drain_out = async {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).await?;
            Ok::<Vec<u8>, io::Error>(buf)
        };
        let drain_err = async {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf).await?;
            Ok::<Vec<u8>, io::Error>(buf)
        };

        let (fed, out, err) = tokio::join!(feed, drain_out, drain_err);
        fed?;
        let out = out?;
        let err = err?;

        let status = child.wait().await?;
        debug!("{} exited with {}", self.path.display(), status);

        if status.success() {
            let text = charset.decode(&out).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("tool output is not valid {}", charset.name()),
                )
            })?;
            Ok(if self.escape_unicode {
                // The tool emits the same escape convention for any
                // non-ASCII it preserves; apply it to keep output ASCII-safe.
                escape_non_ascii(&text)
            } else {
                text
            })
        } else {
            Err(CompressError::ToolFailed {
                stderr: charset.decode_lossy(&err),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn fake_tool(dir: &TempDir, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_missing_tool_is_not_spawned() {
        let spec = ToolSpec::javascript(PathBuf::from("/no/such/closure.jar"), Charset::default());
        let result = spec.run("var a = 1;", Charset::default()).await;
        assert!(matches!(result, Err(CompressError::ToolMissing(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_success_returns_stdout() {
        let dir = TempDir::new().unwrap();
        let tool = fake_tool(&dir, "minify", "cat");
        let spec = ToolSpec::stylesheet(tool, Charset::default());

        let out = spec.run("body { color: red; }", Charset::default()).await.unwrap();
        assert_eq!(out, "body { color: red; }");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_carries_stderr() {
        let dir = TempDir::new().unwrap();
        let tool = fake_tool(&dir, "minify", "echo 'parse error at line 3' >&2; exit 1");
        let spec = ToolSpec::stylesheet(tool, Charset::default());

        let result = spec.run("body {", Charset::default()).await;
        match result {
            Err(CompressError::ToolFailed { stderr }) => {
                assert!(stderr.contains("parse error at line 3"));
            }
            other => panic!("expected ToolFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_escape_unicode_applies_both_ways() {
        let dir = TempDir::new().unwrap();
        let tool = fake_tool(&dir, "compile", "cat");
        let spec = ToolSpec::javascript(tool, Charset::default());

        // Input is escaped before the pipe; the echoed output is already
        // ASCII, so the outbound escape is the identity.
        let out = spec.run("var s = 'héllo';", Charset::default()).await.unwrap();
        assert_eq!(out, "var s = 'h\\u00e9llo';");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_no_deadlock_when_tool_writes_before_reading() {
        let dir = TempDir::new().unwrap();
        // Writes 256 KB of output before touching stdin: with serialized
        // write-then-read piping this wedges once both pipe buffers fill.
        let tool = fake_tool(
            &dir,
            "buffery",
            "head -c 262144 /dev/zero | tr '\\0' 'x'; cat >/dev/null",
        );
        let spec = ToolSpec::stylesheet(tool, Charset::default());

        let input = "a".repeat(256 * 1024);
        let out = tokio::time::timeout(
            std::time::Duration::from_secs(30),
            spec.run(&input, Charset::default()),
        )
        .await
        .expect("pipeline deadlocked")
        .unwrap();
        assert_eq!(out.len(), 262144);
        assert!(out.bytes().all(|b| b == b'x'));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_tool_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("aux.txt"), "resource").unwrap();
        let tool = fake_tool(&dir, "needs-resource", "cat aux.txt");
        let spec = ToolSpec::stylesheet(tool, Charset::default());

        let out = spec.run("", Charset::default()).await.unwrap();
        assert_eq!(out, "resource");
    }
}
