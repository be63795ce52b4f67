use crate::tools::metadata::{FileMetadata, MetadataSource};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

const READY_MARKER: &str = "{ready}";

/// A persistent `exiftool -stay_open` child process.
///
/// Commands are streamed through stdin and each response is read from stdout
/// up to the `{ready}` marker, so one child serves any number of files.
pub struct Exiftool {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl Exiftool {
    /// Spawns the exiftool child. `binary` overrides the program looked up on
    /// `PATH`.
    pub fn new(binary: Option<&Path>) -> Result<Self> {
        let program = binary.map_or_else(|| PathBuf::from("exiftool"), Path::to_path_buf);
        let mut child = Command::new(&program)
            .args(["-stay_open", "True", "-@", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to start exiftool ({})", program.display()))?;

        let stdin = child.stdin.take().context("exiftool stdin unavailable")?;
        let stdout = child
            .stdout
            .take()
            .map(BufReader::new)
            .context("exiftool stdout unavailable")?;

        Ok(Self {
            child,
            stdin,
            stdout,
        })
    }

    fn read_response(&mut self) -> Result<String> {
        let mut response = String::new();
        loop {
            let mut line = String::new();
            let read = self
                .stdout
                .read_line(&mut line)
                .context("failed to read from exiftool")?;
            if read == 0 {
                bail!("exiftool terminated unexpectedly");
            }
            if line.trim_end() == READY_MARKER {
                return Ok(response);
            }
            response.push_str(&line);
        }
    }
}

impl MetadataSource for Exiftool {
    fn extract(&mut self, path: &Path) -> Result<FileMetadata> {
        write!(self.stdin, "-j\n{}\n-execute\n", path.display())
            .and_then(|()| self.stdin.flush())
            .context("failed to write to exiftool")?;

        let response = self.read_response()?;
        let parsed: Value = serde_json::from_str(&response)
            .with_context(|| format!("unparsable exiftool output for {}", path.display()))?;
        let object = parsed
            .as_array()
            .and_then(|entries| entries.first())
            .and_then(Value::as_object)
            .with_context(|| format!("no exiftool result for {}", path.display()))?;

        let mut metadata = FileMetadata::new();
        for (field, value) in object {
            // arrays and nested objects never carry a capture date
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            metadata.insert(field.clone(), text);
        }
        Ok(metadata)
    }
}

impl Drop for Exiftool {
    fn drop(&mut self) {
        let _ = write!(self.stdin, "-stay_open\nFalse\n");
        let _ = self.stdin.flush();
        let _ = self.child.wait();
    }
}
