use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// Destination for rendered directive lines.
///
/// `write_line` receives a line without its terminator and must append `\n`
/// and flush before returning, since log consumers parse output incrementally.
pub trait CommandSink: Send + Sync {
    fn write_line(&self, line: &str) -> Result<()>;
}

impl<S: CommandSink + ?Sized> CommandSink for &S {
    fn write_line(&self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }
}

impl<S: CommandSink + ?Sized> CommandSink for Box<S> {
    fn write_line(&self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }
}

impl<S: CommandSink + ?Sized> CommandSink for Arc<S> {
    fn write_line(&self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl CommandSink for StdoutSink {
    fn write_line(&self, line: &str) -> Result<()> {
        // Holding the lock keeps the line and its terminator together.
        let mut out = std::io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn take(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|mut l| std::mem::take(&mut *l))
            .unwrap_or_default()
    }

    /// Everything written so far, as it would have appeared on the stream.
    pub fn contents(&self) -> String {
        self.lines()
            .into_iter()
            .map(|l| l + "\n")
            .collect::<String>()
    }
}

impl CommandSink for MemorySink {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|_| Error::msg("memory sink lock poisoned"))?;
        lines.push(line.to_string());
        Ok(())
    }
}

/// Writes to any `Write` implementation, e.g. a file or a pipe.
#[derive(Debug)]
pub struct WriterSink<W: Write + Send> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|_| Error::msg("writer sink lock poisoned"))
    }
}

impl<W: Write + Send> CommandSink for WriterSink<W> {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut w = self
            .inner
            .lock()
            .map_err(|_| Error::msg("writer sink lock poisoned"))?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    }
}
