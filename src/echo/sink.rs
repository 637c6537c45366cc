//! Destinations for rendered echo records.
//!
//! A sink receives one complete block per request and must write it as a
//! single unit, so records from concurrent requests never interleave.

use std::io::{self, Write};
use std::sync::Mutex;

/// Output stream for rendered records.
pub trait EchoSink: Send + Sync {
    /// Write one rendered block atomically.
    fn write_block(&self, block: &str) -> io::Result<()>;
}

/// Writes records to the process standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl EchoSink for StdoutSink {
    fn write_block(&self, block: &str) -> io::Result<()> {
        // The lock is held for the whole block; other writers wait on it.
        let mut out = io::stdout().lock();
        out.write_all(block.as_bytes())?;
        out.flush()
    }
}

/// Writes records to any `Write` implementation behind a mutex.
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send + Clone> WriterSink<W> {
    /// Copy of the writer's current state.
    pub fn snapshot(&self) -> W {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl<W: Write + Send> EchoSink for WriterSink<W> {
    fn write_block(&self, block: &str) -> io::Result<()> {
        let mut writer = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        writer.write_all(block.as_bytes())?;
        writer.flush()
    }
}

/// Keeps records in memory. Useful when embedding the server.
#[derive(Debug, Default)]
pub struct MemorySink {
    blocks: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every block written so far.
    pub fn blocks(&self) -> Vec<String> {
        self.blocks.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.blocks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EchoSink for MemorySink {
    fn write_block(&self, block: &str) -> io::Result<()> {
        self.blocks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(block.to_string());
        Ok(())
    }
}
