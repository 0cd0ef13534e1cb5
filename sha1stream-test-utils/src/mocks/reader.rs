//! Readers that misbehave in controlled ways

use std::io::{self, Read};

/// Hands out at most `max_read` bytes per call, optionally interrupting
/// every other call
#[derive(Debug, Clone)]
pub struct TrickleReader {
    data: Vec<u8>,
    position: usize,
    max_read: usize,
    interrupt: bool,
    interrupt_next: bool,
    reads: usize,
}

impl TrickleReader {
    pub fn new(data: impl Into<Vec<u8>>, max_read: usize) -> Self {
        assert!(max_read > 0, "max_read must be positive");
        Self {
            data: data.into(),
            position: 0,
            max_read,
            interrupt: false,
            interrupt_next: false,
            reads: 0,
        }
    }

    /// Return `ErrorKind::Interrupted` before every successful read
    pub fn with_interrupts(mut self) -> Self {
        self.interrupt = true;
        self.interrupt_next = true;
        self
    }

    /// Successful read calls so far, including the final 0-byte one
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Read for TrickleReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt && self.interrupt_next {
            self.interrupt_next = false;
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        self.interrupt_next = true;
        self.reads += 1;

        let remaining = &self.data[self.position..];
        let len = remaining.len().min(self.max_read).min(buf.len());
        buf[..len].copy_from_slice(&remaining[..len]);
        self.position += len;
        Ok(len)
    }
}

/// Yields `good` bytes, then fails with the given message
#[derive(Debug, Clone)]
pub struct FailingReader {
    good: Vec<u8>,
    position: usize,
    message: String,
}

impl FailingReader {
    pub fn new(good: impl Into<Vec<u8>>, message: &str) -> Self {
        Self {
            good: good.into(),
            position: 0,
            message: message.to_string(),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.good[self.position..];
        if remaining.is_empty() {
            return Err(io::Error::other(self.message.clone()));
        }
        let len = remaining.len().min(buf.len());
        buf[..len].copy_from_slice(&remaining[..len]);
        self.position += len;
        Ok(len)
    }
}
