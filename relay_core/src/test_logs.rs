//! Captures formatted log output for assertions in unit tests.

use std::{io, sync::Arc};

use parking_lot::Mutex;
use tracing::{subscriber::DefaultGuard, Level};

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn lines_at(&self, level: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains(level))
            .count()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Routes DEBUG and above on the current thread into the returned buffer until the guard drops.
pub fn capture() -> (DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    (tracing::subscriber::set_default(subscriber), buffer)
}
