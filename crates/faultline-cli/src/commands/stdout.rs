//! Transport that prints reports as JSON lines

use async_trait::async_trait;
use faultline_client::{Report, Transport, TransportError};
use std::io::Write;
use std::sync::Mutex;

/// Writes each report as one JSON line
pub struct WriterTransport<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterTransport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

#[async_trait]
impl<W: Write + Send> Transport for WriterTransport<W> {
    async fn deliver(&self, report: &Report) -> Result<(), TransportError> {
        let line = serde_json::to_string(report)?;
        let mut writer = self.writer.lock().map_err(|_| TransportError::Unavailable {
            message: "output writer poisoned".to_string(),
        })?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}
