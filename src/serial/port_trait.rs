//! Trait abstraction for the line-oriented output sink to enable testing

use async_trait::async_trait;
use std::io;

/// Trait for the one-value-per-line text sink
///
/// Implementations append exactly one newline-terminated line per call.
#[async_trait]
pub trait LineSink: Send {
    /// Write one value line to the sink
    async fn write_line(&mut self, value: &str) -> io::Result<()>;
}

/// Sink that prints value lines to standard output
///
/// Fallback transport when no serial device is present, and a convenient way
/// to watch the value stream during development.
#[derive(Debug, Default)]
pub struct StdoutSink;

#[async_trait]
impl LineSink for StdoutSink {
    async fn write_line(&mut self, value: &str) -> io::Result<()> {
        use tokio::io::AsyncWriteExt;
        let mut stdout = tokio::io::stdout();
        stdout.write_all(value.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await
    }
}


#[cfg(test)]
mod tests {
    use super::mocks::MockLineSink;
    use super::*;

    #[tokio::test]
    async fn test_mock_sink_records_lines() {
        let mut sink = MockLineSink::new();
        sink.write_line("512").await.unwrap();
        sink.write_line("0.0050").await.unwrap();

        assert_eq!(sink.written_lines(), vec!["512", "0.0050"]);
    }

    #[tokio::test]
    async fn test_mock_sink_injected_error() {
        let mut sink = MockLineSink::new();
        sink.set_write_error(io::ErrorKind::BrokenPipe);

        let err = sink.write_line("1").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(sink.written_lines().is_empty());
    }
}
