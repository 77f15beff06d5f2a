#![deny(warnings)]

// STDIN/STDOUT message transport

use crate::error::{Result, TransportError};
use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
    Stdin, Stdout,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Framing {
    /// Detect framing based on the first successfully read message.
    Auto,
    /// Newline-delimited JSON messages (what MCP stdio clients send).
    Newline,
    /// JSON-RPC/LSP style framing: `Content-Length: N\r\n\r\n<json bytes>`
    ContentLength,
}

/// Largest Content-Length body accepted from the peer
pub const MAX_MESSAGE_BYTES: usize = 16 * 1024 * 1024;

fn trim_crlf(s: &str) -> &str {
    s.trim_end_matches(&['\r', '\n'][..])
}

fn parse_content_length_header(line: &str) -> Option<usize> {
    let line = trim_crlf(line).trim();
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}

/// Message transport over a byte stream pair, stdin/stdout by default
pub struct StdioTransport<R = BufReader<Stdin>, W = Stdout> {
    reader: R,
    writer: W,
    framing: Framing,
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl StdioTransport {
    /// Create a transport bound to the process's stdin and stdout
    pub fn new() -> Self {
        Self::with_io(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a transport over an arbitrary reader/writer pair
    pub fn with_io(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            framing: Framing::Auto,
        }
    }

    /// Give back the underlying reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Read one JSON-RPC message.
    ///
    /// Supports both:
    /// - Newline-delimited JSON
    /// - `Content-Length: N\r\n\r\n...` framing
    ///
    /// The framing of the first message is kept for the rest of the session.
    pub async fn read_message(&mut self) -> Result<String> {
        match self.framing {
            Framing::Auto => self.read_message_auto().await,
            Framing::Newline => self.read_message_newline().await,
            Framing::ContentLength => self.read_message_content_length().await,
        }
    }

    /// Write one JSON-RPC message, using the detected framing mode.
    pub async fn write_message(&mut self, message: &str) -> Result<()> {
        match self.framing {
            Framing::ContentLength => {
                let header = format!("Content-Length: {}\r\n\r\n", message.len());
                self.write_all(header.as_bytes()).await?;
                self.write_all(message.as_bytes()).await?;
            }
            Framing::Auto | Framing::Newline => {
                self.write_all(message.as_bytes()).await?;
                self.write_all(b"\n").await?;
            }
        }
        self.writer.flush().await.map_err(TransportError::Io)?;
        Ok(())
    }

    async fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer
            .write_all(bytes)
            .await
            .map_err(TransportError::Io)?;
        Ok(())
    }

    /// Read one raw line; EOF is reported as a closed connection.
    ///
    /// The whole line is consumed even when it is not valid UTF-8, so the
    /// next read starts on the following line.
    async fn read_line(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        let n = self
            .reader
            .read_until(b'\n', &mut bytes)
            .await
            .map_err(TransportError::Io)?;
        if n == 0 {
            return Err(TransportError::ConnectionClosed.into());
        }
        let line = String::from_utf8(bytes).map_err(|e| {
            TransportError::InvalidMessage(format!("Invalid UTF-8 in JSON-RPC message: {}", e))
        })?;
        Ok(line)
    }

    async fn read_message_newline(&mut self) -> Result<String> {
        let line = self.read_line().await?;
        Ok(trim_crlf(&line).to_string())
    }

    async fn read_message_auto(&mut self) -> Result<String> {
        loop {
            let line = self.read_line().await?;
            let line = trim_crlf(&line);
            if line.trim().is_empty() {
                continue;
            }

            if parse_content_length_header(line).is_some() {
                debug!("using Content-Length framing");
                self.framing = Framing::ContentLength;
                return self.read_message_content_length_with_first_line(line).await;
            }

            debug!("using newline-delimited framing");
            self.framing = Framing::Newline;
            return Ok(line.to_string());
        }
    }

    async fn read_message_content_length(&mut self) -> Result<String> {
        let first = self.read_line().await?;
        self.read_message_content_length_with_first_line(trim_crlf(&first))
            .await
    }

    async fn read_message_content_length_with_first_line(&mut self, first: &str) -> Result<String> {
        let content_length = parse_content_length_header(first).ok_or_else(|| {
            TransportError::InvalidMessage(format!("Expected Content-Length header, got: {}", first))
        })?;

        // Skip any remaining headers up to the blank separator line.
        loop {
            let header_line = self.read_line().await?;
            if trim_crlf(&header_line).is_empty() {
                break;
            }
        }

        if content_length > MAX_MESSAGE_BYTES {
            // Drain the body without buffering it so the next frame stays aligned.
            io::copy(&mut (&mut self.reader).take(content_length as u64), &mut io::sink())
                .await
                .map_err(TransportError::Io)?;
            return Err(TransportError::InvalidMessage(format!(
                "Content-Length {} exceeds limit of {} bytes",
                content_length, MAX_MESSAGE_BYTES
            ))
            .into());
        }

        let mut buf = Vec::new();
        (&mut self.reader)
            .take(content_length as u64)
            .read_to_end(&mut buf)
            .await
            .map_err(TransportError::Io)?;
        if buf.len() < content_length {
            return Err(TransportError::ConnectionClosed.into());
        }

        let message = String::from_utf8(buf).map_err(|e| {
            TransportError::InvalidMessage(format!("Invalid UTF-8 in JSON-RPC message: {}", e))
        })?;
        Ok(message)
    }
}
