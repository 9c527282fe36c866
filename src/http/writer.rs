use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response, reason_phrase_for};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Status line, headers and the blank separator line.
pub fn serialize_head(resp: &Response) -> Bytes {
    let mut buf = BytesMut::with_capacity(128);

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status,
        reason_phrase_for(resp.status)
    );
    buf.put_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }

    // Header/body separator
    buf.put_slice(b"\r\n");

    buf.freeze()
}

/// Writes one response to a stream, head first, then the body.
///
/// File bodies are copied in chunks rather than read into memory. The file
/// handle is owned by the writer and closed when it is dropped.
pub struct ResponseWriter {
    status: u16,
    head: Bytes,
    body: Body,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            status: response.status,
            head: serialize_head(&response),
            body: response.body,
            written: 0,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether any byte of this response has reached the stream.
    pub fn has_started(&self) -> bool {
        self.written > 0
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.head.len() {
            let n = stream.write(&self.head[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        match &mut self.body {
            Body::Bytes(bytes) => stream.write_all(&bytes[..]).await?,
            Body::File(file) => {
                tokio::io::copy(file, stream).await?;
            }
        }

        stream.flush().await?;
        Ok(())
    }
}
