use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::ServeError;
use crate::files::{TargetKind, resolve};
use crate::http::parser::{MAX_REQUEST_LINE, ParseError, find_line_end, parse_request_line, trim_line};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::site::Site;

/// Serves exactly one request on a stream, then closes it.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    site: Arc<Site>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, site: Arc<Site>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(1024),
            site,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the connection to completion.
    ///
    /// Request failures become error responses; an `Err` here means the
    /// response itself could not be delivered.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(req) => ConnectionState::Processing(req),
                        Err(e) => {
                            tracing::debug!(error = %e, "Unreadable request line");
                            ConnectionState::Writing(self.error_writer(&e))
                        }
                    };
                }

                ConnectionState::Processing(req) => {
                    let method = req.method.clone();
                    let path = req.path.clone();

                    let response = match isolate(process(req, Arc::clone(&self.site))).await {
                        Ok(response) => response,
                        Err(e) => {
                            tracing::debug!(method = %method, path = %path, error = %e, "Request failed");
                            Response::error(e.status().as_u16(), self.site.server_name())
                        }
                    };

                    tracing::info!(method = %method, path = %path, status = response.status, "Request served");
                    self.state = ConnectionState::Writing(ResponseWriter::new(response));
                }

                ConnectionState::Writing(mut writer) => {
                    match writer.write_to_stream(&mut self.stream).await {
                        Ok(()) => {}
                        Err(e)
                            if !writer.has_started()
                                && writer.status() != StatusCode::InternalServerError.as_u16() =>
                        {
                            tracing::warn!(error = %e, "Response failed before any byte was sent");
                            let fault = ServeError::InternalFault(e.to_string());
                            self.state = ConnectionState::Writing(self.error_writer(&fault));
                        }
                        Err(e) => return Err(e),
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(error = %e, "Shutdown after response failed");
        }

        Ok(())
    }

    /// Reads up to the first `\n`. A partial line at end of stream still counts.
    pub async fn read_request(&mut self) -> Result<Request, ServeError> {
        loop {
            if let Some(end) = find_line_end(&self.buffer) {
                let line = self.buffer.split_to(end + 1);
                return Ok(parse_request_line(trim_line(&line[..end]))?);
            }

            // Allow for the trailing "\r"
            if self.buffer.len() > MAX_REQUEST_LINE + 1 {
                return Err(ParseError::LineTooLong.into());
            }

            let n = self
                .stream
                .read_buf(&mut self.buffer)
                .await
                .map_err(|e| ServeError::MalformedRequest(e.to_string()))?;

            if n == 0 {
                // Client closed the connection
                let line = self.buffer.split();
                return Ok(parse_request_line(trim_line(&line))?);
            }
        }
    }

    fn error_writer(&self, err: &ServeError) -> ResponseWriter {
        ResponseWriter::new(Response::error(
            err.status().as_u16(),
            self.site.server_name(),
        ))
    }
}

/// Runs `work` in its own task so a panic inside it becomes an `InternalFault`.
pub async fn isolate<F>(work: F) -> Result<Response, ServeError>
where
    F: Future<Output = Result<Response, ServeError>> + Send + 'static,
{
    match tokio::spawn(work).await {
        Ok(outcome) => outcome,
        Err(join_err) => {
            tracing::error!(error = %join_err, "Request processing aborted");
            Err(ServeError::InternalFault(join_err.to_string()))
        }
    }
}

/// Dispatch on the method, resolve the path and build the matching response.
pub async fn process(req: Request, site: Arc<Site>) -> Result<Response, ServeError> {
    if !req.method.is_retrieval() {
        return Err(ServeError::MethodNotSupported(req.method.to_string()));
    }

    let target = resolve(&site, &req.path).await?;
    let response = match target.kind {
        TargetKind::File(file) => Response::file(&target.path, file, site.server_name()),
        TargetKind::Directory(entries) => {
            Response::directory(&target.request_path, &entries, site.server_name())
        }
    };

    Ok(response)
}
