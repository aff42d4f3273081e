use std::sync::Arc;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::files::FileServer;
use crate::http::parser::{ParseError, parse_request};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

/// Deadline for each read off the socket. A client that stalls mid-request
/// cannot hold the connection open indefinitely.
const READ_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    state: ConnectionState,
    routes: Arc<Vec<FileServer>>,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

enum ReadError {
    /// The bytes never became a valid HTTP/1.1 request.
    Protocol(ParseError),
    /// The peer went silent past the read deadline.
    TimedOut,
    Io(std::io::Error),
}

impl Connection {
    pub fn new(stream: TcpStream, routes: Arc<Vec<FileServer>>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            routes,
        }
    }

    /// Drives the connection through its state machine: read exactly one
    /// request, produce exactly one response, close.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(Some(req)) => ConnectionState::Processing(req),

                        // Peer closed cleanly before sending anything
                        Ok(None) => ConnectionState::Closed,

                        Err(ReadError::Protocol(e)) => {
                            tracing::warn!("Rejecting request: {:?}", e);
                            let rejection = Response::protocol_rejection();
                            ConnectionState::Writing(ResponseWriter::new(&rejection))
                        }

                        Err(ReadError::TimedOut) => {
                            tracing::warn!("Read timed out before a full request arrived");
                            ConnectionState::Closed
                        }

                        Err(ReadError::Io(e)) => return Err(e.into()),
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = Self::route(&self.routes, &req).await;

                    tracing::info!(
                        method = ?req.method,
                        target = %req.target,
                        status = response.status.as_u16(),
                        "Handled request"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // One request per connection, then close
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Offers the request to each registered file server in order; the
    /// first to claim it wins. No claim means no such route.
    async fn route(routes: &[FileServer], req: &Request) -> Response {
        for server in routes.iter() {
            if let Some(response) = server.handle(req).await {
                return response;
            }
        }

        Response::err_json(StatusCode::NotFound, "No matching route")
    }

    async fn read_request(&mut self) -> Result<Option<Request>, ReadError> {
        loop {
            // Try parsing whatever we already have
            match parse_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Some(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    return Err(ReadError::Protocol(e));
                }
            }

            // Read more data, bounded by the deadline
            let mut temp = [0u8; 1024];
            let n = match timeout(READ_TIMEOUT, self.stream.read(&mut temp)).await {
                Ok(Ok(n)) => n,
                Ok(Err(e)) => return Err(ReadError::Io(e)),
                Err(_) => return Err(ReadError::TimedOut),
            };

            if n == 0 {
                if self.buffer.is_empty() {
                    // Client closed without sending a request
                    return Ok(None);
                }

                // Stream ended mid-request: framing failure
                return Err(ReadError::Protocol(ParseError::Incomplete));
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }
}
