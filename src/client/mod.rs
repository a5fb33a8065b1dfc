//! Blocking HTTP/1.x client exchange
//!
//! An exchange runs strictly in sequence over one fresh connection:
//!
//! 1. Resolve the request host and connect, closing any earlier connection
//!    of the same request.
//! 2. Serialize the request and write it.
//! 3. Read the status line and the header block.
//! 4. Let the caller pull the body with [`Response::fetch`] or
//!    [`Response::fetch_until`], as many times as the framing requires.
//!
//! Steps 1-3 are [`Http::sync`].

use std::io;

use crate::connection::Connection;
use crate::parser::{is_header_end, parse_header_line, parse_status_line};
use crate::transport::{Connector, TcpConnector};
use crate::util::CRLF;
use crate::{Config, Error, Request, Response, Result};

#[cfg(test)]
pub(crate) mod test;

/// Runs request/response exchanges.
#[derive(Debug, Default)]
pub struct Http<C = TcpConnector> {
    connector: C,
    config: Config,
}

impl Http<TcpConnector> {
    /// Plain TCP, no timeouts.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Connector> Http<C> {
    pub fn with_connector(connector: C) -> Self {
        Http {
            connector,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send `request` over a new connection and read the response head.
    ///
    /// Any connection left from a previous exchange of `request` is closed
    /// first. Bytes that arrive after the header block stay buffered and are
    /// the start of the body.
    ///
    /// End-of-data in the header block ends it without error. A response can
    /// legitimately be just a status line.
    ///
    /// ```no_run
    /// use hootsync::{Http, Request};
    ///
    /// let mut request = Request::new("example.com", 80);
    /// request.add_header("Host", "example.com");
    ///
    /// let mut response = Http::new().sync(&mut request)?;
    /// assert_eq!(response.status_code(), 200);
    ///
    /// if let Some(len) = response.content_length() {
    ///     let body = response.fetch(len)?;
    ///     println!("{}", String::from_utf8_lossy(&body));
    /// }
    /// # Ok::<_, hootsync::Error>(())
    /// ```
    pub fn sync<'a>(&self, request: &'a mut Request) -> Result<Response<'a>> {
        let connection = Connection::establish(
            &mut request.connection,
            &self.connector,
            &request.host,
            request.port,
            &self.config,
        )?;

        let data = request.to_bytes();
        trace!(
            "Send request: {} {} {}/{}",
            request.method,
            request.path,
            request.protocol,
            request.version
        );

        let connection = request.connection.insert(connection);
        connection.write_all(&data)?;

        recv_response(connection)
    }
}

fn recv_response(connection: &mut Connection) -> Result<Response<'_>> {
    let len = connection.read_until(CRLF).map_err(Error::receive)?;
    let line = connection.take(len);

    let status = parse_status_line(&line)?;
    trace!(
        "Status line: {}/{} {} {}",
        status.protocol,
        status.version,
        status.status_code,
        status.status_message
    );

    let mut response = Response::new(status, connection);

    loop {
        let len = match response.connection_mut().read_until(CRLF) {
            Ok(v) => v,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("End of data in response headers");
                break;
            }
            Err(e) => return Err(Error::receive(e)),
        };

        let line = response.connection_mut().take(len);

        if is_header_end(&line) {
            break;
        }

        // Lines framed by CRLF may still hold bare LF separated headers.
        for piece in line.split(|c| *c == b'\n') {
            if piece.is_empty() || piece == b"\r" {
                continue;
            }

            let (name, value) = parse_header_line(piece)?;
            trace!("Header {}: {}", name, value);

            response.add_header(name, value);
        }
    }

    trace!(
        "Response headers: {}, buffered body bytes: {}",
        response.headers().len(),
        response.buffered()
    );

    Ok(response)
}
