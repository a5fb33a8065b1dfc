use crate::connection::Connection;
use crate::parser::StatusLine;
use crate::{Error, Headers, Result};

/// A response being received.
///
/// Status line and headers are read by [`Http::sync`][crate::Http::sync].
/// The body is pulled on demand with [`Response::fetch`] and
/// [`Response::fetch_until`], both of which add to the accumulated
/// [`Response::body`].
///
/// The response borrows the connection of the request that produced it.
/// Use [`Response::into_parts`] to keep the received data after releasing
/// that borrow.
#[derive(Debug)]
pub struct Response<'a> {
    protocol: String,
    version: f64,
    status_code: i32,
    status_message: String,
    headers: Headers,
    body: Vec<u8>,
    connection: &'a mut Connection,
}

/// The received parts of a [`Response`], detached from its connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseParts {
    pub protocol: String,
    pub version: f64,
    pub status_code: i32,
    pub status_message: String,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl<'a> Response<'a> {
    pub(crate) fn new(status: StatusLine, connection: &'a mut Connection) -> Self {
        Response {
            protocol: status.protocol,
            version: status.version,
            status_code: status.status_code,
            status_message: status.status_message,
            headers: Headers::new(),
            body: Vec::new(),
            connection,
        }
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn version(&self) -> f64 {
        self.version
    }

    pub fn status_code(&self) -> i32 {
        self.status_code
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Everything fetched so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The `Content-Length` header, if present and a number.
    pub fn content_length(&self) -> Option<usize> {
        self.headers
            .get_ignore_case("content-length")?
            .trim()
            .parse()
            .ok()
    }

    /// Bytes read off the connection but not yet fetched.
    pub fn buffered(&self) -> usize {
        self.connection.buffered()
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut *self.connection
    }

    pub(crate) fn add_header(&mut self, name: String, value: String) {
        self.headers.add(name, value);
    }

    /// Fetch exactly `length` body bytes.
    ///
    /// Buffered bytes are used first, and only the shortfall is read from
    /// the connection. If the peer ends the stream early, the result is
    /// shorter than `length`; that is not an error.
    ///
    /// Returns the bytes of this call only.
    pub fn fetch(&mut self, length: usize) -> Result<Vec<u8>> {
        let buffered = self.connection.buffered();

        if length > buffered {
            let shortfall = length - buffered;

            let read = self
                .connection
                .read_at_least(shortfall)
                .map_err(Error::receive)?;

            if read < shortfall {
                debug!("Short body fetch, wanted {} got {}", length, buffered + read);
            }
        }

        let data = self.connection.take(length);
        trace!("Fetched {} body bytes", data.len());

        self.body.extend_from_slice(&data);

        Ok(data)
    }

    /// Fetch body bytes up to and including the first `delimiter`.
    ///
    /// End-of-data before the delimiter is an error, and leaves whatever
    /// was read buffered.
    ///
    /// Returns the bytes of this call only.
    pub fn fetch_until(&mut self, delimiter: impl AsRef<[u8]>) -> Result<Vec<u8>> {
        let len = self
            .connection
            .read_until(delimiter.as_ref())
            .map_err(Error::receive)?;

        let data = self.connection.take(len);
        trace!("Fetched {} body bytes", data.len());

        self.body.extend_from_slice(&data);

        Ok(data)
    }

    /// Detach the received data from the connection.
    ///
    /// Unfetched bytes stay with the connection, which stays open until the
    /// request starts another exchange or is dropped.
    pub fn into_parts(self) -> ResponseParts {
        ResponseParts {
            protocol: self.protocol,
            version: self.version,
            status_code: self.status_code,
            status_message: self.status_message,
            headers: self.headers,
            body: self.body,
        }
    }
}
