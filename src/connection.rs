use std::fmt;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use crate::buffer::StreamBuffer;
use crate::transport::{Connector, Transport};
use crate::util::find_subslice;
use crate::{Config, Error, Result};

/// One open stream plus the bytes read from it but not yet consumed.
pub(crate) struct Connection {
    stream: Box<dyn Transport>,
    buffer: StreamBuffer,
    addr: SocketAddr,
    read_timeout: Option<Duration>,
}

impl Connection {
    /// Open a new connection to `host`/`port`.
    ///
    /// Whatever is in `previous` is closed first, buffered bytes included.
    /// The resolved endpoints are tried in order and the first one that
    /// accepts wins.
    pub fn establish<C: Connector + ?Sized>(
        previous: &mut Option<Connection>,
        connector: &C,
        host: &str,
        port: u16,
        config: &Config,
    ) -> Result<Connection> {
        if let Some(previous) = previous.take() {
            previous.close();
        }

        let connection_error = |source: io::Error| Error::Connection {
            host: host.to_string(),
            port,
            source,
        };

        let addrs = connector.resolve(host, port).map_err(connection_error)?;
        debug!("Resolved {}:{} to {:?}", host, port, addrs);

        let mut last_error = io::Error::new(
            io::ErrorKind::NotFound,
            "host resolved to no endpoints",
        );

        for addr in addrs {
            match connect_one(connector, addr, config) {
                Ok(stream) => {
                    debug!("Connected to {}", addr);
                    return Ok(Connection {
                        stream,
                        buffer: StreamBuffer::new(),
                        addr,
                        read_timeout: config.read_timeout,
                    });
                }
                Err(e) => {
                    debug!("Connect to {} failed: {}", addr, e);
                    last_error = e;
                }
            }
        }

        Err(connection_error(last_error))
    }

    pub fn close(mut self) {
        debug!("Close connection to {}", self.addr);
        if let Err(e) = self.stream.shutdown() {
            // The peer might have closed already.
            trace!("Shutdown of {} failed: {}", self.addr, e);
        }
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        trace!("Write {} bytes to {}", bytes.len(), self.addr);
        self.stream.write_all(bytes).map_err(Error::transmit)?;
        self.stream.flush().map_err(Error::transmit)?;
        Ok(())
    }

    /// Read until `delimiter` is buffered.
    ///
    /// Returns the number of buffered bytes up to and including the first
    /// occurrence of `delimiter`. Already buffered bytes are searched before
    /// any read. End-of-data before the delimiter is `UnexpectedEof`. An
    /// empty delimiter matches immediately.
    ///
    /// The read timeout bounds the whole call.
    pub fn read_until(&mut self, delimiter: &[u8]) -> io::Result<usize> {
        if delimiter.is_empty() {
            return Ok(0);
        }

        let deadline = self.deadline();
        let mut searched = 0;

        loop {
            let buf = self.buffer.as_slice();

            if let Some(i) = find_subslice(&buf[searched..], delimiter) {
                return Ok(searched + i + delimiter.len());
            }

            // A delimiter can straddle what we have and the next read.
            searched = buf.len().saturating_sub(delimiter.len() - 1);

            if self.fill(deadline)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "end of data before delimiter",
                ));
            }
        }
    }

    /// Read until at least `amount` new bytes are buffered.
    ///
    /// Stops early on end-of-data, which is not an error. Returns the number
    /// of bytes read, which can be more than `amount`.
    ///
    /// The read timeout bounds the whole call.
    pub fn read_at_least(&mut self, amount: usize) -> io::Result<usize> {
        let deadline = self.deadline();
        let mut read = 0;

        while read < amount {
            let n = self.fill(deadline)?;
            if n == 0 {
                trace!("End of data after {} of {} bytes", read, amount);
                break;
            }
            read += n;
        }

        Ok(read)
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn take(&mut self, amount: usize) -> Vec<u8> {
        self.buffer.take(amount)
    }

    fn deadline(&self) -> Option<Instant> {
        self.read_timeout.map(|t| Instant::now() + t)
    }

    /// One read, cut short so it cannot outlast `deadline`.
    fn fill(&mut self, deadline: Option<Instant>) -> io::Result<usize> {
        if let Some(deadline) = deadline {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "read deadline passed",
                ));
            }
            self.stream.set_read_timeout(Some(remaining))?;
        }

        let n = self.buffer.fill_from(&mut *self.stream)?;
        trace!("Read {} bytes from {}", n, self.addr);
        Ok(n)
    }
}

fn connect_one<C: Connector + ?Sized>(
    connector: &C,
    addr: SocketAddr,
    config: &Config,
) -> io::Result<Box<dyn Transport>> {
    debug!("Connect to {}", addr);
    let mut stream = connector.connect(addr, config.connect_timeout)?;
    stream.set_read_timeout(config.read_timeout)?;
    stream.set_write_timeout(config.write_timeout)?;
    Ok(stream)
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("addr", &self.addr)
            .field("read_timeout", &self.read_timeout)
            .field("buffer", &self.buffer)
            .finish()
    }
}
