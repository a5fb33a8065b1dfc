//! The blocking I/O seam.
//!
//! Everything that touches the network goes through [`Connector`] and
//! [`Transport`]. Parsing and buffering only ever see `io::Read` and
//! `io::Write`, which means a different transport (or a test double) can be
//! plugged in without touching the wire grammar.

use std::io;
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// A connected, blocking byte stream.
pub trait Transport: io::Read + io::Write + Send {
    /// Deadline for each individual read. `None` blocks indefinitely.
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()>;

    /// Deadline for each individual write. `None` blocks indefinitely.
    fn set_write_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()>;

    /// Close both directions of the stream.
    fn shutdown(&mut self) -> io::Result<()>;
}

/// Resolves hosts and opens [`Transport`]s to them.
pub trait Connector {
    /// Resolve `host`/`port` to candidate endpoints, in the order they should
    /// be tried.
    fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>>;

    /// Open a stream to a single endpoint.
    fn connect(
        &self,
        addr: SocketAddr,
        timeout: Option<Duration>,
    ) -> io::Result<Box<dyn Transport>>;
}

impl<C: Connector + ?Sized> Connector for &C {
    fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
        (**self).resolve(host, port)
    }

    fn connect(
        &self,
        addr: SocketAddr,
        timeout: Option<Duration>,
    ) -> io::Result<Box<dyn Transport>> {
        (**self).connect(addr, timeout)
    }
}

impl Transport for TcpStream {
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_read_timeout(self, timeout)
    }

    fn set_write_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_write_timeout(self, timeout)
    }

    fn shutdown(&mut self) -> io::Result<()> {
        TcpStream::shutdown(self, Shutdown::Both)
    }
}

/// Plain TCP using the system resolver.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
        Ok((host, port).to_socket_addrs()?.collect())
    }

    fn connect(
        &self,
        addr: SocketAddr,
        timeout: Option<Duration>,
    ) -> io::Result<Box<dyn Transport>> {
        let stream = match timeout {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout)?,
            None => TcpStream::connect(addr)?,
        };
        Ok(Box::new(stream))
    }
}
