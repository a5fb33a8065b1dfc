use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::transport::{Connector, Transport};




/// What the code under test did to a [`ScriptedStream`].
#[derive(Debug, Default)]
pub struct Seen {
    pub written: Vec<u8>,
    pub shutdown: bool,
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

pub type SeenHandle = Arc<Mutex<Seen>>;

/// In-memory transport handing out pre-scripted reads.
///
/// Each read returns (at most) the next scripted chunk, so the chunk
/// boundaries decide how the data trickles in. An empty script reads as
/// end-of-data.
pub struct ScriptedStream {
    reads: VecDeque<io::Result<Vec<u8>>>,
    write_error: Option<io::ErrorKind>,
    read_delay: Option<Duration>,
    seen: SeenHandle,
}

impl ScriptedStream {
    pub fn new(chunks: &[&[u8]]) -> (Self, SeenHandle) {
        let seen = SeenHandle::default();
        let stream = ScriptedStream {
            reads: chunks.iter().map(|c| Ok(c.to_vec())).collect(),
            write_error: None,
            read_delay: None,
            seen: seen.clone(),
        };
        (stream, seen)
    }

    /// Fail reading with `kind` once the scripted chunks are used up.
    pub fn then_error(mut self, kind: io::ErrorKind) -> Self {
        self.reads
            .push_back(Err(io::Error::new(kind, "scripted read failure")));
        self
    }

    pub fn failing_writes(mut self, kind: io::ErrorKind) -> Self {
        self.write_error = Some(kind);
        self
    }

    /// Sleep before every read. Timeouts set on the stream are not enforced.
    pub fn slow_reads(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }
}

impl io::Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(delay) = self.read_delay {
            thread::sleep(delay);
        }

        let Some(next) = self.reads.pop_front() else {
            return Ok(0);
        };

        let mut chunk = next?;
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);

        if n < chunk.len() {
            self.reads.push_front(Ok(chunk.split_off(n)));
        }

        Ok(n)
    }
}

impl io::Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(kind) = self.write_error {
            return Err(io::Error::new(kind, "scripted write failure"));
        }
        self.seen.lock().unwrap().written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for ScriptedStream {
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        self.seen.lock().unwrap().read_timeout = timeout;
        Ok(())
    }

    fn set_write_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        self.seen.lock().unwrap().write_timeout = timeout;
        Ok(())
    }

    fn shutdown(&mut self) -> io::Result<()> {
        self.seen.lock().unwrap().shutdown = true;
        Ok(())
    }
}

/// Connector resolving to fixed endpoints, with one scripted outcome per
/// connect attempt.
pub struct MockConnector {
    addrs: Vec<SocketAddr>,
    resolve_error: Option<io::ErrorKind>,
    outcomes: RefCell<VecDeque<io::Result<ScriptedStream>>>,
    attempts: RefCell<Vec<SocketAddr>>,
}

impl MockConnector {
    pub fn new(addrs: &[&str]) -> Self {
        MockConnector {
            addrs: addrs.iter().map(|a| a.parse().unwrap()).collect(),
            resolve_error: None,
            outcomes: RefCell::new(VecDeque::new()),
            attempts: RefCell::new(Vec::new()),
        }
    }

    pub fn unresolvable() -> Self {
        MockConnector {
            resolve_error: Some(io::ErrorKind::NotFound),
            ..MockConnector::new(&[])
        }
    }

    pub fn accept(self, stream: ScriptedStream) -> Self {
        self.outcomes.borrow_mut().push_back(Ok(stream));
        self
    }

    pub fn refuse(self, kind: io::ErrorKind) -> Self {
        self.outcomes
            .borrow_mut()
            .push_back(Err(io::Error::new(kind, "scripted connect failure")));
        self
    }

    pub fn attempts(&self) -> Vec<SocketAddr> {
        self.attempts.borrow().clone()
    }
}

impl Connector for MockConnector {
    fn resolve(&self, _host: &str, _port: u16) -> io::Result<Vec<SocketAddr>> {
        if let Some(kind) = self.resolve_error {
            return Err(io::Error::new(kind, "scripted resolve failure"));
        }
        Ok(self.addrs.clone())
    }

    fn connect(
        &self,
        addr: SocketAddr,
        _timeout: Option<Duration>,
    ) -> io::Result<Box<dyn Transport>> {
        self.attempts.borrow_mut().push(addr);

        match self.outcomes.borrow_mut().pop_front() {
            Some(Ok(stream)) => Ok(Box::new(stream)),
            Some(Err(e)) => Err(e),
            None => Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "no scripted connection left",
            )),
        }
    }
}

/// `GET /items?id=1&sort=asc HTTP/1.1` with a `Host` header.
pub fn items_request() -> crate::Request {
    let mut req = crate::Request::new("example.com", 80);
    req.set_path("/items");
    req.add_query_parameter("id", "1");
    req.add_query_parameter("sort", "asc");
    req.add_header("Host", "example.com");
    req
}
