use std::fmt;
use std::io;

const INCREMENT: usize = 4096;
const THRESHOLD: usize = 100;

/// Bytes read off a connection that are not yet handed to a parser.
///
/// Reads append at the end, parsing consumes from the front. A consumed byte
/// is gone for good. The buffer grows as needed and has no upper bound.
pub(crate) struct StreamBuffer {
    buffer: Vec<u8>,
    pos: usize,
}

impl StreamBuffer {
    pub fn new() -> Self {
        Self {
            buffer: vec![0; INCREMENT],
            pos: 0,
        }
    }

    /// Do one read from `reader` and append whatever it yields.
    ///
    /// Returns the number of bytes appended, `0` meaning end-of-data.
    pub fn fill_from<R: io::Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<usize> {
        if self.pos > self.buffer.len() - THRESHOLD {
            self.buffer.resize(self.buffer.len() + INCREMENT, 0);
        }

        let n = loop {
            match reader.read(&mut self.buffer[self.pos..]) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                r => break r?,
            }
        };

        self.pos += n;

        Ok(n)
    }

    #[cfg(test)]
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        let needed = self.pos + bytes.len();
        if needed > self.buffer.len() {
            self.buffer.resize(needed + INCREMENT, 0);
        }
        self.buffer[self.pos..needed].copy_from_slice(bytes);
        self.pos = needed;
    }

    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.pos]
    }

    pub fn consume(&mut self, amount: usize) {
        let max = amount.min(self.pos);
        self.buffer.copy_within(max..self.pos, 0);
        self.pos -= max;
    }

    /// Copy out and consume up to `amount` bytes from the front.
    pub fn take(&mut self, amount: usize) -> Vec<u8> {
        let n = amount.min(self.pos);
        let taken = self.buffer[..n].to_vec();
        self.consume(n);
        taken
    }
}

impl fmt::Debug for StreamBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamBuffer")
            .field("buffered", &self.pos)
            .finish()
    }
}
