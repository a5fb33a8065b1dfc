use std::time::Duration;

/// Deadlines for the blocking operations of an exchange.
///
/// Every field defaults to `None`, which blocks indefinitely.
///
/// ```
/// use std::time::Duration;
/// use hootsync::Config;
///
/// let config = Config::new()
///     .connect_timeout(Duration::from_secs(5))
///     .read_timeout(Duration::from_secs(30));
///
/// assert_eq!(config.write_timeout, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Applies to each endpoint attempt separately.
    pub connect_timeout: Option<Duration>,
    /// Bounds each read operation as a whole: the status line, one header
    /// line, one `fetch` or one `fetch_until`. A peer trickling bytes in
    /// does not extend it.
    pub read_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
}

impl Config {
    pub const fn new() -> Self {
        Config {
            connect_timeout: None,
            read_timeout: None,
            write_timeout: None,
        }
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }
}
