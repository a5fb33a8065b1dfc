use crate::connection::Connection;
use crate::Headers;

/// An outgoing HTTP/1.x request.
///
/// Populate it, then hand it to [`Http::sync`][crate::Http::sync]. The
/// request owns the connection of its latest exchange; starting a new
/// exchange closes that connection first.
#[derive(Debug)]
pub struct Request {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) protocol: String,
    pub(crate) version: f64,
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) query_parameters: Vec<(String, String)>,
    pub(crate) headers: Headers,
    pub(crate) body: Vec<u8>,
    pub(crate) connection: Option<Connection>,
}

impl Default for Request {
    fn default() -> Self {
        Request {
            host: String::new(),
            port: 80,
            protocol: "HTTP".to_string(),
            version: 1.1,
            method: "GET".to_string(),
            path: "/".to_string(),
            query_parameters: Vec::new(),
            headers: Headers::new(),
            body: Vec::new(),
            connection: None,
        }
    }
}

impl Request {
    /// A `GET / HTTP/1.1` to `host` on `port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Request {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn set_protocol(&mut self, protocol: impl Into<String>) {
        self.protocol = protocol.into();
    }

    pub fn version(&self) -> f64 {
        self.version
    }

    pub fn set_version(&mut self, version: f64) {
        self.version = version;
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn set_method(&mut self, method: impl Into<String>) {
        self.method = method.into();
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn query_parameters(&self) -> &[(String, String)] {
        &self.query_parameters
    }

    /// Append a query parameter. Keys and values are sent as given, without
    /// any percent-encoding.
    pub fn add_query_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query_parameters.push((key.into(), value.into()));
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.add(name, value);
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Set the body bytes.
    ///
    /// No `Content-Length` is added on send, that header is up to the caller.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// The exact bytes sent for this request.
    ///
    /// ```
    /// let mut req = hootsync::Request::new("example.com", 80);
    /// req.set_path("/items");
    /// req.add_query_parameter("id", "1");
    /// req.add_header("Host", "example.com");
    ///
    /// assert_eq!(
    ///     req.to_bytes(),
    ///     b"GET /items?id=1 HTTP/1.1\r\nHost: example.com\r\n\r\n"
    /// );
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = String::with_capacity(256);

        head.push_str(&self.method);
        head.push(' ');
        head.push_str(&self.path);
        head.push_str(&self.query_string());
        head.push(' ');
        head.push_str(&self.protocol);
        head.push('/');
        head.push_str(&format_version(self.version));
        head.push_str("\r\n");

        for (name, value) in self.headers.iter() {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }

        head.push_str("\r\n");

        let mut out = head.into_bytes();
        out.extend_from_slice(&self.body);

        out
    }

    fn query_string(&self) -> String {
        if self.query_parameters.is_empty() {
            return String::new();
        }

        let pairs: Vec<String> = self
            .query_parameters
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();

        format!("?{}", pairs.join("&"))
    }
}

/// Versions keep at least one fractional digit, `1.0` is sent as `1.0`
/// rather than `1`.
pub(crate) fn format_version(version: f64) -> String {
    if version.fract() == 0.0 {
        format!("{:.1}", version)
    } else {
        format!("{}", version)
    }
}
