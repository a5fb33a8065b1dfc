//! Blocking HTTP/1.x client exchange.
//!
//! hootsync writes one request over a freshly opened connection and reads
//! the response back incrementally: status line and headers first, then the
//! body in whatever pieces the caller asks for. Body framing is left to the
//! caller, who knows whether to fetch a `Content-Length` worth of bytes or
//! read delimited pieces (for instance to decode chunked transfer).
//!
//! ```no_run
//! use hootsync::{Http, Request};
//!
//! let mut request = Request::new("example.com", 80);
//! request.set_path("/items");
//! request.add_query_parameter("sort", "asc");
//! request.add_header("Host", "example.com");
//!
//! let http = Http::new();
//! let mut response = http.sync(&mut request)?;
//!
//! println!("{} {}", response.status_code(), response.status_message());
//!
//! // A line at a time.
//! let first_line = response.fetch_until("\n")?;
//!
//! // Or a fixed amount.
//! let more = response.fetch(1024)?;
//!
//! assert_eq!(response.body().len(), first_line.len() + more.len());
//! # Ok::<_, hootsync::Error>(())
//! ```
//!
//! All I/O goes through the [`Connector`] and [`Transport`] traits, with
//! [`TcpConnector`] as the default.

#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

// Re-export the optional basis for conversions.
#[cfg(feature = "http_crate")]
pub use http;

mod buffer;
mod connection;
mod parser;
mod util;

mod config;
pub use config::Config;

mod error;
pub use error::{Error, Operation, ParseError};
pub(crate) use error::Result;

mod header;
pub use header::Headers;

mod req;
pub use req::Request;

mod res;
pub use res::{Response, ResponseParts};

mod transport;
pub use transport::{Connector, TcpConnector, Transport};

mod client;
pub use client::Http;

#[cfg(feature = "http_crate")]
mod http_crate;
#[cfg(feature = "http_crate")]
pub use http_crate::ConvertError;
