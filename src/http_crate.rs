//! Conversions to and from the `http` crate types.

use http::{HeaderName, HeaderValue, StatusCode, Version};
use thiserror::Error;

use crate::{Request, ResponseParts};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("unsupported http version")]
    UnsupportedVersion,

    #[error("uri has no host")]
    MissingHost,

    #[error("bad header: {0}")]
    BadHeader(String),

    #[error("invalid status code: {0}")]
    InvalidStatus(i32),
}

impl TryFrom<http::Request<Vec<u8>>> for Request {
    type Error = ConvertError;

    fn try_from(value: http::Request<Vec<u8>>) -> Result<Self, Self::Error> {
        let (parts, body) = value.into_parts();

        let host = parts.uri.host().ok_or(ConvertError::MissingHost)?;
        let port = parts.uri.port_u16().unwrap_or(80);

        let mut req = Request::new(host, port);
        req.set_method(parts.method.as_str());
        req.set_path(parts.uri.path());
        req.set_version(match parts.version {
            Version::HTTP_09 => 0.9,
            Version::HTTP_10 => 1.0,
            Version::HTTP_11 => 1.1,
            _ => return Err(ConvertError::UnsupportedVersion),
        });

        if let Some(query) = parts.uri.query() {
            for pair in query.split('&').filter(|p| !p.is_empty()) {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                req.add_query_parameter(key, value);
            }
        }

        let mut has_host = false;

        for (name, value) in &parts.headers {
            let value = value
                .to_str()
                .map_err(|_| ConvertError::BadHeader(name.to_string()))?;

            has_host |= *name == http::header::HOST;
            req.add_header(name.as_str(), value);
        }

        if !has_host {
            // User did not set a host header, we take the one in the uri.
            let authority = match parts.uri.port_u16() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            };
            req.add_header("Host", authority);
        }

        req.set_body(body);

        Ok(req)
    }
}

impl TryFrom<ResponseParts> for http::Response<Vec<u8>> {
    type Error = ConvertError;

    fn try_from(value: ResponseParts) -> Result<Self, Self::Error> {
        let status = u16::try_from(value.status_code)
            .ok()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .ok_or(ConvertError::InvalidStatus(value.status_code))?;

        let version = match (value.version * 10.0).round() as i64 {
            9 => Version::HTTP_09,
            10 => Version::HTTP_10,
            11 => Version::HTTP_11,
            20 => Version::HTTP_2,
            _ => return Err(ConvertError::UnsupportedVersion),
        };

        let mut res = http::Response::new(value.body);
        *res.status_mut() = status;
        *res.version_mut() = version;

        for (name, v) in value.headers.iter() {
            let bad = || ConvertError::BadHeader(name.to_string());
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| bad())?;
            let header_value = HeaderValue::from_str(v).map_err(|_| bad())?;
            res.headers_mut().append(header_name, header_value);
        }

        Ok(res)
    }
}
