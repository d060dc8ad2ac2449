//! HTTP transport to the translation endpoint.

mod http;

pub use http::{parse_translated_text, LibreTranslateTransport, TransportError};
