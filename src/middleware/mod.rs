//! Middleware applied to every response of the host (security headers and
//! caching policy).

pub mod security_headers;
