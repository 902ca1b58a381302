//! Remote backend project service

mod http;

pub use http::HttpBackendService;
