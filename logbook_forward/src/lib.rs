#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Delivery of parsed records to the per-kind collector endpoints.

mod http;
mod retry;
mod sink;

pub use http::HttpForwarder;
pub use retry::retry_with_backoff;
pub use sink::{ForwardReport, RecordSink, forward_all};
