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
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod chat_completions;
pub mod retry;

pub use chat_completions::{ChatCompletionsProvider, ProviderError};
pub use retry::{RetryPolicy, Transient, retry_with_backoff};
