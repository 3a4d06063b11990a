//! WebChat contract probe
//!
//! Verifies that a backend implements the Direct Line style token,
//! conversation and activity endpoints. Runs against a live backend when a
//! base URL is configured and against an in-process stub otherwise.

mod client;
mod http;
mod runner;
mod stub;

pub use client::{select_client, ContractResponse, RequestClient};
pub use http::HttpClient;
pub use runner::{run_suite, SuiteOptions, SuiteOutcome, MIN_TOKEN_LEN};
pub use stub::{simulate, StubClient, STATUS_ACCEPTED, STATUS_NOT_FOUND, STATUS_OK};
