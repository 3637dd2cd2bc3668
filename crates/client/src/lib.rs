//! Client code for afflink.
//!
//! This crate provides the HTTP transport, short-link resolution, the
//! end-to-end link service, and the offline shell cache manager.

pub mod fetch;
pub mod resolve;
pub mod service;
pub mod shell;

pub use fetch::{FetchClient, FetchConfig};
pub use resolve::{ProbeError, ProbeOutcome, RedirectProbe, ShortLinkResolver};
pub use service::{Conversion, LinkService};
pub use shell::{
    Fetcher, Interception, LifecycleController, LifecycleHandler, ShellCache, ShellConfig, ShellRequest,
    ShellResponse, WorkerState,
};
