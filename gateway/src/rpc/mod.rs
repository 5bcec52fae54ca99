//! Worker RPC plumbing.

mod client;

pub use client::{ClassifierClient, WorkerError};
