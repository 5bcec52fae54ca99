//! Classify Common Types
//!
//! Shared types used by both the gateway and the worker.

pub mod classify;

pub use classify::{
    ClassifyRequest, ClassifyResult, WorkerClassifyRequest, WorkerClassifyResponse,
};
