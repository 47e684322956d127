//! Test batch model.
//!
//! - [`sentence`]: what the caller asks and what it expects
//! - [`result`]: what came back for each sentence
//! - [`batch`]: batch-level configuration checks
//! - [`validation`]: applying caller predicates to results

pub mod batch;
pub mod result;
pub mod sentence;
pub mod validation;
