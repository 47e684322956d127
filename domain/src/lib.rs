//! Domain layer for askbatch
//!
//! This crate contains the core types and rules of a test batch: the
//! sentences a caller wants to check, the request states reported by the
//! remote service, the per-sentence results and the report built from them.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Batch
//!
//! A batch is an ordered collection of [`TestSentence`]s executed together.
//! Each sentence targets either an existing datasource or a model, in which
//! case a throwaway datasource is provisioned for the duration of the batch.
//!
//! ## Result
//!
//! Every sentence yields exactly one [`TestResult`], positionally matched to
//! the input. Validation predicates attached to a sentence only ever set the
//! result's validation field; raw result and error are left untouched.

pub mod config;
pub mod core;
pub mod report;
pub mod request;
pub mod testing;

// Re-export commonly used types
pub use config::ReportFormat;
pub use core::{
    credentials::Credentials,
    error::{BatchError, DuplicateField, DuplicatePair},
    ids::{AccessToken, DatasourceId, RequestId},
};
pub use report::{BatchReport, BatchStats, ReportRow};
pub use request::{DatasourceInfo, RequestState, RequestStatus};
pub use testing::{
    batch::validate_batch,
    result::{QueryResult, TestResult},
    sentence::{ErrorCheck, Expectation, ResultCheck, SentenceTarget, TestSentence},
    validation::{ERROR_CHECK_FAILED, RESULT_CHECK_FAILED, apply_validation, validate},
};
