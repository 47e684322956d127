//! Remote request records.
//!
//! - [`RequestState`]: status record of one ask request, as reported by check
//! - [`RequestStatus`]: non-terminal until the designated ready value
//! - [`DatasourceInfo`]: datasource listing entry

pub mod state;

pub use state::{DatasourceInfo, RequestState, RequestStatus};
