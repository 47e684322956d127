//! REST adapter for the NLP service
//!
//! Every call is a JSON `POST` to `<base_url><path>`:
//!
//! | Call | Path |
//! |------|------|
//! | sign in / out | `user/signin`, `user/signout` |
//! | datasources | `ds/add`, `ds/delete`, `ds/all` |
//! | conversation | `clear/conversation` |
//! | requests | `ask`, `check`, `cancel` |
//!
//! A successful response is HTTP 200 with a JSON object whose `status` is
//! `API_OK`.

pub mod client;
pub mod error;
pub mod protocol;

pub use client::{DEFAULT_BASE_URL, RestNlpService};
pub use error::RestError;
