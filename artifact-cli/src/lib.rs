//! Pipelines behind the `get-artifact` and `insert-artifact` binaries.
//!
//! Each run loads `POSTGRES_*` settings, opens one connection, executes one
//! statement and closes the connection again before returning.

pub mod fetch;
pub mod insert;
pub mod logging;
