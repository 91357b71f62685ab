//! Connectivity bootstrap subsystem.
//!
//! # Data Flow
//! ```text
//! Process environment (MYSQL_database, MYSQL_username, MYSQL_password)
//!   + [database] config section (host, port, charset, timeout)
//!     → settings.rs (ConnectionConfig, read once)
//!     → connection.rs (single connection attempt)
//!     → report.rs (success line or diagnostic + generic message)
//! ```
//!
//! # Design Decisions
//! - One attempt, no retry or backoff
//! - Returns `Result`; the binary decides the exit status
//! - Credentials are read at exactly one place and passed explicitly

pub mod connection;
pub mod report;
pub mod settings;

pub use connection::{connect, ConnectionError, Database, RowMap};
pub use report::{confirm, report_failure, SUCCESS_MESSAGE, USER_MESSAGE};
pub use settings::{ConnectionConfig, ENV_DATABASE, ENV_PASSWORD, ENV_USERNAME};
