//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel.
//! - **memory**: a process-local store used without a database and in tests.
//! - **token**: HS256 bearer tokens.

pub mod memory;
pub mod persistence;
pub mod token;
