//! Database layer for the SiteWatch platform.
//!
//! Provides the SQLite connection pool and the embedded migration runner.
//! Schema, worker seed data, and all pragmas live here; the domain crates
//! only ever see a `rusqlite::Connection` borrowed from the pool.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
