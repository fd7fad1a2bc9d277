//! # Almanac Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL database that holds the canonical monthly price aggregates.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** This crate is an adapter that encapsulates all
//!   database-specific logic. It provides a clean, abstract API to the rest
//!   of the application, hiding the underlying SQL.
//! - **Read-Only Analytics Path:** Price rows are written by the ingestion
//!   pipeline; this crate only reads them. Every derived figure is
//!   recomputed from these immutable rows on each request.
//! - **Asynchronous & Pooled:** All operations are asynchronous, and it uses
//!   a connection pool (`PgPool`) for concurrent database access.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: A utility to apply database migrations, ensuring the schema is up-to-date.
//! - `DbRepository`: The main struct that holds the connection pool and provides
//!   the data access methods (e.g., `get_monthly_prices`).
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
