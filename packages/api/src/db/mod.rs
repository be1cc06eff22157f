//! # Database module: PostgreSQL pool and migrations
//!
//! Server-only. [`get_pool`] returns the process-wide pool, opened lazily from
//! `DATABASE_URL` on first use. [`MIGRATOR`] embeds `packages/api/migrations`
//! so the server binary applies the schema (`users`, `calculations`, `notes`)
//! at start-up.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::{get_pool, MIGRATOR};
