//! Persistance SQLite des résultats d'analyse FASTAflow

pub mod database;
pub mod error;
pub mod repository;

pub use database::{DatabaseConfig, DatabaseManager};
pub use error::{Result, StorageError};
pub use repository::{FastaEntry, FastaEntryRepository};
