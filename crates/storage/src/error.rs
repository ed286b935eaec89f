//! Gestion des erreurs pour le module de stockage

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Erreur de base de données: {0}")]
    Database(String),

    #[error("Erreur de connexion: {0}")]
    Connection(String),

    #[error("Erreur de migration: {0}")]
    Migration(String),

    #[error("Entrée non trouvée: {0}")]
    EntryNotFound(String),

    #[error("Erreur de sérialisation: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StorageError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StorageError::Migration(err.to_string())
    }
}
