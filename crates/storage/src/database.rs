//! Module de base de données pour FASTAflow
//!
//! SQLite uniquement: l'application stocke un seul jeu de données local,
//! remplacé à chaque nouvel upload.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{info, instrument};

use crate::error::{Result, StorageError};

/// Configuration de la base de données
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:fastaflow.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Gestionnaire de base de données principal
pub struct DatabaseManager {
    config: DatabaseConfig,
    pool: Option<SqlitePool>,
}

impl DatabaseManager {
    /// Crée un nouveau gestionnaire de base de données
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config, pool: None }
    }

    /// Connecte à la base de données
    #[instrument(skip(self))]
    pub async fn connect(&mut self) -> Result<()> {
        info!("Connexion à la base de données {}...", self.config.url);

        let options = SqliteConnectOptions::from_str(&self.config.url)
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(self.config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        self.pool = Some(pool);
        info!("Connexion établie avec succès");
        Ok(())
    }

    /// Retourne le pool de connexions
    pub fn pool(&self) -> Result<&SqlitePool> {
        self.pool
            .as_ref()
            .ok_or_else(|| StorageError::Connection("Base de données non connectée".to_string()))
    }

    /// Initialise la base de données (connexion + migrations)
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) -> Result<()> {
        self.connect().await?;
        self.migrate().await?;
        Ok(())
    }

    /// Exécute les migrations
    #[instrument(skip(self))]
    pub async fn migrate(&self) -> Result<()> {
        let pool = self.pool()?;
        sqlx::migrate!("./migrations").run(pool).await?;

        info!("Migrations exécutées avec succès");
        Ok(())
    }

    /// Vérifie l'état de santé de la base de données
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<()> {
        let pool = self.pool()?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
