//! Repository pour les entrées FASTA persistées

use chrono::Utc;
use fastaflow_core::{FastaRecord, SequenceStats};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, SqlitePool};
use std::collections::BTreeMap;
use tracing::{info, instrument};

use crate::error::Result;

/// Entrée FASTA telle que stockée en base
///
/// Les fréquences sont sérialisées en JSON; `upload_date` est stockée en
/// ISO 8601.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FastaEntry {
    pub id: String,
    pub description: String,
    pub sequence: String,
    pub filename: String,
    pub sequence_length: i64,
    pub gc_content: f64,
    pub nuc_freq: String,
    pub protein_seq: String,
    pub amino_freq: String,
    pub upload_date: String,
}

impl FastaEntry {
    /// Construit une entrée depuis un enregistrement parsé et ses statistiques
    pub fn from_record(
        record: &FastaRecord,
        stats: &SequenceStats,
        filename: &str,
    ) -> Result<Self> {
        Ok(Self {
            id: record.id.clone(),
            description: record.description.clone(),
            sequence: record.sequence.clone(),
            filename: filename.to_string(),
            sequence_length: stats.sequence_length as i64,
            gc_content: stats.gc_content,
            nuc_freq: serde_json::to_string(&stats.nucleotide_frequency)?,
            protein_seq: stats.protein_seq.clone(),
            amino_freq: serde_json::to_string(&stats.amino_acid_frequency)?,
            upload_date: Utc::now().to_rfc3339(),
        })
    }

    /// Désérialise la fréquence nucléotidique
    pub fn nucleotide_frequency(&self) -> Result<BTreeMap<char, u64>> {
        Ok(serde_json::from_str(&self.nuc_freq)?)
    }

    /// Désérialise la fréquence des acides aminés
    pub fn amino_acid_frequency(&self) -> Result<BTreeMap<char, f64>> {
        Ok(serde_json::from_str(&self.amino_freq)?)
    }
}

/// Repository pour les opérations sur les entrées FASTA
#[derive(Clone)]
pub struct FastaEntryRepository {
    pool: SqlitePool,
}

impl FastaEntryRepository {
    /// Crée un nouveau repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Remplace le jeu de données complet par les entrées fournies
    ///
    /// Suppression puis insertions dans une seule transaction: en cas d'échec
    /// rien n'est persisté et l'ancien jeu de données reste intact.
    #[instrument(skip(self, entries))]
    pub async fn replace_all(&self, entries: &[FastaEntry]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM fasta_entries")
            .execute(&mut *tx)
            .await?;

        for entry in entries {
            // Un id dupliqué dans le même fichier écrase l'entrée précédente
            sqlx::query(
                "INSERT OR REPLACE INTO fasta_entries
                 (id, description, sequence, filename, sequence_length,
                  gc_content, nuc_freq, protein_seq, amino_freq, upload_date)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(&entry.id)
            .bind(&entry.description)
            .bind(&entry.sequence)
            .bind(&entry.filename)
            .bind(entry.sequence_length)
            .bind(entry.gc_content)
            .bind(&entry.nuc_freq)
            .bind(&entry.protein_seq)
            .bind(&entry.amino_freq)
            .bind(&entry.upload_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!("{} entrée(s) persistée(s)", entries.len());
        Ok(entries.len())
    }

    /// Liste toutes les entrées, dans l'ordre d'insertion
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<FastaEntry>> {
        let entries = sqlx::query_as::<_, FastaEntry>(
            "SELECT * FROM fasta_entries ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Recherche une entrée par sa description
    #[instrument(skip(self))]
    pub async fn find_by_description(&self, description: &str) -> Result<Option<FastaEntry>> {
        let entry = sqlx::query_as::<_, FastaEntry>(
            "SELECT * FROM fasta_entries WHERE description = $1",
        )
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Supprime une entrée par son identifiant
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM fasta_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Compte le nombre total d'entrées
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM fasta_entries")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("count")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_repository() -> FastaEntryRepository {
        // Une seule connexion: chaque connexion ":memory:" aurait sa propre base
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        FastaEntryRepository::new(pool)
    }

    fn entry(id: &str, sequence: &str) -> FastaEntry {
        let record = FastaRecord {
            id: id.to_string(),
            description: format!("{} test", id),
            sequence: sequence.to_string(),
        };
        let stats = SequenceStats::compute(sequence);
        FastaEntry::from_record(&record, &stats, "test.fasta").unwrap()
    }

    #[tokio::test]
    async fn test_replace_all_and_list() {
        let repo = test_repository().await;

        let entries = vec![entry("seq1", "ACGTACGT"), entry("seq2", "GGGCCC")];
        repo.replace_all(&entries).await.unwrap();

        let stored = repo.list().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, "seq1");
        assert_eq!(stored[0].gc_content, 50.0);
        assert_eq!(stored[1].gc_content, 100.0);
    }

    #[tokio::test]
    async fn test_replace_all_discards_previous_dataset() {
        let repo = test_repository().await;

        repo.replace_all(&[entry("ancien", "ACGT")]).await.unwrap();
        repo.replace_all(&[entry("nouveau", "GGCC")]).await.unwrap();

        let stored = repo.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "nouveau");
    }

    #[tokio::test]
    async fn test_find_by_description() {
        let repo = test_repository().await;
        repo.replace_all(&[entry("seq1", "ACGTN")]).await.unwrap();

        let found = repo.find_by_description("seq1 test").await.unwrap();
        assert!(found.is_some());

        let entry = found.unwrap();
        assert_eq!(entry.sequence_length, 5);
        let freq = entry.nucleotide_frequency().unwrap();
        assert_eq!(freq.values().sum::<u64>(), 5);

        assert!(repo.find_by_description("inconnue").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_and_count() {
        let repo = test_repository().await;
        repo.replace_all(&[entry("seq1", "ACGT"), entry("seq2", "GGCC")])
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        assert!(repo.delete("seq1").await.unwrap());
        assert!(!repo.delete("seq1").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stats_roundtrip() {
        let repo = test_repository().await;
        let original = entry("seq1", "ATGTAAACG");
        repo.replace_all(std::slice::from_ref(&original))
            .await
            .unwrap();

        let stored = repo.list().await.unwrap().remove(0);
        assert_eq!(stored.protein_seq, "M");
        assert_eq!(stored.nuc_freq, original.nuc_freq);
        assert_eq!(stored.amino_freq, original.amino_freq);
    }
}
