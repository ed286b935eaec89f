//! Modèles de données pour l'application web

use fastaflow_storage::{FastaEntry, FastaEntryRepository};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// État global de l'application
pub struct AppState {
    pub tera: tera::Tera,
    pub config: crate::config::AppConfig,
    pub repository: FastaEntryRepository,
}

/// Entrée FASTA préparée pour le rendu des templates
///
/// Les fréquences JSON de la base sont désérialisées ici une fois pour
/// toutes, les templates n'ont plus qu'à itérer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryView {
    pub id: String,
    pub description: String,
    pub filename: String,
    pub sequence_length: i64,
    pub gc_content: f64,
    pub nuc_freq: BTreeMap<char, u64>,
    pub protein_seq: String,
    pub upload_date: String,
}

impl TryFrom<&FastaEntry> for EntryView {
    type Error = fastaflow_storage::StorageError;

    fn try_from(entry: &FastaEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.id.clone(),
            description: entry.description.clone(),
            filename: entry.filename.clone(),
            sequence_length: entry.sequence_length,
            gc_content: entry.gc_content,
            nuc_freq: entry.nucleotide_frequency()?,
            protein_seq: entry.protein_seq.clone(),
            upload_date: entry.upload_date.clone(),
        })
    }
}

/// Réponse d'erreur standard (endpoints JSON)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: String, code: u16) -> Self {
        Self { error, code }
    }
}
