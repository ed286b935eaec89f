//! Lecture de fichiers FASTA
//!
//! Le parsing est délégué à la bibliothèque `bio`; ce module ne fait que
//! normaliser les enregistrements pour le reste du pipeline.

use bio::io::fasta;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FastaError, Result};

/// Extensions de fichiers acceptées pour l'upload
pub const ALLOWED_EXTENSIONS: [&str; 8] =
    ["fasta", "fas", "fa", "fna", "ffn", "faa", "mpfa", "frn"];

/// Enregistrement FASTA brut (en-tête + séquence)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastaRecord {
    /// Premier mot de l'en-tête
    pub id: String,
    /// En-tête complet, sans le `>`
    pub description: String,
    /// Séquence normalisée en majuscules
    pub sequence: String,
}

/// Vérifie si le nom de fichier porte une extension FASTA connue
pub fn allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Parse un fichier FASTA depuis un tampon mémoire
///
/// Chaque enregistrement est retourné avec sa séquence en majuscules. Un
/// fichier sans aucun enregistrement est une erreur, pas un résultat vide.
pub fn parse_fasta(data: &[u8]) -> Result<Vec<FastaRecord>> {
    let reader = fasta::Reader::new(data);
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| FastaError::Parse(e.to_string()))?;
        record
            .check()
            .map_err(|e| FastaError::Parse(e.to_string()))?;

        let description = match record.desc() {
            Some(desc) => format!("{} {}", record.id(), desc),
            None => record.id().to_string(),
        };

        records.push(FastaRecord {
            id: record.id().to_string(),
            description,
            sequence: String::from_utf8_lossy(record.seq()).to_ascii_uppercase(),
        });
    }

    if records.is_empty() {
        return Err(FastaError::EmptyFasta);
    }

    info!("{} séquence(s) lue(s) depuis le fichier FASTA", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_record() {
        let data = b">seq1 premier test\nACGT\nacgt\n";
        let records = parse_fasta(data).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].description, "seq1 premier test");
        assert_eq!(records[0].sequence, "ACGTACGT");
    }

    #[test]
    fn test_parse_multiple_records() {
        let data = b">a\nACGT\n>b deuxieme\nGGCC\n";
        let records = parse_fasta(data).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "a");
        assert_eq!(records[1].id, "b");
        assert_eq!(records[1].sequence, "GGCC");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse_fasta(b""), Err(FastaError::EmptyFasta)));
    }

    #[test]
    fn test_parse_garbage_input() {
        assert!(matches!(
            parse_fasta(b"pas un fichier fasta\n"),
            Err(FastaError::Parse(_))
        ));
    }

    #[test]
    fn test_allowed_extension() {
        assert!(allowed_extension("genome.fasta"));
        assert!(allowed_extension("GENOME.FA"));
        assert!(allowed_extension("reads.fna"));
        assert!(!allowed_extension("notes.txt"));
        assert!(!allowed_extension("sans_extension"));
    }
}
