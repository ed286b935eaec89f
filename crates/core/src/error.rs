//! Types d'erreurs pour la bibliothèque FASTAflow

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Fichier FASTA invalide: {0}")]
    Parse(String),

    #[error("Aucune séquence trouvée dans le fichier")]
    EmptyFasta,

    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FastaError>;
