//! FASTAflow Core Library
//!
//! Bibliothèque principale pour la lecture de fichiers FASTA et le calcul
//! des statistiques de séquences (GC%, fréquences, traduction).

pub mod error;
pub mod fasta;
pub mod stats;

// Réexportations principales
pub use error::{FastaError, Result};
pub use fasta::{allowed_extension, parse_fasta, FastaRecord, ALLOWED_EXTENSIONS};
pub use stats::{
    amino_acid_frequency, gc_content, gc_profile, nucleotide_frequency, translate_to_protein,
    SequenceStats,
};
