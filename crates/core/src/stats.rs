//! Calcul des statistiques de séquences nucléotidiques
//!
//! Toutes les opérations sont des passes simples et bornées sur la séquence.
//! Les résultats sont immuables une fois calculés: recalculer sur la même
//! entrée redonne exactement les mêmes valeurs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Arrondi à deux décimales pour l'affichage
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Statistiques dérivées d'une séquence nucléotidique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceStats {
    /// Nombre total de symboles
    pub sequence_length: usize,
    /// Pourcentage de bases G/C, dans [0, 100]
    pub gc_content: f64,
    /// Comptage de chaque symbole observé (la somme vaut `sequence_length`)
    pub nucleotide_frequency: BTreeMap<char, u64>,
    /// Traduction en protéine, tronquée au premier codon stop
    pub protein_seq: String,
    /// Fréquence de chaque acide aminé, en pourcentage
    pub amino_acid_frequency: BTreeMap<char, f64>,
}

impl SequenceStats {
    /// Calcule toutes les statistiques pour une séquence
    pub fn compute(sequence: &str) -> Self {
        let protein_seq = translate_to_protein(sequence);
        let amino_acid_frequency = amino_acid_frequency(&protein_seq);

        Self {
            sequence_length: sequence.chars().count(),
            gc_content: gc_content(sequence),
            nucleotide_frequency: nucleotide_frequency(sequence),
            protein_seq,
            amino_acid_frequency,
        }
    }
}

/// Pourcentage de bases G/C dans la séquence
///
/// Défini à 0.0 pour la séquence vide.
pub fn gc_content(sequence: &str) -> f64 {
    let total = sequence.chars().count();
    if total == 0 {
        return 0.0;
    }

    let gc = sequence
        .chars()
        .filter(|c| matches!(c.to_ascii_uppercase(), 'G' | 'C'))
        .count();

    round2(gc as f64 / total as f64 * 100.0)
}

/// Compte chaque symbole observé, sans validation d'alphabet
///
/// Les symboles hors alphabet nucléotidique sont comptés tels quels. Un
/// `BTreeMap` garantit un ordre d'itération stable pour les tables et plots.
pub fn nucleotide_frequency(sequence: &str) -> BTreeMap<char, u64> {
    let mut counts = BTreeMap::new();
    for c in sequence.chars() {
        *counts.entry(c.to_ascii_uppercase()).or_insert(0) += 1;
    }
    counts
}

/// Traduit un codon en acide aminé selon le code génétique standard
///
/// Retourne `*` pour un codon stop et `X` pour un codon contenant un symbole
/// hors A/C/G/T.
fn translate_codon(codon: &[u8]) -> char {
    match codon {
        b"TTT" | b"TTC" => 'F',
        b"TTA" | b"TTG" | b"CTT" | b"CTC" | b"CTA" | b"CTG" => 'L',
        b"ATT" | b"ATC" | b"ATA" => 'I',
        b"ATG" => 'M',
        b"GTT" | b"GTC" | b"GTA" | b"GTG" => 'V',
        b"TCT" | b"TCC" | b"TCA" | b"TCG" | b"AGT" | b"AGC" => 'S',
        b"CCT" | b"CCC" | b"CCA" | b"CCG" => 'P',
        b"ACT" | b"ACC" | b"ACA" | b"ACG" => 'T',
        b"GCT" | b"GCC" | b"GCA" | b"GCG" => 'A',
        b"TAT" | b"TAC" => 'Y',
        b"CAT" | b"CAC" => 'H',
        b"CAA" | b"CAG" => 'Q',
        b"AAT" | b"AAC" => 'N',
        b"AAA" | b"AAG" => 'K',
        b"GAT" | b"GAC" => 'D',
        b"GAA" | b"GAG" => 'E',
        b"TGT" | b"TGC" => 'C',
        b"TGG" => 'W',
        b"CGT" | b"CGC" | b"CGA" | b"CGG" | b"AGA" | b"AGG" => 'R',
        b"GGT" | b"GGC" | b"GGA" | b"GGG" => 'G',
        b"TAA" | b"TAG" | b"TGA" => '*',
        _ => 'X',
    }
}

/// Traduit la séquence en protéine, triplet par triplet
///
/// La traduction s'arrête au premier codon stop (le symbole `*` n'apparaît
/// jamais dans le résultat). Un triplet incomplet en fin de séquence est
/// ignoré.
pub fn translate_to_protein(sequence: &str) -> String {
    let upper = sequence.to_ascii_uppercase();
    let mut protein = String::with_capacity(upper.len() / 3);

    for codon in upper.as_bytes().chunks_exact(3) {
        match translate_codon(codon) {
            '*' => break,
            aa => protein.push(aa),
        }
    }

    protein
}

/// Fréquence de chaque acide aminé dans la protéine, en pourcentage
pub fn amino_acid_frequency(protein: &str) -> BTreeMap<char, f64> {
    let total = protein.chars().count();
    if total == 0 {
        return BTreeMap::new();
    }

    let mut counts: BTreeMap<char, u64> = BTreeMap::new();
    for aa in protein.chars() {
        *counts.entry(aa).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(aa, n)| (aa, round2(n as f64 / total as f64 * 100.0)))
        .collect()
}

/// Pourcentage GC cumulé à chaque position de la séquence
///
/// Le point `i` vaut le GC% des `i + 1` premiers symboles. Calcul incrémental
/// en une seule passe.
pub fn gc_profile(sequence: &str) -> Vec<f64> {
    let mut profile = Vec::with_capacity(sequence.len());
    let mut gc = 0u64;

    for (i, c) in sequence.chars().enumerate() {
        if matches!(c.to_ascii_uppercase(), 'G' | 'C') {
            gc += 1;
        }
        profile.push(gc as f64 / (i + 1) as f64 * 100.0);
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gc_content() {
        assert_eq!(gc_content("ACGT"), 50.0);
        assert_eq!(gc_content("GGCC"), 100.0);
        assert_eq!(gc_content("ATAT"), 0.0);
        assert_eq!(gc_content("acgt"), 50.0);
    }

    #[test]
    fn test_gc_content_empty() {
        assert_eq!(gc_content(""), 0.0);
    }

    #[test]
    fn test_gc_content_rounding() {
        // 1 GC sur 3 symboles = 33.33 %
        assert_eq!(gc_content("ATG"), 33.33);
    }

    #[test]
    fn test_nucleotide_frequency_counts() {
        let freq = nucleotide_frequency("AACGTN");

        assert_eq!(freq[&'A'], 2);
        assert_eq!(freq[&'C'], 1);
        assert_eq!(freq[&'N'], 1);
        assert_eq!(freq.values().sum::<u64>(), 6);
    }

    #[test]
    fn test_nucleotide_frequency_unknown_symbols() {
        // Les symboles hors alphabet sont comptés sans rejet
        let freq = nucleotide_frequency("AC-?");

        assert_eq!(freq[&'-'], 1);
        assert_eq!(freq[&'?'], 1);
        assert_eq!(freq.values().sum::<u64>(), 4);
    }

    #[test]
    fn test_translate_stops_at_stop_codon() {
        // ATG TAA: la méthionine puis arrêt
        assert_eq!(translate_to_protein("ATGTAA"), "M");
        assert_eq!(translate_to_protein("ATGTGAATG"), "M");
    }

    #[test]
    fn test_translate_never_contains_stop_symbol() {
        for seq in ["ATGTAA", "TAAATG", "ATGTAGGGG", "TGA"] {
            assert!(!translate_to_protein(seq).contains('*'));
        }
    }

    #[test]
    fn test_translate_ignores_trailing_partial_codon() {
        assert_eq!(translate_to_protein("ATGGC"), "M");
        assert_eq!(translate_to_protein("AT"), "");
    }

    #[test]
    fn test_translate_ambiguous_codon() {
        assert_eq!(translate_to_protein("ATGANG"), "MX");
    }

    #[test]
    fn test_translate_lowercase() {
        assert_eq!(translate_to_protein("atgaaa"), "MK");
    }

    #[test]
    fn test_amino_acid_frequency() {
        let freq = amino_acid_frequency("MMKK");

        assert_eq!(freq[&'M'], 50.0);
        assert_eq!(freq[&'K'], 50.0);
        assert!(amino_acid_frequency("").is_empty());
    }

    #[test]
    fn test_gc_profile() {
        let profile = gc_profile("GATC");

        assert_eq!(profile.len(), 4);
        assert_eq!(profile[0], 100.0);
        assert_eq!(profile[1], 50.0);
        assert_eq!(profile[3], 50.0);
        assert!(gc_profile("").is_empty());
    }

    #[test]
    fn test_compute_is_idempotent() {
        let a = SequenceStats::compute("ACGTNACGT");
        let b = SequenceStats::compute("ACGTNACGT");

        assert_eq!(a, b);
    }

    #[test]
    fn test_compute_empty_sequence() {
        let stats = SequenceStats::compute("");

        assert_eq!(stats.sequence_length, 0);
        assert_eq!(stats.gc_content, 0.0);
        assert!(stats.nucleotide_frequency.is_empty());
        assert!(stats.protein_seq.is_empty());
    }

    proptest! {
        #[test]
        fn prop_gc_content_in_range(seq in "[ACGTNacgtn]{0,300}") {
            let gc = gc_content(&seq);
            prop_assert!((0.0..=100.0).contains(&gc));
        }

        #[test]
        fn prop_frequency_sums_to_length(seq in "[ACGTNacgtn-]{0,300}") {
            let stats = SequenceStats::compute(&seq);
            prop_assert_eq!(
                stats.nucleotide_frequency.values().sum::<u64>(),
                stats.sequence_length as u64
            );
        }

        #[test]
        fn prop_protein_has_no_stop_symbol(seq in "[ACGT]{0,300}") {
            prop_assert!(!translate_to_protein(&seq).contains('*'));
        }

        #[test]
        fn prop_amino_frequencies_sum_to_100(seq in "[ACGT]{3,300}") {
            let protein = translate_to_protein(&seq);
            prop_assume!(!protein.is_empty());

            let sum: f64 = amino_acid_frequency(&protein).values().sum();
            // Chaque valeur est arrondie à deux décimales, d'où la tolérance
            prop_assert!((sum - 100.0).abs() < 0.5);
        }
    }
}
