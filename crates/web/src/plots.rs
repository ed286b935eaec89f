//! Génération des plots SVG pour les pages de résultats
//!
//! Les graphiques sont rendus côté serveur sous forme de chaînes SVG
//! injectées directement dans les templates, sans dépendance de rendu
//! raster.

use std::collections::BTreeMap;
use std::fmt::Write;

/// Palette de couleurs des tranches et barres
const PALETTE: [&str; 10] = [
    "#2a6fef", "#e53935", "#43a047", "#fb8c00", "#8e24aa", "#00acc1", "#fdd835", "#6d4c41",
    "#ec407a", "#78909c",
];

const TEXT_COLOR: &str = "#e8e8e8";
const AXIS_COLOR: &str = "#9e9e9e";

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn svg_open(width: u32, height: u32) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" \
         width=\"{w}\" height=\"{h}\" font-family=\"sans-serif\" font-size=\"13\">\n",
        w = width,
        h = height
    )
}

fn svg_title(svg: &mut String, text: &str, width: u32) {
    let _ = writeln!(
        svg,
        "<text x=\"{}\" y=\"18\" text-anchor=\"middle\" fill=\"{}\" font-size=\"15\">{}</text>",
        width / 2,
        TEXT_COLOR,
        escape_xml(text)
    );
}

/// Camembert des fréquences nucléotidiques
pub fn pie_plot(header: &str, nuc_freq: &BTreeMap<char, u64>) -> String {
    let (width, height) = (480, 330);
    let (cx, cy, r) = (170.0_f64, 180.0_f64, 120.0_f64);

    let mut svg = svg_open(width, height);
    svg_title(&mut svg, &format!("Fréquences nucléotidiques — {}", header), width);

    let total: u64 = nuc_freq.values().sum();
    if total == 0 {
        let _ = writeln!(
            svg,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\">Séquence vide</text>",
            width / 2,
            height / 2,
            TEXT_COLOR
        );
        svg.push_str("</svg>");
        return svg;
    }

    let mut angle = -std::f64::consts::FRAC_PI_2;
    for (i, (nuc, count)) in nuc_freq.iter().enumerate() {
        let fraction = *count as f64 / total as f64;
        let color = PALETTE[i % PALETTE.len()];

        if fraction >= 0.9999 {
            // Une seule tranche: un arc dégénéré ne se dessine pas
            let _ = writeln!(
                svg,
                "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{color}\"/>"
            );
        } else {
            let sweep = fraction * std::f64::consts::TAU;
            let (x1, y1) = (cx + r * angle.cos(), cy + r * angle.sin());
            let end = angle + sweep;
            let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
            let large_arc = if sweep > std::f64::consts::PI { 1 } else { 0 };

            let _ = writeln!(
                svg,
                "<path d=\"M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} \
                 A {r} {r} 0 {large_arc} 1 {x2:.2} {y2:.2} Z\" fill=\"{color}\"/>"
            );
            angle = end;
        }

        // Légende
        let ly = 50 + i as u32 * 22;
        let _ = writeln!(
            svg,
            "<rect x=\"320\" y=\"{}\" width=\"14\" height=\"14\" fill=\"{}\"/>\
             <text x=\"342\" y=\"{}\" fill=\"{}\">{} — {:.1} %</text>",
            ly,
            color,
            ly + 12,
            TEXT_COLOR,
            escape_xml(&nuc.to_string()),
            fraction * 100.0
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Histogramme des fréquences d'acides aminés (en pourcentage)
pub fn bar_plot(header: &str, amino_freq: &BTreeMap<char, f64>) -> String {
    let (width, height) = (560, 330);
    let (left, right, top, bottom) = (50.0_f64, 540.0_f64, 40.0_f64, 280.0_f64);

    let mut svg = svg_open(width, height);
    svg_title(&mut svg, &format!("Fréquences des acides aminés — {}", header), width);

    if amino_freq.is_empty() {
        let _ = writeln!(
            svg,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\">Aucune traduction</text>",
            width / 2,
            height / 2,
            TEXT_COLOR
        );
        svg.push_str("</svg>");
        return svg;
    }

    let max_value = amino_freq.values().cloned().fold(0.0_f64, f64::max).max(1.0);
    let slot = (right - left) / amino_freq.len() as f64;
    let bar_width = (slot * 0.7).min(40.0);

    // Axes
    let _ = writeln!(
        svg,
        "<line x1=\"{left}\" y1=\"{top}\" x2=\"{left}\" y2=\"{bottom}\" stroke=\"{AXIS_COLOR}\"/>\
         <line x1=\"{left}\" y1=\"{bottom}\" x2=\"{right}\" y2=\"{bottom}\" stroke=\"{AXIS_COLOR}\"/>\
         <text x=\"{}\" y=\"{}\" text-anchor=\"end\" fill=\"{TEXT_COLOR}\">{max_value:.1} %</text>",
        left - 6.0,
        top + 5.0,
    );

    for (i, (amino, value)) in amino_freq.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let bar_height = (value / max_value) * (bottom - top);
        let x = left + i as f64 * slot + (slot - bar_width) / 2.0;
        let y = bottom - bar_height;

        let _ = writeln!(
            svg,
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{bar_width:.2}\" \
             height=\"{bar_height:.2}\" fill=\"{color}\"/>\
             <text x=\"{:.2}\" y=\"{}\" text-anchor=\"middle\" fill=\"{TEXT_COLOR}\">{}</text>",
            x + bar_width / 2.0,
            bottom + 18.0,
            escape_xml(&amino.to_string()),
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Courbe du GC% cumulé le long de la séquence
pub fn gc_plot(header: &str, sequence: &str) -> String {
    let (width, height) = (720, 270);
    let (left, right, top, bottom) = (50.0_f64, 700.0_f64, 40.0_f64, 220.0_f64);

    let mut svg = svg_open(width, height);
    svg_title(&mut svg, &format!("GC% cumulé — {}", header), width);

    let profile = fastaflow_core::gc_profile(sequence);
    if profile.is_empty() {
        let _ = writeln!(
            svg,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\">Séquence vide</text>",
            width / 2,
            height / 2,
            TEXT_COLOR
        );
        svg.push_str("</svg>");
        return svg;
    }

    // Grille horizontale à 0, 50 et 100 %
    for pct in [0.0_f64, 50.0, 100.0] {
        let y = bottom - pct / 100.0 * (bottom - top);
        let _ = writeln!(
            svg,
            "<line x1=\"{left}\" y1=\"{y:.2}\" x2=\"{right}\" y2=\"{y:.2}\" \
             stroke=\"{AXIS_COLOR}\" stroke-dasharray=\"4 4\"/>\
             <text x=\"{}\" y=\"{:.2}\" text-anchor=\"end\" fill=\"{TEXT_COLOR}\">{pct:.0}</text>",
            left - 6.0,
            y + 4.0,
        );
    }

    let step = if profile.len() > 1 {
        (right - left) / (profile.len() - 1) as f64
    } else {
        0.0
    };

    let mut points = String::new();
    for (i, pct) in profile.iter().enumerate() {
        let x = left + i as f64 * step;
        let y = bottom - pct / 100.0 * (bottom - top);
        let _ = write!(points, "{x:.2},{y:.2} ");
    }

    let _ = writeln!(
        svg,
        "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>\
         <text x=\"{:.0}\" y=\"{}\" text-anchor=\"middle\" fill=\"{TEXT_COLOR}\">\
         Position dans la séquence</text>",
        points.trim_end(),
        PALETTE[0],
        (left + right) / 2.0,
        bottom + 28.0,
    );

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_plot_slices_and_legend() {
        let mut freq = BTreeMap::new();
        freq.insert('A', 2u64);
        freq.insert('C', 1);
        freq.insert('G', 1);

        let svg = pie_plot("seq1", &freq);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains("A — 50.0 %"));
    }

    #[test]
    fn test_pie_plot_single_symbol_draws_full_circle() {
        let mut freq = BTreeMap::new();
        freq.insert('G', 7u64);

        let svg = pie_plot("seq1", &freq);
        assert!(svg.contains("<circle"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_pie_plot_empty() {
        let svg = pie_plot("seq1", &BTreeMap::new());
        assert!(svg.contains("Séquence vide"));
    }

    #[test]
    fn test_bar_plot() {
        let mut freq = BTreeMap::new();
        freq.insert('M', 50.0);
        freq.insert('K', 50.0);

        let svg = bar_plot("seq1", &freq);
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains(">M</text>"));
    }

    #[test]
    fn test_bar_plot_empty() {
        let svg = bar_plot("seq1", &BTreeMap::new());
        assert!(svg.contains("Aucune traduction"));
    }

    #[test]
    fn test_gc_plot_polyline() {
        let svg = gc_plot("seq1", "GATTACA");
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("Position dans la séquence"));
    }

    #[test]
    fn test_title_is_escaped() {
        let svg = gc_plot("seq <1> & co", "ACGT");
        assert!(svg.contains("seq &lt;1&gt; &amp; co"));
    }
}
