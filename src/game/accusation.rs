//! Judging an accusation
//!
//! Guilt is decided by evidence alone: every collected clue is looked up in
//! the suspect index, and the accused is convicted when enough of them
//! point at exactly that name.

use crate::data::{ClueCatalog, SuspectIndex};
use serde::{Deserialize, Serialize};

/// Clues needed against a suspect for a conviction
pub const CONVICTION_THRESHOLD: usize = 2;

/// Longest accused name accepted, in bytes
pub const MAX_ACCUSED_LEN: usize = 49;

/// Clean up a typed name: drop the line ending and cap its length.
///
/// Truncation never splits a UTF-8 character.
pub fn bounded_name(input: &str) -> String {
    let line = input.trim_end_matches(['\n', '\r']);
    if line.len() <= MAX_ACCUSED_LEN {
        return line.to_string();
    }
    let mut end = MAX_ACCUSED_LEN;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line[..end].to_string()
}

/// Collected clues attributed to the accused, in catalog order
pub fn list_clues<'a>(
    catalog: &'a ClueCatalog,
    index: &'a SuspectIndex,
    accused: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    catalog
        .iter()
        .filter(move |clue| index.lookup(clue) == Some(accused))
}

/// How many collected clues point at the accused
pub fn count_clues(catalog: &ClueCatalog, index: &SuspectIndex, accused: &str) -> usize {
    list_clues(catalog, index, accused).count()
}

/// The outcome of an accusation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub accused: String,
    pub evidence: Vec<String>,
}

impl Verdict {
    pub fn clue_count(&self) -> usize {
        self.evidence.len()
    }

    pub fn is_conviction(&self) -> bool {
        self.clue_count() >= CONVICTION_THRESHOLD
    }

    pub fn headline(&self) -> &'static str {
        if self.is_conviction() {
            "CASE SOLVED"
        } else {
            "INSUFFICIENT EVIDENCE"
        }
    }

    /// Closing remarks for the verdict screen
    pub fn summary(&self) -> String {
        if self.is_conviction() {
            format!(
                "You gathered {} clues proving that {} is the culprit. The jury accepts your accusation.",
                self.clue_count(),
                self.accused
            )
        } else {
            format!(
                "You found only {} clue(s) against {}. At least {} are needed; the suspect walks free.",
                self.clue_count(),
                self.accused,
                CONVICTION_THRESHOLD
            )
        }
    }
}

/// Weigh the catalog against the accused
pub fn evaluate(catalog: &ClueCatalog, index: &SuspectIndex, accused: &str) -> Verdict {
    Verdict {
        accused: accused.to_string(),
        evidence: list_clues(catalog, index, accused)
            .map(str::to_string)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SuspectIndex {
        SuspectIndex::from_pairs(
            20,
            [
                ("Porta principal foi arrombada", "Mordomo James"),
                ("Faca desaparecida do bloco", "Chef Marcel"),
                ("Pegadas levam ao gazebo", "Mordomo James"),
                ("Relógio parado às 23:47", "Mordomo James"),
            ],
        )
        .expect("index")
    }

    fn catalog(clues: &[&str]) -> ClueCatalog {
        let mut catalog = ClueCatalog::new();
        for clue in clues {
            catalog.insert(clue);
        }
        catalog
    }

    #[test]
    fn empty_catalog_counts_zero() {
        assert_eq!(count_clues(&ClueCatalog::new(), &index(), "Mordomo James"), 0);
    }

    #[test]
    fn counts_exact_matches_only() {
        let catalog = catalog(&[
            "Porta principal foi arrombada",
            "Faca desaparecida do bloco",
            "Pegadas levam ao gazebo",
        ]);
        let index = index();
        assert_eq!(count_clues(&catalog, &index, "Mordomo James"), 2);
        assert_eq!(count_clues(&catalog, &index, "mordomo james"), 0);
        assert_eq!(count_clues(&catalog, &index, "Chef Marcel"), 1);
    }

    #[test]
    fn unindexed_clue_never_counts() {
        let catalog = catalog(&["Pó no tapete"]);
        assert_eq!(count_clues(&catalog, &index(), "Mordomo James"), 0);
        assert_eq!(count_clues(&catalog, &index(), ""), 0);
    }

    #[test]
    fn list_is_alphabetical() {
        let catalog = catalog(&[
            "Relógio parado às 23:47",
            "Porta principal foi arrombada",
            "Pegadas levam ao gazebo",
        ]);
        let index = index();
        let listed: Vec<&str> = list_clues(&catalog, &index, "Mordomo James").collect();
        assert_eq!(
            listed,
            vec![
                "Pegadas levam ao gazebo",
                "Porta principal foi arrombada",
                "Relógio parado às 23:47"
            ]
        );
    }

    #[test]
    fn threshold_is_two() {
        let index = index();
        let one = evaluate(&catalog(&["Pegadas levam ao gazebo"]), &index, "Mordomo James");
        assert!(!one.is_conviction());
        assert_eq!(one.headline(), "INSUFFICIENT EVIDENCE");

        let two = evaluate(
            &catalog(&["Pegadas levam ao gazebo", "Relógio parado às 23:47"]),
            &index,
            "Mordomo James",
        );
        assert!(two.is_conviction());
        assert_eq!(two.clue_count(), 2);
        assert!(two.summary().contains("Mordomo James"));
    }

    #[test]
    fn bounded_name_trims_line_ending() {
        assert_eq!(bounded_name("Chef Marcel\r\n"), "Chef Marcel");
        assert_eq!(bounded_name("  Chef Marcel"), "  Chef Marcel");
    }

    #[test]
    fn bounded_name_truncates_on_char_boundary() {
        let long = "a".repeat(80);
        assert_eq!(bounded_name(&long).len(), MAX_ACCUSED_LEN);

        // 48 ASCII bytes followed by a two-byte character straddling the limit
        let straddle = format!("{}é", "b".repeat(48));
        let bounded = bounded_name(&straddle);
        assert_eq!(bounded.len(), 48);
        assert!(bounded.chars().all(|c| c == 'b'));
    }
}
