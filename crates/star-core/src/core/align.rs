//! Minimal global pairwise alignment.
//!
//! One Needleman-Wunsch routine serves both consumers in this crate: aligning
//! a companion NMR polymer sequence against the coordinate sequence (residue
//! granularity), and the capped character-level fallback of the atom-name
//! translator.

/// One aligned position: indices into the two input sequences, `None` on the
/// side that received a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPair {
    pub a: Option<usize>,
    pub b: Option<usize>,
}

/// Result of a global alignment of two token sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub pairs: Vec<AlignedPair>,
    pub score: i32,
    /// Aligned positions whose tokens differ.
    pub conflict: usize,
    /// Positions of sequence `a` aligned against a gap.
    pub unmapped: usize,
}

const MATCH_SCORE: i32 = 2;
const MISMATCH_SCORE: i32 = -1;
const GAP_SCORE: i32 = -1;

/// Global alignment of `a` against `b` with linear gap cost.
pub fn align<T: PartialEq>(a: &[T], b: &[T]) -> Alignment {
    let rows = a.len() + 1;
    let cols = b.len() + 1;
    let mut score = vec![0i32; rows * cols];
    for i in 1..rows {
        score[i * cols] = i as i32 * GAP_SCORE;
    }
    for j in 1..cols {
        score[j] = j as i32 * GAP_SCORE;
    }
    for i in 1..rows {
        for j in 1..cols {
            let diag = score[(i - 1) * cols + (j - 1)]
                + if a[i - 1] == b[j - 1] {
                    MATCH_SCORE
                } else {
                    MISMATCH_SCORE
                };
            let up = score[(i - 1) * cols + j] + GAP_SCORE;
            let left = score[i * cols + (j - 1)] + GAP_SCORE;
            score[i * cols + j] = diag.max(up).max(left);
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (a.len(), b.len());
    while i > 0 || j > 0 {
        let current = score[i * cols + j];
        if i > 0
            && j > 0
            && current
                == score[(i - 1) * cols + (j - 1)]
                    + if a[i - 1] == b[j - 1] {
                        MATCH_SCORE
                    } else {
                        MISMATCH_SCORE
                    }
        {
            pairs.push(AlignedPair {
                a: Some(i - 1),
                b: Some(j - 1),
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && current == score[(i - 1) * cols + j] + GAP_SCORE {
            pairs.push(AlignedPair {
                a: Some(i - 1),
                b: None,
            });
            i -= 1;
        } else {
            pairs.push(AlignedPair {
                a: None,
                b: Some(j - 1),
            });
            j -= 1;
        }
    }
    pairs.reverse();

    let conflict = pairs
        .iter()
        .filter(|p| match (p.a, p.b) {
            (Some(ai), Some(bi)) => a[ai] != b[bi],
            _ => false,
        })
        .count();
    let unmapped = pairs.iter().filter(|p| p.a.is_some() && p.b.is_none()).count();

    Alignment {
        score: score[a.len() * cols + b.len()],
        pairs,
        conflict,
        unmapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_sequences_align_without_conflict() {
        let a = ["ALA", "GLY", "SER"];
        let result = align(&a, &a);
        assert_eq!(result.conflict, 0);
        assert_eq!(result.unmapped, 0);
        assert_eq!(result.score, 6);
    }

    #[test]
    fn extra_leading_residues_are_unmapped_not_conflicting() {
        let nmr = ["MET", "GLY", "ALA", "GLY"];
        let coord = ["ALA", "GLY"];
        let result = align(&nmr, &coord);
        assert_eq!(result.conflict, 0);
        assert_eq!(result.unmapped, 2);
    }

    #[test]
    fn substitution_counts_as_conflict() {
        let a = ["ALA", "GLY"];
        let b = ["ALA", "SER"];
        let result = align(&a, &b);
        assert_eq!(result.conflict, 1);
    }

    #[test]
    fn character_alignment_scores_shared_prefix() {
        let a: Vec<char> = "HG12".chars().collect();
        let b: Vec<char> = "HG1".chars().collect();
        let result = align(&a, &b);
        assert!(result.score >= 2);
    }
}
