use std::cmp::Ordering;

use crate::vectorizer::SparseVector;

/// Number of candidates a ranking returns by default.
pub const TOP_K: usize = 10;

/// Dot product of two dimension-sorted sparse vectors. Equals cosine
/// similarity because both sides are L2-normalized by the vectorizer.
pub fn dot(a: &SparseVector, b: &SparseVector) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// Score every corpus vector against the query and keep the best `k`.
///
/// Sorted descending by score; ties keep corpus order (stable sort), so
/// identical inputs always produce identical output. Scores are clamped to
/// [0, 1] against floating-point drift. An empty corpus yields an empty
/// ranking.
pub fn rank(query: &SparseVector, corpus_vectors: &[SparseVector], k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = corpus_vectors
        .iter()
        .enumerate()
        .map(|(idx, v)| (idx, dot(query, v).clamp(0.0, 1.0)))
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_matches_on_shared_dimensions_only() {
        let a = vec![(0, 0.6), (2, 0.8)];
        let b = vec![(1, 1.0)];
        assert_eq!(dot(&a, &b), 0.0);
        let c = vec![(2, 0.5)];
        assert!((dot(&a, &c) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn rank_is_descending_and_truncated() {
        let query = vec![(0, 1.0)];
        let corpus = vec![
            vec![(0, 0.2)],
            vec![(0, 0.9)],
            vec![(0, 0.5)],
        ];
        let ranked = rank(&query, &corpus, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, 1);
        assert_eq!(ranked[1].0, 2);
        assert!(ranked[0].1 >= ranked[1].1);
    }

    #[test]
    fn ties_keep_corpus_order() {
        let query = vec![(0, 1.0)];
        let corpus = vec![vec![(0, 0.5)], vec![(0, 0.5)], vec![(0, 0.5)]];
        let ranked = rank(&query, &corpus, 10);
        let indices: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn empty_corpus_yields_empty_ranking() {
        let query = vec![(0, 1.0)];
        assert!(rank(&query, &[], TOP_K).is_empty());
    }

    #[test]
    fn zero_query_scores_everything_zero_in_corpus_order() {
        let corpus = vec![vec![(0, 1.0)], vec![(1, 1.0)]];
        let ranked = rank(&Vec::new(), &corpus, TOP_K);
        assert_eq!(ranked, vec![(0, 0.0), (1, 0.0)]);
    }
}
