use std::collections::{HashMap, HashSet};

use crate::tokenizer::tokenize;

/// Sparse vector over vocabulary dimensions, sorted by dimension index.
pub type SparseVector = Vec<(usize, f32)>;

/// A fitted term-weighted vector space: vocabulary plus smoothed inverse
/// document frequencies. The vocabulary is fixed once fitted; terms in later
/// query text that fall outside it are silently dropped.
pub struct VectorSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl VectorSpace {
    /// Build the vocabulary and idf table from the corpus feature texts and
    /// return the fitted space along with one L2-normalized document vector
    /// per input text.
    ///
    /// `idf(t) = ln((1 + N) / (1 + df(t))) + 1`, smoothed so no term divides
    /// by zero and every observed term keeps positive weight.
    pub fn fit(corpus_texts: &[String]) -> (Self, Vec<SparseVector>) {
        let tokenized: Vec<Vec<String>> = corpus_texts.iter().map(|t| tokenize(t)).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        for tokens in &tokenized {
            let mut seen: HashSet<usize> = HashSet::new();
            for term in tokens {
                let next = vocabulary.len();
                let dim = *vocabulary.entry(term.clone()).or_insert(next);
                if dim == df.len() {
                    df.push(0);
                }
                if seen.insert(dim) {
                    df[dim] += 1;
                }
            }
        }

        let n = corpus_texts.len() as f32;
        let idf: Vec<f32> = df
            .iter()
            .map(|&df_t| ((1.0 + n) / (1.0 + df_t as f32)).ln() + 1.0)
            .collect();

        let space = Self { vocabulary, idf };
        let vectors = tokenized
            .iter()
            .map(|tokens| space.vectorize(tokens))
            .collect();
        (space, vectors)
    }

    /// Project arbitrary text into the fitted space using the same tf*idf
    /// weighting and L2 normalization. Out-of-vocabulary terms contribute
    /// nothing; text that is empty after tokenization yields the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.vectorize(&tokenize(text))
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    fn vectorize(&self, tokens: &[String]) -> SparseVector {
        let mut tf: HashMap<usize, f32> = HashMap::new();
        for term in tokens {
            if let Some(&dim) = self.vocabulary.get(term) {
                *tf.entry(dim).or_insert(0.0) += 1.0;
            }
        }
        let mut vector: SparseVector = tf
            .into_iter()
            .map(|(dim, count)| (dim, count * self.idf[dim]))
            .collect();
        let norm = vector.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in vector.iter_mut() {
                *w /= norm;
            }
        }
        vector.sort_by_key(|&(dim, _)| dim);
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fit_assigns_one_dimension_per_distinct_term() {
        let (space, vectors) = VectorSpace::fit(&texts(&[
            "Web Developer Python",
            "Data Analyst Python",
        ]));
        assert_eq!(space.vocabulary_len(), 5);
        assert_eq!(vectors.len(), 2);
    }

    #[test]
    fn document_vectors_are_l2_normalized() {
        let (_, vectors) = VectorSpace::fit(&texts(&["Web Developer Python SQL"]));
        let norm: f32 = vectors[0].iter().map(|(_, w)| w * w).sum();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn out_of_vocabulary_terms_are_dropped() {
        let (space, _) = VectorSpace::fit(&texts(&["Web Developer Python"]));
        let v = space.transform("Rust Erlang");
        assert!(v.is_empty());
        let v = space.transform("Python Rust");
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn empty_text_transforms_to_zero_vector() {
        let (space, _) = VectorSpace::fit(&texts(&["Web Developer Python"]));
        assert!(space.transform("").is_empty());
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let (space, _) = VectorSpace::fit(&texts(&[
            "python sql",
            "python excel",
            "python pandas",
        ]));
        // "python" appears in every document, "sql" in one.
        let v = space.transform("python sql");
        let weights: std::collections::HashMap<usize, f32> = v.into_iter().collect();
        assert_eq!(weights.len(), 2);
        let mut vals: Vec<f32> = weights.values().copied().collect();
        vals.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!(vals[0] < vals[1]);
    }
}
