use crate::error::IndexError;
use crate::norm::{inner_product, l2_normalize};

/// One search result: a singer and their cosine similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityHit {
    pub singer_id: String,
    /// Cosine similarity in `[-1, 1]` (inner product of unit vectors).
    pub score: f32,
}

/// An immutable brute-force inner-product index over singer centroids.
///
/// Built once from the catalog; centroids are L2-normalized on the way in.
/// Search is an exact linear scan.
#[derive(Debug)]
pub struct SimilarityIndex {
    dim: usize,
    ids: Vec<String>,
    centroids: Vec<Vec<f32>>,
}

impl SimilarityIndex {
    /// Builds an index from `(singer_id, centroid)` pairs.
    ///
    /// Every centroid must have dimensionality `dim`. Centroids are
    /// normalized here, so callers may pass raw mean embeddings.
    pub fn build(dim: usize, entries: Vec<(String, Vec<f32>)>) -> Result<Self, IndexError> {
        if entries.is_empty() {
            return Err(IndexError::Empty);
        }
        let mut ids = Vec::with_capacity(entries.len());
        let mut centroids = Vec::with_capacity(entries.len());
        for (id, mut centroid) in entries {
            if centroid.len() != dim {
                return Err(IndexError::DimensionMismatch {
                    expected: dim,
                    got: centroid.len(),
                });
            }
            l2_normalize(&mut centroid);
            ids.push(id);
            centroids.push(centroid);
        }
        Ok(Self {
            dim,
            ids,
            centroids,
        })
    }

    /// The dimensionality the index was built with.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of indexed singers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns up to `k` nearest singers to `query`, best first.
    ///
    /// `query` must already be unit-normalized for scores to be cosine
    /// similarities. Ties break on ascending singer id so results are
    /// stable across runs. Never pads: fewer than `k` entries means fewer
    /// than `k` hits.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SimilarityHit>, IndexError> {
        if query.len() != self.dim {
            return Err(IndexError::DimensionMismatch {
                expected: self.dim,
                got: query.len(),
            });
        }
        if k == 0 {
            return Ok(vec![]);
        }

        let mut hits: Vec<SimilarityHit> = self
            .ids
            .iter()
            .zip(self.centroids.iter())
            .map(|(id, centroid)| SimilarityHit {
                singer_id: id.clone(),
                score: inner_product(query, centroid),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.singer_id.cmp(&b.singer_id))
        });
        hits.truncate(k);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes_index() -> SimilarityIndex {
        SimilarityIndex::build(
            3,
            vec![
                ("x".into(), vec![1.0, 0.0, 0.0]),
                ("y".into(), vec![0.0, 1.0, 0.0]),
                ("z".into(), vec![0.0, 0.0, 1.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_search_ranks_by_similarity() {
        let idx = axes_index();
        let hits = idx.search(&[0.9, 0.435, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].singer_id, "x");
        assert_eq!(hits[1].singer_id, "y");
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn test_build_normalizes_centroids() {
        // Same direction, wildly different magnitudes; scores must match.
        let idx = SimilarityIndex::build(
            2,
            vec![
                ("a".into(), vec![100.0, 0.0]),
                ("b".into(), vec![0.001, 0.0]),
            ],
        )
        .unwrap();
        let hits = idx.search(&[1.0, 0.0], 2).unwrap();
        assert!((hits[0].score - hits[1].score).abs() < 1e-6);
    }

    #[test]
    fn test_tie_breaks_on_id() {
        let idx = SimilarityIndex::build(
            2,
            vec![
                ("beta".into(), vec![1.0, 0.0]),
                ("alpha".into(), vec![1.0, 0.0]),
            ],
        )
        .unwrap();
        let hits = idx.search(&[1.0, 0.0], 2).unwrap();
        assert_eq!(hits[0].singer_id, "alpha");
        assert_eq!(hits[1].singer_id, "beta");
    }

    #[test]
    fn test_fewer_entries_than_k() {
        let idx = axes_index();
        let hits = idx.search(&[1.0, 0.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_k_zero() {
        let idx = axes_index();
        assert!(idx.search(&[1.0, 0.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_build_empty() {
        assert_eq!(
            SimilarityIndex::build(3, vec![]).unwrap_err(),
            IndexError::Empty
        );
    }

    #[test]
    fn test_build_dimension_mismatch() {
        let err = SimilarityIndex::build(3, vec![("a".into(), vec![1.0, 0.0])]).unwrap_err();
        assert_eq!(
            err,
            IndexError::DimensionMismatch {
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn test_search_dimension_mismatch() {
        let idx = axes_index();
        let err = idx.search(&[1.0, 0.0], 1).unwrap_err();
        assert_eq!(
            err,
            IndexError::DimensionMismatch {
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn test_search_deterministic() {
        let idx = axes_index();
        let query = [0.6, 0.48, 0.64];
        let a = idx.search(&query, 3).unwrap();
        let b = idx.search(&query, 3).unwrap();
        assert_eq!(a, b);
    }
}
