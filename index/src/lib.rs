//! Similarity search over singer voice centroids.
//!
//! A small, immutable, brute-force inner-product index. Centroids are
//! L2-normalized at build time, so inner product equals cosine similarity
//! and scores land in `[-1, 1]`. Sized for catalogs of hundreds of singers;
//! exact scan beats any approximate structure at that scale.

pub mod error;
pub mod index;
pub mod norm;

pub use error::IndexError;
pub use index::{SimilarityHit, SimilarityIndex};
pub use norm::{inner_product, l2_normalize, score_percent};
