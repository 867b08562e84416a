//! Distance metrics for neighbor queries.
//!
//! The clusterer is generic over a [`Metric`]; [`Euclidean`] is the default.
//! Any closure `Fn(&[f32], &[f32]) -> f32 + Sync` is also a metric, so a
//! one-off distance function does not need a named type.

/// Distance between two points in `R^d`.
///
/// A metric must return finite, non-negative values, and 0 for identical
/// points. Values that violate this abort the clustering run with
/// [`crate::Error::InvalidDistance`] at first occurrence. `Sync` because a
/// parallel neighbor scan evaluates the metric from multiple threads.
pub trait Metric: Sync {
    /// Distance between `a` and `b`.
    fn distance(&self, a: &[f32], b: &[f32]) -> f32;
}

impl<F> Metric for F
where
    F: Fn(&[f32], &[f32]) -> f32 + Sync,
{
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        self(a, b)
    }
}

/// Straight-line (L2) distance. The default metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl Metric for Euclidean {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum::<f32>()
            .sqrt()
    }
}

/// City-block (L1) distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Metric for Manhattan {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
    }
}

/// Cosine distance: `1 - cosine_similarity`.
///
/// Useful for embedding vectors where direction matters more than
/// magnitude. A pair involving a zero vector gets distance 1.0 (cosine
/// similarity is undefined there).
#[derive(Debug, Clone, Copy, Default)]
pub struct Cosine;

impl Metric for Cosine {
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;
        for (x, y) in a.iter().zip(b.iter()) {
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
        if norm_a == 0.0 || norm_b == 0.0 {
            return 1.0;
        }
        // Rounding can push the ratio slightly past 1; clamp at zero.
        (1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())).max(0.0)
    }
}
