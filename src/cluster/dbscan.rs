//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! DBSCAN partitions a point set by local density. A point with at least
//! `min_neighbors` points within radius `epsilon` (itself included) is a
//! *core point*. A cluster is the set of all points reachable from a core
//! point through a chain of core points; points within `epsilon` of the
//! chain but not core themselves are *border points* of that cluster, and
//! everything else is *noise*.
//!
//! Compared to k-means, DBSCAN:
//!
//! - discovers clusters of arbitrary shape (reachability follows the data,
//!   not a centroid),
//! - determines the number of clusters from the data,
//! - reports outliers as noise instead of absorbing them.
//!
//! ## Labeling convention
//!
//! Two details are easy to get wrong and are pinned by the test suite:
//!
//! - **`min_neighbors` counts the point itself.** The self-distance is 0,
//!   so every point appears in its own neighborhood; a point is core when
//!   `min_neighbors - 1` *other* points lie within `epsilon`. With
//!   `min_neighbors = 1` every point is core and nothing is noise.
//! - **Noise is tentative, border status is not transitive.** A point
//!   classified as noise may later be reached by a cluster expansion and
//!   promoted to a border point of that cluster. Border points are only
//!   labeled, never expanded: they were already found to be non-core, so
//!   membership does not propagate through them.
//!
//! `epsilon = 0` is valid and clusters exact duplicates.
//!
//! ## Complexity
//!
//! The neighbor query is a brute-force scan, so a run is O(n²) distance
//! evaluations with O(n) extra space for labels. [`Dbscan::with_parallel`]
//! spreads each scan across threads without changing the result.
//!
//! ## Observability
//!
//! Progress is reported through the `log` facade: one `debug!` line per
//! seeded cluster and a summary at the end, `trace!` for per-point
//! classification. Logging has no effect on results.
//!
//! ## References
//!
//! Ester, M., Kriegel, H.-P., Sander, J., Xu, X. (1996). "A Density-Based
//! Algorithm for Discovering Clusters in Large Spatial Databases with
//! Noise." KDD-96.

use std::collections::VecDeque;

use log::{debug, trace};
use rayon::prelude::*;

use super::distance::{Euclidean, Metric};
use super::label::Label;
use super::traits::Clustering;
use crate::error::{Error, Result};

/// DBSCAN clustering algorithm.
///
/// Generic over the distance [`Metric`]; defaults to [`Euclidean`]. Built
/// with [`Dbscan::new`] plus the `with_*` methods, run via
/// [`Clustering::fit_predict`].
///
/// # Choosing parameters
///
/// - `epsilon`: often read off a k-distance plot (k = `min_neighbors - 1`).
/// - `min_neighbors`: `2 * dimension` is a common heuristic; values below 3
///   make every pair of nearby points a cluster.
#[derive(Debug, Clone)]
pub struct Dbscan<M = Euclidean> {
    /// Neighborhood radius.
    epsilon: f32,
    /// Core-point threshold, counting the point itself.
    min_neighbors: usize,
    /// Distance metric.
    metric: M,
    /// Evaluate neighbor scans with rayon.
    parallel: bool,
}

impl Dbscan<Euclidean> {
    /// Create a new DBSCAN clusterer with the Euclidean metric.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Maximum distance between two points to be neighbors.
    /// * `min_neighbors` - Neighbors (including the point itself) required
    ///   for a point to be core.
    pub fn new(epsilon: f32, min_neighbors: usize) -> Self {
        Self {
            epsilon,
            min_neighbors,
            metric: Euclidean,
            parallel: false,
        }
    }
}

impl Default for Dbscan<Euclidean> {
    fn default() -> Self {
        Self::new(0.5, 5)
    }
}

impl<M> Dbscan<M> {
    /// Set epsilon (neighborhood radius).
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the core-point threshold (counting the point itself).
    pub fn with_min_neighbors(mut self, min_neighbors: usize) -> Self {
        self.min_neighbors = min_neighbors;
        self
    }

    /// Evaluate each neighbor scan across threads.
    ///
    /// The point set is read-only during a run and all label writes stay on
    /// the calling thread, so the labels are identical to a serial run.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replace the distance metric.
    ///
    /// Accepts any [`Metric`], including a closure:
    ///
    /// ```rust
    /// use thicket::{Clustering, Dbscan};
    ///
    /// let data = vec![vec![0.0, 0.0], vec![0.4, 3.0]];
    /// // Cluster on the first coordinate only.
    /// let labels = Dbscan::new(0.5, 2)
    ///     .with_metric(|a: &[f32], b: &[f32]| (a[0] - b[0]).abs())
    ///     .fit_predict(&data)
    ///     .unwrap();
    /// assert_eq!(labels[0], labels[1]);
    /// ```
    pub fn with_metric<N: Metric>(self, metric: N) -> Dbscan<N> {
        Dbscan {
            epsilon: self.epsilon,
            min_neighbors: self.min_neighbors,
            metric,
            parallel: self.parallel,
        }
    }
}

impl<M: Metric> Dbscan<M> {
    fn validate(&self, data: &[Vec<f32>]) -> Result<()> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: "must be finite and non-negative",
            });
        }

        if self.min_neighbors == 0 {
            return Err(Error::InvalidParameter {
                name: "min_neighbors",
                message: "must be at least 1",
            });
        }

        let dim = data[0].len();
        for (index, point) in data.iter().enumerate() {
            if point.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: point.len(),
                });
            }
            if point.iter().any(|c| !c.is_finite()) {
                return Err(Error::NonFiniteCoordinate { index });
            }
        }

        Ok(())
    }

    /// Find all points within epsilon of `origin`, the origin included
    /// (self-distance is 0).
    fn region_query(&self, data: &[Vec<f32>], origin: usize) -> Result<Vec<usize>> {
        let point = &data[origin];

        let hit = |(idx, other): (usize, &Vec<f32>)| -> Result<Option<usize>> {
            let d = self.metric.distance(point, other);
            if !d.is_finite() || d < 0.0 {
                return Err(Error::InvalidDistance {
                    a: origin,
                    b: idx,
                    value: d,
                });
            }
            Ok((d <= self.epsilon).then_some(idx))
        };

        let hits: Vec<Option<usize>> = if self.parallel {
            data.par_iter().enumerate().map(hit).collect::<Result<_>>()?
        } else {
            data.iter().enumerate().map(hit).collect::<Result<_>>()?
        };

        Ok(hits.into_iter().flatten().collect())
    }

    /// Label everything reachable from a freshly seeded core point.
    ///
    /// `seeds` is the neighbor set of the seed, which is already labeled
    /// `Cluster(cluster_id)`. FIFO expansion over the implicit neighbor
    /// graph; the label array doubles as the visited set, so duplicate
    /// queue entries are harmless no-ops.
    fn expand_cluster(
        &self,
        data: &[Vec<f32>],
        seeds: Vec<usize>,
        labels: &mut [Label],
        cluster_id: usize,
    ) -> Result<()> {
        let mut queue: VecDeque<usize> = seeds.into();

        while let Some(q) = queue.pop_front() {
            match labels[q] {
                // Already settled (this cluster or an earlier one).
                Label::Cluster(_) => continue,
                // A previously scanned non-core point: promote it to a
                // border point of this cluster. Borders never expand.
                Label::Noise => {
                    trace!("point {} promoted from noise to cluster {}", q, cluster_id);
                    labels[q] = Label::Cluster(cluster_id);
                }
                Label::Unlabeled => {
                    labels[q] = Label::Cluster(cluster_id);
                    let neighbors = self.region_query(data, q)?;
                    if neighbors.len() >= self.min_neighbors {
                        // q is core: everything around it joins the cluster.
                        queue.extend(neighbors);
                    }
                }
            }
        }

        Ok(())
    }
}

impl<M: Metric> Clustering for Dbscan<M> {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<Label>> {
        self.validate(data)?;

        let n = data.len();
        let mut labels = vec![Label::Unlabeled; n];
        let mut next_cluster = 1usize;

        for i in 0..n {
            if !labels[i].is_unlabeled() {
                continue;
            }

            let neighbors = self.region_query(data, i)?;

            if neighbors.len() < self.min_neighbors {
                // Tentative: a later expansion may promote this point to a
                // border of some cluster.
                trace!(
                    "point {} has {} of {} required neighbors, marking noise",
                    i,
                    neighbors.len(),
                    self.min_neighbors
                );
                labels[i] = Label::Noise;
                continue;
            }

            debug!(
                "cluster {} seeded at point {} ({} neighbors)",
                next_cluster,
                i,
                neighbors.len()
            );
            labels[i] = Label::Cluster(next_cluster);
            self.expand_cluster(data, neighbors, &mut labels, next_cluster)?;
            next_cluster += 1;
        }

        debug!(
            "clustering finished: {} clusters, {} noise points out of {}",
            next_cluster - 1,
            labels.iter().filter(|l| l.is_noise()).count(),
            n
        );

        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::distance::Manhattan;

    #[test]
    fn test_two_separated_squares() {
        let data = vec![
            // Unit square at the origin
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            // Unit square at (10, 10)
            vec![10.0, 10.0],
            vec![10.0, 11.0],
            vec![11.0, 10.0],
            vec![11.0, 11.0],
        ];

        let labels = Dbscan::new(1.5, 3).fit_predict(&data).unwrap();

        assert_eq!(labels.len(), 8);
        for label in &labels[0..4] {
            assert_eq!(*label, Label::Cluster(1));
        }
        for label in &labels[4..8] {
            assert_eq!(*label, Label::Cluster(2));
        }
    }

    #[test]
    fn test_chain_with_outlier() {
        let data = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![2.0, 0.0],
            vec![3.0, 0.0],
            vec![100.0, 100.0],
        ];

        let labels = Dbscan::new(1.5, 2).fit_predict(&data).unwrap();

        for label in &labels[0..4] {
            assert_eq!(*label, Label::Cluster(1));
        }
        assert_eq!(labels[4], Label::Noise);
    }

    #[test]
    fn test_single_point_is_its_own_cluster() {
        // The point is its own neighbor, so with min_neighbors = 1 it is
        // core even at epsilon = 0.
        let data = vec![vec![2.0, 3.0]];
        let labels = Dbscan::new(0.0, 1).fit_predict(&data).unwrap();
        assert_eq!(labels, vec![Label::Cluster(1)]);
    }

    #[test]
    fn test_duplicates_cluster_at_epsilon_zero() {
        let data = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![5.0, 5.0]];
        let labels = Dbscan::new(0.0, 2).fit_predict(&data).unwrap();
        assert_eq!(labels[0], Label::Cluster(1));
        assert_eq!(labels[1], Label::Cluster(1));
        assert_eq!(labels[2], Label::Noise);
    }

    #[test]
    fn test_all_noise() {
        let data = vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![0.0, 10.0],
            vec![10.0, 10.0],
        ];

        let labels = Dbscan::new(0.5, 2).fit_predict(&data).unwrap();
        for label in labels {
            assert_eq!(label, Label::Noise);
        }
    }

    #[test]
    fn test_noise_promoted_to_border() {
        // Point 0 is scanned first and found non-core (2 of 3 required
        // neighbors), so it is tentatively noise. The cluster seeded at
        // point 1 then reaches it and promotes it to a border point.
        let data = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![2.0, 0.0],
            vec![3.0, 0.0],
        ];

        let labels = Dbscan::new(1.1, 3).fit_predict(&data).unwrap();
        for label in labels {
            assert_eq!(label, Label::Cluster(1));
        }
    }

    #[test]
    fn test_chain_connects_into_one_cluster() {
        let data: Vec<Vec<f32>> = (0..10).map(|i| vec![i as f32 * 0.3, 0.0]).collect();

        let labels = Dbscan::new(0.5, 2).fit_predict(&data).unwrap();
        for label in labels {
            assert_eq!(label, Label::Cluster(1));
        }
    }

    #[test]
    fn test_concentric_rings() {
        // Two rings around the origin, radius 5 and 10. Adjacent points on
        // a ring are ~1.96 apart, the rings are 5 apart, so at epsilon 2.5
        // each ring is one connected cluster and the rings never merge.
        // Recovering these requires following density, not centroids.
        let mut data: Vec<Vec<f32>> = Vec::new();
        for i in 0..16 {
            let angle = i as f32 * std::f32::consts::TAU / 16.0;
            data.push(vec![5.0 * angle.cos(), 5.0 * angle.sin()]);
        }
        for i in 0..32 {
            let angle = i as f32 * std::f32::consts::TAU / 32.0;
            data.push(vec![10.0 * angle.cos(), 10.0 * angle.sin()]);
        }

        let labels = Dbscan::new(2.5, 3).fit_predict(&data).unwrap();

        for label in &labels[0..16] {
            assert_eq!(*label, Label::Cluster(1));
        }
        for label in &labels[16..48] {
            assert_eq!(*label, Label::Cluster(2));
        }
    }

    #[test]
    fn test_metric_changes_the_outcome() {
        // (0,0) and (1,1) are ~1.41 apart in L2 but 2.0 in L1.
        let data = vec![vec![0.0, 0.0], vec![1.0, 1.0]];

        let euclidean = Dbscan::new(1.5, 2).fit_predict(&data).unwrap();
        assert_eq!(euclidean, vec![Label::Cluster(1), Label::Cluster(1)]);

        let manhattan = Dbscan::new(1.5, 2)
            .with_metric(Manhattan)
            .fit_predict(&data)
            .unwrap();
        assert_eq!(manhattan, vec![Label::Noise, Label::Noise]);
    }

    #[test]
    fn test_closure_metric() {
        // Distance on the first coordinate only: the large y gap is ignored.
        let data = vec![vec![0.0, 0.0], vec![0.5, 100.0]];
        let labels = Dbscan::new(1.0, 2)
            .with_metric(|a: &[f32], b: &[f32]| (a[0] - b[0]).abs())
            .fit_predict(&data)
            .unwrap();
        assert_eq!(labels, vec![Label::Cluster(1), Label::Cluster(1)]);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let data = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![2.0, 0.0],
            vec![3.0, 0.0],
            vec![100.0, 100.0],
            vec![10.0, 10.0],
            vec![10.0, 11.0],
            vec![11.0, 10.0],
        ];

        let serial = Dbscan::new(1.5, 2).fit_predict(&data).unwrap();
        let parallel = Dbscan::new(1.5, 2)
            .with_parallel(true)
            .fit_predict(&data)
            .unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_empty_input() {
        let data: Vec<Vec<f32>> = vec![];
        let result = Dbscan::new(0.5, 3).fit_predict(&data);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_invalid_params() {
        let data = vec![vec![0.0, 0.0]];

        let result = Dbscan::new(-1.0, 3).fit_predict(&data);
        assert!(matches!(
            result,
            Err(Error::InvalidParameter { name: "epsilon", .. })
        ));

        let result = Dbscan::new(f32::NAN, 3).fit_predict(&data);
        assert!(matches!(
            result,
            Err(Error::InvalidParameter { name: "epsilon", .. })
        ));

        let result = Dbscan::new(0.5, 0).fit_predict(&data);
        assert!(matches!(
            result,
            Err(Error::InvalidParameter {
                name: "min_neighbors",
                ..
            })
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let data = vec![vec![0.0, 0.0], vec![0.0, 0.0, 0.0]];
        let result = Dbscan::new(0.5, 2).fit_predict(&data);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_non_finite_coordinate() {
        let data = vec![vec![0.0, 0.0], vec![f32::NAN, 1.0]];
        let result = Dbscan::new(0.5, 2).fit_predict(&data);
        assert!(matches!(
            result,
            Err(Error::NonFiniteCoordinate { index: 1 })
        ));
    }

    #[test]
    fn test_bad_metric_aborts_the_run() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 0.0]];

        let result = Dbscan::new(0.5, 2)
            .with_metric(|_: &[f32], _: &[f32]| -1.0f32)
            .fit_predict(&data);
        assert!(matches!(result, Err(Error::InvalidDistance { .. })));

        let result = Dbscan::new(0.5, 2)
            .with_metric(|_: &[f32], _: &[f32]| f32::NAN)
            .fit_predict(&data);
        assert!(matches!(result, Err(Error::InvalidDistance { .. })));
    }

    #[test]
    fn test_deterministic() {
        let data = vec![
            vec![0.0, 0.0],
            vec![0.3, 0.1],
            vec![0.1, 0.3],
            vec![7.0, 7.0],
            vec![7.2, 7.1],
            vec![3.5, 3.5],
        ];

        let model = Dbscan::new(0.6, 2);
        let first = model.fit_predict(&data).unwrap();
        let second = model.fit_predict(&data).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_integer_encoding_of_labels() {
        let data = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![50.0, 50.0],
            vec![50.1, 50.0],
            vec![25.0, 0.0],
        ];

        let labels = Dbscan::new(0.5, 2).fit_predict(&data).unwrap();
        let encoded: Vec<i64> = labels.iter().map(|l| l.as_i64()).collect();
        assert_eq!(encoded, vec![1, 1, 2, 2, -1]);
    }
}
