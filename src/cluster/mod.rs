//! Density-based clustering of dense vectors.
//!
//! The single algorithm in this module is DBSCAN, which groups points by
//! local density rather than by distance to a centroid.
//!
//! ## Why density-based?
//!
//! Centroid methods (k-means and friends) assume roughly spherical clusters
//! and need the cluster count up front. Density clustering makes neither
//! assumption:
//!
//! - clusters may have arbitrary, non-convex shapes (rings, filaments),
//! - the number of clusters falls out of the data,
//! - points that belong nowhere are reported as noise instead of being
//!   forced into the nearest group.
//!
//! The trade-off is two parameters to choose: the neighborhood radius
//! `epsilon` and the core-point threshold `min_neighbors`. Both are
//! dataset-dependent; see the notes on [`Dbscan`].
//!
//! ## Usage
//!
//! ```rust
//! use thicket::cluster::{Clustering, Dbscan, Label};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//!     vec![50.0, 50.0],
//! ];
//!
//! let labels = Dbscan::new(0.5, 2).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]); // first pair clusters together
//! assert_ne!(labels[0], labels[2]); // second pair is a separate cluster
//! assert_eq!(labels[4], Label::Noise); // the stray point is noise
//! ```

mod dbscan;
mod distance;
mod label;
mod traits;

pub use dbscan::Dbscan;
pub use distance::{Cosine, Euclidean, Manhattan, Metric};
pub use label::Label;
pub use traits::Clustering;
