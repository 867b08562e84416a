//! Density-based clustering for dense vectors.
//!
//! `thicket` is a small library implementing DBSCAN: given a neighborhood
//! radius and a minimum-neighbor count, it partitions a point set into
//! clusters plus noise, without knowing the number of clusters in advance.
//!
//! The primary public API is under [`cluster`], which provides:
//! - [`cluster::Dbscan`], the clusterer itself
//! - [`cluster::Label`], the per-point result (noise or a cluster id)
//! - [`cluster::Metric`] and the built-in distance metrics

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{Clustering, Cosine, Dbscan, Euclidean, Label, Manhattan, Metric};
pub use error::{Error, Result};
