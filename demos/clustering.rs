//! DBSCAN on a simple 2D dataset.
//!
//! Run with `RUST_LOG=debug` to see per-cluster progress.

use thicket::{Clustering, Dbscan, Manhattan};

fn main() {
    env_logger::init();

    // Three well-separated blobs in 2D, plus one outlier.
    let data: Vec<Vec<f32>> = vec![
        // Blob A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Blob B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Blob C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
        // Outlier
        vec![20.0, 20.0],
    ];

    // --- Euclidean metric (default) ---
    let dbscan = Dbscan::new(1.0, 3);
    let labels = dbscan.fit_predict(&data).unwrap();
    println!("=== DBSCAN (eps=1.0, min_neighbors=3) ===");
    for (i, label) in labels.iter().enumerate() {
        println!("  point {:2} ({:5.1}, {:5.1}) => {}", i, data[i][0], data[i][1], label);
    }

    // --- Same data, city-block metric ---
    let dbscan = Dbscan::new(1.0, 3).with_metric(Manhattan);
    let labels = dbscan.fit_predict(&data).unwrap();
    println!("\n=== DBSCAN (eps=1.0, min_neighbors=3, Manhattan) ===");
    for (i, label) in labels.iter().enumerate() {
        println!("  point {:2} ({:5.1}, {:5.1}) => {}", i, data[i][0], data[i][1], label);
    }
}
