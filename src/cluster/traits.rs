use crate::cluster::Label;
use crate::error::Result;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model (if needed) and return one [`Label`] per input point.
    ///
    /// The returned vector is indexed identically to `data`.
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<Label>>;
}
