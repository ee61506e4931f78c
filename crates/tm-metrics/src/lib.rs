//! `tm-metrics` - Pairwise distance and similarity metrics for tensormetrics.
//!
//! This crate provides:
//! - `pairwise_cosine_similarity` - all-pairs cosine similarity between two batches
//! - `pairwise_euclidean_distance` - all-pairs L2 distance
//! - `pairwise_linear_similarity` - all-pairs raw inner products
//! - A `Reduction` selector for collapsing the pairwise matrix per row
//! - Shared input validation with resolved option defaults
//!
//! Every function is a pure, synchronous computation: validate the batches,
//! run the kernel through a `ComputeBackend`, optionally zero the diagonal,
//! optionally reduce. No state is kept between calls.

pub mod cosine;
pub mod error;
pub mod euclidean;
pub mod linear;
pub mod reduction;
pub mod validate;

pub use cosine::pairwise_cosine_similarity;
pub use error::{MetricError, Result};
pub use euclidean::pairwise_euclidean_distance;
pub use linear::pairwise_linear_similarity;
pub use reduction::Reduction;
pub use validate::{check_input, ResolvedInput};
