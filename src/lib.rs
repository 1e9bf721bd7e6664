//! Vantage-Point Trees for k-nearest-neighbor and radius searches in
//! arbitrary metric spaces.
//!
//! Points are opaque; the tree only needs a distance between two of
//! them. Unlike a static VP-tree, this one supports single-point
//! insertion and removal without rebuilding.
//!
//! ```
//! use vptree::VPTree;
//!
//! // integers under the Hamming (popcount of xor) metric
//! let mut tree = VPTree::new((0u32..1000).collect());
//! let near = tree.knn(&100, 10);
//! assert_eq!(near.len(), 10);
//!
//! tree.insert(5000);
//! assert!(tree.remove(&5000));
//! assert!(!tree.remove(&5000));
//! ```

pub mod config;
pub mod error;
pub mod iter;
pub mod median;
pub mod metric;
mod node;
mod search;
pub mod vptree;

pub use config::{PromotionPolicy, TreeConfig, VantagePolicy};
pub use error::{Error, Result};
pub use iter::Iter;
pub use median::median_distance;
pub use metric::{Hamming, Metric, Scalar};
pub use vptree::{sorted_by_distance, VPTree};
