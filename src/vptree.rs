//! Vantage-Point Trees are a data structure for fast
//! k-nearest-neighbor and radius searches.
//!
//! Each node holds a vantage point and a threshold μ. Points within μ of
//! the vantage live in its `near` subtree, the rest in `far`. Searches use
//! the triangle inequality to skip subtrees that cannot hold a result.
use std::fmt::{self, Debug, Write};

use log::{debug, trace};
use num::PrimInt;

use crate::config::TreeConfig;
use crate::error::{Error, Result};
use crate::iter::Iter;
use crate::median::cmp_distance;
use crate::metric::{Hamming, Metric};
use crate::node::{Link, Node};
use crate::search::{self, Neighborhood};

type Dist<T, M> = <M as Metric<T>>::Distance;

/// A vantage point tree over points of type `T` under metric `M`.
///
/// Supports insertion and removal without a rebuild. Balance is only
/// guaranteed right after construction.
pub struct VPTree<T, M: Metric<T> = Hamming> {
    root: Link<T, M::Distance>,
    metric: M,
    config: TreeConfig,
}

impl<T: PrimInt> VPTree<T, Hamming> {
    /// Build a tree over integers using the Hamming distance.
    pub fn new(items: Vec<T>) -> Self {
        VPTree::with_metric(items, Hamming)
    }
}

impl<T, M: Metric<T>> VPTree<T, M> {
    /// Construct a new vantage point tree from a set of elements.
    pub fn with_metric(items: Vec<T>, metric: M) -> Self {
        VPTree::with_config(items, metric, TreeConfig::default())
    }

    pub fn with_config(items: Vec<T>, metric: M, config: TreeConfig) -> Self {
        debug!("building vp-tree over {} points ({:?})", items.len(), config);
        let mut rng = config.rng();
        let root = Node::build(items, &metric, config.vantage, &mut *rng);
        VPTree { root, metric, config }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.len)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        Node::dismantle(self.root.take());
    }

    /// Add a point below the existing nodes. Never rebalances.
    pub fn insert(&mut self, item: T) {
        Node::insert(&mut self.root, item, &self.metric);
    }

    /// Remove one stored point equal to `item`.
    ///
    /// Returns `false` if there was none. A node with two children is
    /// replaced by one of them (see [`PromotionPolicy`](crate::PromotionPolicy))
    /// and the other child's points are re-inserted.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        Node::remove(&mut self.root, item, &self.metric, self.config.promotion)
    }

    /// Whether a point equal to `item` is stored.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        Node::contains(&self.root, item, &self.metric)
    }

    /// The `k` points closest to `query`, paired with their distances.
    ///
    /// Returns `min(k, len)` pairs in no particular order.
    pub fn knn(&self, query: &T, k: usize) -> Vec<(&T, Dist<T, M>)> {
        let root = match self.root.as_deref() {
            Some(root) if k > 0 => root,
            _ => return Vec::new(),
        };
        if k >= root.len {
            return search::all(root, query, &self.metric);
        }

        let mut neighborhood = Neighborhood::new(k);
        neighborhood.search(root, query, &self.metric);
        trace!("knn: k = {}, visited {} of {} nodes", k, neighborhood.traversed, root.len);
        neighborhood.into_vec()
    }

    /// The single point closest to `query`.
    pub fn nearest(&self, query: &T) -> Option<(&T, Dist<T, M>)> {
        self.knn(query, 1).pop()
    }

    /// Every point strictly closer than `radius` to `query`, in no
    /// particular order.
    ///
    /// Fails with [`Error::InvalidArgument`] if `radius` is negative or
    /// not comparable (NaN).
    pub fn within(&self, query: &T, radius: Dist<T, M>) -> Result<Vec<(&T, Dist<T, M>)>> {
        if !(radius >= num::zero()) {
            return Err(Error::InvalidArgument(format!(
                "radius must be non-negative, got {:?}",
                radius
            )));
        }
        let mut out = Vec::new();
        if let Some(root) = self.root.as_deref() {
            search::within(root, query, radius, &self.metric, &mut out);
        }
        trace!("within: radius {:?}, {} matches", radius, out.len());
        Ok(out)
    }

    /// Iterate over all stored points in arbitrary order.
    pub fn iter(&self) -> Iter<'_, T, Dist<T, M>> {
        Iter::new(self.root.as_deref())
    }

    /// Graphviz rendering of the tree, for debugging.
    pub fn dump(&self) -> String
    where
        T: Debug,
    {
        let mut out = String::from("digraph \"vp tree.dot\" {\n");
        let mut stack: Vec<&Node<T, Dist<T, M>>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            for (child, label) in [(node.near.as_deref(), "<="), (node.far.as_deref(), ">")] {
                if let Some(child) = child {
                    // writing to a String cannot fail
                    let _ = writeln!(
                        out,
                        "\"{:?}\" -> \"{:?}\" [label=\"{} {:?}\"]",
                        node.vantage, child.vantage, label, node.threshold
                    );
                    stack.push(child);
                }
            }
        }
        out.push('}');
        out
    }
}

/// Sort search results by ascending distance.
///
/// ```
/// use vptree::{sorted_by_distance, VPTree};
/// let tree = VPTree::new(vec![0u8, 1, 3, 7]);
/// let near = sorted_by_distance(tree.knn(&0, 3));
/// assert_eq!(near.iter().map(|(_, d)| *d).collect::<Vec<_>>(), vec![0, 1, 2]);
/// ```
pub fn sorted_by_distance<T, D: PartialOrd>(mut results: Vec<(T, D)>) -> Vec<(T, D)> {
    results.sort_by(|a, b| cmp_distance(&a.1, &b.1));
    results
}

impl<T, M: Metric<T>> Drop for VPTree<T, M> {
    fn drop(&mut self) {
        // a tree fed sorted inserts can be a chain as long as the tree
        Node::dismantle(self.root.take());
    }
}

impl<T, M: Metric<T>> Extend<T> for VPTree<T, M> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T, M: Metric<T> + Default> FromIterator<T> for VPTree<T, M> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        VPTree::with_metric(iter.into_iter().collect(), M::default())
    }
}

impl<'a, T, M: Metric<T>> IntoIterator for &'a VPTree<T, M> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Dist<T, M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Debug, M: Metric<T>> Debug for VPTree<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VPTree")
            .field("len", &self.len())
            .field("root", &self.root.as_ref().map(|node| &node.vantage))
            .field("config", &self.config)
            .finish()
    }
}
