//! Pruned traversals shared by the k-nearest-neighbor and radius searches.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::median::cmp_distance;
use crate::metric::{Metric, Scalar};
use crate::node::Node;

/// A candidate in the k-NN heap; the heap top is the worst admitted one.
struct HeapElem<'a, T, D> {
    dist: D,
    item: &'a T,
}

impl<'a, T, D: PartialOrd> PartialEq for HeapElem<'a, T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<'a, T, D: PartialOrd> Eq for HeapElem<'a, T, D> {}

impl<'a, T, D: PartialOrd> PartialOrd for HeapElem<'a, T, D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, T, D: PartialOrd> Ord for HeapElem<'a, T, D> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_distance(&self.dist, &other.dist)
    }
}

/// `a - b`, saturating at zero so unsigned distances never underflow.
///
/// By the triangle inequality this is a lower bound on the distance from
/// the query to any point on the far side of a threshold.
#[inline]
fn gap<D: Scalar>(a: D, b: D) -> D {
    if a > b {
        a - b
    } else {
        D::zero()
    }
}

/// Bounded collection of the `k` closest points seen so far.
pub(crate) struct Neighborhood<'a, T, D> {
    k: usize,
    heap: BinaryHeap<HeapElem<'a, T, D>>,
    pub traversed: usize,
}

impl<'a, T, D: Scalar> Neighborhood<'a, T, D> {
    pub fn new(k: usize) -> Self {
        Neighborhood {
            k,
            heap: BinaryHeap::with_capacity(k),
            traversed: 0,
        }
    }

    /// Distance of the worst admitted candidate, once `k` are held.
    fn worst(&self) -> Option<D> {
        if self.heap.len() < self.k {
            return None;
        }
        self.heap.peek().map(|elem| elem.dist)
    }

    fn consider(&mut self, dist: D, item: &'a T) {
        if self.heap.len() < self.k {
            self.heap.push(HeapElem { dist, item });
        } else if self.worst().map_or(false, |worst| dist < worst) {
            self.heap.pop();
            self.heap.push(HeapElem { dist, item });
        }
    }

    /// Push the nearest neighbors in the subtree at `root`, replacing
    /// further-away elements as necessary.
    ///
    /// Each pending subtree carries a lower bound on its distance to the
    /// query; it is only skipped when popped, once `worst` is as tight as
    /// the subtrees visited before it made it.
    pub fn search<M>(&mut self, root: &'a Node<T, D>, query: &T, metric: &M)
    where
        M: Metric<T, Distance = D>,
    {
        let mut pending = vec![(root, D::zero())];
        while let Some((node, bound)) = pending.pop() {
            if self.worst().map_or(false, |worst| bound > worst) {
                continue;
            }
            self.traversed += 1;
            let d = metric.distance(query, &node.vantage);
            let mu = node.threshold;
            self.consider(d, &node.vantage);

            let near = node.near.as_deref().map(|child| (child, gap(d, mu)));
            let far = node.far.as_deref().map(|child| (child, gap(mu, d)));
            // the side the query falls on is pushed last, so it is visited first
            if d > mu {
                pending.extend(near);
                pending.extend(far);
            } else {
                pending.extend(far);
                pending.extend(near);
            }
        }
    }

    pub fn into_vec(self) -> Vec<(&'a T, D)> {
        self.heap.into_iter().map(|elem| (elem.item, elem.dist)).collect()
    }
}

/// Collect every point in the subtree at `root` strictly closer than
/// `radius` to `query`.
pub(crate) fn within<'a, T, D, M>(
    root: &'a Node<T, D>,
    query: &T,
    radius: D,
    metric: &M,
    out: &mut Vec<(&'a T, D)>,
) where
    D: Scalar,
    M: Metric<T, Distance = D>,
{
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        let d = metric.distance(query, &node.vantage);
        let mu = node.threshold;
        if d < radius {
            out.push((&node.vantage, d));
        }
        if let Some(near) = node.near.as_deref() {
            if gap(d, mu) < radius {
                pending.push(near);
            }
        }
        if let Some(far) = node.far.as_deref() {
            if gap(mu, d) < radius {
                pending.push(far);
            }
        }
    }
}

/// Every point in the subtree paired with its distance to `query`.
pub(crate) fn all<'a, T, D, M>(node: &'a Node<T, D>, query: &T, metric: &M) -> Vec<(&'a T, D)>
where
    D: Scalar,
    M: Metric<T, Distance = D>,
{
    let mut out = Vec::with_capacity(node.len);
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        out.push((&node.vantage, metric.distance(query, &node.vantage)));
        stack.extend(node.near.as_deref());
        stack.extend(node.far.as_deref());
    }
    out
}
