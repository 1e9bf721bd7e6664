use log::debug;
use rand::Rng;

use crate::config::{PromotionPolicy, VantagePolicy};
use crate::median::median_distance;
use crate::metric::{Metric, Scalar};

pub(crate) type Link<T, D> = Option<Box<Node<T, D>>>;

/// Pending work for `Node::build`.
enum Build<T, D> {
    Split(Vec<T>),
    Join { vantage: T, threshold: D, len: usize },
}

/// A vantage point and the two subtrees it partitions.
///
/// Every point below `near` is within `threshold` of `vantage`; every
/// point below `far` is strictly farther.
pub(crate) struct Node<T, D> {
    pub vantage: T,
    pub threshold: D,
    pub near: Link<T, D>,
    pub far: Link<T, D>,
    /// Points stored in this subtree, this node included.
    pub len: usize,
}

impl<T, D: Scalar> Node<T, D> {
    pub fn leaf(vantage: T) -> Self {
        Node {
            vantage,
            threshold: D::zero(),
            near: None,
            far: None,
            len: 1,
        }
    }

    /// Build a subtree from `items`, splitting each level at the median
    /// distance to a vantage point chosen by `policy`.
    ///
    /// Runs on an explicit work stack: heavily duplicated input can make
    /// the tree as deep as it is large.
    pub fn build<M, R>(
        items: Vec<T>,
        metric: &M,
        policy: VantagePolicy,
        rng: &mut R,
    ) -> Link<T, D>
    where
        M: Metric<T, Distance = D>,
        R: Rng + ?Sized,
    {
        let mut tasks = vec![Build::Split(items)];
        let mut built: Vec<Link<T, D>> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Build::Split(mut items) => {
                    if items.is_empty() {
                        built.push(None);
                        continue;
                    }
                    let n = items.len();
                    let vantage = items.swap_remove(policy.pick(n, &mut *rng));

                    let mut tagged: Vec<(D, T)> = items
                        .into_iter()
                        .map(|item| (metric.distance(&vantage, &item), item))
                        .collect();

                    let threshold = match median_distance(&mut tagged) {
                        Some(mu) => mu,
                        None => {
                            built.push(Some(Box::new(Node::leaf(vantage))));
                            continue;
                        }
                    };

                    let (near, far): (Vec<_>, Vec<_>) =
                        tagged.into_iter().partition(|(d, _)| *d <= threshold);

                    // near is built first, so it sits below far on `built`
                    tasks.push(Build::Join { vantage, threshold, len: n });
                    tasks.push(Build::Split(far.into_iter().map(|(_, item)| item).collect()));
                    tasks.push(Build::Split(near.into_iter().map(|(_, item)| item).collect()));
                }
                Build::Join { vantage, threshold, len } => {
                    let far = built.pop().flatten();
                    let near = built.pop().flatten();
                    built.push(Some(Box::new(Node { vantage, threshold, near, far, len })));
                }
            }
        }
        built.pop().flatten()
    }

    /// Descend from `slot` by the partition rule and hang `item` off the
    /// first empty child.
    pub fn insert<M>(mut slot: &mut Link<T, D>, item: T, metric: &M)
    where
        M: Metric<T, Distance = D>,
    {
        while let Some(node) = slot {
            node.len += 1;
            slot = if metric.distance(&node.vantage, &item) <= node.threshold {
                &mut node.near
            } else {
                &mut node.far
            };
        }
        *slot = Some(Box::new(Node::leaf(item)));
    }

    /// Whether the descent `insert` would take for `item` meets an equal point.
    pub fn contains<M>(link: &Link<T, D>, item: &T, metric: &M) -> bool
    where
        T: PartialEq,
        M: Metric<T, Distance = D>,
    {
        let mut link = link.as_deref();
        while let Some(node) = link {
            if node.vantage == *item {
                return true;
            }
            link = if metric.distance(&node.vantage, item) <= node.threshold {
                node.near.as_deref()
            } else {
                node.far.as_deref()
            };
        }
        false
    }

    /// Remove the first node holding a point equal to `item`, following the
    /// same descent as `insert`. Returns whether a point was removed.
    pub fn remove<M>(
        mut slot: &mut Link<T, D>,
        item: &T,
        metric: &M,
        policy: PromotionPolicy,
    ) -> bool
    where
        T: PartialEq,
        M: Metric<T, Distance = D>,
    {
        // lengths along the path only change once the point is known to be there
        if !Node::contains(slot, item, metric) {
            return false;
        }

        loop {
            match slot.as_deref() {
                None => return false,
                Some(node) if node.vantage == *item => break,
                Some(_) => {}
            }
            let node = match slot.as_deref_mut() {
                Some(node) => node,
                None => return false,
            };
            node.len -= 1;
            slot = if metric.distance(&node.vantage, item) <= node.threshold {
                &mut node.near
            } else {
                &mut node.far
            };
        }

        if let Some(node) = slot.take() {
            *slot = node.splice(metric, policy);
        }
        true
    }

    /// The subtree that takes this node's place once its vantage is dropped.
    fn splice<M>(self, metric: &M, policy: PromotionPolicy) -> Link<T, D>
    where
        M: Metric<T, Distance = D>,
    {
        match (self.near, self.far) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(near), Some(far)) => {
                let promote_near = match policy {
                    PromotionPolicy::Near => true,
                    PromotionPolicy::Far => false,
                    PromotionPolicy::Larger => near.len >= far.len,
                };
                let (promoted, orphaned) = if promote_near { (near, far) } else { (far, near) };
                debug!(
                    "promoting subtree of {} points, re-inserting {} orphans",
                    promoted.len, orphaned.len
                );

                let mut slot = Some(promoted);
                for item in orphaned.into_items() {
                    Node::insert(&mut slot, item, metric);
                }
                slot
            }
        }
    }

    /// Free a subtree one node at a time instead of through nested drops.
    pub fn dismantle(link: Link<T, D>) {
        let mut stack: Vec<Box<Node<T, D>>> = link.into_iter().collect();
        while let Some(node) = stack.pop() {
            let Node { near, far, .. } = *node;
            stack.extend(near);
            stack.extend(far);
        }
    }

    /// Dismantle the subtree, yielding its points in arbitrary order.
    pub fn into_items(self: Box<Self>) -> Vec<T> {
        let mut items = Vec::with_capacity(self.len);
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            let Node { vantage, near, far, .. } = *node;
            items.push(vantage);
            stack.extend(near);
            stack.extend(far);
        }
        items
    }
}
