use std::iter::FusedIterator;

use crate::node::Node;

/// Lazy traversal over every stored point, in no particular order.
///
/// Created by [`VPTree::iter`](crate::VPTree::iter).
pub struct Iter<'a, T, D> {
    stack: Vec<&'a Node<T, D>>,
    remaining: usize,
}

impl<'a, T, D> Iter<'a, T, D> {
    pub(crate) fn new(root: Option<&'a Node<T, D>>) -> Self {
        Iter {
            remaining: root.map_or(0, |node| node.len),
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T, D> Iterator for Iter<'a, T, D> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.stack.extend(node.far.as_deref());
        self.stack.extend(node.near.as_deref());
        self.remaining -= 1;
        Some(&node.vantage)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, D> ExactSizeIterator for Iter<'a, T, D> {}

impl<'a, T, D> FusedIterator for Iter<'a, T, D> {}
