use std::cmp::Ordering;

use order_stat::kth_by;

/// Total order for partially ordered distances.
///
/// Incomparable values (NaN) are treated as equal rather than panicking.
#[inline]
pub(crate) fn cmp_distance<D: PartialOrd>(x: &D, y: &D) -> Ordering {
    x.partial_cmp(y).unwrap_or(Ordering::Equal)
}

/// Lower median of the distances in `tagged`, in expected linear time.
///
/// Partially reorders `tagged`. Returns `None` when it is empty.
///
/// ```
/// use vptree::median_distance;
/// let mut tagged = vec![(3u32, 'a'), (1, 'b'), (2, 'c'), (5, 'd')];
/// assert_eq!(median_distance(&mut tagged), Some(2));
/// assert_eq!(median_distance::<u32, char>(&mut []), None);
/// ```
pub fn median_distance<D: PartialOrd + Copy, T>(tagged: &mut [(D, T)]) -> Option<D> {
    if tagged.is_empty() {
        return None;
    }
    let k = (tagged.len() - 1) / 2;
    let (d, _) = kth_by(tagged, k, |a, b| cmp_distance(&a.0, &b.0));
    Some(*d)
}
