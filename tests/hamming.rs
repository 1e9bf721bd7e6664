use std::collections::HashSet;

use vptree::{Hamming, Metric, TreeConfig, VPTree};

fn popcount_distance(a: u32, b: u32) -> u32 {
    (a ^ b).count_ones()
}

fn build(seed: u64) -> VPTree<u32> {
    VPTree::with_config((0..1000).collect(), Hamming, TreeConfig::default().seed(seed))
}

#[test]
fn knn_matches_brute_force() {
    for seed in 0..8 {
        let vp = build(seed);
        let found = vp.knn(&100, 10);
        assert_eq!(found.len(), 10);

        let mut brute: Vec<u32> = (0..1000).map(|x| popcount_distance(100, x)).collect();
        brute.sort_unstable();
        let mut dists: Vec<u32> = found.iter().map(|&(_, d)| d).collect();
        dists.sort_unstable();
        assert_eq!(dists, brute[..10].to_vec());

        // reported distances are real, and no better point was left out
        let worst = *dists.last().unwrap();
        let chosen: HashSet<u32> = found.iter().map(|&(p, _)| *p).collect();
        assert_eq!(chosen.len(), 10);
        for &(p, d) in &found {
            assert_eq!(d, popcount_distance(100, *p));
        }
        for x in (0..1000).filter(|x| !chosen.contains(x)) {
            assert!(popcount_distance(100, x) >= worst);
        }
    }
}

#[test]
fn within_matches_brute_force() {
    for seed in 0..8 {
        let vp = build(seed);
        let found: HashSet<u32> =
            vp.within(&100, 5).unwrap().into_iter().map(|(p, _)| *p).collect();
        let expected: HashSet<u32> = (0..1000).filter(|&x| popcount_distance(100, x) < 5).collect();
        assert_eq!(found, expected);
        assert!(found.contains(&100));
    }
}

#[test]
fn insert_then_remove_restores_points() {
    let mut vp = build(3);
    let before: Vec<u32> = {
        let mut v: Vec<u32> = vp.iter().copied().collect();
        v.sort_unstable();
        v
    };

    vp.insert(100);
    assert_eq!(vp.len(), 1001);
    let copies = vp.iter().filter(|&&x| x == 100).count();
    assert_eq!(copies, 2);

    assert!(vp.remove(&100));
    let mut after: Vec<u32> = vp.iter().copied().collect();
    after.sort_unstable();
    assert_eq!(after, before);
}

#[test]
fn removed_points_are_never_returned() {
    let mut vp = build(5);
    for x in [100u32, 101, 102, 104, 108, 116] {
        assert!(vp.remove(&x));
    }
    let gone: HashSet<u32> = [100u32, 101, 102, 104, 108, 116].into_iter().collect();

    assert!(vp.within(&100, 33).unwrap().iter().all(|(p, _)| !gone.contains(*p)));
    assert!(vp.knn(&100, 50).iter().all(|(p, _)| !gone.contains(*p)));
    assert_eq!(vp.len(), 994);

    vp.insert(100);
    assert_eq!(vp.nearest(&100), Some((&100, 0)));
}

#[test]
fn removing_absent_point_changes_nothing() {
    let mut vp = build(6);
    let before = vp.dump();
    assert!(!vp.remove(&5000));
    assert_eq!(vp.len(), 1000);
    assert_eq!(vp.dump(), before);
}

#[test]
fn default_metric_is_hamming() {
    let vp = VPTree::new(vec![0u64, 1, 3, 7, 15]);
    assert_eq!(Metric::<u64>::distance(vp.metric(), &0, &15), 4);
    let mut found: Vec<u64> = vp.within(&0, 2).unwrap().into_iter().map(|(p, _)| *p).collect();
    found.sort_unstable();
    assert_eq!(found, vec![0, 1]);
}
