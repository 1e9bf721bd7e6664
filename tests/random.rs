use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vptree::{PromotionPolicy, TreeConfig, VPTree};

type Point = [f64; 3];
type Tree = VPTree<Point, fn(&Point, &Point) -> f64>;

fn euclidean(a: &Point, b: &Point) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt()
}

fn random_points(rng: &mut StdRng, n: usize) -> Vec<Point> {
    (0..n).map(|_| [rng.gen(), rng.gen(), rng.gen()]).collect()
}

fn assert_knn_exact(tree: &Tree, live: &[Point], query: &Point, k: usize) {
    let found = tree.knn(query, k);
    assert_eq!(found.len(), k.min(live.len()));
    if found.is_empty() {
        return;
    }

    let mut brute: Vec<f64> = live.iter().map(|p| euclidean(query, p)).collect();
    brute.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mut dists: Vec<f64> = found.iter().map(|&(_, d)| d).collect();
    dists.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(dists, brute[..found.len()].to_vec());
}

fn assert_within_exact(tree: &Tree, live: &[Point], query: &Point, radius: f64) {
    let mut found: Vec<Point> =
        tree.within(query, radius).unwrap().into_iter().map(|(p, _)| *p).collect();
    let mut expected: Vec<Point> =
        live.iter().copied().filter(|p| euclidean(query, p) < radius).collect();
    found.sort_by(|a, b| a.partial_cmp(b).unwrap());
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(found, expected);
}

#[test]
fn knn_and_within_against_linear_scan() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..10 {
        let points = random_points(&mut rng, 50 + round * 40);
        let metric: fn(&Point, &Point) -> f64 = euclidean;
        let config = TreeConfig::default().seed(round as u64);
        let tree = VPTree::with_config(points.clone(), metric, config);
        assert_eq!(tree.len(), points.len());

        for _ in 0..20 {
            let query: Point = [rng.gen(), rng.gen(), rng.gen()];
            let k = rng.gen_range(1..40);
            assert_knn_exact(&tree, &points, &query, k);
            assert_within_exact(&tree, &points, &query, rng.gen_range(0.0..0.6));
        }
    }
}

#[test]
fn mixed_inserts_and_removes() {
    let mut rng = StdRng::seed_from_u64(17);
    for promotion in [PromotionPolicy::Larger, PromotionPolicy::Near, PromotionPolicy::Far] {
        let mut live = random_points(&mut rng, 200);
        let metric: fn(&Point, &Point) -> f64 = euclidean;
        let config = TreeConfig::default().seed(3).promotion(promotion);
        let mut tree = VPTree::with_config(live.clone(), metric, config);
        let (mut inserts, mut removes) = (0usize, 0usize);

        for step in 0..600 {
            if rng.gen_bool(0.5) || live.is_empty() {
                let p: Point = [rng.gen(), rng.gen(), rng.gen()];
                tree.insert(p);
                live.push(p);
                inserts += 1;
            } else {
                let p = live.swap_remove(rng.gen_range(0..live.len()));
                assert!(tree.remove(&p));
                assert!(!tree.contains(&p));
                removes += 1;
            }
            assert_eq!(tree.len(), 200 + inserts - removes);
            assert_eq!(tree.iter().count(), tree.len());

            if step % 50 == 0 {
                let query: Point = [rng.gen(), rng.gen(), rng.gen()];
                assert_knn_exact(&tree, &live, &query, 7);
                assert_within_exact(&tree, &live, &query, 0.3);
            }
        }
    }
}

#[test]
fn absent_point_removal_returns_false() {
    let mut rng = StdRng::seed_from_u64(23);
    let points = random_points(&mut rng, 100);
    let metric: fn(&Point, &Point) -> f64 = euclidean;
    let mut tree = VPTree::with_metric(points, metric);

    assert!(!tree.remove(&[2.0, 2.0, 2.0]));
    assert_eq!(tree.len(), 100);
}

#[test]
fn duplicates_are_distinct_items() {
    let metric: fn(&Point, &Point) -> f64 = euclidean;
    let p = [0.5, 0.5, 0.5];
    let mut tree = VPTree::with_metric(vec![p; 5], metric);
    tree.insert(p);
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.knn(&p, 10).len(), 6);
    assert_eq!(tree.within(&p, 0.1).unwrap().len(), 6);

    for left in (0..6).rev() {
        assert!(tree.remove(&p));
        assert_eq!(tree.len(), left);
    }
    assert!(!tree.remove(&p));
}
