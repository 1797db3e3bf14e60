use super::histogram::Histogram;
use super::metric::Metric;

/// k-means++ clustering over equity histograms (spec.md §4.4). seeding
/// picks centroids weighted by squared distance to the nearest already-
/// chosen centroid; the assignment/update loop runs to convergence or a
/// max-iteration cap, keeping the best-inertia result across `restarts`
/// independent runs.
pub struct KMeansArgs {
    pub k: usize,
    pub metric: Metric,
    pub max_iterations: usize,
    pub restarts: usize,
}

impl Default for KMeansArgs {
    fn default() -> Self {
        Self {
            k: 8,
            metric: Metric::Emd,
            max_iterations: 100,
            restarts: 1,
        }
    }
}

impl KMeansArgs {
    /// `K` defaulted from the street's cluster-count constant (spec.md
    /// §4.4 leaves `K` a parameter; the original per-street defaults are
    /// carried as this convenience constructor only -- callers can always
    /// override `k` directly). Panics on preflop/showdown, which aren't
    /// clustered (spec.md §4.5 "preflop ... 169 canonical classes").
    pub fn for_street(street: crate::cards::Street, metric: Metric, restarts: usize) -> Self {
        let k = street
            .default_cluster_count()
            .expect("k-means clustering only applies to flop/turn/river");
        Self {
            k,
            metric,
            max_iterations: 100,
            restarts,
        }
    }
}

pub struct Clustering {
    pub centroids: Vec<Histogram>,
    pub assignments: Vec<usize>,
    pub inertia: f32,
}

/// cluster `points` into `args.k` groups, returning the best of
/// `args.restarts` independent k-means++ runs by total inertia.
pub fn cluster(points: &[Histogram], args: &KMeansArgs, rng: &mut impl rand::Rng) -> Clustering {
    assert!(!points.is_empty(), "cannot cluster an empty point set");
    assert!(args.k >= 1 && args.k <= points.len());

    let mut best: Option<Clustering> = None;
    for _ in 0..args.restarts.max(1) {
        let run = single_run(points, args, rng);
        if best.as_ref().map(|b| run.inertia < b.inertia).unwrap_or(true) {
            best = Some(run);
        }
    }
    best.expect("at least one restart executes")
}

fn single_run(points: &[Histogram], args: &KMeansArgs, rng: &mut impl rand::Rng) -> Clustering {
    let mut centroids = seed_plus_plus(points, args.k, args.metric, rng);
    let mut assignments = vec![0usize; points.len()];

    for _ in 0..args.max_iterations {
        let mut changed = false;
        // assignment step, with a cheap triangle-inequality prune: skip
        // recomputing the distance to a centroid that cannot possibly beat
        // the current best, per the half-distance-to-nearest-neighbor bound
        // of Elkan (2003).
        let pairwise = pairwise_centroid_distances(&centroids, args.metric);
        for (i, point) in points.iter().enumerate() {
            let current = assignments[i];
            let mut best_idx = current;
            let mut best_dist = args.metric.squared(point, &centroids[current]);
            for (c, centroid) in centroids.iter().enumerate() {
                if c == current {
                    continue;
                }
                // if half the distance between the two centroids already
                // exceeds the current best, the new centroid cannot win.
                let bound = pairwise[current][c] / 2.0;
                if bound * bound >= best_dist {
                    continue;
                }
                let d = args.metric.squared(point, centroid);
                if d < best_dist {
                    best_dist = d;
                    best_idx = c;
                }
            }
            if best_idx != current {
                assignments[i] = best_idx;
                changed = true;
            }
        }

        // update step: recompute each centroid as the mean of its members.
        let mut next = Vec::with_capacity(args.k);
        for c in 0..args.k {
            let members: Vec<Histogram> = points
                .iter()
                .zip(assignments.iter())
                .filter(|(_, &a)| a == c)
                .map(|(p, _)| p.clone())
                .collect();
            next.push(if members.is_empty() {
                centroids[c].clone()
            } else {
                Histogram::mean(&members)
            });
        }
        centroids = next;

        if !changed {
            break;
        }
    }

    let inertia: f32 = points
        .iter()
        .zip(assignments.iter())
        .map(|(p, &a)| args.metric.squared(p, &centroids[a]))
        .sum();

    Clustering {
        centroids,
        assignments,
        inertia,
    }
}

/// k-means++ seeding: first centroid uniform, each subsequent centroid
/// sampled proportional to squared distance from the nearest already-chosen
/// centroid.
fn seed_plus_plus(
    points: &[Histogram],
    k: usize,
    metric: Metric,
    rng: &mut impl rand::Rng,
) -> Vec<Histogram> {
    let mut centroids = Vec::with_capacity(k);
    let first = rng.random_range(0..points.len());
    centroids.push(points[first].clone());

    while centroids.len() < k {
        let weights: Vec<f32> = points
            .iter()
            .map(|p| {
                centroids
                    .iter()
                    .map(|c| metric.squared(p, c))
                    .fold(f32::INFINITY, f32::min)
            })
            .collect();
        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            // every point coincides with an existing centroid; pad with
            // uniform picks to reach k.
            let idx = rng.random_range(0..points.len());
            centroids.push(points[idx].clone());
            continue;
        }
        let mut target = rng.random_range(0.0..total);
        let mut chosen = points.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            if target < *w {
                chosen = i;
                break;
            }
            target -= w;
        }
        centroids.push(points[chosen].clone());
    }
    centroids
}

fn pairwise_centroid_distances(centroids: &[Histogram], metric: Metric) -> Vec<Vec<f32>> {
    let k = centroids.len();
    let mut out = vec![vec![0.0; k]; k];
    for i in 0..k {
        for j in (i + 1)..k {
            let d = metric.distance(&centroids[i], &centroids[j]);
            out[i][j] = d;
            out[j][i] = d;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(p: f32) -> Histogram {
        Histogram::from_samples(&[p], 10)
    }

    #[test]
    fn separates_two_well_separated_clusters() {
        let points: Vec<Histogram> = (0..5)
            .map(|_| point(0.05))
            .chain((0..5).map(|_| point(0.95)))
            .collect();
        let args = KMeansArgs {
            k: 2,
            metric: Metric::L2,
            max_iterations: 50,
            restarts: 3,
        };
        let mut rng = rand::rng();
        let result = cluster(&points, &args, &mut rng);
        let low_cluster = result.assignments[0];
        for i in 0..5 {
            assert_eq!(result.assignments[i], low_cluster);
        }
        let high_cluster = result.assignments[5];
        assert_ne!(low_cluster, high_cluster);
        for i in 5..10 {
            assert_eq!(result.assignments[i], high_cluster);
        }
    }

    #[test]
    fn for_street_defaults_k_to_the_street_cluster_count() {
        let args = KMeansArgs::for_street(crate::cards::Street::Flop, Metric::L2, 2);
        assert_eq!(args.k, 128);
        let args = KMeansArgs::for_street(crate::cards::Street::Turn, Metric::L2, 2);
        assert_eq!(args.k, 144);
    }

    #[test]
    fn inertia_is_non_negative() {
        let points: Vec<Histogram> = (0..8).map(|i| point(i as f32 / 8.0)).collect();
        let args = KMeansArgs {
            k: 3,
            metric: Metric::Emd,
            max_iterations: 20,
            restarts: 2,
        };
        let mut rng = rand::rng();
        let result = cluster(&points, &args, &mut rng);
        assert!(result.inertia >= 0.0);
        assert_eq!(result.assignments.len(), points.len());
    }

    #[test]
    fn single_cluster_assigns_everything_together() {
        let points: Vec<Histogram> = (0..6).map(|i| point(i as f32 / 6.0)).collect();
        let args = KMeansArgs {
            k: 1,
            metric: Metric::L2,
            max_iterations: 10,
            restarts: 1,
        };
        let mut rng = rand::rng();
        let result = cluster(&points, &args, &mut rng);
        assert!(result.assignments.iter().all(|&a| a == 0));
    }
}
