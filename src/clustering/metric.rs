use super::histogram::Histogram;

/// the two distance metrics supported over equity histograms (spec.md §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// euclidean distance; squared distance is used internally for argmin
    /// comparisons, true distance for the triangle-inequality pruning test.
    L2,
    /// earth-mover distance on 1-D histograms: the L1 distance between
    /// cumulative distributions.
    Emd,
}

impl Metric {
    pub fn distance(&self, x: &Histogram, y: &Histogram) -> f32 {
        match self {
            Metric::L2 => l2(x, y),
            Metric::Emd => emd(x, y),
        }
    }
    /// squared distance, cheaper than `distance` when only comparisons
    /// matter (L2 argmin); for EMD this is just the square of `distance`.
    pub fn squared(&self, x: &Histogram, y: &Histogram) -> f32 {
        match self {
            Metric::L2 => l2_squared(x, y),
            Metric::Emd => emd(x, y).powi(2),
        }
    }
}

fn l2_squared(x: &Histogram, y: &Histogram) -> f32 {
    assert_eq!(x.len(), y.len());
    (0..x.len())
        .map(|i| {
            let d = x.density(i) - y.density(i);
            d * d
        })
        .sum()
}

fn l2(x: &Histogram, y: &Histogram) -> f32 {
    l2_squared(x, y).sqrt()
}

/// EMD(p, q) = Σ_i |prefix_i(p) - prefix_i(q)|, i.e. the L1 distance of the
/// cumulative distributions (spec.md §4.4).
fn emd(x: &Histogram, y: &Histogram) -> f32 {
    assert_eq!(x.len(), y.len());
    let cx = x.cdf();
    let cy = y.cdf();
    cx.iter().zip(cy.iter()).map(|(a, b)| (a - b).abs()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let h = Histogram::from_samples(&[0.1, 0.5, 0.9], 5);
        assert_eq!(Metric::L2.distance(&h, &h), 0.0);
        assert_eq!(Metric::Emd.distance(&h, &h), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = Histogram::from_samples(&[0.1, 0.2, 0.3], 5);
        let b = Histogram::from_samples(&[0.7, 0.8, 0.9], 5);
        assert!((Metric::L2.distance(&a, &b) - Metric::L2.distance(&b, &a)).abs() < 1e-6);
        assert!((Metric::Emd.distance(&a, &b) - Metric::Emd.distance(&b, &a)).abs() < 1e-6);
    }

    #[test]
    fn positive_for_distinct_histograms() {
        let a = Histogram::from_samples(&[0.05, 0.05], 5);
        let b = Histogram::from_samples(&[0.95, 0.95], 5);
        assert!(Metric::L2.distance(&a, &b) > 0.0);
        assert!(Metric::Emd.distance(&a, &b) > 0.0);
    }
}
