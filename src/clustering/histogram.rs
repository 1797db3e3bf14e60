use crate::Probability;

/// a distribution over equity, binned into `d` equal-width buckets on
/// `[0, 1]`. this is the per-hand feature vector `X[n][d]` that the
/// k-means clusterer groups (spec.md §4.4); `d` is the number of opponent
/// equity samples folded into the histogram, typically in `1..=30`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    weights: Vec<Probability>,
}

impl Histogram {
    pub fn zeros(d: usize) -> Self {
        Self {
            weights: vec![0.0; d],
        }
    }

    /// bin a stream of independent equity samples into a normalized
    /// d-bucket histogram.
    pub fn from_samples(samples: &[Probability], d: usize) -> Self {
        let mut weights = vec![0.0; d];
        for &p in samples {
            let bucket = ((p * d as Probability) as usize).min(d - 1);
            weights[bucket] += 1.0;
        }
        let total: Probability = weights.iter().sum();
        if total > 0.0 {
            for w in weights.iter_mut() {
                *w /= total;
            }
        }
        Self { weights }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
    pub fn weights(&self) -> &[Probability] {
        &self.weights
    }
    pub fn density(&self, i: usize) -> Probability {
        self.weights.get(i).copied().unwrap_or(0.0)
    }

    /// cumulative distribution function, used by the EMD metric.
    pub fn cdf(&self) -> Vec<Probability> {
        let mut acc = 0.0;
        self.weights
            .iter()
            .map(|w| {
                acc += w;
                acc
            })
            .collect()
    }

    /// mean of the (weighted) distribution, used as the k-means centroid
    /// aggregate for an assigned cluster.
    pub fn mean(points: &[Histogram]) -> Self {
        assert!(!points.is_empty());
        let d = points[0].len();
        let mut acc = vec![0.0; d];
        for p in points {
            assert_eq!(p.len(), d, "histograms must share dimensionality");
            for (i, w) in p.weights.iter().enumerate() {
                acc[i] += w;
            }
        }
        let n = points.len() as Probability;
        for w in acc.iter_mut() {
            *w /= n;
        }
        Self { weights: acc }
    }
}

impl crate::Arbitrary for Histogram {
    fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let d = rng.random_range(2..=10);
        let raw: Vec<Probability> = (0..d).map(|_| rng.random::<Probability>()).collect();
        let total: Probability = raw.iter().sum();
        Self {
            weights: raw.iter().map(|w| w / total).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_normalizes_to_unit_mass() {
        let samples = [0.0, 0.1, 0.49, 0.5, 0.99];
        let h = Histogram::from_samples(&samples, 10);
        let total: Probability = h.weights().iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mean_of_identical_histograms_is_itself() {
        let h = Histogram::from_samples(&[0.2, 0.2, 0.8], 5);
        let mean = Histogram::mean(&[h.clone(), h.clone(), h.clone()]);
        for (a, b) in mean.weights().iter().zip(h.weights().iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn cdf_is_non_decreasing_and_ends_at_one() {
        let h = Histogram::from_samples(&[0.1, 0.4, 0.4, 0.9], 4);
        let cdf = h.cdf();
        for w in cdf.windows(2) {
            assert!(w[1] + 1e-9 >= w[0]);
        }
        assert!((cdf.last().unwrap() - 1.0).abs() < 1e-6);
    }
}
