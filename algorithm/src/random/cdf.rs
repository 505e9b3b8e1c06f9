/// Represent Cumulative Distribution Function over a list of positive weights
#[derive(Clone, Debug)]
pub struct CDF {
    cdf: Vec<f64>,
}

impl CDF {
    pub fn new(weights: &[f64]) -> CDF {
        let mut cdf = Vec::with_capacity(weights.len() + 1);

        cdf.push(0.0);
        for i in 0..weights.len() {
            assert!(weights[i] > 0.0, "Invalid CDF, all weights should be greater than zero.");
            let val = weights[i] + cdf[i];
            cdf.push(val);
        }

        CDF { cdf }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cdf.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map a probability in `[0, 1)` to the index of a weight, heavier weights cover more
    /// of the interval.
    #[inline]
    pub fn draw_sample(&self, prob: f64) -> usize {
        debug_assert!(!self.is_empty());
        let total = self.cdf[self.cdf.len() - 1];
        let score = total * prob;
        // doing binary search to find the match
        let val_idx = match self.cdf.binary_search_by(|x| x.partial_cmp(&score).unwrap_or(::std::cmp::Ordering::Less)) {
            Ok(idx) => idx,
            Err(idx) => idx - 1
        };

        // prob close to 1.0 can land on the upper bound
        val_idx.min(self.len() - 1)
    }
}
