use num_traits::ToPrimitive;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::info;
use crate::algorithms::{check_alpha, Error};
use crate::graph::Weight;

/// Selection statistics of one alpha value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaRecord {
    pub alpha: f64,

    /// Probability of drawing this alpha before a restart.
    pub probability: f64,

    /// Number of restarts that used this alpha.
    pub uses: u32,

    /// Sum of the total gaps those restarts produced.
    pub cumulative_gap: Weight,
}

impl AlphaRecord {
    /// Mean gap produced with this alpha, if it was used at all.
    pub fn average_gap(&self) -> Option<f64> {
        if self.uses == 0 {
            return None;
        }
        let cumulative = self.cumulative_gap.to_f64().unwrap_or(0.0);
        Some(cumulative / f64::from(self.uses))
    }
}

/// Adapts the probability of each alpha to the quality of the solutions it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactiveController {
    records: Vec<AlphaRecord>,
}

impl ReactiveController {
    /// A controller drawing uniformly among `alphas`.
    pub fn new(alphas: &[f64]) -> Result<Self, Error> {
        if alphas.is_empty() {
            return Err(Error::EmptyAlphaSet);
        }
        for &alpha in alphas {
            check_alpha(alpha)?;
        }
        let probability = 1.0 / alphas.len() as f64;
        let records = alphas
            .iter()
            .map(|&alpha| AlphaRecord { alpha, probability, uses: 0, cumulative_gap: 0 })
            .collect();
        Ok(Self { records })
    }

    pub fn records(&self) -> &[AlphaRecord] {
        &self.records
    }

    pub fn alpha(&self, index: usize) -> f64 {
        self.records[index].alpha
    }

    /// Draw the index of the alpha to use for the next restart.
    pub fn choose<R>(&self, rng: &mut R) -> Result<usize, Error>
    where
        R: Rng + ?Sized,
    {
        let distribution = WeightedIndex::new(self.records.iter().map(|record| record.probability))
            .map_err(|_| Error::DegenerateAlphaWeights)?;
        Ok(distribution.sample(rng))
    }

    /// Account the total gap of a finished restart to the alpha it used.
    pub fn record(&mut self, index: usize, gap: Weight) {
        let record = &mut self.records[index];
        record.uses += 1;
        record.cumulative_gap = record.cumulative_gap.saturating_add(gap);
    }

    /// Re-weight the alphas by `best_gap / average_gap`.
    ///
    /// Alphas that were never used, or whose average gap is zero, score 1 so
    /// they stay in play. If every score is zero the probabilities are left
    /// unchanged.
    pub fn update_probabilities(&mut self, best_gap: Weight) {
        let best = best_gap.to_f64().unwrap_or(0.0);
        let scores: Vec<f64> = self
            .records
            .iter()
            .map(|record| match record.average_gap() {
                Some(average) if average > 0.0 => best / average,
                _ => 1.0,
            })
            .collect();

        let total: f64 = scores.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return;
        }
        for (record, score) in self.records.iter_mut().zip(&scores) {
            record.probability = score / total;
        }
        info!(
            best_gap,
            probabilities = ?self.records.iter().map(|r| r.probability).collect::<Vec<_>>(),
            "re-weighted alpha probabilities"
        );
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_ulps_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use super::*;

    #[test]
    fn test_new_controller_is_uniform() {
        // Arrange & Act
        let controller = ReactiveController::new(&[0.01, 0.1, 0.15, 0.3, 0.5]).unwrap();

        // Assert
        for record in controller.records() {
            assert_ulps_eq!(record.probability, 0.2);
            assert_eq!(record.uses, 0);
        }
    }

    #[test]
    fn test_new_controller_rejects_bad_alphas() {
        assert_eq!(ReactiveController::new(&[]), Err(Error::EmptyAlphaSet));
        assert_eq!(ReactiveController::new(&[0.1, 0.0]), Err(Error::InvalidAlpha { alpha: 0.0 }));
        assert_eq!(ReactiveController::new(&[1.5]), Err(Error::InvalidAlpha { alpha: 1.5 }));
    }

    #[test]
    fn test_update_favours_alphas_close_to_best() {
        // Arrange
        let mut controller = ReactiveController::new(&[0.1, 0.5]).unwrap();
        controller.record(0, 10);
        controller.record(0, 10);
        controller.record(1, 30);
        controller.record(1, 10);

        // Act
        controller.update_probabilities(10);

        // Assert: scores are 10/10 = 1 and 10/20 = 0.5
        let records = controller.records();
        assert_ulps_eq!(records[0].probability, 2.0 / 3.0);
        assert_ulps_eq!(records[1].probability, 1.0 / 3.0);
        assert_eq!(records[1].average_gap(), Some(20.0));
    }

    #[test]
    fn test_unused_alphas_keep_a_share() {
        // Arrange
        let mut controller = ReactiveController::new(&[0.1, 0.5]).unwrap();
        controller.record(0, 40);

        // Act
        controller.update_probabilities(20);

        // Assert: scores are 0.5 and 1
        assert_ulps_eq!(controller.records()[0].probability, 1.0 / 3.0);
        assert_ulps_eq!(controller.records()[1].probability, 2.0 / 3.0);
    }

    #[test]
    fn test_all_zero_scores_leave_probabilities_unchanged() {
        // Arrange
        let mut controller = ReactiveController::new(&[0.1, 0.5]).unwrap();
        controller.record(0, 4);
        controller.record(1, 6);
        let before = controller.clone();

        // Act
        controller.update_probabilities(0);

        // Assert
        assert_eq!(controller, before);
    }

    #[test]
    fn test_choose_never_picks_zero_probability() {
        // Arrange
        let mut controller = ReactiveController::new(&[0.1, 0.5, 0.9]).unwrap();
        controller.record(0, 5);
        controller.record(1, 0);
        controller.record(2, 7);
        controller.update_probabilities(0);
        let mut rng = SmallRng::seed_from_u64(7);

        // Act & Assert: only alpha 0.5 has a non-zero share
        assert_ulps_eq!(controller.records()[1].probability, 1.0);
        for _ in 0..100 {
            assert_eq!(controller.choose(&mut rng), Ok(1));
        }
    }

    #[test]
    fn test_choose_reports_degenerate_probabilities() {
        // Arrange
        let mut controller = ReactiveController::new(&[0.1, 0.5]).unwrap();
        for record in &mut controller.records {
            record.probability = 0.0;
        }
        let mut rng = SmallRng::seed_from_u64(7);

        // Act
        let result = controller.choose(&mut rng);

        // Assert
        assert_eq!(result, Err(Error::DegenerateAlphaWeights));
    }
}
