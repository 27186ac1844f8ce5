use rand::rngs::SmallRng;
use rand::SeedableRng;
use crate::algorithms::{solve, Error, ReactiveSettings, Solution, Variant};
use crate::graph::Graph;
use crate::Partition;

/// Reactive GRASP Partitioner
///
/// Like [`Grasp`](crate::algorithms::Grasp), but every restart draws its
/// alpha from `alphas`. Every `update_every` restarts the draw probabilities
/// are re-weighted towards the alphas whose solutions averaged closest to the
/// best gap found so far.
#[derive(Debug, Clone)]
pub struct ReactiveGrasp {
    /// Number of partitions
    pub num_of_partitions: usize,

    /// Candidate alpha values, each in (0, 1].
    pub alphas: Vec<f64>,

    /// Number of restarts
    pub iterations: usize,

    /// Restarts between two re-weightings of the alpha probabilities.
    pub update_every: usize,

    /// Seed for the random source. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for ReactiveGrasp {
    fn default() -> Self {
        let settings = ReactiveSettings::default();
        ReactiveGrasp {
            num_of_partitions: 2,
            alphas: settings.alphas,
            iterations: settings.iterations,
            update_every: settings.update_every,
            seed: None,
        }
    }
}

impl<'a> Partition<&'a Graph> for ReactiveGrasp {
    type Metadata = Solution;
    type Error = Error;

    fn partition(
        &mut self,
        part_ids: &mut [usize],
        graph: &'a Graph,
    ) -> Result<Self::Metadata, Self::Error> {
        if part_ids.len() != graph.len() {
            return Err(Error::InputLenMismatch {
                expected: part_ids.len(),
                actual: graph.len(),
            });
        }
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let variant = Variant::Reactive(ReactiveSettings {
            alphas: self.alphas.clone(),
            iterations: self.iterations,
            update_every: self.update_every,
        });
        let solution = solve(graph, self.num_of_partitions, &variant, &mut rng)?;
        solution.fill_part_ids(part_ids);
        Ok(solution)
    }
}
