use rand::rngs::SmallRng;
use rand::SeedableRng;
use crate::algorithms::{solve, Error, Solution, Variant};
use crate::graph::Graph;
use crate::Partition;

/// GRASP Partitioner
///
/// Runs the randomized construction `iterations` times and keeps the forest
/// with the smallest summed gap. At every growth step the edge is drawn
/// uniformly from the best `alpha` fraction of the usable edges, ranked by
/// how much they widen their part's gap.
#[derive(Debug, Clone, Copy)]
pub struct Grasp {
    /// Number of partitions
    pub num_of_partitions: usize,

    /// Width of the restricted candidate list, in (0, 1]. Values close to 0
    /// behave like the greedy construction, 1 draws among every usable edge.
    pub alpha: f64,

    /// Number of restarts
    pub iterations: usize,

    /// Seed for the random source. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for Grasp {
    fn default() -> Self {
        Grasp {
            num_of_partitions: 2,
            alpha: 0.3,
            iterations: 30,
            seed: None,
        }
    }
}

impl<'a> Partition<&'a Graph> for Grasp {
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
        let variant = Variant::Grasp {
            alpha: self.alpha,
            iterations: self.iterations,
        };
        let solution = solve(graph, self.num_of_partitions, &variant, &mut rng)?;
        solution.fill_part_ids(part_ids);
        Ok(solution)
    }
}
