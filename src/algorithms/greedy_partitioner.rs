use rand::rngs::mock::StepRng;
use crate::algorithms::{solve, Error, Solution, Variant};
use crate::graph::Graph;
use crate::Partition;

/// Greedy Partitioner
///
/// Seeds every part with the cheapest free edge, then repeatedly adds the
/// edge that widens its part's weight gap the least. One deterministic run.
///
/// # Example
///
/// ```rust
/// use GapCut::algorithms::Greedy;
/// use GapCut::graph::Graph;
/// use GapCut::Partition;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
///
///     let mut graph = Graph::new();
///     for (id, weight) in [(1, 1), (2, 2), (3, 10), (4, 11)] {
///         graph.add_vertex(id, weight);
///     }
///     for (u, v) in [(1, 2), (2, 3), (3, 4), (4, 1)] {
///         graph.add_edge(u, v);
///     }
///     let mut partition = vec![0; graph.len()];
///
///     let solution = Greedy { num_of_partitions: 2 }.partition(&mut partition, &graph)?;
///
///     assert_eq!(solution.gap(), 2);
///     assert_eq!(partition[0], partition[1]);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Greedy {
    /// Number of partitions
    pub num_of_partitions: usize,
}

impl Default for Greedy {
    fn default() -> Self {
        Greedy { num_of_partitions: 2 }
    }
}

impl<'a> Partition<&'a Graph> for Greedy {
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
        // The greedy construction never draws, any source will do.
        let solution = solve(graph, self.num_of_partitions, &Variant::Greedy, &mut StepRng::new(0, 0))?;
        solution.fill_part_ids(part_ids);
        Ok(solution)
    }
}
