// Growth step of the constructive heuristics.
//
// Each step walks the candidate pool once: edges with both endpoints placed are
// dropped for good, edges touching one placed vertex become placement options,
// and the remaining edges are kept for later steps. Exactly one option is then
// placed, either the cheapest one or one drawn from a restricted candidate list.

use rand::Rng;
use crate::algorithms::forest::{Forest, Placement};
use crate::algorithms::Error;
use crate::graph::{EdgeId, Graph, Weight};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlacementOption {
    /// Position of the edge in the filtered pool.
    slot: usize,
    edge: EdgeId,
    component: usize,
    vertex: usize,
    impact: Weight,
}

/// Rebuild the pool without closed edges and list the usable ones in pool order.
fn collect_options(graph: &Graph, forest: &Forest, candidates: &mut Vec<EdgeId>) -> Vec<PlacementOption> {
    let mut options = Vec::new();
    let mut kept = Vec::with_capacity(candidates.len());

    for &edge in candidates.iter() {
        match forest.placement(graph, edge) {
            Placement::Closed => {}
            Placement::Detached => kept.push(edge),
            Placement::Attached { component, vertex } => {
                options.push(PlacementOption {
                    slot: kept.len(),
                    edge,
                    component,
                    vertex,
                    impact: forest.impact(graph, component, vertex),
                });
                kept.push(edge);
            }
        }
    }

    *candidates = kept;
    options
}

fn place(graph: &Graph, forest: &mut Forest, candidates: &mut Vec<EdgeId>, option: PlacementOption) {
    forest.attach(graph, option.edge, option.component, option.vertex);
    candidates.remove(option.slot);
}

fn stalled(graph: &Graph, forest: &Forest) -> Error {
    Error::ConstructionStalled {
        visited: forest.visited_count(),
        total: graph.len(),
    }
}

/// Place the candidate edge with the smallest impact on its component's gap.
///
/// Ties go to the edge met first in the pool, i.e. the one with the smaller
/// own gap in catalog order.
pub fn expand_greedy(graph: &Graph, forest: &mut Forest, candidates: &mut Vec<EdgeId>) -> Result<(), Error> {
    let best = collect_options(graph, forest, candidates)
        .into_iter()
        .reduce(|best, option| if option.impact < best.impact { option } else { best })
        .ok_or_else(|| stalled(graph, forest))?;

    place(graph, forest, candidates, best);
    Ok(())
}

/// Place a candidate edge drawn uniformly from the restricted candidate list.
///
/// Options are ranked by impact and only the first
/// `floor((options - 1) * alpha) + 1` of them may be drawn: small alphas stay
/// close to [`expand_greedy`], `alpha = 1` draws from every option.
pub fn expand_randomized<R>(
    graph: &Graph,
    forest: &mut Forest,
    candidates: &mut Vec<EdgeId>,
    alpha: f64,
    rng: &mut R,
) -> Result<(), Error>
where
    R: Rng + ?Sized,
{
    let mut options = collect_options(graph, forest, candidates);
    if options.is_empty() {
        return Err(stalled(graph, forest));
    }

    // Stable, so equal impacts stay in pool order.
    options.sort_by_key(|option| option.impact);
    let restricted_max = restricted_max(options.len(), alpha);
    let selected = if restricted_max == 0 {
        0
    } else {
        rng.gen_range(0..=restricted_max)
    };

    place(graph, forest, candidates, options[selected]);
    Ok(())
}

/// Last index of the restricted candidate list for `len` ranked options.
pub(crate) fn restricted_max(len: usize, alpha: f64) -> usize {
    let max = ((len.saturating_sub(1)) as f64 * alpha).floor() as usize;
    max.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use super::*;
    use crate::algorithms::EdgeCatalog;

    // 1 --- 2 --- 3      weights: 1:1 2:2 3:10 4:11 5:3 6:12
    //       |     |
    //       5     4 --- 6
    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        for (id, weight) in [(1, 1), (2, 2), (3, 10), (4, 11), (5, 3), (6, 12)] {
            graph.add_vertex(id, weight);
        }
        for (u, v) in [(1, 2), (2, 3), (3, 4), (2, 5), (4, 6)] {
            graph.add_edge(u, v);
        }
        graph
    }

    fn seeded(graph: &Graph, k: usize) -> (Forest, Vec<EdgeId>) {
        let mut candidates = EdgeCatalog::new(graph).candidates();
        let forest = Forest::seed(graph, k, &mut candidates).unwrap();
        (forest, candidates)
    }

    #[test]
    fn test_greedy_step_places_minimum_impact_edge() {
        // Arrange: seeds are {1,2} and {3,4}
        let graph = sample_graph();
        let (mut forest, mut candidates) = seeded(&graph, 2);

        // Act
        expand_greedy(&graph, &mut forest, &mut candidates).unwrap();

        // Assert: 4-6 and 2-5 both cost 1, 2-5 has the smaller own gap and comes first
        let five = graph.index_of(5).unwrap();
        assert_eq!(forest.component_of(five), Some(0));
        assert_eq!(forest.components()[0].gap(), 2);
        assert_eq!(forest.visited_count(), 5);
    }

    #[test]
    fn test_greedy_step_discards_closed_edges() {
        // Arrange
        let graph = sample_graph();
        let (mut forest, mut candidates) = seeded(&graph, 2);

        // Act
        expand_greedy(&graph, &mut forest, &mut candidates).unwrap();

        // Assert: 2-3 joins both seeds and is gone, 2-5 was placed, 4-6 remains
        assert_eq!(candidates.len(), 1);
        assert_eq!(graph.edge_gap(candidates[0]), 1);
    }

    #[test]
    fn test_greedy_runs_to_completion() {
        // Arrange
        let graph = sample_graph();
        let (mut forest, mut candidates) = seeded(&graph, 2);

        // Act
        while !forest.is_complete() {
            expand_greedy(&graph, &mut forest, &mut candidates).unwrap();
        }

        // Assert
        assert_eq!(forest.edge_count(), graph.len() - 2);
        assert_eq!(forest.total_gap(), 2 + 2);
    }

    #[test]
    fn test_step_stalls_on_unreachable_vertices() {
        // Arrange: vertex 7 has no edges at all
        let mut graph = sample_graph();
        graph.add_vertex(7, 0);
        let (mut forest, mut candidates) = seeded(&graph, 2);
        while forest.visited_count() < 6 {
            expand_greedy(&graph, &mut forest, &mut candidates).unwrap();
        }

        // Act
        let result = expand_greedy(&graph, &mut forest, &mut candidates);

        // Assert
        assert_eq!(result, Err(Error::ConstructionStalled { visited: 6, total: 7 }));
    }

    #[test]
    fn test_tiny_alpha_matches_greedy_choices() {
        // Arrange
        let graph = sample_graph();
        let (mut greedy, mut greedy_pool) = seeded(&graph, 2);
        let (mut randomized, mut randomized_pool) = seeded(&graph, 2);
        let mut rng = SmallRng::seed_from_u64(5);

        // Act & Assert
        while !greedy.is_complete() {
            expand_greedy(&graph, &mut greedy, &mut greedy_pool).unwrap();
            expand_randomized(&graph, &mut randomized, &mut randomized_pool, f64::MIN_POSITIVE, &mut rng).unwrap();
            assert_eq!(greedy, randomized);
            assert_eq!(greedy_pool, randomized_pool);
        }
    }

    #[test]
    fn test_randomized_choice_stays_within_restricted_list() {
        // Arrange: many runs over the same first step
        let graph = sample_graph();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..50 {
            let (mut forest, mut candidates) = seeded(&graph, 2);

            // Act: two options ranked by impact (1, 1), alpha 0.5 keeps only the first
            expand_randomized(&graph, &mut forest, &mut candidates, 0.5, &mut rng).unwrap();

            // Assert
            let five = graph.index_of(5).unwrap();
            assert!(forest.is_visited(five));
        }
    }

    // Center 0 (weight 0) with leaves 1..=10, each leaf weighing its own id.
    fn star() -> Graph {
        let mut graph = Graph::new();
        graph.add_vertex(0, 0);
        for leaf in 1..=10 {
            graph.add_vertex(leaf, leaf);
            graph.add_edge(0, leaf);
        }
        graph
    }

    // Leaf placed by the first growth step after seeding the star with 0-1.
    fn first_drawn_leaf<R: Rng>(graph: &Graph, alpha: f64, rng: &mut R) -> i64 {
        let (mut forest, mut candidates) = seeded(graph, 1);
        expand_randomized(graph, &mut forest, &mut candidates, alpha, rng).unwrap();
        (2..=10)
            .find(|&leaf| forest.is_visited(graph.index_of(leaf).unwrap()))
            .unwrap()
    }

    #[test]
    fn test_full_alpha_draws_across_all_options() {
        // Arrange: nine options ranked by impact 1..=9, alpha 1 keeps all of them
        let graph = star();
        let mut rng = SmallRng::seed_from_u64(13);

        // Act
        let drawn: HashSet<i64> = (0..100).map(|_| first_drawn_leaf(&graph, 1.0, &mut rng)).collect();

        // Assert
        assert!(drawn.len() > 1);
        assert!(drawn.iter().all(|leaf| (2..=10).contains(leaf)));
    }

    #[test]
    fn test_half_alpha_draws_within_restricted_list() {
        // Arrange: restricted_max(9, 0.5) = 4, so only leaves 2..=6 may be drawn
        let graph = star();
        let mut rng = SmallRng::seed_from_u64(13);

        // Act
        let drawn: HashSet<i64> = (0..100).map(|_| first_drawn_leaf(&graph, 0.5, &mut rng)).collect();

        // Assert
        assert_eq!(restricted_max(9, 0.5), 4);
        assert!(drawn.len() > 1);
        assert!(drawn.iter().all(|leaf| (2..=6).contains(leaf)));
    }

    #[test]
    fn test_restricted_max() {
        assert_eq!(restricted_max(1, 1.0), 0);
        assert_eq!(restricted_max(5, 0.5), 2);
        assert_eq!(restricted_max(5, 1.0), 4);
        assert_eq!(restricted_max(11, 0.15), 1);
        assert_eq!(restricted_max(10, f64::MIN_POSITIVE), 0);
    }
}
