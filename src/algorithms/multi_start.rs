// Restart driver shared by the greedy, GRASP and reactive GRASP partitioners.

use rand::Rng;
use tracing::{debug, info, warn};
use crate::algorithms::expander::{expand_greedy, expand_randomized};
use crate::algorithms::forest::{Component, Forest};
use crate::algorithms::reactive_controller::ReactiveController;
use crate::algorithms::{check_alpha, EdgeCatalog, Error};
use crate::graph::{Graph, Weight};

/// Settings of the reactive GRASP variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactiveSettings {
    /// Alpha values the controller chooses from.
    pub alphas: Vec<f64>,

    /// Number of restarts.
    pub iterations: usize,

    /// The alpha probabilities are re-weighted every `update_every` restarts.
    pub update_every: usize,
}

impl Default for ReactiveSettings {
    fn default() -> Self {
        ReactiveSettings {
            alphas: vec![0.01, 0.1, 0.15, 0.3, 0.5],
            iterations: 150,
            update_every: 10,
        }
    }
}

/// Which construction to run and how often.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// A single deterministic construction.
    Greedy,

    /// `iterations` randomized constructions with a fixed alpha.
    Grasp { alpha: f64, iterations: usize },

    /// Randomized constructions whose alpha adapts to past results.
    Reactive(ReactiveSettings),
}

/// Best forest found over all restarts.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    components: Vec<Component>,
    gap: Weight,

    /// Best total gap after each completed restart.
    pub history: Vec<Weight>,

    /// Restarts that ended in [`Error::ConstructionStalled`].
    pub stalled: usize,

    /// Final alpha statistics of the reactive variant.
    pub controller: Option<ReactiveController>,
}

impl Solution {
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Sum over the components of their weight gaps.
    pub fn gap(&self) -> Weight {
        self.gap
    }

    /// Number of restarts that produced a complete forest.
    pub fn completed(&self) -> usize {
        self.history.len()
    }

    /// Part id of every vertex index of `graph`.
    pub fn part_ids(&self, graph: &Graph) -> Vec<usize> {
        let mut part_ids = vec![0; graph.len()];
        self.fill_part_ids(&mut part_ids);
        part_ids
    }

    pub(crate) fn fill_part_ids(&self, part_ids: &mut [usize]) {
        for (part, component) in self.components.iter().enumerate() {
            for &vertex in component.vertices() {
                part_ids[vertex] = part;
            }
        }
    }

    /// Materialize the forest as a graph holding the vertices and the chosen edges of `source`.
    pub fn to_graph(&self, source: &Graph) -> Graph {
        let mut graph = Graph::new();
        for component in &self.components {
            for &vertex in component.vertices() {
                let v = source.vertex(vertex);
                graph.add_vertex(v.id, v.weight);
            }
            for &edge in component.edges() {
                let edge = source.edge(edge);
                graph.add_edge(source.vertex(edge.a).id, source.vertex(edge.b).id);
            }
        }
        graph
    }
}

/// Keeps the best forest seen so far.
struct Incumbent {
    best: Option<Forest>,
    history: Vec<Weight>,
    stalled: usize,
    last_stall: Option<Error>,
}

impl Incumbent {
    fn new(iterations: usize) -> Self {
        Incumbent {
            best: None,
            history: Vec::with_capacity(iterations),
            stalled: 0,
            last_stall: None,
        }
    }

    fn best_gap(&self) -> Option<Weight> {
        self.best.as_ref().map(Forest::total_gap)
    }

    /// Record one restart. Configuration errors abort the whole run.
    fn offer(&mut self, restart: usize, outcome: Result<Forest, Error>) -> Result<Option<Weight>, Error> {
        match outcome {
            Ok(forest) => {
                let gap = forest.total_gap();
                if self.best_gap().map_or(true, |best| gap < best) {
                    info!(restart, gap, "new best forest");
                    self.best = Some(forest);
                }
                self.history.push(self.best_gap().unwrap_or(gap));
                Ok(Some(gap))
            }
            Err(error) if error.is_configuration() => Err(error),
            Err(error) => {
                warn!(restart, %error, "restart stalled");
                self.stalled += 1;
                self.last_stall = Some(error);
                Ok(None)
            }
        }
    }

    fn finish(self) -> Result<Solution, Error> {
        match self.best {
            Some(forest) => Ok(Solution {
                gap: forest.total_gap(),
                components: forest.into_components(),
                history: self.history,
                stalled: self.stalled,
                controller: None,
            }),
            None => Err(self.last_stall.unwrap_or(Error::InvalidIterations)),
        }
    }
}

/// How each growth step picks its edge.
#[derive(Debug, Clone, Copy)]
enum Choice {
    Greedy,
    Restricted(f64),
}

/// One full construction: seed, then grow until every vertex is placed.
fn construct<R>(
    graph: &Graph,
    catalog: &EdgeCatalog,
    num_of_partitions: usize,
    choice: Choice,
    rng: &mut R,
) -> Result<Forest, Error>
where
    R: Rng + ?Sized,
{
    if num_of_partitions > 0 && num_of_partitions == graph.len() {
        return Ok(Forest::singletons(graph));
    }

    let mut candidates = catalog.candidates();
    let mut forest = Forest::seed(graph, num_of_partitions, &mut candidates)?;
    while !forest.is_complete() {
        match choice {
            Choice::Greedy => expand_greedy(graph, &mut forest, &mut candidates)?,
            Choice::Restricted(alpha) => expand_randomized(graph, &mut forest, &mut candidates, alpha, rng)?,
        }
    }
    debug_assert_eq!(forest.edge_count(), graph.len() - num_of_partitions);
    Ok(forest)
}

fn check_iterations(iterations: usize) -> Result<(), Error> {
    if iterations == 0 {
        return Err(Error::InvalidIterations);
    }
    Ok(())
}

/// Split `graph` into `num_of_partitions` trees with a small summed weight gap.
///
/// Restarts that stall are skipped as long as at least one restart completes;
/// configuration errors are returned straight away. A graph with more
/// connected components than requested parts is rejected before any restart.
pub fn solve<R>(graph: &Graph, num_of_partitions: usize, variant: &Variant, rng: &mut R) -> Result<Solution, Error>
where
    R: Rng + ?Sized,
{
    if num_of_partitions == 0 || num_of_partitions > graph.len() {
        return Err(Error::InvalidPartitionCount {
            requested: num_of_partitions,
            vertices: graph.len(),
        });
    }
    let components = graph.connected_components().len();
    if components > num_of_partitions {
        return Err(Error::TooManyComponents {
            components,
            requested: num_of_partitions,
        });
    }
    let catalog = EdgeCatalog::new(graph);

    match variant {
        Variant::Greedy => {
            let mut incumbent = Incumbent::new(1);
            let outcome = construct(graph, &catalog, num_of_partitions, Choice::Greedy, rng);
            incumbent.offer(0, outcome)?;
            incumbent.finish()
        }
        Variant::Grasp { alpha, iterations } => {
            check_alpha(*alpha)?;
            check_iterations(*iterations)?;
            let mut incumbent = Incumbent::new(*iterations);
            for restart in 0..*iterations {
                let outcome = construct(graph, &catalog, num_of_partitions, Choice::Restricted(*alpha), rng);
                if let Some(gap) = incumbent.offer(restart, outcome)? {
                    debug!(restart, alpha, gap, "restart finished");
                }
            }
            incumbent.finish()
        }
        Variant::Reactive(settings) => {
            check_iterations(settings.iterations)?;
            check_iterations(settings.update_every)?;
            let mut controller = ReactiveController::new(&settings.alphas)?;
            let mut incumbent = Incumbent::new(settings.iterations);
            for restart in 0..settings.iterations {
                if restart > 0 && restart % settings.update_every == 0 {
                    if let Some(best) = incumbent.best_gap() {
                        controller.update_probabilities(best);
                    }
                }
                let index = controller.choose(rng)?;
                let alpha = controller.alpha(index);
                let outcome = construct(graph, &catalog, num_of_partitions, Choice::Restricted(alpha), rng);
                if let Some(gap) = incumbent.offer(restart, outcome)? {
                    debug!(restart, alpha, gap, "restart finished");
                    controller.record(index, gap);
                }
            }
            let mut solution = incumbent.finish()?;
            solution.controller = Some(controller);
            Ok(solution)
        }
    }
}
