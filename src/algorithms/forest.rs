// Working state of one construction run: the growing trees, the owner of every
// placed vertex and the weight bounds of each tree.

use crate::algorithms::Error;
use crate::graph::{Edge, EdgeId, Graph, Weight};

/// One part under construction: a tree grown edge by edge.
///
/// The lightest and heaviest vertex weights are kept up to date on every
/// insertion, so the gap of a component never needs a rescan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    edges: Vec<EdgeId>,
    vertices: Vec<usize>,
    min_weight: Weight,
    max_weight: Weight,
}

impl Component {
    fn singleton(graph: &Graph, vertex: usize) -> Self {
        let weight = graph.weight(vertex);
        Self {
            edges: Vec::new(),
            vertices: vec![vertex],
            min_weight: weight,
            max_weight: weight,
        }
    }

    fn from_edge(graph: &Graph, edge: EdgeId) -> Self {
        let Edge { a, b } = graph.edge(edge);
        let (wa, wb) = (graph.weight(a), graph.weight(b));
        Self {
            edges: vec![edge],
            vertices: vec![a, b],
            min_weight: wa.min(wb),
            max_weight: wa.max(wb),
        }
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Vertex indices in insertion order.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn min_weight(&self) -> Weight {
        self.min_weight
    }

    pub fn max_weight(&self) -> Weight {
        self.max_weight
    }

    /// Saturates at `Weight::MAX` when the bounds span more than the weight range.
    pub fn gap(&self) -> Weight {
        self.max_weight.saturating_sub(self.min_weight)
    }

    /// Increase of this component's gap if a vertex of the given weight joined it.
    pub fn impact(&self, weight: Weight) -> Weight {
        let min = self.min_weight.min(weight);
        let max = self.max_weight.max(weight);
        max.saturating_sub(min).saturating_sub(self.gap())
    }

    fn absorb(&mut self, edge: EdgeId, vertex: usize, weight: Weight) {
        self.edges.push(edge);
        self.vertices.push(vertex);
        self.min_weight = self.min_weight.min(weight);
        self.max_weight = self.max_weight.max(weight);
    }
}

/// Where a candidate edge stands with respect to the placed vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Neither endpoint is placed yet; the edge may become usable later.
    Detached,
    /// Exactly one endpoint is placed: the edge would bring `vertex` into `component`.
    Attached { component: usize, vertex: usize },
    /// Both endpoints are placed; the edge would close a cycle or merge two components.
    Closed,
}

/// `k` vertex-disjoint trees plus the owner of every vertex placed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forest {
    components: Vec<Component>,
    owner: Vec<Option<usize>>,
    visited: usize,
}

impl Forest {
    fn empty(graph: &Graph, num_of_partitions: usize) -> Self {
        Self {
            components: Vec::with_capacity(num_of_partitions),
            owner: vec![None; graph.len()],
            visited: 0,
        }
    }

    /// Start `num_of_partitions` trees, one per component, each from the first
    /// candidate edge whose endpoints are both still unplaced. Seed edges are
    /// removed from `candidates`.
    pub fn seed(graph: &Graph, num_of_partitions: usize, candidates: &mut Vec<EdgeId>) -> Result<Self, Error> {
        if num_of_partitions == 0 || num_of_partitions > graph.len() {
            return Err(Error::InvalidPartitionCount {
                requested: num_of_partitions,
                vertices: graph.len(),
            });
        }

        let mut forest = Self::empty(graph, num_of_partitions);
        for seeded in 0..num_of_partitions {
            let position = candidates.iter().position(|&edge| {
                let Edge { a, b } = graph.edge(edge);
                !forest.is_visited(a) && !forest.is_visited(b)
            });
            let Some(position) = position else {
                return Err(Error::NotEnoughSeeds {
                    requested: num_of_partitions,
                    seeded,
                });
            };
            let edge = candidates.remove(position);
            let Edge { a, b } = graph.edge(edge);
            forest.owner[a] = Some(seeded);
            forest.owner[b] = Some(seeded);
            forest.visited += 2;
            forest.components.push(Component::from_edge(graph, edge));
        }
        Ok(forest)
    }

    /// Every vertex in a component of its own.
    pub fn singletons(graph: &Graph) -> Self {
        Self {
            components: (0..graph.len()).map(|vertex| Component::singleton(graph, vertex)).collect(),
            owner: (0..graph.len()).map(Some).collect(),
            visited: graph.len(),
        }
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn into_components(self) -> Vec<Component> {
        self.components
    }

    pub fn is_visited(&self, vertex: usize) -> bool {
        self.owner[vertex].is_some()
    }

    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// Whether every vertex of the graph has been placed.
    pub fn is_complete(&self) -> bool {
        self.visited == self.owner.len()
    }

    pub fn component_of(&self, vertex: usize) -> Option<usize> {
        self.owner[vertex]
    }

    pub fn placement(&self, graph: &Graph, edge: EdgeId) -> Placement {
        let Edge { a, b } = graph.edge(edge);
        match (self.owner[a], self.owner[b]) {
            (None, None) => Placement::Detached,
            (Some(component), None) => Placement::Attached { component, vertex: b },
            (None, Some(component)) => Placement::Attached { component, vertex: a },
            (Some(_), Some(_)) => Placement::Closed,
        }
    }

    /// Gap increase of `component` if `vertex` joined it. Other components are unaffected.
    pub fn impact(&self, graph: &Graph, component: usize, vertex: usize) -> Weight {
        self.components[component].impact(graph.weight(vertex))
    }

    /// Append `edge` to `component`, bringing the unplaced `vertex` with it.
    pub fn attach(&mut self, graph: &Graph, edge: EdgeId, component: usize, vertex: usize) {
        debug_assert!(self.owner[vertex].is_none());
        self.owner[vertex] = Some(component);
        self.visited += 1;
        self.components[component].absorb(edge, vertex, graph.weight(vertex));
    }

    /// Sum of the component gaps, read from the maintained bounds.
    ///
    /// Saturates at `Weight::MAX` instead of overflowing.
    pub fn total_gap(&self) -> Weight {
        self.components.iter().map(Component::gap).fold(0, Weight::saturating_add)
    }

    pub fn edge_count(&self) -> usize {
        self.components.iter().map(|c| c.edges.len()).sum()
    }
}
