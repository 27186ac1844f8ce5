use crate::graph::{EdgeId, Graph};

/// The undirected edges of a graph, each listed once, sorted by ascending gap.
///
/// Edges with equal gaps keep the order in which they were met while scanning
/// the vertices in catalog order, so every pool derived from the catalog is
/// deterministic for a given graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeCatalog {
    edges: Vec<EdgeId>,
}

impl EdgeCatalog {
    pub fn new(graph: &Graph) -> Self {
        let mut edges = Vec::with_capacity(graph.edge_count());
        for (vertex, v) in graph.vertices().iter().enumerate() {
            for edge in graph.edges_of(vertex) {
                // Only the endpoint with the smaller id reports the edge.
                let other = graph.other_endpoint(edge, vertex);
                if v.id < graph.vertex(other).id {
                    edges.push(edge);
                }
            }
        }
        // `sort_by_key` is stable: ties stay in discovery order.
        edges.sort_by_key(|&edge| graph.edge_gap(edge));
        Self { edges }
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// A fresh candidate pool for one construction run.
    pub fn candidates(&self) -> Vec<EdgeId> {
        self.edges.clone()
    }
}
