use rustc_hash::{FxHashMap, FxHashSet};

/// Identifier of a vertex as it appears in an instance file.
pub type VertexId = i64;

/// Vertex weight. Gaps are differences of weights and share the type.
pub type Weight = i64;

/// Stable index of an edge inside a [`Graph`].
pub type EdgeId = usize;

/// A weighted vertex together with the edges incident to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub id: VertexId,
    pub weight: Weight,
    edges: Vec<EdgeId>,
}

/// An undirected edge between two vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

/// Struct that represents an undirected, vertex-weighted graph.
///
/// Vertices and edges live in two arenas and refer to each other through
/// indices, so the partitioners can hold on to edge ids without sharing
/// ownership of the graph's storage.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    index: FxHashMap<VertexId, usize>,
}

impl Graph {

    /// Create a new graph
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of vertices in the graph.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The number of undirected edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Insert a vertex. Returns `false` if a vertex with this id already exists.
    pub fn add_vertex(&mut self, id: VertexId, weight: Weight) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id, self.vertices.len());
        self.vertices.push(Vertex { id, weight, edges: Vec::new() });
        true
    }

    /// Change the weight of an existing vertex. Returns `false` if the id is unknown.
    pub fn set_weight(&mut self, id: VertexId, weight: Weight) -> bool {
        match self.index.get(&id) {
            Some(&vertex) => {
                self.vertices[vertex].weight = weight;
                true
            }
            None => false,
        }
    }

    /// Insert an undirected edge between two vertex ids.
    ///
    /// Missing endpoints are created with weight 0. Self loops and edges that
    /// already exist are rejected and `false` is returned.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        if u == v || self.has_edge(u, v) {
            return false;
        }
        self.add_vertex(u, 0);
        self.add_vertex(v, 0);
        let a = self.index[&u];
        let b = self.index[&v];
        let edge = self.edges.len();
        self.edges.push(Edge { a, b });
        self.vertices[a].edges.push(edge);
        self.vertices[b].edges.push(edge);
        true
    }

    /// Remove the edge joining two vertex ids. Returns `false` if there is none.
    ///
    /// Edge ids above the removed one shift down by one.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        let Some(removed) = self.find_edge(u, v) else {
            return false;
        };
        self.drop_edges(|edge| edge == removed);
        true
    }

    /// Remove a vertex and every edge incident to it. Returns `false` if the id is unknown.
    ///
    /// The remaining vertices keep their relative order; indices and edge ids are compacted.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        let Some(removed) = self.index.remove(&id) else {
            return false;
        };
        let incident = std::mem::take(&mut self.vertices[removed].edges);
        self.drop_edges(|edge| incident.contains(&edge));
        self.vertices.remove(removed);

        for edge in &mut self.edges {
            if edge.a > removed {
                edge.a -= 1;
            }
            if edge.b > removed {
                edge.b -= 1;
            }
        }
        for position in self.index.values_mut() {
            if *position > removed {
                *position -= 1;
            }
        }
        true
    }

    // Rebuild the edge arena without the doomed edges and renumber the adjacency lists.
    fn drop_edges(&mut self, doomed: impl Fn(EdgeId) -> bool) {
        let mut renumbered = vec![None; self.edges.len()];
        let mut kept = Vec::with_capacity(self.edges.len());
        for (edge, &endpoints) in self.edges.iter().enumerate() {
            if !doomed(edge) {
                renumbered[edge] = Some(kept.len());
                kept.push(endpoints);
            }
        }
        self.edges = kept;
        for vertex in &mut self.vertices {
            vertex.edges = vertex.edges.iter().filter_map(|&edge| renumbered[edge]).collect();
        }
    }

    fn find_edge(&self, u: VertexId, v: VertexId) -> Option<EdgeId> {
        let a = self.index_of(u)?;
        let b = self.index_of(v)?;
        self.edges_of(a).find(|&edge| self.other_endpoint(edge, a) == b)
    }

    /// Whether an edge joins the two vertex ids.
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.find_edge(u, v).is_some()
    }

    /// All vertices, in insertion order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, vertex: usize) -> &Vertex {
        &self.vertices[vertex]
    }

    pub fn weight(&self, vertex: usize) -> Weight {
        self.vertices[vertex].weight
    }

    /// Index of the vertex carrying the given id.
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// An iterator over the edges incident to the given vertex index.
    pub fn edges_of(&self, vertex: usize) -> impl Iterator<Item = EdgeId> + '_ {
        self.vertices[vertex].edges.iter().copied()
    }

    pub fn edge(&self, edge: EdgeId) -> Edge {
        self.edges[edge]
    }

    /// The endpoint of `edge` that is not `vertex`.
    pub fn other_endpoint(&self, edge: EdgeId, vertex: usize) -> usize {
        let Edge { a, b } = self.edges[edge];
        if a == vertex { b } else { a }
    }

    /// The absolute weight difference between the endpoints of an edge.
    ///
    /// Saturates at `Weight::MAX` for endpoints at opposite ends of the weight range.
    pub fn edge_gap(&self, edge: EdgeId) -> Weight {
        let Edge { a, b } = self.edges[edge];
        self.weight(a).saturating_sub(self.weight(b)).saturating_abs()
    }

    /// Vertex indices grouped by connected component.
    ///
    /// Components are listed by their smallest vertex index, and each one starts
    /// with that vertex followed by the rest in depth-first discovery order.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.len()];
        let mut components = Vec::new();
        let mut stack = Vec::new();

        for root in 0..self.len() {
            if seen[root] {
                continue;
            }
            seen[root] = true;
            stack.push(root);
            let mut component = Vec::new();
            while let Some(vertex) = stack.pop() {
                component.push(vertex);
                for edge in self.edges_of(vertex) {
                    let next = self.other_endpoint(edge, vertex);
                    if !seen[next] {
                        seen[next] = true;
                        stack.push(next);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// The subgraph induced by the given vertex ids, or `None` if one of them is unknown.
    ///
    /// Vertices and edges keep the order they have in `self`.
    pub fn induced_subgraph(&self, ids: &[VertexId]) -> Option<Graph> {
        let mut members = FxHashSet::default();
        for &id in ids {
            members.insert(self.index_of(id)?);
        }

        let mut subgraph = Graph::new();
        for (index, vertex) in self.vertices.iter().enumerate() {
            if members.contains(&index) {
                subgraph.add_vertex(vertex.id, vertex.weight);
            }
        }
        for edge in &self.edges {
            if members.contains(&edge.a) && members.contains(&edge.b) {
                subgraph.add_edge(self.vertices[edge.a].id, self.vertices[edge.b].id);
            }
        }
        Some(subgraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_creates_missing_vertices() {
        // Arrange
        let mut graph = Graph::new();
        graph.add_vertex(7, 3);

        // Act
        let inserted = graph.add_edge(7, 9);

        // Assert
        assert!(inserted);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight(graph.index_of(9).unwrap()), 0);
        assert!(graph.has_edge(9, 7));
    }

    #[test]
    fn test_duplicate_edges_and_self_loops_are_rejected() {
        // Arrange
        let mut graph = Graph::new();
        graph.add_edge(1, 2);

        // Act & Assert
        assert!(!graph.add_edge(2, 1));
        assert!(!graph.add_edge(1, 1));
        assert!(!graph.add_vertex(1, 5));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_edge_gap_and_other_endpoint() {
        // Arrange
        let mut graph = Graph::new();
        graph.add_vertex(1, 10);
        graph.add_vertex(2, 4);
        graph.add_edge(1, 2);
        let one = graph.index_of(1).unwrap();
        let two = graph.index_of(2).unwrap();

        // Act
        let edge = graph.edges_of(one).next().unwrap();

        // Assert
        assert_eq!(graph.edge_gap(edge), 6);
        assert_eq!(graph.other_endpoint(edge, one), two);
        assert_eq!(graph.other_endpoint(edge, two), one);
    }

    // 1 - 2 - 3   4 - 5   6
    fn three_pieces() -> Graph {
        let mut graph = Graph::new();
        for id in 1..=6 {
            graph.add_vertex(id, id * 10);
        }
        for (u, v) in [(1, 2), (2, 3), (4, 5)] {
            graph.add_edge(u, v);
        }
        graph
    }

    #[test]
    fn test_remove_edge_renumbers_later_edges() {
        // Arrange
        let mut graph = three_pieces();

        // Act
        let removed = graph.remove_edge(3, 2);

        // Assert
        assert!(removed);
        assert!(!graph.remove_edge(3, 2));
        assert!(!graph.remove_edge(1, 9));
        assert_eq!(graph.edge_count(), 2);
        assert!(!graph.has_edge(2, 3));
        assert!(graph.has_edge(4, 5));
        let four = graph.index_of(4).unwrap();
        let edge = graph.edges_of(four).next().unwrap();
        assert_eq!(edge, 1);
        assert_eq!(graph.vertex(graph.other_endpoint(edge, four)).id, 5);
    }

    #[test]
    fn test_remove_vertex_drops_incident_edges() {
        // Arrange
        let mut graph = three_pieces();

        // Act
        let removed = graph.remove_vertex(2);

        // Assert
        assert!(removed);
        assert!(!graph.remove_vertex(2));
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.index_of(2), None);
        let ids: Vec<_> = graph.vertices().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5, 6]);
        assert_eq!(graph.index_of(5), Some(3));
        assert!(graph.has_edge(5, 4));
        assert_eq!(graph.edges_of(graph.index_of(1).unwrap()).count(), 0);
        assert_eq!(graph.edge_gap(0), 10);
    }

    #[test]
    fn test_connected_components() {
        // Arrange
        let mut graph = three_pieces();

        // Act
        let components = graph.connected_components();

        // Assert
        assert_eq!(components, vec![vec![0, 1, 2], vec![3, 4], vec![5]]);
        graph.add_edge(3, 4);
        graph.add_edge(5, 6);
        assert_eq!(graph.connected_components().len(), 1);
        assert!(Graph::new().connected_components().is_empty());
    }

    #[test]
    fn test_induced_subgraph() {
        // Arrange
        let graph = three_pieces();

        // Act
        let subgraph = graph.induced_subgraph(&[3, 1, 2, 5]).unwrap();

        // Assert
        let vertices: Vec<_> = subgraph.vertices().iter().map(|v| (v.id, v.weight)).collect();
        assert_eq!(vertices, vec![(1, 10), (2, 20), (3, 30), (5, 50)]);
        assert_eq!(subgraph.edge_count(), 2);
        assert!(subgraph.has_edge(1, 2));
        assert!(!subgraph.has_edge(4, 5));
        assert!(graph.induced_subgraph(&[1, 7]).is_none());
    }

    #[test]
    fn test_edge_gap_saturates() {
        let mut graph = Graph::new();
        graph.add_vertex(1, Weight::MIN);
        graph.add_vertex(2, Weight::MAX);
        graph.add_edge(1, 2);
        assert_eq!(graph.edge_gap(0), Weight::MAX);
    }

    #[test]
    fn test_set_weight() {
        let mut graph = Graph::new();
        graph.add_vertex(3, 1);
        assert!(graph.set_weight(3, 8));
        assert!(!graph.set_weight(4, 8));
        assert_eq!(graph.vertex(0).weight, 8);
    }
}
