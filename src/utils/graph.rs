//! # Weighted Graph
//!
//! Directed adjacency-list graph with breadth-first, depth-first, and
//! Dijkstra traversals. The dungeon keys it by room id, but any hashable
//! vertex type works.

use log::trace;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// Distance reported by [`Graph::dijkstra`] for vertices it cannot reach.
pub const UNREACHABLE: u32 = u32::MAX;

/// A directed, weighted arc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<V> {
    pub to: V,
    pub weight: u32,
}

/// Directed weighted graph.
///
/// Adding an edge registers both endpoints, so every neighbour is also a
/// vertex. Parallel edges are kept as-is.
///
/// # Examples
///
/// ```
/// use delve::Graph;
///
/// let mut graph = Graph::new();
/// graph.add_bidirectional_edge('a', 'b', 2);
/// graph.add_bidirectional_edge('b', 'c', 3);
///
/// let distances = graph.dijkstra(&'a');
/// assert_eq!(distances[&'c'], 5);
/// assert_eq!(graph.bfs(&'a'), vec!['a', 'b', 'c']);
/// ```
#[derive(Debug, Clone)]
pub struct Graph<V> {
    adjacency: HashMap<V, Vec<Edge<V>>>,
    order: Vec<V>,
}

impl<V: Eq + Hash + Clone> Graph<V> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            adjacency: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registers a vertex. Does nothing if it is already present.
    pub fn add_vertex(&mut self, vertex: V) {
        if !self.adjacency.contains_key(&vertex) {
            self.order.push(vertex.clone());
            self.adjacency.insert(vertex, Vec::new());
            trace!("Graph vertex added, {} total", self.order.len());
        }
    }

    /// Appends a directed arc, registering both endpoints.
    pub fn add_edge(&mut self, from: V, to: V, weight: u32) {
        self.add_vertex(from.clone());
        self.add_vertex(to.clone());
        if let Some(edges) = self.adjacency.get_mut(&from) {
            edges.push(Edge { to, weight });
        }
    }

    /// Adds an arc in each direction with the same weight.
    pub fn add_bidirectional_edge(&mut self, a: V, b: V, weight: u32) {
        self.add_edge(a.clone(), b.clone(), weight);
        self.add_edge(b, a, weight);
    }

    /// Outgoing arcs of a vertex, in insertion order.
    pub fn edges(&self, vertex: &V) -> &[Edge<V>] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Neighbours of a vertex, in insertion order.
    pub fn neighbors<'a>(&'a self, vertex: &V) -> impl Iterator<Item = &'a V> + 'a {
        self.edges(vertex).iter().map(|edge| &edge.to)
    }

    pub fn has_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// Number of directed arcs, parallel arcs included.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Vertices in registration order.
    pub fn vertices(&self) -> &[V] {
        &self.order
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.order.clear();
    }

    /// Breadth-first visitation order from `start`.
    ///
    /// Neighbours are enqueued in insertion order. An unregistered start
    /// yields just itself.
    pub fn bfs(&self, start: &V) -> Vec<V> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert(start.clone());
        queue.push_back(start.clone());

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors(&current) {
                if visited.insert(neighbor.clone()) {
                    queue.push_back(neighbor.clone());
                }
            }
            result.push(current);
        }

        trace!("BFS visited {} vertices", result.len());
        result
    }

    /// Depth-first visitation order from `start`.
    ///
    /// Iterative; neighbours are pushed in reverse so the first-inserted
    /// neighbour is explored first.
    pub fn dfs(&self, start: &V) -> Vec<V> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![start.clone()];

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let edges = self.edges(&current);
            for edge in edges.iter().rev() {
                if !visited.contains(&edge.to) {
                    stack.push(edge.to.clone());
                }
            }
            result.push(current);
        }

        trace!("DFS visited {} vertices", result.len());
        result
    }

    /// Minimum distance from `start` to every registered vertex.
    ///
    /// Unreachable vertices map to [`UNREACHABLE`]. `start` itself always
    /// maps to 0, registered or not.
    pub fn dijkstra(&self, start: &V) -> HashMap<V, u32> {
        self.dijkstra_with_parents(start).0
    }

    /// One shortest path from `from` to `to`, both endpoints included.
    ///
    /// Returns `None` when `to` is unreachable.
    pub fn shortest_path(&self, from: &V, to: &V) -> Option<Vec<V>> {
        let (distances, parents) = self.dijkstra_with_parents(from);
        match distances.get(to) {
            Some(&distance) if distance != UNREACHABLE => {}
            _ => return None,
        }

        let mut path = vec![to.clone()];
        let mut current = to;
        while let Some(parent) = parents.get(current) {
            path.push(parent.clone());
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    fn dijkstra_with_parents(&self, start: &V) -> (HashMap<V, u32>, HashMap<V, V>) {
        let mut distances: HashMap<V, u32> = self
            .order
            .iter()
            .map(|vertex| (vertex.clone(), UNREACHABLE))
            .collect();
        let mut parents = HashMap::new();
        distances.insert(start.clone(), 0);

        let mut arrivals = 0u64;
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry {
            distance: 0,
            arrival: arrivals,
            vertex: start.clone(),
        });

        while let Some(QueueEntry {
            distance, vertex, ..
        }) = heap.pop()
        {
            if distance > distances.get(&vertex).copied().unwrap_or(UNREACHABLE) {
                continue;
            }

            for edge in self.edges(&vertex) {
                let candidate = distance.saturating_add(edge.weight);
                let known = distances.get(&edge.to).copied().unwrap_or(UNREACHABLE);
                if candidate < known {
                    distances.insert(edge.to.clone(), candidate);
                    parents.insert(edge.to.clone(), vertex.clone());
                    arrivals += 1;
                    heap.push(QueueEntry {
                        distance: candidate,
                        arrival: arrivals,
                        vertex: edge.to.clone(),
                    });
                }
            }
        }

        trace!("Dijkstra computed distances to {} vertices", distances.len());
        (distances, parents)
    }
}

impl<V: Eq + Hash + Clone> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Priority queue entry for Dijkstra.
#[derive(Debug, Clone)]
struct QueueEntry<V> {
    distance: u32,
    arrival: u64,
    vertex: V,
}

impl<V> PartialEq for QueueEntry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.arrival == other.arrival
    }
}

impl<V> Eq for QueueEntry<V> {}

impl<V> PartialOrd for QueueEntry<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V> Ord for QueueEntry<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour; earlier arrivals win ties.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.arrival.cmp(&self.arrival))
    }
}
