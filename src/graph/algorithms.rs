//! Traversal primitives shared by the metrics engine and statistics

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use ordered_float::OrderedFloat;

use crate::config::PathMetric;
use crate::graph::CoauthorGraph;

/// Single-source shortest path DAG, as used by Brandes' algorithm
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    /// Reached nodes in non-decreasing distance order, source first
    pub order: Vec<u32>,

    /// Predecessors of each node on shortest paths from the source
    pub predecessors: Vec<Vec<u32>>,

    /// Number of shortest paths from the source to each node
    pub sigma: Vec<f64>,

    /// Distance from the source, `None` when unreachable
    pub distance: Vec<Option<f64>>,
}

impl ShortestPaths {
    fn new(node_count: usize, source: usize) -> Self {
        let mut sigma = vec![0.0; node_count];
        let mut distance = vec![None; node_count];
        sigma[source] = 1.0;
        distance[source] = Some(0.0);

        Self {
            order: Vec::with_capacity(node_count),
            predecessors: vec![Vec::new(); node_count],
            sigma,
            distance,
        }
    }

    /// Number of nodes reachable from the source, excluding it
    pub fn reachable(&self) -> usize {
        self.order.len().saturating_sub(1)
    }

    /// Sum of distances to all reachable nodes
    pub fn distance_sum(&self) -> f64 {
        self.order
            .iter()
            .filter_map(|&v| self.distance[v as usize])
            .sum()
    }
}

/// Shortest paths from `source` under the given path metric
pub fn shortest_paths(graph: &CoauthorGraph, source: usize, metric: PathMetric) -> ShortestPaths {
    match metric {
        PathMetric::Hops => bfs_paths(graph, source),
        PathMetric::InverseWeight => dijkstra_paths(graph, source),
    }
}

/// Breadth-first traversal counting hop-count shortest paths
pub fn bfs_paths(graph: &CoauthorGraph, source: usize) -> ShortestPaths {
    let mut paths = ShortestPaths::new(graph.node_count(), source);
    let mut queue = VecDeque::new();
    queue.push_back(source as u32);

    while let Some(v) = queue.pop_front() {
        paths.order.push(v);
        let v = v as usize;
        let next = paths.distance[v].unwrap_or(0.0) + 1.0;

        for &w in graph.neighbors(v) {
            let wi = w as usize;
            match paths.distance[wi] {
                None => {
                    paths.distance[wi] = Some(next);
                    queue.push_back(w);
                }
                Some(d) if d != next => continue,
                Some(_) => {}
            }
            paths.sigma[wi] += paths.sigma[v];
            paths.predecessors[wi].push(v as u32);
        }
    }

    paths
}

/// Dijkstra traversal with edge length `1 / weight`
pub fn dijkstra_paths(graph: &CoauthorGraph, source: usize) -> ShortestPaths {
    let n = graph.node_count();
    let mut paths = ShortestPaths::new(n, source);
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), source as u32)));

    while let Some(Reverse((OrderedFloat(dist), v))) = heap.pop() {
        let vi = v as usize;
        if settled[vi] {
            continue;
        }
        settled[vi] = true;
        paths.order.push(v);

        for (w, weight) in graph.weighted_neighbors(vi) {
            let wi = w as usize;
            if settled[wi] {
                continue;
            }

            let candidate = dist + 1.0 / weight as f64;
            match paths.distance[wi] {
                Some(d) if candidate > d => {}
                Some(d) if candidate == d => {
                    paths.sigma[wi] += paths.sigma[vi];
                    paths.predecessors[wi].push(v);
                }
                _ => {
                    paths.distance[wi] = Some(candidate);
                    paths.sigma[wi] = paths.sigma[vi];
                    paths.predecessors[wi].clear();
                    paths.predecessors[wi].push(v);
                    heap.push(Reverse((OrderedFloat(candidate), w)));
                }
            }
        }
    }

    paths
}

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set, valid at roots
    size: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            size: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let px = self.parent[x as usize];
        if px != x {
            self.parent[x as usize] = self.find(px);
        }
        self.parent[x as usize]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach smaller tree under root of larger tree
        if self.size[root_x as usize] >= self.size[root_y as usize] {
            self.parent[root_y as usize] = root_x;
            self.size[root_x as usize] += self.size[root_y as usize];
        } else {
            self.parent[root_x as usize] = root_y;
            self.size[root_y as usize] += self.size[root_x as usize];
        }
    }
}

/// Connected components, each listed in node order, ordered by their first node
pub fn connected_components(graph: &CoauthorGraph) -> Vec<Vec<u32>> {
    let n = graph.node_count();
    let mut sets = DisjointSets::new(n);
    for (u, v, _) in graph.edges() {
        sets.union(u as u32, v as u32);
    }

    let mut slot_of_root: HashMap<u32, usize> = HashMap::new();
    let mut components: Vec<Vec<u32>> = Vec::new();
    for node in 0..n as u32 {
        let root = sets.find(node);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(node);
    }

    components
}
