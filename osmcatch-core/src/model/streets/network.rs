//! Raw street network as produced by a network source

use geo::{Coord, LineString};
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use petgraph::graph::{DiGraph, EdgeIndex, Edges, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Directed;

use super::components::{StreetEdge, StreetNode};
use crate::{Error, OsmNodeId};

/// Directed street multigraph
///
/// Parallel edges between the same ordered node pair are allowed and are told
/// apart by [`StreetEdge::key`].
#[derive(Debug, Clone, Default)]
pub struct StreetGraph {
    pub(crate) graph: DiGraph<StreetNode, StreetEdge>,
    pub(crate) osm_index: HashMap<OsmNodeId, NodeIndex>,
}

impl StreetGraph {
    /// Wraps an existing petgraph graph, indexing nodes by OSM id
    ///
    /// # Errors
    ///
    /// Returns an error if two nodes share the same OSM id
    pub fn from_graph(graph: DiGraph<StreetNode, StreetEdge>) -> Result<Self, Error> {
        let mut osm_index = HashMap::with_capacity(graph.node_count());
        for idx in graph.node_indices() {
            let id = graph[idx].id;
            if osm_index.insert(id, idx).is_some() {
                return Err(Error::InvalidData(format!("Duplicate OSM node id {id}")));
            }
        }
        Ok(Self { graph, osm_index })
    }

    pub fn graph(&self) -> &DiGraph<StreetNode, StreetEdge> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_index(&self, id: OsmNodeId) -> Option<NodeIndex> {
        self.osm_index.get(&id).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&StreetNode> {
        self.graph.node_weight(idx)
    }

    /// Outgoing edges of a node
    pub fn edges(&self, node: NodeIndex) -> Edges<'_, StreetEdge, Directed> {
        self.graph.edges(node)
    }

    /// Geometry of an edge, falling back to the straight segment between
    /// its endpoints when the edge carries no geometry
    pub fn edge_line(&self, edge: EdgeIndex) -> Option<LineString<f64>> {
        let (u, v) = self.graph.edge_endpoints(edge)?;
        let weight = self.graph.edge_weight(edge)?;
        Some(line_or_segment(
            &weight.geometry,
            self.graph[u].geometry.into(),
            self.graph[v].geometry.into(),
        ))
    }

    /// Returns a copy where every edge without a counterpart in the opposite
    /// direction gets one
    ///
    /// An edge `u -> v` counts as mirrored when some `v -> u` edge has the same
    /// key and length. Otherwise a reverse edge is added with the same length,
    /// reversed geometry and negated grade, keeping the key unless it is
    /// already taken between `v` and `u`. Calling this on a symmetric graph is
    /// a no-op.
    #[must_use]
    pub fn to_bidirectional(&self) -> Self {
        let mut graph = self.graph.clone();
        let mut added = 0usize;

        for edge in self.graph.edge_references() {
            let (u, v) = (edge.source(), edge.target());
            let weight = edge.weight();
            if u == v {
                continue;
            }

            let has_reverse = self.graph.edges_connecting(v, u).any(|back| {
                back.weight().key == weight.key && same_length(back.weight().length, weight.length)
            });
            if has_reverse {
                continue;
            }

            let mut reversed = weight.reversed();
            let taken: Vec<u32> = graph.edges_connecting(v, u).map(|e| e.weight().key).collect();
            if taken.contains(&reversed.key) {
                reversed.key = taken.iter().max().map_or(0, |key| key + 1);
            }
            graph.add_edge(v, u, reversed);
            added += 1;
        }

        log::debug!("Added {added} reverse edges to make the street graph bidirectional");

        Self {
            graph,
            osm_index: self.osm_index.clone(),
        }
    }

    /// Merges several street graphs into one
    ///
    /// Nodes are matched by OSM id and edges by `(source id, target id, key)`.
    /// Attributes of later graphs take precedence, but missing optional
    /// attributes never erase values already present.
    pub fn compose<I>(graphs: I) -> Self
    where
        I: IntoIterator<Item = StreetGraph>,
    {
        let mut graph: DiGraph<StreetNode, StreetEdge> = DiGraph::new();
        let mut osm_index: HashMap<OsmNodeId, NodeIndex> = HashMap::new();
        let mut edge_index: HashMap<(OsmNodeId, OsmNodeId, u32), EdgeIndex> = HashMap::new();

        for part in graphs {
            for node in part.graph.node_weights() {
                match osm_index.entry(node.id) {
                    Entry::Vacant(entry) => {
                        entry.insert(graph.add_node(node.clone()));
                    }
                    Entry::Occupied(entry) => {
                        let existing = &mut graph[*entry.get()];
                        let elevation = node.elevation.or(existing.elevation);
                        *existing = StreetNode {
                            elevation,
                            ..node.clone()
                        };
                    }
                }
            }

            for edge in part.graph.edge_references() {
                let u_id = part.graph[edge.source()].id;
                let v_id = part.graph[edge.target()].id;
                let weight = edge.weight();

                match edge_index.entry((u_id, v_id, weight.key)) {
                    Entry::Vacant(entry) => {
                        let u = osm_index[&u_id];
                        let v = osm_index[&v_id];
                        entry.insert(graph.add_edge(u, v, weight.clone()));
                    }
                    Entry::Occupied(entry) => {
                        let existing = &mut graph[*entry.get()];
                        let grade = weight.grade.or(existing.grade);
                        let geometry = if weight.geometry.0.is_empty() {
                            existing.geometry.clone()
                        } else {
                            weight.geometry.clone()
                        };
                        *existing = StreetEdge {
                            key: weight.key,
                            length: weight.length,
                            grade,
                            geometry,
                        };
                    }
                }
            }
        }

        Self { graph, osm_index }
    }
}

fn same_length(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6
}

pub(crate) fn line_or_segment(
    geometry: &LineString<f64>,
    from: Coord<f64>,
    to: Coord<f64>,
) -> LineString<f64> {
    if geometry.0.len() >= 2 {
        geometry.clone()
    } else {
        LineString::new(vec![from, to])
    }
}
