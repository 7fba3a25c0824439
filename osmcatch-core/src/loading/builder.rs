use geo::{Distance, Haversine, LineString, Point};
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::model::streets::{StreetEdge, StreetNode};
use crate::{Error, OsmNodeId, StreetGraph};

/// Incremental construction of a [`StreetGraph`]
///
/// Every edge is checked against the nodes added so far, so a built graph is
/// always complete.
#[derive(Debug, Default)]
pub struct StreetGraphBuilder {
    graph: DiGraph<StreetNode, StreetEdge>,
    nodes: HashMap<OsmNodeId, NodeIndex>,
    next_keys: HashMap<(NodeIndex, NodeIndex), u32>,
}

impl StreetGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node at `(lat, lng)`; adding the same id again replaces its
    /// position
    pub fn add_node(&mut self, id: OsmNodeId, lat: f64, lng: f64) -> &mut Self {
        self.insert_node(StreetNode::new(id, Point::new(lng, lat)))
    }

    pub fn add_node_with_elevation(
        &mut self,
        id: OsmNodeId,
        lat: f64,
        lng: f64,
        elevation: f64,
    ) -> &mut Self {
        self.insert_node(StreetNode {
            elevation: Some(elevation),
            ..StreetNode::new(id, Point::new(lng, lat))
        })
    }

    fn insert_node(&mut self, node: StreetNode) -> &mut Self {
        match self.nodes.entry(node.id) {
            Entry::Vacant(entry) => {
                entry.insert(self.graph.add_node(node));
            }
            Entry::Occupied(entry) => self.graph[*entry.get()] = node,
        }
        self
    }

    fn endpoints(&self, from: OsmNodeId, to: OsmNodeId) -> Result<(NodeIndex, NodeIndex), Error> {
        let lookup = |id: OsmNodeId| {
            self.nodes
                .get(&id)
                .copied()
                .ok_or_else(|| Error::InvalidData(format!("Edge references unknown node {id}")))
        };
        Ok((lookup(from)?, lookup(to)?))
    }

    /// Adds a straight edge of the given length, returning its parallel-edge key
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint has not been added
    pub fn add_edge(&mut self, from: OsmNodeId, to: OsmNodeId, length: f64) -> Result<u32, Error> {
        let (u, v) = self.endpoints(from, to)?;
        let key = self.next_keys.entry((u, v)).or_insert(0);
        let edge_key = *key;
        *key += 1;
        self.graph.add_edge(u, v, StreetEdge::new(edge_key, length));
        Ok(edge_key)
    }

    /// Adds a straight edge whose length is the great-circle distance between
    /// its endpoints
    pub fn add_segment(&mut self, from: OsmNodeId, to: OsmNodeId) -> Result<u32, Error> {
        let (u, v) = self.endpoints(from, to)?;
        let length = Haversine.distance(self.graph[u].geometry, self.graph[v].geometry);
        self.add_edge(from, to, length)
    }

    /// Adds a segment in both directions, returning the keys of both edges
    pub fn add_two_way_segment(
        &mut self,
        from: OsmNodeId,
        to: OsmNodeId,
    ) -> Result<(u32, u32), Error> {
        Ok((self.add_segment(from, to)?, self.add_segment(to, from)?))
    }

    /// Adds a fully specified edge, keeping its key
    ///
    /// # Errors
    ///
    /// Returns an error for unknown endpoints or a key already used between
    /// the same ordered node pair
    pub fn add_street_edge(
        &mut self,
        from: OsmNodeId,
        to: OsmNodeId,
        edge: StreetEdge,
    ) -> Result<&mut Self, Error> {
        let (u, v) = self.endpoints(from, to)?;
        if self
            .graph
            .edges_connecting(u, v)
            .any(|existing| existing.weight().key == edge.key)
        {
            return Err(Error::InvalidData(format!(
                "Edge {from} -> {to} with key {} already exists",
                edge.key
            )));
        }

        let next = self.next_keys.entry((u, v)).or_insert(0);
        *next = (*next).max(edge.key + 1);
        self.graph.add_edge(u, v, edge);
        Ok(self)
    }

    /// Adds an edge following `geometry`, with its length measured along it
    pub fn add_polyline(
        &mut self,
        from: OsmNodeId,
        to: OsmNodeId,
        geometry: LineString<f64>,
    ) -> Result<u32, Error> {
        let (u, v) = self.endpoints(from, to)?;
        let length: f64 = geometry
            .lines()
            .map(|line| Haversine.distance(line.start_point(), line.end_point()))
            .sum();
        let key = *self.next_keys.get(&(u, v)).unwrap_or(&0);
        self.add_street_edge(from, to, StreetEdge::new(key, length).with_geometry(geometry))?;
        Ok(key)
    }

    pub fn build(self) -> StreetGraph {
        StreetGraph {
            graph: self.graph,
            osm_index: self.nodes,
        }
    }
}
