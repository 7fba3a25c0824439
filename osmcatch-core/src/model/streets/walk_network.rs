//! Costed pedestrian network with spatial lookup

use geo::{LineString, Point};
use petgraph::Directed;
use petgraph::graph::{DiGraph, EdgeIndex, Edges, NodeIndex};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use super::components::{StreetNode, WalkEdge};
use super::network::line_or_segment;
use crate::geometry::LocalProjection;
use crate::{AccessPoint, Error};

/// Node position in the local metric projection, tagged with its graph index
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Street network where every edge carries a walking time
///
/// Produced by [`crate::cost::assign_costs`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct WalkNetwork {
    pub(crate) graph: DiGraph<StreetNode, WalkEdge>,
    rtree: RTree<IndexedPoint>,
    projection: LocalProjection,
}

impl WalkNetwork {
    pub(crate) fn new(graph: DiGraph<StreetNode, WalkEdge>) -> Self {
        let projection = LocalProjection::centered_on(graph.node_weights().map(|n| &n.geometry));

        let points = graph
            .node_indices()
            .map(|idx| {
                let projected = projection.project(graph[idx].geometry.into());
                IndexedPoint::new([projected.x, projected.y], idx)
            })
            .collect();

        Self {
            graph,
            rtree: RTree::bulk_load(points),
            projection,
        }
    }

    pub fn graph(&self) -> &DiGraph<StreetNode, WalkEdge> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&StreetNode> {
        self.graph.node_weight(idx)
    }

    pub fn contains_node(&self, idx: NodeIndex) -> bool {
        idx.index() < self.graph.node_count()
    }

    /// Outgoing edges of a node
    pub fn edges(&self, node: NodeIndex) -> Edges<'_, WalkEdge, Directed> {
        self.graph.edges(node)
    }

    /// Geometry of an edge in WGS84, straight segment if the edge has none
    pub fn edge_line(&self, edge: EdgeIndex) -> Option<LineString<f64>> {
        let (u, v) = self.graph.edge_endpoints(edge)?;
        let weight = self.graph.edge_weight(edge)?;
        Some(line_or_segment(
            &weight.geometry,
            self.graph[u].geometry.into(),
            self.graph[v].geometry.into(),
        ))
    }

    pub fn projection(&self) -> &LocalProjection {
        &self.projection
    }

    /// Network node closest to the given point
    ///
    /// Distances are planar in the network's local projection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGraph`] if the network has no nodes
    pub fn nearest_node(&self, point: &AccessPoint) -> Result<NodeIndex, Error> {
        let projected = self.projection.project(point.to_point().into());
        self.rtree
            .nearest_neighbor(&[projected.x, projected.y])
            .map(|nearest| nearest.data)
            .ok_or(Error::EmptyGraph)
    }

    /// Nearest node for every access point, in input order
    ///
    /// Several access points may resolve to the same node.
    pub fn nearest_nodes(&self, points: &[AccessPoint]) -> Result<Vec<NodeIndex>, Error> {
        points.iter().map(|point| self.nearest_node(point)).collect()
    }

    /// Distance in meters between a point and a node, in the local projection
    pub(crate) fn snap_distance(&self, point: &AccessPoint, node: NodeIndex) -> Option<f64> {
        let node: Point<f64> = self.node(node)?.geometry;
        let a = self.projection.project(point.to_point().into());
        let b = self.projection.project(node.into());
        Some((a.x - b.x).hypot(a.y - b.y))
    }
}
