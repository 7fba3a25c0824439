//! Shortest path searches over the walk network

pub mod dijkstra;
