mod bounded_dijkstra;
mod state;

pub use bounded_dijkstra::dijkstra_walk_times;
