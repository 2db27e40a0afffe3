pub mod force_graph;
mod frame_loop;
pub mod sunburst;
