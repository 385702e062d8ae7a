pub mod network_diagram;
pub mod node_diagram;
