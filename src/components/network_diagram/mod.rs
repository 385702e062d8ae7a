mod component;
pub mod layout;
pub mod render;
mod types;

pub use component::NetworkDiagram;
pub use types::{Caption, ElementKind, NetworkConnection, NetworkElement, NetworkLayout};
