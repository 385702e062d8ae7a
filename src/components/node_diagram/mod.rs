mod color;
mod component;
pub mod flows;
pub mod instance;
pub mod layout;
pub mod render;
pub mod state;
pub mod tooltip;
mod types;
pub mod viewport;

pub use component::NodeDiagram;
pub use types::{Connection, ConnectionKind, FlowKind, NodeTier};
