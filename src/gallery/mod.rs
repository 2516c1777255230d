mod cursor;
mod edges;
mod layout;
mod nodes;
mod physics;
mod simulation;

pub use layout::LayoutResult;
pub use simulation::Simulation;
