pub mod gateway;
pub mod generation;
pub mod style;

pub use gateway::*;
pub use generation::*;
pub use style::*;
