//! Ports: trait boundaries between the game/learning core and its
//! collaborators (agents, observers, persistence).

pub mod agent;
pub mod observer;
pub mod repository;

pub use agent::Agent;
pub use observer::Observer;
pub use repository::QTableRepository;
