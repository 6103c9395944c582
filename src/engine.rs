//! The single-threaded event scheduler that drives every process in a run.
//!
//! A [`Simulation`] owns its state and an [`EventQueue`]. Each popped [`Event`] is consumed by value, so a
//! continuation that wants to resume later must schedule a fresh event carrying whatever state it needs.

mod events;
mod simulation;

pub use events::event_traits::Event;
pub use events::EventQueue;
pub use simulation::Simulation;
