use super::EventQueue;
use crate::{SimState, SimTime};
use std::fmt::Debug;

/// A resumable step of a simulated process.
///
/// The scheduler hands each event exclusive access to the simulation state and the event queue, then drops it: an
/// event fires exactly once. Processes that need to continue later schedule a new event holding their remaining state.
///
/// Requiring implementors to be [`Debug`] enables printing the full contents of an [`EventQueue`] when necessary.
pub trait Event<State, Time>: Debug
where
    State: SimState<Time>,
    Time: SimTime,
{
    /// Update the simulation according to the specific type of event. The clock on `event_queue` is advanced to this
    /// event's execution time before the call.
    ///
    /// # Errors
    ///
    /// Any error is forwarded unchanged out of [`Simulation::run()`], halting the run.
    ///
    /// [`Simulation::run()`]: crate::engine::Simulation::run
    fn execute(self: Box<Self>, simulation_state: &mut State, event_queue: &mut EventQueue<State, Time>)
        -> crate::Result;
}
