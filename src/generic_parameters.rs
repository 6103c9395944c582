use std::fmt::Debug;

use ordered_float::{FloatCore, NotNan, OrderedFloat};

/// The generic type used for a simulation's clock.
///
/// This trait is a superset of [`Ord`] and [`Debug`] with no additional requirements. Events execute in ascending
/// order of execution time; ties that the implementing type does not break itself are resolved by the order in which
/// events were enqueued, which keeps a run reproducible.
///
/// Floating-point builtins do not implement [`Ord`], so the shop model runs on [`NotNan<f64>`] (see [`Minutes`]).
/// Integral builtins are supported for coarse-grained clocks.
///
/// [`Minutes`]: crate::Minutes
pub trait SimTime: Ord + Debug {}

macro_rules! integral_sim_time {
    ($($ty:ty),*) => {
        $(impl SimTime for $ty {})*
    };
}

integral_sim_time!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl<Float> SimTime for OrderedFloat<Float> where Float: FloatCore + Debug {}

impl<Float> SimTime for NotNan<Float> where Float: FloatCore + Debug {}

/// The generic type used for a simulation's overall state.
///
/// The only method here lets [`Simulation::run()`] ask whether it should wrap up event execution. The default answers
/// "no," so a simulation running with the default continues until its event queue empties out, which is how the shop
/// model terminates.
///
/// [`Simulation::run()`]: crate::engine::Simulation::run
pub trait SimState<Time>
where
    Time: SimTime,
{
    /// Reports whether the simulation has run to completion. Invoked before popping each event off the queue: `true`
    /// breaks out of the run loop, `false` continues with the next scheduled event.
    // other implementations may use the argument even though this one doesn't
    #[allow(unused_variables)]
    fn is_complete(&self, current_time: &Time) -> bool {
        false
    }
}
