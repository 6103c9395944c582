use super::Event;
use crate::{SimState, SimTime};
use std::cmp::Ordering;

/// Queue entry pairing a boxed event with its sort key: execution time first, insertion sequence to break ties.
#[derive(Debug)]
pub(super) struct EventHolder<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    pub execution_time: Time,
    pub event: Box<dyn Event<State, Time>>,
    pub insertion_sequence: u64,
}

impl<State, Time> PartialEq<Self> for EventHolder<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    fn eq(&self, other: &Self) -> bool {
        self.insertion_sequence == other.insertion_sequence && self.execution_time == other.execution_time
    }
}

impl<State, Time> Eq for EventHolder<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
}

impl<State, Time> PartialOrd<Self> for EventHolder<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<State, Time> Ord for EventHolder<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.execution_time
            .cmp(&other.execution_time)
            .then_with(|| self.insertion_sequence.cmp(&other.insertion_sequence))
    }
}
