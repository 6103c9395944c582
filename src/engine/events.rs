mod event_holder;
pub(super) mod event_traits;

use crate::{SimState, SimTime};
use event_holder::EventHolder;
use event_traits::Event;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::ops::Add;

/// Priority queue of scheduled events.
///
/// Events execute in ascending order of execution time, with ties broken by the order in which they were pushed onto
/// the queue. Together with a seeded random source, that tiebreaker makes every run reproducible.
///
/// The queue also owns the simulation clock. The clock only moves when [`Simulation::run()`] pops the next event, and
/// every scheduling method rejects execution times earlier than the clock with [`Error::BackInTime`], so time never
/// decreases.
///
/// [`Simulation::run()`]: crate::engine::Simulation::run
/// [`Error::BackInTime`]: crate::Error::BackInTime
#[derive(Debug)]
pub struct EventQueue<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    events: BinaryHeap<Reverse<EventHolder<State, Time>>>,
    last_execution_time: Time,
    events_added: u64,
}

impl<State, Time> EventQueue<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    /// Construct a new [`EventQueue`] with no scheduled events and a clock initialized to the provided time.
    pub(crate) fn new(start_time: Time) -> Self {
        Self {
            events: BinaryHeap::default(),
            last_execution_time: start_time,
            events_added: 0,
        }
    }

    /// Schedule the provided event at the specified time.
    ///
    /// # Errors
    ///
    /// If `time` is less than the current clock time, returns an [`Error::BackInTime`] with no modifications to the
    /// queue.
    ///
    /// [`Error::BackInTime`]: crate::Error::BackInTime
    pub fn schedule<EventType>(&mut self, event: EventType, time: Time) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        self.schedule_from_boxed(Box::new(event), time)
    }

    /// Schedule an already boxed event at the specified time.
    ///
    /// # Errors
    ///
    /// Same as [`schedule()`](EventQueue::schedule).
    pub fn schedule_from_boxed(&mut self, event: Box<dyn Event<State, Time>>, time: Time) -> crate::Result {
        if time < self.last_execution_time {
            return Err(crate::Error::BackInTime);
        }

        let insertion_sequence = self.events_added;
        self.events_added += 1;
        tracing::trace!(?time, insertion_sequence, "scheduling event");
        self.events.push(Reverse(EventHolder {
            execution_time: time,
            event,
            insertion_sequence,
        }));
        Ok(())
    }

    /// Crate-internal function to pop an event from the queue. Updates the current clock time to match the execution
    /// time of the popped event.
    pub(crate) fn next(&mut self) -> Option<Box<dyn Event<State, Time>>> {
        let Reverse(holder) = self.events.pop()?;
        self.last_execution_time = holder.execution_time;
        Some(holder.event)
    }

    /// Get a shared reference to the simulation's current clock time.
    pub fn current_time(&self) -> &Time {
        &self.last_execution_time
    }

    /// Number of events still waiting to fire.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<State, Time> EventQueue<State, Time>
where
    State: SimState<Time>,
    Time: SimTime + Clone,
{
    /// Schedule the provided event to execute at the current sim time. Events previously scheduled for "now" will still
    /// execute before this event does.
    ///
    /// # Errors
    ///
    /// Only if [`Clone::clone`] on the clock somehow produces an earlier time, in which case this returns an
    /// [`Error::BackInTime`].
    ///
    /// [`Error::BackInTime`]: crate::Error::BackInTime
    pub fn schedule_now<EventType>(&mut self, event: EventType) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        let event_time = self.last_execution_time.clone();
        self.schedule(event, event_time)
    }
}

impl<State, Time> EventQueue<State, Time>
where
    State: SimState<Time>,
    Time: SimTime + Clone + Add<Output = Time>,
{
    /// Schedule the provided event after the specified delay. The event's execution time will be equal to
    /// `self.current_time().clone() + delay`.
    ///
    /// # Errors
    ///
    /// If the calculated execution time is less than the current clock time (a negative delay), returns an
    /// [`Error::BackInTime`] with no modifications to the queue.
    ///
    /// [`Error::BackInTime`]: crate::Error::BackInTime
    pub fn schedule_with_delay<EventType>(&mut self, event: EventType, delay: Time) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        let event_time = self.last_execution_time.clone() + delay;
        self.schedule(event, event_time)
    }
}

impl<State, Time> std::fmt::Display for EventQueue<State, Time>
where
    State: SimState<Time>,
    Time: SimTime,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            formatter,
            "EventQueue with {} scheduled events at current time {:?}",
            self.events.len(),
            self.last_execution_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Debug, Default)]
    struct Log {
        fired: Vec<u32>,
    }

    impl SimState<i32> for Log {}

    #[derive(Debug)]
    struct Marker(u32);

    impl Event<Log, i32> for Marker {
        fn execute(self: Box<Self>, state: &mut Log, _: &mut EventQueue<Log, i32>) -> crate::Result {
            state.fired.push(self.0);
            Ok(())
        }
    }

    #[test]
    fn pops_in_time_order_then_insertion_order() {
        let mut queue = EventQueue::new(0);
        queue.schedule(Marker(1), 5).unwrap();
        queue.schedule(Marker(2), 3).unwrap();
        queue.schedule(Marker(3), 5).unwrap();
        queue.schedule(Marker(4), 3).unwrap();

        let mut log = Log::default();
        let mut times = Vec::new();
        while let Some(event) = queue.next() {
            times.push(*queue.current_time());
            event.execute(&mut log, &mut EventQueue::new(0)).unwrap();
        }

        assert_eq!(vec![2, 4, 1, 3], log.fired, "ties were not broken by insertion order");
        assert_eq!(vec![3, 3, 5, 5], times, "clock did not follow execution times");
    }

    #[test]
    fn rejects_events_in_the_past() {
        let mut queue: EventQueue<Log, i32> = EventQueue::new(0);
        queue.schedule(Marker(1), 10).unwrap();
        let _ = queue.next();

        assert_eq!(Err(Error::BackInTime), queue.schedule(Marker(2), 9));
        assert_eq!(Err(Error::BackInTime), queue.schedule_with_delay(Marker(3), -1));
        assert!(queue.is_empty(), "rejected events should not be enqueued");
    }

    #[test]
    fn delay_and_now_are_relative_to_clock() {
        let mut queue: EventQueue<Log, i32> = EventQueue::new(7);
        queue.schedule_with_delay(Marker(1), 3).unwrap();
        queue.schedule_now(Marker(2)).unwrap();
        assert_eq!(2, queue.len());
        assert_eq!("EventQueue with 2 scheduled events at current time 7", queue.to_string());

        let _ = queue.next();
        assert_eq!(7, *queue.current_time());
        let _ = queue.next();
        assert_eq!(10, *queue.current_time());
        assert!(queue.next().is_none());
        assert_eq!(10, *queue.current_time(), "clock moved without an event");
    }
}
