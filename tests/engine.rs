use ordered_float::NotNan;
use shopsim::engine::{Event, EventQueue, Simulation};
use shopsim::{Error, SimState};

type Time = NotNan<f64>;

fn at(value: f64) -> Time {
    NotNan::new(value).expect("test times are never NaN")
}

/// Records the clock and label of every event it runs, and stops once `deadline` is reached.
#[derive(Debug, Default)]
struct Trace {
    fired: Vec<(f64, &'static str)>,
    deadline: Option<f64>,
}

impl SimState<Time> for Trace {
    fn is_complete(&self, current_time: &Time) -> bool {
        self.deadline.is_some_and(|deadline| current_time.into_inner() >= deadline)
    }
}

#[derive(Debug)]
struct Label(&'static str);

impl Event<Trace, Time> for Label {
    fn execute(self: Box<Self>, trace: &mut Trace, queue: &mut EventQueue<Trace, Time>) -> shopsim::Result {
        trace.fired.push((queue.current_time().into_inner(), self.0));
        Ok(())
    }
}

/// Schedules `Label("echo")` after a fixed delay, like a process sleeping on a timer.
#[derive(Debug)]
struct Sleeper {
    delay: f64,
}

impl Event<Trace, Time> for Sleeper {
    fn execute(self: Box<Self>, trace: &mut Trace, queue: &mut EventQueue<Trace, Time>) -> shopsim::Result {
        trace.fired.push((queue.current_time().into_inner(), "sleep"));
        queue.schedule_with_delay(Label("echo"), at(self.delay))
    }
}

/// Tries to schedule an event before the current time.
#[derive(Debug)]
struct TimeTraveler;

impl Event<Trace, Time> for TimeTraveler {
    fn execute(self: Box<Self>, _: &mut Trace, queue: &mut EventQueue<Trace, Time>) -> shopsim::Result {
        let earlier = *queue.current_time() - at(1.0);
        queue.schedule(Label("never"), earlier)
    }
}

#[test]
fn equal_float_times_fire_in_scheduling_order() {
    let mut sim = Simulation::new(Trace::default(), at(0.0));
    sim.schedule(Label("b1"), at(2.5)).unwrap();
    sim.schedule(Label("a"), at(0.25)).unwrap();
    sim.schedule(Label("b2"), at(2.5)).unwrap();
    sim.schedule(Label("b3"), at(2.5)).unwrap();
    sim.run().unwrap();

    let labels: Vec<_> = sim.state().fired.iter().map(|(_, label)| *label).collect();
    assert_eq!(vec!["a", "b1", "b2", "b3"], labels);
}

#[test]
fn handlers_resume_after_requested_delay() {
    let mut sim = Simulation::new(Trace::default(), at(1.0));
    sim.schedule_now(Sleeper { delay: 0.5 }).unwrap();
    sim.schedule(Label("late"), at(4.0)).unwrap();
    sim.run().unwrap();

    assert_eq!(vec![(1.0, "sleep"), (1.5, "echo"), (4.0, "late")], sim.state().fired);
    assert_eq!(at(4.0), *sim.current_time());
    assert!(sim.event_queue().is_empty());
}

#[test]
fn clock_never_moves_backwards() {
    let mut sim = Simulation::new(Trace::default(), at(0.0));
    for (i, time) in [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0].into_iter().enumerate() {
        sim.schedule(Label(if i % 2 == 0 { "even" } else { "odd" }), at(time)).unwrap();
    }
    sim.run().unwrap();

    let times: Vec<f64> = sim.state().fired.iter().map(|(time, _)| *time).collect();
    assert_eq!(8, times.len());
    assert!(times.windows(2).all(|pair| pair[0] <= pair[1]), "clock regressed: {times:?}");
}

#[test]
fn scheduling_into_the_past_halts_the_run() {
    let mut sim = Simulation::new(Trace::default(), at(0.0));
    sim.schedule(TimeTraveler, at(2.0)).unwrap();
    sim.schedule(Label("after"), at(3.0)).unwrap();

    assert_eq!(Err(Error::BackInTime), sim.run());
    assert!(sim.state().fired.is_empty());
    assert_eq!(1, sim.event_queue().len(), "the later event should still be pending");
}

#[test]
fn completion_check_stops_before_later_events() {
    let mut sim = Simulation::new(
        Trace {
            deadline: Some(2.0),
            ..Trace::default()
        },
        at(0.0),
    );
    for time in [1.0, 2.0, 3.0] {
        sim.schedule(Label("tick"), at(time)).unwrap();
    }
    sim.run().unwrap();

    assert_eq!(vec![(1.0, "tick"), (2.0, "tick")], sim.state().fired);
    assert_eq!(1, sim.event_queue().len());
}
