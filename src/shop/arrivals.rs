use super::{after, CustomerArrival, Minutes, Shop, ShopQueue};
use crate::engine::Event;
use crate::variates::{Stream, VariateSource};
use crate::CustomerId;

/// Lifecycle of the arrival process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalState {
    /// Not started yet.
    Idle,
    /// Waiting out the gap before the next customer.
    Emitting,
    /// Every customer has been spawned; nothing further is scheduled.
    Done,
}

/// Spawns a fixed number of customers separated by exponential gaps.
#[derive(Debug)]
pub struct ArrivalProcess {
    state: ArrivalState,
    remaining: usize,
    spawned: usize,
}

impl ArrivalProcess {
    pub fn new(customer_count: usize) -> Self {
        Self {
            state: ArrivalState::Idle,
            remaining: customer_count,
            spawned: 0,
        }
    }

    pub fn state(&self) -> ArrivalState {
        self.state
    }

    /// Customers still to come.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn spawned(&self) -> usize {
        self.spawned
    }

    /// Advance one step: spawn the customer whose gap just elapsed (unless starting from idle), then either draw the
    /// next gap and sleep through it or finish.
    fn resume(&mut self, variates: &mut VariateSource, mean_gap: f64, queue: &mut ShopQueue) -> crate::Result {
        match self.state {
            ArrivalState::Done => return Ok(()),
            ArrivalState::Idle => {},
            ArrivalState::Emitting => {
                self.spawned += 1;
                self.remaining -= 1;
                queue.schedule_now(CustomerArrival::new(CustomerId(self.spawned as u64)))?;
            },
        }

        if self.remaining == 0 {
            self.state = ArrivalState::Done;
            tracing::debug!(spawned = self.spawned, "arrival process done");
            return Ok(());
        }

        self.state = ArrivalState::Emitting;
        let gap = variates.next_exponential(Stream::Arrivals, mean_gap);
        let next_arrival = after(*queue.current_time(), gap)?;
        queue.schedule(ArrivalEvent, next_arrival)
    }
}

/// Wakes the shop's [`ArrivalProcess`].
#[derive(Debug)]
pub struct ArrivalEvent;

impl Event<Shop, Minutes> for ArrivalEvent {
    fn execute(self: Box<Self>, shop: &mut Shop, queue: &mut ShopQueue) -> crate::Result {
        shop.arrivals.resume(&mut shop.variates, shop.mean_inter_arrival, queue)
    }
}
