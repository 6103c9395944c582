//! A customer's life as a chain of events: [`CustomerArrival`] → (queued [`WaitingCustomer`]) → [`Departure`]. Each
//! step owns the data the next one needs, and the [`Grant`] travels with the customer from admission until the
//! departure hands it back, so there is exactly one place a server is released.
//!
//! A queued customer resumes inside the [`Departure`] that frees their server. Service durations are therefore drawn
//! in the order grants are issued, which is arrival order.

use super::{after, Minutes, Shop, ShopQueue};
use crate::engine::Event;
use crate::pool::{Admission, Grant};
use crate::variates::Stream;
use crate::{CustomerId, CustomerRecord};

use tracing::debug;

/// A customer walking in. Fires at the instant the arrival process spawns them.
#[derive(Debug)]
pub struct CustomerArrival {
    id: CustomerId,
}

impl CustomerArrival {
    pub fn new(id: CustomerId) -> Self {
        Self { id }
    }
}

impl Event<Shop, Minutes> for CustomerArrival {
    fn execute(self: Box<Self>, shop: &mut Shop, queue: &mut ShopQueue) -> crate::Result {
        let now = *queue.current_time();
        debug!(customer = %self.id, time = now.into_inner(), "arrived");

        let customer = WaitingCustomer {
            id: self.id,
            arrival_time: now,
        };
        match shop.servers.acquire(customer) {
            Admission::Granted(customer, grant) => customer.start_service(grant, shop, queue),
            Admission::Queued { ahead } => {
                debug!(customer = %self.id, ahead, "all servers busy, joined the line");
                Ok(())
            },
        }
    }
}

/// A customer who has arrived but not yet reached a server. While in line the server pool owns it.
#[derive(Debug)]
pub struct WaitingCustomer {
    id: CustomerId,
    arrival_time: Minutes,
}

impl WaitingCustomer {
    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn arrival_time(&self) -> Minutes {
        self.arrival_time
    }

    /// Occupy a server from now until a freshly drawn service duration has elapsed.
    ///
    /// If the end of service is not a representable time, the grant goes back to the pool before the error is
    /// returned.
    fn start_service(self, grant: Grant, shop: &mut Shop, queue: &mut ShopQueue) -> crate::Result {
        let service_start = *queue.current_time();
        let duration = shop.variates.next_exponential(Stream::Services, shop.mean_service_time);
        let service_end = match after(service_start, duration) {
            Ok(time) => time,
            Err(e) => {
                shop.servers.cancel(grant);
                return Err(e);
            },
        };
        debug!(
            customer = %self.id,
            time = service_start.into_inner(),
            waited = service_start.into_inner() - self.arrival_time.into_inner(),
            duration,
            ticket = grant.ticket(),
            "service started"
        );

        let departure = Departure {
            id: self.id,
            arrival_time: self.arrival_time,
            service_start,
            grant,
        };
        queue.schedule(departure, service_end)
    }
}

/// End of service: free the server (starting the next customer in line on it), then log the customer's record.
#[derive(Debug)]
pub struct Departure {
    id: CustomerId,
    arrival_time: Minutes,
    service_start: Minutes,
    grant: Grant,
}

impl Event<Shop, Minutes> for Departure {
    fn execute(self: Box<Self>, shop: &mut Shop, queue: &mut ShopQueue) -> crate::Result {
        let Departure {
            id,
            arrival_time,
            service_start,
            grant,
        } = *self;
        let service_end = *queue.current_time();

        if let Some((next, grant)) = shop.servers.release(grant) {
            debug!(customer = %next.id, "server handed over from {id}");
            next.start_service(grant, shop, queue)?;
        }

        let record = CustomerRecord::new(
            id,
            arrival_time.into_inner(),
            service_start.into_inner(),
            service_end.into_inner(),
        );
        debug!(
            customer = %id,
            time = record.service_end_time,
            waiting_time = record.waiting_time,
            service_time = record.service_time,
            "departed"
        );
        shop.metrics.record(record);
        Ok(())
    }
}
