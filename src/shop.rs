//! The shop model: one [`ArrivalProcess`] feeding customers into a pool of identical servers.
//!
//! Every run builds its own [`Shop`] (random source, server pool, arrival process and metrics) inside a fresh
//! [`Simulation`], and nothing outlives [`run_simulation()`].

mod arrivals;
mod customer;

pub use arrivals::{ArrivalEvent, ArrivalProcess, ArrivalState};
pub use customer::{CustomerArrival, Departure, WaitingCustomer};

use crate::engine::{EventQueue, Simulation};
use crate::{Error, MetricsCollector, ResourcePool, SimState, SimulationConfig, SimulationResult, VariateSource};

use ordered_float::NotNan;

/// Simulated minutes since the run started.
pub type Minutes = NotNan<f64>;

/// Event queue specialized to the shop model.
pub type ShopQueue = EventQueue<Shop, Minutes>;

/// Convert a sampled duration or timestamp into simulation time.
pub(crate) fn minutes(value: f64) -> crate::Result<Minutes> {
    if !value.is_finite() {
        return Err(Error::NonFiniteTime);
    }
    Minutes::new(value).map_err(|_| Error::NonFiniteTime)
}

/// The instant `delay` minutes after `now`.
pub(crate) fn after(now: Minutes, delay: f64) -> crate::Result<Minutes> {
    minutes(now.into_inner() + delay)
}

/// All mutable state of one run.
#[derive(Debug)]
pub struct Shop {
    pub(crate) mean_inter_arrival: f64,
    pub(crate) mean_service_time: f64,
    pub(crate) variates: VariateSource,
    pub(crate) servers: ResourcePool<WaitingCustomer>,
    pub(crate) arrivals: ArrivalProcess,
    pub(crate) metrics: MetricsCollector,
}

impl Shop {
    /// Build the per-run state for a config.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] if the config fails validation.
    pub fn new(config: &SimulationConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            mean_inter_arrival: config.mean_inter_arrival,
            mean_service_time: config.mean_service_time,
            variates: VariateSource::new(config.seed),
            servers: ResourcePool::new(config.servers()?),
            arrivals: ArrivalProcess::new(config.customer_count),
            metrics: MetricsCollector::with_capacity(config.customer_count),
        })
    }

    pub fn servers(&self) -> &ResourcePool<WaitingCustomer> {
        &self.servers
    }

    pub fn arrivals(&self) -> &ArrivalProcess {
        &self.arrivals
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }
}

// runs until the queue drains
impl SimState<Minutes> for Shop {}

/// Run one replication to completion.
///
/// The config is validated before anything is built, so an invalid config leaves nothing behind. Two calls with equal
/// configs return equal results.
///
/// # Errors
///
/// [`Error::InvalidConfiguration`] for a config that violates its invariants. The other [`Error`] variants signal
/// internal faults and do not occur for validated configs.
pub fn run_simulation(config: &SimulationConfig) -> crate::Result<SimulationResult> {
    let span = tracing::info_span!(
        "simulation",
        seed = config.seed,
        customers = config.customer_count,
        servers = config.server_count,
    );
    let _entered = span.enter();

    let mut sim = Simulation::new(Shop::new(config)?, minutes(0.0)?);
    sim.schedule_now(ArrivalEvent)?;
    sim.run()?;

    let closing_time = sim.current_time().into_inner();
    let shop = sim.into_state();
    debug_assert!(shop.servers.is_idle(), "servers still held after the queue drained");
    debug_assert_eq!(ArrivalState::Done, shop.arrivals.state());

    let result = SimulationResult {
        peak_busy_servers: shop.servers.peak_in_use(),
        ..shop.metrics.summarize()
    };
    tracing::info!(
        closing_time,
        served = result.records.len(),
        average_waiting_time = result.average_waiting_time,
        "simulation finished"
    );
    Ok(result)
}
