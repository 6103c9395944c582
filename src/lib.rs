//! # Overview
//!
//! shopsim models a shop with several interchangeable servers under exponential arrivals and exponential service
//! times, and reports how long each customer waited and how long they were served.
//!
//! The crate has two layers:
//!
//! * [`engine`] is a small discrete-event scheduler. A [`Simulation`] owns a state type and an event queue ordered by
//!   execution time, ties broken by insertion order. Events are consumed when they fire; a process that needs to
//!   continue later schedules a new event carrying its remaining state.
//! * The shop model builds on it: an [`ArrivalProcess`] spawns a fixed number of customers, each customer contends
//!   for a [`ResourcePool`] slot with strict first-come-first-served admission, and completed customers land in a
//!   [`MetricsCollector`].
//!
//! [`run_simulation()`] is the entry point. A run is a pure function of its [`SimulationConfig`]: every random draw
//! comes from a [`VariateSource`] seeded from the config, and all state is created and dropped inside the call.
//!
//! ```
//! use shopsim::{run_simulation, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     seed: 7,
//!     customer_count: 50,
//!     mean_inter_arrival: 5.0,
//!     mean_service_time: 4.0,
//!     server_count: 2,
//! };
//! let result = run_simulation(&config).unwrap();
//! assert_eq!(50, result.records.len());
//! assert!(result.peak_busy_servers <= 2);
//! ```
//!
//! # Logging
//!
//! The library emits [`tracing`] events (`debug` per customer transition, `trace` per dispatched event, `info` per
//! run) and never installs a subscriber; the `shopsim` binary does that.
//!
//! [`Simulation`]: engine::Simulation

mod config;
pub mod engine;
mod error;
mod generic_parameters;
mod metrics;
mod pool;
pub mod shop;
mod variates;

pub use config::{ConfigError, SimulationConfig, MAX_MEAN_MINUTES};
pub use error::{Error, Result};
pub use generic_parameters::{SimState, SimTime};
pub use metrics::{CustomerId, CustomerRecord, MetricsCollector, SimulationResult};
pub use pool::{Admission, Grant, ResourcePool};
pub use shop::{run_simulation, ArrivalProcess, Minutes, Shop};
pub use variates::{Stream, VariateSource};
