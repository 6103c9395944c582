use thiserror::Error;

/// Errors that may be encountered while preparing or executing a simulation.
///
/// [`InvalidConfiguration`] is the only variant a caller of [`run_simulation()`] should expect to see: it is raised
/// while validating a [`SimulationConfig`], before any state is built or any event is scheduled.
///
/// The [`BackInTime`] variant originates from the safe interface of the [`EventQueue`] to indicate that an event's
/// scheduled execution time is prior to the queue's current time. This error likely corresponds to a logical bug at
/// the call site, e.g. forgetting to add an offset to the current time when scheduling a new event.
///
/// [`NonFiniteTime`] guards the conversion of sampled durations and clock sums into simulation time. The bounds
/// [`SimulationConfig::validate()`] puts on the means keep validated runs from producing it.
///
/// [`InvalidConfiguration`]: Error::InvalidConfiguration
/// [`BackInTime`]: Error::BackInTime
/// [`NonFiniteTime`]: Error::NonFiniteTime
/// [`SimulationConfig::validate()`]: crate::SimulationConfig::validate
/// [`run_simulation()`]: crate::run_simulation
/// [`SimulationConfig`]: crate::SimulationConfig
/// [`EventQueue`]: crate::engine::EventQueue
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A configuration field violates its invariant.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },
    /// The event queue rejected an event that would have been scheduled for a time that has already passed.
    #[error("event execution time is less than current simulation time")]
    BackInTime,
    /// A duration or timestamp evaluated to NaN or an infinity.
    #[error("simulation time is not a finite number")]
    NonFiniteTime,
}

/// [`std::result::Result`]`<T, `[`shopsim::Error`]`>`, defaulting to `T = ()`.
///
/// A type alias that simplifies the signatures of event handlers and scheduling methods.
///
/// [`shopsim::Error`]: Error
pub type Result<T = ()> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_names_the_field() {
        let error = Error::InvalidConfiguration {
            field: "server_count",
            reason: "must be at least 1",
        };
        assert_eq!("invalid configuration: server_count must be at least 1", error.to_string());
    }
}
