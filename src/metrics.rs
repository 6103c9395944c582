use serde::{Serialize, Serializer};
use std::fmt;

/// Sequential customer number, starting at 1 in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomerId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Customer {}", self.0)
    }
}

/// Serialized as its display label, e.g. `"Customer 3"`.
impl Serialize for CustomerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Timing of one customer who completed service. All times are simulated minutes since the run started.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    #[serde(rename = "customer")]
    pub id: CustomerId,
    pub arrival_time: f64,
    #[serde(rename = "start_service")]
    pub service_start_time: f64,
    #[serde(rename = "end_service")]
    pub service_end_time: f64,
    pub waiting_time: f64,
    pub service_time: f64,
}

impl CustomerRecord {
    /// Build a record from the three timestamps, deriving the two durations.
    pub fn new(id: CustomerId, arrival_time: f64, service_start_time: f64, service_end_time: f64) -> Self {
        Self {
            id,
            arrival_time,
            service_start_time,
            service_end_time,
            waiting_time: service_start_time - arrival_time,
            service_time: service_end_time - service_start_time,
        }
    }
}

/// Append-only log of completed customers, in completion order.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    records: Vec<CustomerRecord>,
}

impl MetricsCollector {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, record: CustomerRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Close the log and compute the aggregates.
    pub fn summarize(self) -> SimulationResult {
        let average_waiting_time = mean(self.records.iter().map(|r| r.waiting_time));
        SimulationResult {
            average_waiting_time,
            records: self.records,
            peak_busy_servers: 0,
        }
    }
}

/// Arithmetic mean, or 0 for an empty sequence.
fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    #[serde(rename = "average_wait_time")]
    pub average_waiting_time: f64,
    /// Completed customers in the order they left service.
    #[serde(rename = "customers")]
    pub records: Vec<CustomerRecord>,
    /// Most servers busy at any one instant.
    pub peak_busy_servers: usize,
}

impl SimulationResult {
    /// Waiting times in completion order, for plotting.
    pub fn wait_times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.waiting_time).collect()
    }

    /// Service times in completion order, for plotting.
    pub fn service_times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.service_time).collect()
    }

    pub fn average_service_time(&self) -> f64 {
        mean(self.records.iter().map(|r| r.service_time))
    }

    /// Longest wait of any customer, 0 with no customers.
    pub fn max_waiting_time(&self) -> f64 {
        self.records.iter().map(|r| r.waiting_time).fold(0.0, f64::max)
    }

    /// Records sorted by customer id, i.e. by arrival.
    pub fn records_by_arrival(&self) -> Vec<&CustomerRecord> {
        let mut sorted: Vec<_> = self.records.iter().collect();
        sorted.sort_by_key(|r| r.id);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_log_averages_to_zero() {
        let result = MetricsCollector::default().summarize();
        assert!(result.records.is_empty());
        assert_eq!(0.0, result.average_waiting_time);
        assert_eq!(0.0, result.average_service_time());
        assert_eq!(0.0, result.max_waiting_time());
    }

    #[test]
    fn derives_durations_and_aggregates() {
        let mut metrics = MetricsCollector::with_capacity(2);
        metrics.record(CustomerRecord::new(CustomerId(2), 1.0, 4.0, 5.0));
        metrics.record(CustomerRecord::new(CustomerId(1), 0.5, 0.5, 4.0));
        assert_eq!(2, metrics.len());

        let result = metrics.summarize();
        assert_eq!(vec![3.0, 0.0], result.wait_times());
        assert_eq!(vec![1.0, 3.5], result.service_times());
        assert_eq!(1.5, result.average_waiting_time);
        assert_eq!(2.25, result.average_service_time());
        assert_eq!(3.0, result.max_waiting_time());

        let ids: Vec<_> = result.records_by_arrival().iter().map(|r| r.id).collect();
        assert_eq!(vec![CustomerId(1), CustomerId(2)], ids);
    }

    #[test]
    fn serializes_with_presentation_field_names() {
        let mut metrics = MetricsCollector::default();
        metrics.record(CustomerRecord::new(CustomerId(1), 0.5, 1.0, 3.0));
        let json = serde_json::to_value(metrics.summarize()).unwrap();

        assert_eq!(0.5, json["average_wait_time"]);
        let customer = &json["customers"][0];
        assert_eq!("Customer 1", customer["customer"]);
        assert_eq!(0.5, customer["arrival_time"]);
        assert_eq!(1.0, customer["start_service"]);
        assert_eq!(3.0, customer["end_service"]);
        assert_eq!(0.5, customer["waiting_time"]);
        assert_eq!(2.0, customer["service_time"]);
    }
}
