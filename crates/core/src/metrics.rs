//! Metrics definitions for the Relay layer.
//!
//! Metrics are collected using the `metrics` crate and can be exported
//! to Prometheus via `metrics-exporter-prometheus`.

use metrics::{counter, describe_counter, describe_histogram, histogram};

/// Initialize all metric descriptions.
/// Call this once at startup before any metrics are recorded.
pub fn init_metrics() {
    describe_counter!(
        "node_lookups_total",
        "Total number of global ID lookups, by type tag and outcome"
    );
    describe_counter!(
        "connections_served_total",
        "Total number of connection queries answered, by entity kind"
    );
    describe_histogram!(
        "connection_edges",
        "Number of edges returned per connection page"
    );
}

/// Record a node lookup.
///
/// # Arguments
/// * `type_tag` - Registered type tag, or "invalid"/"unknown"
/// * `outcome` - "found", "not_found", "unknown_type", "invalid_id" or "error"
pub fn record_node_lookup(type_tag: &'static str, outcome: &'static str) {
    counter!("node_lookups_total", "type" => type_tag, "outcome" => outcome).increment(1);
}

/// Record a connection page served.
///
/// # Arguments
/// * `kind` - Entity kind the connection lists
/// * `edges` - Number of edges in the page
pub fn record_connection_served(kind: &'static str, edges: usize) {
    counter!("connections_served_total", "kind" => kind).increment(1);
    histogram!("connection_edges", "kind" => kind).record(edges as f64);
}
