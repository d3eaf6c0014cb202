//! Metrics collection.
//!
//! # Metrics
//! - `router_lookups_total` (counter): lookups by outcome (static, dynamic, wildcard, miss)
//! - `router_mutations_total` (counter): inserts and removals
//! - `router_reloads_total` (counter): route table reloads by result
//! - `router_routes` (gauge): payload-carrying nodes in the most recently mutated router

pub fn record_lookup(outcome: &'static str) {
    metrics::counter!("router_lookups_total", "outcome" => outcome).increment(1);
}

pub fn record_mutation(op: &'static str) {
    metrics::counter!("router_mutations_total", "op" => op).increment(1);
}

pub fn record_reload(result: &'static str) {
    metrics::counter!("router_reloads_total", "result" => result).increment(1);
}

pub fn record_route_count(routes: usize) {
    metrics::gauge!("router_routes").set(routes as f64);
}
