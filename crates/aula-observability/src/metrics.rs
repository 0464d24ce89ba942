//! Metric helpers.
//!
//! Thin wrappers so call sites stay one line and metric names live in one
//! place.

pub fn track_http_request(method: &str, status: u16) {
    ::metrics::counter!(
        "aula_http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn track_cache_hit(root: &str) {
    ::metrics::counter!("aula_query_cache_hits_total", "key" => root.to_string()).increment(1);
}

pub fn track_cache_miss(root: &str) {
    ::metrics::counter!("aula_query_cache_misses_total", "key" => root.to_string()).increment(1);
}

pub fn track_cache_invalidation(root: &str, entries: usize) {
    ::metrics::counter!("aula_query_cache_invalidations_total", "key" => root.to_string())
        .increment(entries as u64);
}

pub fn track_mutation(outcome: &'static str) {
    ::metrics::counter!("aula_mutations_total", "outcome" => outcome).increment(1);
}

pub fn track_toast(variant: &'static str) {
    ::metrics::counter!("aula_toasts_total", "variant" => variant).increment(1);
}
