//! Query metrics and tracing spans.
//!
//! Metrics are recorded through the global OpenTelemetry meter. Call
//! [`install_prometheus_exporter`] before the first query so the instruments
//! bind to the Prometheus-backed provider.

#[cfg(feature = "metrics")]
mod otel {
    use once_cell::sync::Lazy;
    use opentelemetry::{
        global,
        metrics::{Counter, Histogram},
    };
    use std::time::Duration;

    use crate::error::{ModelError, Result};

    pub static METRICS: Lazy<ModelMetrics> = Lazy::new(ModelMetrics::init);

    pub struct ModelMetrics {
        pub queries_total: Counter<u64>,
        pub query_errors_total: Counter<u64>,
        pub query_duration: Histogram<f64>,
        pub connection_wait: Histogram<f64>,
        pub cache_hits: Counter<u64>,
        pub cache_misses: Counter<u64>,
    }

    impl ModelMetrics {
        pub fn init() -> Self {
            let meter = global::meter("mdb_models");

            Self {
                queries_total: meter
                    .u64_counter("mdb_queries_total")
                    .with_description("Total statements executed")
                    .build(),
                query_errors_total: meter
                    .u64_counter("mdb_query_errors_total")
                    .with_description("Statements that returned a database error")
                    .build(),
                query_duration: meter
                    .f64_histogram("mdb_query_duration_seconds")
                    .with_description("Duration of statements")
                    .build(),
                connection_wait: meter
                    .f64_histogram("mdb_connection_wait_seconds")
                    .with_description("Time spent establishing connections")
                    .build(),
                cache_hits: meter
                    .u64_counter("mdb_cache_hits_total")
                    .with_description("Statement cache hits")
                    .build(),
                cache_misses: meter
                    .u64_counter("mdb_cache_misses_total")
                    .with_description("Statement cache misses")
                    .build(),
            }
        }

        pub fn record_query_duration(&self, elapsed: Duration) {
            self.queries_total.add(1, &[]);
            self.query_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_query_error(&self) {
            self.query_errors_total.add(1, &[]);
        }

        pub fn record_connection_wait(&self, elapsed: Duration) {
            self.connection_wait.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_cache_hit(&self) {
            self.cache_hits.add(1, &[]);
        }

        pub fn record_cache_miss(&self) {
            self.cache_misses.add(1, &[]);
        }
    }

    /// Route the global meter provider into a Prometheus registry and return it.
    pub fn install_prometheus_exporter() -> Result<prometheus::Registry> {
        let registry = prometheus::Registry::new();
        let exporter = opentelemetry_prometheus::exporter()
            .with_registry(registry.clone())
            .build()
            .map_err(|e| ModelError::Invalid(format!("unable to build prometheus exporter: {e}")))?;
        let provider = opentelemetry_sdk::metrics::SdkMeterProvider::builder()
            .with_reader(exporter)
            .build();
        global::set_meter_provider(provider);
        Ok(registry)
    }
}

#[cfg(feature = "metrics")]
pub use otel::{install_prometheus_exporter, ModelMetrics, METRICS};

#[cfg(feature = "tracing")]
pub mod tracing_helpers {
    use tracing::Span;

    pub fn execute_query_span(sql: &str) -> Span {
        tracing::debug_span!("mdb.query", db.system = "postgresql", db.statement = %sql)
    }

    pub fn acquire_connection_span() -> Span {
        tracing::debug_span!("mdb.connect", db.system = "postgresql")
    }

    pub fn begin_transaction_span() -> Span {
        tracing::debug_span!("mdb.transaction.begin")
    }

    pub fn commit_transaction_span() -> Span {
        tracing::debug_span!("mdb.transaction.commit")
    }

    pub fn rollback_transaction_span() -> Span {
        tracing::debug_span!("mdb.transaction.rollback")
    }
}

#[cfg(all(test, feature = "metrics"))]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_recording_does_not_panic_without_provider() {
        METRICS.record_query_duration(Duration::from_millis(3));
        METRICS.record_query_error();
        METRICS.record_cache_hit();
        METRICS.record_cache_miss();
        METRICS.record_connection_wait(Duration::from_millis(1));
    }
}
