// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化 Prometheus 指标导出器并注册指标说明
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(address = %settings.listen_address, error = %e, "Invalid metrics address");
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_metrics() {
    metrics::describe_counter!(
        "crawl_runs_total",
        "Crawl requests by outcome (success, quota_exceeded, empty, ...)"
    );
    metrics::describe_histogram!(
        "crawl_duration_seconds",
        metrics::Unit::Seconds,
        "Wall-clock time of a crawl request including ingestion"
    );
    metrics::describe_counter!(
        "crawl_pages_fetched_total",
        "Pages fetched successfully, labelled by engine"
    );
    metrics::describe_counter!(
        "crawl_fetch_failures_total",
        "Page fetches that failed and were skipped, labelled by engine"
    );
}
