//! Plain-text rendering of an inventory tree
//!
//! Clusters and services are sorted by name for display; collection order
//! is not stable between runs.

use crate::inventory::{Cluster, Labels, Service};
use std::collections::BTreeSet;

const DASH: &str = "-";

pub fn render_tree(clusters: &[Cluster]) -> String {
    if clusters.is_empty() {
        return "No clusters found\n".to_string();
    }

    let mut sorted: Vec<&Cluster> = clusters.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.arn.cmp(&b.arn)));

    let mut out = String::new();
    for cluster in sorted {
        out.push_str(&format!("{} ({})", cluster.name, cluster.arn));
        if let Some(reason) = cluster.status.reason() {
            out.push_str(&format!("  [unavailable: {}]", reason));
        }
        out.push('\n');

        if cluster.services.is_empty() {
            out.push_str("  (no services)\n\n");
            continue;
        }

        out.push_str(&format!(
            "  {:<24} {:<16} {:<10} {:<20} {:<14} {:<32} {}\n",
            "SERVICE", "APP", "ENV", "COMPONENT", "VERSION", "PRIVATE IPS", "PUBLIC IPS"
        ));

        let mut services: Vec<&Service> = cluster.services.iter().collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));

        for service in services {
            out.push_str(&format!(
                "  {:<24} {:<16} {:<10} {:<20} {:<14} {:<32} {}",
                service.name,
                or_dash(&service.labels.app),
                or_dash(&service.labels.env),
                or_dash(&service.labels.component),
                or_dash(&service.labels.version),
                join_ips(&service.private_ips),
                join_ips(&service.public_ips),
            ));
            if let Some(reason) = service.status.reason() {
                out.push_str(&format!("  [unavailable: {}]", reason));
            }
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

pub fn render_labels(image: &str, labels: &Labels) -> String {
    format!(
        "{}\n  app:       {}\n  env:       {}\n  component: {}\n  version:   {}\n",
        image,
        or_dash(&labels.app),
        or_dash(&labels.env),
        or_dash(&labels.component),
        or_dash(&labels.version),
    )
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        DASH
    } else {
        value
    }
}

fn join_ips(ips: &BTreeSet<String>) -> String {
    if ips.is_empty() {
        return DASH.to_string();
    }
    ips.iter().cloned().collect::<Vec<_>>().join(",")
}
