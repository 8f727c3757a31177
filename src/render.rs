//! Text rendering of a [`StatusSnapshot`].
//!
//! Rendering takes the current time explicitly so relative ages and days
//! remaining are reproducible in tests.

use chrono::{DateTime, TimeDelta, Utc};
use hcp_status::{
    CertificateReadiness, CertificateStatus, Condition, StatusSnapshot, SyncSummary, VersionInfo,
    WorkerPoolStatus,
};
use itertools::Itertools;

const TRANSITIONAL_HINT: &str =
    "  (Cluster may not be fully installed yet or may be in a transitional state)";
const COLUMN_PADDING: usize = 2;
const SECONDS_PER_DAY: i64 = 86_400;

/// Render the full status report.
pub fn render_status(snapshot: &StatusSnapshot, now: DateTime<Utc>) -> String {
    let mut out = Vec::new();

    out.push(format!(
        "HCP Cluster Status: {} ({})",
        snapshot.identity.name, snapshot.identity.id
    ));
    if !snapshot.identity.state.is_empty() {
        out.push(format!("Cluster State: {}", snapshot.identity.state));
    }
    if !snapshot.management_cluster.is_empty() {
        out.push(format!("Management Cluster: {}", snapshot.management_cluster));
    }
    out.push(String::new());

    render_syncs(&mut out, &snapshot.syncs, now);
    render_control_plane(&mut out, &snapshot.conditions, &snapshot.version);

    if snapshot.control_plane_certificate.is_some() {
        out.push("CLUSTER KUBE API CERTIFICATE".to_string());
        out.push("  Certificate resource found in ManifestWork".to_string());
        out.push("  (Detailed status not available from status feedback)".to_string());
        out.push(String::new());
    }

    match &snapshot.ingress_certificate {
        Some(certificate) => {
            render_certificate(&mut out, "DEFAULT INGRESS CERTIFICATE", certificate, now);
        }
        None => empty_section(
            &mut out,
            "DEFAULT INGRESS CERTIFICATE",
            "No certificate information available",
        ),
    }

    if snapshot.worker_pools.is_empty() {
        empty_section(&mut out, "NODEPOOLS", "No NodePool resources found");
    } else {
        for pool in &snapshot.worker_pools {
            render_worker_pool(&mut out, pool);
        }
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn empty_section(out: &mut Vec<String>, title: &str, message: &str) {
    out.push(title.to_string());
    out.push(format!("  {message}"));
    out.push(TRANSITIONAL_HINT.to_string());
    out.push(String::new());
}

fn render_syncs(out: &mut Vec<String>, syncs: &[SyncSummary], now: DateTime<Utc>) {
    const TITLE: &str = "MANIFEST WORKS (Service Cluster -> Management Cluster)";

    if syncs.is_empty() {
        empty_section(out, TITLE, "No ManifestWork resources found");
        return;
    }

    out.push(TITLE.to_string());
    let mut table = Table::new();
    table.row(["  NAME", "APPLIED", "AVAILABLE", "LAST SYNC"]);
    for sync in syncs {
        let last_sync = sync
            .last_sync_time
            .map_or_else(|| "(unknown)".to_string(), |t| relative_age(now - t));
        table.row([
            format!("  {}", sync.name),
            bool_status(sync.applied).to_string(),
            bool_status(sync.available).to_string(),
            last_sync,
        ]);
    }
    out.extend(table.lines());
    out.push(String::new());
}

fn render_control_plane(out: &mut Vec<String>, conditions: &[Condition], version: &VersionInfo) {
    const TITLE: &str = "HOSTED CLUSTER";

    if conditions.is_empty() {
        empty_section(out, TITLE, "No HostedCluster conditions available");
        return;
    }

    out.push(TITLE.to_string());
    out.push("  CONTROL PLANE VERSION".to_string());

    let mut table = Table::new();
    if version.is_known() {
        let mut first = vec!["    Current:".to_string()];
        first.push(if version.current.is_empty() {
            "(not available)".to_string()
        } else {
            version.current.clone()
        });
        if !version.desired.is_empty() {
            first.push(format!("Desired: {}", version.desired));
        }
        if !version.status.is_empty() {
            first.push(format!("Status: {}", version.status));
        }
        table.row(first);

        if !version.available_updates.is_empty() {
            table.row([
                "    Available Updates:".to_string(),
                version.available_updates.join(", "),
            ]);
        }
        if !version.status.is_empty() && version.status != "Completed" {
            table.row([
                "    Note:",
                "Check ClusterVersion conditions below for details",
            ]);
        }
    } else {
        table.row(["    Version:", "(not available)"]);
    }
    out.extend(table.lines());
    out.push(String::new());

    out.push("  CONDITIONS".to_string());
    out.extend(condition_table("    ", conditions).lines());
    out.push(String::new());
}

fn render_certificate(
    out: &mut Vec<String>,
    title: &str,
    certificate: &CertificateStatus,
    now: DateTime<Utc>,
) {
    out.push(title.to_string());

    let mut table = Table::new();
    table.row(["  Status:", readiness_label(certificate.ready)]);

    if let Some(not_after) = certificate.not_after {
        table.row([
            "  Expires:".to_string(),
            format!(
                "{} ({}d remaining)",
                not_after.format("%Y-%m-%d"),
                days_remaining(not_after - now)
            ),
        ]);
    }
    if let Some(renewal) = certificate.renewal_time {
        table.row([
            "  Renews:".to_string(),
            renewal.format("%Y-%m-%d").to_string(),
        ]);
    }

    let mut dns_names = certificate.dns_names.iter();
    if let Some(first) = dns_names.next() {
        table.row(["  DNS Names:", first.as_str()]);
        for name in dns_names {
            table.row(["", name.as_str()]);
        }
    }

    out.extend(table.lines());
    out.push(String::new());
}

fn render_worker_pool(out: &mut Vec<String>, pool: &WorkerPoolStatus) {
    let mut details = Vec::new();
    if pool.replicas > 0 {
        details.push(format!("{} replicas", pool.replicas));
    }
    if !pool.version.is_empty() {
        details.push(format!("v{}", pool.version));
    }

    if details.is_empty() {
        out.push(format!("NODEPOOL: {}", pool.name));
    } else {
        out.push(format!("NODEPOOL: {} ({})", pool.name, details.join(", ")));
    }

    out.extend(condition_table("  ", &pool.conditions).lines());
    out.push(String::new());
}

/// Conditions as `CONDITION STATUS MESSAGE`, continuation lines of a
/// multi-line message kept under the MESSAGE column.
fn condition_table(indent: &str, conditions: &[Condition]) -> Table {
    let mut table = Table::new();
    table.row([format!("{indent}CONDITION"), "STATUS".to_string(), "MESSAGE".to_string()]);

    for condition in conditions {
        let mut lines = condition.summary().split('\n');
        let first = lines.next().unwrap_or_default();
        table.row([
            format!("{indent}{}", condition.condition_type),
            condition.status.clone(),
            first.to_string(),
        ]);

        for line in lines.map(str::trim).filter(|line| !line.is_empty()) {
            table.row([indent.to_string(), String::new(), line.to_string()]);
        }
    }

    table
}

const fn bool_status(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

const fn readiness_label(readiness: CertificateReadiness) -> &'static str {
    match readiness {
        CertificateReadiness::Ready => "Ready",
        CertificateReadiness::NotReady => "Not Ready",
        CertificateReadiness::Unknown => "Unknown",
    }
}

/// Age as `Ns ago`, `Nm ago`, `Nh ago` or `Nd ago`. Future times read as `0s ago`.
pub fn relative_age(age: TimeDelta) -> String {
    let seconds = age.num_seconds().max(0);

    if seconds < 60 {
        format!("{seconds}s ago")
    } else if seconds < 3_600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < SECONDS_PER_DAY {
        format!("{}h ago", seconds / 3_600)
    } else {
        format!("{}d ago", seconds / SECONDS_PER_DAY)
    }
}

/// Whole days left, rounded up. Negative once expired.
pub fn days_remaining(left: TimeDelta) -> i64 {
    let seconds = left.num_seconds();
    let days = seconds / SECONDS_PER_DAY;
    if seconds % SECONDS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// Left-aligned columns separated by at least two spaces.
///
/// The last cell of each row is written as is and does not widen its column,
/// so a long trailing message never pushes other rows out.
#[derive(Debug, Default)]
struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new() -> Self {
        Self::default()
    }

    fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for row in &self.rows {
            let padded = row.len().saturating_sub(1);
            for (column, cell) in row.iter().take(padded).enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(column) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }
        widths
    }

    fn lines(&self) -> Vec<String> {
        let widths = self.widths();

        self.rows
            .iter()
            .map(|row| {
                let padded = row.len().saturating_sub(1);
                row.iter()
                    .enumerate()
                    .map(|(column, cell)| {
                        if column < padded {
                            let width = widths.get(column).copied().unwrap_or_default();
                            format!("{cell:<width$}", width = width + COLUMN_PADDING)
                        } else {
                            cell.clone()
                        }
                    })
                    .join("")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use chrono::TimeZone;
    use hcp_status::ClusterIdentity;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn condition(kind: &str, status: &str, reason: &str, message: &str) -> Condition {
        Condition {
            condition_type: kind.to_string(),
            status: status.to_string(),
            reason: reason.to_string(),
            message: message.to_string(),
            last_transition_time: String::new(),
        }
    }

    #[test]
    fn test_relative_age_units() {
        assert_eq!(relative_age(TimeDelta::seconds(42)), "42s ago");
        assert_eq!(relative_age(TimeDelta::seconds(60)), "1m ago");
        assert_eq!(relative_age(TimeDelta::minutes(59)), "59m ago");
        assert_eq!(relative_age(TimeDelta::hours(5)), "5h ago");
        assert_eq!(relative_age(TimeDelta::hours(49)), "2d ago");
    }

    #[test]
    fn test_relative_age_future_is_zero() {
        assert_eq!(relative_age(TimeDelta::seconds(-30)), "0s ago");
    }

    #[test]
    fn test_days_remaining_rounds_up() {
        assert_eq!(days_remaining(TimeDelta::days(30)), 30);
        assert_eq!(days_remaining(TimeDelta::days(30) + TimeDelta::seconds(1)), 31);
        assert_eq!(days_remaining(TimeDelta::hours(1)), 1);
        assert_eq!(days_remaining(TimeDelta::zero()), 0);
        assert_eq!(days_remaining(TimeDelta::hours(-36)), -1);
    }

    #[test]
    fn test_table_aligns_all_but_last_column() {
        let mut table = Table::new();
        table.row(["  NAME", "APPLIED", "LAST"]);
        table.row(["  a-much-longer-name", "True", "5s ago"]);

        let lines = table.lines();
        assert_eq!(lines[0], "  NAME                APPLIED  LAST");
        assert_eq!(lines[1], "  a-much-longer-name  True     5s ago");
    }

    #[test]
    fn test_empty_snapshot_shows_every_empty_section() {
        let snapshot = StatusSnapshot::default().with_identity(ClusterIdentity {
            id: "ext-1".to_string(),
            name: "prod-east".to_string(),
            state: String::new(),
        });

        let text = render_status(&snapshot, now());
        assert!(text.starts_with("HCP Cluster Status: prod-east (ext-1)\n\n"));
        assert!(!text.contains("Cluster State:"));
        assert!(!text.contains("Management Cluster:"));
        assert!(text.contains("  No ManifestWork resources found"));
        assert!(text.contains("  No HostedCluster conditions available"));
        assert!(text.contains("  No certificate information available"));
        assert!(text.contains("  No NodePool resources found"));
        assert!(!text.contains("CLUSTER KUBE API CERTIFICATE"));
    }

    #[test]
    fn test_sync_table() {
        let snapshot = StatusSnapshot {
            syncs: vec![
                SyncSummary {
                    name: "abc".to_string(),
                    applied: true,
                    available: false,
                    last_sync_time: Some(now() - TimeDelta::minutes(3)),
                },
                SyncSummary {
                    name: "abc-workers".to_string(),
                    ..SyncSummary::default()
                },
            ],
            ..StatusSnapshot::default()
        };

        let text = render_status(&snapshot, now());
        assert!(text.contains("  NAME         APPLIED  AVAILABLE  LAST SYNC\n"));
        assert!(text.contains("  abc          True     False      3m ago\n"));
        assert!(text.contains("  abc-workers  False    False      (unknown)\n"));
    }

    #[test]
    fn test_control_plane_version_and_conditions() {
        let snapshot = StatusSnapshot {
            version: VersionInfo {
                current: "4.21.0".to_string(),
                desired: "4.21.1".to_string(),
                status: "Partial".to_string(),
                image: String::new(),
                available_updates: vec!["4.21.1".to_string(), "4.21.2".to_string()],
            },
            conditions: vec![
                condition("Available", "True", "AsExpected", ""),
                condition("Degraded", "True", "", "two problems\n  first\n\n  second"),
            ],
            ..StatusSnapshot::default()
        };

        let text = render_status(&snapshot, now());
        assert!(text.contains("    Current:            4.21.0  Desired: 4.21.1  Status: Partial\n"));
        assert!(text.contains("    Available Updates:  4.21.1, 4.21.2\n"));
        assert!(text.contains("    Note:"));
        assert!(text.contains("    Available  True    AsExpected\n"));
        assert!(text.contains("    Degraded   True    two problems\n"));
        assert!(text.contains("                       first\n"));
        assert!(text.contains("                       second\n"));
    }

    #[test]
    fn test_completed_version_has_no_note() {
        let snapshot = StatusSnapshot {
            version: VersionInfo {
                current: "4.21.0".to_string(),
                status: "Completed".to_string(),
                ..VersionInfo::default()
            },
            conditions: vec![condition("Available", "True", "", "")],
            ..StatusSnapshot::default()
        };

        let text = render_status(&snapshot, now());
        assert!(text.contains("Status: Completed"));
        assert!(!text.contains("Note:"));
    }

    #[test]
    fn test_unknown_version() {
        let snapshot = StatusSnapshot {
            conditions: vec![condition("Available", "True", "", "")],
            ..StatusSnapshot::default()
        };

        let text = render_status(&snapshot, now());
        assert!(text.contains("    Version:  (not available)\n"));
    }

    #[test]
    fn test_certificates() {
        let snapshot = StatusSnapshot {
            control_plane_certificate: Some(CertificateStatus::observed()),
            ingress_certificate: Some(CertificateStatus {
                ready: CertificateReadiness::Ready,
                not_after: Some(Utc.with_ymd_and_hms(2026, 3, 31, 0, 0, 0).unwrap()),
                renewal_time: Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()),
                dns_names: vec!["*.apps.example.com".to_string(), "apps.example.com".to_string()],
            }),
            ..StatusSnapshot::default()
        };

        let text = render_status(&snapshot, now());
        assert!(text.contains("CLUSTER KUBE API CERTIFICATE\n"));
        assert!(text.contains("  Status:     Ready\n"));
        assert!(text.contains("  Expires:    2026-03-31 (30d remaining)\n"));
        assert!(text.contains("  Renews:     2026-03-01\n"));
        assert!(text.contains("  DNS Names:  *.apps.example.com\n"));
        assert!(text.contains("\n              apps.example.com\n"));
    }

    #[test]
    fn test_unknown_readiness() {
        let snapshot = StatusSnapshot {
            ingress_certificate: Some(CertificateStatus::observed()),
            ..StatusSnapshot::default()
        };

        let text = render_status(&snapshot, now());
        assert!(text.contains("  Status:  Unknown\n"));
        assert!(!text.contains("Expires:"));
    }

    #[test]
    fn test_worker_pool_header() {
        let snapshot = StatusSnapshot {
            worker_pools: vec![
                WorkerPoolStatus {
                    name: "workers-a".to_string(),
                    replicas: 3,
                    version: "4.21.0".to_string(),
                    conditions: vec![condition("Ready", "True", "", "")],
                },
                WorkerPoolStatus {
                    name: "workers-b".to_string(),
                    ..WorkerPoolStatus::default()
                },
            ],
            ..StatusSnapshot::default()
        };

        let text = render_status(&snapshot, now());
        assert!(text.contains("NODEPOOL: workers-a (3 replicas, v4.21.0)\n"));
        assert!(text.contains("  Ready      True    \n"));
        assert!(text.contains("NODEPOOL: workers-b\n"));
    }
}
