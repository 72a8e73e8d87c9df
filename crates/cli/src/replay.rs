use crate::di::PathStoreServices;
use ferrous_pathstore_application::ports::Admission;
use ferrous_pathstore_domain::{Beacon, DomainError, IsdAs, PathSegment, SegmentId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// One line of a replay file: an announcement or a withdrawal.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReplayEntry {
    Add {
        destination: IsdAs,
        segment: Beacon,
    },
    Remove {
        destination: IsdAs,
        remove: Vec<String>,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationReport {
    pub destination: IsdAs,
    pub inserted: usize,
    pub refreshed: usize,
    pub rejected: usize,
    pub expired: usize,
    pub evicted: usize,
    pub removed: usize,
    pub best: Vec<SegmentReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentReport {
    pub id: String,
    pub hops: usize,
    pub description: String,
}

pub fn load_entries(path: &str) -> anyhow::Result<Vec<ReplayEntry>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Feeds `entries` through the use cases in order, then asks every touched
/// destination for its best `k` segments.
pub async fn replay(
    services: &PathStoreServices,
    entries: Vec<ReplayEntry>,
    k: Option<usize>,
) -> Result<Vec<DestinationReport>, DomainError> {
    let mut reports: BTreeMap<IsdAs, DestinationReport> = BTreeMap::new();

    for entry in entries {
        match entry {
            ReplayEntry::Add {
                destination,
                segment,
            } => {
                let outcome = services.add_segment.execute(destination, segment).await?;
                let report = report_for(&mut reports, destination);
                match outcome.admission {
                    Admission::Rejected => report.rejected += 1,
                    Admission::Refreshed => report.refreshed += 1,
                    Admission::Expired => report.expired += 1,
                    Admission::Inserted { evicted } => {
                        report.inserted += 1;
                        if evicted.is_some() {
                            report.evicted += 1;
                        }
                    }
                }
                if outcome.propagation_due {
                    info!(destination = %destination, "Propagation round due");
                    services.add_segment.mark_propagated();
                }
            }
            ReplayEntry::Remove {
                destination,
                remove,
            } => {
                let ids = parse_ids(&remove);
                let removed = services.remove_segments.execute(destination, ids).await?;
                report_for(&mut reports, destination).removed += removed;
            }
        }
    }

    for report in reports.values_mut() {
        let best = services
            .get_best_segments
            .execute(report.destination, k)
            .await?;
        report.best = best
            .iter()
            .map(|segment| SegmentReport {
                id: segment.identity_hash().to_hex(),
                hops: segment.hop_count(),
                description: segment.short_description(),
            })
            .collect();
    }

    Ok(reports.into_values().collect())
}

fn report_for(
    reports: &mut BTreeMap<IsdAs, DestinationReport>,
    destination: IsdAs,
) -> &mut DestinationReport {
    reports
        .entry(destination)
        .or_insert_with(|| DestinationReport {
            destination,
            ..DestinationReport::default()
        })
}

fn parse_ids(raw: &[String]) -> Vec<SegmentId> {
    raw.iter()
        .filter_map(|id| match id.parse() {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(error = %e, "Skipping malformed segment id");
                None
            }
        })
        .collect()
}
