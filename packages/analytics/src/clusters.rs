//! Geospatial cluster explorer.
//!
//! Cluster positions are pre-placed on the schematic map; nothing here
//! computes geometry. Labels follow the `"Area (Dominant Crime)"` format
//! the clustering report uses.

use crime_insights_analytics_models::ClusterDetails;
use crime_insights_dataset_models::Cluster;

/// Finds a cluster by id.
#[must_use]
pub fn find_cluster(clusters: &[Cluster], id: u32) -> Option<&Cluster> {
    clusters.iter().find(|c| c.id == id)
}

/// Extracts the dominant crime from a cluster label.
///
/// `"North Side (Theft)"` yields `Some("Theft")`. Labels without a
/// parenthesized suffix yield `None`.
#[must_use]
pub fn dominant_crime(label: &str) -> Option<&str> {
    let (_, rest) = label.split_once('(')?;
    let (crime, _) = rest.split_once(')')?;
    let crime = crime.trim();
    (!crime.is_empty()).then_some(crime)
}

/// Returns the area part of a cluster label, without the dominant crime.
#[must_use]
pub fn area_name(label: &str) -> &str {
    label
        .split_once('(')
        .map_or(label, |(area, _)| area)
        .trim()
}

/// Builds the details panel for a cluster.
#[must_use]
pub fn cluster_details(cluster: &Cluster) -> ClusterDetails {
    ClusterDetails {
        id: cluster.id,
        area: area_name(&cluster.label).to_string(),
        dominant_crime: dominant_crime(&cluster.label).map(str::to_string),
        incident_volume: cluster.size,
    }
}

/// Returns clusters ordered by incident volume, largest first.
#[must_use]
pub fn ranked_by_volume(clusters: &[Cluster]) -> Vec<&Cluster> {
    let mut ranked: Vec<&Cluster> = clusters.iter().collect();
    ranked.sort_by(|a, b| b.size.cmp(&a.size));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dominant_crime_from_label() {
        assert_eq!(dominant_crime("North Side (Theft)"), Some("Theft"));
        assert_eq!(dominant_crime("West Suburbs (Damage)"), Some("Damage"));
        assert_eq!(dominant_crime("Downtown"), None);
        assert_eq!(dominant_crime("Downtown ()"), None);
        assert_eq!(dominant_crime("Downtown (Theft"), None);
    }

    #[test]
    fn area_name_drops_the_suffix() {
        assert_eq!(area_name("Far South (Weapons)"), "Far South");
        assert_eq!(area_name("Downtown"), "Downtown");
    }

    #[test]
    fn snapshot_cluster_details() {
        let dataset = crime_insights_dataset::snapshot().unwrap();
        let cluster = find_cluster(&dataset.clusters, 2).unwrap();

        assert_eq!(
            cluster_details(cluster),
            ClusterDetails {
                id: 2,
                area: "West Side".to_string(),
                dominant_crime: Some("Narcotics".to_string()),
                incident_volume: 600,
            }
        );
        assert!(find_cluster(&dataset.clusters, 99).is_none());
    }

    #[test]
    fn ranks_clusters_by_volume() {
        let dataset = crime_insights_dataset::snapshot().unwrap();
        let ids: Vec<u32> = ranked_by_volume(&dataset.clusters)
            .iter()
            .map(|c| c.id)
            .collect();

        assert_eq!(ids, vec![2, 4, 3, 6, 1, 7, 5]);
    }
}
