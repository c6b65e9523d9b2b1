//! Garden-wide summaries: status distribution, per-metric statistics and
//! recommendations derived from the current snapshot and plant records.

use serde::{Deserialize, Serialize};

use garden_types::{Metric, PlantRecord, PlantStatus, Reading, Snapshot};

use crate::status::Tone;

/// Average light level below which a light recommendation is raised.
pub const LOW_LIGHT_LUX: f64 = 400.0;

/// Count of plants per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub healthy: usize,
    pub needs_water: usize,
    pub attention: usize,
    pub unknown: usize,
}

impl StatusSummary {
    /// Tally recorded statuses.
    ///
    /// ```
    /// use garden_core::{StatusSummary, plants::default_catalog};
    ///
    /// let summary = StatusSummary::from_plants(&default_catalog());
    /// assert_eq!((summary.healthy, summary.needs_water, summary.attention), (2, 1, 1));
    /// ```
    #[must_use]
    pub fn from_plants(plants: &[PlantRecord]) -> Self {
        let mut summary = Self::default();
        for plant in plants {
            match plant.status {
                PlantStatus::Healthy => summary.healthy += 1,
                PlantStatus::NeedsWater => summary.needs_water += 1,
                PlantStatus::Attention => summary.attention += 1,
                PlantStatus::Unknown(_) => summary.unknown += 1,
            }
        }
        summary
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.healthy + self.needs_water + self.attention + self.unknown
    }

    /// Non-empty slices for a distribution chart: `(name, count, tone)`.
    #[must_use]
    pub fn slices(&self) -> Vec<(&'static str, usize, Tone)> {
        [
            ("Healthy", self.healthy, Tone::Green),
            ("Needs Water", self.needs_water, Tone::Red),
            ("Attention", self.attention, Tone::Yellow),
            ("Unknown", self.unknown, Tone::Gray),
        ]
        .into_iter()
        .filter(|(_, count, _)| *count > 0)
        .collect()
    }
}

/// Min/max/average/latest of one metric over a reading window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub metric: Metric,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub latest: f64,
}

impl MetricStats {
    /// `None` for an empty window.
    #[must_use]
    pub fn compute(readings: &[Reading], metric: Metric) -> Option<Self> {
        let latest = readings.last()?.value(metric);
        let (min, max, sum) = readings.iter().map(|r| r.value(metric)).fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), v| (min.min(v), max.max(v), sum + v),
        );
        Some(Self {
            metric,
            min,
            max,
            avg: sum / readings.len() as f64,
            latest,
        })
    }
}

/// Statistics for every metric of a snapshot.
#[must_use]
pub fn snapshot_stats(snapshot: &Snapshot) -> Vec<MetricStats> {
    Metric::ALL
        .iter()
        .filter_map(|metric| MetricStats::compute(&snapshot.readings, *metric))
        .collect()
}

/// Category of a recommendation card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Watering,
    Light,
    Growth,
}

impl RecommendationKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            RecommendationKind::Watering => "Watering Alert",
            RecommendationKind::Light => "Light Optimization",
            RecommendationKind::Growth => "Growth Tip",
        }
    }
}

/// One recommendation card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
}

/// Build recommendation cards from plant records and the latest snapshot.
///
/// - one watering alert per plant below its optimal minimum
/// - a light card when the window's average light is under [`LOW_LIGHT_LUX`]
/// - a growth tip for the first plant recorded healthy and inside its range
#[must_use]
pub fn recommendations(plants: &[PlantRecord], snapshot: Option<&Snapshot>) -> Vec<Recommendation> {
    let mut cards: Vec<Recommendation> = plants
        .iter()
        .filter_map(|plant| {
            plant.moisture_deficit().map(|deficit| Recommendation {
                kind: RecommendationKind::Watering,
                message: format!(
                    "{} needs immediate watering. Soil moisture is {} points below the optimal range ({}).",
                    plant.name, deficit, plant.optimal_range
                ),
            })
        })
        .collect();

    if let Some(light) =
        snapshot.and_then(|s| MetricStats::compute(&s.readings, Metric::Light))
        && light.avg < LOW_LIGHT_LUX
    {
        cards.push(Recommendation {
            kind: RecommendationKind::Light,
            message: format!(
                "Average light over the last 24 hours is {:.0} lux. Consider moving beds to receive 2-3 more hours of morning sunlight.",
                light.avg
            ),
        });
    }

    if let Some(plant) = plants
        .iter()
        .find(|p| p.status == PlantStatus::Healthy && p.is_consistent())
    {
        cards.push(Recommendation {
            kind: RecommendationKind::Growth,
            message: format!(
                "{} are in optimal conditions at {}% soil moisture. Keep the current watering schedule.",
                plant.name, plant.soil_moisture
            ),
        });
    }

    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plants::default_catalog;
    use garden_types::{OptimalRange, WeatherSnapshot};
    use time::macros::datetime;

    fn snapshot_with_light(values: &[u16]) -> Snapshot {
        let start = datetime!(2024-06-01 00:00 UTC);
        let readings = values
            .iter()
            .enumerate()
            .map(|(i, light)| Reading {
                timestamp: start + time::Duration::hours(i as i64),
                soil_moisture: 40 + i as u8,
                temperature: 20.0,
                humidity: 50,
                light: *light,
                ph: 7.0,
            })
            .collect();
        Snapshot {
            generation: 1,
            captured_at: start,
            readings,
            weather: WeatherSnapshot::default(),
        }
    }

    #[test]
    fn test_summary_of_default_catalog() {
        let summary = StatusSummary::from_plants(&default_catalog());
        assert_eq!(summary.healthy, 2);
        assert_eq!(summary.needs_water, 1);
        assert_eq!(summary.attention, 1);
        assert_eq!(summary.unknown, 0);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_slices_skip_empty_statuses() {
        let summary = StatusSummary {
            healthy: 3,
            ..StatusSummary::default()
        };
        assert_eq!(summary.slices(), vec![("Healthy", 3, Tone::Green)]);
    }

    #[test]
    fn test_metric_stats() {
        let snapshot = snapshot_with_light(&[200, 400, 900]);
        let stats = MetricStats::compute(&snapshot.readings, Metric::Light).unwrap();
        assert_eq!(stats.min, 200.0);
        assert_eq!(stats.max, 900.0);
        assert_eq!(stats.avg, 500.0);
        assert_eq!(stats.latest, 900.0);
    }

    #[test]
    fn test_metric_stats_empty() {
        assert!(MetricStats::compute(&[], Metric::Ph).is_none());
    }

    #[test]
    fn test_snapshot_stats_covers_all_metrics() {
        let stats = snapshot_stats(&snapshot_with_light(&[500, 600]));
        assert_eq!(stats.len(), Metric::ALL.len());
        assert_eq!(stats[0].metric, Metric::SoilMoisture);
        assert_eq!(stats[0].latest, 41.0);
    }

    #[test]
    fn test_recommendations_for_default_catalog() {
        let cards = recommendations(&default_catalog(), None);
        let kinds: Vec<_> = cards.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![RecommendationKind::Watering, RecommendationKind::Growth]
        );
        assert!(cards[0].message.starts_with("Basil needs immediate watering"));
        assert!(cards[0].message.contains("15 points below"));
        assert!(cards[1].message.starts_with("Tomatoes are in optimal conditions"));
    }

    #[test]
    fn test_low_light_recommendation() {
        let dim = snapshot_with_light(&[200, 250, 300]);
        let cards = recommendations(&[], Some(&dim));
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].kind, RecommendationKind::Light);
        assert!(cards[0].message.contains("250 lux"));

        let bright = snapshot_with_light(&[800, 900]);
        assert!(recommendations(&[], Some(&bright)).is_empty());
    }

    #[test]
    fn test_no_growth_tip_without_consistent_healthy_plant() {
        let plant = PlantRecord {
            id: 1,
            name: "Peppers".to_string(),
            status: PlantStatus::Healthy,
            soil_moisture: 90,
            optimal_range: OptimalRange::new(40, 60).unwrap(),
            last_watered: String::new(),
            next_watering: String::new(),
        };
        assert!(recommendations(&[plant], None).is_empty());
    }

    #[test]
    fn test_kind_titles() {
        assert_eq!(RecommendationKind::Watering.title(), "Watering Alert");
        assert_eq!(RecommendationKind::Light.title(), "Light Optimization");
        assert_eq!(RecommendationKind::Growth.title(), "Growth Tip");
    }
}
