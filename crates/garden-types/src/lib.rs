//! Platform-agnostic types for garden sensor dashboards.
//!
//! This crate provides the shared data model used by the dashboard
//! view-model (garden-core) and its front ends (garden-cli).
//!
//! # Features
//!
//! - Hourly sensor [`Reading`]s and the 24-slot [`Snapshot`] window
//! - [`PlantRecord`]s with an [`OptimalRange`] moisture band
//! - [`WeatherSnapshot`] for outdoor conditions
//! - Error types for validation
//!
//! # Example
//!
//! ```
//! use garden_types::{OptimalRange, PlantStatus};
//!
//! let range = OptimalRange::new(60, 70).unwrap();
//! assert_eq!(range.classify(65), PlantStatus::Healthy);
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    Metric, OptimalRange, PlantRecord, PlantStatus, READING_WINDOW, Reading, Snapshot,
    WeatherCondition, WeatherSnapshot,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(name: &str, status: &str, moisture: u8, min: u8, max: u8) -> PlantRecord {
        PlantRecord {
            id: 1,
            name: name.to_string(),
            status: status.parse().unwrap(),
            soil_moisture: moisture,
            optimal_range: OptimalRange::new(min, max).unwrap(),
            last_watered: "2 hours ago".to_string(),
            next_watering: "in 6 hours".to_string(),
        }
    }

    // --- PlantStatus tests ---

    #[test]
    fn test_status_parse_known_values() {
        assert_eq!("healthy".parse(), Ok(PlantStatus::Healthy));
        assert_eq!("needs-water".parse(), Ok(PlantStatus::NeedsWater));
        assert_eq!("attention".parse(), Ok(PlantStatus::Attention));
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("HEALTHY".parse(), Ok(PlantStatus::Healthy));
        assert_eq!(" Needs-Water ".parse(), Ok(PlantStatus::NeedsWater));
        assert_eq!("needs water".parse(), Ok(PlantStatus::NeedsWater));
    }

    #[test]
    fn test_status_parse_unknown_keeps_raw() {
        let status: PlantStatus = "dormant".parse().unwrap();
        assert_eq!(status, PlantStatus::Unknown("dormant".to_string()));
        assert_eq!(status.to_string(), "dormant");
    }

    #[test]
    fn test_status_display_uses_wire_form() {
        assert_eq!(PlantStatus::Healthy.to_string(), "healthy");
        assert_eq!(PlantStatus::NeedsWater.to_string(), "needs-water");
        assert_eq!(PlantStatus::Attention.to_string(), "attention");
    }

    // --- OptimalRange tests ---

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let err = OptimalRange::new(70, 60).unwrap_err();
        assert_eq!(err, ParseError::InvalidRange { min: 70, max: 60 });
        assert_eq!(
            err.to_string(),
            "Invalid range: min 70 is greater than max 60"
        );
    }

    #[test]
    fn test_range_rejects_over_100() {
        assert_eq!(
            OptimalRange::new(50, 120),
            Err(ParseError::InvalidPercentage(120))
        );
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = OptimalRange::new(40, 60).unwrap();
        assert!(range.contains(40));
        assert!(range.contains(60));
        assert!(!range.contains(39));
        assert!(!range.contains(61));
        assert_eq!(range.to_string(), "40-60%");
    }

    // --- PlantRecord derivation tests ---

    #[test]
    fn test_basil_derives_needs_water() {
        let basil = plant("Basil", "needs-water", 35, 50, 65);
        assert_eq!(basil.derived_status(), PlantStatus::NeedsWater);
        assert!(basil.is_consistent());
    }

    #[test]
    fn test_tomatoes_derive_healthy() {
        let tomatoes = plant("Tomatoes", "healthy", 65, 60, 70);
        assert_eq!(tomatoes.derived_status(), PlantStatus::Healthy);
        assert!(tomatoes.is_consistent());
    }

    #[test]
    fn test_carrots_recorded_status_disagrees() {
        let carrots = plant("Carrots", "attention", 45, 40, 60);
        assert_eq!(carrots.derived_status(), PlantStatus::Healthy);
        assert!(!carrots.is_consistent());
    }

    #[test]
    fn test_above_range_derives_attention() {
        let soggy = plant("Lettuce", "healthy", 80, 55, 70);
        assert_eq!(soggy.derived_status(), PlantStatus::Attention);
    }

    // --- WeatherSnapshot tests ---

    #[test]
    fn test_weather_default_values() {
        let weather = WeatherSnapshot::default();
        assert!((weather.temperature - 24.0).abs() < f32::EPSILON);
        assert_eq!(weather.humidity, 62);
        assert!((weather.wind_speed - 8.0).abs() < f32::EPSILON);
        assert_eq!(weather.condition, WeatherCondition::PartlyCloudy);
        assert_eq!(weather.uv_index, 6);
        assert_eq!(weather.condition.to_string(), "Partly Cloudy");
    }

    // --- Serialization tests ---

    #[test]
    fn test_plant_record_json_shape() {
        let basil = plant("Basil", "needs-water", 35, 50, 65);
        let json = serde_json::to_string(&basil).unwrap();
        assert!(json.contains("\"status\":\"needs-water\""));
        assert!(json.contains("\"optimal_range\":[50,65]"));
    }

    #[test]
    fn test_plant_record_deserialize_unknown_status() {
        let json = r#"{"id":9,"name":"Mint","status":"spreading","soil_moisture":50,"optimal_range":[40,60],"last_watered":"1 hour ago","next_watering":"tomorrow"}"#;
        let record: PlantRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, PlantStatus::Unknown("spreading".to_string()));
    }

    #[test]
    fn test_plant_record_deserialize_rejects_inverted_range() {
        let json = r#"{"id":9,"name":"Mint","status":"healthy","soil_moisture":50,"optimal_range":[60,40],"last_watered":"","next_watering":""}"#;
        let result: Result<PlantRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_weather_condition_serialization() {
        assert_eq!(
            serde_json::to_string(&WeatherCondition::PartlyCloudy).unwrap(),
            "\"partly-cloudy\""
        );
        let parsed: WeatherCondition = serde_json::from_str("\"rain\"").unwrap();
        assert_eq!(parsed, WeatherCondition::Rain);
    }

    #[test]
    fn test_reading_timestamp_is_rfc3339() {
        let reading = Reading {
            timestamp: time::macros::datetime!(2024-06-01 15:00 UTC),
            soil_moisture: 50,
            temperature: 20.0,
            humidity: 50,
            light: 500,
            ph: 7.0,
        };
        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"timestamp\":\"2024-06-01T15:00:00Z\""));
    }
}
