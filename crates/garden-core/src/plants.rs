//! The default plant catalog.

use garden_types::{OptimalRange, PlantRecord, PlantStatus};

use crate::error::{Error, Result};

/// The four beds shown when no catalog is configured.
///
/// Statuses are recorded values, not derived ones. Carrots read
/// "attention" even though 45% sits inside 40-60%.
#[must_use]
pub fn default_catalog() -> Vec<PlantRecord> {
    vec![
        record(1, "Tomatoes", PlantStatus::Healthy, 65, (60, 70), "2 hours ago", "in 6 hours"),
        record(2, "Basil", PlantStatus::NeedsWater, 35, (50, 65), "8 hours ago", "now"),
        record(3, "Lettuce", PlantStatus::Healthy, 58, (55, 70), "4 hours ago", "in 4 hours"),
        record(4, "Carrots", PlantStatus::Attention, 45, (40, 60), "6 hours ago", "in 2 hours"),
    ]
}

fn record(
    id: u32,
    name: &str,
    status: PlantStatus,
    soil_moisture: u8,
    (min, max): (u8, u8),
    last_watered: &str,
    next_watering: &str,
) -> PlantRecord {
    PlantRecord {
        id,
        name: name.to_string(),
        status,
        soil_moisture,
        // Literal bounds above are ordered and within 0-100.
        optimal_range: OptimalRange::new(min, max).unwrap_or(OptimalRange::FULL),
        last_watered: last_watered.to_string(),
        next_watering: next_watering.to_string(),
    }
}

/// Check a user-supplied catalog: non-empty names, unique ids, moisture 0-100.
pub fn validate_catalog(plants: &[PlantRecord]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for plant in plants {
        if plant.name.trim().is_empty() {
            return Err(Error::invalid_config(format!(
                "plant {} has an empty name",
                plant.id
            )));
        }
        if !seen.insert(plant.id) {
            return Err(Error::invalid_config(format!(
                "duplicate plant id {}",
                plant.id
            )));
        }
        if plant.soil_moisture > 100 {
            return Err(Error::invalid_config(format!(
                "{}: soil moisture {} exceeds 100",
                plant.name, plant.soil_moisture
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        let plants = default_catalog();
        let names: Vec<_> = plants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Tomatoes", "Basil", "Lettuce", "Carrots"]);
        assert!(validate_catalog(&plants).is_ok());
    }

    #[test]
    fn test_catalog_basil_and_tomatoes() {
        let plants = default_catalog();
        let basil = &plants[1];
        assert_eq!(basil.name, "Basil");
        assert_eq!(basil.soil_moisture, 35);
        assert_eq!(basil.derived_status(), PlantStatus::NeedsWater);

        let tomatoes = &plants[0];
        assert_eq!(tomatoes.derived_status(), PlantStatus::Healthy);
    }

    #[test]
    fn test_catalog_only_carrots_inconsistent() {
        let inconsistent: Vec<_> = default_catalog()
            .into_iter()
            .filter(|p| !p.is_consistent())
            .map(|p| p.name)
            .collect();
        assert_eq!(inconsistent, ["Carrots"]);
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut plants = default_catalog();
        plants[1].id = 1;
        let err = validate_catalog(&plants).unwrap_err();
        assert!(err.to_string().contains("duplicate plant id 1"));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut plants = default_catalog();
        plants[0].name = " ".to_string();
        assert!(validate_catalog(&plants).is_err());
    }
}
