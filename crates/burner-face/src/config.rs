//! Burner geometry configuration.
//!
//! All dimensions are in meters. For the honeycomb face the hexagonal
//! cell equals the air tube inner diameter.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Flat record of the burner face dimensions.
///
/// `center_distance` (the lattice pitch) is derived from the cell size and
/// wall thickness and cannot be set on its own.
///
/// Keys may be written snake_case (`jet_id`) or with the upper-case
/// suffixes used on drawings (`jet_ID`). Missing keys take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeometryConfig {
    /// Inner diameter of the central jet pipe
    #[serde(alias = "jet_ID")]
    pub jet_id: f64,
    /// Outer diameter of the central jet pipe
    #[serde(alias = "jet_OD")]
    pub jet_od: f64,
    /// Inner diameter of a pilot fuel tube
    #[serde(alias = "pilot_fuel_ID")]
    pub pilot_fuel_id: f64,
    /// Outer diameter of a pilot fuel tube
    #[serde(alias = "pilot_fuel_OD")]
    pub pilot_fuel_od: f64,
    /// Inner diameter of a pilot air tube
    #[serde(alias = "pilot_air_ID")]
    pub pilot_air_id: f64,
    /// Inner diameter of the pilot burner (honeycomb wall boundary)
    #[serde(alias = "pilot_burner_ID")]
    pub pilot_burner_id: f64,
    /// Outer diameter of the pilot burner
    #[serde(alias = "pilot_burner_OD")]
    pub pilot_burner_od: f64,
    /// Distance between parallel faces of a hex cell (twice the apothem)
    pub pilot_hex_cell_size: f64,
    /// Wall thickness between hex cells
    pub pilot_hex_wall_th: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            jet_id: 2.0e-3,
            jet_od: 3.5e-3,
            pilot_fuel_id: 1.0e-3,
            pilot_fuel_od: 1.6e-3,
            pilot_air_id: 1.6e-3,
            pilot_burner_id: 30e-3,
            pilot_burner_od: 32e-3,
            pilot_hex_cell_size: 1.6e-3,
            pilot_hex_wall_th: 0.13e-3,
        }
    }
}

impl GeometryConfig {
    /// Lattice pitch: hex cell size plus wall thickness.
    #[inline]
    pub fn center_distance(&self) -> f64 {
        self.pilot_hex_cell_size + self.pilot_hex_wall_th
    }

    /// Name/value pairs using the drawing spellings.
    pub fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("jet_ID", self.jet_id),
            ("jet_OD", self.jet_od),
            ("pilot_fuel_ID", self.pilot_fuel_id),
            ("pilot_fuel_OD", self.pilot_fuel_od),
            ("pilot_air_ID", self.pilot_air_id),
            ("pilot_burner_ID", self.pilot_burner_id),
            ("pilot_burner_OD", self.pilot_burner_od),
            ("pilot_hex_cell_size", self.pilot_hex_cell_size),
            ("pilot_hex_wall_th", self.pilot_hex_wall_th),
        ]
    }

    /// Check that every length is positive and finite.
    ///
    /// Outer diameters smaller than their inner diameters are suspicious
    /// but do not break the layout, so they are only logged.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidConfiguration { field, value });
            }
        }

        for (od_name, od, id_name, id) in [
            ("jet_OD", self.jet_od, "jet_ID", self.jet_id),
            ("pilot_fuel_OD", self.pilot_fuel_od, "pilot_fuel_ID", self.pilot_fuel_id),
            ("pilot_burner_OD", self.pilot_burner_od, "pilot_burner_ID", self.pilot_burner_id),
        ] {
            if od < id {
                tracing::warn!(od_name, od, id_name, id, "outer diameter is smaller than inner diameter");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GeometryConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.center_distance() - 1.73e-3).abs() < 1e-15);
    }

    #[test]
    fn rejects_non_positive_lengths() {
        let config = GeometryConfig { pilot_air_id: 0.0, ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(LayoutError::InvalidConfiguration { field: "pilot_air_ID", value: 0.0 })
        );

        let config = GeometryConfig { pilot_hex_wall_th: -1e-4, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfiguration { field: "pilot_hex_wall_th", .. })
        ));

        let config = GeometryConfig { jet_od: f64::INFINITY, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn thinner_walls_shrink_the_pitch() {
        let thick = GeometryConfig::default();
        let thin = GeometryConfig { pilot_hex_wall_th: 0.05e-3, ..thick };
        assert!(thin.center_distance() < thick.center_distance());
    }
}
