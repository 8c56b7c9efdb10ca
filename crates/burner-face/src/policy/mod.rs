//! Hole layout policies.
//!
//! A policy turns a [`GeometryConfig`] into concrete holes and then into a
//! [`LayoutReport`]. The two policies use different boundary margins and
//! different statistics formulas; neither is derived from the other.

mod honeycomb;
mod plate;

pub use honeycomb::HoneycombPolicy;
pub use plate::PlatePolicy;

use crate::config::GeometryConfig;
use crate::error::LayoutError;
use crate::export::{self, ExportTarget};
use crate::holes::HoleLayout;
use crate::report::LayoutReport;

/// A layout strategy.
///
/// ## Rust Lesson #24: Traits
///
/// A trait is a set of methods a type promises to provide - like an
/// interface. `&dyn LayoutPolicy` lets callers hold either policy behind
/// one pointer without an inheritance hierarchy.
///
/// Implementations are pure: the same config always yields the same
/// layout, and no state is shared between runs.
pub trait LayoutPolicy: Send + Sync {
    /// Build air holes, fuel holes and the central jet.
    fn build_holes(&self, config: GeometryConfig) -> Result<HoleLayout, LayoutError>;

    /// Aggregate a built layout into a report.
    fn compute_statistics(&self, layout: &HoleLayout) -> Result<LayoutReport, LayoutError>;
}

/// Available layout policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Circular air holes drilled in a solid plate
    #[default]
    Plate,
    /// Hexagonal air cells between honeycomb walls
    Honeycomb,
}

impl Policy {
    /// Get all available policies.
    pub fn all() -> &'static [Policy] {
        &[Policy::Plate, Policy::Honeycomb]
    }

    /// Get policy name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Plate => "plate",
            Policy::Honeycomb => "honeycomb",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            Policy::Plate => "Circular air and fuel holes drilled in a solid plate",
            Policy::Honeycomb => "Hexagonal air cells with fuel tubes in the cell centers",
        }
    }

    /// Parse policy from string.
    pub fn from_name(name: &str) -> Option<Policy> {
        match name.to_lowercase().as_str() {
            "plate" | "solid" | "drilled" => Some(Policy::Plate),
            "honeycomb" | "hex" | "hexmesh" | "hex-mesh" => Some(Policy::Honeycomb),
            _ => None,
        }
    }

    /// The strategy object implementing this policy.
    pub fn strategy(&self) -> &'static dyn LayoutPolicy {
        match self {
            Policy::Plate => &PlatePolicy,
            Policy::Honeycomb => &HoneycombPolicy,
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::from_name(s).ok_or_else(|| {
            let known: Vec<_> = Policy::all().iter().map(Policy::name).collect();
            format!("unknown policy '{}' (expected one of: {})", s, known.join(", "))
        })
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Build the holes for a policy and return them unaggregated.
pub fn get_hole_coordinates(policy: Policy, config: GeometryConfig) -> Result<HoleLayout, LayoutError> {
    config.validate()?;
    policy.strategy().build_holes(config)
}

/// Build the holes for a policy and aggregate them into a report.
pub fn generate_layout(policy: Policy, config: GeometryConfig) -> Result<LayoutReport, LayoutError> {
    let layout = get_hole_coordinates(policy, config)?;
    let report = policy.strategy().compute_statistics(&layout)?;
    tracing::info!(
        policy = policy.name(),
        air_holes = report.air_hole_number,
        fuel_holes = report.fuel_hole_number,
        ratio = report.air_to_fuel_area_ratio,
        "layout generated"
    );
    Ok(report)
}

/// Generate a layout and optionally export it.
///
/// The export is best-effort: a failed write is logged and the report is
/// still returned. Layout errors are returned as usual.
pub fn run_layout(
    policy: Policy,
    config: GeometryConfig,
    export_to: Option<&ExportTarget>,
) -> Result<LayoutReport, LayoutError> {
    let layout = get_hole_coordinates(policy, config)?;
    let report = policy.strategy().compute_statistics(&layout)?;

    if let Some(target) = export_to {
        match export::export_to_target(&layout, target) {
            Ok(path) => tracing::info!(path = %path.display(), "layout exported"),
            Err(err) => tracing::warn!(error = %err, "export failed; report is unaffected"),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for policy in Policy::all() {
            assert_eq!(Policy::from_name(policy.name()), Some(*policy));
            assert_eq!(policy.name().parse::<Policy>(), Ok(*policy));
        }
        assert_eq!(Policy::from_name("HEX"), Some(Policy::Honeycomb));
        assert!("triangle".parse::<Policy>().is_err());
    }

    #[test]
    fn invalid_config_fails_before_building() {
        let config = GeometryConfig { pilot_hex_cell_size: 0.0, ..Default::default() };
        for policy in Policy::all() {
            assert!(matches!(
                generate_layout(*policy, config),
                Err(LayoutError::InvalidConfiguration { field: "pilot_hex_cell_size", .. })
            ));
        }
    }

    #[test]
    fn layouts_are_deterministic() {
        let config = GeometryConfig::default();
        for policy in Policy::all() {
            let a = get_hole_coordinates(*policy, config).unwrap();
            let b = get_hole_coordinates(*policy, config).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn concurrent_runs_do_not_interfere() {
        let config = GeometryConfig::default();
        let expected: Vec<_> = Policy::all()
            .iter()
            .map(|p| generate_layout(*p, config).unwrap())
            .collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = Policy::all()
                .iter()
                .map(|p| scope.spawn(move || generate_layout(*p, config).unwrap()))
                .collect();
            for (handle, want) in handles.into_iter().zip(&expected) {
                assert_eq!(handle.join().unwrap(), *want);
            }
        });
    }

    #[test]
    fn failed_export_keeps_the_report() {
        let config = GeometryConfig::default();
        let target = ExportTarget::file(
            "/nonexistent-dir/for/sure/geometry.dxf",
            crate::export::ExportFormat::Dxf,
        );
        let with_export = run_layout(Policy::Plate, config, Some(&target)).unwrap();
        let without = generate_layout(Policy::Plate, config).unwrap();
        assert_eq!(with_export, without);
    }
}
