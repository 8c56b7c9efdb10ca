//! Holes command: dump hole outlines per drawing layer as JSON.

use std::path::PathBuf;

use serde::Serialize;

use burner_face::{get_hole_coordinates, Circle, HoleLayout, Layer, Point, Policy};

use super::common::{load_config, print_json};

/// One layer of outlines; each outline is a closed `[x, y]` loop in meters.
#[derive(Serialize)]
struct JsonLayer {
    name: &'static str,
    outlines: Vec<Vec<[f64; 2]>>,
}

#[derive(Serialize)]
struct JsonHoles {
    policy: &'static str,
    layers: Vec<JsonLayer>,
}

fn loop_of(points: Vec<Point>) -> Vec<[f64; 2]> {
    points.into_iter().map(|p| [p.x, p.y]).collect()
}

fn circle_loops<'a>(circles: impl Iterator<Item = &'a Circle>) -> Vec<Vec<[f64; 2]>> {
    circles.map(|c| loop_of(c.outline())).collect()
}

/// Outlines grouped the same way the exporters group them.
fn layers(layout: &HoleLayout) -> Vec<JsonLayer> {
    let fuel = layout
        .fuel
        .iter()
        .flat_map(|f| std::iter::once(&f.inner).chain(f.outer.as_ref()));

    let mut layers = vec![
        JsonLayer {
            name: Layer::AirHoles.name(),
            outlines: layout.air.iter().map(|h| loop_of(h.shape.outline())).collect(),
        },
        JsonLayer { name: Layer::FuelHoles.name(), outlines: circle_loops(fuel) },
        JsonLayer {
            name: Layer::CentralJet.name(),
            outlines: circle_loops(std::iter::once(&layout.jet.inner)),
        },
    ];
    if let Some(outer) = &layout.jet.outer {
        layers.push(JsonLayer {
            name: Layer::CentralJetOd.name(),
            outlines: circle_loops(std::iter::once(outer)),
        });
    }
    layers
}

pub fn cmd_holes(policy: Policy, config: Option<PathBuf>) -> Result<(), String> {
    let config = load_config(config.as_deref())?;
    let layout = get_hole_coordinates(policy, config).map_err(|e| e.to_string())?;

    print_json(&JsonHoles { policy: policy.name(), layers: layers(&layout) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use burner_face::GeometryConfig;

    #[test]
    fn plate_has_three_layers() {
        let layout = get_hole_coordinates(Policy::Plate, GeometryConfig::default()).unwrap();
        let layers = layers(&layout);

        let names: Vec<_> = layers.iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["AirHoles", "FuelHoles", "CentralJet"]);
        assert_eq!(layers[0].outlines.len(), layout.air.len());
        assert_eq!(layers[1].outlines.len(), layout.fuel.len());
    }

    #[test]
    fn honeycomb_adds_od_outlines() {
        let layout = get_hole_coordinates(Policy::Honeycomb, GeometryConfig::default()).unwrap();
        let layers = layers(&layout);

        assert_eq!(layers.len(), 4);
        assert_eq!(layers[1].outlines.len(), 2 * layout.fuel.len());
        assert_eq!(layers[3].name, "CentralJetOD");
    }
}
