//! End-to-end checks over the public API.

use std::collections::HashMap;

use burner_face::clip::convex_intersection_area;
use burner_face::lattice::Lattice;
use burner_face::{
    export, generate_layout, get_hole_coordinates, run_layout, ExportFormat, ExportTarget, GeometryConfig,
    HoleLayout, Polygon, Policy, Shape,
};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

fn boxes_touch(a: &Polygon, b: &Polygon) -> bool {
    match (a.bounding_box(), b.bounding_box()) {
        (Some(a), Some(b)) => a.0 <= b.2 && b.0 <= a.2 && a.1 <= b.3 && b.1 <= a.3,
        _ => false,
    }
}

fn assert_no_overlap(layout: &HoleLayout) {
    for (i, a) in layout.air.iter().enumerate() {
        for fuel in &layout.fuel {
            assert!(!a.shape.overlaps_circle(&fuel.inner).unwrap(), "air {:?} overlaps fuel {:?}", a.cell, fuel.cell);
        }
        for b in &layout.air[i + 1..] {
            match (&a.shape, &b.shape) {
                (Shape::Circle(ca), Shape::Circle(cb)) => {
                    assert!(!ca.overlaps(cb), "air {:?} overlaps air {:?}", a.cell, b.cell)
                }
                (Shape::Polygon(pa), Shape::Polygon(pb)) => {
                    if boxes_touch(pa, pb) {
                        let shared = convex_intersection_area(pa, pb).unwrap();
                        assert!(shared < 1e-15, "air {:?} overlaps air {:?} by {}", a.cell, b.cell, shared);
                    }
                }
                _ => panic!("mixed air shapes in one layout"),
            }
        }
    }
}

#[test]
fn default_plate_run_is_sane() {
    let report = generate_layout(Policy::Plate, GeometryConfig::default()).unwrap();

    assert!(report.fuel_hole_number >= 1);
    assert!(report.air_hole_number > report.fuel_hole_number);
    assert!(report.air_to_fuel_area_ratio.is_finite());
    assert!(report.air_to_fuel_area_ratio > 0.0);
}

/// Configurations the acceptance properties are checked over.
fn configs() -> Vec<(&'static str, GeometryConfig)> {
    vec![
        ("default", GeometryConfig::default()),
        ("small air", GeometryConfig { pilot_air_id: 1.0e-3, ..Default::default() }),
        ("thin wall", GeometryConfig { pilot_hex_wall_th: 0.05e-3, ..Default::default() }),
        (
            "coarse cells",
            GeometryConfig { pilot_hex_cell_size: 2.4e-3, pilot_air_id: 2.2e-3, ..Default::default() },
        ),
        (
            "narrow burner",
            GeometryConfig { pilot_burner_id: 12.0e-3, pilot_burner_od: 14.0e-3, ..Default::default() },
        ),
        // Too small for any fuel hole in either policy
        (
            "tiny face",
            GeometryConfig { pilot_burner_id: 4.0e-3, jet_id: 0.5e-3, jet_od: 0.8e-3, ..Default::default() },
        ),
    ]
}

#[test]
fn holes_never_overlap_in_either_policy() {
    for policy in Policy::all() {
        for (name, config) in configs() {
            let layout = get_hole_coordinates(*policy, config).unwrap();
            if name != "tiny face" {
                assert!(!layout.air.is_empty(), "{} / {} produced no air holes", policy, name);
            }
            assert_no_overlap(&layout);
        }
    }
}

#[test]
fn ratio_is_infinite_exactly_when_there_is_no_fuel() {
    for policy in Policy::all() {
        for (name, config) in configs() {
            let report = generate_layout(*policy, config).unwrap();
            assert_eq!(
                report.air_to_fuel_area_ratio.is_infinite(),
                report.fuel_hole_number == 0,
                "{} / {}: {:?}",
                policy,
                name,
                report
            );
            assert!(report.air_to_fuel_area_ratio > 0.0, "{} / {}", policy, name);
        }
    }
}

#[test]
fn tiny_honeycomb_has_no_fuel_and_infinite_ratio() {
    let (_, config) = configs().into_iter().find(|(name, _)| *name == "tiny face").unwrap();
    let report = generate_layout(Policy::Honeycomb, config).unwrap();

    assert_eq!(report.fuel_hole_number, 0);
    assert!(report.air_hole_number > 0);
    assert!(report.air_hole_area > 0.0);
    assert!(report.air_to_fuel_area_ratio.is_infinite());
}

#[test]
fn thinner_walls_pack_tighter() {
    let walls = [0.30e-3, 0.20e-3, 0.13e-3, 0.05e-3];
    let mut previous: Option<(f64, usize)> = None;

    for wall in walls {
        let config = GeometryConfig { pilot_hex_wall_th: wall, ..Default::default() };
        let cd = config.center_distance();
        let cells = Lattice::generate(cd, config.pilot_burner_id * 1.2).unwrap().len();

        if let Some((prev_cd, prev_cells)) = previous {
            assert!(cd < prev_cd, "center distance should shrink with the wall");
            assert!(cells >= prev_cells, "cell count dropped from {} to {}", prev_cells, cells);
        }
        previous = Some((cd, cells));
    }
}

/// Count drawn elements per top-level layer group.
fn svg_layer_counts(text: &str) -> HashMap<String, usize> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut counts = HashMap::new();
    let mut current: Option<String> = None;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"g" => {
                let id = e
                    .attributes()
                    .flatten()
                    .find(|a| a.key.as_ref() == b"id")
                    .map(|a| String::from_utf8(a.value.to_vec()).unwrap());
                current = id;
            }
            Event::End(e) if e.name().as_ref() == b"g" => current = None,
            Event::Empty(_) => {
                if let Some(layer) = &current {
                    *counts.entry(layer.clone()).or_insert(0) += 1;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    counts
}

#[test]
fn svg_export_reads_back_per_layer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("honeycomb.svg");
    let layout = get_hole_coordinates(Policy::Honeycomb, GeometryConfig::default()).unwrap();

    export(&layout.air, &layout.fuel, &layout.jet, &path, ExportFormat::Svg).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let counts = svg_layer_counts(&text);

    assert_eq!(counts["AirHoles"], layout.air.len());
    assert_eq!(counts["FuelHoles"], 2 * layout.fuel.len());
    assert_eq!(counts["CentralJet"], 1);
    assert_eq!(counts["CentralJetOD"], 1);
}

#[test]
fn dxf_export_carries_one_entity_per_outline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plate.dxf");
    let layout = get_hole_coordinates(Policy::Plate, GeometryConfig::default()).unwrap();

    export(&layout.air, &layout.fuel, &layout.jet, &path, ExportFormat::Dxf).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let circles = text.lines().filter(|l| *l == "CIRCLE").count();

    assert_eq!(circles, layout.air.len() + layout.fuel.len() + 1);
    assert!(!text.contains("CentralJetOD"));
}

#[test]
fn run_layout_exports_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let target = ExportTarget::directory(dir.path(), ExportFormat::Dxf);

    let report = run_layout(Policy::Honeycomb, GeometryConfig::default(), Some(&target)).unwrap();
    assert_eq!(report, generate_layout(Policy::Honeycomb, GeometryConfig::default()).unwrap());

    let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().flatten().collect();
    assert_eq!(written.len(), 1);
    assert!(written[0].file_name().to_string_lossy().ends_with(".dxf"));
}
