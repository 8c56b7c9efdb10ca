//! Vector export of a hole layout.
//!
//! A layout is first flattened into a [`Drawing`]: a list of entities, each
//! on a named layer. The drawing is then written by one of the format
//! writers ([`dxf`], [`svg`]). Circles stay circles (both formats have a
//! native circle); clipped honeycomb cells become closed vertex loops.
//!
//! ## Rust Lesson #25: Generic Writers
//!
//! The writers take `W: std::io::Write` instead of a file path, so tests
//! can render into a `Vec<u8>` and the file handling lives in one place.

mod dxf;
mod svg;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::ExportError;
use crate::geometry::{Circle, Point, Shape};
use crate::holes::{AirHole, CentralJet, FuelHole, HoleLayout};

pub use dxf::write_dxf;
pub use svg::write_svg;

// ============================================================================
// FORMATS AND LAYERS
// ============================================================================

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// ASCII DXF (R12), coordinates in meters
    #[default]
    Dxf,
    /// SVG with Inkscape layers, coordinates in millimetres
    Svg,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Dxf, ExportFormat::Svg]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Dxf => "dxf",
            ExportFormat::Svg => "svg",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        self.name()
    }

    pub fn from_name(name: &str) -> Option<ExportFormat> {
        match name.to_lowercase().as_str() {
            "dxf" => Some(ExportFormat::Dxf),
            "svg" => Some(ExportFormat::Svg),
            _ => None,
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(ExportFormat::from_name)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::from_name(s).ok_or_else(|| format!("unknown export format '{}' (expected dxf or svg)", s))
    }
}

/// Drawing layers. Names are fixed; downstream CAM setups select by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    AirHoles,
    FuelHoles,
    CentralJet,
    CentralJetOd,
}

impl Layer {
    pub fn all() -> &'static [Layer] {
        &[Layer::AirHoles, Layer::FuelHoles, Layer::CentralJet, Layer::CentralJetOd]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layer::AirHoles => "AirHoles",
            Layer::FuelHoles => "FuelHoles",
            Layer::CentralJet => "CentralJet",
            Layer::CentralJetOd => "CentralJetOD",
        }
    }

    /// AutoCAD colour index.
    pub fn dxf_color(&self) -> u8 {
        match self {
            Layer::AirHoles => 1,
            Layer::FuelHoles => 2,
            Layer::CentralJet => 3,
            Layer::CentralJetOd => 4,
        }
    }

    /// RGB equivalent of [`Layer::dxf_color`].
    pub fn svg_color(&self) -> &'static str {
        match self {
            Layer::AirHoles => "#ff0000",
            Layer::FuelHoles => "#ffff00",
            Layer::CentralJet => "#00ff00",
            Layer::CentralJetOd => "#00ffff",
        }
    }
}

// ============================================================================
// DRAWING MODEL
// ============================================================================

/// One drawable outline.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Circle { center: Point, radius: f64 },
    /// Closed loop; the last vertex connects back to the first
    Loop(Vec<Point>),
}

impl Entity {
    fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        match self {
            Entity::Circle { center, radius } => Some((
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            )),
            Entity::Loop(points) => {
                let first = points.first()?;
                Some(points.iter().fold(
                    (first.x, first.y, first.x, first.y),
                    |(min_x, min_y, max_x, max_y), p| (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)),
                ))
            }
        }
    }
}

impl From<&Circle> for Entity {
    fn from(circle: &Circle) -> Self {
        Entity::Circle { center: circle.center, radius: circle.radius }
    }
}

impl From<&Shape> for Entity {
    fn from(shape: &Shape) -> Self {
        match shape {
            Shape::Circle(c) => Entity::from(c),
            Shape::Polygon(p) => Entity::Loop(p.outer.clone()),
        }
    }
}

/// Layered entities ready to be written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    entities: Vec<(Layer, Entity)>,
}

impl Drawing {
    /// Flatten hole collections into layered entities: air, then fuel (inner
    /// and OD circles), then the jet and its OD.
    pub fn from_holes(air: &[AirHole], fuel: &[FuelHole], jet: &CentralJet) -> Self {
        let mut drawing = Drawing::default();
        for hole in air {
            drawing.push(Layer::AirHoles, Entity::from(&hole.shape));
        }
        for hole in fuel {
            drawing.push(Layer::FuelHoles, Entity::from(&hole.inner));
            if let Some(outer) = &hole.outer {
                drawing.push(Layer::FuelHoles, Entity::from(outer));
            }
        }
        drawing.push(Layer::CentralJet, Entity::from(&jet.inner));
        if let Some(outer) = &jet.outer {
            drawing.push(Layer::CentralJetOd, Entity::from(outer));
        }
        drawing
    }

    pub fn from_layout(layout: &HoleLayout) -> Self {
        Self::from_holes(&layout.air, &layout.fuel, &layout.jet)
    }

    pub fn push(&mut self, layer: Layer, entity: Entity) {
        self.entities.push((layer, entity));
    }

    pub fn entities(&self) -> &[(Layer, Entity)] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities on one layer, in insertion order.
    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |(l, _)| *l == layer)
            .map(|(_, e)| e)
    }

    /// Layers that carry at least one entity, in [`Layer::all`] order.
    pub fn layers(&self) -> Vec<Layer> {
        Layer::all()
            .iter()
            .copied()
            .filter(|layer| self.entities.iter().any(|(l, _)| l == layer))
            .collect()
    }

    /// `(min_x, min_y, max_x, max_y)` over every entity, in meters.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.entities
            .iter()
            .filter_map(|(_, e)| e.bounds())
            .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
    }

    /// Render into any writer.
    pub fn write_to<W: Write>(&self, out: W, format: ExportFormat) -> Result<(), ExportError> {
        if self.is_empty() {
            return Err(ExportError::EmptyDrawing);
        }
        match format {
            ExportFormat::Dxf => write_dxf(self, out),
            ExportFormat::Svg => write_svg(self, out),
        }
    }

    /// Render to a file, replacing it if present.
    pub fn save(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        if self.is_empty() {
            return Err(ExportError::EmptyDrawing);
        }
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out, format)?;
        out.flush()?;
        Ok(())
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Write the three hole collections to `path`.
pub fn export(
    air: &[AirHole],
    fuel: &[FuelHole],
    jet: &CentralJet,
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let drawing = Drawing::from_holes(air, fuel, jet);
    drawing.save(path, format)?;
    tracing::debug!(path = %path.display(), entities = drawing.len(), format = format.name(), "drawing written");
    Ok(())
}

/// `geometry_<YYYYMMDD_HHMMSS>.<ext>`
pub fn timestamped_filename(format: ExportFormat, time: NaiveDateTime) -> String {
    format!("geometry_{}.{}", time.format("%Y%m%d_%H%M%S"), format.extension())
}

/// Write a layout into `dir` under a timestamped name and return the path.
pub fn export_to_dir(layout: &HoleLayout, dir: &Path, format: ExportFormat) -> Result<PathBuf, ExportError> {
    let name = timestamped_filename(format, chrono::Local::now().naive_local());
    let path = dir.join(name);
    export(&layout.air, &layout.fuel, &layout.jet, &path, format)?;
    Ok(path)
}

/// Where a layout run should write its drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// An explicit file path
    File { path: PathBuf, format: ExportFormat },
    /// A directory; the file name is timestamped
    Directory { dir: PathBuf, format: ExportFormat },
}

impl ExportTarget {
    pub fn file(path: impl Into<PathBuf>, format: ExportFormat) -> Self {
        ExportTarget::File { path: path.into(), format }
    }

    pub fn directory(dir: impl Into<PathBuf>, format: ExportFormat) -> Self {
        ExportTarget::Directory { dir: dir.into(), format }
    }

    pub fn format(&self) -> ExportFormat {
        match self {
            ExportTarget::File { format, .. } | ExportTarget::Directory { format, .. } => *format,
        }
    }
}

/// Write a layout to a target and return the path written.
pub fn export_to_target(layout: &HoleLayout, target: &ExportTarget) -> Result<PathBuf, ExportError> {
    match target {
        ExportTarget::File { path, format } => {
            export(&layout.air, &layout.fuel, &layout.jet, path, *format)?;
            Ok(path.clone())
        }
        ExportTarget::Directory { dir, format } => export_to_dir(layout, dir, *format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeometryConfig;
    use crate::policy::{get_hole_coordinates, Policy};
    use chrono::NaiveDate;

    fn layout(policy: Policy) -> HoleLayout {
        get_hole_coordinates(policy, GeometryConfig::default()).unwrap()
    }

    #[test]
    fn format_names_round_trip() {
        for format in ExportFormat::all() {
            assert_eq!(format.name().parse::<ExportFormat>(), Ok(*format));
        }
        assert_eq!(ExportFormat::from_path(Path::new("out/face.SVG")), Some(ExportFormat::Svg));
        assert_eq!(ExportFormat::from_path(Path::new("face.pdf")), None);
    }

    #[test]
    fn filename_is_timestamped() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(14, 7, 9).unwrap();
        assert_eq!(timestamped_filename(ExportFormat::Dxf, time), "geometry_20240305_140709.dxf");
        assert_eq!(timestamped_filename(ExportFormat::Svg, time), "geometry_20240305_140709.svg");
    }

    #[test]
    fn plate_drawing_has_no_jet_od_layer() {
        let layout = layout(Policy::Plate);
        let drawing = Drawing::from_layout(&layout);

        assert_eq!(drawing.layers(), vec![Layer::AirHoles, Layer::FuelHoles, Layer::CentralJet]);
        assert_eq!(drawing.on_layer(Layer::AirHoles).count(), layout.air.len());
        assert_eq!(drawing.on_layer(Layer::FuelHoles).count(), layout.fuel.len());
        assert_eq!(drawing.on_layer(Layer::CentralJet).count(), 1);
    }

    #[test]
    fn honeycomb_drawing_carries_od_circles() {
        let layout = layout(Policy::Honeycomb);
        let drawing = Drawing::from_layout(&layout);

        assert_eq!(drawing.layers(), Layer::all().to_vec());
        // Inner and OD circle per fuel tube
        assert_eq!(drawing.on_layer(Layer::FuelHoles).count(), 2 * layout.fuel.len());
        assert_eq!(drawing.on_layer(Layer::CentralJetOd).count(), 1);
        assert!(drawing.on_layer(Layer::AirHoles).all(|e| matches!(e, Entity::Loop(_))));
    }

    #[test]
    fn bounds_cover_every_entity() {
        let mut drawing = Drawing::default();
        drawing.push(Layer::CentralJet, Entity::Circle { center: Point::ORIGIN, radius: 1.0 });
        drawing.push(
            Layer::AirHoles,
            Entity::Loop(vec![Point::new(2.0, 0.0), Point::new(3.0, 0.0), Point::new(3.0, 4.0)]),
        );
        assert_eq!(drawing.bounds(), Some((-1.0, -1.0, 3.0, 4.0)));
        assert_eq!(Drawing::default().bounds(), None);
    }

    #[test]
    fn empty_drawing_is_rejected() {
        let err = Drawing::default().write_to(Vec::new(), ExportFormat::Svg).unwrap_err();
        assert!(matches!(err, ExportError::EmptyDrawing));
    }

    #[test]
    fn export_to_directory_uses_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout(Policy::Plate);
        let target = ExportTarget::directory(dir.path(), ExportFormat::Svg);

        let path = export_to_target(&layout, &target).unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("geometry_") && name.ends_with(".svg"), "{}", name);
        // geometry_ + YYYYMMDD_HHMMSS + .svg
        assert_eq!(name.len(), "geometry_".len() + 15 + ".svg".len());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn export_to_missing_directory_fails_with_io() {
        let layout = layout(Policy::Plate);
        let target = ExportTarget::file("/nonexistent-dir/for/sure/face.dxf", ExportFormat::Dxf);
        assert!(matches!(export_to_target(&layout, &target), Err(ExportError::Io(_))));
    }
}
