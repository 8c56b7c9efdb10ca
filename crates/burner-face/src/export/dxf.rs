//! ASCII DXF writer (AutoCAD R12 / AC1009).
//!
//! R12 is the lowest common denominator that laser and CNC toolchains
//! still read: group-code/value line pairs, a LAYER table, `CIRCLE`
//! entities and closed `POLYLINE`s. Coordinates are written in meters.

use std::io::Write;

use super::{Drawing, Entity, Layer};
use crate::error::ExportError;
use crate::geometry::Point;

/// One group code and its value, each on its own line.
fn pair<W: Write>(out: &mut W, code: u16, value: impl std::fmt::Display) -> std::io::Result<()> {
    writeln!(out, "{:>3}", code)?;
    writeln!(out, "{}", value)
}

fn write_header<W: Write>(out: &mut W) -> std::io::Result<()> {
    pair(out, 0, "SECTION")?;
    pair(out, 2, "HEADER")?;
    pair(out, 9, "$ACADVER")?;
    pair(out, 1, "AC1009")?;
    pair(out, 0, "ENDSEC")
}

fn write_layer_table<W: Write>(out: &mut W, layers: &[Layer]) -> std::io::Result<()> {
    pair(out, 0, "SECTION")?;
    pair(out, 2, "TABLES")?;
    pair(out, 0, "TABLE")?;
    pair(out, 2, "LAYER")?;
    pair(out, 70, layers.len())?;
    for layer in layers {
        pair(out, 0, "LAYER")?;
        pair(out, 2, layer.name())?;
        pair(out, 70, 0)?;
        pair(out, 62, layer.dxf_color())?;
        pair(out, 6, "CONTINUOUS")?;
    }
    pair(out, 0, "ENDTAB")?;
    pair(out, 0, "ENDSEC")
}

fn write_point<W: Write>(out: &mut W, p: Point) -> std::io::Result<()> {
    pair(out, 10, p.x)?;
    pair(out, 20, p.y)?;
    pair(out, 30, 0.0)
}

fn write_entity<W: Write>(out: &mut W, layer: Layer, entity: &Entity) -> std::io::Result<()> {
    match entity {
        Entity::Circle { center, radius } => {
            pair(out, 0, "CIRCLE")?;
            pair(out, 8, layer.name())?;
            write_point(out, *center)?;
            pair(out, 40, radius)
        }
        Entity::Loop(points) => {
            pair(out, 0, "POLYLINE")?;
            pair(out, 8, layer.name())?;
            // Vertices follow
            pair(out, 66, 1)?;
            // Closed
            pair(out, 70, 1)?;
            write_point(out, Point::ORIGIN)?;
            for p in points {
                pair(out, 0, "VERTEX")?;
                pair(out, 8, layer.name())?;
                write_point(out, *p)?;
            }
            pair(out, 0, "SEQEND")?;
            pair(out, 8, layer.name())
        }
    }
}

/// Write a drawing as DXF.
pub fn write_dxf<W: Write>(drawing: &Drawing, mut out: W) -> Result<(), ExportError> {
    write_header(&mut out)?;
    write_layer_table(&mut out, &drawing.layers())?;

    pair(&mut out, 0, "SECTION")?;
    pair(&mut out, 2, "ENTITIES")?;
    for (layer, entity) in drawing.entities() {
        write_entity(&mut out, *layer, entity)?;
    }
    pair(&mut out, 0, "ENDSEC")?;
    pair(&mut out, 0, "EOF")?;
    Ok(())
}
