//! SVG writer with one Inkscape layer per drawing layer.
//!
//! Coordinates are converted to millimetres and the y axis is flipped, so
//! the face reads the same way up as in the DXF.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use super::{Drawing, Entity};
use crate::error::ExportError;
use crate::geometry::Point;

const MM_PER_M: f64 = 1000.0;

/// Empty space around the drawing, in millimetres.
const MARGIN_MM: f64 = 1.0;

const STROKE_WIDTH_MM: f64 = 0.05;

fn to_svg(p: Point) -> (f64, f64) {
    (p.x * MM_PER_M, -p.y * MM_PER_M)
}

fn fmt_mm(v: f64) -> String {
    // No "-0.0000" from flipping y = 0
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{:.4}", v)
}

fn entity_element(entity: &Entity) -> BytesStart<'static> {
    match entity {
        Entity::Circle { center, radius } => {
            let (cx, cy) = to_svg(*center);
            let mut el = BytesStart::new("circle");
            el.push_attribute(("cx", fmt_mm(cx).as_str()));
            el.push_attribute(("cy", fmt_mm(cy).as_str()));
            el.push_attribute(("r", fmt_mm(radius * MM_PER_M).as_str()));
            el
        }
        Entity::Loop(points) => {
            let points: String = points
                .iter()
                .map(|p| {
                    let (x, y) = to_svg(*p);
                    format!("{},{}", fmt_mm(x), fmt_mm(y))
                })
                .collect::<Vec<_>>()
                .join(" ");
            let mut el = BytesStart::new("polygon");
            el.push_attribute(("points", points.as_str()));
            el
        }
    }
}

/// Write a drawing as SVG.
pub fn write_svg<W: Write>(drawing: &Drawing, out: W) -> Result<(), ExportError> {
    let (min_x, min_y, max_x, max_y) = drawing.bounds().ok_or(ExportError::EmptyDrawing)?;

    // y is flipped: the top edge of the view is the largest y
    let left = min_x * MM_PER_M - MARGIN_MM;
    let top = -max_y * MM_PER_M - MARGIN_MM;
    let width = (max_x - min_x) * MM_PER_M + 2.0 * MARGIN_MM;
    let height = (max_y - min_y) * MM_PER_M + 2.0 * MARGIN_MM;

    let mut writer = Writer::new_with_indent(out, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let view_box = format!("{} {} {} {}", fmt_mm(left), fmt_mm(top), fmt_mm(width), fmt_mm(height));
    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    svg.push_attribute(("xmlns:inkscape", "http://www.inkscape.org/namespaces/inkscape"));
    svg.push_attribute(("width", format!("{}mm", fmt_mm(width)).as_str()));
    svg.push_attribute(("height", format!("{}mm", fmt_mm(height)).as_str()));
    svg.push_attribute(("viewBox", view_box.as_str()));
    writer.write_event(Event::Start(svg))?;

    let stroke_width = fmt_mm(STROKE_WIDTH_MM);
    for layer in drawing.layers() {
        let mut group = BytesStart::new("g");
        group.push_attribute(("id", layer.name()));
        group.push_attribute(("inkscape:groupmode", "layer"));
        group.push_attribute(("inkscape:label", layer.name()));
        group.push_attribute(("stroke", layer.svg_color()));
        group.push_attribute(("stroke-width", stroke_width.as_str()));
        group.push_attribute(("fill", "none"));
        writer.write_event(Event::Start(group))?;

        for entity in drawing.on_layer(layer) {
            writer.write_event(Event::Empty(entity_element(entity)))?;
        }

        writer.write_event(Event::End(BytesEnd::new("g")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("svg")))?;
    writer.into_inner().flush()?;
    Ok(())
}
