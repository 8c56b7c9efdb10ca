//! Export command: write a layout drawing to DXF or SVG.

use std::path::{Path, PathBuf};

use burner_face::{export_to_target, get_hole_coordinates, ExportFormat, ExportTarget, Policy};

use super::common::load_config;

pub struct ExportArgs {
    pub policy: Policy,
    pub config: Option<PathBuf>,
    pub format: Option<ExportFormat>,
    pub output: Option<PathBuf>,
    pub dir: Option<PathBuf>,
}

/// Explicit `--format` wins; otherwise the output extension decides, then DXF.
fn resolve_format(format: Option<ExportFormat>, output: Option<&Path>) -> ExportFormat {
    format
        .or_else(|| output.and_then(ExportFormat::from_path))
        .unwrap_or_default()
}

pub fn cmd_export(args: ExportArgs) -> Result<(), String> {
    let format = resolve_format(args.format, args.output.as_deref());
    let target = match (args.output, args.dir) {
        (Some(path), _) => ExportTarget::file(path, format),
        (None, Some(dir)) => ExportTarget::directory(dir, format),
        (None, None) => return Err("either --output or --dir is required".to_string()),
    };

    let config = load_config(args.config.as_deref())?;
    let layout = get_hole_coordinates(args.policy, config).map_err(|e| e.to_string())?;

    // Write failures are fatal here, unlike `layout --export-dir`
    let path = export_to_target(&layout, &target).map_err(|e| e.to_string())?;
    tracing::info!(path = %path.display(), format = format.name(), "layout exported");
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_falls_back_to_extension_then_dxf() {
        let svg = Path::new("face.svg");
        assert_eq!(resolve_format(None, Some(svg)), ExportFormat::Svg);
        assert_eq!(resolve_format(Some(ExportFormat::Dxf), Some(svg)), ExportFormat::Dxf);
        assert_eq!(resolve_format(None, Some(Path::new("face.out"))), ExportFormat::Dxf);
        assert_eq!(resolve_format(None, None), ExportFormat::Dxf);
    }
}
