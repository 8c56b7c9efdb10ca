//! Layout command: run a policy and print its report.

use std::path::PathBuf;

use serde::Serialize;

use burner_face::{run_layout, ExportFormat, ExportTarget, LayoutReport, Policy};

use super::common::{load_config, print_json};

#[derive(Serialize)]
struct JsonLayout<'a> {
    policy: &'a str,
    center_distance: f64,
    #[serde(flatten)]
    report: LayoutReport,
}

pub struct LayoutArgs {
    pub policy: Policy,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub export_dir: Option<PathBuf>,
    pub format: ExportFormat,
}

pub fn cmd_layout(args: LayoutArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let target = args
        .export_dir
        .map(|dir| ExportTarget::directory(dir, args.format));

    // Export is best-effort; a failed write is only logged
    let report = run_layout(args.policy, config, target.as_ref()).map_err(|e| e.to_string())?;

    if args.json {
        print_json(&JsonLayout {
            policy: args.policy.name(),
            center_distance: config.center_distance(),
            report,
        })
    } else {
        println!("policy: {}", args.policy);
        println!("center distance: {:.4} mm", config.center_distance() * 1e3);
        println!("{}", report);
        Ok(())
    }
}
