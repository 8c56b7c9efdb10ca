//! Policies command: list the available layout policies.

use burner_face::Policy;

pub fn cmd_policies() {
    println!("Available policies:");
    for policy in Policy::all() {
        println!("  {:<12} {}", policy.name(), policy.description());
    }
}
