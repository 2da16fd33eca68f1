//! Network effect tracking for netguard.
//!
//! Checking a unit takes two passes. The collector records which functions
//! the unit declares as risky; the scanner then walks every function body and
//! reports calls that reach the network with neither a surrounding `try` nor
//! an enclosing function that accepts the effect.

pub mod collector;
pub mod finding;
pub mod registry;
pub mod scanner;

pub use collector::{collect, RiskyFunctionSet};
pub use finding::{EffectSource, Finding, Location, RULE_DESCRIPTION, RULE_ID, RULE_SET_ID};
pub use registry::EffectRegistry;
pub use scanner::{scan, ScanMode, ScanOptions, ScopeState};

use netguard_resolve::CallResolver;
use netguard_syntax::ProgramUnit;

/// Runs both passes over one unit. Nothing carries over between calls.
pub fn check_unit<R: CallResolver + ?Sized>(
    unit: &ProgramUnit,
    registry: &EffectRegistry,
    resolver: &R,
    options: &ScanOptions,
) -> Vec<Finding> {
    let risky = collect(unit, registry.risk_annotations());
    scan(unit, registry, &risky, resolver, options)
}
