//! First pass: find the functions a unit declares as risky.

use netguard_syntax::visitor::{walk_function, walk_unit, Visitor};
use netguard_syntax::{Function, ProgramUnit};
use rustc_hash::FxHashSet;

use crate::registry::declares_any;

/// Identity recorded for a risky function with neither a qualified nor a
/// declared name.
pub const ANONYMOUS: &str = "<anonymous>";

/// Identities of the functions in one unit that carry a risk annotation.
///
/// Built fresh for every unit and read-only while scanning it. Membership is
/// exact string equality on the recorded identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskyFunctionSet {
    functions: FxHashSet<String>,
}

impl RiskyFunctionSet {
    pub fn contains(&self, identity: &str) -> bool {
        self.functions.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for RiskyFunctionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        RiskyFunctionSet {
            functions: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Collects every function in `unit`, at any nesting depth, whose declared
/// annotations intersect `annotation_names`.
pub fn collect(unit: &ProgramUnit, annotation_names: &FxHashSet<String>) -> RiskyFunctionSet {
    let mut collector = Collector {
        annotation_names,
        found: RiskyFunctionSet::default(),
    };
    walk_unit(&mut collector, unit);
    log::debug!("{}: {} risky function(s)", unit.path, collector.found.len());
    collector.found
}

/// Best available identity: qualified name, then declared name.
pub fn function_identity(function: &Function) -> &str {
    function
        .qualified_name
        .as_deref()
        .or_else(|| function.name.as_ref().map(|name| name.name.as_str()))
        .unwrap_or(ANONYMOUS)
}

struct Collector<'a> {
    annotation_names: &'a FxHashSet<String>,
    found: RiskyFunctionSet,
}

impl<'ast> Visitor<'ast> for Collector<'_> {
    fn visit_function(&mut self, function: &'ast Function) {
        if declares_any(&function.annotations, self.annotation_names) {
            let identity = function_identity(function);
            log::trace!("risky function {identity}");
            self.found.functions.insert(identity.to_string());
        }
        walk_function(self, function);
    }
}
