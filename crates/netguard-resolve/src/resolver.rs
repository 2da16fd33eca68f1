use netguard_syntax::{CallExpr, CallId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::target::{CallTarget, ResolvedCall};

/// Resolves a call expression to its target.
///
/// Resolution belongs to the front end; the analysis only consumes it through
/// this trait, so it can run against synthetic bindings in tests. Failing to
/// resolve is a normal outcome, reported as [`CallTarget::Unresolved`].
pub trait CallResolver {
    fn resolve(&self, call: &CallExpr) -> CallTarget;
}

impl<F> CallResolver for F
where
    F: Fn(&CallExpr) -> Option<ResolvedCall>,
{
    fn resolve(&self, call: &CallExpr) -> CallTarget {
        self(call).into()
    }
}

/// A resolver that knows nothing; every call is unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBindings;

impl CallResolver for NoBindings {
    fn resolve(&self, _call: &CallExpr) -> CallTarget {
        CallTarget::Unresolved
    }
}

/// One entry of a serialized binding table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub call: CallId,
    pub target: ResolvedCall,
}

/// Binding information for one unit, keyed by call identity.
///
/// Serialized as a list of [`Binding`] entries. When an id appears twice the
/// later entry wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Binding>", into = "Vec<Binding>")]
pub struct BindingTable {
    targets: FxHashMap<CallId, ResolvedCall>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, call: CallId, target: ResolvedCall) -> Option<ResolvedCall> {
        self.targets.insert(call, target)
    }

    pub fn get(&self, call: CallId) -> Option<&ResolvedCall> {
        self.targets.get(&call)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl CallResolver for BindingTable {
    fn resolve(&self, call: &CallExpr) -> CallTarget {
        self.get(call.id).cloned().into()
    }
}

impl FromIterator<Binding> for BindingTable {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        let mut table = BindingTable::new();
        for Binding { call, target } in iter {
            if let Some(previous) = table.insert(call, target) {
                log::warn!(
                    "duplicate binding for call {:?}; dropping target {}",
                    call,
                    previous.qualified_name
                );
            }
        }
        table
    }
}

impl From<Vec<Binding>> for BindingTable {
    fn from(bindings: Vec<Binding>) -> Self {
        bindings.into_iter().collect()
    }
}

impl From<BindingTable> for Vec<Binding> {
    fn from(table: BindingTable) -> Self {
        let mut bindings: Vec<Binding> = table
            .targets
            .into_iter()
            .map(|(call, target)| Binding { call, target })
            .collect();
        bindings.sort_by_key(|binding| binding.call);
        bindings
    }
}
