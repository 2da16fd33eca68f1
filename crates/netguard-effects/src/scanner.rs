//! Second pass: find unguarded calls that let the effect escape.
//!
//! The traversal threads a [`ScopeState`] value down the tree. Each node
//! hands its children the state they run in and never writes it back, so
//! leaving a function or a `try` restores the enclosing state on every path.

use netguard_resolve::{CallResolver, ResolvedCall};
use netguard_source::{ScanConfig, ScanModeConfig, SourceFile};
use netguard_syntax::{CallExpr, Expr, ExprKind, Function, Item, ItemKind, ProgramUnit};

use crate::collector::RiskyFunctionSet;
use crate::finding::{violation_message, EffectSource, Finding, Location};
use crate::registry::EffectRegistry;

/// Which function bodies are checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// Every function, and code outside functions
    #[default]
    AllFunctions,
    /// Only functions carrying a check marker or named as entry points, and
    /// the functions and closures nested in them
    MarkedFunctions { entry_points: Vec<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub mode: ScanMode,
}

impl ScanOptions {
    pub fn from_config(config: &ScanConfig) -> Self {
        let mode = match config.mode {
            ScanModeConfig::All => ScanMode::AllFunctions,
            ScanModeConfig::Marked => ScanMode::MarkedFunctions {
                entry_points: config.entry_points.clone(),
            },
        };
        ScanOptions { mode }
    }

    pub fn marked<I, S>(entry_points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScanOptions {
            mode: ScanMode::MarkedFunctions {
                entry_points: entry_points.into_iter().map(Into::into).collect(),
            },
        }
    }
}

/// Scope flags in force at one point of the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeState {
    /// Inside the body of a function that accepts the effect
    pub accepting: bool,
    /// Inside the protected region of a `try`
    pub guarded: bool,
    /// Inside code selected by the scan mode
    pub checked: bool,
}

impl ScopeState {
    /// The state of code outside any function: nothing accepts or guards it.
    pub fn top_level(mode: &ScanMode) -> Self {
        ScopeState {
            accepting: false,
            guarded: false,
            checked: matches!(mode, ScanMode::AllFunctions),
        }
    }

    /// Whether an effectful call here is a violation.
    pub fn is_exposed(self) -> bool {
        self.checked && !self.accepting && !self.guarded
    }
}

/// Scans one unit and returns its findings in traversal order.
///
/// Calls whose target cannot be resolved are never reported.
pub fn scan<R: CallResolver + ?Sized>(
    unit: &ProgramUnit,
    registry: &EffectRegistry,
    risky: &RiskyFunctionSet,
    resolver: &R,
    options: &ScanOptions,
) -> Vec<Finding> {
    let mut scanner = Scanner {
        file: unit.source_file(),
        registry,
        risky,
        resolver,
        options,
        findings: Vec::new(),
    };
    let top = ScopeState::top_level(&options.mode);
    for item in &unit.items {
        scanner.scan_item(item, top);
    }
    log::debug!("{}: {} finding(s)", unit.path, scanner.findings.len());
    scanner.findings
}

struct Scanner<'a, R: ?Sized> {
    file: SourceFile,
    registry: &'a EffectRegistry,
    risky: &'a RiskyFunctionSet,
    resolver: &'a R,
    options: &'a ScanOptions,
    findings: Vec<Finding>,
}

impl<R: CallResolver + ?Sized> Scanner<'_, R> {
    fn scan_item(&mut self, item: &Item, state: ScopeState) {
        match &item.kind {
            ItemKind::Function(function) => self.scan_function(function, state),
            ItemKind::Class(class) => {
                for item in &class.items {
                    self.scan_item(item, state);
                }
            }
            ItemKind::Property(property) => {
                if let Some(initializer) = &property.initializer {
                    self.scan_expr(initializer, state);
                }
            }
        }
    }

    /// A function's body gets its own accepting flag. An enclosing `try`
    /// still guards it.
    fn scan_function(&mut self, function: &Function, enclosing: ScopeState) {
        let Some(body) = &function.body else {
            return;
        };
        let state = ScopeState {
            accepting: self.registry.accepts_effect(&function.annotations),
            guarded: enclosing.guarded,
            checked: enclosing.checked || self.selects(function),
        };
        self.scan_expr(body, state);
    }

    fn selects(&self, function: &Function) -> bool {
        match &self.options.mode {
            ScanMode::AllFunctions => true,
            ScanMode::MarkedFunctions { entry_points } => {
                self.registry.is_marked(&function.annotations)
                    || function
                        .name
                        .as_ref()
                        .is_some_and(|name| entry_points.contains(&name.name))
            }
        }
    }

    /// Mirrors `netguard_syntax::visitor::walk_expr`; keep the two in step
    /// when `ExprKind` grows.
    fn scan_expr(&mut self, expr: &Expr, state: ScopeState) {
        match &expr.kind {
            ExprKind::Call(call) => self.scan_call(call, state),
            ExprKind::Try(try_expr) => {
                self.scan_expr(&try_expr.body, ScopeState { guarded: true, ..state });
                for catch in &try_expr.catches {
                    self.scan_expr(&catch.body, state);
                }
                if let Some(finally) = &try_expr.finally {
                    self.scan_expr(finally, state);
                }
            }
            ExprKind::Block(exprs) | ExprKind::Compound(exprs) => {
                for expr in exprs {
                    self.scan_expr(expr, state);
                }
            }
            ExprKind::Lambda(body) => self.scan_expr(body, state),
            ExprKind::LocalFunction(function) => self.scan_function(function, state),
            ExprKind::Leaf => {}
        }
    }

    fn scan_call(&mut self, call: &CallExpr, state: ScopeState) {
        if let Some(receiver) = &call.receiver {
            self.scan_expr(receiver, state);
        }
        for arg in &call.args {
            self.scan_expr(arg, state);
        }

        if !state.is_exposed() {
            return;
        }
        let target = self.resolver.resolve(call);
        let Some(resolved) = target.resolved() else {
            log::trace!("{}: skipping unresolved call {}", self.file.path(), call.text);
            return;
        };
        let Some(reason) = self.classify(resolved) else {
            return;
        };
        log::trace!(
            "{}: {} reaches {} ({:?})",
            self.file.path(),
            call.text,
            resolved.qualified_name,
            reason
        );

        let (line, column) = self.file.line_col(call.span.start);
        self.findings.push(Finding {
            location: Location {
                path: self.file.path().to_string(),
                span: call.span,
                line,
                column,
            },
            message: violation_message(&call.text),
            call_text: call.text.clone(),
            reason,
        });
    }

    fn classify(&self, target: &ResolvedCall) -> Option<EffectSource> {
        if self.registry.is_risky_call(&target.qualified_name) {
            return Some(EffectSource::KnownLibraryCall);
        }
        if self.risky.contains(&target.qualified_name) {
            return Some(EffectSource::RiskyFunction);
        }
        target
            .annotations
            .iter()
            .find(|annotation| self.registry.is_risk_annotation(annotation))
            .map(|annotation| EffectSource::RiskAnnotation(annotation.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_state_follows_mode() {
        assert!(ScopeState::top_level(&ScanMode::AllFunctions).is_exposed());
        assert!(!ScopeState::top_level(&ScanOptions::marked(["main"]).mode).is_exposed());
    }

    #[test]
    fn any_shelter_hides_the_call() {
        let open = ScopeState { accepting: false, guarded: false, checked: true };
        assert!(open.is_exposed());
        assert!(!ScopeState { guarded: true, ..open }.is_exposed());
        assert!(!ScopeState { accepting: true, ..open }.is_exposed());
    }

    #[test]
    fn options_follow_scan_config() {
        let config = ScanConfig {
            mode: ScanModeConfig::Marked,
            entry_points: vec!["run".to_string()],
        };
        assert_eq!(ScanOptions::from_config(&config), ScanOptions::marked(["run"]));
        assert_eq!(ScanOptions::from_config(&ScanConfig::default()), ScanOptions::default());
    }
}
