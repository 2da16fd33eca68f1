//! The catalog of what carries the network effect.

use netguard_source::EffectsConfig;
use netguard_syntax::Annotation;
use rustc_hash::FxHashSet;

/// The annotation a function uses to declare that it performs network access.
/// A function carrying it both propagates the effect to its callers and
/// accepts the effect in its own body.
pub const EFFECT_ANNOTATION: &str =
    "com.github.loinguyencs.safeinternetaccesschecker.effect.HasRiskyInternetConnection";
pub const EFFECT_ANNOTATION_SHORT: &str = "HasRiskyInternetConnection";

/// Marks a function for checking when only marked functions are scanned.
pub const CHECK_MARKER: &str = "com.github.loinguyencs.safeinternetaccesschecker.effect.InternetSafeCheck";
pub const CHECK_MARKER_SHORT: &str = "InternetSafeCheck";

/// Library entry points that open a connection whenever they are called.
const KNOWN_RISKY_CALLS: &[&str] = &[
    "java.net.HttpURLConnection.connect",
    "java.net.URL.openStream",
    "okhttp3.OkHttpClient.newCall",
    "retrofit2.Retrofit.create",
    "org.apache.http.client.HttpClient.execute",
    "android.webkit.WebView.loadUrl",
];

/// Request-binding annotations whose presence implies an HTTP request.
const HTTP_VERB_ANNOTATIONS: &[&str] = &[
    "retrofit2.http.GET",
    "retrofit2.http.POST",
    "retrofit2.http.PUT",
    "retrofit2.http.DELETE",
    "retrofit2.http.PATCH",
    "retrofit2.http.HEAD",
    "retrofit2.http.OPTIONS",
];

/// Read-only sets of call targets and annotation names.
///
/// A registry is fixed once built and is shared freely between threads
/// analysing different units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectRegistry {
    risky_calls: FxHashSet<String>,
    risk_annotations: FxHashSet<String>,
    accepting_annotations: FxHashSet<String>,
    marker_annotations: FxHashSet<String>,
}

impl EffectRegistry {
    /// A registry that knows nothing.
    pub fn empty() -> Self {
        EffectRegistry {
            risky_calls: FxHashSet::default(),
            risk_annotations: FxHashSet::default(),
            accepting_annotations: FxHashSet::default(),
            marker_annotations: FxHashSet::default(),
        }
    }

    /// The catalog netguard ships with.
    pub fn builtin() -> Self {
        EffectRegistry {
            risky_calls: to_set(KNOWN_RISKY_CALLS.iter().copied()),
            risk_annotations: to_set(
                [EFFECT_ANNOTATION, EFFECT_ANNOTATION_SHORT]
                    .into_iter()
                    .chain(HTTP_VERB_ANNOTATIONS.iter().copied()),
            ),
            accepting_annotations: to_set([EFFECT_ANNOTATION, EFFECT_ANNOTATION_SHORT]),
            marker_annotations: to_set([CHECK_MARKER, CHECK_MARKER_SHORT]),
        }
    }

    /// Builds the registry described by the `[effects]` table: the built-in
    /// catalog unless disabled, extended with the configured names.
    pub fn from_config(config: &EffectsConfig) -> Self {
        let mut registry = if config.builtin {
            Self::builtin()
        } else {
            Self::empty()
        };
        registry.risky_calls.extend(config.risky_calls.iter().cloned());
        registry.risk_annotations.extend(config.risk_annotations.iter().cloned());
        registry
            .accepting_annotations
            .extend(config.accepting_annotations.iter().cloned());
        registry
            .marker_annotations
            .extend(config.marker_annotations.iter().cloned());
        log::debug!(
            "effect registry: {} call targets, {} risk annotations, {} accepting, {} markers",
            registry.risky_calls.len(),
            registry.risk_annotations.len(),
            registry.accepting_annotations.len(),
            registry.marker_annotations.len()
        );
        registry
    }

    /// The registry as an `[effects]` table with the built-ins spelled out.
    pub fn to_config(&self) -> EffectsConfig {
        EffectsConfig {
            builtin: false,
            risky_calls: sorted(&self.risky_calls),
            risk_annotations: sorted(&self.risk_annotations),
            accepting_annotations: sorted(&self.accepting_annotations),
            marker_annotations: sorted(&self.marker_annotations),
        }
    }

    pub fn risky_calls(&self) -> &FxHashSet<String> {
        &self.risky_calls
    }

    pub fn risk_annotations(&self) -> &FxHashSet<String> {
        &self.risk_annotations
    }

    pub fn accepting_annotations(&self) -> &FxHashSet<String> {
        &self.accepting_annotations
    }

    pub fn marker_annotations(&self) -> &FxHashSet<String> {
        &self.marker_annotations
    }

    pub fn is_risky_call(&self, qualified_name: &str) -> bool {
        self.risky_calls.contains(qualified_name)
    }

    /// Exact match of an annotation name reported for a resolved call target.
    pub fn is_risk_annotation(&self, name: &str) -> bool {
        self.risk_annotations.contains(name)
    }

    /// Whether a declaration carrying `annotations` accepts the effect.
    pub fn accepts_effect(&self, annotations: &[Annotation]) -> bool {
        declares_any(annotations, &self.accepting_annotations)
    }

    /// Whether a declaration carrying `annotations` asks to be checked.
    pub fn is_marked(&self, annotations: &[Annotation]) -> bool {
        declares_any(annotations, &self.marker_annotations)
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Whether a declared annotation is in `names`.
///
/// A resolved annotation is matched by its qualified name only. Otherwise the
/// name as written and its short name are tried.
pub fn declares(annotation: &Annotation, names: &FxHashSet<String>) -> bool {
    match &annotation.qualified_name {
        Some(qualified) => names.contains(qualified),
        None => names.contains(&annotation.name) || names.contains(annotation.short_name()),
    }
}

pub fn declares_any(annotations: &[Annotation], names: &FxHashSet<String>) -> bool {
    annotations.iter().any(|annotation| declares(annotation, names))
}

fn to_set<'a>(names: impl IntoIterator<Item = &'a str>) -> FxHashSet<String> {
    names.into_iter().map(str::to_string).collect()
}

fn sorted(names: &FxHashSet<String>) -> Vec<String> {
    let mut names: Vec<String> = names.iter().cloned().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use netguard_syntax::testing::{annotation, resolved_annotation};

    #[test]
    fn builtin_catalog_contents() {
        let registry = EffectRegistry::builtin();
        assert!(registry.is_risky_call("okhttp3.OkHttpClient.newCall"));
        assert!(registry.is_risky_call("android.webkit.WebView.loadUrl"));
        assert!(!registry.is_risky_call("okhttp3.OkHttpClient"));
        assert!(registry.is_risk_annotation(EFFECT_ANNOTATION));
        assert!(registry.is_risk_annotation("HasRiskyInternetConnection"));
        assert!(registry.is_risk_annotation("retrofit2.http.GET"));
        assert!(!registry.is_risk_annotation("GET"));
        assert_eq!(registry.risky_calls().len(), 6);
    }

    #[test]
    fn config_extends_builtins() {
        let config = EffectsConfig {
            risky_calls: vec!["io.ktor.client.HttpClient.get".to_string()],
            ..EffectsConfig::default()
        };
        let registry = EffectRegistry::from_config(&config);
        assert!(registry.is_risky_call("io.ktor.client.HttpClient.get"));
        assert!(registry.is_risky_call("java.net.URL.openStream"));
    }

    #[test]
    fn config_can_replace_builtins() {
        let config = EffectsConfig {
            builtin: false,
            accepting_annotations: vec!["Online".to_string()],
            ..EffectsConfig::default()
        };
        let registry = EffectRegistry::from_config(&config);
        assert!(registry.risky_calls().is_empty());
        assert!(registry.accepts_effect(&[annotation("Online")]));
        assert!(!registry.accepts_effect(&[annotation(EFFECT_ANNOTATION_SHORT)]));
    }

    #[test]
    fn declared_annotations_match_any_spelling() {
        let registry = EffectRegistry::builtin();
        assert!(registry.accepts_effect(&[annotation("HasRiskyInternetConnection")]));
        assert!(registry.accepts_effect(&[annotation(EFFECT_ANNOTATION)]));
        assert!(registry.accepts_effect(&[resolved_annotation("Risky", EFFECT_ANNOTATION)]));
        assert!(registry.is_marked(&[annotation("effect.InternetSafeCheck")]));
        assert!(!registry.accepts_effect(&[annotation("Deprecated")]));
    }

    #[test]
    fn resolved_foreign_annotation_with_same_short_name_does_not_match() {
        let registry = EffectRegistry::builtin();
        let foreign = resolved_annotation(
            "HasRiskyInternetConnection",
            "org.other.lint.HasRiskyInternetConnection",
        );
        assert!(!registry.accepts_effect(&[foreign.clone()]));
        assert!(!declares(&foreign, registry.risk_annotations()));
        assert!(registry.accepts_effect(&[resolved_annotation(
            "HasRiskyInternetConnection",
            EFFECT_ANNOTATION
        )]));
    }

    #[test]
    fn to_config_round_trips() {
        let registry = EffectRegistry::builtin();
        let config = registry.to_config();
        assert!(!config.builtin);
        assert_eq!(config.risky_calls[0], "android.webkit.WebView.loadUrl");
        assert_eq!(EffectRegistry::from_config(&config), registry);
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EffectRegistry>();
    }
}
