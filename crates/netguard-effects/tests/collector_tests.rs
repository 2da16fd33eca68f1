use netguard_effects::collector::{collect, ANONYMOUS};
use netguard_effects::registry::{EffectRegistry, EFFECT_ANNOTATION};
use netguard_effects::RiskyFunctionSet;
use netguard_syntax::testing::*;

const SOURCE: &str = r#"class Api {
    @HasRiskyInternetConnection
    fun fetchUsers() = client.newCall(request)

    fun render() {
        @HasRiskyInternetConnection
        fun refresh() = loadPage()
    }
}

@com.github.loinguyencs.safeinternetaccesschecker.effect.HasRiskyInternetConnection
fun ping() = URL(host).openStream()
"#;

fn unit() -> netguard_syntax::ProgramUnit {
    let fx = Fixture::new("Api.kt", SOURCE);
    let refresh = fx.function(
        "refresh",
        "",
        vec![annotation("HasRiskyInternetConnection")],
        vec![fx.call(3, "loadPage()")],
    );
    fx.unit(vec![
        class(
            "Api",
            "app.Api",
            vec![
                item(fx.function(
                    "fetchUsers",
                    "app.Api.fetchUsers",
                    vec![annotation("HasRiskyInternetConnection")],
                    vec![fx.call(1, "client.newCall(request)")],
                )),
                item(fx.function("render", "app.Api.render", vec![], vec![local_function(refresh)])),
            ],
        ),
        item(fx.function(
            "ping",
            "app.ping",
            vec![annotation(EFFECT_ANNOTATION)],
            vec![fx.call(2, "URL(host).openStream()")],
        )),
    ])
}

#[test]
fn collects_members_local_functions_and_qualified_tags() {
    let registry = EffectRegistry::builtin();
    let risky = collect(&unit(), registry.risk_annotations());

    let expected: RiskyFunctionSet = ["app.Api.fetchUsers", "refresh", "app.ping"].into_iter().collect();
    assert_eq!(risky, expected);
    assert!(!risky.contains("app.Api.render"));
}

#[test]
fn collecting_twice_gives_the_same_set() {
    let registry = EffectRegistry::builtin();
    let unit = unit();
    assert_eq!(
        collect(&unit, registry.risk_annotations()),
        collect(&unit, registry.risk_annotations())
    );
}

#[test]
fn membership_is_exact() {
    let registry = EffectRegistry::builtin();
    let risky = collect(&unit(), registry.risk_annotations());
    assert!(!risky.contains("fetchUsers"));
    assert!(!risky.contains("app.Api"));
}

#[test]
fn anonymous_functions_are_kept() {
    let registry = EffectRegistry::builtin();
    let anonymous = function(None, "", vec![annotation("HasRiskyInternetConnection")], vec![]);
    let unit = Fixture::new("Anon.kt", "").unit(vec![item(anonymous)]);

    let risky = collect(&unit, registry.risk_annotations());
    assert_eq!(risky.iter().collect::<Vec<_>>(), vec![ANONYMOUS]);
}

#[test]
fn resolved_annotation_names_are_matched() {
    let registry = EffectRegistry::builtin();
    let aliased = function(
        named("sync"),
        "app.sync",
        vec![resolved_annotation("Risky", EFFECT_ANNOTATION)],
        vec![],
    );
    let unit = Fixture::new("Alias.kt", "").unit(vec![item(aliased)]);

    assert!(collect(&unit, registry.risk_annotations()).contains("app.sync"));
}
