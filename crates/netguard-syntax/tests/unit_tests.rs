use netguard_syntax::testing::*;
use netguard_syntax::visitor::{walk_function, walk_unit, Visitor};
use netguard_syntax::{calls, CallId, ExprKind, Function, ItemKind, ProgramUnit, UnitError};

const CLIENT: &str = r#"class NetworkClient {
    fun load() {
        try {
            fetchData()
        } catch (e: Exception) {
            report(e)
        }
        val worker = fun() { refresh() }
    }
}"#;

fn client_unit() -> ProgramUnit {
    let fx = Fixture::new("NetworkClient.kt", CLIENT);
    let anonymous = function(None, "", vec![], vec![fx.call(4, "refresh()")]);
    let load = fx.function(
        "load",
        "NetworkClient.load",
        vec![],
        vec![
            try_catch(vec![fx.call(1, "fetchData()")], vec![fx.call(2, "report(e)")]),
            local_function(anonymous),
        ],
    );
    fx.unit(vec![class("NetworkClient", "NetworkClient", vec![item(load)])])
}

#[test]
fn calls_are_listed_in_source_order() {
    let unit = client_unit();
    let ids: Vec<CallId> = calls(&unit).iter().map(|call| call.id).collect();
    assert_eq!(ids, vec![CallId(1), CallId(2), CallId(4)]);
}

#[test]
fn outer_calls_precede_nested_ones() {
    let fx = Fixture::new("A.kt", "client.newCall(request).execute()");
    let inner = fx.call(1, "client.newCall(request)");
    let outer = fx.method_call(2, "client.newCall(request).execute()", inner);
    let unit = fx.unit(vec![item(function(named("f"), "A.f", vec![], vec![outer]))]);

    let texts: Vec<&str> = calls(&unit).iter().map(|call| call.text.as_str()).collect();
    assert_eq!(texts, vec!["client.newCall(request).execute()", "client.newCall(request)"]);
}

#[test]
fn visitor_reaches_nested_functions() {
    struct Names(Vec<String>);

    impl<'ast> Visitor<'ast> for Names {
        fn visit_function(&mut self, function: &'ast Function) {
            let name = function.name.as_ref().map_or("<anonymous>", |ident| ident.name.as_str());
            self.0.push(name.to_string());
            walk_function(self, function);
        }
    }

    let unit = client_unit();
    let mut names = Names(Vec::new());
    walk_unit(&mut names, &unit);
    assert_eq!(names.0, vec!["load", "<anonymous>"]);
}

#[test]
fn fixture_spans_point_at_text() {
    let unit = client_unit();
    let call = calls(&unit)[0];
    assert_eq!(&unit.source[call.span.start..call.span.end], "fetchData()");
    let (line, column) = unit.source_file().line_col(call.span.start);
    assert_eq!((line, column), (4, 13));
}

#[test]
fn unit_json_roundtrips_through_serde() {
    let unit = client_unit();
    let json = serde_json::to_string(&unit).unwrap();
    let decoded = ProgramUnit::from_json_str(&json, "client.json").unwrap();
    assert_eq!(decoded, unit);
}

#[test]
fn minimal_json_uses_defaults() {
    let json = r#"{
        "path": "Main.kt",
        "items": [
            { "kind": { "function": {
                "name": { "name": "main" },
                "body": { "kind": { "call": { "id": 7, "text": "connect()" } } }
            } } }
        ]
    }"#;
    let unit = ProgramUnit::from_json_str(json, "main.json").unwrap();
    let ItemKind::Function(main) = &unit.items[0].kind else {
        panic!("expected a function item");
    };
    assert!(main.qualified_name.is_none());
    assert!(main.annotations.is_empty());
    let body = main.body.as_ref().unwrap();
    assert!(matches!(&body.kind, ExprKind::Call(call) if call.id == CallId(7) && call.args.is_empty()));
}

#[test]
fn malformed_json_reports_position() {
    let err = ProgramUnit::from_json_str("{\n  \"path\": 3\n}", "bad.json").unwrap_err();
    let UnitError::Decode { message, span, .. } = err else {
        panic!("expected a decode error");
    };
    assert!(message.contains("expected a string"), "unexpected message: {message}");
    assert_eq!(span.offset(), 12);
}
