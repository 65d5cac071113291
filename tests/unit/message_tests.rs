//! Unit tests for JSON-RPC envelopes.

use serde_json::{json, Value};

use evolve_clang_format::protocol::message::{
    Method, Outbound, Request, Response, RpcError, METHOD_NOT_FOUND,
};
use evolve_clang_format::AppError;

#[test]
fn absent_fields_decode_as_null() {
    let request = Request::parse("{\"jsonrpc\":\"2.0\"}").expect("parse");

    assert!(request.id.is_null());
    assert!(request.params.is_null());
    assert_eq!(request.method(), None);
}

#[test]
fn known_methods_are_routed() {
    let measure = Request::parse("{\"method\":\"evolve.measure\"}").expect("parse");
    let template = Request::parse("{\"method\":\"evolve.template\"}").expect("parse");

    assert_eq!(measure.method(), Some(Method::Measure));
    assert_eq!(template.method(), Some(Method::Template));
}

#[test]
fn other_methods_are_unknown() {
    let request = Request::parse("{\"method\":\"evolve.populate\"}").expect("parse");

    assert_eq!(
        request.method(),
        Some(Method::Unknown("evolve.populate".into()))
    );
}

#[test]
fn non_object_line_is_malformed() {
    let err = Request::parse("[1,2,3]").unwrap_err();

    assert!(matches!(err, AppError::Protocol(_)));
}

#[test]
fn solution_is_required() {
    let request = Request::parse("{\"method\":\"evolve.measure\",\"params\":{}}").expect("parse");

    assert!(matches!(request.solution(), Err(AppError::Protocol(_))));
}

#[test]
fn solution_is_borrowed_from_params() {
    let request =
        Request::parse("{\"params\":{\"solution\":{\"IndentWidth\":2}}}").expect("parse");

    assert_eq!(request.solution().expect("solution"), &json!({ "IndentWidth": 2 }));
}

#[test]
fn success_omits_error() {
    let response = Response::success(json!(1), json!({ "ok": true }));

    let value = serde_json::to_value(&response).expect("serialize");

    assert_eq!(value, json!({ "jsonrpc": "2.0", "id": 1, "result": { "ok": true } }));
}

#[test]
fn failure_omits_result() {
    let response = Response::failure(Value::Null, RpcError::method_not_found());

    let value = serde_json::to_value(&response).expect("serialize");

    assert_eq!(
        value,
        json!({ "jsonrpc": "2.0", "id": null, "error": { "code": METHOD_NOT_FOUND, "message": "" } })
    );
}

#[test]
fn populate_has_no_id() {
    let solutions = vec![json!({ "BasedOnStyle": "LLVM" })];

    let line = serde_json::to_string(&Outbound::populate(&solutions)).expect("serialize");

    assert_eq!(
        line,
        r#"{"jsonrpc":"2.0","method":"evolve.populate","params":{"solutions":[{"BasedOnStyle":"LLVM"}]}}"#
    );
}
