use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use jss::{
    build_validator, CallContract, CallErrorKind, CallValidator, ParameterSet, Returned, Schema,
};
use serde_json::{json, Value};

fn even_registry() -> CallValidator {
    build_validator(&json!({ "ns/isEven": { "type": "integer" } })).expect("registry should build")
}

fn todo_schemas() -> Value {
    let uuid = json!({ "type": "string", "pattern": "^[0-9]{3}$" });
    let title = json!({ "type": "string", "minLength": 4 });
    let value = json!({ "type": "integer", "minimum": 5 });
    let todo = json!({
        "type": "object",
        "properties": { "title": title, "value": value },
        "additionalProperties": false
    });
    let todo_list = json!({ "type": "array", "items": todo });
    json!({
        "base/uuid": uuid,
        "base/uuidList": { "type": "array", "items": uuid },
        "todo/userId": uuid,
        "todo/title": title,
        "todo/value": value,
        "todo/todo": todo,
        "todo/todoList": todo_list,
        "todo/todosByUser": {
            "type": "object",
            "propertyNames": uuid,
            "additionalProperties": todo_list
        }
    })
}

#[test]
fn positional_call_returns_checked_value() {
    let result = even_registry()
        .call(
            ParameterSet::positional([(json!(4), "ns/isEven")]),
            Some(Schema::reference("ns/isEven")),
            || Ok(Returned::value(4)),
        )
        .unwrap();
    assert_eq!(result, Some(json!(4)));
}

#[test]
fn positional_failure_uses_index_label() {
    let err = even_registry()
        .call(
            ParameterSet::positional([(json!("x"), "ns/isEven")]),
            Some(Schema::reference("ns/isEven")),
            || Ok(Returned::value(4)),
        )
        .unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::ParameterValidation);
    assert_eq!(err.to_string(), "parameters[0] should be integer");
}

#[test]
fn named_call_aggregates_failures_in_order() {
    let validator = even_registry();
    let sum = validator
        .call(
            ParameterSet::named([("a", json!(2), "ns/isEven"), ("b", json!(3), "ns/isEven")]),
            Some(Schema::reference("ns/isEven")),
            || Ok(Returned::value(5)),
        )
        .unwrap();
    assert_eq!(sum, Some(json!(5)));

    let invoked = AtomicBool::new(false);
    let err = validator
        .call(
            ParameterSet::named([("a", json!("x"), "ns/isEven"), ("b", json!("y"), "ns/isEven")]),
            Some(Schema::reference("ns/isEven")),
            || {
                invoked.store(true, Ordering::SeqCst);
                Ok(Returned::value(5))
            },
        )
        .unwrap_err();
    assert!(!invoked.load(Ordering::SeqCst));
    assert_eq!(
        err.lines().collect::<Vec<_>>(),
        vec!["\"a\" should be integer", "\"b\" should be integer"]
    );
}

#[test]
fn json_parameter_input_matches_constructed_sets() {
    let parameters =
        ParameterSet::from_value(json!({ "a": ["x", "ns/isEven"], "b": [2, "ns/isEven"] }))
            .unwrap();
    let err = even_registry()
        .call(parameters, None, || Ok(Returned::nothing()))
        .unwrap_err();
    assert_eq!(err.to_string(), "\"a\" should be integer");
}

#[tokio::test]
async fn async_contract_without_result_schema() {
    let validator = even_registry();

    let nothing = validator
        .call_async(ParameterSet::empty(), None, || {
            Ok(Returned::pending(async { Ok(None) }))
        })
        .await
        .unwrap();
    assert_eq!(nothing, None);

    let err = validator
        .call_async(ParameterSet::empty(), None, || {
            Ok(Returned::pending(async { Ok(Some(json!(2))) }))
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::ResultValidation);
    assert_eq!(err.to_string(), "resolved value should be undefined");
}

#[test]
fn sync_contract_rejects_pending_value_without_polling_it() {
    let polled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&polled);

    let err = even_registry()
        .call(ParameterSet::empty(), None, move || {
            Ok(Returned::pending(async move {
                flag.store(true, Ordering::SeqCst);
                Err("never observed".into())
            }))
        })
        .unwrap_err();

    assert_eq!(err.kind(), CallErrorKind::ResultShape);
    assert!(err
        .to_string()
        .starts_with("return value should not be a Promise."));
    assert!(!polled.load(Ordering::SeqCst));
}

#[test]
fn references_are_resolved_before_values_are_checked() {
    let err = even_registry()
        .call(
            ParameterSet::named([("a", json!("x"), "ns/isEven"), ("b", json!(1), "ns/missing")]),
            Some(Schema::reference("ns/gone")),
            || Ok(Returned::nothing()),
        )
        .unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::ReferenceResolution);
    assert_eq!(
        err.lines().collect::<Vec<_>>(),
        vec![
            "Unknown schema reference \"ns/missing\" for \"b\"",
            "Unknown schema reference \"ns/gone\" for \"return\"",
        ]
    );
}

#[test]
fn todo_domain_schemas_check_nested_values() {
    let validator = build_validator(&todo_schemas()).unwrap();
    let store = json!({ "123": [{ "title": "milk", "value": 7 }] });

    let users = validator
        .call(
            ParameterSet::named([("todosByUser", store.clone(), "todo/todosByUser")]),
            Some(Schema::reference("base/uuidList")),
            || Ok(Returned::value(json!(["123"]))),
        )
        .unwrap();
    assert_eq!(users, Some(json!(["123"])));

    let err = validator
        .call(
            ParameterSet::named([
                ("userId", json!("12"), "todo/userId"),
                ("todos", json!([{ "title": "ab", "value": 9 }]), "todo/todoList"),
            ]),
            None,
            || Ok(Returned::nothing()),
        )
        .unwrap_err();
    assert_eq!(
        err.lines().collect::<Vec<_>>(),
        vec![
            "\"userId\" should match pattern \"^[0-9]{3}$\"",
            "\"todos\"[0].title should NOT be shorter than 4 characters",
        ]
    );
}

#[tokio::test]
async fn invoke_follows_the_declared_mode() {
    let validator = build_validator(&todo_schemas()).unwrap();
    let writes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&writes);

    let contract = CallContract::resolving(
        ParameterSet::named([("userId", json!("456"), "todo/userId")]),
        Some(Schema::reference("base/uuidList")),
    );
    let invocation = validator.invoke(contract, move || {
        Ok(Returned::pending(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Some(json!(["123", "456"])))
        }))
    });
    assert!(invocation.is_pending());
    assert_eq!(
        invocation.outcome().await.unwrap(),
        Some(json!(["123", "456"]))
    );
    assert_eq!(writes.load(Ordering::SeqCst), 1);
}

#[test]
fn uuid_format_is_enforced_by_default() {
    let validator = build_validator(&json!({
        "base/uuid": { "type": "string", "format": "uuid" }
    }))
    .unwrap();

    let ok = validator.call(
        ParameterSet::positional([(json!("67e55044-10b1-426f-9247-bb680e5fe0c8"), "base/uuid")]),
        None,
        || Ok(Returned::nothing()),
    );
    assert!(ok.is_ok());

    let err = validator
        .call(
            ParameterSet::positional([(json!("not-a-uuid"), "base/uuid")]),
            None,
            || Ok(Returned::nothing()),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "parameters[0] should match format \"uuid\"");
}
