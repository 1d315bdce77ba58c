//! Runs checked calls against the todo domain schemas.
//!
//! ```text
//! cargo run -p jss --example todo-contracts
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use jss::{build_validator, CallError, ParameterSet, Returned, Schema};
use serde_json::{json, Value};

type TodosByUser = Arc<Mutex<BTreeMap<String, Vec<Value>>>>;

fn schemas() -> Value {
    let uuid = json!({ "type": "string", "pattern": "^[0-9]{3}$" });
    let title = json!({ "type": "string", "minLength": 4 });
    let value = json!({ "type": "integer", "minimum": 5 });
    let todo = json!({
        "type": "object",
        "properties": { "title": title, "value": value },
        "additionalProperties": false
    });
    json!({
        "base/uuid": uuid,
        "base/uuidList": { "type": "array", "items": uuid },
        "todo/userId": uuid,
        "todo/title": title,
        "todo/value": value,
        "todo/todo": todo,
        "todo/todoList": { "type": "array", "items": todo }
    })
}

fn report(what: &str, result: Result<Option<Value>, CallError>) {
    match result {
        Ok(Some(value)) => println!("{what}: ok {value}"),
        Ok(None) => println!("{what}: ok"),
        Err(err) => {
            println!("{what}: {:?} at {}", err.kind(), err.origin());
            for line in err.lines() {
                println!("  {line}");
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let validate = build_validator(&schemas())?;
    let store: TodosByUser = Arc::default();

    for (user, title, value) in [("123", "milk", 7), ("123", "eggs", 2), ("45", "tea", 9)] {
        let todos = Arc::clone(&store);
        let added = validate.call(
            ParameterSet::named([
                ("userId", json!(user), "todo/userId"),
                ("title", json!(title), "todo/title"),
                ("value", json!(value), "todo/value"),
            ]),
            None,
            move || {
                let mut todos = todos.lock().map_err(|err| err.to_string())?;
                todos
                    .entry(user.to_string())
                    .or_default()
                    .push(json!({ "title": title, "value": value }));
                Ok(Returned::nothing())
            },
        );
        report(&format!("addTodo({user}, {title}, {value})"), added);
    }

    let todos = Arc::clone(&store);
    let users = validate
        .call_async(
            ParameterSet::empty(),
            Some(Schema::reference("base/uuidList")),
            move || {
                Ok(Returned::pending(async move {
                    let todos = todos.lock().map_err(|err| err.to_string())?;
                    Ok(Some(json!(todos.keys().collect::<Vec<_>>())))
                }))
            },
        )
        .await;
    report("listUsers()", users);

    let todos = Arc::clone(&store);
    let listed = validate
        .call_async(
            ParameterSet::named([("userId", json!("123"), "todo/userId")]),
            Some(Schema::reference("todo/todoList")),
            move || {
                Ok(Returned::pending(async move {
                    let todos = todos.lock().map_err(|err| err.to_string())?;
                    Ok(todos.get("123").map(|list| json!(list)))
                }))
            },
        )
        .await;
    report("listTodos(123)", listed);

    Ok(())
}
