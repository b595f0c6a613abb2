use todo_core::Task;

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task = Task::new(7, "buy milk");

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json, serde_json::json!({ "id": 7, "description": "buy milk" }));

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn task_list_serializes_as_array() {
    let tasks = vec![Task::new(1, "a"), Task::new(2, "b")];

    let json = serde_json::to_string(&tasks).unwrap();
    assert_eq!(
        json,
        r#"[{"id":1,"description":"a"},{"id":2,"description":"b"}]"#
    );
}
