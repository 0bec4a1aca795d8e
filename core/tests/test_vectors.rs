//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use todo_core::{ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, Todo, TodoClient, UpdateTodo};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> TodoClient {
    TodoClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn cases(raw: &str) -> Vec<serde_json::Value> {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Check method, path, headers and body of a built request.
fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    match expected.get("body") {
        Some(body) => {
            let expected_headers: Vec<(String, String)> = expected["headers"]
                .as_array()
                .unwrap()
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect();
            assert_eq!(req.headers, expected_headers, "{name}: headers");
            let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_expected_error(name: &str, case: &serde_json::Value, err: ApiError) {
    match case["expected_error"].as_str().unwrap() {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
        "BadRequest" => assert!(matches!(err, ApiError::BadRequest(_)), "{name}: expected BadRequest"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

fn expected_todo(case: &serde_json::Value) -> Todo {
    serde_json::from_value(case["expected_result"].clone()).unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CreateTodo = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_todo(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_todo(simulated(&case));
        if case.get("expected_error").is_some() {
            assert_expected_error(name, &case, result.unwrap_err());
        } else {
            assert_eq!(result.unwrap(), expected_todo(&case), "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        assert_request(name, &c.build_list_todos(), &case["expected_request"]);

        let todos = c.parse_list_todos(simulated(&case)).unwrap();
        let expected: Vec<Todo> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(todos, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap();

        assert_request(name, &c.build_get_todo(id), &case["expected_request"]);

        let result = c.parse_get_todo(simulated(&case));
        if case.get("expected_error").is_some() {
            assert_expected_error(name, &case, result.unwrap_err());
        } else {
            assert_eq!(result.unwrap(), expected_todo(&case), "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap();
        let input: UpdateTodo = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_todo(id, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_todo(simulated(&case));
        if case.get("expected_error").is_some() {
            assert_expected_error(name, &case, result.unwrap_err());
        } else {
            assert_eq!(result.unwrap(), expected_todo(&case), "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();

        match case.get("input_id").and_then(serde_json::Value::as_u64) {
            Some(id) => {
                assert_request(name, &c.build_delete_todo(id), &case["expected_request"]);
                let result = c.parse_delete_todo(simulated(&case));
                if case.get("expected_error").is_some() {
                    assert_expected_error(name, &case, result.unwrap_err());
                } else {
                    assert!(result.is_ok(), "{name}: expected success");
                }
            }
            None => {
                assert_request(name, &c.build_delete_all_todos(), &case["expected_request"]);
                let count = c.parse_delete_all_todos(simulated(&case)).unwrap();
                assert_eq!(count, case["expected_result"].as_u64().unwrap(), "{name}: deleted count");
            }
        }
    }
}
