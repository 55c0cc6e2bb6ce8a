//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector describes the input, the expected request, a simulated response,
//! and either the expected parsed result or the expected error. Bodies are
//! compared as parsed JSON so field ordering does not matter.

use serde_json::Value;
use shopping_list_core::{
    ApiError, CreateItem, HttpMethod, HttpRequest, HttpResponse, Item, ShoppingListClient,
    UpdateItem,
};

const BASE_URL: &str = "http://localhost:8000";

fn client() -> ShoppingListClient {
    ShoppingListClient::new(BASE_URL)
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn case_id(case: &Value) -> i64 {
    case["id"].as_i64().unwrap()
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let pair = h.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match expected.get("body") {
        Some(body) => {
            let actual: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&actual, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: unexpected body"),
    }
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// Compare a parse result against `expected_result` or `expected_error`.
fn assert_outcome<T>(name: &str, case: &Value, outcome: Result<T, ApiError>)
where
    T: std::fmt::Debug + PartialEq + serde::de::DeserializeOwned,
{
    if let Some(expected) = case.get("expected_error") {
        let err = outcome.unwrap_err();
        match expected["kind"].as_str().unwrap() {
            "rejected" => {
                let message = expected["message"].as_str().unwrap();
                assert!(
                    matches!(&err, ApiError::Rejected(msg) if msg == message),
                    "{name}: got {err:?}"
                );
            }
            "not_found" => assert!(matches!(err, ApiError::NotFound), "{name}: got {err:?}"),
            "http" => {
                let status = expected["status"].as_u64().unwrap() as u16;
                assert!(
                    matches!(&err, ApiError::Http { status: s, .. } if *s == status),
                    "{name}: got {err:?}"
                );
            }
            other => panic!("{name}: unknown error kind {other}"),
        }
    } else {
        let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(outcome.unwrap(), expected, "{name}: parsed result");
    }
}

#[test]
fn create_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CreateItem = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_item(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let outcome = c.parse_create_item(simulated_response(&case));
        assert_outcome::<Item>(name, &case, outcome);
    }
}

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_items();
        assert_request(name, &req, &case["expected_request"]);

        let outcome = c.parse_list_items(simulated_response(&case));
        assert_outcome::<Vec<Item>>(name, &case, outcome);
    }
}

#[test]
fn update_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let input: UpdateItem = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_item(case_id(&case), &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let outcome = c.parse_update_item(simulated_response(&case));
        assert_outcome::<Item>(name, &case, outcome);
    }
}

#[test]
fn toggle_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/toggle.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_toggle_item(case_id(&case));
        assert_request(name, &req, &case["expected_request"]);

        let outcome = c.parse_toggle_item(simulated_response(&case));
        assert_outcome::<Item>(name, &case, outcome);
    }
}

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_delete_item(case_id(&case));
        assert_request(name, &req, &case["expected_request"]);

        c.parse_delete_item(simulated_response(&case))
            .unwrap_or_else(|err| panic!("{name}: {err}"));
    }
}
