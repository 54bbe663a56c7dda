//! End-to-end tests for solving requests

use kmap_logic::{CellValue, Form, KmapConfig, Response, SolveRequest, Solver};
use serde_json::{json, Value};

fn respond_json(request: Value) -> (u16, Value) {
    let request: SolveRequest = serde_json::from_value(request).expect("valid request");
    let response = Solver::default().respond(&request);
    let status = response.status_code();
    let body = serde_json::from_str(&response.to_json().unwrap()).unwrap();
    (status, body)
}

#[test]
fn test_empty_request_is_zero_function() {
    let (status, body) = respond_json(json!({}));
    assert_eq!(status, 200);
    assert_eq!(body["solution"], "0");
    assert_eq!(body["kmap"]["groups"], json!([]));
    assert_eq!(body["kmap"]["explanations"], json!([]));
    assert_eq!(body["kmap"]["form_type"], "SOP");
    assert_eq!(body["kmap"]["row_vars"], "a,b");
    assert_eq!(body["kmap"]["col_vars"], "c,d");
    assert_eq!(body["kmap"]["output_name"], "f");
    assert_eq!(
        body["kmap"]["map"],
        json!([
            ["0", "0", "0", "0"],
            ["0", "0", "0", "0"],
            ["0", "0", "0", "0"],
            ["0", "0", "0", "0"]
        ])
    );
}

#[test]
fn test_all_minterms_three_variables() {
    let (status, body) = respond_json(json!({
        "variables": "a,b,c",
        "minterms": ["0", "1", "2", "3", "4", "5", "6", "7"],
        "form_type": "SOP"
    }));
    assert_eq!(status, 200);
    assert_eq!(body["solution"], "1");
    assert_eq!(body["kmap"]["groups"], json!([]));
    assert_eq!(body["kmap"]["map"], json!([["1", "1", "1", "1"], ["1", "1", "1", "1"]]));
}

#[test]
fn test_all_minterms_two_variables() {
    let (_, body) = respond_json(json!({
        "variables": "a,b",
        "minterms": ["0", "1", "2", "3"],
        "dontcares": [],
        "form_type": "SOP"
    }));
    assert_eq!(body["solution"], "1");
}

#[test]
fn test_single_minterm_four_variables() {
    let (status, body) = respond_json(json!({
        "variables": "a,b,c,d",
        "minterms": ["5"],
        "dontcares": [],
        "form_type": "SOP"
    }));
    assert_eq!(status, 200);
    assert_eq!(body["solution"], "a'bc'd");
    assert_eq!(body["kmap"]["groups"], json!([[5]]));
    let explanations = body["kmap"]["explanations"].as_array().unwrap();
    assert_eq!(explanations.len(), 1);
    assert_eq!(
        explanations[0],
        "A group is formed around the 1s at positions [5]. This simplifies to the term a'bc'd."
    );
    // 5 = 01|01 -> second row, second column
    assert_eq!(body["kmap"]["map"][1][1], "1");
}

#[test]
fn test_five_variables_is_client_error() {
    let (status, body) = respond_json(json!({
        "variables": "a,b,c,d,e",
        "minterms": ["1"]
    }));
    assert_eq!(status, 400);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains('5'));
    assert!(message.contains("2-4"));
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[test]
fn test_malformed_token_is_client_error() {
    let (status, body) = respond_json(json!({"variables": "a,b", "minterms": ["1", "x"]}));
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("\"x\""));
}

#[test]
fn test_overlap_is_client_error() {
    let (status, body) = respond_json(json!({
        "variables": "a,b,c",
        "minterms": ["1", "2"],
        "dontcares": ["2"]
    }));
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("[2]"));
}

#[test]
fn test_pos_with_dont_cares() {
    // zeros of Σm(0,1,2,5,8,9,10) are covered by cd, bd' and ab
    let (status, body) = respond_json(json!({
        "variables": "a,b,c,d",
        "minterms": ["0", "1", "2", "5", "8", "9", "10"],
        "form_type": "POS"
    }));
    assert_eq!(status, 200);
    assert_eq!(body["kmap"]["form_type"], "POS");
    assert_eq!(body["solution"], "(c' + d') (b' + d) (a' + b')");
    assert_eq!(body["kmap"]["groups"], json!([[3, 7, 11, 15], [4, 6, 12, 14], [12, 13, 14, 15]]));
    let explanations = body["kmap"]["explanations"].as_array().unwrap();
    assert_eq!(explanations.len(), 3);
    assert!(explanations[0]
        .as_str()
        .unwrap()
        .ends_with("This simplifies to the term (c' + d')."));
}

#[test]
fn test_custom_labels_are_echoed() {
    let (_, body) = respond_json(json!({
        "variables": "x, y",
        "output_name": " out ",
        "minterms": ["1"]
    }));
    assert_eq!(body["kmap"]["output_name"], "out");
    assert_eq!(body["kmap"]["row_vars"], "x");
    assert_eq!(body["kmap"]["col_vars"], "y");
    assert_eq!(body["kmap"]["row_labels"], json!(["0", "1"]));
    assert_eq!(body["solution"], "x'y");
}

#[test]
fn test_solve_and_respond_agree() {
    let request = SolveRequest::new()
        .with_variables("p,q,r")
        .with_minterms([1, 3, 4])
        .with_dontcares([6])
        .with_form(Form::Pos);
    let solver = Solver::new(KmapConfig::default());
    let solved = solver.solve(&request).unwrap();
    match solver.respond(&request) {
        Response::Success(response) => assert_eq!(response, solved),
        Response::Error(err) => panic!("unexpected error {}", err.error),
    }
    assert_eq!(solved.kmap.grid.cell(1, 3), CellValue::DontCare);
}

#[test]
fn test_default_form_comes_from_config() {
    let config = KmapConfig {
        default_form: Form::Pos,
        ..KmapConfig::default()
    };
    let response = Solver::new(config)
        .solve(&SolveRequest::new().with_variables("a,b").with_minterms([1, 2, 3]))
        .unwrap();
    assert_eq!(response.kmap.form_type, Form::Pos);
    assert_eq!(response.solution, "a + b");
}
