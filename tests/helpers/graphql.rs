use anyhow::Result;
use claims::{assert_none, assert_some};
use serde_json::{to_string_pretty, Value};

/// Asserts the response carried no errors and returns its `data`
pub fn parse_graphql_response(response: Value) -> Result<Value> {
    if let Some(errors) = response.get("errors") {
        eprintln!("Found Errors: {}", to_string_pretty(errors)?);
        assert_none!(errors.get(0));
    }

    let data = response.get("data");
    assert_some!(data);
    Ok(data.unwrap().clone())
}

/// The first GraphQL error on the response, which must be present
pub fn first_error(response: &Value) -> Value {
    let error = response["errors"].get(0);
    assert_some!(error);
    error.unwrap().clone()
}
