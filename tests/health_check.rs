mod helpers;
use helpers::*;

#[actix_rt::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/health_check", &app.address))
        .send()
        .await
        .expect("failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[actix_rt::test]
async fn graphiql_is_served_on_get() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&app.address)
        .send()
        .await
        .expect("failed to execute request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("body should be text");
    assert!(body.contains("graphiql"));
}

#[actix_rt::test]
async fn malformed_authorization_header_is_rejected() {
    let app = spawn_app().await;
    let cart_id = create_empty_cart(&app.address, RequestHeaders::guest())
        .await
        .expect("guest cart should be created");

    let response = set_payment_method(
        &app.address,
        RequestHeaders::customer("not-a-real-token"),
        &cart_id,
        serde_json::json!({ "code": "checkmo" }),
    )
    .await
    .expect("request should complete");

    let error = first_error(&response);
    assert_eq!(error["extensions"]["kind"], "INVALID_TOKEN");
    assert_eq!(error["extensions"]["status"], 401);
}
