use anyhow::Result;
use reqwest::{Client, ClientBuilder, RequestBuilder};
use serde_json::{json, Value};
use std::time::Duration;

use crate::helpers::{parse_graphql_response, CREATE_EMPTY_CART_MUTATION};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub fn build_http_client() -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(APP_USER_AGENT)
        .timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

/// Optional headers sent along with a GraphQL request
#[derive(Debug, Default, Clone)]
pub struct RequestHeaders<'a> {
    pub token: Option<&'a str>,
    pub store: Option<&'a str>,
}

impl<'a> RequestHeaders<'a> {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn customer(token: &'a str) -> Self {
        Self {
            token: Some(token),
            store: None,
        }
    }

    pub fn store(mut self, store: &'a str) -> Self {
        self.store = Some(store);
        self
    }

    fn apply(&self, mut builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(store) = self.store {
            builder = builder.header("Store", store);
        }
        builder
    }
}

pub async fn send_request(address: &str, headers: RequestHeaders<'_>, body: Value) -> Result<Value> {
    let client = build_http_client()?;
    let response = headers.apply(client.post(address)).json(&body).send().await?;
    let data = response.json::<Value>().await?;
    eprintln!("{:#?}", &data);
    Ok(data)
}

pub async fn create_empty_cart(address: &str, headers: RequestHeaders<'_>) -> Result<String> {
    let body = json!({ "query": CREATE_EMPTY_CART_MUTATION });
    let response = send_request(address, headers, body).await?;
    let data = parse_graphql_response(response)?;
    Ok(data["createEmptyCart"]
        .as_str()
        .expect("cart id should be a string")
        .to_owned())
}

pub async fn set_payment_method(
    address: &str,
    headers: RequestHeaders<'_>,
    cart_id: &str,
    payment_method: Value,
) -> Result<Value> {
    let body = json!({
        "query": crate::helpers::SET_PAYMENT_METHOD_MUTATION,
        "variables": {
            "input": {
                "cartId": cart_id,
                "paymentMethod": payment_method
            }
        }
    });
    send_request(address, headers, body).await
}
