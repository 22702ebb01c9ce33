use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::{auth::STORE_HEADER, graphql::CheckoutSchema, models::RequestContext, CheckoutError};

#[tracing::instrument(name = "graphql", skip(schema, http_request, graphql_request))]
pub async fn graphql_index(
    schema: web::Data<CheckoutSchema>,
    http_request: HttpRequest,
    graphql_request: GraphQLRequest,
) -> Result<GraphQLResponse, CheckoutError> {
    // The raw headers are attached to every request, tokens are only verified
    // by the resolvers that need an identity
    let context = extract_request_context(&http_request)?;

    let request = graphql_request.into_inner().data(context);
    Ok(schema.execute(request).await.into())
}

pub async fn graphql_playground() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/").finish())
}

fn extract_request_context(req: &HttpRequest) -> Result<RequestContext, CheckoutError> {
    let authorization = header_value(req, AUTHORIZATION.as_str())?;
    let store = header_value(req, STORE_HEADER)?;
    Ok(RequestContext::new(authorization, store))
}

fn header_value(req: &HttpRequest, name: &str) -> Result<Option<String>, CheckoutError> {
    req.headers()
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map(str::to_owned)
                .map_err(|_| CheckoutError::BadRequest(format!("{} header is not valid text", name)))
        })
        .transpose()
}
