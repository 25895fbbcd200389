//! GraphiQL client bootstrap page.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get};
use async_graphql::http::GraphiQLSource;

use super::GRAPHQL_PATH;

/// Serve the GraphiQL page pointed at the GraphQL endpoint.
#[get("/")]
pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::header, test};

    #[actix_web::test]
    async fn serves_html_pointing_at_the_endpoint() {
        let app = test::init_service(App::new().service(graphiql)).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert!(response.status().is_success());
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(content_type.starts_with("text/html"));

        let body = test::read_body(response).await;
        let page = std::str::from_utf8(&body).expect("utf8 page");
        assert!(page.contains(GRAPHQL_PATH));
    }
}
