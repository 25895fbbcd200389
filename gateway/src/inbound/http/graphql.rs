//! GraphQL-over-HTTP endpoint.

use actix_web::{route, web};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use tracing::debug;

use crate::inbound::graphql::GatewaySchema;

/// Execute a GraphQL document.
///
/// `POST` accepts JSON bodies; `GET` reads `query`, `variables` and
/// `operationName` from the query string. Mutations over `GET` are rejected
/// by the engine.
#[route("/graphql", method = "GET", method = "POST")]
pub async fn graphql(schema: web::Data<GatewaySchema>, request: GraphQLRequest) -> GraphQLResponse {
    let request = request.into_inner();
    debug!(operation = ?request.operation_name, "executing GraphQL request");
    schema.execute(request).await.into()
}
