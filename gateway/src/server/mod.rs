//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use gateway::Trace;
use gateway::inbound::graphql::GatewaySchema;
use gateway::inbound::http::graphql::graphql;
use gateway::inbound::http::health::{HealthState, live, ready};
use gateway::inbound::http::playground;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    schema: web::Data<GatewaySchema>,
    graphiql: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        schema,
        graphiql,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(schema)
        .wrap(Trace)
        .service(graphql)
        .service(ready)
        .service(live);

    if graphiql {
        app.service(playground::graphiql)
    } else {
        app
    }
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        schema,
        bind_addr,
        graphiql,
    } = config;
    let schema = web::Data::new(schema);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            schema: schema.clone(),
            graphiql,
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, graphiql, "gateway listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use gateway::domain::Directory;
    use gateway::inbound::graphql::build_schema;
    use gateway::test_support::InMemoryRestBackend;
    use rstest::rstest;

    fn deps(graphiql: bool) -> AppDependencies {
        let directory = Directory::new(Arc::new(InMemoryRestBackend::new()));
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            schema: web::Data::new(build_schema(directory)),
            graphiql,
        }
    }

    #[rstest]
    #[case::enabled(true, StatusCode::OK)]
    #[case::disabled(false, StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn graphiql_route_follows_configuration(
        #[case] enabled: bool,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(build_app(deps(enabled))).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(response.status(), expected);
    }

    #[actix_web::test]
    async fn every_response_carries_a_trace_id() {
        let app = test::init_service(build_app(deps(false))).await;
        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert!(response.headers().contains_key("trace-id"));
    }
}
