use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "Todo tasks with optional owners, deadline and overdue queries"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/tasks", api = domain_tasks::ApiDoc),
    )
)]
pub struct ApiDoc;
