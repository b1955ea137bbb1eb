use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{any, get},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;
use utoipauto::utoipauto;

use crate::clients::search;

mod agent;
pub mod ask;
mod clients;
pub mod healthz;
pub mod not_found;
mod response;
mod stream;
mod token;

pub enum ApiError {
    MethodNotAllowed,
    PaymentError(String),
    ClientError(String),
    GenerationError(String),
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState {
    search: search::Client,
    openai: openai::models::Models,
    accept_tokens: Vec<String>,
    config: Config,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server: Server,
    pub openai: OpenAI,
    pub messages: Messages,
}

#[derive(Clone, Debug)]
pub struct Server {
    pub base_url: String,
    pub frontend_origin: String,
}

#[derive(Clone, Debug)]
pub struct OpenAI {
    pub base_url: String,
    pub model: String,
}

#[derive(Clone, Debug)]
pub struct Messages {
    pub no_answer: String,
    pub unknown: String,
}

pub async fn serve(
    openai_token: String,
    accept_tokens: Vec<String>,
    config_name: &str,
) -> anyhow::Result<Router> {
    #[utoipauto(paths = "./libs/api/src")]
    #[derive(OpenApi)]
    #[openapi(
        tags(
            (name = "ask", description = "Paywalled question answering API")
        )
    )]
    struct ApiDoc;

    info!(task = "start api serving");

    let config = util::load_config(config_name)?;
    let server = Server {
        base_url: config["server"]["base_url"]
            .as_str()
            .unwrap()
            .to_string(),
        frontend_origin: config["server"]["frontend_origin"]
            .as_str()
            .unwrap()
            .to_string(),
    };
    let openai_config = OpenAI {
        base_url: config["openai"]["base_url"]
            .as_str()
            .unwrap()
            .to_string(),
        model: config["openai"]["model"]
            .as_str()
            .unwrap_or(openai::models::chat::GPT_3_5_TURBO)
            .to_string(),
    };
    let messages = Messages {
        no_answer: config["messages"]["no_answer"]
            .as_str()
            .unwrap()
            .to_string(),
        unknown: config["messages"]["unknown"]
            .as_str()
            .unwrap()
            .to_string(),
    };

    let openai_client =
        openai::models::Models::new(&openai_config.base_url, &openai_token);

    let origins: [HeaderValue; 1] = [server.frontend_origin.parse()?];

    let state = Arc::new(ApiState {
        search: search::Client::new(),
        openai: openai_client,
        accept_tokens,
        config: Config {
            server,
            openai: openai_config,
            messages,
        },
    });

    let router = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .route("/healthz", get(healthz::get_health))
        // method dispatch happens inside the handler so that the method
        // check precedes the token checks
        .route("/api/ask", any(ask::post_ask))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(origins))
        .fallback(not_found::get_404);

    Ok(router)
}
