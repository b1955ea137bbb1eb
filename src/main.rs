use shuttle_runtime::{Error, SecretStore, Secrets};

#[shuttle_runtime::main]
async fn main(
    #[Secrets] secret_store: SecretStore,
) -> shuttle_axum::ShuttleAxum {
    if let Some(env) = secret_store.get("ENV") {
        if env == "prod" {
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::INFO)
                .init();
        }
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let Some(openai_token) = secret_store.get("OPENAI_API_KEY") else {
        return Err(Error::BuildPanic(
            "OPENAI_API_KEY was not found".to_string(),
        ));
    };
    let Some(accept_tokens) = secret_store.get("ACCEPT_PAYMENT_TOKENS")
    else {
        return Err(Error::BuildPanic(
            "ACCEPT_PAYMENT_TOKENS was not found".to_string(),
        ));
    };
    let accept_tokens = accept_tokens
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>();

    let router = api::serve(openai_token, accept_tokens, "config.toml")
        .await
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    Ok(router.into())
}
