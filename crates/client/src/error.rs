use engine::GatewayError;
use reqwest::Response;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Map a reqwest failure onto the gateway taxonomy.
pub(crate) fn transport(err: reqwest::Error) -> GatewayError {
    if err.is_decode() {
        GatewayError::Decode(err.to_string())
    } else {
        GatewayError::Transport(err.to_string())
    }
}

/// Build the error for a non-2xx response, preferring the store's own message.
pub(crate) async fn status(res: Response) -> GatewayError {
    let status = res.status();
    let message = match res.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    GatewayError::Status {
        status: status.as_u16(),
        message,
    }
}
