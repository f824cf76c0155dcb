//! Interaction webhook
//!
//! `POST /` with a signed interaction. PINGs are answered with a PONG,
//! anything else verified is accepted with 202. Every other route is 404.

use nonna_core::interaction::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use nonna_core::{InteractionReply, InteractionVerifier};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::Response;
use warp::{Filter, Reply};

/// Webhook routes
pub fn routes(
    verifier: Arc<InteractionVerifier>,
) -> impl Filter<Extract = (Response,), Error = Infallible> + Clone {
    let interactions = warp::post()
        .and(warp::path::end())
        .and(warp::header::optional::<String>(SIGNATURE_HEADER))
        .and(warp::header::optional::<String>(TIMESTAMP_HEADER))
        .and(warp::body::bytes())
        .and(warp::any().map(move || Arc::clone(&verifier)))
        .and_then(handle_interaction);

    interactions.or(warp::any().map(not_found)).unify()
}

fn not_found() -> Response {
    warp::reply::with_status("Not Found.", StatusCode::NOT_FOUND).into_response()
}

async fn handle_interaction(
    signature: Option<String>,
    timestamp: Option<String>,
    body: Bytes,
    verifier: Arc<InteractionVerifier>,
) -> Result<Response, Infallible> {
    let verified = verifier.verify(signature.as_deref(), timestamp.as_deref(), &body);

    let response = match verified {
        Ok(interaction) => match interaction.reply() {
            InteractionReply::Pong => {
                tracing::info!("interaction ping");
                warp::reply::json(&serde_json::json!({ "type": 1 })).into_response()
            }
            InteractionReply::Acknowledged => {
                tracing::info!(kind = interaction.kind, id = ?interaction.id, "interaction accepted");
                StatusCode::ACCEPTED.into_response()
            }
        },
        Err(e) if e.is_unauthorized() => {
            warp::reply::with_status("Bad request signature.", StatusCode::UNAUTHORIZED)
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "interaction rejected");
            warp::reply::with_status(e.to_string(), StatusCode::BAD_REQUEST).into_response()
        }
    };
    Ok(response)
}

/// Serve until the process is stopped
pub async fn serve(verifier: InteractionVerifier, addr: std::net::SocketAddr) {
    tracing::info!(%addr, "interaction webhook listening");
    warp::serve(routes(Arc::new(verifier))).run(addr).await;
}
