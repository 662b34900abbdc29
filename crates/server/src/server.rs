use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};

use std::sync::Arc;

use crate::{expenses, participants, summary, trips};
use engine::Engine;

static USER_EMAIL_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static("x-user-email");
static USER_NAME_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static("x-user-name");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Identity forwarded by the authenticating front layer.
///
/// The server trusts the upstream identity provider; requests must carry
/// "x-user-email" (the stable user key) and may carry "x-user-name".
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub email: String,
    pub name: String,
}

/// `TypedHeader` for the forwarded user email.
#[derive(Debug)]
struct UserEmailHeader(String);

impl Header for UserEmailHeader {
    fn name() -> &'static axum::http::HeaderName {
        &USER_EMAIL_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(AxumError::invalid());
        }

        Ok(UserEmailHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-user-email header"),
        }
    }
}

/// `TypedHeader` for the optional forwarded display name.
#[derive(Debug)]
struct UserNameHeader(String);

impl Header for UserNameHeader {
    fn name() -> &'static axum::http::HeaderName {
        &USER_NAME_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(AxumError::invalid());
        }

        Ok(UserNameHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-user-name header"),
        }
    }
}

async fn identity(
    email: Option<TypedHeader<UserEmailHeader>>,
    name: Option<TypedHeader<UserNameHeader>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(UserEmailHeader(email))) = email else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    let name = name
        .map(|TypedHeader(UserNameHeader(name))| name)
        .unwrap_or_else(|| email.clone());

    request.extensions_mut().insert(CurrentUser { email, name });
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/trips", post(trips::create).get(trips::list))
        .route(
            "/trips/{trip_id}",
            get(trips::get_trip).delete(trips::delete_trip),
        )
        .route("/trips/{trip_id}/participants", post(participants::add))
        .route(
            "/trips/{trip_id}/participants/{email}",
            delete(participants::remove),
        )
        .route(
            "/trips/{trip_id}/expenses",
            get(expenses::list).post(expenses::add),
        )
        .route(
            "/trips/{trip_id}/expenses/{index}",
            patch(expenses::update).delete(expenses::remove),
        )
        .route("/trips/{trip_id}/summary", get(summary::get))
        .route_layer(middleware::from_fn(identity))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
