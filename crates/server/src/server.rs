use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::{
    TypedHeader,
    typed_header::TypedHeaderRejection,
    headers::{Error as AxumError, Header},
};
use tower_http::trace::TraceLayer;

use std::{net::SocketAddr, sync::Arc};

use crate::{
    ServerError, accounts, budgets, categories, debts, investments, recurring, reminders, reports,
    savings_goals, split_bills, tags, transactions, transfers, users,
};
use engine::Engine;

static USER_ID_HEADER: axum::http::HeaderName = axum::http::HeaderName::from_static("x-user-id");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Id of the caller, taken from the `x-user-id` header.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub String);

/// `TypedHeader` for the identity header
///
/// Requests to owner-scoped routes must contain an "x-user-id" entry.
#[derive(Debug)]
struct UserIdHeader(String);

impl Header for UserIdHeader {
    fn name() -> &'static axum::http::HeaderName {
        &USER_ID_HEADER
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

        Ok(UserIdHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-user-id header"),
        }
    }
}

async fn auth(
    user_header: Result<TypedHeader<UserIdHeader>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    // missing and blank headers are both rejected
    let Ok(TypedHeader(UserIdHeader(user_id))) = user_header else {
        return Err(ServerError::Unauthorized);
    };

    request.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(request).await)
}

/// Routes scoped by the identity header.
fn header_routes() -> Router<ServerState> {
    Router::new()
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/accounts/{id}",
            get(accounts::get).put(accounts::update).delete(accounts::delete),
        )
        .route("/transfers", get(transfers::list).post(transfers::create))
        .route(
            "/transfers/{id}",
            get(transfers::get).delete(transfers::delete),
        )
        .route("/debts", get(debts::list).post(debts::create))
        .route("/debts/summary", get(debts::summary))
        .route(
            "/debts/{id}",
            get(debts::get).put(debts::update).delete(debts::delete),
        )
        .route("/debts/{id}/pay", post(debts::pay))
        .route(
            "/investments",
            get(investments::list).post(investments::create),
        )
        .route("/investments/summary", get(investments::summary))
        .route(
            "/investments/{id}",
            get(investments::get)
                .put(investments::update)
                .delete(investments::delete),
        )
        .route("/reminders", get(reminders::list).post(reminders::create))
        .route(
            "/reminders/{id}",
            get(reminders::get)
                .put(reminders::update)
                .delete(reminders::delete),
        )
        .route(
            "/savings-goals",
            get(savings_goals::list).post(savings_goals::create),
        )
        .route(
            "/savings-goals/{id}",
            get(savings_goals::get)
                .put(savings_goals::update)
                .delete(savings_goals::delete),
        )
        .route(
            "/savings-goals/{id}/contribute",
            post(savings_goals::contribute),
        )
        .route(
            "/recurring-transactions",
            get(recurring::list).post(recurring::create),
        )
        .route("/recurring-transactions/summary", get(recurring::summary))
        .route(
            "/recurring-transactions/{id}",
            get(recurring::get)
                .put(recurring::update)
                .delete(recurring::delete),
        )
        .route(
            "/split-bills",
            get(split_bills::list).post(split_bills::create),
        )
        .route(
            "/split-bills/{id}",
            get(split_bills::get)
                .put(split_bills::update)
                .delete(split_bills::delete),
        )
        .route(
            "/split-bills/{id}/participants/{participant_id}",
            put(split_bills::set_paid),
        )
        .route("/tags", get(tags::list).post(tags::create))
        .route(
            "/tags/{id}",
            get(tags::get).put(tags::update).delete(tags::delete),
        )
        .route("/users/me", get(users::get).put(users::save))
        .route("/reports/monthly", get(reports::monthly))
        .route("/reports/net-worth", get(reports::net_worth))
        .route_layer(middleware::from_fn(auth))
}

/// Routes where the owner travels in the body or the query string.
fn claimed_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            get(transactions::get)
                .put(transactions::update)
                .delete(transactions::delete),
        )
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/{id}",
            get(categories::get)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route("/budgets", get(budgets::list).post(budgets::create))
        .route("/budgets/status", get(budgets::status))
        .route(
            "/budgets/{id}",
            get(budgets::get).put(budgets::update).delete(budgets::delete),
        )
}

/// The full application router.
pub fn app(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .merge(header_routes())
        .merge(claimed_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

pub async fn run(engine: Engine, addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
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

    axum::serve(listener, app(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
