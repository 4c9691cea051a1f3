/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Holds no request data and no cache: every handler acquires its own
/// connection or transaction from the pool for the duration of a request.
/// Server configuration is consumed while building the router and is not
/// kept here.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: memorial_db::DbPool,
}
