use axum::{
    routing::{get, post},
    Router,
};
use configuration::{Config, DataSourceConfig};
use database::{CsvSource, DataSource, DeliveryStore, PgSource};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    /// The current snapshot. Replaced wholesale on reload, never mutated.
    pub store: RwLock<Arc<DeliveryStore>>,
    pub source: Arc<dyn DataSource>,
    /// Held for the whole read-fetch-swap of a reload.
    pub reload_lock: Mutex<()>,
}

impl AppState {
    pub fn new(store: DeliveryStore, source: Arc<dyn DataSource>) -> Self {
        Self {
            store: RwLock::new(Arc::new(store)),
            source,
            reload_lock: Mutex::new(()),
        }
    }
}

/// Builds the data source named by the configuration.
pub fn source_from_config(config: &DataSourceConfig) -> Result<Arc<dyn DataSource>, database::DbError> {
    let source: Arc<dyn DataSource> = match config {
        DataSourceConfig::Csv {
            deliveries_path,
            awards_path,
        } => Arc::new(CsvSource::new(deliveries_path, awards_path)),
        DataSourceConfig::Postgres { url_env } => Arc::new(PgSource::from_env(url_env)?),
    };
    Ok(source)
}

/// All routes, wired to the given state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/players", get(handlers::get_players))
        .route("/api/compare", get(handlers::get_comparison))
        .route("/api/dataset", get(handlers::get_dataset))
        .route("/api/dataset/reload", post(handlers::reload_dataset))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(config: &Config, addr: SocketAddr) -> anyhow::Result<()> {
    // Note: Tracing is initialized by the calling binary.
    let source = source_from_config(&config.data_source)?;
    let store = DeliveryStore::load(source.as_ref()).await?;
    let app = router(Arc::new(AppState::new(store, source)));

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use analytics::MetricValue;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use comparison::RejectionReason;
    use core_types::{DeliveryRecord, MatchAwardRecord, PlayerId, Role};
    use database::DbError;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Each fetch adds one more award for "A", so reloads are observable.
    #[derive(Default)]
    struct GrowingSource {
        loads: AtomicU32,
    }

    #[async_trait::async_trait]
    impl DataSource for GrowingSource {
        async fn fetch_deliveries(&self) -> Result<Vec<DeliveryRecord>, DbError> {
            Ok(vec![
                DeliveryRecord::new("A", "B", 4, false, dec!(0.1)),
                DeliveryRecord::new("A", "B", 0, true, dec!(0.2)),
                DeliveryRecord::new("B", "C", 1, false, dec!(0.3)),
            ])
        }

        async fn fetch_awards(&self) -> Result<Vec<MatchAwardRecord>, DbError> {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            let n = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
            Ok((0..n).map(|_| MatchAwardRecord::new("A")).collect())
        }

        fn describe(&self) -> String {
            "growing".to_string()
        }
    }

    async fn state() -> Arc<AppState> {
        let source: Arc<dyn DataSource> = Arc::new(GrowingSource::default());
        let store = DeliveryStore::load(source.as_ref()).await.unwrap();
        Arc::new(AppState::new(store, source))
    }

    fn compare_query(first: &str, second: &str) -> Query<handlers::CompareQuery> {
        Query(handlers::CompareQuery {
            first: PlayerId::from(first),
            second: PlayerId::from(second),
        })
    }

    #[tokio::test]
    async fn test_players_listing_and_role_filter() {
        let state = state().await;
        let all = handlers::get_players(State(state.clone()), Query(handlers::PlayersQuery { role: None })).await;
        assert_eq!(all.0, vec![PlayerId::from("A"), PlayerId::from("B"), PlayerId::from("C")]);

        let bowlers = handlers::get_players(
            State(state),
            Query(handlers::PlayersQuery { role: Some(Role::Bowler) }),
        )
        .await;
        assert_eq!(bowlers.0, vec![PlayerId::from("B"), PlayerId::from("C")]);
    }

    #[tokio::test]
    async fn test_compare_returns_metrics() {
        let state = state().await;
        let result = handlers::get_comparison(State(state), compare_query("A", "B"))
            .await
            .unwrap();
        assert_eq!(result.0.first.strike_rate, MetricValue::Defined(dec!(200)));
        assert!(!result.0.economy_rate_applicable);
    }

    #[tokio::test]
    async fn test_rejections_map_to_status_codes() {
        let state = state().await;

        let same = handlers::get_comparison(State(state.clone()), compare_query("A", "A"))
            .await
            .unwrap_err();
        assert!(matches!(same, AppError::Rejected(RejectionReason::SamePlayerSelected)));
        assert_eq!(same.into_response().status(), StatusCode::BAD_REQUEST);

        let unknown = handlers::get_comparison(State(state), compare_query("A", "Nobody"))
            .await
            .unwrap_err();
        assert_eq!(unknown.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reload_swaps_in_next_version() {
        let state = state().await;
        assert_eq!(handlers::get_dataset(State(state.clone())).await.0.version, 1);

        let info = handlers::reload_dataset(State(state.clone())).await.unwrap();
        assert_eq!(info.0.version, 2);
        assert_eq!(info.0.source, "growing");

        let result = handlers::get_comparison(State(state), compare_query("A", "B"))
            .await
            .unwrap();
        assert_eq!(result.0.first.award_count, 2);
    }

    #[tokio::test]
    async fn test_concurrent_reloads_each_get_a_new_version() {
        let state = state().await;

        let (first, second) = tokio::join!(
            handlers::reload_dataset(State(state.clone())),
            handlers::reload_dataset(State(state.clone())),
        );
        let mut versions = vec![first.unwrap().0.version, second.unwrap().0.version];
        versions.sort();
        assert_eq!(versions, vec![2, 3]);

        let current = handlers::get_dataset(State(state)).await;
        assert_eq!(current.0.version, 3);
    }
}
