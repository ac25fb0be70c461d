//! Reusable court booking server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: storage selection, migrations,
//! event wiring, the REST API and graceful shutdown. The CLI binary is a
//! thin wrapper around it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::booking::{BookingApplicationService, SharedBookingUseCase};
use crate::application::events::{create_event_bus, SharedEventBus};
use crate::config::{AppConfig, EventPublisherKind, StorageBackend};
use crate::domain::booking::{BookingRepository, OverlappingReservationsPolicy};
use crate::domain::ports::BookingEventPublisher;
use crate::domain::services::BookingDomainService;
use crate::infrastructure::database::{init_database, run_migrations};
use crate::infrastructure::events::{EventBusPublisher, LoggingEventPublisher};
use crate::infrastructure::storage::InMemoryBookingRepository;
use crate::infrastructure::SeaOrmBookingRepository;
use crate::interfaces::http::{create_api_router, ApiState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running court booking server.
///
/// ```rust,no_run
/// use court_booking::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Shared event bus for real-time notifications.
    pub event_bus: SharedEventBus,
    /// Booking use cases, for embedding callers.
    pub bookings: SharedBookingUseCase,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub api_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the server.
    ///
    /// Installs the Prometheus recorder, opens storage (running migrations
    /// when enabled), wires the booking service to its publisher and starts
    /// the REST API.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting court booking service...");

        let prometheus = prometheus_handle()?;

        // ── Storage ────────────────────────────────────────────
        let (repository, db): (Arc<dyn BookingRepository>, Option<DatabaseConnection>) =
            match app_cfg.storage.backend {
                StorageBackend::Database => {
                    let db = init_database(&app_cfg.database_config()).await?;
                    if opts.auto_migrate {
                        info!("Running database migrations...");
                        run_migrations(&db).await?;
                    }
                    let repository: Arc<dyn BookingRepository> =
                        Arc::new(SeaOrmBookingRepository::new(db.clone()));
                    (repository, Some(db))
                }
                StorageBackend::Memory => {
                    warn!("Using in-memory storage: bookings are lost on restart");
                    let repository: Arc<dyn BookingRepository> =
                        Arc::new(InMemoryBookingRepository::new());
                    (repository, None)
                }
            };

        // ── Events ─────────────────────────────────────────────
        let event_bus = create_event_bus(app_cfg.events.bus_capacity);
        let publisher: Arc<dyn BookingEventPublisher> = match app_cfg.events.publisher {
            EventPublisherKind::Bus => Arc::new(EventBusPublisher::new(event_bus.clone())),
            EventPublisherKind::Log => Arc::new(LoggingEventPublisher::new()),
        };
        info!("🔔 Booking events published via {:?}", app_cfg.events.publisher);

        // ── Services ───────────────────────────────────────────
        let opening_hours = app_cfg.opening_hours_policy()?;
        info!(
            "Court open {} - {}",
            opening_hours.opening_time(),
            opening_hours.closing_time()
        );
        let domain_service =
            BookingDomainService::new(opening_hours, OverlappingReservationsPolicy::new());
        let bookings: SharedBookingUseCase = Arc::new(BookingApplicationService::new(
            repository,
            publisher,
            domain_service,
        ));

        // ── REST API ───────────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();

        let router = create_api_router(ApiState {
            bookings: bookings.clone(),
            event_bus: event_bus.clone(),
            db: db.clone(),
            prometheus,
            started_at: Arc::new(Instant::now()),
        });

        let bind_addr = format!("{}:{}", app_cfg.server.api_host, app_cfg.server.api_port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
        let api_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_server = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            event_bus,
            bookings,
            config: app_cfg,
            api_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting for it.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// Gives in-flight requests up to `server.shutdown_timeout` seconds.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        let timeout = Duration::from_secs(self.shutdown.timeout_secs());
        match tokio::time::timeout(timeout, self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!(
                "REST API server did not stop within {}s, abandoning in-flight requests",
                timeout.as_secs()
            ),
        }

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("✅ Database connection closed");
            }
        }

        info!("👋 Court booking service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global recorder can only be installed once per process, so a
/// restarted server reuses the first handle.
fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("📊 Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Initialize tracing (logging) from the application config.
///
/// Call once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
