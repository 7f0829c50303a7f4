pub mod app;
pub mod config;
pub mod container;
pub mod dashboard;
pub mod error;
pub mod login;
pub mod render;
pub mod session;
pub mod startup;

pub use app::AppState;
pub use config::AppConfig;
pub use container::{APP_TITLE, ActiveView, SessionContainer, SessionState};
pub use dashboard::{DashboardError, DashboardState, DashboardView, MountHandle};
pub use error::{AppError, Result};
pub use login::LoginView;
pub use render::{render_dashboard, render_summary};
pub use session::{
    DbSessionStore, MemorySessionStore, SessionEvent, SessionEvents, SessionStore, SharedStore,
    end_session,
};
pub use startup::{AppPaths, ensure_app_data_dir};
