pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::HabitStore;
