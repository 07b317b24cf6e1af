pub mod config;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::{
    apply_env_overrides, load_config, load_or_empty, resolve_config_path, resolve_log_dir,
};
pub use runtime::{AppRuntime, UseCases};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::wire_runtime;
