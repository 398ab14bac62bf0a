// Adapters - External system implementations

pub mod json_history;
pub mod probe_ffprobe;
pub mod remote_http;
pub mod toml_config;

// Re-export adapters
pub use json_history::JsonHistoryAdapter;
pub use probe_ffprobe::FFprobeAdapter;
pub use remote_http::{DisabledConfirmAdapter, HttpConfirmAdapter, RemoteEndpoint};
pub use toml_config::TomlConfigAdapter;
