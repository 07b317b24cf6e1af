/// Centralized error mapping for commands.
pub fn map_err(err: anyhow::Error) -> String {
    err.to_string()
}
