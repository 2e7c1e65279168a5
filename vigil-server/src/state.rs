use vigil_database::Database;

/// Shared state handed to every API handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    /// Process-wide default call-out gateway, used when channel settings
    /// carry no `callOutUrl` of their own.
    pub call_out_url: Option<String>,
}
