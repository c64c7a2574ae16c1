use crate::{
    api::{self, ServiceState},
    proxy::BackendConfig,
};
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub backend_url: Option<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the HTTP client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let backend = BackendConfig::new(args.backend_url);

    debug!("Backend: {:?}", backend.base_url());

    let state = ServiceState::new(backend)?;

    api::new(args.port, state).await
}
