use crate::{
    api::{self, AppState},
    auth::JsonFileUserStore,
};
use anyhow::Result;
use std::{path::PathBuf, sync::Arc};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub store: PathBuf,
    pub port: u16,
    pub frontend_base_url: String,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let state = Arc::new(AppState::new(JsonFileUserStore::new(args.store)));

    api::serve(args.port, &args.frontend_base_url, state).await
}
