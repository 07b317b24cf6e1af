//! Builds the HTTP adapters from config and hands them to the runtime.

use std::sync::Arc;

use anyhow::Context;
use hr_core::config::AppConfig;
use hr_core::ports::{EnrollmentStorePort, RosterPort};
use hr_infra::{ApiClient, HttpEnrollmentStore, HttpRosterClient};

use super::AppRuntime;
use crate::events::EventEmitter;

pub fn wire_runtime(
    config: AppConfig,
    emitter: Arc<dyn EventEmitter>,
) -> anyhow::Result<AppRuntime> {
    let client = ApiClient::new(&config.api).context("Failed to create API client")?;
    tracing::info!(base_url = %client.base_url(), "backend API configured");

    let store: Arc<dyn EnrollmentStorePort> = Arc::new(HttpEnrollmentStore::new(client.clone()));
    let roster: Arc<dyn RosterPort> = Arc::new(HttpRosterClient::new(client));

    Ok(AppRuntime::new(config, roster, store, emitter))
}
