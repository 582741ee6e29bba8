// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `courier serve`: wires stores, adapters and the gateway together.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use courier_agent::shutdown::install_signal_handler;
use courier_agent::{ConversationResolver, Relay, RunOrchestrator, SpeechOutput, TurnSettings};
use courier_config::CourierConfig;
use courier_config::model::StorageBackend;
use courier_core::CourierError;
use courier_core::traits::{AssistantAdapter, ChannelAdapter, FingerprintStore, ThreadStore};
use courier_dedup::{FingerprintGuard, MemoryFingerprintStore};
use courier_gateway::{GatewayState, ServerConfig, start_server};
use courier_openai::{OpenAiAssistant, OpenAiSpeech};
use courier_storage::{Database, MemoryThreadStore, SqliteFingerprintStore, SqliteThreadStore};
use courier_tools::ToolDispatcher;
use courier_whatsapp::WhatsAppChannel;
use tracing::{info, warn};

/// Thread and fingerprint stores selected by configuration.
pub(crate) struct Stores {
    pub threads: Arc<dyn ThreadStore>,
    pub fingerprints: Arc<dyn FingerprintStore>,
    pub database: Option<Database>,
}

pub(crate) async fn build_stores(config: &CourierConfig) -> Result<Stores, CourierError> {
    let needs_db = config.storage.backend == StorageBackend::Sqlite || config.dedup.persist;
    let database = if needs_db {
        Some(Database::open(&config.storage.database_path).await?)
    } else {
        None
    };

    let threads: Arc<dyn ThreadStore> = match (&database, config.storage.backend) {
        (Some(db), StorageBackend::Sqlite) => Arc::new(SqliteThreadStore::new(db.clone())),
        _ => Arc::new(MemoryThreadStore::new()),
    };

    let fingerprints: Arc<dyn FingerprintStore> = match &database {
        Some(db) if config.dedup.persist => Arc::new(SqliteFingerprintStore::new(db.clone())),
        _ => match config.dedup.max_entries {
            Some(capacity) => Arc::new(MemoryFingerprintStore::bounded(capacity)),
            None => Arc::new(MemoryFingerprintStore::new()),
        },
    };

    Ok(Stores {
        threads,
        fingerprints,
        database,
    })
}

pub async fn run_serve(config: CourierConfig) -> Result<(), CourierError> {
    init_tracing(&config.agent.log_level);
    info!(name = %config.agent.name, "starting courier serve");

    let stores = build_stores(&config).await?;
    info!(
        backend = ?config.storage.backend,
        persist_fingerprints = config.dedup.persist,
        "stores ready"
    );

    let assistant: Arc<dyn AssistantAdapter> = Arc::new(OpenAiAssistant::new(&config)?);
    let channel: Arc<dyn ChannelAdapter> = Arc::new(WhatsAppChannel::new(&config)?);

    let resolver = Arc::new(ConversationResolver::new(
        stores.threads.clone(),
        assistant.clone(),
        config.run.reuse_thread,
    ));
    let orchestrator = Arc::new(RunOrchestrator::new(
        resolver,
        assistant,
        ToolDispatcher::new(),
        TurnSettings::from_config(&config)?,
    ));

    let mut relay = Relay::new(
        orchestrator,
        channel.clone(),
        config.run.fallback_reply.clone(),
    );
    if config.speech.enabled {
        let speech = Arc::new(OpenAiSpeech::new(&config)?);
        relay = relay.with_speech(SpeechOutput::new(speech, &config.speech.output_path));
        info!(path = %config.speech.output_path, "speech synthesis enabled");
    }

    let state = GatewayState {
        guard: FingerprintGuard::new(stores.fingerprints.clone()),
        handler: Arc::new(relay),
        channel,
        app_secret: config.whatsapp.app_secret.clone(),
        verify_token: config.whatsapp.verify_token.clone(),
        recipient_waid: config.whatsapp.recipient_waid.clone(),
        company_info: config.company.info.clone(),
        audio_path: PathBuf::from(&config.speech.output_path),
        start_time: Instant::now(),
    };
    if state.app_secret.is_none() {
        warn!("whatsapp.app_secret is not set, webhook signatures are not verified");
    }

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    let shutdown = install_signal_handler();
    start_server(&server_config, state, shutdown).await?;

    if let Some(db) = &stores.database
        && let Err(e) = db.checkpoint().await
    {
        warn!(error = %e, "WAL checkpoint on shutdown failed");
    }
    info!("courier stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("courier={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::types::{ConversationKey, Fingerprint, ThreadId};

    #[tokio::test]
    async fn memory_backend_opens_no_database() {
        let mut config = CourierConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.dedup.max_entries = Some(2);

        let stores = build_stores(&config).await.unwrap();
        assert!(stores.database.is_none());

        for fp in ["a", "b", "c"] {
            assert!(stores.fingerprints.insert(&Fingerprint(fp.into())).await.unwrap());
        }
        assert!(!stores.fingerprints.contains(&Fingerprint("a".into())).await.unwrap());
    }

    #[tokio::test]
    async fn sqlite_backend_persists_threads_and_fingerprints() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CourierConfig::default();
        config.storage.database_path = dir.path().join("courier.db").display().to_string();
        config.dedup.persist = true;

        let key = ConversationKey("77011234567".into());
        {
            let stores = build_stores(&config).await.unwrap();
            assert!(stores.database.is_some());
            stores.threads.put(&key, &ThreadId("thread_1".into())).await.unwrap();
            stores.fingerprints.insert(&Fingerprint("fp".into())).await.unwrap();
        }

        let stores = build_stores(&config).await.unwrap();
        assert_eq!(
            stores.threads.get(&key).await.unwrap(),
            Some(ThreadId("thread_1".into()))
        );
        assert!(!stores.fingerprints.insert(&Fingerprint("fp".into())).await.unwrap());
    }
}
