//! One play session: folders, pools, replicated settings and the scan loop.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mimic_core::{EPHEMERAL_CAPACITY, PoolKind, RegistrySnapshot, Roster, VoiceConfig};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::clip_store::ClipStore;
use crate::decode::AudioDecoder;
use crate::error::{EngineError, RegistryError, Result};
use crate::ingest::IngestionPipeline;
use crate::layout::DataLayout;
use crate::playback::PlaybackDirector;
use crate::registry::{Propagation, RegistryMirror, ReplicatedStateRegistry, SessionRole};
use crate::selector::SampleSelector;

pub struct Session {
    config: VoiceConfig,
    layout: DataLayout,
    store: ClipStore,
    registry: ReplicatedStateRegistry,
    propagation: std::result::Result<Propagation, RegistryError>,
    selector: Arc<SampleSelector>,
    cancel: CancellationToken,
    scan_task: Option<JoinHandle<()>>,
}

impl Session {
    /// Start a session.
    ///
    /// Refuses to start when the configured frequency disables playback.
    /// Registry failures are logged and leave the affected actors silent;
    /// they do not stop the session.
    pub async fn establish(
        config: VoiceConfig,
        roster: &Roster,
        layout: DataLayout,
        role: &dyn SessionRole,
        decoder: Arc<dyn AudioDecoder>,
    ) -> Result<Self> {
        if config.playback_disabled() {
            tracing::warn!(
                "voice-line frequency is {}, voice lines are disabled",
                config.voice.frequency
            );
            return Err(EngineError::PlaybackDisabled(config.voice.frequency));
        }

        layout.prepare(&config)?;

        let store = ClipStore::new(EPHEMERAL_CAPACITY);
        let registry = ReplicatedStateRegistry::new(roster);
        let propagation = registry.propagate(role, &RegistrySnapshot::from_config(&config, roster));

        let selector = Arc::new(SampleSelector::from_config(store.clone(), &config));
        let cancel = CancellationToken::new();
        let pipeline = Arc::new(IngestionPipeline::with_cancellation(
            store.clone(),
            decoder,
            cancel.clone(),
        ));

        if config.custom_sounds_enabled() {
            match pipeline
                .scan_and_ingest(&layout.custom_sounds, PoolKind::Durable, false)
                .await
            {
                Ok(report) => tracing::info!(clips = report.accepted, "custom sounds loaded"),
                Err(e) => tracing::warn!("failed to load custom sounds: {e}"),
            }
        }

        let scan_task = config.recording_enabled().then(|| {
            tokio::spawn(scan_loop(
                pipeline,
                layout.recordings.clone(),
                config.scan_interval(),
                cancel.clone(),
            ))
        });

        tracing::info!(
            root = %layout.root.display(),
            recording = config.recording_enabled(),
            custom_sounds = config.custom_sounds_enabled(),
            "session established"
        );

        Ok(Self {
            config,
            layout,
            store,
            registry,
            propagation,
            selector,
            cancel,
            scan_task,
        })
    }

    pub fn config(&self) -> &VoiceConfig {
        &self.config
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    pub fn store(&self) -> &ClipStore {
        &self.store
    }

    pub fn selector(&self) -> Arc<SampleSelector> {
        Arc::clone(&self.selector)
    }

    pub fn mirror(&self) -> RegistryMirror {
        self.registry.mirror()
    }

    /// Outcome of the host write made at establishment.
    pub fn propagation(&self) -> std::result::Result<&Propagation, &RegistryError> {
        self.propagation.as_ref()
    }

    pub fn director(&self) -> PlaybackDirector {
        PlaybackDirector::new(self.mirror(), self.selector())
    }

    pub fn is_scanning(&self) -> bool {
        self.scan_task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the scan loop, drop every clip and remove this session's
    /// recordings unless they are kept.
    pub async fn teardown(mut self) -> Result<()> {
        self.cancel.cancel();
        if let Some(task) = self.scan_task.take()
            && let Err(e) = task.await
        {
            tracing::warn!("scan loop ended abnormally: {e}");
        }
        self.store.clear_all();
        self.layout
            .cleanup(self.config.capture.keep_files_between_sessions)?;
        tracing::info!("session torn down");
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn scan_loop(
    pipeline: Arc<IngestionPipeline>,
    dir: PathBuf,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::debug!(?period, "recordings scan loop started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) = pipeline.scan_and_ingest(&dir, PoolKind::Ephemeral, true).await {
                    tracing::warn!("recordings scan failed: {e}");
                }
            }
        }
    }

    tracing::debug!("recordings scan loop stopped");
}
