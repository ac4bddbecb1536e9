//! Backend resolution and fire-and-forget playback
//!
//! `SpeechEngine` resolves a backend once at startup and keeps it for the
//! process lifetime (until `redetect`). `say` never blocks: utterances go on a
//! bounded queue served by one background worker, so phrases play one after
//! another in roughly the order requested.

use crate::cache::AudioCache;
use crate::config::{SpeechConfig, TtsBackend};
use crate::engines::espeak::EspeakTtsEngine;
use crate::engines::piper::PiperTtsEngine;
use crate::engines::{probe, TtsEngine};
use crate::error::SpeechError;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// One speech request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    /// Pause before speaking, letting the screen settle first
    pub delay: Duration,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn after(text: impl Into<String>, delay: Duration) -> Self {
        Self {
            text: text.into(),
            delay,
        }
    }
}

type ActiveEngine = Arc<RwLock<Option<Arc<dyn TtsEngine>>>>;

pub struct SpeechEngine {
    config: Arc<SpeechConfig>,
    active: ActiveEngine,
    sender: Option<mpsc::Sender<Utterance>>,
    worker: Option<JoinHandle<()>>,
}

/// Probe the backends in priority order and report the first one present.
///
/// Never fails: with nothing installed the answer is `TtsBackend::None`.
pub async fn detect(config: &SpeechConfig) -> TtsBackend {
    resolve(config)
        .await
        .map(|engine| engine.backend())
        .unwrap_or(TtsBackend::None)
}

async fn resolve(config: &SpeechConfig) -> Option<Arc<dyn TtsEngine>> {
    let timeout = Duration::from_millis(config.probe_timeout_ms);

    for backend in TtsBackend::PRIORITY {
        match backend {
            TtsBackend::Piper => {
                if !probe(&config.piper.command, timeout).await {
                    continue;
                }
                let model_path = config.piper.resolved_model_path();
                if !model_path.exists() {
                    warn!("Piper found but voice model {:?} is missing", model_path);
                    continue;
                }
                let cache = config
                    .enable_cache
                    .then(|| AudioCache::new(config.max_cache_entries));
                return Some(Arc::new(PiperTtsEngine::new(&config.piper, cache)));
            }
            TtsBackend::EspeakNg => {
                if probe(&config.espeak.command, timeout).await {
                    return Some(Arc::new(EspeakTtsEngine::new(&config.espeak)));
                }
            }
            TtsBackend::None => {}
        }
    }

    None
}

impl SpeechEngine {
    /// Resolve a backend and start the speech worker.
    ///
    /// Must be called from within a tokio runtime. Only an invalid config is an
    /// error; finding no backend yields a working, silent engine.
    pub async fn start(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Config)?;

        let engine = if config.enabled {
            resolve(&config).await
        } else {
            info!("Speech disabled in config");
            None
        };

        match &engine {
            Some(engine) => info!("Speech backend: {}", engine.name()),
            None if config.enabled => info!("No speech backend found, continuing without audio"),
            None => {}
        }

        Ok(Self::with_engine(config, engine))
    }

    /// Start the worker around an already-resolved engine.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_engine(config: SpeechConfig, engine: Option<Arc<dyn TtsEngine>>) -> Self {
        let active: ActiveEngine = Arc::new(RwLock::new(engine));
        let (sender, receiver) = mpsc::channel(config.queue_size.max(1));
        let speak_timeout = Duration::from_millis(config.speak_timeout_ms);
        let worker = tokio::spawn(run_worker(receiver, active.clone(), speak_timeout));

        Self {
            config: Arc::new(config),
            active,
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// An engine that never speaks and needs no runtime
    pub fn silent() -> Self {
        Self {
            config: Arc::new(SpeechConfig {
                enabled: false,
                ..SpeechConfig::default()
            }),
            active: Arc::new(RwLock::new(None)),
            sender: None,
            worker: None,
        }
    }

    pub fn backend(&self) -> TtsBackend {
        self.active
            .read()
            .as_ref()
            .map(|engine| engine.backend())
            .unwrap_or(TtsBackend::None)
    }

    pub fn is_silent(&self) -> bool {
        self.backend() == TtsBackend::None
    }

    /// Speak `text` as soon as the worker is free
    pub fn speak(&self, text: impl Into<String>) {
        self.say(Utterance::new(text));
    }

    /// Queue an utterance. Returns immediately; failures are logged, never raised.
    pub fn say(&self, utterance: Utterance) {
        if utterance.text.trim().is_empty() || self.is_silent() {
            return;
        }

        let Some(sender) = &self.sender else {
            return;
        };

        match sender.try_send(utterance) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                debug!("Speech queue full, dropping {:?}", dropped.text);
            }
            Err(TrySendError::Closed(dropped)) => {
                debug!("Speech worker gone, dropping {:?}", dropped.text);
            }
        }
    }

    /// Probe again, e.g. after the user installed a voice. Only `enabled`
    /// engines look for a backend.
    pub async fn redetect(&self) -> TtsBackend {
        let engine = if self.config.enabled {
            resolve(&self.config).await
        } else {
            None
        };
        let backend = engine
            .as_ref()
            .map(|engine| engine.backend())
            .unwrap_or(TtsBackend::None);
        *self.active.write() = engine;
        info!("Speech backend re-detected: {}", backend);
        backend
    }

    /// Stop accepting speech and wait up to `timeout` for queued speech to finish
    pub async fn flush(mut self, timeout: Duration) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if tokio::time::timeout(timeout, worker).await.is_err() {
                debug!("Speech still playing at shutdown, abandoning it");
            }
        }
    }
}

async fn run_worker(
    mut receiver: mpsc::Receiver<Utterance>,
    active: ActiveEngine,
    speak_timeout: Duration,
) {
    while let Some(utterance) = receiver.recv().await {
        if !utterance.delay.is_zero() {
            tokio::time::sleep(utterance.delay).await;
        }

        let engine = { active.read().clone() };
        let Some(engine) = engine else {
            continue;
        };

        let result = match tokio::time::timeout(speak_timeout, engine.speak(&utterance.text)).await {
            Ok(result) => result,
            Err(_) => Err(SpeechError::Timeout(speak_timeout)),
        };

        match result {
            Ok(()) => debug!("Spoke {:?} via {}", utterance.text, engine.name()),
            Err(e) => warn!("{} could not speak {:?}: {}", engine.name(), utterance.text, e),
        }
    }
    debug!("Speech worker stopped");
}
