//! Tests for the speech worker: ordering, failures and timeouts

use async_trait::async_trait;
use letterjourney_spk::{SpeechConfig, SpeechEngine, SpeechError, TtsBackend, TtsEngine, Utterance};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Default)]
struct RecordingEngine {
    spoken: Mutex<Vec<String>>,
}

#[async_trait]
impl TtsEngine for RecordingEngine {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        self.spoken.lock().push(text.to_string());
        Ok(())
    }

    fn backend(&self) -> TtsBackend {
        TtsBackend::EspeakNg
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Fails on "boom", hangs on "hang", records everything else
#[derive(Default)]
struct FlakyEngine {
    spoken: Mutex<Vec<String>>,
}

#[async_trait]
impl TtsEngine for FlakyEngine {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        match text {
            "boom" => Err(SpeechError::Engine("exit status 1".to_string())),
            "hang" => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            }
            _ => {
                self.spoken.lock().push(text.to_string());
                Ok(())
            }
        }
    }

    fn backend(&self) -> TtsBackend {
        TtsBackend::Piper
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

fn test_config() -> SpeechConfig {
    SpeechConfig {
        speak_timeout_ms: 100,
        ..SpeechConfig::default()
    }
}

#[tokio::test]
async fn test_speaks_in_request_order() {
    let recorder = Arc::new(RecordingEngine::default());
    let engine = SpeechEngine::with_engine(test_config(), Some(recorder.clone()));
    assert_eq!(engine.backend(), TtsBackend::EspeakNg);

    engine.speak("S. ess. sss.");
    engine.say(Utterance::after("Correct!", Duration::from_millis(10)));
    engine.speak("SOL");
    engine.flush(Duration::from_secs(5)).await;

    assert_eq!(*recorder.spoken.lock(), vec!["S. ess. sss.", "Correct!", "SOL"]);
}

#[tokio::test]
async fn test_say_does_not_wait_for_playback() {
    let flaky = Arc::new(FlakyEngine::default());
    let engine = SpeechEngine::with_engine(test_config(), Some(flaky));

    let started = Instant::now();
    engine.speak("hang");
    engine.speak("hang");
    assert!(started.elapsed() < Duration::from_millis(50));
    engine.flush(Duration::from_secs(5)).await;
}

#[tokio::test]
async fn test_failures_and_timeouts_are_swallowed() {
    let flaky = Arc::new(FlakyEngine::default());
    let engine = SpeechEngine::with_engine(test_config(), Some(flaky.clone()));

    engine.speak("boom");
    engine.speak("hang");
    engine.speak("after");
    engine.flush(Duration::from_secs(5)).await;

    assert_eq!(*flaky.spoken.lock(), vec!["after"]);
}

#[tokio::test]
async fn test_no_backend_is_a_no_op() {
    let engine = SpeechEngine::with_engine(test_config(), None);
    assert!(engine.is_silent());
    engine.speak("anything");
    engine.flush(Duration::from_secs(1)).await;
}

#[tokio::test]
async fn test_full_queue_drops_instead_of_blocking() {
    let flaky = Arc::new(FlakyEngine::default());
    let config = SpeechConfig {
        queue_size: 1,
        speak_timeout_ms: 50,
        ..SpeechConfig::default()
    };
    let engine = SpeechEngine::with_engine(config, Some(flaky));

    let started = Instant::now();
    for _ in 0..20 {
        engine.speak("hang");
    }
    assert!(started.elapsed() < Duration::from_millis(50));
    engine.flush(Duration::from_secs(5)).await;
}

#[test]
fn test_silent_engine_needs_no_runtime() {
    let engine = SpeechEngine::silent();
    assert_eq!(engine.backend(), TtsBackend::None);
    engine.speak("quiet");
}

#[tokio::test]
async fn test_disabled_config_never_probes() {
    let config = SpeechConfig {
        enabled: false,
        ..SpeechConfig::default()
    };
    let engine = SpeechEngine::start(config).await.unwrap();
    assert!(engine.is_silent());
    assert_eq!(engine.redetect().await, TtsBackend::None);
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let config = SpeechConfig {
        queue_size: 0,
        ..SpeechConfig::default()
    };
    assert!(matches!(SpeechEngine::start(config).await, Err(SpeechError::Config(_))));
}
