//! Where speech requests go

pub use letterjourney_spk::Utterance;
use letterjourney_spk::SpeechEngine;

/// Accepts speech requests without waiting for them to play
#[cfg_attr(test, mockall::automock)]
pub trait Speaker {
    fn say(&self, utterance: Utterance);
}

impl Speaker for SpeechEngine {
    fn say(&self, utterance: Utterance) {
        SpeechEngine::say(self, utterance);
    }
}

impl<T: Speaker + ?Sized> Speaker for &T {
    fn say(&self, utterance: Utterance) {
        (**self).say(utterance);
    }
}

impl<T: Speaker + ?Sized> Speaker for std::sync::Arc<T> {
    fn say(&self, utterance: Utterance) {
        (**self).say(utterance);
    }
}
