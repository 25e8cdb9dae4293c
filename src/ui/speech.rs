use crate::Result;
use tokio::sync::mpsc::UnboundedSender;

pub const SPEECH_UNAVAILABLE: &str =
    "Speech recognition is not supported on this device. Type your design idea instead.";

/// Lifecycle and result notifications from a recognizer.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Started,
    Result(String),
    Error(String),
    Ended,
}

/// Host-provided speech-to-text engine.
///
/// One-shot: a started recognizer reports at most one final transcript and
/// then [`SpeechEvent::Ended`].
pub trait SpeechRecognizer: Send {
    fn start(&mut self, events: UnboundedSender<SpeechEvent>) -> Result<()>;
    fn stop(&mut self);
}

/// Dictation support, decided once when the session is created.
pub enum SpeechCapability {
    Available(Box<dyn SpeechRecognizer>),
    Unavailable,
}

impl SpeechCapability {
    pub fn available(recognizer: impl SpeechRecognizer + 'static) -> Self {
        SpeechCapability::Available(Box::new(recognizer))
    }
}

/// What pressing the microphone button did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceToggle {
    Started,
    Stopped,
    /// Nothing was captured; the message is for the user.
    Unavailable(&'static str),
}
