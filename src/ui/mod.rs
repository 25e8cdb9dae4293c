//! Studio client
//!
//! Session state for the design studio: prompt, use case and concept count
//! go in, a gallery of cards or an error banner comes out. Generation goes
//! through [`GatewayClient`]; dictation goes through a [`SpeechCapability`]
//! chosen once when the session starts.

pub mod client;
pub mod mock;
pub mod session;
pub mod speech;

pub use client::{GatewayClient, DEFAULT_GATEWAY_URL};
pub use mock::MockSpeechRecognizer;
pub use session::{Card, StudioSession, View, MAX_COUNT, MIN_COUNT};
pub use speech::{
    SpeechCapability, SpeechEvent, SpeechRecognizer, VoiceToggle, SPEECH_UNAVAILABLE,
};
