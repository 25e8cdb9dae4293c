use super::client::GatewayClient;
use super::speech::{SpeechCapability, SpeechEvent, VoiceToggle, SPEECH_UNAVAILABLE};
use crate::models::{GenerationRequest, UseCase, DEFAULT_SAMPLE_COUNT};
use crate::Result;
use std::fmt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, warn};

pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 5;

/// Characters of a data URI shown before eliding the payload.
const PREVIEW_LEN: usize = 48;

/// One rendered concept.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub image: String,
}

/// What the studio shows below the form.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Generating,
    Failed(String),
    Gallery(Vec<Card>),
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Generating => write!(f, "Generating..."),
            View::Failed(message) => write!(f, "{}", message),
            View::Gallery(cards) if cards.is_empty() => write!(f, "No concepts yet."),
            View::Gallery(cards) => {
                for (idx, card) in cards.iter().enumerate() {
                    if idx > 0 {
                        writeln!(f)?;
                    }
                    let preview: String = card.image.chars().take(PREVIEW_LEN).collect();
                    write!(
                        f,
                        "{}: {}... ({} bytes)",
                        card.title,
                        preview,
                        card.image.len()
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Per-user studio state. Nothing here outlives the session.
pub struct StudioSession {
    prompt: String,
    use_case: UseCase,
    count: u32,
    loading: bool,
    error: Option<String>,
    images: Vec<String>,
    listening: bool,
    speech: SpeechCapability,
    speech_tx: UnboundedSender<SpeechEvent>,
    speech_rx: UnboundedReceiver<SpeechEvent>,
}

impl StudioSession {
    pub fn new(speech: SpeechCapability) -> Self {
        let (speech_tx, speech_rx) = mpsc::unbounded_channel();
        Self {
            prompt: String::new(),
            use_case: UseCase::default(),
            count: DEFAULT_SAMPLE_COUNT,
            loading: false,
            error: None,
            images: Vec::new(),
            listening: false,
            speech,
            speech_tx,
            speech_rx,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn use_case(&self) -> UseCase {
        self.use_case
    }

    pub fn set_use_case(&mut self, use_case: UseCase) {
        self.use_case = use_case;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Clamped to `MIN_COUNT..=MAX_COUNT`.
    pub fn set_count(&mut self, count: u32) {
        self.count = count.clamp(MIN_COUNT, MAX_COUNT);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn generate_label(&self) -> String {
        if self.loading {
            "Generating...".to_string()
        } else {
            format!("Generate {} Concepts", self.count)
        }
    }

    /// Mark a generation as in flight and snapshot the form.
    ///
    /// Calls are not de-duplicated; whichever generation finishes last
    /// decides what is displayed.
    pub fn begin_generation(&mut self) -> GenerationRequest {
        self.loading = true;
        self.error = None;
        self.images.clear();
        GenerationRequest::new(self.prompt.clone(), self.use_case, self.count)
    }

    pub fn finish_generation(&mut self, result: Result<Vec<String>>) {
        match result {
            Ok(images) => {
                debug!("Received {} image(s)", images.len());
                self.error = None;
                self.images = images;
            }
            Err(e) => {
                error!("Generation failed: {}", e);
                self.images.clear();
                self.error = Some(format!("Error: {}", e));
            }
        }
        self.loading = false;
    }

    /// Run one full generation round trip against `client`.
    pub async fn generate(&mut self, client: &GatewayClient) {
        let request = self.begin_generation();
        let result = client.generate(&request).await;
        self.finish_generation(result);
    }

    /// Microphone button: stop when listening, otherwise start capture.
    pub fn toggle_voice(&mut self) -> Result<VoiceToggle> {
        match &mut self.speech {
            SpeechCapability::Unavailable => Ok(VoiceToggle::Unavailable(SPEECH_UNAVAILABLE)),
            SpeechCapability::Available(recognizer) => {
                if self.listening {
                    recognizer.stop();
                    Ok(VoiceToggle::Stopped)
                } else {
                    recognizer.start(self.speech_tx.clone())?;
                    Ok(VoiceToggle::Started)
                }
            }
        }
    }

    /// Apply one recognizer event. Transcripts are appended to the prompt;
    /// errors only reset the listening flag.
    pub fn handle_speech_event(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Started => self.listening = true,
            SpeechEvent::Ended => self.listening = false,
            SpeechEvent::Result(transcript) => {
                self.prompt = format!("{} {}", self.prompt, transcript);
            }
            SpeechEvent::Error(e) => {
                warn!("Speech error: {}", e);
                self.listening = false;
            }
        }
    }

    /// Apply every event already delivered by the recognizer.
    pub fn process_speech_events(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.speech_rx.try_recv() {
            self.handle_speech_event(event);
            processed += 1;
        }
        processed
    }

    /// Wait for the next recognizer event and apply it.
    pub async fn next_speech_event(&mut self) -> Option<SpeechEvent> {
        let event = self.speech_rx.recv().await?;
        self.handle_speech_event(event.clone());
        Some(event)
    }

    pub fn view(&self) -> View {
        if let Some(error) = &self.error {
            return View::Failed(error.clone());
        }
        if self.loading {
            return View::Generating;
        }
        View::Gallery(
            self.images
                .iter()
                .enumerate()
                .map(|(idx, image)| Card {
                    title: format!("Concept {}", idx + 1),
                    image: image.clone(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockSpeechRecognizer;
    use crate::Error;
    use pretty_assertions::assert_eq;

    fn session() -> StudioSession {
        StudioSession::new(SpeechCapability::Unavailable)
    }

    #[test]
    fn test_defaults() {
        let session = session();
        assert_eq!(session.prompt(), "");
        assert_eq!(session.use_case(), UseCase::Interior);
        assert_eq!(session.count(), 3);
        assert!(!session.is_loading());
        assert_eq!(session.view(), View::Gallery(vec![]));
        assert_eq!(session.generate_label(), "Generate 3 Concepts");
    }

    #[test]
    fn test_count_is_clamped() {
        let mut session = session();
        session.set_count(0);
        assert_eq!(session.count(), 1);
        session.set_count(9);
        assert_eq!(session.count(), 5);
        session.set_count(4);
        assert_eq!(session.count(), 4);
    }

    #[test]
    fn test_begin_generation_snapshots_form() {
        let mut session = session();
        session.set_prompt("a red chair");
        session.set_use_case(UseCase::Architecture);
        session.set_count(2);
        session.finish_generation(Err(Error::Gateway("old".to_string())));

        let request = session.begin_generation();

        assert_eq!(request.prompt.as_deref(), Some("a red chair"));
        assert_eq!(request.use_case.as_deref(), Some("architecture"));
        assert_eq!(request.sample_count(), 2);
        assert!(session.is_loading());
        assert!(session.error().is_none());
        assert_eq!(session.view(), View::Generating);
        assert_eq!(session.generate_label(), "Generating...");
    }

    #[test]
    fn test_success_renders_cards_in_order() {
        let mut session = session();
        session.begin_generation();
        session.finish_generation(Ok(vec!["data:a".to_string(), "data:b".to_string()]));

        assert!(!session.is_loading());
        assert_eq!(
            session.view(),
            View::Gallery(vec![
                Card {
                    title: "Concept 1".to_string(),
                    image: "data:a".to_string()
                },
                Card {
                    title: "Concept 2".to_string(),
                    image: "data:b".to_string()
                },
            ])
        );
    }

    #[test]
    fn test_failure_shows_banner_instead_of_cards() {
        let mut session = session();
        session.finish_generation(Ok(vec!["data:a".to_string()]));

        session.begin_generation();
        session.finish_generation(Err(Error::Gateway("rate limited".to_string())));

        assert_eq!(session.view(), View::Failed("Error: rate limited".to_string()));
        assert!(session.images().is_empty());
    }

    #[test]
    fn test_last_finished_generation_wins() {
        let mut session = session();
        session.begin_generation();
        session.begin_generation();

        session.finish_generation(Ok(vec!["data:second".to_string()]));
        session.finish_generation(Ok(vec!["data:first".to_string()]));

        assert_eq!(session.images(), ["data:first".to_string()]);
    }

    #[test]
    fn test_success_after_overlapping_failure_clears_banner() {
        let mut session = session();
        session.begin_generation();
        session.begin_generation();

        session.finish_generation(Err(Error::Gateway("rate limited".to_string())));
        session.finish_generation(Ok(vec!["data:ok".to_string()]));

        assert!(session.error().is_none());
        assert_eq!(
            session.view(),
            View::Gallery(vec![Card {
                title: "Concept 1".to_string(),
                image: "data:ok".to_string()
            }])
        );
    }

    #[test]
    fn test_failure_after_overlapping_success_clears_cards() {
        let mut session = session();
        session.begin_generation();
        session.begin_generation();

        session.finish_generation(Ok(vec!["data:ok".to_string()]));
        session.finish_generation(Err(Error::Gateway("rate limited".to_string())));

        assert!(session.images().is_empty());
        assert_eq!(session.view(), View::Failed("Error: rate limited".to_string()));
    }

    #[test]
    fn test_unavailable_speech_informs_user() {
        let mut session = session();
        session.set_prompt("a lamp");

        let toggle = session.toggle_voice().unwrap();

        assert_eq!(toggle, VoiceToggle::Unavailable(SPEECH_UNAVAILABLE));
        assert!(!session.is_listening());
        assert_eq!(session.process_speech_events(), 0);
        assert_eq!(session.prompt(), "a lamp");
    }

    #[test]
    fn test_transcript_is_appended() {
        let recognizer = MockSpeechRecognizer::new().with_transcript("with brass legs");
        let starts = recognizer.start_counter();
        let mut session = StudioSession::new(SpeechCapability::available(recognizer));
        session.set_prompt("a walnut table");

        assert_eq!(session.toggle_voice().unwrap(), VoiceToggle::Started);
        assert_eq!(session.process_speech_events(), 3);

        assert_eq!(session.prompt(), "a walnut table with brass legs");
        assert!(!session.is_listening());
        assert_eq!(*starts.lock().unwrap(), 1);
    }

    #[test]
    fn test_toggle_while_listening_stops() {
        let recognizer = MockSpeechRecognizer::new();
        let stops = recognizer.stop_counter();
        let mut session = StudioSession::new(SpeechCapability::available(recognizer));

        session.toggle_voice().unwrap();
        session.process_speech_events();
        assert!(session.is_listening());

        assert_eq!(session.toggle_voice().unwrap(), VoiceToggle::Stopped);
        session.process_speech_events();
        assert!(!session.is_listening());
        assert_eq!(*stops.lock().unwrap(), 1);
    }

    #[test]
    fn test_speech_error_only_resets_listening() {
        let recognizer = MockSpeechRecognizer::new().with_error("no-speech");
        let mut session = StudioSession::new(SpeechCapability::available(recognizer));
        session.set_prompt("a tent");

        session.toggle_voice().unwrap();
        session.process_speech_events();

        assert!(!session.is_listening());
        assert_eq!(session.prompt(), "a tent");
        assert!(session.error().is_none());
    }

    #[test]
    fn test_start_failure_is_reported() {
        let recognizer = MockSpeechRecognizer::new().with_start_failure();
        let mut session = StudioSession::new(SpeechCapability::available(recognizer));

        let err = session.toggle_voice().unwrap_err();
        assert!(matches!(err, Error::Speech(_)));
        assert!(!session.is_listening());
    }

    #[tokio::test]
    async fn test_next_speech_event_applies_event() {
        let recognizer = MockSpeechRecognizer::new().with_transcript("marble floor");
        let mut session = StudioSession::new(SpeechCapability::available(recognizer));

        session.toggle_voice().unwrap();

        assert_eq!(session.next_speech_event().await, Some(SpeechEvent::Started));
        assert!(session.is_listening());
        assert_eq!(
            session.next_speech_event().await,
            Some(SpeechEvent::Result("marble floor".to_string()))
        );
        assert_eq!(session.prompt(), " marble floor");
    }

    #[test]
    fn test_view_display() {
        let view = View::Gallery(vec![Card {
            title: "Concept 1".to_string(),
            image: "data:image/png;base64,AAAA".to_string(),
        }]);
        assert_eq!(
            view.to_string(),
            "Concept 1: data:image/png;base64,AAAA... (26 bytes)"
        );
        assert_eq!(
            View::Failed("Error: rate limited".to_string()).to_string(),
            "Error: rate limited"
        );
    }
}
