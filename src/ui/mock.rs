use super::speech::{SpeechEvent, SpeechRecognizer};
use crate::{Error, Result};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;

/// Recognizer that replays a scripted outcome as soon as it is started.
pub struct MockSpeechRecognizer {
    transcripts: Arc<Mutex<Vec<String>>>,
    error: Option<String>,
    fail_to_start: bool,
    start_count: Arc<Mutex<usize>>,
    stop_count: Arc<Mutex<usize>>,
    events: Option<UnboundedSender<SpeechEvent>>,
}

impl MockSpeechRecognizer {
    pub fn new() -> Self {
        Self {
            transcripts: Arc::new(Mutex::new(Vec::new())),
            error: None,
            fail_to_start: false,
            start_count: Arc::new(Mutex::new(0)),
            stop_count: Arc::new(Mutex::new(0)),
            events: None,
        }
    }

    /// Queue a transcript; each start consumes one.
    pub fn with_transcript(self, transcript: &str) -> Self {
        self.transcripts.lock().unwrap().push(transcript.to_string());
        self
    }

    /// Report this error instead of a transcript.
    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn with_start_failure(mut self) -> Self {
        self.fail_to_start = true;
        self
    }

    /// Shared start counter, readable after the mock moves into a session.
    pub fn start_counter(&self) -> Arc<Mutex<usize>> {
        self.start_count.clone()
    }

    pub fn stop_counter(&self) -> Arc<Mutex<usize>> {
        self.stop_count.clone()
    }
}

impl Default for MockSpeechRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechRecognizer for MockSpeechRecognizer {
    fn start(&mut self, events: UnboundedSender<SpeechEvent>) -> Result<()> {
        if self.fail_to_start {
            return Err(Error::Speech("microphone busy".to_string()));
        }
        *self.start_count.lock().unwrap() += 1;

        let _ = events.send(SpeechEvent::Started);
        if let Some(error) = &self.error {
            let _ = events.send(SpeechEvent::Error(error.clone()));
            let _ = events.send(SpeechEvent::Ended);
            return Ok(());
        }

        let mut transcripts = self.transcripts.lock().unwrap();
        if transcripts.is_empty() {
            // Keep listening until stopped.
            self.events = Some(events);
        } else {
            let transcript = transcripts.remove(0);
            let _ = events.send(SpeechEvent::Result(transcript));
            let _ = events.send(SpeechEvent::Ended);
        }
        Ok(())
    }

    fn stop(&mut self) {
        *self.stop_count.lock().unwrap() += 1;
        if let Some(events) = self.events.take() {
            let _ = events.send(SpeechEvent::Ended);
        }
    }
}
