use serde::{Deserialize, Serialize};

/// What a call to [`Dialogue::advance`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceOutcome {
    /// No dialogue is showing
    Ignored,
    /// The current message was still typing and is now fully shown
    Revealed,
    NextMessage,
    Finished,
}

/// A dialogue box revealing queued messages one character at a time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dialogue {
    speaker: String,
    messages: Vec<String>,
    index: usize,
    /// Characters of the current message shown so far
    revealed: usize,
    char_timer: f32,
    char_delay: f32,
    active: bool,
}

impl Dialogue {
    pub fn new(char_delay: f32) -> Self {
        Self {
            speaker: String::new(),
            messages: Vec::new(),
            index: 0,
            revealed: 0,
            char_timer: 0.0,
            char_delay,
            active: false,
        }
    }

    /// Replaces whatever is showing with `messages`. An empty list is ignored.
    pub fn show<I, S>(&mut self, speaker: &str, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            return;
        }

        log::debug!("Dialogue from {} ({} messages)", speaker, messages.len());
        self.speaker = speaker.to_owned();
        self.messages = messages;
        self.index = 0;
        self.revealed = 0;
        self.char_timer = 0.0;
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True once every queued message has been dismissed.
    pub fn is_finished(&self) -> bool {
        !self.active && self.index >= self.messages.len()
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn current_text(&self) -> &str {
        self.messages.get(self.index).map_or("", String::as_str)
    }

    /// The typed-out part of the current message.
    pub fn visible_text(&self) -> &str {
        let text = self.current_text();
        let end = text
            .char_indices()
            .nth(self.revealed)
            .map_or(text.len(), |(i, _)| i);
        &text[..end]
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed >= self.current_text().chars().count()
    }

    pub fn has_more(&self) -> bool {
        self.index + 1 < self.messages.len()
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.active || self.is_revealed() {
            return;
        }

        self.char_timer += dt;
        let total = self.current_text().chars().count();
        while self.char_timer >= self.char_delay && self.revealed < total {
            self.char_timer -= self.char_delay;
            self.revealed += 1;
        }
    }

    /// Finishes typing the current message, or moves on to the next one.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if !self.active {
            return AdvanceOutcome::Ignored;
        }

        if !self.is_revealed() {
            self.revealed = self.current_text().chars().count();
            return AdvanceOutcome::Revealed;
        }

        self.index += 1;
        self.revealed = 0;
        self.char_timer = 0.0;
        if self.index >= self.messages.len() {
            self.active = false;
            AdvanceOutcome::Finished
        } else {
            AdvanceOutcome::NextMessage
        }
    }
}

impl Default for Dialogue {
    fn default() -> Self {
        Self::new(crate::Settings::default().typewriter_delay)
    }
}
