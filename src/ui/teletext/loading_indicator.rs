//! Loading indicator for terminal UI

const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Simple ASCII loading indicator with rotating animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingIndicator {
    message: String,
    frame: usize,
}

impl LoadingIndicator {
    /// Creates a new loading indicator with the specified message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            frame: 0,
        }
    }

    /// Gets the current animation frame character
    pub fn current_frame(&self) -> &'static str {
        FRAMES[self.frame]
    }

    /// Gets the loading message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Advances to the next animation frame
    pub fn next_frame(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// Frame and message as shown on screen
    pub fn display_text(&self) -> String {
        format!("{} {}", self.current_frame(), self.message)
    }
}
