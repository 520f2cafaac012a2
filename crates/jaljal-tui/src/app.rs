use jaljal_core::{RenderOptions, Resolution, ValidationError, View, render};
use jaljal_engine::{Outcome, SearchEngine};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Duration,
    Attempts,
    Results,
}

/// A single-line text input with its inline error
#[derive(Debug, Clone, Default)]
pub struct InputField {
    pub value: String,
    pub error: Option<String>,
}

impl InputField {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            error: None,
        }
    }

    // Editing invalidates whatever was reported for the old text
    pub fn push(&mut self, c: char) {
        self.value.push(c);
        self.error = None;
    }

    pub fn pop(&mut self) {
        self.value.pop();
        self.error = None;
    }
}

pub struct App {
    pub engine: SearchEngine,
    pub render_options: RenderOptions,
    pub duration: InputField,
    pub attempts: InputField,
    pub focus: Focus,
    pub results_scroll: u16,
    pub show_help: bool,
    tx: UnboundedSender<Outcome>,
    rx: UnboundedReceiver<Outcome>,
}

impl App {
    pub fn new(engine: SearchEngine, render_options: RenderOptions, default_attempts: u32) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            engine,
            render_options,
            duration: InputField::default(),
            attempts: InputField::with_value(default_attempts.to_string()),
            focus: Focus::Duration,
            results_scroll: 0,
            show_help: false,
            tx,
            rx,
        }
    }

    pub fn view(&self) -> View {
        render(self.engine.state(), &self.render_options)
    }

    pub fn is_loading(&self) -> bool {
        self.engine.is_loading()
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Duration => Focus::Attempts,
            Focus::Attempts => Focus::Results,
            Focus::Results => Focus::Duration,
        };
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            Focus::Duration => self.duration.push(c),
            Focus::Attempts => self.attempts.push(c),
            Focus::Results => {}
        }
    }

    pub fn input_backspace(&mut self) {
        match self.focus {
            Focus::Duration => self.duration.pop(),
            Focus::Attempts => self.attempts.pop(),
            Focus::Results => {}
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }

    pub fn scroll_results_down(&mut self) {
        self.results_scroll = self.results_scroll.saturating_add(1);
    }

    /// Validate the form and dispatch a search
    pub fn submit(&mut self) {
        self.duration.error = None;
        self.attempts.error = None;

        let attempts = match self.attempts.value.trim() {
            "" => Ok(None),
            text => text
                .parse::<u32>()
                .map(Some)
                .map_err(|_| ValidationError::AttemptsNotANumber(text.to_string())),
        };

        let dispatched = attempts.and_then(|attempts| {
            self.engine
                .dispatch(&self.duration.value, attempts, self.tx.clone())
        });

        match dispatched {
            Ok(_) => {
                self.results_scroll = 0;
            }
            Err(err) => self.show_validation_error(err),
        }
    }

    fn show_validation_error(&mut self, err: ValidationError) {
        let message = err.to_string();
        match err {
            ValidationError::AttemptsNotANumber(_) => {
                // rejected before dispatch, so the session has not seen it
                self.engine.reject(err);
                self.attempts.error = Some(message);
                self.focus = Focus::Attempts;
            }
            ValidationError::InvalidAttemptCount(_) => {
                self.attempts.error = Some(message);
                self.focus = Focus::Attempts;
            }
            _ => {
                self.duration.error = Some(message);
                self.focus = Focus::Duration;
            }
        }
    }

    /// Apply any outcomes that arrived since the last tick
    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            let resolution = self.engine.apply(outcome);
            self.on_resolution(resolution);
        }
    }

    /// Wait for the next outcome instead of polling
    #[cfg(test)]
    pub(crate) async fn next_outcome(&mut self) -> Option<Resolution> {
        let outcome = self.rx.recv().await?;
        let resolution = self.engine.apply(outcome);
        self.on_resolution(resolution);
        Some(resolution)
    }

    fn on_resolution(&mut self, resolution: Resolution) {
        if let Resolution::Applied {
            scroll_to_results: true,
        } = resolution
        {
            self.results_scroll = 0;
            self.focus = Focus::Results;
        }
    }
}
