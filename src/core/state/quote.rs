use crate::{
    core::{cmd::Cmd, msg::quote::QuoteMsg},
    domain::quote::FALLBACK_QUOTE,
};

pub const LOADING_TEXT: &str = "Loading quote...";

#[derive(Debug, Clone, Default)]
pub struct QuoteState {
    /// `None` while the request is in flight.
    pub text: Option<String>,
}

impl QuoteState {
    pub fn update(&mut self, msg: QuoteMsg) -> Vec<Cmd> {
        match msg {
            QuoteMsg::Loaded(quote) => {
                self.text = Some(quote.display_text());
                vec![]
            }
            QuoteMsg::Failed(error) => {
                self.text = Some(FALLBACK_QUOTE.to_string());
                vec![Cmd::LogError {
                    message: format!("Failed to fetch quote: {error}"),
                }]
            }
        }
    }

    pub fn display(&self) -> &str {
        self.text.as_deref().unwrap_or(LOADING_TEXT)
    }
}
