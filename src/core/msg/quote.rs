use serde::{Deserialize, Serialize};

use crate::domain::quote::Quote;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuoteMsg {
    Loaded(Quote),
    Failed(String),
}
