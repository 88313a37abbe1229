use serde::{Deserialize, Serialize};

use crate::domain::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMsg {
    Apply(Theme),
    Toggle,
}
