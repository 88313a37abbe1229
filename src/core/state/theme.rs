use crate::{
    core::{cmd::Cmd, msg::theme::ThemeMsg},
    domain::theme::Theme,
    infrastructure::storage::StorageKey,
};

/// In-memory mirror of the persisted theme flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub current: Theme,
}

impl ThemeState {
    pub fn new(current: Theme) -> Self {
        Self { current }
    }

    pub fn update(&mut self, msg: ThemeMsg) -> Vec<Cmd> {
        match msg {
            ThemeMsg::Apply(theme) => self.apply(theme),
            ThemeMsg::Toggle => self.apply(self.current.toggled()),
        }
    }

    fn apply(&mut self, theme: Theme) -> Vec<Cmd> {
        self.current = theme;
        vec![Cmd::set(StorageKey::Theme, theme.to_string())]
    }
}
