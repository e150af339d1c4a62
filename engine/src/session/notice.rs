use crate::error::EngineError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Something the presentation layer should surface to the user (e.g. as a toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Notice {
    TeamNotFound(String),
    MaxPrizeReached,
    NothingToPrint,
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::MaxPrizeReached => NoticeLevel::Success,
            Notice::TeamNotFound(_) | Notice::NothingToPrint => NoticeLevel::Error,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::TeamNotFound(_) => "Equipe não encontrada",
            Notice::MaxPrizeReached => "Prêmio máximo garantido!",
            Notice::NothingToPrint => "Preencha algum valor antes de imprimir ou exportar.",
        }
    }

    /// The notice an engine error maps to, if the user should see one.
    pub fn for_error(err: &EngineError) -> Option<Notice> {
        match err {
            EngineError::TeamNotFound(slug) => Some(Notice::TeamNotFound(slug.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
