use std::time::Instant;

/// The four mutually exclusive screens.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen {
    Intro,
    Recipient,
    Tone,
    Result,
}

pub struct Toast {
    pub text: String,
    pub shown_at: Instant,
}

/// "Copied" marker on one result card.
pub struct CopiedBadge {
    pub index: usize,
    pub shown_at: Instant,
}

pub struct LanguageMenu {
    pub visible: bool,
    pub cursor: usize,
}

/// Floating decoration on the intro screen, positioned in percent of the body.
pub struct Particle {
    pub glyph: &'static str,
    pub column_pct: u16,
    pub row_pct: u16,
}
