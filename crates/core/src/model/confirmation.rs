/// Explicit answer to "really delete?" prompts.
///
/// Destructive store operations take one of these so the caller cannot
/// delete by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    /// Interpret a typed reply; only `y`/`yes` (any case) confirms.
    #[must_use]
    pub fn from_reply(reply: &str) -> Self {
        match reply.trim().to_lowercase().as_str() {
            "y" | "yes" => Self::Confirmed,
            _ => Self::Declined,
        }
    }

    #[must_use]
    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}
