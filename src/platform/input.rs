//! Player input collaborators
//!
//! Pointer and click input arrive per tick through `sim::TickInput`; the
//! player name is asked for once per session.

/// Source of the player's display name
pub trait NamePrompt {
    /// Ask for a name; `None` if the player gave none
    fn request_name(&mut self) -> Option<String>;
}

impl<F> NamePrompt for F
where
    F: FnMut() -> Option<String>,
{
    fn request_name(&mut self) -> Option<String> {
        self()
    }
}
