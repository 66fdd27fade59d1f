use lasso::{Spur, ThreadedRodeo};
use std::sync::OnceLock;

/// Interned string key for raider and NPC names.
pub type IStr = Spur;

/// Raiders are identified by their sanitized display name.
pub type ParticipantId = IStr;

/// Global string interner for names seen in world events.
static INTERNER: OnceLock<ThreadedRodeo> = OnceLock::new();

/// Get the global interner (initializes on first call).
pub fn interner() -> &'static ThreadedRodeo {
    INTERNER.get_or_init(ThreadedRodeo::default)
}

/// Intern a string, returning a key.
pub fn intern(s: &str) -> IStr {
    interner().get_or_intern(s)
}

/// Intern a display name after normalizing the non-breaking spaces the game
/// client uses inside player names.
pub fn intern_name(name: &str) -> IStr {
    if name.contains('\u{a0}') {
        intern(&name.replace('\u{a0}', " "))
    } else {
        intern(name)
    }
}

/// Resolve an interned key back to a string.
pub fn resolve(key: IStr) -> &'static str {
    interner().resolve(&key)
}
