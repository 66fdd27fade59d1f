//! Broadcast text helpers

use std::borrow::Cow;

/// Strip `<col=ff0000>`-style markup tags from client text.
pub fn remove_tags(text: &str) -> Cow<'_, str> {
    if !text.contains('<') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_color_tags() {
        assert_eq!(
            remove_tags("<col=ef1020>The fumes filling the room suddenly ignite!</col>"),
            "The fumes filling the room suddenly ignite!"
        );
        assert!(matches!(remove_tags("plain"), Cow::Borrowed("plain")));
    }
}
