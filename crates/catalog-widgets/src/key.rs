//! Canonical key names shared by key events and configured triggers.
//!
//! Bindings are configured with strings such as `"enter"`, `"ctrl+c"` or
//! `"S"`, and incoming crossterm events are reduced to the same vocabulary
//! before matching. Letter case is significant: `"S"` and `"s"` are two
//! different keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const CTRL: &str = "ctrl";
const ALT: &str = "alt";
const SHIFT: &str = "shift";

/// Return the canonical name of a key event, or `None` for key releases and
/// keys that have no name (media keys, lone modifiers, ...).
///
/// Modifiers are prefixed in the fixed order `ctrl+`, `alt+`, `shift+`.
/// Shift is folded into printable characters (`Shift+s` arrives as `S`) and
/// only spelled out for named keys.
///
/// ```
/// use catalog_widgets::key::key_name;
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
///
/// let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
/// assert_eq!(key_name(&ev).as_deref(), Some("ctrl+c"));
///
/// let ev = KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE);
/// assert_eq!(key_name(&ev).as_deref(), Some("pgdown"));
/// ```
pub fn key_name(event: &KeyEvent) -> Option<String> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let mut modifiers = event.modifiers;
    let base = match event.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => {
            modifiers.remove(KeyModifiers::SHIFT);
            c.to_string()
        }
        KeyCode::BackTab => {
            modifiers.insert(KeyModifiers::SHIFT);
            "tab".to_string()
        }
        KeyCode::F(n) => format!("f{n}"),
        code => named_key(code)?.to_string(),
    };

    Some(compose(
        modifiers.contains(KeyModifiers::CONTROL),
        modifiers.contains(KeyModifiers::ALT),
        modifiers.contains(KeyModifiers::SHIFT),
        &base,
    ))
}

/// Normalize a configured trigger string to the form [`key_name`] produces.
///
/// Both `+` and `-` separate modifiers (`"ctrl-j"` and `"ctrl+j"` name the
/// same key), modifier and key names are case-insensitive, single characters
/// are kept verbatim, and a few common aliases are accepted (`pgdn`,
/// `escape`, `return`, `" "`).
///
/// ```
/// use catalog_widgets::key::canonicalize;
///
/// assert_eq!(canonicalize("ctrl-j"), "ctrl+j");
/// assert_eq!(canonicalize("Alt+V"), "alt+V");
/// assert_eq!(canonicalize("pgdn"), "pgdown");
/// assert_eq!(canonicalize("-"), "-");
/// ```
pub fn canonicalize(trigger: &str) -> String {
    let (mut ctrl, mut alt, mut shift) = (false, false, false);
    let mut rest = trigger;

    while let Some((modifier, tail)) = split_modifier(rest) {
        match modifier {
            CTRL => ctrl = true,
            ALT => alt = true,
            _ => shift = true,
        }
        rest = tail;
    }

    let mut base = if rest.chars().count() == 1 {
        rest.to_string()
    } else {
        rest.to_lowercase()
    };
    base = match base.as_str() {
        " " => "space".to_string(),
        "pgdn" | "pagedown" => "pgdown".to_string(),
        "pageup" => "pgup".to_string(),
        "escape" => "esc".to_string(),
        "return" => "enter".to_string(),
        "del" => "delete".to_string(),
        _ => base,
    };

    if shift && base.chars().count() == 1 {
        base = base.to_uppercase();
        shift = false;
    }

    compose(ctrl, alt, shift, &base)
}

fn split_modifier(s: &str) -> Option<(&'static str, &str)> {
    [CTRL, ALT, SHIFT].into_iter().find_map(|name| {
        let head = s.get(..name.len())?;
        let tail = s.get(name.len() + 1..)?;
        let sep = s.as_bytes()[name.len()];
        (head.eq_ignore_ascii_case(name) && (sep == b'+' || sep == b'-') && !tail.is_empty())
            .then_some((name, tail))
    })
}

fn compose(ctrl: bool, alt: bool, shift: bool, base: &str) -> String {
    let mut name = String::with_capacity(base.len() + 12);
    if ctrl {
        name.push_str("ctrl+");
    }
    if alt {
        name.push_str("alt+");
    }
    if shift {
        name.push_str("shift+");
    }
    name.push_str(base);
    name
}

fn named_key(code: KeyCode) -> Option<&'static str> {
    Some(match code {
        KeyCode::Enter => "enter",
        KeyCode::Esc => "esc",
        KeyCode::Tab => "tab",
        KeyCode::Backspace => "backspace",
        KeyCode::Delete => "delete",
        KeyCode::Insert => "insert",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "pgup",
        KeyCode::PageDown => "pgdown",
        _ => return None,
    })
}
