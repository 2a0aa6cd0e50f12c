//! Raw key label to display character translation.
//!
//! Pure function of the label, the ctrl/shift-independent caps state, and the
//! configured shift table. A `None` result means the key produces nothing to
//! insert (named keys like `"Shift"` or `"F5"`, the numeric-lock key).
//!
//! Rules apply in order: Enter, shift-table substitution, numpad prefix
//! stripping, fixed keypad symbols, multi-char rejection, case folding.

use field_config::ShiftMap;
use std::borrow::Cow;

/// Translate one key press into the character it types, if any.
pub fn translate(label: &str, shift: bool, caps: bool, map: &ShiftMap) -> Option<char> {
    if label == "Enter" {
        return Some('\n');
    }

    let mut label: Cow<'_, str> = Cow::Borrowed(label);
    if shift {
        if let Some(mapped) = map.shifted(label.as_ref()) {
            label = Cow::Owned(mapped.to_string());
        }
    }

    // Numpad keys arrive as "Numpad <key>"; the bare key carries the meaning.
    if let Some(stripped) = label.strip_prefix("Numpad ") {
        label = Cow::Owned(stripped.to_string());
    }

    match label.as_ref() {
        "Decimal" => return Some('.'),
        "Add" => return Some('+'),
        "Subtract" => return Some('-'),
        "Divide" => return Some('/'),
        "Multiply" => return Some('*'),
        "Num Lock" => return None,
        _ => {}
    }

    let mut chars = label.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        // Named key with no single-character mapping.
        return None;
    }
    let cased = if caps || shift {
        c.to_uppercase().next().unwrap_or(c)
    } else {
        c.to_lowercase().next().unwrap_or(c)
    };
    Some(cased)
}
