//! PDH counter path decoding.
//!
//! A counter column header has the form
//! `\\MACHINE\CATEGORY(INSTANCE)\COUNTER` or `\\MACHINE\CATEGORY\COUNTER`.
//! The machine name runs up to the next backslash. The category is the
//! shortest text that is followed either by `(INSTANCE)\` or by `\`, trying
//! the instance form first. Everything after that backslash is the counter
//! name, verbatim, so counter names may contain backslashes and parentheses.

use perfslope_types::CounterIdentity;

/// Decoded parts of a counter path, borrowed from the header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CounterPath<'a> {
    machine: &'a str,
    category: &'a str,
    instance: &'a str,
    counter: &'a str,
}

/// Decodes a counter column header.
///
/// The header is trimmed and kept as the display name. Headers that do not
/// follow the counter path grammar yield a display-only identity.
#[must_use]
pub fn parse_header(header: &str) -> CounterIdentity {
    let header = header.trim();
    match find_counter_path(header) {
        Some(path) => CounterIdentity::new(
            path.machine,
            path.category,
            path.instance,
            path.counter,
            header,
        ),
        None => CounterIdentity::display_only(header),
    }
}

/// Finds the leftmost `\\` from which a complete counter path can be read.
fn find_counter_path(text: &str) -> Option<CounterPath<'_>> {
    let mut from = 0;
    while let Some(offset) = text[from..].find("\\\\") {
        let start = from + offset;
        if let Some(path) = counter_path_at(text, start + 2) {
            return Some(path);
        }
        from = start + 1;
    }
    None
}

/// Reads a counter path whose machine name starts at `machine_start`.
///
/// Only ASCII delimiters are ever compared, so every slice boundary falls on
/// a character boundary.
fn counter_path_at(text: &str, machine_start: usize) -> Option<CounterPath<'_>> {
    let bytes = text.as_bytes();

    let machine_len = bytes[machine_start..].iter().position(|&b| b == b'\\')?;
    if machine_len == 0 {
        return None;
    }
    let machine_end = machine_start + machine_len;
    let category_start = machine_end + 1;

    for category_end in category_start + 1..bytes.len() {
        if bytes[category_end - 1] == b'\n' {
            return None;
        }

        let rest = match bytes[category_end] {
            b'(' => instance_and_counter(text, category_end),
            b'\\' => counter_at(text, category_end + 1).map(|counter| ("", counter)),
            _ => None,
        };

        if let Some((instance, counter)) = rest {
            return Some(CounterPath {
                machine: &text[machine_start..machine_end],
                category: &text[category_start..category_end],
                instance,
                counter,
            });
        }
    }

    None
}

/// Reads `(INSTANCE)\COUNTER` starting at the opening parenthesis.
fn instance_and_counter(text: &str, open: usize) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let close = open + 1 + bytes[open + 1..].iter().position(|&b| b == b')')?;
    if bytes.get(close + 1) != Some(&b'\\') {
        return None;
    }
    let counter = counter_at(text, close + 2)?;
    Some((&text[open + 1..close], counter))
}

/// Reads a non-empty counter name running to the end of the line.
fn counter_at(text: &str, start: usize) -> Option<&str> {
    let rest = text.get(start..)?;
    let counter = rest.split('\n').next().unwrap_or_default();
    (!counter.is_empty()).then_some(counter)
}
