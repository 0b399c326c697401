use std::borrow::Cow;

/// Characters that may never appear raw anywhere in a directive line.
const DATA_CHARS: &[char] = &['%', '\r', '\n'];

/// Parameter values additionally reserve the parameter list delimiters.
const PROPERTY_CHARS: &[char] = &['%', '\r', '\n', ':', ','];

/// Escape a payload: `%`, CR and LF become `%25`, `%0D`, `%0A`.
pub fn escape_data(input: &str) -> Cow<'_, str> {
    escape_with(input, DATA_CHARS)
}

/// Escape a parameter value: the payload table plus `%3A` for `:` and `%2C` for `,`.
pub fn escape_property(input: &str) -> Cow<'_, str> {
    escape_with(input, PROPERTY_CHARS)
}

pub fn unescape_data(input: &str) -> Cow<'_, str> {
    unescape_with(input, DATA_CHARS)
}

pub fn unescape_property(input: &str) -> Cow<'_, str> {
    unescape_with(input, PROPERTY_CHARS)
}

fn escape_with<'a>(input: &'a str, table: &[char]) -> Cow<'a, str> {
    if !input.contains(table) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        if table.contains(&c) {
            // Every table entry is ASCII, so two hex digits always suffice.
            out.push_str(&format!("%{:02X}", c as u32));
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn unescape_with<'a>(input: &'a str, table: &[char]) -> Cow<'a, str> {
    if !input.contains('%') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match tail.get(1..3).and_then(decode_pair) {
            Some(c) if table.contains(&c) => {
                out.push(c);
                rest = &tail[3..];
            }
            _ => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_pair(hex: &str) -> Option<char> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let code = u8::from_str_radix(hex, 16).ok()?;
    code.is_ascii().then_some(code as char)
}
