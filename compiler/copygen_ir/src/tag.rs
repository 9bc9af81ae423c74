//! Struct tags.
//!
//! A struct tag is the raw annotation string attached to a field, in the
//! conventional `key:"value" key2:"value2"` form. The generator reads a single
//! boolean key from it to decide whether a field is excluded from the copy.

/// Raw struct tag text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StructTag(String);

impl StructTag {
    pub fn new(tag: impl Into<String>) -> Self {
        StructTag(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Look up the value associated with `key`.
    ///
    /// Scanning stops at the first malformed pair, so keys after a syntax
    /// error are not found.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let mut rest = self.0.as_bytes();
        loop {
            while let Some((&b' ', tail)) = rest.split_first() {
                rest = tail;
            }
            if rest.is_empty() {
                return None;
            }

            // Key: run of non-control, non-space characters up to ':'.
            let name_len = rest
                .iter()
                .position(|&b| b <= b' ' || b == b':' || b == b'"' || b == 0x7f)
                .unwrap_or(rest.len());
            if name_len == 0
                || name_len + 1 >= rest.len()
                || rest[name_len] != b':'
                || rest[name_len + 1] != b'"'
            {
                return None;
            }
            let name = &rest[..name_len];
            rest = &rest[name_len + 1..];

            // Quoted value, honouring backslash escapes.
            let mut i = 1;
            while i < rest.len() && rest[i] != b'"' {
                if rest[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            if i >= rest.len() {
                return None;
            }
            let quoted = &rest[..=i];
            rest = &rest[i + 1..];

            if name == key.as_bytes() {
                return unquote(quoted);
            }
        }
    }

    /// Whether `key` is present and parses as boolean `true`.
    ///
    /// Missing keys and values that do not parse as booleans read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.lookup(key)
            .and_then(|value| parse_bool(&value))
            .unwrap_or(false)
    }
}

impl From<&str> for StructTag {
    fn from(tag: &str) -> Self {
        StructTag::new(tag)
    }
}

/// Parse a boolean the way Go's `strconv.ParseBool` does.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Strip the surrounding quotes and resolve escapes the way Go's
/// `strconv.Unquote` does for double-quoted strings.
///
/// `\xHH` and octal escapes produce raw bytes; a value that does not end up
/// as valid UTF-8 is rejected.
fn unquote(quoted: &[u8]) -> Option<String> {
    let mut rest = quoted.strip_prefix(b"\"")?.strip_suffix(b"\"")?;
    let mut out = Vec::with_capacity(rest.len());
    while let Some((&b, tail)) = rest.split_first() {
        rest = tail;
        match b {
            b'\\' => {}
            b'\n' => return None,
            _ => {
                out.push(b);
                continue;
            }
        }

        let (&escape, tail) = rest.split_first()?;
        rest = tail;
        match escape {
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            b'\\' | b'"' => out.push(escape),
            b'x' => {
                let (value, tail) = digits(rest, 2, 16)?;
                rest = tail;
                out.push(u8::try_from(value).ok()?);
            }
            b'0'..=b'7' => {
                let (low, tail) = digits(rest, 2, 8)?;
                rest = tail;
                let value = u32::from(escape - b'0') * 64 + low;
                out.push(u8::try_from(value).ok()?);
            }
            b'u' | b'U' => {
                let width = if escape == b'u' { 4 } else { 8 };
                let (value, tail) = digits(rest, width, 16)?;
                rest = tail;
                let c = char::from_u32(value)?;
                out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
            }
            _ => return None,
        }
    }
    String::from_utf8(out).ok()
}

/// Parse exactly `count` digits in `radix` from the front of `bytes`.
fn digits(bytes: &[u8], count: usize, radix: u32) -> Option<(u32, &[u8])> {
    if bytes.len() < count {
        return None;
    }
    let (head, tail) = bytes.split_at(count);
    let mut value = 0u32;
    for &d in head {
        value = value * radix + char::from(d).to_digit(radix)?;
    }
    Some((value, tail))
}

#[cfg(test)]
mod tests;
