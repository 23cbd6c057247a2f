//! Escape sequence scanning and resolution for quoted values.

/// Why an escape sequence could not be resolved, and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EscapeError {
    /// Byte offset of the backslash within the scanned text
    pub offset: usize,
    pub msg: &'static str,
}

/// Number of hex digits that follow `\x`.
const UNICODE_ESCAPE_DIGITS: usize = 6;

/// Resolves every escape sequence in `body`, the text between two quotes.
pub(crate) fn unescape(body: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();

    while let Some((offset, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let escaped = match chars.next() {
            Some((_, c)) => c,
            None => {
                return Err(EscapeError {
                    offset,
                    msg: "unfinished escape sequence",
                })
            }
        };

        let resolved = match escaped {
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '0' => '\0',
            'a' => '\x07',
            'b' => '\x08',
            ';' => ';',
            '#' => '#',
            ':' => ':',
            '=' => '=',
            'x' => {
                let mut code: u32 = 0;
                for _ in 0..UNICODE_ESCAPE_DIGITS {
                    match chars.next().and_then(|(_, d)| d.to_digit(16)) {
                        Some(digit) => code = code * 16 + digit,
                        None => {
                            return Err(EscapeError {
                                offset,
                                msg: "expected six hex digits after \\x",
                            })
                        }
                    }
                }
                char::from_u32(code).ok_or(EscapeError {
                    offset,
                    msg: "escape does not name a Unicode scalar value",
                })?
            }
            _ => {
                return Err(EscapeError {
                    offset,
                    msg: "invalid escape sequence",
                })
            }
        };
        out.push(resolved);
    }

    Ok(out)
}

/// Returns the byte offset in `text` of the first `quote` not preceded by a
/// backslash escape.
pub(crate) fn find_closing_quote(text: &str, quote: char) -> Option<usize> {
    let mut chars = text.char_indices();
    while let Some((offset, ch)) = chars.next() {
        if ch == '\\' {
            chars.next();
        } else if ch == quote {
            return Some(offset);
        }
    }
    None
}

/// Returns the byte offset of the first character of `text` accepted by
/// `is_marker` that is not protected by a backslash.
pub(crate) fn find_unescaped(text: &str, is_marker: impl Fn(char) -> bool) -> Option<usize> {
    let mut chars = text.char_indices();
    while let Some((offset, ch)) = chars.next() {
        if ch == '\\' {
            chars.next();
        } else if is_marker(ch) {
            return Some(offset);
        }
    }
    None
}
