//! Splits a filename into bracketed groups, delimiter runs, and free text.
//!
//! The tokenizer is deliberately dumb: it knows nothing about years,
//! codecs, or release groups. It only decides where one token ends and
//! the next begins, so the parser passes can reason about whole tokens.

/// Video container extensions recognized when splitting off the extension.
pub const EXTENSIONS: &[&str] = &["mkv", "mp4", "avi", "mpeg", "m2ts"];

const DELIMITERS: &[char] = &[' ', '.', '_'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Plain text between delimiters.
    FreeText,
    /// Contents of a `[...]`, `(...)`, or `{...}` group, brackets stripped.
    Bracketed,
    /// A run of separator characters.
    Delimiter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: String) -> Self {
        Self { kind, text }
    }

    pub fn is_free_text(&self) -> bool {
        self.kind == TokenKind::FreeText
    }

    pub fn is_delimiter(&self) -> bool {
        self.kind == TokenKind::Delimiter
    }
}

/// Tokenizes `filename`, returning the tokens of the stem and the
/// recognized video extension, if any.
pub fn tokenize(filename: &str) -> (Vec<Token>, Option<String>) {
    let (stem, extension) = split_extension(filename);
    let chars: Vec<char> = stem.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if let Some(close) = closing_bracket(c) {
            let start = i + 1;
            let mut end = start;
            while end < chars.len() && chars[end] != close {
                end += 1;
            }
            let text: String = chars[start..end].iter().collect();
            if !text.is_empty() {
                tokens.push(Token::new(TokenKind::Bracketed, text));
            }
            i = if end < chars.len() { end + 1 } else { end };
        } else if is_delimiter(&chars, i) {
            let mut end = i + 1;
            while end < chars.len() && is_delimiter(&chars, end) {
                end += 1;
            }
            tokens.push(Token::new(
                TokenKind::Delimiter,
                chars[i..end].iter().collect(),
            ));
            i = end;
        } else if c == '-' {
            // Dashes get their own token: they may glue a hyphenated title
            // together or introduce a trailing release group.
            tokens.push(Token::new(TokenKind::FreeText, "-".to_string()));
            i += 1;
        } else {
            let mut end = i;
            while end < chars.len() {
                let ch = chars[end];
                if closing_bracket(ch).is_some() || ch == '-' || is_delimiter(&chars, end) {
                    break;
                }
                end += 1;
            }
            tokens.push(Token::new(
                TokenKind::FreeText,
                chars[i..end].iter().collect(),
            ));
            i = end;
        }
    }

    (tokens, extension)
}

/// A delimiter character at `idx`, except a dot wedged between two digits:
/// `5.1` and `DD5.1` must survive as single tokens.
fn is_delimiter(chars: &[char], idx: usize) -> bool {
    let c = chars[idx];
    if !DELIMITERS.contains(&c) {
        return false;
    }
    if c == '.'
        && idx > 0
        && idx + 1 < chars.len()
        && chars[idx - 1].is_ascii_digit()
        && chars[idx + 1].is_ascii_digit()
    {
        return false;
    }
    true
}

fn closing_bracket(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

fn split_extension(filename: &str) -> (&str, Option<String>) {
    if let Some(pos) = filename.rfind('.') {
        let ext = &filename[pos + 1..];
        if EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)) {
            return (&filename[..pos], Some(ext.to_ascii_lowercase()));
        }
    }
    (filename, None)
}
