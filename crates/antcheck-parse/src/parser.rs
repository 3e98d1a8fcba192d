//! Pass-based element extraction.
//!
//! Each pass walks the token list, claims the tokens it understands, and
//! marks them identified. The title is whatever contiguous free text is
//! left at the front once every other pass has had its turn.

use crate::elements::Elements;
use crate::keyword::{self, KeywordKind};
use crate::tokenizer::{self, Token, TokenKind};

/// Parses a release filename into its [`Elements`].
///
/// ```
/// let e = antcheck_parse::parse("Heat.1995.1080p.BluRay.x264-CRUELTY.mkv");
/// assert_eq!(e.title.as_deref(), Some("Heat"));
/// assert_eq!(e.year, Some(1995));
/// assert_eq!(e.resolution.as_deref(), Some("1080p"));
/// assert_eq!(e.codec.as_deref(), Some("H264"));
/// assert_eq!(e.source.as_deref(), Some("Blu-ray"));
/// assert_eq!(e.release_group.as_deref(), Some("CRUELTY"));
/// ```
pub fn parse(filename: &str) -> Elements {
    let (tokens, _extension) = tokenizer::tokenize(filename);
    let mut elements = Elements::default();
    let mut identified = vec![false; tokens.len()];
    let mut uhd = false;

    identify_bracketed(&tokens, &mut elements, &mut identified, &mut uhd);
    identify_keywords(&tokens, &mut elements, &mut identified, &mut uhd);
    extract_year(&tokens, &mut elements, &mut identified);
    extract_release_group(&tokens, &mut elements, &mut identified);
    extract_episode(&tokens, &mut elements, &mut identified);
    extract_title(&tokens, &mut elements, &identified);

    if uhd && elements.source.as_deref() == Some("Blu-ray") {
        elements.source = Some("Ultra HD Blu-ray".to_string());
    }
    elements
}

fn identify_bracketed(
    tokens: &[Token],
    elements: &mut Elements,
    identified: &mut [bool],
    uhd: &mut bool,
) {
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Bracketed {
            continue;
        }
        if elements.year.is_none() && is_year(&token.text) {
            elements.year = token.text.parse().ok();
            identified[i] = true;
        } else if apply_keyword(elements, uhd, &token.text) {
            identified[i] = true;
        } else if let Some(resolution) = parse_dimensions(&token.text) {
            set_if_empty(&mut elements.resolution, &resolution);
            identified[i] = true;
        }
    }
}

fn identify_keywords(
    tokens: &[Token],
    elements: &mut Elements,
    identified: &mut [bool],
    uhd: &mut bool,
) {
    for (i, token) in tokens.iter().enumerate() {
        if !token.is_free_text() || identified[i] || token.text == "-" {
            continue;
        }
        if apply_keyword(elements, uhd, &token.text) {
            identified[i] = true;
        } else if let Some(resolution) = parse_dimensions(&token.text) {
            set_if_empty(&mut elements.resolution, &resolution);
            identified[i] = true;
        }
    }
}

fn apply_keyword(elements: &mut Elements, uhd: &mut bool, text: &str) -> bool {
    let Some(kw) = keyword::find(text) else {
        return false;
    };
    match kw.kind {
        KeywordKind::Resolution => set_if_empty(&mut elements.resolution, kw.canonical),
        KeywordKind::VideoCodec => set_if_empty(&mut elements.codec, kw.canonical),
        KeywordKind::Source => set_if_empty(&mut elements.source, kw.canonical),
        KeywordKind::Edition => set_if_empty(&mut elements.edition, kw.canonical),
        KeywordKind::UltraHd => *uhd = true,
        _ => {}
    }
    true
}

fn set_if_empty(slot: &mut Option<String>, value: &str) {
    if slot.is_none() {
        *slot = Some(value.to_string());
    }
}

/// The year is the rightmost free 4-digit token in range. The first free
/// token never qualifies, so films like `1984` or `2012` keep their title.
fn extract_year(tokens: &[Token], elements: &mut Elements, identified: &mut [bool]) {
    if elements.year.is_some() {
        return;
    }
    let mut first_free = None;
    let mut candidate = None;
    for (i, token) in tokens.iter().enumerate() {
        if !token.is_free_text() || identified[i] || token.text == "-" {
            continue;
        }
        if first_free.is_none() {
            first_free = Some(i);
        }
        if first_free != Some(i) && is_year(&token.text) {
            candidate = Some(i);
        }
    }
    if let Some(i) = candidate {
        elements.year = tokens[i].text.parse().ok();
        identified[i] = true;
    }
}

fn extract_release_group(tokens: &[Token], elements: &mut Elements, identified: &mut [bool]) {
    // A trailing `-GROUP` suffix, the scene convention.
    let mut rev = tokens
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, t)| !t.is_delimiter());
    if let Some((last, token)) = rev.next() {
        if token.is_free_text()
            && !identified[last]
            && token.text != "-"
            && keyword::find(&token.text).is_none()
            && !is_year(&token.text)
        {
            if let Some((dash_idx, dash)) = rev.next() {
                if dash.is_free_text() && dash.text == "-" {
                    elements.release_group = Some(token.text.clone());
                    identified[last] = true;
                    identified[dash_idx] = true;
                    return;
                }
            }
        }
    }
    // Otherwise the first bracketed token, if it comes before any free text.
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Delimiter => continue,
            TokenKind::Bracketed => {
                if !identified[i] && keyword::find(&token.text).is_none() {
                    elements.release_group = Some(token.text.clone());
                    identified[i] = true;
                }
                break;
            }
            TokenKind::FreeText => break,
        }
    }
}

fn extract_episode(tokens: &[Token], elements: &mut Elements, identified: &mut [bool]) {
    for (i, token) in tokens.iter().enumerate() {
        if !token.is_free_text() || identified[i] {
            continue;
        }
        if is_episode_marker(&token.text) {
            elements.episode = Some(token.text.clone());
            identified[i] = true;
            return;
        }
    }
}

fn extract_title(tokens: &[Token], elements: &mut Elements, identified: &[bool]) {
    let mut title = String::new();
    // Separator owed to the next word: a space from a delimiter run, or a
    // hyphen when a dash sits tight between two title words.
    let mut pending: Option<&str> = None;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Delimiter => {
                if !title.is_empty() && pending.is_none() {
                    pending = Some(" ");
                }
            }
            TokenKind::Bracketed => {
                if !title.is_empty() {
                    break;
                }
            }
            TokenKind::FreeText => {
                if identified[i] {
                    if title.is_empty() {
                        continue;
                    }
                    break;
                }
                if token.text == "-" {
                    if !title.is_empty() {
                        pending = Some("-");
                    }
                    continue;
                }
                if !title.is_empty() {
                    title.push_str(pending.unwrap_or(" "));
                }
                pending = None;
                title.push_str(&token.text);
            }
        }
    }
    let title = title.trim().to_string();
    if !title.is_empty() {
        elements.title = Some(title);
    }
}

fn is_year(text: &str) -> bool {
    text.len() == 4
        && text.chars().all(|c| c.is_ascii_digit())
        && matches!(text.parse::<u32>(), Ok(1900..=2099))
}

/// `WxH` dimension strings map to the usual height label, `1920x1080`
/// becoming `1080p`.
fn parse_dimensions(text: &str) -> Option<String> {
    let (w, h) = text.split_once(['x', 'X'])?;
    let _: u32 = w.parse().ok()?;
    let height: u32 = h.parse().ok()?;
    (height >= 480).then(|| format!("{height}p"))
}

fn is_episode_marker(text: &str) -> bool {
    // S01E02 style.
    if text.len() >= 4 && matches!(text.as_bytes()[0], b'S' | b's') {
        let rest = &text[1..];
        if let Some(pos) = rest.find(['E', 'e']) {
            let season = &rest[..pos];
            let episode = &rest[pos + 1..];
            if (1..=2).contains(&season.len())
                && (1..=3).contains(&episode.len())
                && season.chars().all(|c| c.is_ascii_digit())
                && episode.chars().all(|c| c.is_ascii_digit())
            {
                return true;
            }
        }
    }
    // 3x07 style.
    if let Some((season, episode)) = text.split_once(['x', 'X']) {
        if (1..=2).contains(&season.len())
            && episode.len() == 2
            && season.chars().all(|c| c.is_ascii_digit())
            && episode.chars().all(|c| c.is_ascii_digit())
        {
            return true;
        }
    }
    false
}
