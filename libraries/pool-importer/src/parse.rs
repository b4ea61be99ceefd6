//! Best-effort name parsing from storage filenames
//!
//! Handles the shapes uploads actually arrive in:
//! `Artist - Song (Version).mp3`, `Artist_-_Song.mp3`,
//! `[Style] Artist - Song.mp3`, `01 - Artist - Song.mp3`.

use pool_core::ParsedName;

/// Artist used when a filename has no `artist - song` separator
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Parse a filename (no folder prefix) into name fields.
pub fn parse_filename(filename: &str) -> ParsedName {
    let stem = strip_extension(filename);
    let cleaned = collapse_whitespace(&stem.replace('_', " "));
    let (style, rest) = take_bracketed(&cleaned);

    let (artist, title) = split_artist(&rest);
    let (song_name, version) = split_version(title);

    ParsedName {
        artist: artist.unwrap_or(UNKNOWN_ARTIST).to_string(),
        song_name: song_name.to_string(),
        version: version.map(str::to_string),
        style,
    }
}

fn strip_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (1..=5).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            stem
        }
        _ => filename,
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pull the first `[...]` tag out of the name
fn take_bracketed(name: &str) -> (Option<String>, String) {
    let Some(open) = name.find('[') else {
        return (None, name.to_string());
    };
    let Some(close) = name[open..].find(']').map(|i| open + i) else {
        return (None, name.to_string());
    };

    let tag = name[open + 1..close].trim();
    let rest = collapse_whitespace(&format!("{} {}", &name[..open], &name[close + 1..]));

    if tag.is_empty() {
        (None, rest)
    } else {
        (Some(tag.to_string()), rest)
    }
}

fn split_artist(name: &str) -> (Option<&str>, &str) {
    let separators = [" - ", " – ", " — "];

    let split = |s: &'_ str| -> Option<(usize, usize)> {
        separators
            .iter()
            .filter_map(|sep| s.find(sep).map(|at| (at, sep.len())))
            .min_by_key(|(at, _)| *at)
    };

    let Some((at, len)) = split(name) else {
        return (None, name.trim());
    };

    let (mut artist, mut title) = (name[..at].trim(), name[at + len..].trim());

    // "01 - Artist - Song": drop the track number
    if artist.chars().all(|c| c.is_ascii_digit()) {
        if let Some((at, len)) = split(title) {
            artist = title[..at].trim();
            title = title[at + len..].trim();
        }
    }

    if artist.is_empty() {
        (None, title)
    } else {
        (Some(artist), title)
    }
}

/// Trailing `(Version)` becomes the version
fn split_version(title: &str) -> (&str, Option<&str>) {
    let title = title.trim();
    if !title.ends_with(')') {
        return (title, None);
    }

    match title.rfind('(') {
        Some(open) if open > 0 => {
            let version = title[open + 1..title.len() - 1].trim();
            let song = title[..open].trim();
            if version.is_empty() || song.is_empty() {
                (title, None)
            } else {
                (song, Some(version))
            }
        }
        _ => (title, None),
    }
}
