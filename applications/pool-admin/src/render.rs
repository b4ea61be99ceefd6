//! Plain-text rendering of grouped lists

use pool_core::{ImportableItem, Track};
use pool_importer::ImportSession;
use pool_view::{GroupedView, Page, PageMode};
use std::fmt::Write;

/// Render day groups with a header per group
pub fn render_groups<T, F>(view: &GroupedView<T>, line: F) -> String
where
    F: Fn(&T) -> String,
{
    let mut out = String::new();
    for group in &view.groups {
        let _ = writeln!(out, "== {} ({}) ==", group.label, group.items.len());
        for item in &group.items {
            let _ = writeln!(out, "  {}", line(item));
        }
    }
    out
}

/// Render a page with its footer
pub fn render_page<T, F>(page: &Page<T>, line: F) -> String
where
    F: Fn(&T) -> String,
{
    if page.total_items == 0 {
        return "Nothing to show\n".to_string();
    }

    let mut out = render_groups(&page.view, line);
    let footer = match page.mode {
        PageMode::Page => format!(
            "Page {} of {} ({} of {} items)",
            page.page + 1,
            page.total_pages.max(1),
            page.visible_len(),
            page.total_items
        ),
        PageMode::Infinite => format!(
            "Showing {} of {} items{}",
            page.visible_len(),
            page.total_items,
            if page.has_more { ", more below" } else { "" }
        ),
    };
    let _ = writeln!(out, "{footer}");
    out
}

/// One importable item: name, style, and where its label comes from
pub fn item_line(session: &ImportSession, item: &ImportableItem) -> String {
    let draft = &item.draft;
    let mut line = format!("{} - {}", draft.artist, draft.song_name);
    if let Some(version) = &draft.version {
        let _ = write!(line, " ({version})");
    }

    let resolved = session.resolve_label(item);
    match resolved.ai_confidence {
        Some(confidence) => {
            let style = item
                .detection
                .as_ref()
                .or_else(|| session.cached_detection(item.key()))
                .map(|d| d.style.as_str())
                .unwrap_or("?");
            let _ = write!(
                line,
                " [{style}] -> {} ({:.0}%)",
                resolved.label,
                confidence * 100.0
            );
        }
        None if item.manual_label.is_some() || draft.pool.is_some() => {
            let _ = write!(line, " -> {} (manual)", resolved.label);
        }
        None => line.push_str(" (pending detection)"),
    }

    if session.selection().contains(item.key()) {
        line.insert_str(0, "* ");
    }
    line
}

/// One catalog track
pub fn track_line(track: &Track) -> String {
    let mut line = format!("#{} {} - {}", track.id, track.artist, track.song_name);
    if let Some(version) = &track.version {
        let _ = write!(line, " ({version})");
    }
    if let Some(style) = &track.style {
        let _ = write!(line, " [{style}]");
    }
    if let Some(pool) = &track.pool {
        let _ = write!(line, " / {pool}");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pool_core::{DetectionResult, StorageFile, TimeZoneConfig};
    use pool_view::{paginate, DayGrouper};

    fn file(key: &str, day: u32) -> StorageFile {
        StorageFile {
            key: key.to_string(),
            url: format!("https://cdn.example.com/{key}"),
            size: 1,
            last_modified: Utc.with_ymd_and_hms(2024, 6, day, 15, 0, 0).unwrap(),
            filename: key.to_string(),
            parsed_name: None,
            import_data: None,
        }
    }

    fn session() -> ImportSession {
        let mut session = ImportSession::from_listing(
            vec![
                file("Fisher - Losing It.mp3", 15),
                file("Anyma - Eternity (Extended Mix).mp3", 14),
            ],
            "Unlabeled",
        )
        .unwrap();
        session.apply_detection(
            "Fisher - Losing It.mp3",
            DetectionResult {
                style: "Tech House".into(),
                label: "Catch & Release".into(),
                confidence: 0.92,
                source: None,
                cover_image: None,
            },
        );
        session
    }

    #[test]
    fn test_item_lines() {
        let mut session = session();
        session.selection_mut().toggle("Fisher - Losing It.mp3");

        let detected = session.get("Fisher - Losing It.mp3").unwrap();
        assert_eq!(
            item_line(&session, detected),
            "* Fisher - Losing It [Tech House] -> Catch & Release (92%)"
        );

        let pending = session.get("Anyma - Eternity (Extended Mix).mp3").unwrap();
        assert_eq!(
            item_line(&session, pending),
            "Anyma - Eternity (Extended Mix) (pending detection)"
        );
    }

    #[test]
    fn test_render_page_groups_and_footer() {
        let session = session();
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap();
        let view = DayGrouper::new(TimeZoneConfig::brasilia(), now).group_by_day(session.items());
        let page = paginate(&view, 0, 1, PageMode::Page).unwrap();

        let out = render_page(&page, |item| item_line(&session, item));
        assert_eq!(
            out,
            "== Today (1) ==\n  Fisher - Losing It [Tech House] -> Catch & Release (92%)\nPage 1 of 2 (1 of 2 items)\n"
        );
    }

    fn track(pool: Option<&str>) -> Track {
        Track {
            id: 7,
            song_name: "Losing It".into(),
            artist: "Fisher".into(),
            style: Some("Tech House".into()),
            version: Some("Extended Mix".into()),
            pool: pool.map(String::from),
            image_url: None,
            download_url: None,
            release_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, 15, 15, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_track_line() {
        assert_eq!(
            track_line(&track(Some("Catch & Release"))),
            "#7 Fisher - Losing It (Extended Mix) [Tech House] / Catch & Release"
        );
        assert_eq!(
            track_line(&track(None)),
            "#7 Fisher - Losing It (Extended Mix) [Tech House]"
        );
    }

    #[test]
    fn test_render_empty() {
        let view: GroupedView<Track> = GroupedView::default();
        let page = paginate(&view, 0, 10, PageMode::Infinite).unwrap();
        assert_eq!(render_page(&page, track_line), "Nothing to show\n");
    }
}
