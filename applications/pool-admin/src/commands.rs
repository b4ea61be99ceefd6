/// Subcommand implementations
use crate::config::AdminConfig;
use crate::error::AdminError;
use crate::progress;
use crate::render::{item_line, render_groups, render_page, track_line};
use anyhow::Context;
use pool_client::PoolClient;
use pool_core::{TimeZoneConfig, ViewLifecycle};
use pool_importer::{
    delete_keys, load_session, BatchDetector, DetectionSummary, ImportReport, Importer,
    SharedSession,
};
use pool_view::{DayGrouper, PageCursor, PageMode};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// What to import and how to override it
#[derive(Debug, Clone, Default)]
pub struct ImportRequest {
    pub prefix: Option<String>,
    pub all: bool,
    pub folder: Option<String>,
    pub keys: Vec<String>,
    pub label: Option<String>,
    pub style: Option<String>,
    pub skip_detection: bool,
}

/// Wired-up client and settings shared by every subcommand
pub struct App {
    config: AdminConfig,
    client: PoolClient,
    zone: TimeZoneConfig,
}

impl App {
    pub fn new(config: AdminConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let zone = config.time_zone()?;
        let client = PoolClient::new(config.client_config()).context("invalid API settings")?;

        Ok(Self {
            config,
            client,
            zone,
        })
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    async fn session(&self, prefix: Option<&str>) -> anyhow::Result<SharedSession> {
        let session = load_session(&self.client, prefix, &self.config.import.default_label)
            .await
            .context("failed to load storage listing")?;
        Ok(session.shared())
    }

    fn detector(&self) -> anyhow::Result<BatchDetector<PoolClient>> {
        Ok(BatchDetector::new(
            Arc::new(self.client.clone()),
            self.config.detector_config(),
        )?)
    }

    /// Print one page of importable files grouped by day
    pub async fn list(
        &self,
        prefix: Option<&str>,
        page: usize,
        mode: Option<PageMode>,
    ) -> anyhow::Result<String> {
        let session = self.session(prefix).await?;
        let session = session.read().await;

        let view = DayGrouper::now(self.zone).group_by_day(session.items());
        let mut cursor = PageCursor::new(
            self.config.view.page_size,
            mode.unwrap_or(self.config.view.mode),
        )?;
        while cursor.page() < page && cursor.next(view.len()) {}

        let page = cursor.apply(&view);
        Ok(render_page(&page, |item| item_line(&session, item)))
    }

    /// Detect every pending item, or re-detect a single key
    pub async fn detect(
        &self,
        prefix: Option<&str>,
        key: Option<&str>,
    ) -> anyhow::Result<DetectionSummary> {
        let session = self.session(prefix).await?;

        if let Some(key) = key {
            let result = self.detector()?.detect_one(&session, key).await?;
            info!(key, style = %result.style, label = %result.label, "Detected");
            return Ok(DetectionSummary {
                requested: 1,
                detected: 1,
                chunks: 1,
                ..Default::default()
            });
        }

        Ok(self.detect_pending(&session).await?)
    }

    async fn detect_pending(&self, session: &SharedSession) -> anyhow::Result<DetectionSummary> {
        let keys = session.read().await.undetected_keys();
        if keys.is_empty() {
            info!("Nothing left to detect");
            return Ok(DetectionSummary::default());
        }

        let lifecycle = ViewLifecycle::new();
        let (tx, rx) = mpsc::channel(64);
        let follower = tokio::spawn(progress::follow(
            rx,
            keys.len(),
            self.config.settle_window(),
        ));

        let handle = self
            .detector()?
            .with_lifecycle(lifecycle.clone())
            .with_progress(tx)
            .spawn(Arc::clone(session), keys);

        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, finishing the current chunk");
                lifecycle.close();
            }
        });

        let summary = handle.await.context("detection task failed")?;
        interrupt.abort();
        follower.await.context("progress task failed")?;

        info!(
            detected = summary.detected,
            failed = summary.failed,
            skipped = summary.skipped,
            "Detection finished"
        );
        Ok(summary)
    }

    /// Detect, select, override, and commit
    pub async fn import(&self, request: ImportRequest) -> anyhow::Result<ImportReport> {
        let selecting = [
            request.all,
            request.folder.is_some(),
            !request.keys.is_empty(),
        ];
        if selecting.iter().filter(|on| **on).count() != 1 {
            return Err(AdminError::Arguments(
                "choose exactly one of --all, --folder, or --key".to_string(),
            )
            .into());
        }

        let session = self.session(request.prefix.as_deref()).await?;
        if !request.skip_detection {
            self.detect_pending(&session).await?;
        }

        {
            let mut session = session.write().await;
            if request.all {
                let keys = session.keys();
                session
                    .selection_mut()
                    .select_all_visible(keys.iter().map(String::as_str));
            } else if let Some(folder) = &request.folder {
                session.select_folder(folder);
            } else {
                for key in &request.keys {
                    session.selection_mut().toggle(key);
                }
            }

            let selected = session.selected_keys();
            if let Some(style) = &request.style {
                session.apply_bulk_style(&selected, style);
            }
            if let Some(label) = &request.label {
                session.apply_bulk_label(&selected, label);
            }
        }

        let importer = Importer::new(
            Arc::new(self.client.clone()),
            self.config.import_config(),
        )?;
        Ok(importer.commit_selected(&session).await?)
    }

    /// Delete files from storage
    pub async fn delete(&self, prefix: Option<&str>, keys: &[String]) -> anyhow::Result<usize> {
        let session = self.session(prefix).await?;
        Ok(delete_keys(&self.client, &session, keys).await?)
    }

    /// Print catalog tracks grouped by day.
    ///
    /// The catalog pages server side. In infinite mode pages `1..=page`
    /// are fetched and shown together.
    pub async fn tracks(&self, page: usize, mode: Option<PageMode>) -> anyhow::Result<String> {
        let limit = self.config.view.page_size;
        let page = page.max(1);
        let mode = mode.unwrap_or(self.config.view.mode);
        let first = match mode {
            PageMode::Page => page,
            PageMode::Infinite => 1,
        };

        let mut tracks = Vec::new();
        let mut total = 0;
        for current in first..=page {
            let result = self
                .client
                .catalog()
                .list_tracks(current, limit)
                .await
                .context("failed to fetch tracks")?;
            total = result.total;
            let fetched = result.tracks.len();
            tracks.extend(result.tracks);
            if fetched < limit {
                break;
            }
        }

        let shown = tracks.len();
        let view = DayGrouper::now(self.zone).group_by_day(tracks);
        let mut out = render_groups(&view, track_line);
        match mode {
            PageMode::Page => out.push_str(&format!(
                "Page {} of {} ({} tracks)\n",
                page,
                total.div_ceil(limit).max(1),
                total
            )),
            PageMode::Infinite => out.push_str(&format!("Showing {shown} of {total} tracks\n")),
        }
        Ok(out)
    }
}
