//! Subcommand tests against a mock admin API.

use pool_admin::{AdminConfig, AdminError, App, ImportRequest};
use pool_view::PageMode;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listed(key: &str) -> serde_json::Value {
    serde_json::json!({
        "key": key,
        "url": format!("https://cdn.example.com/{key}"),
        "size": 5_000_000,
        "lastModified": "2023-01-10T15:00:00Z",
        "filename": key.rsplit('/').next().unwrap(),
    })
}

async fn server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/storage/import"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "files": [
                listed("house/Fisher - Losing It.mp3"),
                listed("house/Chris Lake - Turn Off The Lights.mp3"),
                listed("techno/Anyma - Eternity (Extended Mix).mp3"),
            ],
            "importableCount": 3,
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/ai/detect-style"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "style": "Tech House",
            "label": "Catch & Release",
            "confidence": 0.9,
            "platform": "beatport",
        })))
        .mount(&server)
        .await;

    server
}

fn app(server: &MockServer) -> App {
    let mut config = AdminConfig::default();
    config.api.base_url = server.uri();
    config.detection.chunk_delay_ms = 10;
    config.view.page_size = 2;
    App::new(config).unwrap()
}

#[tokio::test]
async fn test_list_first_page() {
    let server = server().await;
    let out = app(&server).list(None, 0, None).await.unwrap();

    assert!(out.contains("(2) =="));
    assert!(out.contains("Fisher - Losing It (pending detection)"));
    assert!(!out.contains("Anyma"));
    assert!(out.ends_with("Page 1 of 2 (2 of 3 items)\n"));
}

#[tokio::test]
async fn test_list_infinite_second_reveal() {
    let server = server().await;
    let out = app(&server)
        .list(None, 1, Some(PageMode::Infinite))
        .await
        .unwrap();

    assert!(out.contains("Anyma - Eternity (Extended Mix)"));
    assert!(out.ends_with("Showing 3 of 3 items\n"));
}

#[tokio::test]
async fn test_detect_all_pending() {
    let server = server().await;
    let summary = app(&server).detect(None, None).await.unwrap();

    assert_eq!(summary.requested, 3);
    assert_eq!(summary.detected, 3);
    assert_eq!(summary.chunks, 1);
}

#[tokio::test]
async fn test_detect_single_key() {
    let server = server().await;
    Mock::given(method("POST"))
        .and(path("/api/storage/detect-style"))
        .and(body_partial_json(serde_json::json!({
            "fileKey": "house/Fisher - Losing It.mp3"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "detection": {
                "style": "Tech House",
                "label": "Catch & Release",
                "confidence": 0.95
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let summary = app(&server)
        .detect(None, Some("house/Fisher - Losing It.mp3"))
        .await
        .unwrap();
    assert_eq!(summary.detected, 1);
}

#[tokio::test]
async fn test_import_folder_with_label_override() {
    let server = server().await;
    Mock::given(method("POST"))
        .and(path("/api/storage/import"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "2 tracks imported",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = app(&server)
        .import(ImportRequest {
            folder: Some("house".into()),
            label: Some("Toolroom".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(report.imported, 2);

    let requests = server.received_requests().await.unwrap();
    let commit = requests
        .iter()
        .find(|r| r.url.path() == "/api/storage/import" && r.method.to_string() == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&commit.body).unwrap();
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    for file in files {
        assert_eq!(file["pool"], "Toolroom");
        assert_eq!(file["style"], "Tech House");
        assert!(file["aiConfidence"].is_null());
    }
}

#[tokio::test]
async fn test_import_requires_one_selector() {
    let server = server().await;
    let err = app(&server)
        .import(ImportRequest {
            all: true,
            folder: Some("house".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AdminError>(),
        Some(AdminError::Arguments(_))
    ));
}

#[tokio::test]
async fn test_delete() {
    let server = server().await;
    Mock::given(method("POST"))
        .and(path("/api/storage/delete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "1 file deleted",
            "deleted": 1,
        })))
        .mount(&server)
        .await;

    let removed = app(&server)
        .delete(None, &["techno/Anyma - Eternity (Extended Mix).mp3".to_string()])
        .await
        .unwrap();
    assert_eq!(removed, 1);
}

#[tokio::test]
async fn test_tracks_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tracks"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "tracks": [
                {
                    "id": 12,
                    "songName": "Losing It",
                    "artist": "Fisher",
                    "style": "Tech House",
                    "version": null,
                    "pool": "Catch & Release",
                    "imageUrl": null,
                    "downloadUrl": "https://cdn.example.com/12.mp3",
                    "releaseDate": null,
                    "createdAt": "2023-01-10T15:00:00Z"
                }
            ],
            "total": 5
        })))
        .mount(&server)
        .await;

    let out = app(&server).tracks(1, None).await.unwrap();
    assert!(out.contains("#12 Fisher - Losing It [Tech House] / Catch & Release"));
    assert!(out.ends_with("Page 1 of 3 (5 tracks)\n"));
}

fn catalog_track(id: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "songName": format!("Song {id}"),
        "artist": "Fisher",
        "style": "Tech House",
        "pool": "Catch & Release",
        "createdAt": "2023-01-10T15:00:00Z"
    })
}

#[tokio::test]
async fn test_tracks_infinite_accumulates_pages() {
    let server = MockServer::start().await;
    for (page, ids) in [("1", vec![1, 2]), ("2", vec![3])] {
        let tracks: Vec<_> = ids.into_iter().map(catalog_track).collect();
        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .and(query_param("page", page))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tracks": tracks,
                "total": 3
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let out = app(&server)
        .tracks(2, Some(PageMode::Infinite))
        .await
        .unwrap();
    assert!(out.contains("#1 Fisher - Song 1"));
    assert!(out.contains("#3 Fisher - Song 3"));
    assert!(out.ends_with("Showing 3 of 3 tracks\n"));
}
