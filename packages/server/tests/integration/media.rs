use serde_json::json;

use crate::common::{BASE_URL, TestApp, routes};

#[tokio::test]
async fn stored_thumbnail_resolves_to_proxy_and_streams() {
    let app = TestApp::spawn().await;
    app.store("thumbnails/regression.jpg", b"JPEG").await;

    let res = app
        .post(
            routes::MEDIA_URLS,
            &json!({ "thumbnail": "thumbnails/regression.jpg" }),
        )
        .await;

    assert_eq!(res.status, 200);
    let url = res.body["thumbnail_url"].as_str().unwrap();
    assert_eq!(url, format!("{BASE_URL}/storage/thumbnails/regression.jpg"));

    // The resolved URL is served by the proxy.
    let served = app.get(url.strip_prefix(BASE_URL).unwrap()).await;
    assert_eq!(served.status, 200);
    assert_eq!(served.bytes, b"JPEG");
}

#[tokio::test]
async fn public_file_wins_over_storage() {
    let app = TestApp::spawn().await;
    app.publish("images/logo.png", b"public");
    app.store("images/logo.png", b"stored").await;

    let res = app
        .post(
            routes::MEDIA_URLS,
            &json!({ "thumbnail": "app/public/images/logo.png" }),
        )
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(
        res.body["thumbnail_url"],
        format!("{BASE_URL}/images/logo.png")
    );
}

#[tokio::test]
async fn video_post_urls() {
    let app = TestApp::spawn().await;
    app.store("thumbnails/talk.jpg", b"JPEG").await;
    app.store("videos/talk.mp4", b"MP4").await;

    let res = app
        .post(
            routes::MEDIA_URLS,
            &json!({
                "thumbnail": "/storage/thumbnails/talk.jpg",
                "media_type": "video",
                "video_path": "public/videos/talk.mp4",
            }),
        )
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["is_video"], true);
    assert_eq!(
        res.body["video_stream_url"],
        format!("{BASE_URL}/storage/videos/talk.mp4")
    );
    assert_eq!(res.body["video_embed_url"], serde_json::Value::Null);
    // No OG image: falls back to the thumbnail.
    assert_eq!(
        res.body["og_image_url"],
        format!("{BASE_URL}/storage/thumbnails/talk.jpg")
    );
}

#[tokio::test]
async fn hosted_video_is_embedded() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::MEDIA_URLS,
            &json!({
                "media_type": "video",
                "external_video_url": "https://vimeo.com/76979871",
            }),
        )
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(
        res.body["video_embed_url"],
        "https://player.vimeo.com/video/76979871"
    );
    assert_eq!(res.body["video_stream_url"], serde_json::Value::Null);
}

#[tokio::test]
async fn missing_and_empty_references_are_null() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::MEDIA_URLS,
            &json!({ "thumbnail": "thumbnails/missing.jpg", "og_image": "" }),
        )
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["thumbnail_url"], serde_json::Value::Null);
    assert_eq!(res.body["og_image_url"], serde_json::Value::Null);
    assert_eq!(res.body["is_video"], false);
}
