use std::sync::Arc;

use ::common::storage::memory::{MemoryDisk, MemoryUrl};
use ::common::storage::{DiskDriver, StorageDisk};

use crate::common::{TestApp, TestOptions, routes};

fn assert_not_found(res: &crate::common::TestResponse) {
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
    assert_eq!(res.body["message"], "File not found");
}

mod serving {
    use super::*;

    #[tokio::test]
    async fn streams_file_with_type_and_length() {
        let app = TestApp::spawn().await;
        app.store("images/example.txt", b"hello world").await;

        let res = app.get(&routes::storage("images/example.txt")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.header("content-type"), Some("text/plain"));
        assert_eq!(res.header("content-length"), Some("11"));
        assert_eq!(res.bytes, b"hello world");
    }

    #[tokio::test]
    async fn duplicate_slashes_are_collapsed() {
        let app = TestApp::spawn().await;
        app.store("images/example.txt", b"collapsed").await;

        let res = app.get(&routes::storage("images//example.txt")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.bytes, b"collapsed");
    }

    #[tokio::test]
    async fn percent_encoded_names_are_decoded() {
        let app = TestApp::spawn().await;
        app.store("thumbnails/My File #1.png", b"PNG").await;

        let res = app
            .get(&routes::storage("thumbnails/My%20File%20%231.png"))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.header("content-type"), Some("image/png"));
        assert_eq!(res.bytes, b"PNG");
    }

    #[tokio::test]
    async fn encoded_backslashes_act_as_separators() {
        let app = TestApp::spawn().await;
        app.store("videos/clip.mp4", b"MP4").await;

        let res = app.get(&routes::storage("videos%5Cclip.mp4")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.header("content-type"), Some("video/mp4"));
    }

    #[tokio::test]
    async fn unknown_type_falls_back_to_octet_stream() {
        let app = TestApp::spawn().await;
        app.store("exports/data.zzunknown", b"\x00\x01\x02").await;

        let res = app.get(&routes::storage("exports/data.zzunknown")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.header("content-type"), Some("application/octet-stream"));
        assert_eq!(res.bytes, b"\x00\x01\x02");
    }

    #[tokio::test]
    async fn large_file_is_streamed_whole() {
        let app = TestApp::spawn().await;
        let data: Vec<u8> = (0..2 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
        app.store("videos/large.mp4", &data).await;

        let res = app.get(&routes::storage("videos/large.mp4")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.header("content-length"), Some("2097152"));
        assert_eq!(res.bytes, data);
    }
}

mod rejection {
    use super::*;

    /// Places a file next to the storage root that traversal would reach.
    fn plant_secret(app: &TestApp) {
        std::fs::write(app.dir.path().join("storage/app/.env"), b"APP_KEY=secret")
            .expect("Failed to write secret");
        std::fs::write(app.dir.path().join(".env"), b"APP_KEY=secret")
            .expect("Failed to write secret");
    }

    #[tokio::test]
    async fn traversal_is_rejected_in_every_form() {
        let app = TestApp::spawn().await;
        plant_secret(&app);

        for raw in [
            "..%2F.env",
            "..%2F..%2F..%2F.env",
            "images%2F..%2F..%2F.env",
            "a/..%2F..%2F.env",
            "..%5C.env",
            "..%5C..%5C..%5C.env",
            "%2F..%2F.env",
            "images%2F%2F..%2F%2F.env",
        ] {
            let res = app.get(&routes::storage(raw)).await;
            assert_not_found(&res);
            assert!(
                !String::from_utf8_lossy(&res.bytes).contains("APP_KEY"),
                "{raw} leaked file contents"
            );
        }
    }

    #[tokio::test]
    async fn in_flight_uploads_are_not_served() {
        let app = TestApp::spawn().await;
        app.store("images/a.txt", b"text").await;
        let temp = app.dir.path().join("storage/app/public/.tmp");
        std::fs::create_dir_all(&temp).unwrap();
        std::fs::write(temp.join("upload-1"), b"partial upload").unwrap();

        for raw in [".tmp/upload-1", ".%74mp/upload-1", "%2E%74mp%2Fupload-1"] {
            let res = app.get(&routes::storage(raw)).await;
            assert_not_found(&res);
        }
    }

    #[tokio::test]
    async fn null_byte_is_rejected() {
        let app = TestApp::spawn().await;
        app.store("images/a.txt", b"text").await;

        let res = app.get(&routes::storage("images/a.txt%00.png")).await;

        assert_not_found(&res);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::storage("images/missing.png")).await;

        assert_not_found(&res);
    }

    #[tokio::test]
    async fn directory_is_not_served() {
        let app = TestApp::spawn().await;
        app.store("images/inside.png", b"PNG").await;

        let res = app.get(&routes::storage("images")).await;

        assert_not_found(&res);
    }

    #[tokio::test]
    async fn invalid_utf8_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::storage("images/%FF%FE.png")).await;

        assert_not_found(&res);
    }

    #[tokio::test]
    async fn unreadable_file_is_not_found() {
        let disk = Arc::new(MemoryDisk::new(DiskDriver::Local, MemoryUrl::Unavailable));
        disk.put("videos/broken.mp4", b"MP4").await.unwrap();
        disk.mark_unreadable("videos/broken.mp4");

        let app = TestApp::spawn_with(TestOptions {
            disk: Some(disk as Arc<dyn StorageDisk>),
            ..Default::default()
        })
        .await;

        let res = app.get(&routes::storage("videos/broken.mp4")).await;

        assert_not_found(&res);
    }
}
