use std::{fs, net::TcpListener, path::Path};

use kafka_relay::static_server;
use reqwest::StatusCode;
use tempfile::TempDir;
use tokio::{sync::oneshot, task::JoinHandle};

struct TestServer {
    base_url: String,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<kafka_relay::Result<()>>,
}

impl TestServer {
    fn start(root: &Path) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (stop, stopped) = oneshot::channel::<()>();

        let handle = tokio::spawn(static_server::serve(
            listener,
            root.to_path_buf(),
            async move {
                let _ = stopped.await;
            },
        ));

        Self {
            base_url,
            stop,
            handle,
        }
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::get(format!("{}{path}", self.base_url)).await.unwrap()
    }

    async fn stop(self) {
        self.stop.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

fn site() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("index.html"), "<h1>video</h1>").unwrap();
    fs::create_dir(root.path().join("media")).unwrap();
    fs::write(root.path().join("media/clip.bin"), [0u8, 159, 146, 150, 255]).unwrap();
    root
}

#[tokio::test]
async fn serves_known_file_bytes() {
    let root = site();
    let server = TestServer::start(root.path());

    let response = server.get("/media/clip.bin").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.bytes().await.unwrap().as_ref(),
        [0u8, 159, 146, 150, 255]
    );

    server.stop().await;
}

#[tokio::test]
async fn serves_index_for_root() {
    let root = site();
    let server = TestServer::start(root.path());

    let response = server.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(response.text().await.unwrap(), "<h1>video</h1>");

    server.stop().await;
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let root = site();
    let server = TestServer::start(root.path());

    let response = server.get("/does-not-exist.mp4").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn files_outside_root_are_not_served() {
    let parent = site();
    fs::write(parent.path().join("secret.txt"), "hidden").unwrap();
    let public = parent.path().join("media");
    let server = TestServer::start(&public);

    let response = server.get("/../secret.txt").await;

    assert_ne!(response.status(), StatusCode::OK);

    server.stop().await;
}

#[tokio::test]
async fn dotfiles_are_not_found() {
    let root = site();
    fs::write(root.path().join(".env"), "KAFKA_KEY=secret").unwrap();
    fs::create_dir(root.path().join(".git")).unwrap();
    fs::write(root.path().join(".git/config"), "[remote]").unwrap();
    let server = TestServer::start(root.path());

    for path in ["/.env", "/.git/config", "/%2Eenv"] {
        let response = server.get(path).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
        assert!(!response.text().await.unwrap().contains("secret"));
    }

    server.stop().await;
}

#[tokio::test]
async fn non_read_methods_are_not_found() {
    let root = site();
    let server = TestServer::start(root.path());
    let client = reqwest::Client::new();

    let post = client
        .post(format!("{}/index.html", server.base_url))
        .send()
        .await
        .unwrap();
    let delete = client
        .delete(format!("{}/index.html", server.base_url))
        .send()
        .await
        .unwrap();
    let head = client
        .head(format!("{}/index.html", server.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(post.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    assert_eq!(head.status(), StatusCode::OK);

    server.stop().await;
}
