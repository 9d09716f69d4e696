use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;

fn pdfshelf_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("pdfshelf");
    path
}

/// Kills the spawned server when the test ends.
struct ServerGuard(Child);

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn setup_test_env(documents_bind: &str, thumbnails_bind: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let documents_dir = root.join("pdf_data");
    let thumbnails_dir = root.join("thumbnail_data");
    fs::create_dir_all(&documents_dir).unwrap();
    fs::create_dir_all(&thumbnails_dir).unwrap();

    fs::write(
        documents_dir.join("abc123.pdf"),
        b"%PDF-1.4\nfake pdf body for tests\n%%EOF",
    )
    .unwrap();
    fs::write(
        thumbnails_dir.join("abc123.png"),
        b"\x89PNG\r\n\x1a\nfake png body",
    )
    .unwrap();

    let config_content = format!(
        r#"[storage]
documents_dir = "{}"
thumbnails_dir = "{}"

[server]
documents_bind = "{}"
thumbnails_bind = "{}"
"#,
        documents_dir.display(),
        thumbnails_dir.display(),
        documents_bind,
        thumbnails_bind,
    );

    let config_path = root.join("pdfshelf.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn spawn_server(config_path: &Path, service: &str) -> ServerGuard {
    let child = Command::new(pdfshelf_binary())
        .arg("--config")
        .arg(config_path)
        .args(["serve", service])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn pdfshelf server");
    ServerGuard(child)
}

fn wait_ready(base_url: &str) -> reqwest::blocking::Client {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    for _ in 0..50 {
        if let Ok(resp) = client.get(format!("{}/", base_url)).send() {
            if resp.status().is_success() {
                return client;
            }
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    panic!("Server at {} did not become ready", base_url);
}

#[test]
fn document_server_serves_exact_bytes_with_headers() {
    let (_tmp, config_path) = setup_test_env("127.0.0.1:7411", "127.0.0.1:7611");
    let _server = spawn_server(&config_path, "documents");
    let client = wait_ready("http://127.0.0.1:7411");

    let resp = client.get("http://127.0.0.1:7411/abc123").send().unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    assert_eq!(
        resp.headers().get("content-disposition").unwrap(),
        "inline; filename=\"abc123.pdf\""
    );

    let expected: &[u8] = b"%PDF-1.4\nfake pdf body for tests\n%%EOF";
    assert_eq!(
        resp.headers().get("content-length").unwrap(),
        &expected.len().to_string()
    );
    assert_eq!(resp.bytes().unwrap().as_ref(), expected);
}

#[test]
fn document_server_health_reports_ok() {
    let (_tmp, config_path) = setup_test_env("127.0.0.1:7412", "127.0.0.1:7612");
    let _server = spawn_server(&config_path, "documents");
    let client = wait_ready("http://127.0.0.1:7412");

    let body: serde_json::Value = client
        .get("http://127.0.0.1:7412/")
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "PDF Data Server");
}

#[test]
fn traversal_shaped_ids_are_rejected_with_400() {
    let (_tmp, config_path) = setup_test_env("127.0.0.1:7413", "127.0.0.1:7613");
    let _server = spawn_server(&config_path, "documents");
    let client = wait_ready("http://127.0.0.1:7413");

    // Percent-encoded separators decode to `/` in the path segment and
    // must be rejected before any filesystem access.
    for bad in ["abc..123", "..%2F..%2Fetc%2Fpasswd", "a%20b", "a.pdf"] {
        let resp = client
            .get(format!("http://127.0.0.1:7413/{}", bad))
            .send()
            .unwrap();
        assert_eq!(resp.status().as_u16(), 400, "id {:?}", bad);
        let body: serde_json::Value = resp.json().unwrap();
        assert_eq!(body["error"], "Invalid ID");
    }
}

#[test]
fn missing_document_is_404_not_500() {
    let (_tmp, config_path) = setup_test_env("127.0.0.1:7414", "127.0.0.1:7614");
    let _server = spawn_server(&config_path, "documents");
    let client = wait_ready("http://127.0.0.1:7414");

    let resp = client
        .get("http://127.0.0.1:7414/does-not-exist")
        .send()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    let body: serde_json::Value = resp.json().unwrap();
    assert_eq!(body["error"], "PDF not found");
}

#[test]
fn thumbnail_server_shares_the_blob_contract() {
    let (_tmp, config_path) = setup_test_env("127.0.0.1:7415", "127.0.0.1:7615");
    let _server = spawn_server(&config_path, "thumbnails");
    let client = wait_ready("http://127.0.0.1:7615");

    let health: serde_json::Value = client
        .get("http://127.0.0.1:7615/")
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(health["message"], "Thumbnail Data Server");

    let resp = client.get("http://127.0.0.1:7615/abc123").send().unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.headers().get("content-type").unwrap(), "image/png");
    assert_eq!(
        resp.headers().get("content-disposition").unwrap(),
        "inline; filename=\"abc123.png\""
    );

    let missing = client.get("http://127.0.0.1:7615/nosuch").send().unwrap();
    assert_eq!(missing.status().as_u16(), 404);
    let body: serde_json::Value = missing.json().unwrap();
    assert_eq!(body["error"], "thumbnail not found");
}
