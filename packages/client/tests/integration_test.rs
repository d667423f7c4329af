//! Integration tests for the lobby using process-based testing.

use std::io::Write;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread;
use std::time::Duration;

/// Helper struct to manage server process lifecycle
struct TestServer {
    process: Child,
    port: u16,
}

impl TestServer {
    /// Start a test server on the specified port
    fn start(port: u16) -> Self {
        let process = Command::new("cargo")
            .args([
                "run",
                "-p",
                "anzen-server",
                "--bin",
                "anzen-server",
                "--",
                "--port",
                &port.to_string(),
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to start server");

        // Give server time to start
        thread::sleep(Duration::from_millis(500));

        TestServer { process, port }
    }

    /// Get the WebSocket URL for this server
    fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    /// Get the HTTP API base URL for this server
    fn api_url(&self) -> String {
        format!("http://127.0.0.1:{}/api", self.port)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Kill the server process when the test ends
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

/// Helper struct to manage client process lifecycle
struct TestClient {
    process: Child,
    stdin: Option<ChildStdin>,
}

impl TestClient {
    /// Start a test client with the given URL and username
    fn start(url: &str, username: &str) -> Self {
        let mut process = Command::new("cargo")
            .args([
                "run",
                "-p",
                "anzen-client",
                "--bin",
                "anzen-client",
                "--",
                "--url",
                url,
                "--username",
                username,
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::piped())
            .spawn()
            .expect("Failed to start client");

        // Take stdin for sending commands
        let stdin = process.stdin.take();

        // Give client time to connect
        thread::sleep(Duration::from_millis(300));

        TestClient { process, stdin }
    }

    /// Send an input line to the client's stdin
    fn send_line(&mut self, line: &str) -> Result<(), std::io::Error> {
        if let Some(stdin) = &mut self.stdin {
            writeln!(stdin, "{}", line)?;
            stdin.flush()?;
        }
        Ok(())
    }

    /// Check if the client process is still running (not crashed)
    fn is_running(&mut self) -> bool {
        matches!(self.process.try_wait(), Ok(None))
    }
}

impl Drop for TestClient {
    fn drop(&mut self) {
        // Kill the client process when done
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

#[test]
fn test_server_starts_successfully() {
    // テスト項目: サーバーが正常に起動する
    // given (前提条件):
    let port = 18090;

    // when (操作):
    let _server = TestServer::start(port);

    // then (期待する結果):
    // Server started successfully (no panic)
    thread::sleep(Duration::from_millis(100));
    // If we reach here, the server started successfully
}

#[test]
fn test_client_connects_to_server() {
    // テスト項目: クライアントがサーバーに接続できる
    // given (前提条件):
    let port = 18091;
    let server = TestServer::start(port);

    // when (操作):
    let mut client = TestClient::start(&server.ws_url(), "alice");

    // then (期待する結果):
    thread::sleep(Duration::from_millis(200));
    assert!(client.is_running(), "Client should stay connected");
}

#[test]
fn test_multiple_clients_can_connect() {
    // テスト項目: 複数のクライアントが同時に接続できる
    // given (前提条件):
    let port = 18092;
    let server = TestServer::start(port);

    // when (操作):
    let mut client1 = TestClient::start(&server.ws_url(), "alice");
    let mut client2 = TestClient::start(&server.ws_url(), "bob");
    let mut client3 = TestClient::start(&server.ws_url(), "charlie");

    // then (期待する結果):
    thread::sleep(Duration::from_millis(200));
    assert!(
        client1.is_running() && client2.is_running() && client3.is_running(),
        "All clients should remain connected"
    );
}

#[test]
fn test_create_join_and_chat_do_not_crash() {
    // テスト項目: ルーム作成・参加・チャットの一連の操作でクラッシュしない
    // given (前提条件):
    let port = 18093;
    let server = TestServer::start(port);

    let mut host = TestClient::start(&server.ws_url(), "hana");
    thread::sleep(Duration::from_millis(300));

    // when (操作): ホストがルームを作成
    host.send_line("/create Alpha Squad 4 fire-drill")
        .expect("Failed to send create command");
    thread::sleep(Duration::from_millis(500));

    // ゲストが一覧を見る（ルーム ID はプロセス間で受け渡せないため
    // 参加そのものは usecase テストで検証している）
    let mut guest = TestClient::start(&server.ws_url(), "goro");
    guest.send_line("/rooms").expect("Failed to send rooms command");
    thread::sleep(Duration::from_millis(300));

    // ホストがチャット
    host.send_line("hello team").expect("Failed to send chat");
    thread::sleep(Duration::from_millis(300));

    // then (期待する結果):
    assert!(
        host.is_running() && guest.is_running(),
        "Both clients should remain stable during room operations"
    );

    // Note: Actual push content verification is done in unit tests;
    // this exercises the full server+client processes end to end.
}

#[tokio::test]
async fn test_http_api_health_and_rooms() {
    // テスト項目: HTTP API がヘルスチェックとルーム一覧を返す
    // given (前提条件):
    let port = 18094;
    let server = TestServer::start(port);
    tokio::time::sleep(Duration::from_millis(300)).await;

    // when (操作):
    let health = reqwest::get(format!("{}/health", server.api_url()))
        .await
        .expect("health request failed");
    assert!(health.status().is_success());
    let health_body: serde_json::Value = health.json().await.expect("health body");

    let rooms = reqwest::get(format!("{}/rooms", server.api_url()))
        .await
        .expect("rooms request failed");
    assert!(rooms.status().is_success());
    let rooms_body: serde_json::Value = rooms.json().await.expect("rooms body");

    // then (期待する結果):
    assert_eq!(health_body["status"], "ok");
    assert!(rooms_body.as_array().expect("rooms is an array").is_empty());
}

#[tokio::test]
async fn test_http_api_lists_created_room() {
    // テスト項目: クライアントが作成したルームが HTTP API の一覧に載る
    // given (前提条件):
    let port = 18095;
    let server = TestServer::start(port);
    tokio::time::sleep(Duration::from_millis(300)).await;

    let mut host = TestClient::start(&server.ws_url(), "hana");
    tokio::time::sleep(Duration::from_millis(500)).await;

    // when (操作):
    host.send_line("/create Safety First 4 evacuation")
        .expect("Failed to send create command");
    tokio::time::sleep(Duration::from_millis(800)).await;

    let rooms = reqwest::get(format!("{}/rooms", server.api_url()))
        .await
        .expect("rooms request failed");
    let rooms_body: serde_json::Value = rooms.json().await.expect("rooms body");

    // then (期待する結果):
    let rooms_array = rooms_body.as_array().expect("rooms is an array");
    assert_eq!(rooms_array.len(), 1);
    assert_eq!(rooms_array[0]["title"], "Safety First");
    assert_eq!(rooms_array[0]["hostName"], "hana");
    assert_eq!(rooms_array[0]["playerCount"], 1);
    assert_eq!(rooms_array[0]["maxPlayers"], 4);
}
