use docask::api::{DocsApi, DocsClient};
use docask::error::DocAskError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Serve the given (status, body) responses, one per connection, on an
/// ephemeral port. Responses carry Connection: close so reqwest reconnects
/// for every call.
async fn spawn_server(responses: Vec<(u16, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;

            let reason = match status {
                200 => "OK",
                404 => "Not Found",
                500 => "Internal Server Error",
                _ => "Unknown",
            };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
    });

    format!("http://{}", addr)
}

/// Read a full HTTP request (headers plus any Content-Length body) before
/// answering, so the client never sees a reset mid-write.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = find_header_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..header_end]);
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);

            if buf.len() >= header_end + 4 + content_length {
                return;
            }
        }
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn client(base: &str) -> DocsClient {
    DocsClient::new(base, base, 5, false).unwrap()
}

#[tokio::test]
async fn create_conversation_returns_id_from_envelope() {
    let base = spawn_server(vec![(
        200,
        r#"{"success": true, "result": {"conversationId": "abc"}}"#.to_string(),
    )])
    .await;

    let id = client(&base)
        .create_conversation("how do I start?")
        .await
        .unwrap();
    assert_eq!(id, "abc");
}

#[tokio::test]
async fn create_conversation_failure_envelope_is_an_api_error() {
    let base = spawn_server(vec![(
        200,
        r#"{"success": false, "errorMsg": "rate limited"}"#.to_string(),
    )])
    .await;

    let err = client(&base)
        .create_conversation("how do I start?")
        .await
        .unwrap_err();
    match err {
        DocAskError::Api { envelope } => {
            assert_eq!(envelope["errorMsg"], "rate limited");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn create_conversation_http_error_is_a_transport_error() {
    let base = spawn_server(vec![(500, String::new())]).await;

    let err = client(&base)
        .create_conversation("how do I start?")
        .await
        .unwrap_err();
    match err {
        DocAskError::Transport { status, .. } => assert_eq!(status, 500),
        other => panic!("expected Transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn ask_parses_buffered_sse_body() {
    let body = concat!(
        "data: {\"data\": \"The plugin \"}\n",
        "\n",
        "data: {\"data\": \"loads at startup.\"}\n",
    );
    let base = spawn_server(vec![(200, body.to_string())]).await;

    let answer = client(&base).ask("conv-1", "when does it load?").await.unwrap();
    assert_eq!(answer, "The plugin loads at startup.");
}

#[tokio::test]
async fn recommend_degrades_to_empty_on_http_500() {
    let base = spawn_server(vec![(500, String::new())]).await;

    let questions = client(&base)
        .get_recommended_questions("https://opensumi.com/docs/intro", None)
        .await;
    assert!(questions.is_empty());
}

#[tokio::test]
async fn recommend_degrades_to_empty_when_result_is_absent() {
    let base = spawn_server(vec![(200, "{}".to_string())]).await;

    let questions = client(&base)
        .get_recommended_questions("https://opensumi.com/docs/intro", None)
        .await;
    assert!(questions.is_empty());
}

#[tokio::test]
async fn recommend_returns_result_array() {
    let base = spawn_server(vec![(200, r#"{"result": ["q1", "q2"]}"#.to_string())]).await;

    let questions = client(&base)
        .get_recommended_questions("https://opensumi.com/docs/intro", None)
        .await;
    assert_eq!(questions, vec!["q1", "q2"]);
}

#[tokio::test]
async fn history_is_idempotent_between_asks() {
    let body = r#"{
        "success": true,
        "result": {
            "conversationId": "conv-1",
            "query": "first question",
            "status": "finished",
            "createdAt": 1700000000000,
            "dialog": [
                {
                    "question": "first question",
                    "questionId": "q-1",
                    "answer": {"id": "a-1", "answer": "first answer", "messageType": "markdown"},
                    "createdAt": 1700000000001
                }
            ]
        }
    }"#;
    let base = spawn_server(vec![(200, body.to_string()), (200, body.to_string())]).await;

    let client = client(&base);
    let first = client.get_history("conv-1").await.unwrap();
    let second = client.get_history("conv-1").await.unwrap();
    assert_eq!(first.dialog, second.dialog);
    assert_eq!(first.dialog[0].answer.as_ref().unwrap().answer.as_deref(), Some("first answer"));
}

#[tokio::test]
async fn query_composes_create_and_ask() {
    // First connection creates the conversation, second streams the answer
    // with a trailing follow-up array.
    let sse_body = "data: {\"data\": \"some answer\"}\ndata: {\"data\": \"[\\\"q1\\\",\\\"q2\\\"]\"}\n";
    let base = spawn_server(vec![
        (
            200,
            r#"{"success": true, "result": {"conversationId": "conv-7"}}"#.to_string(),
        ),
        (200, sse_body.to_string()),
    ])
    .await;

    let outcome = client(&base).query("some question").await.unwrap();
    assert_eq!(outcome.conversation_id, "conv-7");
    assert_eq!(outcome.answer, "some answer");
    assert_eq!(outcome.follow_ups, vec!["q1", "q2"]);
}
