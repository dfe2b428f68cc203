use dictionary::{Dictionary, DictionaryError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves one canned response and hands back the raw request it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api/v2/", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buf).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buf[..read]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });
    (base, handle)
}

#[tokio::test]
async fn sends_encoded_word_with_json_accept_header() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{"word":"ice cream","meanings":[{"partOfSpeech":"noun","definitions":[{"definition":"A frozen dessert."}]}]}]"#,
    )
    .await;
    let dict = Dictionary::with_base(&base).unwrap();

    let words = dict.get_definitions("ice cream").await.unwrap();
    assert_eq!(words[0].word, "ice cream");

    let request = server.await.unwrap().to_lowercase();
    assert!(
        request.starts_with("get /api/v2/entries/en/ice%20cream http/1.1"),
        "{request}"
    );
    assert!(request.contains("accept: application/json"), "{request}");
}

#[tokio::test]
async fn not_found_uses_server_message() {
    let (base, server) = serve_once(
        "404 Not Found",
        r#"{"title":"No Definitions Found","message":"Sorry pal...","resolution":"You can try the search again"}"#,
    )
    .await;
    let dict = Dictionary::with_base(&base).unwrap();

    let error = dict.get_definitions("qwxz").await.unwrap_err();
    assert!(matches!(error, DictionaryError::NotFound(_)));
    assert_eq!(error.to_string(), "Sorry pal...");
    server.await.unwrap();
}

#[tokio::test]
async fn empty_array_is_not_found() {
    let (base, server) = serve_once("200 OK", "[]").await;
    let dict = Dictionary::with_base(&base).unwrap();

    let error = dict.get_definitions("ocean").await.unwrap_err();
    assert_eq!(error.to_string(), "No definitions found.");
    server.await.unwrap();
}

#[tokio::test]
async fn unreachable_server_is_a_fetch_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let dict = Dictionary::with_base(&base).unwrap();

    let error = dict.get_definitions("ocean").await.unwrap_err();
    assert!(matches!(error, DictionaryError::Fetch(_)));
    assert_eq!(error.to_string(), "Failed to fetch definitions.");
}

#[test]
fn blank_base_falls_back_to_public_api() {
    let dict = Dictionary::with_base("  ").unwrap();
    assert_eq!(dict.base().as_str(), "https://api.dictionaryapi.dev/api/v2");
    assert!(matches!(
        Dictionary::with_base("::nope"),
        Err(DictionaryError::InvalidBase(_))
    ));
}
