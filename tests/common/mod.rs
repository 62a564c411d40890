//! Tiny mock render server shared by the integration tests

#![allow(dead_code)]

use std::io::{Cursor, Read};
use std::sync::mpsc;
use tiny_http::{Header, Response, Server};

/// What the mock server saw for one request
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

pub type MockResponse = Response<Cursor<Vec<u8>>>;

/// Serve every request on an ephemeral port with `handler`. Returns the
/// base URL and a channel receiving each captured request.
pub fn serve<F>(handler: F) -> (String, mpsc::Receiver<Captured>)
where
    F: Fn(&Captured) -> MockResponse + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").unwrap();
    let base = format!("http://{}", server.server_addr());
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let captured = Captured {
                method: request.method().to_string(),
                path: request.url().to_string(),
                content_type: request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Content-Type"))
                    .map(|h| h.value.as_str().to_string()),
                body,
            };
            let response = handler(&captured);
            let _ = tx.send(captured);
            let _ = request.respond(response);
        }
    });

    (base, rx)
}

pub fn json_response(status: u16, body: &str) -> MockResponse {
    Response::from_string(body)
        .with_status_code(status)
        .with_header("Content-Type: application/json".parse::<Header>().unwrap())
}

pub fn bytes_response(status: u16, body: &[u8]) -> MockResponse {
    Response::from_data(body.to_vec()).with_status_code(status)
}

/// A base URL nothing is listening on
pub fn refused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
