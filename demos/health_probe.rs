//! Probe a render server and a dead address side by side.

use rfrender::{Client, ClientConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = ClientConfig { timeout_ms: 2_000 };

    // Serve a healthy endpoint locally so the example is self-contained
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();
    std::thread::spawn(move || {
        if let Ok(req) = server.recv() {
            let _ = req.respond(tiny_http::Response::from_string("ok"));
        }
    });

    let live = Client::new(&format!("http://{}", addr), cfg.clone())?;
    let dead = Client::new("http://127.0.0.1:9", cfg)?;

    let (a, b) = tokio::join!(live.health(), dead.health());
    println!("{} -> {}", live.base_url(), if a { "healthy" } else { "unhealthy" });
    println!("{} -> {}", dead.base_url(), if b { "healthy" } else { "unhealthy" });

    Ok(())
}
