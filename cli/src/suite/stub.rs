//! Loopback HTTP stub for running cases without a live Petstore.

use petstore_core::{ApiClient, Settings, SettingsOverrides};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// Request line of one served request, e.g. `DELETE /v2/pet/42`.
pub type Seen = Arc<Mutex<Vec<String>>>;

/// Answers `expected` requests with `route(method, target)` and returns a
/// client pointed at the stub.
pub fn serve<F>(expected: usize, route: F) -> (ApiClient, Seen)
where
    F: Fn(&str, &str) -> (u16, String) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);

    thread::spawn(move || {
        for stream in listener.incoming().take(expected) {
            let mut stream = stream.unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let mut parts = line.split_whitespace();
            let method = parts.next().unwrap_or_default().to_string();
            let target = parts.next().unwrap_or_default().to_string();

            let mut length = 0usize;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                let header = header.trim_end();
                if header.is_empty() {
                    break;
                }
                if let Some((k, v)) = header.split_once(':') {
                    if k.trim().eq_ignore_ascii_case("content-length") {
                        length = v.trim().parse().unwrap_or(0);
                    }
                }
            }
            let mut body = vec![0u8; length];
            reader.read_exact(&mut body).unwrap();

            let (status, payload) = route(&method, &target);
            log.lock().unwrap().push(format!("{} {}", method, target));

            let response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                payload.len(),
                payload
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
    });

    let settings = Settings::default().with_overrides(&SettingsOverrides {
        base_url: Some(format!("http://{}/v2", addr)),
        api_key: None,
    });
    (ApiClient::from_settings(&settings, None), seen)
}
