//! Consent sub-probe: an ephemeral local HTTP listener.
//!
//! Serves a page that asks the browser for native geolocation permission.
//! On success the page issues one `POST /coords` with `{"lat": .., "lon": ..}`
//! which releases the wait. The listener is bound to an OS-assigned port on
//! loopback and is dropped before the wait returns on every path, so no
//! bound port is ever left behind.

use crate::error::{GeoError, GeoResult};
use crate::geo::Coordinates;
use serde::Deserialize;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::debug;

/// Cap on request head + body; the page only ever posts a tiny JSON object.
const MAX_REQUEST_BYTES: usize = 16 * 1024;

/// Page served at `/`. Asks for geolocation permission and posts the result
/// back to `/coords`.
const CONSENT_PAGE: &str = "<!doctype html><html><head><meta charset=\"utf-8\">\
<title>Share location</title></head><body>\
<h3>Please allow location access in the browser to share your location with the app.</h3>\
<script>function postCoords(lat,lon){fetch('/coords',{method:'POST',\
headers:{'Content-Type':'application/json'},body:JSON.stringify({lat:lat,lon:lon})})\
.then(()=>{document.body.innerHTML='<p>Location sent. You can close this tab.</p>';})\
.catch(()=>{document.body.innerHTML='<p>Failed to send.</p>';});}\
if(navigator.geolocation){navigator.geolocation.getCurrentPosition(\
function(p){postCoords(p.coords.latitude,p.coords.longitude);},\
function(e){document.body.innerHTML='<p>Permission denied or unavailable.</p>';});}\
else{document.body.innerHTML='<p>Geolocation not supported.</p>';}</script>\
</body></html>";

/// Body of a `POST /coords` request. Field order and extra fields don't
/// matter; serde ignores what it doesn't know.
#[derive(Debug, Deserialize)]
struct CoordsBody {
    lat: f64,
    lon: f64,
}

/// The short-lived local listener used to request the user's live location
/// through the browser's own permission flow.
pub struct ConsentProbe {
    listener: TcpListener,
    port: u16,
}

impl ConsentProbe {
    /// Bind an ephemeral loopback port.
    pub async fn bind() -> GeoResult<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let port = listener.local_addr()?.port();
        Ok(Self { listener, port })
    }

    /// The URL to open in the browser.
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}/", self.port)
    }

    /// The bound port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until the first valid coordinates POST arrives, bounded by
    /// `timeout`.
    ///
    /// Consumes the probe: whichever way this returns, the listener is
    /// dropped and the port is free again. POSTs arriving after the first
    /// valid one find the port closed and are thereby ignored.
    pub async fn wait_for_coords(self, timeout: Duration) -> GeoResult<Coordinates> {
        match tokio::time::timeout(timeout, self.serve()).await {
            Ok(result) => result,
            Err(_) => Err(GeoError::ConsentTimeout),
        }
    }

    /// Accept loop: one request per connection, close after responding.
    async fn serve(&self) -> GeoResult<Coordinates> {
        loop {
            let (mut stream, peer) = self.listener.accept().await?;
            match handle_connection(&mut stream).await {
                Ok(Some(coords)) => return Ok(coords),
                Ok(None) => {}
                Err(err) => debug!("Consent probe connection from {} failed: {}", peer, err),
            }
        }
    }
}

/// Read one HTTP request and answer it. Returns decoded coordinates when
/// the request was a valid `POST /coords`.
async fn handle_connection(stream: &mut TcpStream) -> GeoResult<Option<Coordinates>> {
    let (method, path, body) = read_request(stream).await?;

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => {
            write_response(stream, "200 OK", "text/html; charset=utf-8", CONSENT_PAGE).await?;
            Ok(None)
        }
        ("POST", "/coords") => {
            let decoded = serde_json::from_slice::<CoordsBody>(&body).ok();
            // Always acknowledge so the page settles; only a valid body
            // releases the wait.
            write_response(stream, "200 OK", "text/plain", "OK").await?;
            Ok(decoded.map(|c| Coordinates::new(c.lat, c.lon)))
        }
        (_, "/coords") => {
            write_response(stream, "405 Method Not Allowed", "text/plain", "").await?;
            Ok(None)
        }
        _ => {
            write_response(stream, "404 Not Found", "text/plain", "").await?;
            Ok(None)
        }
    }
}

/// Minimal HTTP/1.1 request reader: request line, headers, Content-Length
/// body. Enough for a loopback browser talking to us and nothing more.
async fn read_request(stream: &mut TcpStream) -> GeoResult<(String, String, Vec<u8>)> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        if let Some(pos) = find_head_end(&buf) {
            break pos;
        }
        if buf.len() > MAX_REQUEST_BYTES {
            return Err(protocol_error("request head too large"));
        }
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Err(protocol_error("connection closed mid-request"));
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    if content_length > MAX_REQUEST_BYTES {
        return Err(protocol_error("body too large"));
    }

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Ok((method, path, body))
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn protocol_error(reason: &str) -> GeoError {
    GeoError::ProbeIo(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        reason.to_string(),
    ))
}

async fn write_response(
    stream: &mut TcpStream,
    status: &str,
    content_type: &str,
    body: &str,
) -> GeoResult<()> {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_head_end() {
        assert_eq!(find_head_end(b"GET / HTTP/1.1\r\n\r\nrest"), Some(14));
        assert_eq!(find_head_end(b"partial\r\n"), None);
    }

    #[test]
    fn test_coords_body_ignores_order_and_extras() {
        let body: CoordsBody =
            serde_json::from_str(r#"{"accuracy":5,"lon":77.6,"lat":12.9}"#).unwrap();
        assert_eq!(body.lat, 12.9);
        assert_eq!(body.lon, 77.6);
    }

    #[test]
    fn test_coords_body_rejects_missing_fields() {
        assert!(serde_json::from_str::<CoordsBody>(r#"{"lat":12.9}"#).is_err());
        assert!(serde_json::from_str::<CoordsBody>(r#"{"lat":"x","lon":1}"#).is_err());
    }

    #[tokio::test]
    async fn test_probe_binds_distinct_ephemeral_ports() {
        let a = ConsentProbe::bind().await.unwrap();
        let b = ConsentProbe::bind().await.unwrap();
        assert_ne!(a.port(), 0);
        assert_ne!(a.port(), b.port());
        assert!(a.url().starts_with("http://127.0.0.1:"));
    }
}
