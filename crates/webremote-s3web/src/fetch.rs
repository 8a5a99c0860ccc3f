//! Metadata document retrieval.
//!
//! One GET against `<location>/titan` per call. No retries, redirects,
//! timeouts, or authentication: the result is whatever the server answered
//! first.

use std::io::Read;

use webremote_core::{RemoteError, Result};

use crate::location::Location;

/// Name of the metadata document below the location root.
pub const METADATA_FILE: &str = "titan";

/// Boxed error produced by a transport.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Status line and body of an HTTP response.
pub struct HttpResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Read + Send + 'static) -> Self {
        HttpResponse {
            status,
            body: Box::new(body),
        }
    }
}

/// Issues a single HTTP GET.
///
/// Any `Fn(&str) -> Result<HttpResponse, BoxError>` is a transport, which is
/// how tests script server behavior.
pub trait HttpTransport: Send + Sync {
    fn get(&self, address: &str) -> std::result::Result<HttpResponse, BoxError>;
}

impl<F> HttpTransport for F
where
    F: Fn(&str) -> std::result::Result<HttpResponse, BoxError> + Send + Sync,
{
    fn get(&self, address: &str) -> std::result::Result<HttpResponse, BoxError> {
        self(address)
    }
}

/// Blocking `reqwest` transport.
///
/// Builds a fresh client per request with redirects disabled and no
/// timeout, so nothing is pooled between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransport;

impl HttpTransport for ReqwestTransport {
    fn get(&self, address: &str) -> std::result::Result<HttpResponse, BoxError> {
        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(None::<std::time::Duration>)
            .pool_max_idle_per_host(0)
            .build()?;
        let response = client.get(address).send()?;
        Ok(HttpResponse::new(response.status().as_u16(), response))
    }
}

/// Outcome of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The remote has no metadata document yet.
    NotFound,
    /// The full document body.
    Found(Vec<u8>),
}

/// Fetches the metadata document for a location.
#[derive(Debug, Clone, Default)]
pub struct Fetcher<T> {
    transport: T,
}

impl<T: HttpTransport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Fetcher { transport }
    }

    /// GET `<location>/titan`.
    ///
    /// A 404 is [`FetchOutcome::NotFound`]. Any other status of 300 or above
    /// is [`RemoteError::Remote`] carrying the drained body.
    pub fn fetch(&self, location: &Location) -> Result<FetchOutcome> {
        let address = location.join(METADATA_FILE);
        tracing::debug!(%address, "fetching commit metadata");

        let mut response = self
            .transport
            .get(&address)
            .map_err(|e| RemoteError::TransportFailure {
                address: address.clone(),
                detail: e.to_string(),
            })?;

        let status = response.status;
        if status == 404 {
            tracing::debug!(%address, "no metadata document");
            return Ok(FetchOutcome::NotFound);
        }

        let mut body = Vec::new();
        response
            .body
            .read_to_end(&mut body)
            .map_err(|e| RemoteError::TransportFailure {
                address: address.clone(),
                detail: format!("reading response body: {e}"),
            })?;

        if status >= 300 {
            return Err(RemoteError::Remote {
                address,
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        tracing::debug!(%address, status, bytes = body.len(), "fetched commit metadata");
        Ok(FetchOutcome::Found(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::Mutex;
    use std::thread;

    fn location(s: &str) -> Location {
        s.parse().unwrap()
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "test error"))
        }
    }

    #[test]
    fn requests_metadata_address() {
        let seen = Mutex::new(Vec::new());
        let fetcher = Fetcher::new(|address: &str| -> std::result::Result<HttpResponse, BoxError> {
            seen.lock().unwrap().push(address.to_string());
            Ok(HttpResponse::new(200, io::Cursor::new(b"data".to_vec())))
        });
        let outcome = fetcher.fetch(&location("http://host/path")).unwrap();
        assert_eq!(outcome, FetchOutcome::Found(b"data".to_vec()));
        drop(fetcher);
        assert_eq!(seen.into_inner().unwrap(), ["http://host/path/titan"]);
    }

    #[test]
    fn not_found_is_not_an_error() {
        let fetcher = Fetcher::new(|_: &str| -> std::result::Result<HttpResponse, BoxError> {
            Ok(HttpResponse::new(404, FailingReader))
        });
        assert_eq!(
            fetcher.fetch(&location("http://host/path")).unwrap(),
            FetchOutcome::NotFound
        );
    }

    #[test]
    fn transport_failure() {
        let fetcher = Fetcher::new(|_: &str| -> std::result::Result<HttpResponse, BoxError> {
            Err("connection refused".into())
        });
        let err = fetcher.fetch(&location("http://host/path")).unwrap_err();
        assert!(matches!(
            err,
            RemoteError::TransportFailure { address, detail }
                if address == "http://host/path/titan" && detail == "connection refused"
        ));
    }

    #[test]
    fn error_status_carries_body() {
        let fetcher = Fetcher::new(|_: &str| -> std::result::Result<HttpResponse, BoxError> {
            Ok(HttpResponse::new(400, io::Cursor::new(b"bad request".to_vec())))
        });
        let err = fetcher.fetch(&location("http://host/path")).unwrap_err();
        assert!(matches!(
            err,
            RemoteError::Remote { status: 400, body, .. } if body == "bad request"
        ));
    }

    #[test]
    fn error_body_read_failure() {
        let fetcher = Fetcher::new(|_: &str| -> std::result::Result<HttpResponse, BoxError> {
            Ok(HttpResponse::new(400, FailingReader))
        });
        let err = fetcher.fetch(&location("http://host/path")).unwrap_err();
        assert!(matches!(err, RemoteError::TransportFailure { .. }));
    }

    #[test]
    fn success_body_read_failure() {
        let fetcher = Fetcher::new(|_: &str| -> std::result::Result<HttpResponse, BoxError> {
            Ok(HttpResponse::new(200, FailingReader))
        });
        let err = fetcher.fetch(&location("http://host/path")).unwrap_err();
        assert!(matches!(err, RemoteError::TransportFailure { .. }));
    }

    /// Serve one canned HTTP response on a local port and return the
    /// request line the client sent.
    fn serve_once(response: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header == "\r\n" || header.is_empty() {
                    break;
                }
            }
            let mut stream = stream;
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request_line.trim_end().to_string()
        });
        (format!("http://127.0.0.1:{port}/bucket"), handle)
    }

    #[test]
    fn reqwest_fetches_document() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 11\r\nConnection: close\r\n\r\n{\"id\":\"a\"}\n",
        );
        let fetcher = Fetcher::new(ReqwestTransport);
        let outcome = fetcher.fetch(&location(&base)).unwrap();
        assert_eq!(outcome, FetchOutcome::Found(b"{\"id\":\"a\"}\n".to_vec()));
        assert_eq!(server.join().unwrap(), "GET /bucket/titan HTTP/1.1");
    }

    #[test]
    fn reqwest_not_found() {
        let (base, server) =
            serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let fetcher = Fetcher::new(ReqwestTransport);
        assert_eq!(fetcher.fetch(&location(&base)).unwrap(), FetchOutcome::NotFound);
        server.join().unwrap();
    }

    #[test]
    fn reqwest_does_not_follow_redirects() {
        let (base, server) = serve_once(
            "HTTP/1.1 302 Found\r\nLocation: http://127.0.0.1:1/elsewhere\r\nContent-Length: 5\r\nConnection: close\r\n\r\nmoved",
        );
        let fetcher = Fetcher::new(ReqwestTransport);
        let err = fetcher.fetch(&location(&base)).unwrap_err();
        assert!(matches!(
            err,
            RemoteError::Remote { status: 302, body, .. } if body == "moved"
        ));
        server.join().unwrap();
    }

    #[test]
    fn reqwest_connection_refused() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let fetcher = Fetcher::new(ReqwestTransport);
        let err = fetcher
            .fetch(&location(&format!("http://127.0.0.1:{port}/bucket")))
            .unwrap_err();
        assert!(matches!(err, RemoteError::TransportFailure { .. }));
    }
}
