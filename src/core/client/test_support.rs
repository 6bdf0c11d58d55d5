//! In-memory Kubernetes client for tests.

use std::sync::{Arc, Mutex};

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use tower::service_fn;

/// Build a client backed by a canned response instead of a network
/// transport. Every request gets the same status and JSON body; the
/// requested URIs (path and query) are recorded for assertions.
pub fn mock_client(
    status: u16,
    body: serde_json::Value,
) -> (Client, Arc<Mutex<Vec<String>>>) {
    let requests: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    let service = service_fn(move |req: Request<Body>| {
        let seen = seen.clone();
        let body = body.clone();
        async move {
            seen.lock().unwrap().push(req.uri().to_string());

            let response = Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap();
            Ok::<_, std::convert::Infallible>(response)
        }
    });

    (Client::new(service, "default"), requests)
}
