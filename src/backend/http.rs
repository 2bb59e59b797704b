use tokio::sync::mpsc::UnboundedReceiver;

use super::client::BackendClient;
use super::interface::{Engine, EngineHandle, Event, Request};

/// The real engine: posts to the backend over HTTP.
pub struct HttpEngine {
    client: BackendClient,
}

impl HttpEngine {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

impl Engine for HttpEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        let handle = EngineHandle::new(tx);
        let _ = std::thread::Builder::new()
            .name("issuemyst-engine".to_owned())
            .spawn(move || {
                let rt = tokio::runtime::Runtime::new().expect("tokio runtime init");
                rt.block_on(self.run_loop(rx));
            });
        handle
    }
}

impl HttpEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        while let Some(req) = rx.recv().await {
            match req {
                Request::FetchRandomIssue {
                    seq,
                    repo,
                    reply_tx,
                } => {
                    // Overlapping submissions run side by side; the UI keeps
                    // only the reply whose seq is the latest.
                    let client = self.client.clone();
                    tokio::spawn(async move {
                        let result = client.fetch_random_issue(&repo).await;
                        if let Err(ref e) = result {
                            tracing::debug!("engine: FetchRandomIssue[{seq}] {repo} error: {e:?}");
                        }
                        let _ = reply_tx.send(Event::resolved(seq, result));
                    });
                }
                Request::Shutdown => break,
            }
        }
        tracing::debug!("engine: shutting down");
    }
}
