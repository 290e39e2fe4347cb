//! Runs controller commands off the UI thread.
//!
//! Commands are spawned on a small tokio runtime; their results come back
//! over a channel that the event loop drains between key presses.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::controller::{Command, Completion};
use crate::transport::ReportTransport;

/// Executes [`Command`]s and collects their [`Completion`]s.
pub struct Dispatcher {
    runtime: Runtime,
    transport: Arc<dyn ReportTransport>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl Dispatcher {
    /// Starts the runtime backing the dispatcher.
    pub fn new(transport: Arc<dyn ReportTransport>) -> io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("berichtform-io")
            .enable_all()
            .build()?;
        let (sender, receiver) = mpsc::channel();
        Ok(Self {
            runtime,
            transport,
            sender,
            receiver,
        })
    }

    /// Spawns `command`; its completion shows up in [`Dispatcher::poll`].
    pub fn dispatch(&self, command: Command) {
        let transport = Arc::clone(&self.transport);
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let completion = match command {
                Command::Submit(request) => Completion::Submitted(transport.submit(request).await),
                Command::FetchStatus { action } => {
                    Completion::Status(transport.fetch_status(action).await)
                }
            };
            if sender.send(completion).is_err() {
                debug!("completion dropped, dispatcher is gone");
            }
        });
    }

    /// Returns every completion that arrived since the last call.
    pub fn poll(&self) -> Vec<Completion> {
        self.receiver.try_iter().collect()
    }

    /// Blocks until the next completion arrives or `timeout` passes.
    #[cfg(test)]
    pub(crate) fn wait(&self, timeout: std::time::Duration) -> Option<Completion> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;

    use futures::FutureExt;
    use futures::future::{self, BoxFuture};

    use crate::transport::{
        ReportTransport, StatusReport, SubmitReply, SubmitRequest, TransportError,
    };

    /// Answers every request with a canned reply and records what it saw.
    #[derive(Debug, Default)]
    pub(crate) struct FakeTransport {
        pub(crate) reply: Option<SubmitReply>,
        pub(crate) amts: Vec<String>,
        pub(crate) submitted: Mutex<Vec<SubmitRequest>>,
    }

    impl FakeTransport {
        pub(crate) fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Some(SubmitReply {
                    status,
                    body: body.into(),
                }),
                ..Self::default()
            }
        }
    }

    impl ReportTransport for FakeTransport {
        fn submit(
            &self,
            request: SubmitRequest,
        ) -> BoxFuture<'static, Result<SubmitReply, TransportError>> {
            self.submitted.lock().unwrap().push(request.clone());
            let result = match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(TransportError::InvalidUrl {
                    action: request.action,
                    reason: "unreachable".into(),
                }),
            };
            future::ready(result).boxed()
        }

        fn fetch_status(
            &self,
            _action: String,
        ) -> BoxFuture<'static, Result<StatusReport, TransportError>> {
            future::ready(Ok(StatusReport {
                amts: self.amts.clone(),
            }))
            .boxed()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::fake::FakeTransport;
    use super::*;
    use crate::transport::SubmitRequest;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn request() -> SubmitRequest {
        SubmitRequest {
            action: "https://example.org/bericht".into(),
            method: "POST".into(),
            accept: "text/plain",
            fields: vec![("Amt".into(), "Finanzen".into())],
        }
    }

    #[test]
    fn poll_without_work_is_empty() {
        let dispatcher = Dispatcher::new(Arc::new(FakeTransport::default())).unwrap();
        assert!(dispatcher.poll().is_empty());
    }

    #[test]
    fn submit_completes_with_reply() {
        let transport = Arc::new(FakeTransport::replying(200, "OK"));
        let dispatcher = Dispatcher::new(transport.clone()).unwrap();
        dispatcher.dispatch(Command::Submit(request()));
        match dispatcher.wait(TIMEOUT) {
            Some(Completion::Submitted(Ok(reply))) => assert_eq!(reply.body, "OK"),
            other => panic!("unexpected completion: {other:?}"),
        }
        assert_eq!(transport.submitted.lock().unwrap().len(), 1);
    }

    #[test]
    fn submit_failure_is_reported() {
        let dispatcher = Dispatcher::new(Arc::new(FakeTransport::default())).unwrap();
        dispatcher.dispatch(Command::Submit(request()));
        assert!(matches!(
            dispatcher.wait(TIMEOUT),
            Some(Completion::Submitted(Err(_)))
        ));
    }

    #[test]
    fn status_completes_with_report() {
        let transport = FakeTransport {
            amts: vec!["Presse".into()],
            ..FakeTransport::default()
        };
        let dispatcher = Dispatcher::new(Arc::new(transport)).unwrap();
        dispatcher.dispatch(Command::FetchStatus {
            action: "https://example.org/bericht".into(),
        });
        match dispatcher.wait(TIMEOUT) {
            Some(Completion::Status(Ok(report))) => assert_eq!(report.amts, vec!["Presse"]),
            other => panic!("unexpected completion: {other:?}"),
        }
    }
}
