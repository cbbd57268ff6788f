use std::time::Duration;

use async_trait::async_trait;

use super::{AsyncTransport, BlockingTransport, Request, Response, SessionOptions};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Respond(Response),
    Timeout,
    Refused,
}

/// Records every request and session transition, answers with a fixed reply.
#[derive(Debug)]
pub(crate) struct StubTransport {
    reply: Reply,
    open: bool,
    pub(crate) opens: usize,
    pub(crate) closes: usize,
    pub(crate) requests: Vec<Request>,
    pub(crate) options: Option<SessionOptions>,
}

impl StubTransport {
    pub(crate) fn new(reply: Reply) -> Self {
        Self {
            reply,
            open: false,
            opens: 0,
            closes: 0,
            requests: Vec::new(),
            options: None,
        }
    }

    pub(crate) fn json(status: u16, body: &str) -> Self {
        Self::new(Reply::Respond(Response {
            status,
            body: body.to_string(),
        }))
    }

    pub(crate) fn ok() -> Self {
        Self::json(200, "{}")
    }

    pub(crate) fn last(&self) -> &Request {
        self.requests.last().expect("no request recorded")
    }

    fn open_session(&mut self, options: &SessionOptions) -> Result<()> {
        self.open = true;
        self.opens += 1;
        self.options = Some(*options);
        Ok(())
    }

    fn close_session(&mut self) {
        if self.open {
            self.open = false;
            self.closes += 1;
        }
    }

    fn answer(&mut self, request: &Request) -> Result<Response> {
        assert!(self.open, "request sent on a closed session");
        self.requests.push(request.clone());
        match &self.reply {
            Reply::Respond(resp) => Ok(resp.clone()),
            Reply::Timeout => Err(Error::Timeout(
                self.options.map(|o| o.timeout).unwrap_or(Duration::ZERO),
            )),
            Reply::Refused => Err(Error::Transport("connection refused".to_string())),
        }
    }
}

#[async_trait]
impl AsyncTransport for StubTransport {
    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self, options: &SessionOptions) -> Result<()> {
        self.open_session(options)
    }

    fn close(&mut self) {
        self.close_session();
    }

    async fn send(&mut self, request: &Request) -> Result<Response> {
        self.answer(request)
    }
}

impl BlockingTransport for StubTransport {
    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self, options: &SessionOptions) -> Result<()> {
        self.open_session(options)
    }

    fn close(&mut self) {
        self.close_session();
    }

    fn send(&mut self, request: &Request) -> Result<Response> {
        self.answer(request)
    }
}
