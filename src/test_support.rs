//! Dobles de prueba compartidos por los tests unitarios y los de integración.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;

use crate::services::error::ApiError;
use crate::services::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::viewmodels::UserDialogs;

type Reply = Result<HttpResponse, ApiError>;

/// Transporte con respuestas programadas por (método, URL).
///
/// La última respuesta de cada ruta se repite indefinidamente; una ruta sin
/// programar responde 404. Todos los requests quedan registrados.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: RefCell<HashMap<(HttpMethod, String), VecDeque<Reply>>>,
    requests: RefCell<Vec<HttpRequest>>,
    yield_before_reply: Cell<bool>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: HttpMethod, url: &str, status: u16, body: &str) -> &Self {
        self.push(method, url, Ok(HttpResponse::new(status, body)))
    }

    pub fn fail(&self, method: HttpMethod, url: &str, error: ApiError) -> &Self {
        self.push(method, url, Err(error))
    }

    /// Cada `send` cede el control una vez antes de responder
    pub fn yield_before_reply(&self, enabled: bool) {
        self.yield_before_reply.set(enabled);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn count(&self, method: HttpMethod, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    fn push(&self, method: HttpMethod, url: &str, reply: Reply) -> &Self {
        self.routes
            .borrow_mut()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    fn next_reply(&self, method: HttpMethod, url: &str) -> Reply {
        let mut routes = self.routes.borrow_mut();
        match routes.get_mut(&(method, url.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(not_found),
            Some(queue) => queue.front().cloned().unwrap_or_else(not_found),
            None => not_found(),
        }
    }
}

fn not_found() -> Reply {
    Ok(HttpResponse::new(404, r#"{"message":"Not Found"}"#))
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let (method, url) = (request.method, request.url.clone());
        self.requests.borrow_mut().push(request);
        if self.yield_before_reply.get() {
            YieldNow::default().await;
        }
        self.next_reply(method, &url)
    }
}

/// Future que devuelve `Pending` una sola vez
#[derive(Default)]
pub struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Diálogos con respuesta fija que registran lo mostrado
#[derive(Default)]
pub struct RecordingDialogs {
    answer: Cell<bool>,
    confirms: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
}

impl RecordingDialogs {
    pub fn answering(answer: bool) -> Self {
        let dialogs = Self::default();
        dialogs.answer.set(answer);
        dialogs
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl UserDialogs for RecordingDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer.get()
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}
