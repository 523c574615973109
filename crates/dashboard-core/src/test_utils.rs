//! Test helpers: a scripted transport and a local executor.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;

use crate::service::{ServiceError, TigApiService, Transport};

type Response = Result<serde_json::Value, ServiceError>;

#[derive(Default)]
struct Script {
    responses: HashMap<String, VecDeque<Response>>,
    calls: HashMap<String, usize>,
}

/// Transport answering from per-path queues of canned responses.
#[derive(Clone, Default)]
pub struct FakeTransport {
    script: Rc<RefCell<Script>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, response: Response) {
        self.script
            .borrow_mut()
            .responses
            .entry(path.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn calls(&self, path: &str) -> usize {
        self.script.borrow().calls.get(path).copied().unwrap_or(0)
    }
}

impl Transport for FakeTransport {
    fn fetch(&self, path: &str) -> LocalBoxFuture<'static, Response> {
        let response = {
            let mut script = self.script.borrow_mut();
            *script.calls.entry(path.to_string()).or_default() += 1;
            script
                .responses
                .get_mut(path)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| Err(ServiceError::Transport(format!("no response for {path}"))))
        };
        Box::pin(async move { response })
    }
}

pub type TestService = TigApiService<FakeTransport, LocalSpawner>;

pub fn service_with_pool(transport: FakeTransport) -> (TestService, LocalPool) {
    let pool = LocalPool::new();
    let service = TigApiService::new(transport, pool.spawner());
    (service, pool)
}
