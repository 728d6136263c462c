//! Test doubles for the enumeration collaborators.
//!
//! Scripted clients, a recording progress sink and an in-memory session, so
//! enumeration can be exercised without AWS.

use crate::aws::error::{classify_api_error, ApiError};
use crate::progress::Progress;
use crate::resource::{Category, ClientFactory, LightsailApi};
use crate::session::Session;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

#[derive(Debug, Clone)]
enum Script {
    Pages(Vec<Value>),
    AccessDenied,
    Fail(u16, String),
}

/// A region-scoped client returning scripted responses.
///
/// Each call for a category returns the next scripted page; calling past the
/// last page, or for an unscripted category, is a service error. Clones share
/// the call log.
#[derive(Debug, Clone)]
pub struct StubClient {
    region: String,
    scripts: HashMap<Category, Script>,
    calls: Rc<RefCell<Vec<(Category, Option<String>)>>>,
}

impl StubClient {
    pub fn new(region: &str) -> Self {
        Self {
            region: region.to_string(),
            scripts: HashMap::new(),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_pages(mut self, category: Category, pages: Vec<Value>) -> Self {
        self.scripts.insert(category, Script::Pages(pages));
        self
    }

    pub fn with_access_denied(mut self, category: Category) -> Self {
        self.scripts.insert(category, Script::AccessDenied);
        self
    }

    pub fn with_error(mut self, category: Category, status: u16, code: &str) -> Self {
        self.scripts
            .insert(category, Script::Fail(status, code.to_string()));
        self
    }

    /// Every `(category, page_token)` this client was called with
    pub fn calls(&self) -> Vec<(Category, Option<String>)> {
        self.calls.borrow().clone()
    }
}

impl LightsailApi for StubClient {
    fn region(&self) -> &str {
        &self.region
    }

    async fn get_page(
        &self,
        category: Category,
        page_token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let previous = self
            .calls
            .borrow()
            .iter()
            .filter(|(c, _)| *c == category)
            .count();
        self.calls
            .borrow_mut()
            .push((category, page_token.map(|s| s.to_string())));

        match self.scripts.get(&category) {
            Some(Script::Pages(pages)) => pages.get(previous).cloned().ok_or_else(|| {
                classify_api_error(400, Some("InvalidInputException"), Some("no such page"))
            }),
            Some(Script::AccessDenied) => Err(classify_api_error(
                400,
                Some("AccessDeniedException"),
                Some("not authorized"),
            )),
            Some(Script::Fail(status, code)) => {
                Err(classify_api_error(*status, Some(code), Some("scripted failure")))
            }
            None => Err(classify_api_error(
                500,
                Some("InternalFailure"),
                Some("no scripted response"),
            )),
        }
    }
}

/// Hands out the scripted client registered for each region
#[derive(Debug, Clone, Default)]
pub struct StubFactory {
    clients: HashMap<String, StubClient>,
}

impl StubFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client: StubClient) -> Self {
        self.clients.insert(client.region.clone(), client);
        self
    }

    pub fn client(&self, region: &str) -> Option<&StubClient> {
        self.clients.get(region)
    }
}

impl ClientFactory for StubFactory {
    type Client = StubClient;

    fn client_for(&self, region: &str) -> StubClient {
        self.clients
            .get(region)
            .cloned()
            .unwrap_or_else(|| StubClient::new(region))
    }
}

/// Records every diagnostic as a short string
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: RefCell<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn push(&self, event: String) {
        self.events.borrow_mut().push(event);
    }
}

impl Progress for RecordingProgress {
    fn region_started(&self, region: &str) {
        self.push(format!("region {region}"));
    }

    fn category_started(&self, region: &str, category: Category) {
        self.push(format!("start {region} {category}"));
    }

    fn category_finished(&self, region: &str, category: Category, count: usize) {
        self.push(format!("found {region} {category} {count}"));
    }

    fn access_denied(&self, region: &str, category: Category, _error: &ApiError) {
        self.push(format!("denied {region} {category}"));
    }

    fn category_failed(&self, region: &str, category: Category, _error: &ApiError) {
        self.push(format!("failed {region} {category}"));
    }

    fn completed(&self, module: &str) {
        self.push(format!("completed {module}"));
    }
}

/// Session kept in memory
#[derive(Debug, Default)]
pub struct MemorySession {
    pub data: BTreeMap<String, Value>,
}

impl Session for MemorySession {
    fn update(&mut self, key: &str, value: Value) -> anyhow::Result<()> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }
}
