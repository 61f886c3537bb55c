//! The test runner side of mounting: where the container lives, where logs
//! and visibility assertions go, and when cleanup runs.

use crate::config::Env;
use html::{Document, DomError, NodeId};
use thiserror::Error;
use tracing::{debug, span, trace, Level};

/// Attempts a queued visibility assertion gets beyond the first one
pub const DEFAULT_RETRIES: u32 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub name: String,
    pub message: String,
}

impl LogRecord {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Runs after every test with the document and the container
pub type Hook = Box<dyn FnMut(&mut Document, NodeId)>;

/// Runs between two attempts of a visibility assertion, with the number of the
/// attempt that failed. Stands in for work the page does while the runner waits.
pub type RetryStep = Box<dyn FnMut(&mut Document, u32)>;

/// What mounting needs from a test runner
pub trait Harness {
    fn document(&self) -> &Document;
    fn document_mut(&mut self) -> &mut Document;
    /// The element mounted content is inserted into. Stable for the lifetime
    /// of the harness.
    fn container(&self) -> NodeId;
    fn env(&self) -> &Env;
    fn log(&mut self, record: LogRecord);
    /// Requests that the element be visible. The harness decides when the
    /// assertion is checked and how often it is retried.
    fn assert_visible(&mut self, element: NodeId);
    /// Registers a hook to run after each test. A second registration under
    /// the same name may be ignored.
    fn register_after_each(&mut self, name: &str, hook: Hook);
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TestFailure {
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error("expected <{tag}> {element:?} to be visible, still hidden after {attempts} attempts")]
    NotVisible {
        element: NodeId,
        tag: String,
        attempts: u32,
    },
    #[error("{0}")]
    Assertion(String),
}

#[derive(Debug)]
pub struct TestReport {
    pub name: String,
    pub outcome: Result<(), TestFailure>,
    pub logs: Vec<LogRecord>,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// A single-page test bed: `<html><body><div data-cy-root></div></body></html>`,
/// with the `div` as the container.
///
/// Nodes are never freed, so every mount grows the document. A bed is meant
/// for one test file's worth of tests, not for the lifetime of a process.
pub struct TestBed {
    document: Document,
    container: NodeId,
    env: Env,
    retries: u32,
    logs: Vec<LogRecord>,
    pending: Vec<NodeId>,
    retry_step: Option<RetryStep>,
    hooks: Vec<(String, Hook)>,
}

impl TestBed {
    pub fn new(env: Env) -> Result<Self, DomError> {
        let mut document = Document::new();
        let html = document.create_element("html")?;
        let body = document.create_element("body")?;
        let container = document.create_element("div")?;
        document.set_attribute(container, "data-cy-root", "")?;
        let root = document.root();
        document.append_child(root, html)?;
        document.append_child(html, body)?;
        document.append_child(body, container)?;
        Ok(Self {
            document,
            container,
            env,
            retries: DEFAULT_RETRIES,
            logs: Vec::new(),
            pending: Vec::new(),
            retry_step: None,
            hooks: Vec::new(),
        })
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the step run between visibility attempts for the running test
    pub fn on_retry(&mut self, step: impl FnMut(&mut Document, u32) + 'static) {
        self.retry_step = Some(Box::new(step));
    }

    pub fn env_mut(&mut self) -> &mut Env {
        &mut self.env
    }

    /// Log records of the running test
    pub fn logs(&self) -> &[LogRecord] {
        &self.logs
    }

    /// Visibility assertions queued by the running test
    pub fn pending_assertions(&self) -> &[NodeId] {
        &self.pending
    }

    pub fn hook_names(&self) -> impl Iterator<Item = &str> {
        self.hooks.iter().map(|(name, _)| name.as_str())
    }

    /// Runs `body` as one test. Queued visibility assertions are checked once
    /// the body succeeds; after-each hooks run whatever the outcome.
    pub fn run<F>(&mut self, name: &str, body: F) -> TestReport
    where
        F: FnOnce(&mut Self) -> Result<(), TestFailure>,
    {
        let span = span!(Level::DEBUG, "Running test", test = name);
        let _enter = span.enter();

        let mut outcome = body(self);
        let pending = std::mem::take(&mut self.pending);
        if outcome.is_ok() {
            outcome = pending
                .into_iter()
                .try_for_each(|element| self.check_visible(element));
        }
        self.retry_step = None;
        self.run_hooks();

        debug!(passed = outcome.is_ok(), "Finished test");
        TestReport {
            name: name.to_string(),
            outcome,
            logs: std::mem::take(&mut self.logs),
        }
    }

    fn check_visible(&mut self, element: NodeId) -> Result<(), TestFailure> {
        let attempts = self.retries + 1;
        for attempt in 1..=attempts {
            if self.document.is_visible(element) {
                return Ok(());
            }
            trace!(?element, attempt, "Element not visible");
            if attempt < attempts {
                if let Some(step) = self.retry_step.as_mut() {
                    step(&mut self.document, attempt);
                }
            }
        }
        Err(TestFailure::NotVisible {
            element,
            tag: self
                .document
                .tag_name(element)
                .unwrap_or_default()
                .to_string(),
            attempts,
        })
    }

    fn run_hooks(&mut self) {
        for (name, hook) in self.hooks.iter_mut() {
            trace!(hook = %name, "Running after-each hook");
            hook(&mut self.document, self.container);
        }
    }
}

impl Harness for TestBed {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    fn container(&self) -> NodeId {
        self.container
    }

    fn env(&self) -> &Env {
        &self.env
    }

    fn log(&mut self, record: LogRecord) {
        debug!(record = %record.name, message = %record.message, "Log");
        self.logs.push(record);
    }

    fn assert_visible(&mut self, element: NodeId) {
        self.pending.push(element);
    }

    fn register_after_each(&mut self, name: &str, hook: Hook) {
        if self.hooks.iter().any(|(n, _)| n == name) {
            trace!(hook = %name, "Hook already registered");
            return;
        }
        self.hooks.push((name.to_string(), hook));
    }
}
