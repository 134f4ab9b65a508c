//! Method call notifications
//!
//! The proxy announces every permitted method call twice: once before the
//! underlying call runs and once after it returns normally. If the call
//! raises, only the first notification is sent.
//!
//! ```text
//! call("deposit", [100])
//!   ├─ notify(beforeMethodCall, event)
//!   ├─ object.deposit(100)          // may raise: stop here
//!   └─ notify(afterMethodCall, event)
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use specter_sdk::Value;

/// Identity of the example (test case) a subject belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleNode {
    title: String,
    specification: String,
}

impl ExampleNode {
    /// Create an example node
    pub fn new(specification: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            specification: specification.into(),
        }
    }

    /// Example title (e.g. "it rejects negative deposits")
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Owning specification (e.g. "AccountSpec")
    pub fn specification(&self) -> &str {
        &self.specification
    }
}

impl fmt::Display for ExampleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.specification, self.title)
    }
}

/// The two notification points around a method call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodCallEventName {
    /// Sent before the underlying call
    BeforeMethodCall,
    /// Sent after the underlying call returned normally
    AfterMethodCall,
}

impl MethodCallEventName {
    /// Wire name of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodCallEventName::BeforeMethodCall => "beforeMethodCall",
            MethodCallEventName::AfterMethodCall => "afterMethodCall",
        }
    }
}

impl fmt::Display for MethodCallEventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a method call notification
#[derive(Debug, Clone)]
pub struct MethodCallEvent {
    /// Example the call happens in
    pub example: Rc<ExampleNode>,
    /// The resolved subject receiving the call
    pub subject: Value,
    /// Method name
    pub method: String,
    /// Unwrapped arguments
    pub arguments: Vec<Value>,
}

/// Receives method call notifications.
///
/// Notifications are fire-and-forget: the proxy ignores anything the
/// notifier does and never skips a call because of it.
pub trait EventNotifier {
    /// Deliver one notification
    fn notify(&self, name: MethodCallEventName, event: &MethodCallEvent);
}

/// Listener callback registered on an [`EventDispatcher`]
pub type Listener = Rc<dyn Fn(MethodCallEventName, &MethodCallEvent)>;

/// Notifier that fans events out to listeners in subscription order
#[derive(Default)]
pub struct EventDispatcher {
    listeners: RefCell<Vec<Listener>>,
}

impl EventDispatcher {
    /// Create a dispatcher with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(MethodCallEventName, &MethodCallEvent) + 'static,
    {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Number of listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl EventNotifier for EventDispatcher {
    fn notify(&self, name: MethodCallEventName, event: &MethodCallEvent) {
        tracing::trace!(event = %name, method = %event.method, example = %event.example, "dispatching");
        // Snapshot so listeners may subscribe while being notified
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(name, event);
        }
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
