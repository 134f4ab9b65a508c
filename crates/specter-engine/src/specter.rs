//! Engine facade
//!
//! `Specter` assembles the collaborators every subject dispatches through
//! (class registry, access inspector, event notifier, factory, exception
//! translator, presenter) and hands out per-example [`Wrapper`]s.
//!
//! ```ignore
//! let registry = Arc::new(ClassRegistry::new());
//! registry.register(counter_class());
//!
//! let specter = Specter::builder(registry)
//!     .config(SpecterConfig::from_file(Path::new("specter.toml"))?)
//!     .notifier(dispatcher.clone())
//!     .build();
//!
//! let wrapper = specter.wrapper(ExampleNode::new("CounterSpec", "it counts"));
//! let counter = wrapper.subject(SubjectDescriptor::for_class("Counter"));
//! ```

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use specter_sdk::{AccessInspector, ClassRegistry, MagicAwareAccessInspector, VisibilityAccessInspector};

use crate::config::SpecterConfig;
use crate::event::{EventDispatcher, EventNotifier, ExampleNode};
use crate::exception::ExceptionTranslator;
use crate::factory::{CallableFactory, Factory};
use crate::presenter::Presenter;
use crate::subject::{Subject, SubjectDescriptor};
use crate::wrapper::Wrapper;

/// Collaborators shared by every subject of one engine
pub struct DispatchContext {
    pub(crate) registry: Arc<ClassRegistry>,
    pub(crate) inspector: Rc<dyn AccessInspector>,
    pub(crate) notifier: Rc<dyn EventNotifier>,
    pub(crate) factory: Rc<dyn Factory>,
    pub(crate) translator: ExceptionTranslator,
    pub(crate) presenter: Presenter,
}

impl fmt::Debug for DispatchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchContext")
            .field("classes", &self.registry.len())
            .field("presenter", &self.presenter)
            .finish_non_exhaustive()
    }
}

/// The dispatch engine
#[derive(Debug, Clone)]
pub struct Specter {
    context: Rc<DispatchContext>,
    config: SpecterConfig,
}

impl Specter {
    /// Engine with default collaborators and configuration
    pub fn new(registry: Arc<ClassRegistry>) -> Self {
        Self::builder(registry).build()
    }

    /// Start configuring an engine over `registry`
    pub fn builder(registry: Arc<ClassRegistry>) -> SpecterBuilder {
        SpecterBuilder::new(registry)
    }

    /// Wrapper producing subjects for `example`
    pub fn wrapper(&self, example: ExampleNode) -> Wrapper {
        Wrapper::new(self.context.clone(), Rc::new(example))
    }

    /// Shorthand for `wrapper(example).subject(descriptor)`
    pub fn subject(&self, example: ExampleNode, descriptor: SubjectDescriptor) -> Subject {
        self.wrapper(example).subject(descriptor)
    }

    /// The class registry subjects are resolved against
    pub fn registry(&self) -> &Arc<ClassRegistry> {
        &self.context.registry
    }

    /// The presenter used for diagnostics
    pub fn presenter(&self) -> &Presenter {
        &self.context.presenter
    }

    /// Configuration the engine was built from
    pub fn config(&self) -> &SpecterConfig {
        &self.config
    }
}

/// Builder for [`Specter`]
pub struct SpecterBuilder {
    registry: Arc<ClassRegistry>,
    config: SpecterConfig,
    inspector: Option<Rc<dyn AccessInspector>>,
    notifier: Option<Rc<dyn EventNotifier>>,
    factory: Option<Rc<dyn Factory>>,
}

impl SpecterBuilder {
    /// Create a builder with default configuration
    pub fn new(registry: Arc<ClassRegistry>) -> Self {
        Self {
            registry,
            config: SpecterConfig::default(),
            inspector: None,
            notifier: None,
            factory: None,
        }
    }

    /// Use `config`
    pub fn config(mut self, config: SpecterConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the access inspector chosen by the configuration
    pub fn inspector(mut self, inspector: Rc<dyn AccessInspector>) -> Self {
        self.inspector = Some(inspector);
        self
    }

    /// Deliver call notifications to `notifier`
    pub fn notifier(mut self, notifier: Rc<dyn EventNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Replace the callable factory
    pub fn factory(mut self, factory: Rc<dyn Factory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Finish the engine
    pub fn build(self) -> Specter {
        let inspector: Rc<dyn AccessInspector> = match self.inspector {
            Some(inspector) => inspector,
            None if self.config.inspector.magic_accessors => {
                Rc::new(MagicAwareAccessInspector::new(VisibilityAccessInspector::new()))
            }
            None => Rc::new(VisibilityAccessInspector::new()),
        };
        let notifier: Rc<dyn EventNotifier> = match self.notifier {
            Some(notifier) => notifier,
            None => Rc::new(EventDispatcher::new()),
        };
        let factory: Rc<dyn Factory> = match self.factory {
            Some(factory) => factory,
            None => Rc::new(CallableFactory::new(self.registry.clone())),
        };

        tracing::debug!(
            classes = self.registry.len(),
            magic_accessors = self.config.inspector.magic_accessors,
            "specter engine ready"
        );

        let context = DispatchContext {
            registry: self.registry,
            inspector,
            notifier,
            factory,
            translator: ExceptionTranslator::default(),
            presenter: self.config.presenter(),
        };
        Specter {
            context: Rc::new(context),
            config: self.config,
        }
    }
}
