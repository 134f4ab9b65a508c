//! Shared fixture: a small host world and an engine over it

#![allow(dead_code)]

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use specter_engine::{
    ClassDef, ClassRegistry, EventDispatcher, ExampleNode, Specter, SpecterConfig, Subject,
    SubjectDescriptor, Thrown, Unwrapper, Value, Visibility, Wrapped,
};

/// Ordered record of constructor runs, method bodies and notifications
pub type Log = Arc<Mutex<Vec<String>>>;

pub struct World {
    pub specter: Specter,
    pub dispatcher: Rc<EventDispatcher>,
    pub log: Log,
}

impl World {
    pub fn new() -> Self {
        Self::with_config(SpecterConfig::default())
    }

    pub fn with_config(config: SpecterConfig) -> Self {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let registry = registry(&log);
        let dispatcher = Rc::new(EventDispatcher::new());

        let events = log.clone();
        dispatcher.subscribe(move |name, event| {
            events
                .lock()
                .unwrap()
                .push(format!("{}:{}", name, event.method));
        });

        let specter = Specter::builder(registry)
            .config(config)
            .notifier(dispatcher.clone())
            .build();
        Self {
            specter,
            dispatcher,
            log,
        }
    }

    pub fn example() -> ExampleNode {
        ExampleNode::new("CounterSpec", "it behaves")
    }

    pub fn subject(&self, descriptor: SubjectDescriptor) -> Subject {
        self.specter.subject(Self::example(), descriptor)
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }
}

/// Strip wrapping from a result
pub fn raw(value: Wrapped) -> Value {
    Unwrapper::new().unwrap_one(&value).unwrap()
}

fn record(log: &Log, entry: impl Into<String>) {
    log.lock().unwrap().push(entry.into());
}

fn registry(log: &Log) -> Arc<ClassRegistry> {
    let registry = Arc::new(ClassRegistry::new());

    // Counter: constructor, private state, public and private methods
    let (on_construct, on_increment, on_peek, on_fail) =
        (log.clone(), log.clone(), log.clone(), log.clone());
    registry.register(
        ClassDef::builder("Counter")
            .constant("MAX_SIZE", 10)
            .property("count", Visibility::Private, 0)
            .property("label", Visibility::Public, "counter")
            .constructor(move |this, args| {
                record(&on_construct, "construct:Counter");
                if let Some(start) = args.first() {
                    this.set_property("count", start.clone());
                }
                Ok(Value::Null)
            })
            .method("increment", Visibility::Public, move |this, args| {
                record(&on_increment, "call:increment");
                let step = args.first().and_then(Value::as_int).unwrap_or(1);
                let next = this.property("count").and_then(|v| v.as_int()).unwrap_or(0) + step;
                this.set_property("count", Value::from(next));
                Ok(Value::from(next))
            })
            .method("peek", Visibility::Private, move |this, _| {
                record(&on_peek, "call:peek");
                Ok(this.property("count").unwrap_or_default())
            })
            .method("fail", Visibility::Public, move |_, _| {
                record(&on_fail, "call:fail");
                Err(Thrown::new("RuntimeException", "boom"))
            })
            .method("echo", Visibility::Public, |_, args| Ok(Value::Array(args.to_vec())))
            .method("me", Visibility::Public, |this, _| Ok(Value::Object(this.clone())))
            .build(),
    );

    // Exploding: any construction fails
    let on_explode = log.clone();
    registry.register(
        ClassDef::builder("Exploding")
            .constant("MAX_SIZE", 10)
            .constant("Mixed", 1)
            .constructor(move |_, _| {
                record(&on_explode, "construct:Exploding");
                Err(Thrown::new("LogicException", "cannot build"))
            })
            .build(),
    );

    // Plain: no constructor at all
    registry.register(
        ClassDef::builder("Plain")
            .method("ping", Visibility::Public, |_, _| Ok(Value::from("pong")))
            .build(),
    );

    // Money: built through a named constructor
    let weak = Arc::downgrade(&registry);
    registry.register(
        ClassDef::builder("Money")
            .property("cents", Visibility::Public, 0)
            .static_method("fromCents", Visibility::Public, move |args| {
                let money = weak
                    .upgrade()
                    .and_then(|registry| registry.get_by_name("Money"))
                    .ok_or_else(|| Thrown::error("Money is not registered"))?;
                let object = money.new_instance_without_constructor();
                object.set_property("cents", args.first().cloned().unwrap_or_default());
                Ok(Value::Object(object))
            })
            .static_method("zero", Visibility::Public, |_| Ok(Value::from(0)))
            .build(),
    );

    // Magic: everything goes through the accessor hooks, hidden members included
    let (on_wipe, on_call) = (log.clone(), log.clone());
    registry.register(
        ClassDef::builder("Magic")
            .property("secret", Visibility::Private, "s3cr3t")
            .method("wipe", Visibility::Private, move |this, _| {
                record(&on_wipe, "call:wipe");
                this.set_property("secret", Value::Null);
                Ok(Value::Null)
            })
            .method("__get", Visibility::Public, |this, args| {
                let name = args.first().and_then(Value::as_str).unwrap_or_default();
                Ok(this
                    .property(&format!("bag_{}", name))
                    .unwrap_or_else(|| Value::from(format!("magic:{}", name))))
            })
            .method("__set", Visibility::Public, |this, args| {
                let name = args.first().and_then(Value::as_str).unwrap_or_default();
                let value = args.get(1).cloned().unwrap_or_default();
                this.set_property(format!("bag_{}", name), value);
                Ok(Value::Null)
            })
            .method("__call", Visibility::Public, move |_, args| {
                record(&on_call, "call:__call");
                Ok(args.first().cloned().unwrap_or_default())
            })
            .build(),
    );

    registry
}
