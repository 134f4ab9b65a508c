//! Tests for lazy resolution, factories, property access and constants

mod common;

use common::{raw, World};
use specter_engine::{FactoryCallable, SpecError, SubjectDescriptor, Value, Wrapped};

// ============================================================================
// Lazy Resolution
// ============================================================================

mod resolution {
    use super::*;

    #[test]
    fn test_nothing_constructed_before_use() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter"));

        assert!(!counter.descriptor().is_instantiated());
        assert!(world.entries().is_empty());

        counter.call("increment", vec![]).unwrap();
        assert!(counter.descriptor().is_instantiated());
    }

    #[test]
    fn test_resolves_once() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter"));

        let first = counter.resolve().unwrap();
        let second = counter.resolve().unwrap();
        counter.call("increment", vec![]).unwrap();
        counter.get("label").unwrap();

        assert_eq!(first, second);
        let constructions = world
            .entries()
            .iter()
            .filter(|entry| entry.starts_with("construct:"))
            .count();
        assert_eq!(constructions, 1);
    }

    #[test]
    fn test_clones_share_descriptor() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter"));
        let alias = counter.clone();

        alias.resolve().unwrap();
        assert!(counter.descriptor().is_instantiated());
        assert!(alias.ptr_eq(&counter));
    }

    #[test]
    fn test_unknown_class() {
        let world = World::new();
        let ghost = world.subject(SubjectDescriptor::for_class("Ghost"));

        let err = ghost.resolve().unwrap_err();
        assert_eq!(
            err,
            SpecError::ClassNotFound {
                class: "Ghost".to_string()
            }
        );
        assert_eq!(err.to_string(), "Class Ghost does not exist.");
    }

    #[test]
    fn test_constructor_arguments() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter").with_arguments(vec![Value::from(41)]));

        let result = counter.call("increment", vec![]).unwrap();
        assert_eq!(result.resolve().unwrap(), Value::from(42));
    }

    #[test]
    fn test_arguments_without_constructor() {
        let world = World::new();
        let plain = world.subject(SubjectDescriptor::for_class("Plain").with_arguments(vec![Value::from(1)]));

        let err = plain.resolve().unwrap_err();
        assert_eq!(
            err,
            SpecError::MethodNotFound {
                class: "Plain".to_string(),
                method: "__construct".to_string(),
                arguments: vec![Value::from(1)],
            }
        );
    }

    #[test]
    fn test_zero_argument_path_without_constructor() {
        let world = World::new();
        let plain = world.subject(SubjectDescriptor::for_class("Plain"));

        let pong = plain.call("ping", vec![]).unwrap();
        assert_eq!(pong.resolve().unwrap(), Value::from("pong"));
    }

    #[test]
    fn test_constructor_failure_leaves_unresolved() {
        let world = World::new();
        let exploding = world.subject(SubjectDescriptor::for_class("Exploding"));

        let err = exploding.resolve().unwrap_err();
        assert!(err.is_thrown());
        assert!(!exploding.descriptor().is_instantiated());

        // A later attempt constructs again
        exploding.resolve().unwrap_err();
        assert_eq!(
            world.entries(),
            vec!["construct:Exploding", "construct:Exploding"]
        );
    }

    #[test]
    fn test_preseeded_instance_skips_constructor() {
        let world = World::new();
        let class = world.specter.registry().get_by_name("Exploding").unwrap();
        let instance = Value::Object(class.new_instance_without_constructor());

        let subject = world.subject(SubjectDescriptor::for_class("Exploding").with_instance(instance.clone()));

        assert_eq!(subject.resolve().unwrap(), instance);
        assert!(subject.descriptor().is_instantiated());
        assert!(world.entries().is_empty());
    }
}

// ============================================================================
// Factory Construction
// ============================================================================

mod factories {
    use super::*;
    use specter_engine::{Factory, ObjectRef, SpecResult, Specter};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingFactory {
        calls: Cell<usize>,
    }

    impl Factory for CountingFactory {
        fn instantiate_from_callable(
            &self,
            callable: &FactoryCallable,
            _arguments: &[Value],
        ) -> SpecResult<ObjectRef> {
            self.calls.set(self.calls.get() + 1);
            Err(SpecError::ClassNotFound {
                class: callable.describe(),
            })
        }
    }

    #[test]
    fn test_named_constructor() {
        let world = World::new();
        let money = world.subject(
            SubjectDescriptor::for_class("Money")
                .constructed_through("fromCents")
                .with_arguments(vec![Value::from(250)]),
        );

        assert_eq!(raw(money.get("cents").unwrap()), Value::from(250));
    }

    #[test]
    fn test_missing_named_constructor_skips_factory() {
        let world = World::new();
        let factory = Rc::new(CountingFactory::default());
        let specter = Specter::builder(world.specter.registry().clone())
            .factory(factory.clone())
            .build();

        let counter = specter.subject(
            World::example(),
            SubjectDescriptor::for_class("Counter")
                .constructed_through("create")
                .with_arguments(vec![Value::from(1)]),
        );

        let err = counter.resolve().unwrap_err();
        assert_eq!(
            err,
            SpecError::NamedConstructorNotFound {
                class: "Counter".to_string(),
                method: "create".to_string(),
                arguments: vec![Value::from(1)],
            }
        );
        assert_eq!(factory.calls.get(), 0);
    }

    #[test]
    fn test_callable_is_delegated_without_check() {
        let world = World::new();
        let factory = Rc::new(CountingFactory::default());
        let specter = Specter::builder(world.specter.registry().clone())
            .factory(factory.clone())
            .build();

        let counter = specter.subject(
            World::example(),
            SubjectDescriptor::for_class("Counter")
                .constructed_through(FactoryCallable::static_method("Nowhere", "build")),
        );

        counter.resolve().unwrap_err();
        assert_eq!(factory.calls.get(), 1);
    }

    #[test]
    fn test_factory_returning_scalar() {
        let world = World::new();
        let money = world.subject(SubjectDescriptor::for_class("Money").constructed_through("zero"));

        let err = money.resolve().unwrap_err();
        assert_eq!(
            err.to_string(),
            "The factory Money::zero did not return an object, returned int instead."
        );
        assert!(!money.descriptor().is_instantiated());
    }

    #[test]
    fn test_function_factory() {
        let world = World::new();
        let registry = world.specter.registry().clone();
        let build = FactoryCallable::named_function("make_plain", move |_| {
            let plain = registry
                .get_by_name("Plain")
                .ok_or_else(|| specter_engine::Thrown::error("no Plain"))?;
            Ok(Value::Object(plain.new_instance_without_constructor()))
        });

        let subject = world.subject(SubjectDescriptor::for_class("Plain").constructed_through(build));
        let pong = subject.call("ping", vec![]).unwrap();
        assert_eq!(pong.resolve().unwrap(), Value::from("pong"));
    }
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use super::*;
    use specter_engine::SpecterConfig;

    #[test]
    fn test_get_public_property() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter"));

        let label = counter.get("label").unwrap();
        assert!(label.as_subject().is_some());
        assert_eq!(raw(label), Value::from("counter"));
    }

    #[test]
    fn test_get_private_property() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter"));

        let err = counter.get("count").unwrap_err();
        assert_eq!(
            err,
            SpecError::PropertyNotFound {
                class: "Counter".to_string(),
                property: "count".to_string(),
                arguments: vec![],
            }
        );
    }

    #[test]
    fn test_set_public_property() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter"));

        counter.set("label", Value::from("clicks")).unwrap();
        assert_eq!(raw(counter.get("label").unwrap()), Value::from("clicks"));
    }

    #[test]
    fn test_set_unwraps_subject_value() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter"));
        let plain = world.subject(SubjectDescriptor::for_class("Plain"));

        counter.set("label", plain.clone()).unwrap();
        assert_eq!(raw(counter.get("label").unwrap()), plain.resolve().unwrap());
    }

    #[test]
    fn test_set_private_property() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter"));

        let err = counter.set("count", Value::from(99)).unwrap_err();
        assert_eq!(err.to_string(), "Property Counter::$count not found.");
        assert_eq!(raw(counter.call("increment", vec![]).unwrap().into()), Value::from(1));
    }

    #[test]
    fn test_undeclared_property() {
        let world = World::new();
        let plain = world.subject(SubjectDescriptor::for_class("Plain"));

        assert_eq!(plain.get("color").unwrap_err().kind(), "PropertyNotFound");
        assert_eq!(
            plain.set("color", Value::from("red")).unwrap_err().kind(),
            "PropertyNotFound"
        );
    }

    #[test]
    fn test_magic_accessors() {
        let world = World::new();
        let magic = world.subject(SubjectDescriptor::for_class("Magic"));

        assert_eq!(raw(magic.get("color").unwrap()), Value::from("magic:color"));
        magic.set("color", Value::from("red")).unwrap();
        assert_eq!(raw(magic.get("color").unwrap()), Value::from("red"));
    }

    #[test]
    fn test_private_property_goes_to_accessor_hooks() {
        let world = World::new();
        let magic = world.subject(SubjectDescriptor::for_class("Magic"));

        assert_eq!(raw(magic.get("secret").unwrap()), Value::from("magic:secret"));

        magic.set("secret", Value::from("overwritten")).unwrap();
        assert_eq!(raw(magic.get("secret").unwrap()), Value::from("overwritten"));

        // The declared slot is untouched; the hook stored its own copy
        let object = magic.resolve().unwrap();
        let object = object.as_object().unwrap();
        assert_eq!(object.property("secret"), Some(Value::from("s3cr3t")));
        assert_eq!(object.property("bag_secret"), Some(Value::from("overwritten")));
    }

    #[test]
    fn test_magic_accessors_disabled() {
        let config = SpecterConfig::from_str("[inspector]\nmagic_accessors = false\n").unwrap();
        let world = World::with_config(config);
        let magic = world.subject(SubjectDescriptor::for_class("Magic"));

        assert_eq!(magic.get("color").unwrap_err().kind(), "PropertyNotFound");
        assert_eq!(magic.call("anything", vec![]).unwrap_err().kind(), "MethodNotFound");
        assert_eq!(magic.call("wipe", vec![]).unwrap_err().kind(), "MethodNotVisible");
        assert_eq!(magic.get("secret").unwrap_err().kind(), "PropertyNotFound");
    }
}

// ============================================================================
// Class Constants
// ============================================================================

mod constants {
    use super::*;

    #[test]
    fn test_constant_without_instantiation() {
        let world = World::new();
        let exploding = world.subject(SubjectDescriptor::for_class("Exploding"));

        let value = exploding.get("MAX_SIZE").unwrap();
        assert_eq!(value.as_raw(), Some(&Value::from(10)));
        assert!(!exploding.descriptor().is_instantiated());
        assert!(world.entries().is_empty());
    }

    #[test]
    fn test_constant_defined() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter"));

        assert!(counter.constant_defined("MAX_SIZE"));
        assert!(!counter.constant_defined("MIN_SIZE"));
        assert!(!counter.descriptor().is_instantiated());

        let ghost = world.subject(SubjectDescriptor::for_class("Ghost"));
        assert!(!ghost.constant_defined("MAX_SIZE"));

        let raw_subject = world.subject(SubjectDescriptor::for_value(Value::from(1)));
        assert!(!raw_subject.constant_defined("MAX_SIZE"));
    }

    #[test]
    fn test_mixed_case_name_is_a_property() {
        let world = World::new();
        let exploding = world.subject(SubjectDescriptor::for_class("Exploding"));

        // Defined as a constant, but not all-uppercase: resolution is attempted
        let err = exploding.get("Mixed").unwrap_err();
        assert!(err.is_thrown());
        assert_eq!(world.entries(), vec!["construct:Exploding"]);
    }

    #[test]
    fn test_undefined_uppercase_name_falls_through() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter"));

        let err = counter.get("MIN_SIZE").unwrap_err();
        assert_eq!(err.kind(), "PropertyNotFound");
        assert!(counter.descriptor().is_instantiated());
    }

    #[test]
    fn test_constant_on_raw_subject() {
        let world = World::new();
        let hello = world.subject(SubjectDescriptor::for_value(Value::from("hello")));

        let err = hello.get("MAX_SIZE").unwrap_err();
        assert_eq!(err.kind(), "AccessingPropertyOnNonObject");
    }

    #[test]
    fn test_constant_is_not_wrapped() {
        let world = World::new();
        let counter = world.subject(SubjectDescriptor::for_class("Counter"));

        assert!(matches!(counter.get("MAX_SIZE").unwrap(), Wrapped::Raw(Value::Int(10))));
    }
}
