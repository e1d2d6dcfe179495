//! Definitions that can never dispatch correctly are rejected when built

use tola_multi::prelude::*;

#[derive(Class)]
struct Vehicle;

#[derive(Class)]
struct Car {
    #[class(base)]
    vehicle: Vehicle,
}

#[derive(Class)]
struct Inspector;

multimethod! {
    #[allow(dead_code)]
    fn broken(n: i32) -> u8 {
        |_: &i32, _: &i32| 0,
    }
}

multimethod! {
    static UNUSED -> u8 {}
}

mod builder {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rejected<R: 'static>(builder: Builder<R>) -> DefinitionError {
        match builder.build() {
            Ok(_) => panic!("definition accepted"),
            Err(error) => error,
        }
    }

    #[test]
    fn test_empty() {
        let error = rejected(Multimethod::<()>::builder("empty"));
        assert_eq!(error, DefinitionError::Empty { name: "empty" });
        assert_eq!(error.to_string(), "empty: no implementations registered");
    }

    #[test]
    fn test_too_many_positions() {
        let builder = Multimethod::<()>::builder("wide")
            .base::<i32>()
            .base::<i32>()
            .base::<i32>()
            .base::<i32>()
            .base::<i32>()
            .base::<i32>()
            .base::<i32>()
            .method(|_: &i32| ());

        assert_eq!(
            rejected(builder),
            DefinitionError::TooManyPositions { name: "wide", positions: 7 }
        );
    }

    #[test]
    fn test_arity_mismatch() {
        let builder = Multimethod::<u8>::builder("pair")
            .base::<i32>()
            .base::<i32>()
            .method(|_: &i32, _: &i32| 2_u8)
            .method(|_: &i32| 1_u8);

        let error = rejected(builder);
        assert_eq!(
            error,
            DefinitionError::ArityMismatch {
                name: "pair",
                signature: "(&i32)".to_string(),
                expected: 2,
                found: 1,
            }
        );
        assert_eq!(error.to_string(), "pair: implementation (&i32) takes 1 parameters, declared 2");
    }

    #[test]
    fn test_incompatible_parameter() {
        let builder = Multimethod::<()>::builder("inspect")
            .base::<Vehicle>()
            .method(|_: &Car| ())
            .method(|_: &Inspector| ());

        let error = rejected(builder);
        assert_eq!(error.name(), "inspect");
        assert!(matches!(
            error,
            DefinitionError::IncompatibleParameter { position: 0, .. }
        ));
    }

    #[test]
    fn test_class_parameter_under_value_base() {
        let builder = Multimethod::<()>::builder("mixed").base::<u8>().method(|_: &Car| ());
        assert!(matches!(
            rejected(builder),
            DefinitionError::IncompatibleParameter { .. }
        ));
    }

    #[test]
    fn test_duplicate_fallback() {
        let builder = Multimethod::<i32>::builder("twice")
            .method(|_: &i32| 1)
            .fallback(|| 0)
            .fallback(|| 0);

        assert_eq!(rejected(builder), DefinitionError::DuplicateFallback { name: "twice" });
    }

    #[test]
    fn test_misplaced_fallback() {
        let builder = Multimethod::<()>::builder("misplaced").method(|_: Fallback, _: &i32| ());

        let error = rejected(builder);
        assert!(matches!(error, DefinitionError::MisplacedFallback { name: "misplaced", .. }));
    }

    #[test]
    fn test_fallback_ignores_declared_positions() {
        let built = Multimethod::<&str>::builder("guarded")
            .base::<Vehicle>()
            .base::<Vehicle>()
            .method(|_: &Car, _: &Vehicle| "car")
            .fallback(|| "other")
            .build();

        assert!(built.is_ok());
    }
}

mod lazy {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_init_reports_error() {
        let error = BROKEN.init().unwrap_err();
        assert_eq!(error.name(), "broken");
        assert!(matches!(error, DefinitionError::ArityMismatch { expected: 1, found: 2, .. }));
        assert!(BROKEN.is_initialized());
    }

    #[test]
    fn test_empty_static() {
        assert_eq!(UNUSED.name(), "unused");
        assert_eq!(UNUSED.init().unwrap_err(), DefinitionError::Empty { name: "unused" });
    }

    #[test]
    #[should_panic(expected = "broken: implementation (&i32, &i32) takes 2 parameters, declared 1")]
    fn test_call_panics_on_invalid_definition() {
        let _ = broken(&1);
    }
}
