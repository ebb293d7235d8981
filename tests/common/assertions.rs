//! Custom assertion macros

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is an error matching a pattern
#[macro_export]
macro_rules! assert_err {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => panic!("Expected different error variant, got: {:?}", e),
        }
    };
}

/// Assert that a validation outcome reports `message` for `field`
#[macro_export]
macro_rules! assert_field_error {
    ($outcome:expr, $field:expr, $message:expr) => {
        assert_eq!(
            $outcome.errors().get($field),
            Some($message),
            "unexpected error for field '{}': {:?}",
            $field,
            $outcome.errors()
        );
    };
}
