use super::*;

#[test]
fn can_join_many_errors() {
    let errors = vec![GenericError::from("first"), GenericError::from("second".to_string())];

    assert_eq!(GenericError::join_many(errors.as_slice(), ", "), "first, second");
}

#[test]
fn can_add_context() {
    let error = GenericError::from("unknown cost delegate: 'foo'").with_context("cannot read config");

    assert_eq!(error.message(), "cannot read config: unknown cost delegate: 'foo'");
    assert_eq!(error.to_string(), error.message());
}
