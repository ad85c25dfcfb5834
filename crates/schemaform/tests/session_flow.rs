use pretty_assertions::assert_eq;
use schemaform::forms::combined::{self, CombinedOptions};
use schemaform::forms::conditional;
use schemaform::{Flavor, FormSession, ValidationMode, Value};
use std::sync::Arc;

#[test]
fn test_lazy_mode_shows_nothing_before_submit() {
    let schema = Arc::new(conditional::schema(Flavor::Rules));
    let mut session = FormSession::new(schema, conditional::defaults(), ValidationMode::OnSubmit);

    session.set_value("age", "abc");
    session.set_value("sendMessage", true);
    assert!(session.errors().is_empty());

    let result = session.submit();
    assert!(!result.is_valid());
    assert_eq!(session.error("age").unwrap().message.id(), "Must be a number");
    assert_eq!(
        session.error("messageEmailAddress").unwrap().message.id(),
        "Message recipient required"
    );
}

#[test]
fn test_live_mode_tracks_touched_fields_then_everything_after_submit() {
    let schema = Arc::new(conditional::schema(Flavor::Rules));
    let mut session = FormSession::new(schema, conditional::defaults(), ValidationMode::OnChange);

    session.set_value("age", "15");
    assert_eq!(session.errors().fields().collect::<Vec<_>>(), vec!["age"]);

    session.set_value("age", "20");
    assert!(session.errors().is_empty());

    session.submit();
    assert!(session.error("firstName").is_some());

    session.set_value("sendMessage", true);
    assert!(session.error("messageEmailAddress").is_some());
    assert!(session.error("lastName").is_some());

    session.set_value("messageEmailAddress", "x@y.com");
    assert!(session.error("messageEmailAddress").is_none());
}

#[test]
fn test_switching_schema_drops_errors_for_removed_fields() {
    let mut session = FormSession::new(
        Arc::new(combined::derive(&CombinedOptions::all())),
        combined::defaults(),
        ValidationMode::OnSubmit,
    );
    session.set_value("age", "12");
    session.submit();
    assert!(session.error("age").is_some());

    session.set_schema(Arc::new(combined::derive(&CombinedOptions { age: false, email: true })));
    assert!(session.error("age").is_none());
    assert!(session.error("email").is_some());
}

#[test]
fn test_superseded_validation_is_discarded() {
    let schema = Arc::new(conditional::schema(Flavor::Rules));
    let mut session = FormSession::new(schema, conditional::defaults(), ValidationMode::OnSubmit);

    let stale = session.begin();
    session.set_value("firstName", Value::from("Jane"));
    let current = session.begin();

    let stale_result = stale.run();
    let current_result = current.run();

    assert!(session.complete(current.seq(), current_result));
    assert!(session.error("firstName").is_none());

    assert!(!session.complete(stale.seq(), stale_result));
    assert!(session.error("firstName").is_none());
}

#[test]
fn test_lazy_mode_revalidates_corrections_after_failed_submit() {
    let schema = Arc::new(conditional::schema(Flavor::Rules));
    let mut session = FormSession::new(schema, conditional::defaults(), ValidationMode::OnSubmit);

    session.submit();
    assert_eq!(session.error("firstName").unwrap().message.id(), "First name is required");

    session.set_value("firstName", "Jane");
    assert!(session.error("firstName").is_none());
    assert!(session.error("lastName").is_some());
}
