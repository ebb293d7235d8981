//! Property-based tests for form validation
//!
//! Uses proptest to generate field values and verify the rules hold for
//! every input, not just the handpicked ones.

use lifebridge::validation::fields::{phone, strong_password, PASSWORD_WEAK, PHONE_INVALID};
use lifebridge::validation::{FieldSet, FormKind, FormMode};
use proptest::prelude::*;

fn any_form() -> impl Strategy<Value = FormKind> {
    prop_oneof![
        Just(FormKind::Patient),
        Just(FormKind::Doctor),
        Just(FormKind::Feedback),
        Just(FormKind::Login),
    ]
}

fn any_mode() -> impl Strategy<Value = FormMode> {
    prop_oneof![Just(FormMode::Create), Just(FormMode::Update)]
}

/// A form's fields filled with arbitrary text
fn filled(form: FormKind, values: &[String]) -> FieldSet {
    let names: Vec<String> = form.empty_fields().names().map(str::to_string).collect();
    names
        .into_iter()
        .zip(values.iter().cloned().chain(std::iter::repeat(String::new())))
        .collect()
}

proptest! {
    #[test]
    fn test_ten_digits_always_pass(number in "[0-9]{10}") {
        prop_assert_eq!(phone(&number), Ok(()));
    }

    #[test]
    fn test_other_digit_lengths_fail(number in "[0-9]{0,9}|[0-9]{11,15}") {
        prop_assert_eq!(phone(&number), Err(PHONE_INVALID));
    }

    #[test]
    fn test_password_with_every_class_passes(
        lower in "[a-z]{1,4}",
        upper in "[A-Z]{1,4}",
        digit in "[0-9]{1,4}",
        special in "[!@#$%^&*]{1,4}",
        filler in "[a-zA-Z0-9]{4}",
    ) {
        let password = format!("{upper}{lower}{filler}{digit}{special}");
        prop_assert_eq!(strong_password(&password), Ok(()));
    }

    #[test]
    fn test_password_without_special_fails(password in "[a-zA-Z0-9]{0,20}") {
        prop_assert_eq!(strong_password(&password), Err(PASSWORD_WEAK));
    }

    #[test]
    fn test_validation_is_deterministic(
        form in any_form(),
        mode in any_mode(),
        values in prop::collection::vec(".{0,12}", 0..14),
    ) {
        let fields = filled(form, &values);
        prop_assert_eq!(form.validate(&fields, mode), form.validate(&fields, mode));
    }

    #[test]
    fn test_errors_only_name_schema_fields(
        form in any_form(),
        mode in any_mode(),
        values in prop::collection::vec(".{0,12}", 0..14),
    ) {
        let fields = filled(form, &values);
        let outcome = form.validate(&fields, mode);
        for (field, _) in outcome.errors().iter() {
            prop_assert!(form.rules().iter().any(|rule| rule.field == field));
        }
        prop_assert_eq!(outcome.is_valid(), outcome.errors().is_empty());
    }

    #[test]
    fn test_update_never_checks_password(
        form in prop_oneof![Just(FormKind::Patient), Just(FormKind::Doctor)],
        password in ".{0,12}",
    ) {
        let fields = form.empty_fields().with("password", password);
        let outcome = form.validate(&fields, FormMode::Update);
        prop_assert!(!outcome.errors().contains("password"));
    }

    #[test]
    fn test_blank_values_fail_required(
        form in any_form(),
        blank in "[ \t]{0,4}",
    ) {
        let names: Vec<String> = form.empty_fields().names().map(str::to_string).collect();
        let fields: FieldSet = names.iter().map(|name| (name.clone(), blank.clone())).collect();
        let outcome = form.validate(&fields, FormMode::Create);
        prop_assert_eq!(outcome.errors().len(), form.rules().len());
    }
}
