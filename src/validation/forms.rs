//! Per-entity form schemas.

use super::engine::{validate_fields, FieldRule, FieldSet, FormMode, ValidationOutcome};
use super::fields::Check;

const FIRST_NAME: FieldRule = FieldRule::new("firstName", &[Check::Required("First name is required")]);
const LAST_NAME: FieldRule = FieldRule::new("lastName", &[Check::Required("Last name is required")]);
const EMAIL: FieldRule = FieldRule::new("email", &[Check::Required("Email is required"), Check::Email]);
const PHONE_NUMBER: FieldRule = FieldRule::new(
    "phoneNumber",
    &[Check::Required("Phone number is required"), Check::Phone],
);
const PASSWORD: FieldRule = FieldRule::create_only(
    "password",
    &[Check::Required("Password is required"), Check::StrongPassword],
);
const GENDER: FieldRule = FieldRule::new("gender", &[Check::Required("Gender is required")]);
const DATE_OF_BIRTH: FieldRule =
    FieldRule::new("dateOfBirth", &[Check::Required("Date of Birth is required")]);

const PATIENT: &[FieldRule] = &[
    FIRST_NAME,
    LAST_NAME,
    EMAIL,
    PHONE_NUMBER,
    PASSWORD,
    GENDER,
    DATE_OF_BIRTH,
];

const DOCTOR: &[FieldRule] = &[
    FIRST_NAME,
    LAST_NAME,
    EMAIL,
    PHONE_NUMBER,
    PASSWORD,
    GENDER,
    DATE_OF_BIRTH,
    FieldRule::new("city", &[Check::Required("City is required")]),
    FieldRule::new("state", &[Check::Required("State is required")]),
    FieldRule::new("country", &[Check::Required("Country is required")]),
    FieldRule::new("specialization", &[Check::Required("Specialization is required")]),
    FieldRule::new("bloodGroup", &[Check::Required("Blood group is required")]),
    FieldRule::new("joiningDate", &[Check::Required("Joining date is required")]),
];

const FEEDBACK: &[FieldRule] = &[
    FieldRule::new("name", &[Check::Required("Name is required")]),
    EMAIL,
    FieldRule::new("phone", &[Check::Required("Phone number is required"), Check::Phone]),
    FieldRule::new("doctor", &[Check::Required("Please select a doctor")]),
    FieldRule::new("rating", &[Check::PositiveNumber("Rating is required")]),
];

/// Login page message for a blank email or password
pub const LOGIN_FIELDS_MISSING: &str = "Please enter both email and password.";

// Login only enforces the backend's six-character minimum.
const LOGIN: &[FieldRule] = &[
    FieldRule::new(
        "email",
        &[Check::Required(LOGIN_FIELDS_MISSING), Check::StrictEmail],
    ),
    FieldRule::new(
        "password",
        &[
            Check::Required(LOGIN_FIELDS_MISSING),
            Check::MinLength(6, "Password must be at least 6 characters long."),
        ],
    ),
];

/// The forms the dashboards submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Patient self-registration and profile update
    Patient,
    /// Admin doctor registration and edit
    Doctor,
    /// Patient feedback about a doctor
    Feedback,
    Login,
}

impl FormKind {
    pub fn rules(self) -> &'static [FieldRule] {
        match self {
            FormKind::Patient => PATIENT,
            FormKind::Doctor => DOCTOR,
            FormKind::Feedback => FEEDBACK,
            FormKind::Login => LOGIN,
        }
    }

    /// A field set with every field of the form set to an empty string,
    /// as a create form starts out.
    pub fn empty_fields(self) -> FieldSet {
        self.rules().iter().map(|rule| (rule.field, "")).collect()
    }

    pub fn validate(self, fields: &FieldSet, mode: FormMode) -> ValidationOutcome {
        validate_fields(self.rules(), fields, mode)
    }
}

impl std::str::FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(FormKind::Patient),
            "doctor" => Ok(FormKind::Doctor),
            "feedback" => Ok(FormKind::Feedback),
            "login" => Ok(FormKind::Login),
            other => Err(format!("unknown form: {other}")),
        }
    }
}

/// Validate a form. See [`FormKind::validate`].
pub fn validate(form: FormKind, fields: &FieldSet, mode: FormMode) -> ValidationOutcome {
    form.validate(fields, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::fields::{EMAIL_INVALID, PASSWORD_WEAK, PHONE_INVALID};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn patient() -> FieldSet {
        FieldSet::new()
            .with("firstName", "Asha")
            .with("lastName", "Rao")
            .with("email", "asha.rao@example.com")
            .with("phoneNumber", "9876543210")
            .with("gender", "Female")
            .with("dateOfBirth", "1990-04-12")
            .with("password", "Abcdef1!")
    }

    fn doctor() -> FieldSet {
        let mut fields = patient();
        for (name, value) in [
            ("city", "Pune"),
            ("state", "Maharashtra"),
            ("country", "India"),
            ("specialization", "Cardiology"),
            ("bloodGroup", "O+"),
            ("joiningDate", "2021-06-01"),
        ] {
            fields.set(name, value);
        }
        fields
    }

    #[test]
    fn test_valid_patient_has_no_errors() {
        let outcome = validate(FormKind::Patient, &patient(), FormMode::Create);
        assert!(outcome.is_valid());
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn test_empty_patient_reports_every_field() {
        let outcome = FormKind::Patient.validate(&FormKind::Patient.empty_fields(), FormMode::Create);
        let errors = outcome.errors();
        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get("firstName"), Some("First name is required"));
        assert_eq!(errors.get("lastName"), Some("Last name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("phoneNumber"), Some("Phone number is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert_eq!(errors.get("gender"), Some("Gender is required"));
        assert_eq!(errors.get("dateOfBirth"), Some("Date of Birth is required"));
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let mut fields = patient();
        fields.set("firstName", "   ");
        let outcome = FormKind::Patient.validate(&fields, FormMode::Create);
        assert_eq!(outcome.errors().get("firstName"), Some("First name is required"));
    }

    #[test]
    fn test_malformed_email_reports_invalid_not_required() {
        let mut fields = patient();
        fields.set("email", "not-an-email");
        let outcome = FormKind::Patient.validate(&fields, FormMode::Create);
        assert_eq!(outcome.errors().get("email"), Some(EMAIL_INVALID));
    }

    #[test]
    fn test_phone_length() {
        for bad in ["12345", "12345678901"] {
            let mut fields = patient();
            fields.set("phoneNumber", bad);
            let outcome = FormKind::Patient.validate(&fields, FormMode::Create);
            assert_eq!(outcome.errors().get("phoneNumber"), Some(PHONE_INVALID));
        }
    }

    #[test]
    fn test_weak_password_on_create() {
        let mut fields = patient();
        fields.set("password", "abcdefgh");
        let outcome = FormKind::Patient.validate(&fields, FormMode::Create);
        assert_eq!(outcome.errors().get("password"), Some(PASSWORD_WEAK));
    }

    #[test]
    fn test_update_ignores_empty_password() {
        let mut fields = patient();
        fields.set("password", "");
        let outcome = FormKind::Patient.validate(&fields, FormMode::Update);
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_update_from_fetched_record() {
        let record = json!({
            "patientId": 17,
            "firstName": "Asha",
            "lastName": "Rao",
            "email": "asha.rao@example.com",
            "phoneNumber": "9876543210",
            "gender": "Female",
            "dateOfBirth": "1990-04-12"
        });
        let outcome =
            FormKind::Patient.validate(&FieldSet::from_json(&record), FormMode::Update);
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_non_string_value_counts_as_empty() {
        let mut fields = patient();
        fields.set("gender", json!(["Female"]));
        let outcome = FormKind::Patient.validate(&fields, FormMode::Create);
        assert_eq!(outcome.errors().get("gender"), Some("Gender is required"));
    }

    #[test]
    fn test_valid_doctor() {
        assert!(FormKind::Doctor.validate(&doctor(), FormMode::Create).is_valid());
    }

    #[test]
    fn test_doctor_requires_specialization() {
        let mut fields = doctor();
        fields.set("specialization", "");
        let outcome = FormKind::Doctor.validate(&fields, FormMode::Update);
        assert_eq!(
            outcome.errors().get("specialization"),
            Some("Specialization is required")
        );
        assert_eq!(outcome.errors().len(), 1);
    }

    #[test]
    fn test_feedback() {
        let fields = FieldSet::new()
            .with("name", "Asha")
            .with("email", "asha@example.com")
            .with("phone", "9876543210")
            .with("doctor", "Dr. Mehta")
            .with("rating", 4)
            .with("comments", "");
        assert!(FormKind::Feedback.validate(&fields, FormMode::Create).is_valid());

        let mut unrated = fields.clone();
        unrated.set("rating", 0);
        let outcome = FormKind::Feedback.validate(&unrated, FormMode::Create);
        assert_eq!(outcome.errors().get("rating"), Some("Rating is required"));

        let outcome = FormKind::Feedback.validate(&FormKind::Feedback.empty_fields(), FormMode::Create);
        assert_eq!(outcome.errors().get("doctor"), Some("Please select a doctor"));
        assert_eq!(outcome.errors().len(), 5);
    }

    #[test]
    fn test_login_password_length_in_both_modes() {
        let fields = FieldSet::new()
            .with("email", "doctor@example.com")
            .with("password", "12345");
        for mode in [FormMode::Create, FormMode::Update] {
            let outcome = FormKind::Login.validate(&fields, mode);
            assert_eq!(
                outcome.errors().get("password"),
                Some("Password must be at least 6 characters long.")
            );
        }
    }

    #[test]
    fn test_login_email_is_strict() {
        let fields = FieldSet::new()
            .with("email", "a b@c.d")
            .with("password", "secret1");
        let outcome = FormKind::Login.validate(&fields, FormMode::Create);
        assert_eq!(
            outcome.errors().get("email"),
            Some("Please enter a valid email address.")
        );

        // Patient forms keep the lenient pattern
        let mut fields = patient();
        fields.set("email", "a b@c.d");
        assert!(FormKind::Patient.validate(&fields, FormMode::Create).is_valid());
    }

    #[test]
    fn test_login_blank_fields() {
        let outcome = FormKind::Login.validate(&FormKind::Login.empty_fields(), FormMode::Create);
        assert_eq!(outcome.errors().get("email"), Some(LOGIN_FIELDS_MISSING));
        assert_eq!(outcome.errors().get("password"), Some(LOGIN_FIELDS_MISSING));
    }

    #[test]
    fn test_form_kind_from_str() {
        assert_eq!("doctor".parse::<FormKind>(), Ok(FormKind::Doctor));
        assert!("nurse".parse::<FormKind>().is_err());
    }
}
