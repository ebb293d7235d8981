//! Client-side form validation.
//!
//! [`fields`] holds the single-field checks, [`engine`] runs a field set
//! through a schema, and [`forms`] declares the schema of each form the
//! dashboards submit.
//!
//! ```rust
//! use lifebridge::validation::{FieldSet, FormKind, FormMode};
//!
//! let fields = FieldSet::new().with("email", "not-an-email");
//! let outcome = FormKind::Login.validate(&fields, FormMode::Create);
//! assert!(!outcome.is_valid());
//! assert_eq!(
//!     outcome.errors().get("email"),
//!     Some("Please enter a valid email address.")
//! );
//! ```

pub mod engine;
pub mod fields;
pub mod forms;

pub use engine::{validate_fields, FieldRule, FieldSet, FormMode, ValidationErrors, ValidationOutcome};
pub use fields::Check;
pub use forms::{validate, FormKind};
