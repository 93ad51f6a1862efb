//! Employee model.
//!
//! An [`Employee`] is identified by its tax id; its name is a secondary
//! matching key used by the linker.

use serde::{Deserialize, Serialize};

/// An employee known to the current session.
///
/// Created by the roster codec, by the generator roster import or by the
/// enrollment assembler. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Display name.
    pub name: String,
    /// Canonical tax id (digits only).
    pub tax_id: String,
    /// Registration number ("matrícula").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    /// Badge id ("mifare" card data).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_id: Option<String>,
    /// Time-clock password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Biometric template payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biometric_template: Option<String>,
}

impl Employee {
    /// Creates an employee carrying only the two identity fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use rep_p_toolkit::models::Employee;
    ///
    /// let employee = Employee::new("Ana Silva", "52998224725");
    /// assert_eq!(employee.name, "Ana Silva");
    /// assert!(employee.registration_number.is_none());
    /// ```
    pub fn new(name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tax_id: tax_id.into(),
            registration_number: None,
            badge_id: None,
            password: None,
            biometric_template: None,
        }
    }
}
