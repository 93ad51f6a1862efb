//! Enrollment entity as consumed by the REP-P employee import.

use serde::{Deserialize, Serialize};

/// One employee enrollment entry.
///
/// Field names follow the time clock's JSON import schema; optional fields
/// are omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentEntity {
    /// Employee name.
    pub nome: String,
    /// Tax id, 11 digits without punctuation.
    pub cpf: String,
    /// Registration number.
    pub matricula: String,
    /// Badge card data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mifare_dado: Option<String>,
    /// Time-clock password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
    /// Biometric template payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio_dados: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_optional_fields() {
        let entity = EnrollmentEntity {
            nome: "Ana".to_string(),
            cpf: "52998224725".to_string(),
            matricula: "001".to_string(),
            mifare_dado: Some("A1B2".to_string()),
            senha: None,
            bio_dados: Some("TPL".to_string()),
        };

        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["mifareDado"], "A1B2");
        assert_eq!(json["bioDados"], "TPL");
        assert!(json.get("senha").is_none());
    }
}
