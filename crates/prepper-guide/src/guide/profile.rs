use crate::checklist::Scenario;
use serde::{Deserialize, Serialize};

pub const NOT_SPECIFIED: &str = "Not specified";

/// Questionnaire answers as posted by the web client. Every field is optional;
/// blank strings count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub household_size: Option<String>,
    #[serde(default)]
    pub climate: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl UserProfile {
    pub fn scenario(&self) -> Option<&str> {
        present(&self.scenario)
    }

    pub fn location(&self) -> Option<&str> {
        present(&self.location)
    }

    pub fn household_size(&self) -> Option<&str> {
        present(&self.household_size)
    }

    pub fn climate(&self) -> Option<&str> {
        present(&self.climate)
    }

    pub fn experience(&self) -> Option<&str> {
        present(&self.experience)
    }

    pub fn email(&self) -> Option<&str> {
        present(&self.email)
    }

    /// Scenario used for dataset selection; an unanswered question gets the hurricane list.
    pub fn selection_scenario(&self) -> &str {
        self.scenario().unwrap_or(Scenario::Hurricane.name())
    }

    /// Lower-cased climate used for dataset selection. Only a missing answer is
    /// treated as `moderate` (cold list); a blank or padded answer is kept as sent.
    pub fn selection_climate(&self) -> String {
        self.climate
            .as_deref()
            .unwrap_or("moderate")
            .to_lowercase()
    }

    /// Key/value pairs attached to payment sessions so a confirmed payment can be
    /// traced back to the questionnaire.
    pub fn metadata(&self) -> Vec<(&'static str, String)> {
        [
            ("scenario", self.scenario()),
            ("location", self.location()),
            ("household_size", self.household_size()),
            ("climate", self.climate()),
            ("experience", self.experience()),
            ("email", self.email()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value.to_string())))
        .collect()
    }
}

/// First character upper-cased, the rest lower-cased (`"BEGINNER"` -> `"Beginner"`).
pub(crate) fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_keys_and_tolerates_missing_fields() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"scenario":"Tornado","householdSize":"4","email":"a@b.com"}"#,
        )
        .expect("profile parses");
        assert_eq!(profile.scenario(), Some("Tornado"));
        assert_eq!(profile.household_size(), Some("4"));
        assert_eq!(profile.location(), None);
        assert_eq!(profile.email(), Some("a@b.com"));
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let profile = UserProfile {
            location: Some("   ".to_string()),
            climate: Some(String::new()),
            ..UserProfile::default()
        };
        assert_eq!(profile.location(), None);
        assert_eq!(profile.climate(), None);
        assert_eq!(profile.selection_scenario(), "Hurricane");
    }

    #[test]
    fn only_a_missing_climate_defaults_to_moderate() {
        assert_eq!(UserProfile::default().selection_climate(), "moderate");

        let blank = UserProfile {
            climate: Some(String::new()),
            ..UserProfile::default()
        };
        assert_eq!(blank.selection_climate(), "");

        let padded = UserProfile {
            climate: Some(" Cold ".to_string()),
            ..UserProfile::default()
        };
        assert_eq!(padded.selection_climate(), " cold ");
    }

    #[test]
    fn selection_climate_is_lower_cased() {
        let profile = UserProfile {
            climate: Some("WARM".to_string()),
            ..UserProfile::default()
        };
        assert_eq!(profile.selection_climate(), "warm");
    }

    #[test]
    fn metadata_skips_missing_answers() {
        let profile = UserProfile {
            scenario: Some("Flood".to_string()),
            email: Some("prepper@example.com".to_string()),
            ..UserProfile::default()
        };
        assert_eq!(
            profile.metadata(),
            vec![
                ("scenario", "Flood".to_string()),
                ("email", "prepper@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn capitalize_matches_title_row_formatting() {
        assert_eq!(capitalize("beginner"), "Beginner");
        assert_eq!(capitalize("COLD"), "Cold");
        assert_eq!(capitalize(""), "");
    }
}
