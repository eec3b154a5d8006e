use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum YesNo {
    No,
    Yes,
}

/// Patient vitals submitted from the risk scoring form.
///
/// Field order is the order the record is serialized into the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskInput {
    pub age: u32,
    pub gender: Gender,
    #[serde(rename = "systolicBP")]
    pub systolic_bp: u32,
    pub cholesterol: u32,
    pub hdl: u32,
    pub smoker: YesNo,
    pub diabetes: YesNo,
}

impl Default for RiskInput {
    fn default() -> Self {
        Self {
            age: 55,
            gender: Gender::Male,
            systolic_bp: 135,
            cholesterol: 220,
            hdl: 45,
            smoker: YesNo::Yes,
            diabetes: YesNo::No,
        }
    }
}

impl RiskInput {
    pub fn to_prompt_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn default_form_serializes_in_field_order() {
        let json = RiskInput::default().to_prompt_json().unwrap();
        assert_eq!(
            json,
            r#"{"age":55,"gender":"Male","systolicBP":135,"cholesterol":220,"hdl":45,"smoker":"Yes","diabetes":"No"}"#
        );
    }

    #[test]
    fn select_values_parse_back() {
        assert_eq!(Gender::from_str("Female").unwrap(), Gender::Female);
        assert_eq!(YesNo::from_str("Yes").unwrap(), YesNo::Yes);
        assert!(YesNo::from_str("Maybe").is_err());
    }

    #[test]
    fn deserializes_from_form_payload() {
        let input: RiskInput = serde_json::from_str(
            r#"{"age":61,"gender":"Female","systolicBP":150,"cholesterol":240,"hdl":38,"smoker":"No","diabetes":"Yes"}"#,
        )
        .unwrap();
        assert_eq!(input.systolic_bp, 150);
        assert_eq!(input.diabetes, YesNo::Yes);
    }
}
