use serde::Deserialize;
use validator::Validate;

/// Body of the manual-mode compatibility query.
///
/// The category stays a raw string on purpose: an unknown slug produces an
/// empty result at the service level, not a form error.
#[derive(Deserialize, Debug, Validate)]
pub struct FilterCompatibleForm {
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(default)]
    pub current_build: Vec<i32>,
}

/// Body of the whole-build validation request.
#[derive(Deserialize, Debug, Validate)]
pub struct ValidateBuildForm {
    #[validate(length(min = 1))]
    pub component_ids: Vec<i32>,
}

/// Body of the automatic generation request. The budget cap is an API-level
/// guard; the generator itself only enforces the floor.
#[derive(Deserialize, Debug, Validate)]
pub struct AutoBuildForm {
    #[validate(length(min = 1))]
    pub task: String,
    #[validate(range(min = 10_000, max = 500_000))]
    pub budget: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_build_form_enforces_the_budget_bracket() {
        let form = AutoBuildForm {
            task: "office".into(),
            budget: 9_999,
        };
        assert!(form.validate().is_err());

        let form = AutoBuildForm {
            task: "office".into(),
            budget: 500_001,
        };
        assert!(form.validate().is_err());

        let form = AutoBuildForm {
            task: "office".into(),
            budget: 45_000,
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn validate_build_form_rejects_empty_id_lists() {
        let form = ValidateBuildForm {
            component_ids: vec![],
        };
        assert!(form.validate().is_err());
    }
}
