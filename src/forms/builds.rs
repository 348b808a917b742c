use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{BuildName, ComponentId, TypeConstraintError};

/// Raw body of the save-build request.
#[derive(Deserialize, Debug, Validate)]
pub struct SaveBuildForm {
    #[validate(length(min = 1, max = 255))]
    pub build_name: String,
    #[validate(length(min = 1))]
    pub component_ids: Vec<i32>,
}

/// Typed payload handed to the service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveBuildPayload {
    pub name: BuildName,
    /// Deduplicated, with non-positive ids dropped.
    pub component_ids: Vec<ComponentId>,
}

#[derive(Debug, Error)]
pub enum SaveBuildFormError {
    #[error("Save build form validation failed: {0}")]
    Validation(String),
    #[error("Save build form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SaveBuildFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SaveBuildFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<SaveBuildForm> for SaveBuildPayload {
    type Error = SaveBuildFormError;

    fn try_from(value: SaveBuildForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let mut seen = std::collections::HashSet::new();
        let component_ids: Vec<ComponentId> = value
            .component_ids
            .into_iter()
            .filter_map(|id| ComponentId::new(id).ok())
            .filter(|id| seen.insert(*id))
            .collect();

        if component_ids.is_empty() {
            return Err(SaveBuildFormError::TypeConstraint(
                "no valid component ids supplied".to_string(),
            ));
        }

        Ok(Self {
            name: BuildName::new(value.build_name)?,
            component_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_invalid_ids_and_deduplicates() {
        let form = SaveBuildForm {
            build_name: "My rig".into(),
            component_ids: vec![3, 0, -1, 3, 7],
        };

        let payload: SaveBuildPayload = form.try_into().unwrap();
        assert_eq!(
            payload.component_ids,
            vec![ComponentId::new(3).unwrap(), ComponentId::new(7).unwrap()]
        );
        assert_eq!(payload.name.as_str(), "My rig");
    }

    #[test]
    fn rejects_lists_with_no_valid_ids() {
        let form = SaveBuildForm {
            build_name: "My rig".into(),
            component_ids: vec![0, -5],
        };

        let payload: Result<SaveBuildPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn rejects_overlong_names() {
        let form = SaveBuildForm {
            build_name: "x".repeat(256),
            component_ids: vec![1],
        };

        let payload: Result<SaveBuildPayload, _> = form.try_into();
        assert!(payload.is_err());
    }
}
