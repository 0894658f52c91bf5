//! Form validation that runs before any network call.
//!
//! Forms hold raw text exactly as typed; `validate` parses and checks it and
//! returns either a payload ready to send or a [`ValidationError`] whose
//! `Display` text is shown to the user.

use crate::models::{Goal, ProfileChanges};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Choose a goal")]
    GoalRequired,
    #[error("Enter your name")]
    NameRequired,
    #[error("Enter your current weight")]
    StartWeightRequired,
    #[error("Enter a target weight")]
    TargetWeightRequired,
    #[error("Target weight must be below your starting weight")]
    TargetNotBelowStart,
    #[error("Target weight must be above your starting weight")]
    TargetNotAboveStart,
    #[error("Enter a valid weight")]
    InvalidWeight,
    #[error("Enter a valid target weight")]
    InvalidTargetWeight,
    #[error("Add a note, a tag or a photo")]
    EmptyDiaryEntry,
    #[error("Enter a positive value")]
    InvalidMeasurement,
}

/// Parse a weight field leniently: blank or unparsable input counts as 0.
/// Accepts a decimal comma.
pub fn parse_weight_lenient(raw: &str) -> f64 {
    parse_decimal(raw).unwrap_or(0.0)
}

/// Parse a decimal field, accepting a decimal comma. `None` for blank or
/// malformed input.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Values collected by the completion form after validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfilePayload {
    pub name: String,
    pub goal: Goal,
    pub weight: f64,
    pub target_weight: f64,
}

impl ProfilePayload {
    pub fn changes(&self) -> ProfileChanges {
        ProfileChanges {
            name: Some(self.name.clone()),
            goal: Some(self.goal),
            initial_weight: Some(self.weight),
            target_weight: Some(self.target_weight),
        }
    }
}

/// The "complete your profile" form.
#[derive(Clone, Debug, PartialEq)]
pub struct CompleteProfileForm {
    pub name: String,
    pub goal: Option<Goal>,
    pub weight: String,
    pub target_weight: String,
}

impl Default for CompleteProfileForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            goal: None,
            weight: "0.0".to_string(),
            target_weight: "0.0".to_string(),
        }
    }
}

impl CompleteProfileForm {
    pub fn validate(&self) -> Result<ProfilePayload, ValidationError> {
        let goal = self.goal.ok_or(ValidationError::GoalRequired)?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }

        let start = parse_weight_lenient(&self.weight);
        let target = parse_weight_lenient(&self.target_weight);
        if start <= 0.0 {
            return Err(ValidationError::StartWeightRequired);
        }

        let target = match goal {
            Goal::WeightLoss => {
                if target <= 0.0 {
                    return Err(ValidationError::TargetWeightRequired);
                }
                if target >= start {
                    return Err(ValidationError::TargetNotBelowStart);
                }
                target
            }
            Goal::Gain => {
                if target <= 0.0 {
                    return Err(ValidationError::TargetWeightRequired);
                }
                if target <= start {
                    return Err(ValidationError::TargetNotAboveStart);
                }
                target
            }
            Goal::Maintenance if target <= 0.0 => start,
            Goal::Maintenance => target,
        };

        Ok(ProfilePayload {
            name: name.to_string(),
            goal,
            weight: start,
            target_weight: target,
        })
    }
}

/// The inline "edit profile" form on the profile screen.
///
/// Only weight loss and maintenance can be picked here; a stored gain goal
/// shows up as unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditProfileForm {
    pub name: String,
    pub goal: Option<Goal>,
    pub weight: String,
    pub target_weight: String,
}

impl EditProfileForm {
    pub const GOALS: [Goal; 2] = [Goal::WeightLoss, Goal::Maintenance];

    /// Pre-fill the form from the stored profile values.
    pub fn prefill(
        name: Option<&str>,
        goal: Option<Goal>,
        weight: Option<f64>,
        target_weight: Option<f64>,
    ) -> Self {
        Self {
            name: name.unwrap_or_default().to_string(),
            goal: goal.filter(|g| *g != Goal::Gain),
            weight: weight.map(|w| w.to_string()).unwrap_or_default(),
            target_weight: target_weight.map(|w| w.to_string()).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ProfileChanges, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        let initial_weight = optional_positive(&self.weight, ValidationError::InvalidWeight)?;
        let target_weight =
            optional_positive(&self.target_weight, ValidationError::InvalidTargetWeight)?;
        Ok(ProfileChanges {
            name: Some(name.to_string()),
            goal: self.goal,
            initial_weight,
            target_weight,
        })
    }
}

fn optional_positive(raw: &str, err: ValidationError) -> Result<Option<f64>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    match parse_decimal(raw) {
        Some(v) if v > 0.0 => Ok(Some(v)),
        _ => Err(err),
    }
}

/// Validate a new body measurement value.
pub fn validate_measurement(raw: &str) -> Result<f64, ValidationError> {
    match parse_decimal(raw) {
        Some(v) if v > 0.0 => Ok(v),
        _ => Err(ValidationError::InvalidMeasurement),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(goal: Goal, weight: &str, target: &str) -> CompleteProfileForm {
        CompleteProfileForm {
            name: " Maria ".to_string(),
            goal: Some(goal),
            weight: weight.to_string(),
            target_weight: target.to_string(),
        }
    }

    #[test]
    fn test_goal_is_required_first() {
        let f = CompleteProfileForm::default();
        assert_eq!(f.validate(), Err(ValidationError::GoalRequired));
    }

    #[test]
    fn test_weight_loss_rules() {
        assert_eq!(form(Goal::WeightLoss, "0.0", "70").validate(), Err(ValidationError::StartWeightRequired));
        assert_eq!(form(Goal::WeightLoss, "80", "").validate(), Err(ValidationError::TargetWeightRequired));
        assert_eq!(form(Goal::WeightLoss, "80", "85").validate(), Err(ValidationError::TargetNotBelowStart));
        assert_eq!(form(Goal::WeightLoss, "80", "80").validate(), Err(ValidationError::TargetNotBelowStart));
        let ok = form(Goal::WeightLoss, "80,5", "72").validate().unwrap();
        assert_eq!(ok.name, "Maria");
        assert_eq!(ok.weight, 80.5);
        assert_eq!(ok.target_weight, 72.0);
    }

    #[test]
    fn test_gain_rules() {
        assert_eq!(form(Goal::Gain, "60", "0").validate(), Err(ValidationError::TargetWeightRequired));
        assert_eq!(form(Goal::Gain, "60", "55").validate(), Err(ValidationError::TargetNotAboveStart));
        assert!(form(Goal::Gain, "60", "66").validate().is_ok());
    }

    #[test]
    fn test_maintenance_defaults_target_to_start() {
        let ok = form(Goal::Maintenance, "70", "0.0").validate().unwrap();
        assert_eq!(ok.target_weight, 70.0);
        let ok = form(Goal::Maintenance, "70", "68").validate().unwrap();
        assert_eq!(ok.target_weight, 68.0);
    }

    #[test]
    fn test_name_required() {
        let mut f = form(Goal::Maintenance, "70", "70");
        f.name = "  ".to_string();
        assert_eq!(f.validate(), Err(ValidationError::NameRequired));
    }

    #[test]
    fn test_garbage_weight_is_zero() {
        assert_eq!(parse_weight_lenient("abc"), 0.0);
        assert_eq!(parse_weight_lenient(""), 0.0);
        assert_eq!(parse_weight_lenient(" 72.4 "), 72.4);
    }

    #[test]
    fn test_edit_form_drops_gain_goal() {
        let f = EditProfileForm::prefill(Some("Oleg"), Some(Goal::Gain), Some(70.0), None);
        assert_eq!(f.goal, None);
        assert_eq!(f.weight, "70");
        assert_eq!(f.target_weight, "");
    }

    #[test]
    fn test_edit_form_validation() {
        let mut f = EditProfileForm::prefill(Some("Oleg"), Some(Goal::WeightLoss), Some(90.0), Some(80.0));
        let changes = f.validate().unwrap();
        assert_eq!(changes.initial_weight, Some(90.0));
        assert_eq!(changes.goal, Some(Goal::WeightLoss));

        f.weight = String::new();
        assert_eq!(f.validate().unwrap().initial_weight, None);

        f.weight = "-3".to_string();
        assert_eq!(f.validate(), Err(ValidationError::InvalidWeight));

        f.weight = "90".to_string();
        f.target_weight = "x".to_string();
        assert_eq!(f.validate(), Err(ValidationError::InvalidTargetWeight));

        f.name = String::new();
        assert_eq!(f.validate(), Err(ValidationError::NameRequired));
    }

    #[test]
    fn test_measurement_value() {
        assert_eq!(validate_measurement("81.2"), Ok(81.2));
        assert_eq!(validate_measurement("0"), Err(ValidationError::InvalidMeasurement));
        assert_eq!(validate_measurement(""), Err(ValidationError::InvalidMeasurement));
    }
}
