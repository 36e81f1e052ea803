//! Core data model for the MVP plan builder

use serde::{Deserialize, Serialize};

/// The complete set of user-entered values across all wizard steps.
///
/// Sequence fields are insertion-ordered and mutated only by append,
/// remove, or replace-at-index. No field is ever null: absent data is an
/// empty string or an empty sequence, which keeps the serialized form
/// stable across partial drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSnapshot {
    // Step 1: Your Idea
    pub problem: String,
    pub solution: String,
    pub target_user: String,

    // Step 2: Core Features
    pub main_feature: String,
    pub supporting_features: Vec<String>,

    // Step 3: User Flow
    pub user_steps: Vec<String>,
    pub user_step_details: Vec<String>,
    pub pain_points: String,
    pub success_metrics: String,
    pub alternative_flows: Vec<String>,

    // Step 4: Technical Specs
    pub platform: Vec<String>,
    pub tech_needs: String,
    pub timeframe: String,

    // Step 5: Review & Export
    pub title: String,
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self {
            problem: String::new(),
            solution: String::new(),
            target_user: String::new(),
            main_feature: String::new(),
            supporting_features: vec![String::new(), String::new()],
            user_steps: vec![String::new(), String::new(), String::new()],
            user_step_details: vec![String::new(), String::new(), String::new()],
            pain_points: String::new(),
            success_metrics: String::new(),
            alternative_flows: Vec::new(),
            platform: Vec::new(),
            tech_needs: String::new(),
            timeframe: String::new(),
            title: "My MVP Plan".to_string(),
        }
    }
}

impl FormSnapshot {
    /// Borrow the text field identified by `field`, or None if `field`
    /// names a sequence field.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Problem => Some(&self.problem),
            Field::Solution => Some(&self.solution),
            Field::TargetUser => Some(&self.target_user),
            Field::MainFeature => Some(&self.main_feature),
            Field::TechNeeds => Some(&self.tech_needs),
            Field::Timeframe => Some(&self.timeframe),
            Field::Title => Some(&self.title),
            _ => None,
        }
    }

    /// Mutably borrow the text field identified by `field`.
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Problem => Some(&mut self.problem),
            Field::Solution => Some(&mut self.solution),
            Field::TargetUser => Some(&mut self.target_user),
            Field::MainFeature => Some(&mut self.main_feature),
            Field::TechNeeds => Some(&mut self.tech_needs),
            Field::Timeframe => Some(&mut self.timeframe),
            Field::Title => Some(&mut self.title),
            _ => None,
        }
    }

    /// Borrow the sequence field identified by `field`, or None if
    /// `field` names a text field.
    pub fn list(&self, field: Field) -> Option<&[String]> {
        match field {
            Field::SupportingFeatures => Some(&self.supporting_features),
            Field::UserSteps => Some(&self.user_steps),
            Field::Platform => Some(&self.platform),
            _ => None,
        }
    }

    /// Mutably borrow the sequence field identified by `field`.
    pub fn list_mut(&mut self, field: Field) -> Option<&mut Vec<String>> {
        match field {
            Field::SupportingFeatures => Some(&mut self.supporting_features),
            Field::UserSteps => Some(&mut self.user_steps),
            Field::Platform => Some(&mut self.platform),
            _ => None,
        }
    }
}

/// Typed identifier for every validated snapshot field.
///
/// Replaces dotted-path string lookups: validation state and touched
/// markers are keyed by this enum, so a typo is a compile error instead
/// of a silent "key not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Problem,
    Solution,
    TargetUser,
    MainFeature,
    SupportingFeatures,
    UserSteps,
    Platform,
    TechNeeds,
    Timeframe,
    Title,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Problem => write!(f, "problem"),
            Self::Solution => write!(f, "solution"),
            Self::TargetUser => write!(f, "targetUser"),
            Self::MainFeature => write!(f, "mainFeature"),
            Self::SupportingFeatures => write!(f, "supportingFeatures"),
            Self::UserSteps => write!(f, "userSteps"),
            Self::Platform => write!(f, "platform"),
            Self::TechNeeds => write!(f, "techNeeds"),
            Self::Timeframe => write!(f, "timeframe"),
            Self::Title => write!(f, "title"),
        }
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "problem" => Ok(Self::Problem),
            "solution" => Ok(Self::Solution),
            "targetUser" | "target_user" => Ok(Self::TargetUser),
            "mainFeature" | "main_feature" => Ok(Self::MainFeature),
            "supportingFeatures" | "supporting_features" => Ok(Self::SupportingFeatures),
            "userSteps" | "user_steps" => Ok(Self::UserSteps),
            "platform" => Ok(Self::Platform),
            "techNeeds" | "tech_needs" => Ok(Self::TechNeeds),
            "timeframe" => Ok(Self::Timeframe),
            "title" => Ok(Self::Title),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

impl Field {
    /// All validated fields, in step order.
    pub const ALL: [Field; 10] = [
        Field::Problem,
        Field::Solution,
        Field::TargetUser,
        Field::MainFeature,
        Field::SupportingFeatures,
        Field::UserSteps,
        Field::Platform,
        Field::TechNeeds,
        Field::Timeframe,
        Field::Title,
    ];

    /// Whether this identifier names a sequence field.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::SupportingFeatures | Self::UserSteps | Self::Platform
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_matches_blank_form() {
        let snapshot = FormSnapshot::default();
        assert_eq!(snapshot.problem, "");
        assert_eq!(snapshot.supporting_features, vec!["", ""]);
        assert_eq!(snapshot.user_steps.len(), 3);
        assert!(snapshot.platform.is_empty());
        assert_eq!(snapshot.title, "My MVP Plan");
    }

    #[test]
    fn field_roundtrips_through_strings() {
        for field in Field::ALL {
            let parsed: Field = field.to_string().parse().unwrap();
            assert_eq!(parsed, field);
        }
        assert!("notAField".parse::<Field>().is_err());
    }

    #[test]
    fn text_and_list_accessors_are_disjoint() {
        let mut snapshot = FormSnapshot::default();
        for field in Field::ALL {
            if field.is_list() {
                assert!(snapshot.text(field).is_none());
                assert!(snapshot.list_mut(field).is_some());
            } else {
                assert!(snapshot.list(field).is_none());
                assert!(snapshot.text_mut(field).is_some());
            }
        }
    }

    #[test]
    fn snapshot_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(FormSnapshot::default()).unwrap();
        assert!(json.get("targetUser").is_some());
        assert!(json.get("supportingFeatures").is_some());
        assert!(json.get("target_user").is_none());
    }
}
