//! Plan storage: record types, payload validation, and the in-memory backend

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use plankit_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A stored MVP plan. The payload is an opaque JSON document (a
/// serialized form snapshot); the server never looks inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MvpPlan {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub title: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated creation payload.
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub title: String,
    pub data: Value,
    pub user_id: Option<String>,
}

/// Validated partial-update payload. Unset fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct PlanPatch {
    pub title: Option<String>,
    pub data: Option<Value>,
}

/// One itemized problem with a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: &str, message: &str) -> Self {
        Self {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

/// Validate a creation body against the plan schema.
pub fn parse_new_plan(body: &Value) -> std::result::Result<NewPlan, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let title = match body.get("title").and_then(Value::as_str) {
        Some(title) if !title.is_empty() => Some(title.to_string()),
        Some(_) => {
            issues.push(ValidationIssue::new("title", "Project title is required"));
            None
        }
        None => {
            issues.push(ValidationIssue::new("title", "Expected a string title"));
            None
        }
    };

    let data = match body.get("data") {
        Some(data) if !data.is_null() => Some(data.clone()),
        _ => {
            issues.push(ValidationIssue::new("data", "Plan data is required"));
            None
        }
    };

    let user_id = match body.get("userId") {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) => Some(id.clone()),
        Some(_) => {
            issues.push(ValidationIssue::new("userId", "Expected a string userId"));
            None
        }
    };

    match (title, data) {
        (Some(title), Some(data)) if issues.is_empty() => Ok(NewPlan {
            title,
            data,
            user_id,
        }),
        _ => Err(issues),
    }
}

/// Validate a partial-update body. Only present fields are checked.
pub fn parse_plan_patch(body: &Value) -> std::result::Result<PlanPatch, Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let mut patch = PlanPatch::default();

    if let Some(title) = body.get("title") {
        match title.as_str() {
            Some(title) if !title.is_empty() => patch.title = Some(title.to_string()),
            Some(_) => issues.push(ValidationIssue::new("title", "Project title is required")),
            None => issues.push(ValidationIssue::new("title", "Expected a string title")),
        }
    }

    if let Some(data) = body.get("data") {
        if data.is_null() {
            issues.push(ValidationIssue::new("data", "Plan data is required"));
        } else {
            patch.data = Some(data.clone());
        }
    }

    if issues.is_empty() {
        Ok(patch)
    } else {
        Err(issues)
    }
}

/// Storage backend for MVP plans: a keyed CRUD surface, nothing more.
#[async_trait]
pub trait PlanStorage: Send + Sync {
    async fn get_plan(&self, id: Uuid) -> Result<Option<MvpPlan>>;
    async fn plans_by_user(&self, user_id: &str) -> Result<Vec<MvpPlan>>;
    async fn create_plan(&self, new: NewPlan) -> Result<MvpPlan>;
    async fn update_plan(&self, id: Uuid, patch: PlanPatch) -> Result<Option<MvpPlan>>;
    async fn delete_plan(&self, id: Uuid) -> Result<bool>;
}

/// In-memory plan storage keyed by generated identifiers.
#[derive(Default)]
pub struct MemStorage {
    plans: RwLock<HashMap<Uuid, MvpPlan>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanStorage for MemStorage {
    async fn get_plan(&self, id: Uuid) -> Result<Option<MvpPlan>> {
        Ok(self.plans.read().await.get(&id).cloned())
    }

    async fn plans_by_user(&self, user_id: &str) -> Result<Vec<MvpPlan>> {
        Ok(self
            .plans
            .read()
            .await
            .values()
            .filter(|plan| plan.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create_plan(&self, new: NewPlan) -> Result<MvpPlan> {
        let now = Utc::now();
        let plan = MvpPlan {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            title: new.title,
            data: new.data,
            created_at: now,
            updated_at: now,
        };
        self.plans.write().await.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn update_plan(&self, id: Uuid, patch: PlanPatch) -> Result<Option<MvpPlan>> {
        let mut plans = self.plans.write().await;
        let Some(plan) = plans.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            plan.title = title;
        }
        if let Some(data) = patch.data {
            plan.data = data;
        }
        plan.updated_at = Utc::now();
        Ok(Some(plan.clone()))
    }

    async fn delete_plan(&self, id: Uuid) -> Result<bool> {
        Ok(self.plans.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_plan(title: &str, user_id: Option<&str>) -> NewPlan {
        NewPlan {
            title: title.to_string(),
            data: json!({"problem": "example"}),
            user_id: user_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let storage = MemStorage::new();
        let created = storage.create_plan(new_plan("Bill Splitter", None)).await.unwrap();

        let fetched = storage.get_plan(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Bill Splitter");
        assert_eq!(fetched.created_at, fetched.updated_at);
        assert_eq!(fetched.user_id, None);
    }

    #[tokio::test]
    async fn plans_are_filtered_by_user() {
        let storage = MemStorage::new();
        storage.create_plan(new_plan("A", Some("alice"))).await.unwrap();
        storage.create_plan(new_plan("B", Some("bob"))).await.unwrap();
        storage.create_plan(new_plan("C", None)).await.unwrap();

        let plans = storage.plans_by_user("alice").await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].title, "A");
    }

    #[tokio::test]
    async fn partial_update_preserves_unset_fields() {
        let storage = MemStorage::new();
        let created = storage.create_plan(new_plan("Original", None)).await.unwrap();

        let updated = storage
            .update_plan(
                created.id,
                PlanPatch {
                    title: Some("Renamed".to_string()),
                    data: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.data, created.data);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_plans() {
        let storage = MemStorage::new();
        let id = Uuid::new_v4();
        assert!(storage.update_plan(id, PlanPatch::default()).await.unwrap().is_none());
        assert!(!storage.delete_plan(id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_the_plan() {
        let storage = MemStorage::new();
        let created = storage.create_plan(new_plan("Gone soon", None)).await.unwrap();
        assert!(storage.delete_plan(created.id).await.unwrap());
        assert!(storage.get_plan(created.id).await.unwrap().is_none());
    }

    #[test]
    fn new_plan_body_is_validated_with_itemized_issues() {
        let ok = parse_new_plan(&json!({"title": "My Plan", "data": {}, "userId": "alice"}));
        assert_eq!(ok.unwrap().user_id.as_deref(), Some("alice"));

        let issues = parse_new_plan(&json!({"title": "", "userId": 7})).unwrap_err();
        let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["title", "data", "userId"]);
    }

    #[test]
    fn patch_body_checks_only_present_fields() {
        let patch = parse_plan_patch(&json!({})).unwrap();
        assert!(patch.title.is_none() && patch.data.is_none());

        let patch = parse_plan_patch(&json!({"title": "Renamed"})).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Renamed"));

        let issues = parse_plan_patch(&json!({"title": "", "data": null})).unwrap_err();
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn plan_serializes_with_camel_case_wire_keys() {
        let plan = MvpPlan {
            id: Uuid::new_v4(),
            user_id: Some("alice".to_string()),
            title: "Wire".to_string(),
            data: json!({}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("user_id").is_none());
    }
}
