use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Backend identifiers come back as numbers today, but nothing promises that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Matches a route segment like `3` or `basic` against this id.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            RecordId::Number(n) => raw.trim().parse::<i64>().map(|v| v == *n).unwrap_or(false),
            RecordId::Text(s) => s == raw.trim(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

pub type PlanId = RecordId;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanDetail {
    pub id: RecordId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionPlan {
    pub id: PlanId,
    pub name: String,
    /// Rendered exactly as the backend sent it; currency is not part of the contract.
    pub amount: serde_json::Number,
    pub duration_months: u32,
    pub details: Vec<PlanDetail>,
}

impl SubscriptionPlan {
    pub fn price_label(&self) -> String {
        self.amount.to_string()
    }

    pub fn duration_label(&self) -> String {
        if self.duration_months == 1 {
            "1 month".to_string()
        } else {
            format!("{} months", self.duration_months)
        }
    }

    /// Slug used in `/plan-details/<slug>` links from the landing page.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// `"Premium Plus "` -> `"premium-plus"`.
pub fn slugify(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

// ---- wire records ----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanRecord {
    subscription_id: RecordId,
    subscription_name: String,
    subscription_amount: serde_json::Number,
    subscription_months: u32,
    #[serde(default)]
    details: Option<Vec<DetailRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailRecord {
    subscription_details_id: RecordId,
    details: String,
}

impl TryFrom<PlanRecord> for SubscriptionPlan {
    type Error = String;

    fn try_from(r: PlanRecord) -> Result<Self, Self::Error> {
        if r.subscription_months == 0 {
            return Err(format!(
                "plan {} has a duration of 0 months",
                r.subscription_id
            ));
        }

        Ok(SubscriptionPlan {
            id: r.subscription_id,
            name: r.subscription_name,
            amount: r.subscription_amount,
            duration_months: r.subscription_months,
            details: r
                .details
                .unwrap_or_default()
                .into_iter()
                .map(|d| PlanDetail {
                    id: d.subscription_details_id,
                    text: d.details,
                })
                .collect(),
        })
    }
}

fn describe(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn parse_plan_value(v: Value) -> Result<SubscriptionPlan, String> {
    let record: PlanRecord = serde_json::from_value(v).map_err(|e| e.to_string())?;
    SubscriptionPlan::try_from(record)
}

/// Decodes a catalog body. Anything but a list of well-formed plans is a shape error.
pub fn parse_catalog(body: &str) -> Result<Vec<SubscriptionPlan>, ApiError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Shape(format!("catalog is not valid JSON ({e})")))?;

    let Value::Array(items) = value else {
        return Err(ApiError::Shape(format!(
            "expected a list of plans, got {}",
            describe(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            parse_plan_value(item)
                .map_err(|e| ApiError::Shape(format!("plan #{} is malformed: {e}", i + 1)))
        })
        .collect()
}

/// Decodes a single plan body (`GET /api/members/subscriptions/{id}`).
pub fn parse_plan(body: &str) -> Result<SubscriptionPlan, ApiError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Shape(format!("plan is not valid JSON ({e})")))?;
    if !value.is_object() {
        return Err(ApiError::Shape(format!(
            "expected a plan, got {}",
            describe(&value)
        )));
    }
    parse_plan_value(value).map_err(|e| ApiError::Shape(format!("plan is malformed: {e}")))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRef {
    pub subscription_id: PlanId,
}

/// Body for `POST /api/gyms/register`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub gym_name: String,
    pub email: String,
    pub plan_type: String,
    pub phone_number: String,
    pub office_number: String,
    pub location: String,
    pub active: bool,
    pub subscription: SubscriptionRef,
}
