use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialStatus {
    pub has_trial_remaining: bool,
    pub trial_used: bool,
    pub trial_ends_at: DateTime<Utc>,
    pub days_remaining: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub used: u64,
    pub limit: u64,
    pub remaining: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan: String,
    pub status: String,
    pub trial_status: TrialStatus,
    pub usage: Usage,
    pub reset_date: DateTime<Utc>,
    pub current_period_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionDetails {
    pub subscription: Subscription,
}

// Returned by cancel, change-plan and reactivate.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionChange {
    pub message: String,
    pub subscription: Subscription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPrice {
    pub monthly: f64,
    pub yearly: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: PlanPrice,
    pub features: Vec<String>,
    pub monthly_requests: u64,
    pub popular: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanCatalog {
    pub plans: Vec<Plan>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrationOption {
    #[default]
    ProratedImmediately,
    FullImmediately,
    DifferenceImmediately,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}
