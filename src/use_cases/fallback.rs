use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Value, json};

use crate::domain::auth::User;
use crate::domain::endpoint::Endpoint;

const FREE_TIER_REQUESTS: u64 = 25;
const RESET_WINDOW_DAYS: i64 = 30;
const EXPIRED_TRIAL_DAYS: i64 = 7;

// Inputs a fallback payload may depend on.
pub struct FallbackContext<'a> {
    pub now: DateTime<Utc>,
    pub cached_user: Option<&'a User>,
}

// Conservative payloads for read-mostly endpoints when the backend is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Quota,
    CachedUser,
    SubscriptionDetails,
    PlanCatalog,
    OutfitStats,
}

// The non-critical allow-list. Anything absent here must surface transport errors.
pub fn fallback_for(endpoint: &Endpoint) -> Option<Fallback> {
    match endpoint {
        Endpoint::Quota => Some(Fallback::Quota),
        Endpoint::Me => Some(Fallback::CachedUser),
        Endpoint::SubscriptionDetails => Some(Fallback::SubscriptionDetails),
        Endpoint::SubscriptionPlans | Endpoint::PublicPlans => Some(Fallback::PlanCatalog),
        Endpoint::OutfitStats => Some(Fallback::OutfitStats),
        _ => None,
    }
}

impl Fallback {
    pub fn produce(self, ctx: &FallbackContext<'_>) -> Value {
        let reset_date = timestamp(ctx.now + Duration::days(RESET_WINDOW_DAYS));
        match self {
            Fallback::Quota => json!({
                "monthlyRequests": FREE_TIER_REQUESTS,
                "usedThisMonth": 0,
                "remaining": FREE_TIER_REQUESTS,
                "resetDate": reset_date,
                "hasQuota": true
            }),
            Fallback::CachedUser => json!({ "user": ctx.cached_user }),
            Fallback::SubscriptionDetails => json!({
                "subscription": {
                    "plan": "free",
                    "status": "active",
                    "trialStatus": {
                        "hasTrialRemaining": false,
                        "trialUsed": true,
                        "trialEndsAt": timestamp(ctx.now - Duration::days(EXPIRED_TRIAL_DAYS)),
                        "daysRemaining": 0
                    },
                    "usage": {
                        "used": 0,
                        "limit": FREE_TIER_REQUESTS,
                        "remaining": FREE_TIER_REQUESTS
                    },
                    "resetDate": reset_date
                }
            }),
            Fallback::PlanCatalog => json!({
                "plans": [
                    {
                        "id": "free",
                        "name": "Free",
                        "description": "Perfect for getting started",
                        "price": { "monthly": 0, "yearly": 0 },
                        "features": [
                            "25 generations per month",
                            "Basic support",
                            "Standard queue priority"
                        ],
                        "monthlyRequests": FREE_TIER_REQUESTS,
                        "popular": false
                    },
                    {
                        "id": "pro",
                        "name": "Pro",
                        "description": "For serious creators",
                        "price": { "monthly": 19, "yearly": 190 },
                        "features": [
                            "500 generations per month",
                            "Priority support",
                            "High queue priority",
                            "Advanced features"
                        ],
                        "monthlyRequests": 500,
                        "popular": true
                    },
                    {
                        "id": "enterprise",
                        "name": "Enterprise",
                        "description": "For businesses and teams",
                        "price": { "monthly": 99, "yearly": 990 },
                        "features": [
                            "Unlimited generations",
                            "24/7 support",
                            "Highest priority",
                            "Team management",
                            "Custom integrations"
                        ],
                        "monthlyRequests": 999_999,
                        "popular": false
                    }
                ]
            }),
            Fallback::OutfitStats => json!({
                "total": 0,
                "byType": { "model": 0, "outfit": 0, "output": 0 },
                "storageUsage": { "totalBytes": 0, "totalFiles": 0, "byType": {} },
                "favorites": 0,
                "generationAttempts": 0
            }),
        }
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
