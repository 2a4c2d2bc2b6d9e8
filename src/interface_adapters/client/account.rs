use reqwest::Method;

use super::ApiClient;
use crate::domain::auth::MessageResponse;
use crate::domain::billing::{
    BillingCycle, CheckoutSession, PlanCatalog, ProrationOption, SubscriptionChange,
    SubscriptionDetails,
};
use crate::domain::endpoint::Endpoint;
use crate::domain::errors::ApiError;
use crate::domain::settings::{ProfileUpdate, ProfileUpdated, SettingsResponse};
use crate::interface_adapters::protocol::{
    ChangePasswordRequest, ChangePlanRequest, CheckoutRequest, DeleteAccountRequest,
};

// Profile settings.
impl ApiClient {
    pub async fn get_profile_settings(&self) -> Result<SettingsResponse, ApiError> {
        self.get(Endpoint::ProfileSettings).await
    }

    pub async fn update_profile_settings(
        &self,
        update: &ProfileUpdate,
    ) -> Result<ProfileUpdated, ApiError> {
        self.send(Method::PUT, Endpoint::ProfileSettings, Some(update))
            .await
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        self.send(
            Method::PUT,
            Endpoint::PasswordSettings,
            Some(&ChangePasswordRequest {
                current_password,
                new_password,
            }),
        )
        .await
    }

    /// Deletes the account server-side and drops the local session with it.
    pub async fn delete_account(&self, confirmation: &str) -> Result<MessageResponse, ApiError> {
        let response: MessageResponse = self
            .send(
                Method::DELETE,
                Endpoint::AccountSettings,
                Some(&DeleteAccountRequest { confirmation }),
            )
            .await?;
        self.session.clear_auth_data();
        Ok(response)
    }
}

// Subscription and payments.
impl ApiClient {
    pub async fn get_subscription_details(&self) -> Result<SubscriptionDetails, ApiError> {
        self.get(Endpoint::SubscriptionDetails).await
    }

    pub async fn get_subscription_plans(&self) -> Result<PlanCatalog, ApiError> {
        self.get(Endpoint::SubscriptionPlans).await
    }

    // Does not require a session.
    pub async fn get_public_subscription_plans(&self) -> Result<PlanCatalog, ApiError> {
        self.get(Endpoint::PublicPlans).await
    }

    pub async fn create_checkout_session(
        &self,
        plan: &str,
        billing_cycle: BillingCycle,
    ) -> Result<CheckoutSession, ApiError> {
        self.send(
            Method::POST,
            Endpoint::CheckoutSession,
            Some(&CheckoutRequest {
                plan,
                billing_cycle,
            }),
        )
        .await
    }

    pub async fn cancel_subscription(&self) -> Result<SubscriptionChange, ApiError> {
        self.send::<_, ()>(Method::POST, Endpoint::SubscriptionCancel, None)
            .await
    }

    pub async fn change_subscription_plan(
        &self,
        plan: &str,
        proration_option: ProrationOption,
    ) -> Result<SubscriptionChange, ApiError> {
        self.send(
            Method::POST,
            Endpoint::SubscriptionChangePlan,
            Some(&ChangePlanRequest {
                plan,
                proration_option,
            }),
        )
        .await
    }

    pub async fn reactivate_subscription(&self) -> Result<SubscriptionChange, ApiError> {
        self.send::<_, ()>(Method::POST, Endpoint::SubscriptionReactivate, None)
            .await
    }
}
