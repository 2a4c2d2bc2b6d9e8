use crate::domain::errors::ApiError;

// Every backend route the client talks to. Paths are relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Signup,
    Login,
    GoogleAuthUrl,
    GoogleToken,
    OtpSend,
    OtpVerify,
    OtpResend,
    Me,
    Quota,
    Logout,
    UploadDirect,
    PublicImages,
    PublicPlans,
    Generate,
    GenerateStatus(String),
    Outfits,
    OutfitStats,
    OutfitFavorite(String),
    Outfit(String),
    AssetMetadata(String),
    ProfileSettings,
    PasswordSettings,
    AccountSettings,
    SubscriptionDetails,
    SubscriptionPlans,
    SubscriptionCancel,
    SubscriptionChangePlan,
    SubscriptionReactivate,
    CheckoutSession,
    QuiltDesign,
    QuiltDesignStatus(String),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Signup => "/auth/signup".into(),
            Endpoint::Login => "/auth/login".into(),
            Endpoint::GoogleAuthUrl => "/auth/google/url".into(),
            Endpoint::GoogleToken => "/auth/google/token".into(),
            Endpoint::OtpSend => "/auth/otp/send".into(),
            Endpoint::OtpVerify => "/auth/otp/verify".into(),
            Endpoint::OtpResend => "/auth/otp/resend".into(),
            Endpoint::Me => "/auth/me".into(),
            Endpoint::Quota => "/auth/quota".into(),
            Endpoint::Logout => "/auth/logout".into(),
            Endpoint::UploadDirect => "/uploads/direct".into(),
            Endpoint::PublicImages => "/public/images".into(),
            Endpoint::PublicPlans => "/public/plans".into(),
            Endpoint::Generate => "/generate".into(),
            Endpoint::GenerateStatus(job_id) => format!("/generate/{}/status", segment(job_id)),
            Endpoint::Outfits => "/outfits".into(),
            Endpoint::OutfitStats => "/outfits/stats".into(),
            Endpoint::OutfitFavorite(id) => format!("/outfits/{}/favorite", segment(id)),
            Endpoint::Outfit(id) => format!("/outfits/{}", segment(id)),
            Endpoint::AssetMetadata(id) => format!("/assets/{}/metadata", segment(id)),
            Endpoint::ProfileSettings => "/settings/profile".into(),
            Endpoint::PasswordSettings => "/settings/password".into(),
            Endpoint::AccountSettings => "/settings/account".into(),
            Endpoint::SubscriptionDetails => "/subscription/details".into(),
            Endpoint::SubscriptionPlans => "/subscription/plans".into(),
            Endpoint::SubscriptionCancel => "/subscription/cancel".into(),
            Endpoint::SubscriptionChangePlan => "/subscription/change-plan".into(),
            Endpoint::SubscriptionReactivate => "/subscription/reactivate".into(),
            Endpoint::CheckoutSession => "/payments/create-checkout-session".into(),
            Endpoint::QuiltDesign => "/tools/quilt-design".into(),
            Endpoint::QuiltDesignStatus(job_id) => {
                format!("/tools/quilt-design/{}/status", segment(job_id))
            }
        }
    }

    // Credential-establishing calls. A 401/403 from these is a rejected attempt,
    // not an expired session, so it must never clear the stored session.
    pub fn is_auth_endpoint(&self) -> bool {
        matches!(
            self,
            Endpoint::Signup
                | Endpoint::Login
                | Endpoint::OtpSend
                | Endpoint::OtpVerify
                | Endpoint::OtpResend
        )
    }
}

impl Endpoint {
    /// Rejects identifiers that cannot stand as their own path segment.
    ///
    /// Percent-encoding keeps `/` inside the segment, but URL parsers still
    /// resolve `.`, `..` and their `%2E` forms, and an empty id collapses into
    /// the parent route.
    pub fn ensure_addressable(&self) -> Result<(), ApiError> {
        let id = match self {
            Endpoint::GenerateStatus(id)
            | Endpoint::OutfitFavorite(id)
            | Endpoint::Outfit(id)
            | Endpoint::AssetMetadata(id)
            | Endpoint::QuiltDesignStatus(id) => id,
            _ => return Ok(()),
        };
        if matches!(id.as_str(), "" | "." | "..") {
            return Err(ApiError::Validation(format!("Invalid identifier: {id:?}")));
        }
        Ok(())
    }
}

// Percent-encode an identifier used as a single path segment.
fn segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterised_paths_embed_the_identifier() {
        assert_eq!(
            Endpoint::GenerateStatus("job-1".into()).path(),
            "/generate/job-1/status"
        );
        assert_eq!(
            Endpoint::OutfitFavorite("abc".into()).path(),
            "/outfits/abc/favorite"
        );
        assert_eq!(Endpoint::Outfit("abc".into()).path(), "/outfits/abc");
        assert_eq!(
            Endpoint::QuiltDesignStatus("q9".into()).path(),
            "/tools/quilt-design/q9/status"
        );
    }

    #[test]
    fn identifiers_cannot_escape_their_segment() {
        assert_eq!(
            Endpoint::Outfit("../settings/account".into()).path(),
            "/outfits/..%2Fsettings%2Faccount"
        );
        assert_eq!(Endpoint::Outfit("a b".into()).path(), "/outfits/a%20b");
        assert_eq!(Endpoint::Outfit("a.b".into()).path(), "/outfits/a.b");
    }

    #[test]
    fn when_identifier_is_empty_or_a_dot_segment_then_it_is_rejected() {
        for id in ["", ".", ".."] {
            let endpoints = [
                Endpoint::Outfit(id.into()),
                Endpoint::OutfitFavorite(id.into()),
                Endpoint::GenerateStatus(id.into()),
                Endpoint::AssetMetadata(id.into()),
                Endpoint::QuiltDesignStatus(id.into()),
            ];
            for endpoint in endpoints {
                assert!(
                    matches!(endpoint.ensure_addressable(), Err(ApiError::Validation(_))),
                    "{endpoint:?}"
                );
            }
        }

        assert!(Endpoint::Outfit("...".into()).ensure_addressable().is_ok());
        assert!(Endpoint::Outfit("a.b".into()).ensure_addressable().is_ok());
        assert!(Endpoint::Outfits.ensure_addressable().is_ok());
    }

    #[test]
    fn only_credential_endpoints_are_auth_endpoints() {
        let auth = [
            Endpoint::Signup,
            Endpoint::Login,
            Endpoint::OtpSend,
            Endpoint::OtpVerify,
            Endpoint::OtpResend,
        ];
        for endpoint in auth {
            assert!(endpoint.is_auth_endpoint(), "{endpoint:?}");
        }

        let not_auth = [
            Endpoint::Me,
            Endpoint::Quota,
            Endpoint::Logout,
            Endpoint::GoogleToken,
            Endpoint::OutfitStats,
            Endpoint::Outfit("x".into()),
        ];
        for endpoint in not_auth {
            assert!(!endpoint.is_auth_endpoint(), "{endpoint:?}");
        }
    }
}
