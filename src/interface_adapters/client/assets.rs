use reqwest::Method;
use serde_json::Value;

use super::ApiClient;
use crate::domain::assets::{
    DeleteResult, FavoriteResult, MetadataUpdate, OutfitList, OutfitQuery, OutfitStats,
    PublicImageList, PublicImageQuery,
};
use crate::domain::endpoint::Endpoint;
use crate::domain::errors::ApiError;
use crate::interface_adapters::protocol::{FavoriteRequest, MetadataRequest};

impl ApiClient {
    pub async fn get_public_images(
        &self,
        query: &PublicImageQuery,
    ) -> Result<PublicImageList, ApiError> {
        self.get_with_query(Endpoint::PublicImages, query.to_query_string())
            .await
    }

    pub async fn get_outfits(&self, query: &OutfitQuery) -> Result<OutfitList, ApiError> {
        self.get_with_query(Endpoint::Outfits, query.to_query_string())
            .await
    }

    pub async fn get_outfits_stats(&self) -> Result<OutfitStats, ApiError> {
        self.get(Endpoint::OutfitStats).await
    }

    pub async fn toggle_outfit_favorite(
        &self,
        outfit_id: &str,
        favorite: bool,
    ) -> Result<FavoriteResult, ApiError> {
        self.send(
            Method::POST,
            Endpoint::OutfitFavorite(outfit_id.to_string()),
            Some(&FavoriteRequest { favorite }),
        )
        .await
    }

    /// Soft delete: the backend flags the asset as deleted without purging it.
    /// Callers drop it from their local list on success.
    pub async fn delete_outfit(&self, outfit_id: &str) -> Result<DeleteResult, ApiError> {
        self.send::<_, ()>(Method::DELETE, Endpoint::Outfit(outfit_id.to_string()), None)
            .await
    }

    pub async fn update_asset_metadata(
        &self,
        asset_id: &str,
        metadata: &Value,
    ) -> Result<MetadataUpdate, ApiError> {
        self.send(
            Method::PUT,
            Endpoint::AssetMetadata(asset_id.to_string()),
            Some(&MetadataRequest { metadata }),
        )
        .await
    }
}
