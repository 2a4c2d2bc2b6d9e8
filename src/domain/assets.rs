use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Model,
    Outfit,
    Output,
}

// Filter accepted by the outfit history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutfitFilter {
    Model,
    Outfit,
    Output,
    All,
}

impl OutfitFilter {
    fn as_str(self) -> &'static str {
        match self {
            OutfitFilter::Model => "model",
            OutfitFilter::Outfit => "outfit",
            OutfitFilter::Output => "output",
            OutfitFilter::All => "all",
        }
    }
}

// Backend-owned image record. The client only toggles favorite/deleted flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

#[derive(Debug, Clone, Default)]
pub struct OutfitQuery {
    pub asset_type: Option<OutfitFilter>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub favorite: Option<bool>,
}

impl OutfitQuery {
    // Unset fields are omitted entirely rather than sent empty.
    pub fn to_query_string(&self) -> Option<String> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(asset_type) = self.asset_type {
            query.append_pair("type", asset_type.as_str());
        }
        if let Some(page) = self.page {
            query.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit {
            query.append_pair("limit", &limit.to_string());
        }
        if let Some(sort_by) = &self.sort_by {
            query.append_pair("sortBy", sort_by);
        }
        if let Some(sort_order) = &self.sort_order {
            query.append_pair("sortOrder", sort_order);
        }
        if let Some(favorite) = self.favorite {
            query.append_pair("favorite", if favorite { "true" } else { "false" });
        }
        non_empty(query.finish())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutfitList {
    pub outfits: Vec<ImageAsset>,
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub filters: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TypeCounts {
    pub model: u64,
    pub outfit: u64,
    pub output: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageUsage {
    pub total_bytes: u64,
    pub total_files: u64,
    #[serde(default)]
    pub by_type: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitStats {
    pub total: u64,
    pub by_type: TypeCounts,
    pub storage_usage: StorageUsage,
    pub favorites: u64,
    pub generation_attempts: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicImageType {
    Model,
    Outfit,
}

#[derive(Debug, Clone, Default)]
pub struct PublicImageQuery {
    pub image_type: Option<PublicImageType>,
    pub name: Option<String>,
    pub tags: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl PublicImageQuery {
    pub fn to_query_string(&self) -> Option<String> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(image_type) = self.image_type {
            let value = match image_type {
                PublicImageType::Model => "model",
                PublicImageType::Outfit => "outfit",
            };
            query.append_pair("type", value);
        }
        if let Some(name) = &self.name {
            query.append_pair("name", name);
        }
        if let Some(tags) = &self.tags {
            query.append_pair("tags", tags);
        }
        if let Some(page) = self.page {
            query.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit {
            query.append_pair("limit", &limit.to_string());
        }
        if let Some(sort_by) = &self.sort_by {
            query.append_pair("sortBy", sort_by);
        }
        if let Some(sort_order) = &self.sort_order {
            query.append_pair("sortOrder", sort_order);
        }
        non_empty(query.finish())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicImage {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub image_type: AssetType,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicImageList {
    pub images: Vec<PublicImage>,
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub filters: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteFlag {
    pub id: String,
    pub favorite: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteResult {
    pub message: String,
    pub image: FavoriteFlag,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedFlag {
    pub id: String,
    pub is_deleted: bool,
}

// Soft delete acknowledgement: the record is flagged, not purged.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResult {
    pub message: String,
    pub image: DeletedFlag,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataUpdate {
    pub message: String,
    pub metadata: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPurpose {
    Model,
    Outfit,
    Other,
}

impl UploadPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            UploadPurpose::Model => "model",
            UploadPurpose::Outfit => "outfit",
            UploadPurpose::Other => "other",
        }
    }
}

// In-memory file handed to the multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub name: Option<String>,
    pub tags: Vec<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub size_bytes: u64,
    pub mime_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub image_asset: UploadedAsset,
}

fn non_empty(query: String) -> Option<String> {
    if query.is_empty() { None } else { Some(query) }
}
