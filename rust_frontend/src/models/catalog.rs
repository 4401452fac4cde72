//! Venue catalog: baths, brooms, massages and the kitchen menu.

use serde::{Deserialize, Serialize};

use super::money::{deserialize_rubles, Rubles};
use crate::api::{BathId, BroomId, MassageId, MenuCategoryId, MenuItemId, StatusId};

/// Bath photo as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub photo_id: Option<i64>,
    pub image_url: String,
}

/// Key/value feature shown on a bath card ("steam room" / "wood-fired").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BathFeature {
    #[serde(default)]
    pub feature_id: Option<i64>,
    pub key: String,
    pub value: String,
}

/// A bookable bath (the grid's resource).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bath {
    #[serde(alias = "id")]
    pub bath_id: BathId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    /// Price per hour.
    #[serde(default, deserialize_with = "deserialize_rubles")]
    pub cost: Rubles,
    #[serde(default)]
    pub description: Option<String>,
    /// Guests included in the base price.
    #[serde(default)]
    pub base_guests: u32,
    #[serde(default, deserialize_with = "deserialize_rubles")]
    pub extra_guest_price: Rubles,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub features: Vec<BathFeature>,
}

impl Bath {
    /// Name shown in column headers; the API allows empty names.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Untitled"
        } else {
            &self.name
        }
    }

    /// First photo, used as the card cover.
    pub fn cover_image(&self) -> Option<&str> {
        self.photos.first().map(|p| p.image_url.as_str())
    }
}

/// Payload for creating or replacing a bath.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BathInput {
    pub name: String,
    pub title: String,
    pub cost: Rubles,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub base_guests: u32,
    pub extra_guest_price: Rubles,
    #[serde(default)]
    pub features: Vec<BathFeatureInput>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BathFeatureInput {
    pub key: String,
    pub value: String,
}

/// Bath broom sold as an add-on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Broom {
    pub id: BroomId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_rubles")]
    pub price: Rubles,
    /// Stock on hand.
    #[serde(default)]
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroomInput {
    pub name: String,
    pub price: Rubles,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Massage {
    #[serde(alias = "id")]
    pub massage_id: MassageId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_rubles")]
    pub cost: Rubles,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassageInput {
    pub name: String,
    pub description: String,
    pub cost: Rubles,
}

/// Kitchen menu tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: MenuCategoryId,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryInput {
    pub slug: String,
    pub name: String,
    pub order: i32,
}

/// Category reference on a menu item: `/kitchen/` nests the whole category,
/// older payloads only carry the slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Full(MenuCategory),
    Slug(String),
}

impl CategoryRef {
    pub fn slug(&self) -> &str {
        match self {
            CategoryRef::Full(category) => &category.slug,
            CategoryRef::Slug(slug) => slug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_rubles")]
    pub price: Rubles,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

impl MenuItem {
    pub fn category_slug(&self) -> Option<&str> {
        self.category.as_ref().map(CategoryRef::slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemInput {
    pub name: String,
    pub price: Rubles,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: MenuCategoryId,
}

/// Reservation status option offered in the admin editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationStatus {
    pub id: StatusId,
    pub status_name: String,
}
