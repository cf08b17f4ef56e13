//! Catalog Domain Models
//!
//! Products and services are immutable once seeded. Categories and
//! subcategories are closed enumerations; a subcategory always belongs to
//! exactly one category.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Speakers,
    Tvs,
    Fans,
    Cookers,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Speakers,
        Category::Tvs,
        Category::Fans,
        Category::Cookers,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Speakers => "speakers",
            Category::Tvs => "tvs",
            Category::Fans => "fans",
            Category::Cookers => "cookers",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Speakers => "Loa",
            Category::Tvs => "Tivi",
            Category::Fans => "Quạt",
            Category::Cookers => "Nồi Cơm",
        }
    }

    pub fn subcategories(self) -> impl Iterator<Item = Subcategory> {
        Subcategory::ALL
            .into_iter()
            .filter(move |s| s.category() == self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subcategory {
    Ceiling,
    Table,
    Tower,
    Oled,
    Led,
    Smart,
    Bluetooth,
    Soundbars,
    HomeTheater,
    Rice,
    Pressure,
    Slow,
}

impl Subcategory {
    pub const ALL: [Subcategory; 12] = [
        Subcategory::Ceiling,
        Subcategory::Table,
        Subcategory::Tower,
        Subcategory::Oled,
        Subcategory::Led,
        Subcategory::Smart,
        Subcategory::Bluetooth,
        Subcategory::Soundbars,
        Subcategory::HomeTheater,
        Subcategory::Rice,
        Subcategory::Pressure,
        Subcategory::Slow,
    ];

    /// The category this subcategory is scoped to.
    pub fn category(self) -> Category {
        match self {
            Subcategory::Ceiling | Subcategory::Table | Subcategory::Tower => Category::Fans,
            Subcategory::Oled | Subcategory::Led | Subcategory::Smart => Category::Tvs,
            Subcategory::Bluetooth | Subcategory::Soundbars | Subcategory::HomeTheater => {
                Category::Speakers
            }
            Subcategory::Rice | Subcategory::Pressure | Subcategory::Slow => Category::Cookers,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Subcategory::Ceiling => "ceiling",
            Subcategory::Table => "table",
            Subcategory::Tower => "tower",
            Subcategory::Oled => "oled",
            Subcategory::Led => "led",
            Subcategory::Smart => "smart",
            Subcategory::Bluetooth => "bluetooth",
            Subcategory::Soundbars => "soundbars",
            Subcategory::HomeTheater => "home-theater",
            Subcategory::Rice => "rice",
            Subcategory::Pressure => "pressure",
            Subcategory::Slow => "slow",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Subcategory::Ceiling => "Quạt Trần",
            Subcategory::Table => "Quạt Bàn",
            Subcategory::Tower => "Quạt Đứng",
            Subcategory::Oled => "Tivi OLED",
            Subcategory::Led => "Tivi LED",
            Subcategory::Smart => "Tivi Thông Minh",
            Subcategory::Bluetooth => "Loa Bluetooth",
            Subcategory::Soundbars => "Loa Soundbar",
            Subcategory::HomeTheater => "Dàn Âm Thanh",
            Subcategory::Rice => "Nồi Cơm Điện",
            Subcategory::Pressure => "Nồi Áp Suất",
            Subcategory::Slow => "Nồi Nấu Chậm",
        }
    }
}

// =============================================================================
// Entities
// =============================================================================

/// A sellable product. Prices are in minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: u64,

    /// Pre-sale price; never below `price`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,

    /// 0.0 - 5.0
    pub rating: f32,

    pub image: String,

    /// Declared discount label in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,

    #[serde(default)]
    pub is_new: bool,

    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<Subcategory>,

    pub brand: String,
}

impl Product {
    /// Discount shown on the product card.
    ///
    /// The declared `discount` wins; otherwise the percentage is derived from
    /// `original_price`, rounded to the nearest whole percent.
    pub fn discount_percent(&self) -> Option<u8> {
        if let Some(declared) = self.discount.filter(|d| *d > 0) {
            return Some(declared);
        }

        let original = self.original_price?;
        if original <= self.price || original == 0 {
            return None;
        }

        let (saved, original) = (u128::from(original - self.price), u128::from(original));
        let percent = (saved * 100 + original / 2) / original;
        u8::try_from(percent).ok().filter(|p| *p > 0)
    }

    pub(crate) fn validate(&self) -> StoreResult<()> {
        if let Some(original) = self.original_price {
            if original < self.price {
                return Err(StoreError::InvalidSeed(format!(
                    "product {}: original price {} below price {}",
                    self.id, original, self.price
                )));
            }
        }

        if !(0.0..=5.0).contains(&self.rating) {
            return Err(StoreError::InvalidSeed(format!(
                "product {}: rating {} outside 0.0-5.0",
                self.id, self.rating
            )));
        }

        if let Some(sub) = self.subcategory {
            if sub.category() != self.category {
                return Err(StoreError::InvalidSeed(format!(
                    "product {}: subcategory {} does not belong to {}",
                    self.id,
                    sub.slug(),
                    self.category.slug()
                )));
            }
        }

        Ok(())
    }
}

/// Repair service category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Tv,
    Speaker,
    Fan,
    Cooker,
}

impl ServiceCategory {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "tv" => Some(ServiceCategory::Tv),
            "speaker" => Some(ServiceCategory::Speaker),
            "fan" => Some(ServiceCategory::Fan),
            "cooker" => Some(ServiceCategory::Cooker),
            _ => None,
        }
    }
}

/// A bookable repair service. Price and duration are display strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: ServiceCategory,

    #[serde(rename = "price")]
    pub price_range: String,

    pub duration: String,
    pub link_url: String,
}

// =============================================================================
// Queries
// =============================================================================

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    pub fn new(min: u64, max: u64) -> StoreResult<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.min > self.max {
            return Err(StoreError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn contains(&self, price: u64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: u64::MAX,
        }
    }
}

/// Simultaneous constraints used to narrow a catalog listing.
///
/// An empty `brands` list means "any brand", and an empty `search` matches
/// every name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    pub search: String,
    pub price_range: PriceRange,
    pub category: Option<Category>,
    pub subcategory: Option<Subcategory>,
    pub brands: Vec<String>,
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn price_range(mut self, min: u64, max: u64) -> Self {
        self.price_range = PriceRange { min, max };
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn subcategory(mut self, subcategory: Subcategory) -> Self {
        self.subcategory = Some(subcategory);
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.push(brand.into());
        self
    }
}
