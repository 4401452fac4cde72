//! Kitchen menu grouped into tabs.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::{MenuCategory, MenuItem};

/// Which tab the menu opens on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DefaultCategoryPolicy {
    /// Lowest `order`, first in API order on ties.
    #[default]
    FirstBySortOrder,
    /// A fixed slug; falls back to the first tab when the slug is unknown.
    /// Written `slug:<slug>` when the slug itself is `first` or `none`.
    Slug(String),
    /// Open with no tab selected.
    None,
}

const SLUG_PREFIX: &str = "slug:";

impl FromStr for DefaultCategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(slug) = s.strip_prefix(SLUG_PREFIX) {
            let slug = slug.trim();
            if slug.is_empty() {
                return Err("default category slug must not be empty".to_string());
            }
            return Ok(Self::Slug(slug.to_string()));
        }
        match s {
            "" => Err("default category policy must not be empty".to_string()),
            "first" => Ok(Self::FirstBySortOrder),
            "none" => Ok(Self::None),
            slug => Ok(Self::Slug(slug.to_string())),
        }
    }
}

fn needs_prefix(slug: &str) -> bool {
    matches!(slug, "first" | "none") || slug.starts_with(SLUG_PREFIX)
}

impl TryFrom<String> for DefaultCategoryPolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DefaultCategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstBySortOrder => f.write_str("first"),
            Self::Slug(slug) if needs_prefix(slug) => write!(f, "{SLUG_PREFIX}{slug}"),
            Self::Slug(slug) => f.write_str(slug),
            Self::None => f.write_str("none"),
        }
    }
}

impl From<DefaultCategoryPolicy> for String {
    fn from(policy: DefaultCategoryPolicy) -> Self {
        policy.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuTab {
    pub category: MenuCategory,
    pub items: Vec<MenuItem>,
}

/// The menu as the kitchen page shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenMenu {
    pub tabs: Vec<MenuTab>,
    /// Items whose category matches no tab.
    pub uncategorized: Vec<MenuItem>,
    pub default_slug: Option<String>,
}

impl KitchenMenu {
    /// Tabs sorted by `order` (stable), items placed under their category's
    /// slug in API order.
    pub fn build(
        mut categories: Vec<MenuCategory>,
        items: Vec<MenuItem>,
        policy: &DefaultCategoryPolicy,
    ) -> Self {
        categories.sort_by_key(|c| c.order);

        let mut tabs: Vec<MenuTab> = categories
            .into_iter()
            .map(|category| MenuTab {
                category,
                items: Vec::new(),
            })
            .collect();
        let mut uncategorized = Vec::new();

        for item in items {
            let position = item
                .category_slug()
                .and_then(|slug| tabs.iter().position(|t| t.category.slug == slug));
            match position {
                Some(i) => tabs[i].items.push(item),
                None => uncategorized.push(item),
            }
        }

        let first = tabs.first().map(|t| t.category.slug.clone());
        let default_slug = match policy {
            DefaultCategoryPolicy::FirstBySortOrder => first,
            DefaultCategoryPolicy::None => None,
            DefaultCategoryPolicy::Slug(slug) => {
                if tabs.iter().any(|t| &t.category.slug == slug) {
                    Some(slug.clone())
                } else {
                    debug!("Default menu category '{}' not found, using first tab", slug);
                    first
                }
            }
        };

        Self {
            tabs,
            uncategorized,
            default_slug,
        }
    }

    pub fn tab(&self, slug: &str) -> Option<&MenuTab> {
        self.tabs.iter().find(|t| t.category.slug == slug)
    }

    pub fn default_tab(&self) -> Option<&MenuTab> {
        self.default_slug.as_deref().and_then(|slug| self.tab(slug))
    }
}
