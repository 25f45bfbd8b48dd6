//! The club's event categories and how each one is displayed.
//!
//! The CMS sends categories as plain strings. Only the identifiers listed
//! here have their own styling; anything else falls back to `DEFAULT_STYLE`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Shibari,
    Lecture,
    Cineforum,
}

/// Display metadata for a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStyle {
    pub name: &'static str,
    /// Accent color for terminal output
    pub rgb: (u8, u8, u8),
}

const SHIBARI_STYLE: CategoryStyle = CategoryStyle {
    name: "Shibari: Ata2",
    rgb: (178, 1, 24),
};

const LECTURE_STYLE: CategoryStyle = CategoryStyle {
    name: "Día de Conferencia",
    rgb: (192, 132, 252),
};

const CINEFORUM_STYLE: CategoryStyle = CategoryStyle {
    name: "Cinefórum: La Butaca Roja",
    rgb: (96, 165, 250),
};

/// Style for events with no category or one we don't know.
pub const DEFAULT_STYLE: CategoryStyle = CategoryStyle {
    name: "Evento",
    rgb: (156, 163, 175),
};

impl Category {
    pub const ALL: [Category; 3] = [Category::Shibari, Category::Lecture, Category::Cineforum];

    /// Look up a CMS category identifier (case-insensitive).
    pub fn from_id(id: &str) -> Option<Category> {
        let id = id.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.id().eq_ignore_ascii_case(id))
    }

    pub fn id(&self) -> &'static str {
        match self {
            Category::Shibari => "shibari",
            Category::Lecture => "lecture",
            Category::Cineforum => "cineforum",
        }
    }

    pub fn style(&self) -> &'static CategoryStyle {
        match self {
            Category::Shibari => &SHIBARI_STYLE,
            Category::Lecture => &LECTURE_STYLE,
            Category::Cineforum => &CINEFORUM_STYLE,
        }
    }
}

/// Style for a raw CMS identifier, falling back to `DEFAULT_STYLE`.
pub fn style_for(id: Option<&str>) -> &'static CategoryStyle {
    id.and_then(Category::from_id)
        .map(|category| category.style())
        .unwrap_or(&DEFAULT_STYLE)
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_id(s).ok_or_else(|| {
            let known: Vec<_> = Category::ALL.iter().map(Category::id).collect();
            format!("Unknown category '{}'. Expected one of: {}", s, known.join(", "))
        })
    }
}
