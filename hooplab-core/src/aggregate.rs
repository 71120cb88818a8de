//! Category aggregation — folding the 21 sub-attributes into the four
//! composite scores the pie chart renders.
//!
//! Each composite is the sum of a fixed attribute subset minus a calibration
//! offset chosen so a floor build (everything at 25) lands near zero and no
//! category dwarfs the others purely by subset size. Scores are NOT clamped:
//! near-floor builds produce negative composites and the renderer decides
//! how to treat them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Build;

/// The four composite categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Finishing,
    Shooting,
    Playmaking,
    Defense,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Finishing,
        Category::Shooting,
        Category::Playmaking,
        Category::Defense,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Finishing => "Finishing",
            Category::Shooting => "Shooting",
            Category::Playmaking => "Playmaking",
            Category::Defense => "Defense",
        }
    }

    /// Attribute subset summed into this category's composite.
    pub fn attributes(&self) -> &'static [&'static str] {
        match self {
            Category::Finishing => &[
                "close_shot",
                "driving_layup",
                "driving_dunk",
                "standing_dunk",
                "post_control",
            ],
            Category::Shooting => &["mid_range", "three_pointer", "free_throw"],
            Category::Playmaking => &["pass_accuracy", "ball_handle", "speed_with_ball"],
            Category::Defense => &[
                "interior_defense",
                "perimeter_defense",
                "steal",
                "block",
                "offensive_rebound",
                "defensive_rebound",
            ],
        }
    }

    /// Calibration constant subtracted from the subset sum.
    pub fn offset(&self) -> i64 {
        match self {
            Category::Finishing | Category::Defense => 200,
            Category::Shooting | Category::Playmaking => 65,
        }
    }

    /// Presentation color, passed through to the renderer untouched.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Finishing => "#3437eb",
            Category::Shooting => "#08fc00",
            Category::Playmaking => "#ebdf0c",
            Category::Defense => "#fc0019",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AggregateError {
    #[error("attribute '{attribute}' is missing from the build record")]
    MissingAttribute { attribute: String },
}

/// One slice of the category chart: label, signed score, display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategorySlice {
    pub label: &'static str,
    pub value: i64,
    pub color: &'static str,
}

/// Composite score for a single category.
pub fn category_score(build: &Build, category: Category) -> Result<i64, AggregateError> {
    let mut sum: i64 = 0;
    for name in category.attributes() {
        let value = build
            .attribute(name)
            .ok_or_else(|| AggregateError::MissingAttribute {
                attribute: (*name).to_string(),
            })?;
        sum += i64::from(value);
    }
    Ok(sum - category.offset())
}

/// All four composites in display order, ready for proportional rendering.
pub fn category_breakdown(build: &Build) -> Result<Vec<CategorySlice>, AggregateError> {
    Category::ALL
        .iter()
        .map(|&category| {
            Ok(CategorySlice {
                label: category.label(),
                value: category_score(build, category)?,
                color: category.color(),
            })
        })
        .collect()
}
