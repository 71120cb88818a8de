//! Build — a user-authored attribute configuration.
//!
//! A build is written once at submission time with every field populated and
//! is never mutated afterwards except for its `likes` counter. Validation
//! happens at the input layer (`BuildDraft::validate`); the ranking and
//! aggregation computations assume a build that passed it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{BuildId, UserId};
use super::position::Position;

/// Inclusive floor and ceiling for every sub-attribute.
pub const ATTRIBUTE_MIN: u32 = 25;
pub const ATTRIBUTE_MAX: u32 = 99;

/// A wingspan may exceed the build's height by at most this many inches.
pub const WINGSPAN_REACH: u32 = 7;

/// Minimum gamertag length accepted at submission.
pub const MIN_GAMERTAG_LEN: usize = 4;

/// The 21 named sub-attributes of a build, each in `[25, 99]`.
///
/// Flattened into the build document so the persisted shape stays one flat
/// record, the same way the original store kept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSheet {
    // Finishing
    pub close_shot: u32,
    pub driving_layup: u32,
    pub driving_dunk: u32,
    pub standing_dunk: u32,
    pub post_control: u32,
    // Shooting
    pub mid_range: u32,
    pub three_pointer: u32,
    pub free_throw: u32,
    // Playmaking
    pub pass_accuracy: u32,
    pub ball_handle: u32,
    pub speed_with_ball: u32,
    // Defense
    pub interior_defense: u32,
    pub perimeter_defense: u32,
    pub steal: u32,
    pub block: u32,
    pub offensive_rebound: u32,
    pub defensive_rebound: u32,
    // Physical
    pub speed: u32,
    pub agility: u32,
    pub strength: u32,
    pub vertical: u32,
}

impl AttributeSheet {
    pub const NAMES: [&'static str; 21] = [
        "close_shot",
        "driving_layup",
        "driving_dunk",
        "standing_dunk",
        "post_control",
        "mid_range",
        "three_pointer",
        "free_throw",
        "pass_accuracy",
        "ball_handle",
        "speed_with_ball",
        "interior_defense",
        "perimeter_defense",
        "steal",
        "block",
        "offensive_rebound",
        "defensive_rebound",
        "speed",
        "agility",
        "strength",
        "vertical",
    ];

    /// Look up a sub-attribute by its document field name.
    pub fn get(&self, name: &str) -> Option<u32> {
        let value = match name {
            "close_shot" => self.close_shot,
            "driving_layup" => self.driving_layup,
            "driving_dunk" => self.driving_dunk,
            "standing_dunk" => self.standing_dunk,
            "post_control" => self.post_control,
            "mid_range" => self.mid_range,
            "three_pointer" => self.three_pointer,
            "free_throw" => self.free_throw,
            "pass_accuracy" => self.pass_accuracy,
            "ball_handle" => self.ball_handle,
            "speed_with_ball" => self.speed_with_ball,
            "interior_defense" => self.interior_defense,
            "perimeter_defense" => self.perimeter_defense,
            "steal" => self.steal,
            "block" => self.block,
            "offensive_rebound" => self.offensive_rebound,
            "defensive_rebound" => self.defensive_rebound,
            "speed" => self.speed,
            "agility" => self.agility,
            "strength" => self.strength,
            "vertical" => self.vertical,
            _ => return None,
        };
        Some(value)
    }

    /// All (name, value) pairs in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, u32)> {
        Self::NAMES
            .iter()
            .filter_map(|name| self.get(name).map(|v| (*name, v)))
            .collect()
    }

    /// Check every sub-attribute lies in `[ATTRIBUTE_MIN, ATTRIBUTE_MAX]`.
    pub fn validate(&self) -> Result<(), BuildError> {
        for (name, value) in self.entries() {
            if !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value) {
                return Err(BuildError::AttributeOutOfRange {
                    attribute: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Every attribute set to the same value.
    pub fn uniform(value: u32) -> Self {
        Self {
            close_shot: value,
            driving_layup: value,
            driving_dunk: value,
            standing_dunk: value,
            post_control: value,
            mid_range: value,
            three_pointer: value,
            free_throw: value,
            pass_accuracy: value,
            ball_handle: value,
            speed_with_ball: value,
            interior_defense: value,
            perimeter_defense: value,
            steal: value,
            block: value,
            offensive_rebound: value,
            defensive_rebound: value,
            speed: value,
            agility: value,
            strength: value,
            vertical: value,
        }
    }

    /// Every attribute at the floor — the blank slate a new draft starts from.
    pub fn floor() -> Self {
        Self::uniform(ATTRIBUTE_MIN)
    }
}

impl Default for AttributeSheet {
    fn default() -> Self {
        Self::floor()
    }
}

/// A submitted build document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub id: BuildId,
    pub user_id: UserId,
    pub gamertag: String,
    pub position: Position,
    pub role: String,
    /// Height in inches.
    pub height: u32,
    /// Weight in pounds.
    pub weight: u32,
    /// Wingspan in inches, within `[height, height + WINGSPAN_REACH]`.
    pub wingspan: u32,
    #[serde(flatten)]
    pub attributes: AttributeSheet,
    pub likes: u32,
    pub created_at: DateTime<Utc>,
}

impl Build {
    /// Assemble a build from a validated draft. The id is generated here,
    /// before the write, the way the hosted SDK assigned document ids.
    pub fn from_draft(
        draft: &BuildDraft,
        user_id: UserId,
        gamertag: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BuildId::generate(),
            user_id,
            gamertag,
            position: draft.position,
            role: draft.role.clone(),
            height: draft.height,
            weight: draft.weight,
            wingspan: draft.wingspan,
            attributes: draft.attributes,
            likes: 0,
            created_at,
        }
    }

    /// Look up any numeric field of the document by name: the three measured
    /// fields (`height`, `weight`, `wingspan`) or any sub-attribute.
    ///
    /// The ranking and aggregation computations address fields through this
    /// accessor so that an unknown name surfaces as a typed error instead of
    /// a silent zero.
    pub fn attribute(&self, name: &str) -> Option<u32> {
        match name {
            "height" => Some(self.height),
            "weight" => Some(self.weight),
            "wingspan" => Some(self.wingspan),
            _ => self.attributes.get(name),
        }
    }
}

/// An unsubmitted build: everything the owner chooses, nothing the system
/// assigns. Deserialized from the draft TOML the CLI submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildDraft {
    pub position: Position,
    pub role: String,
    pub height: u32,
    pub weight: u32,
    pub wingspan: u32,
    #[serde(flatten)]
    pub attributes: AttributeSheet,
}

impl Default for BuildDraft {
    fn default() -> Self {
        // The blank creation form: shortest PG, league-floor attributes.
        Self {
            position: Position::PG,
            role: String::new(),
            height: 69,
            weight: 150,
            wingspan: 69,
            attributes: AttributeSheet::floor(),
        }
    }
}

impl BuildDraft {
    /// Enforce the creation-time invariants.
    pub fn validate(&self) -> Result<(), BuildError> {
        if !self.position.allows_role(&self.role) {
            return Err(BuildError::InvalidRole {
                position: self.position,
                role: self.role.clone(),
            });
        }
        let (min, max) = self.position.height_range();
        if !(min..=max).contains(&self.height) {
            return Err(BuildError::HeightOutOfRange {
                position: self.position,
                height: self.height,
                min,
                max,
            });
        }
        if self.weight == 0 {
            return Err(BuildError::ZeroWeight);
        }
        let wingspan_max = self.height + WINGSPAN_REACH;
        if !(self.height..=wingspan_max).contains(&self.wingspan) {
            return Err(BuildError::WingspanOutOfRange {
                wingspan: self.wingspan,
                min: self.height,
                max: wingspan_max,
            });
        }
        self.attributes.validate()
    }
}

/// Reject gamertags shorter than [`MIN_GAMERTAG_LEN`].
pub fn validate_gamertag(tag: &str) -> Result<(), BuildError> {
    if tag.trim().len() < MIN_GAMERTAG_LEN {
        return Err(BuildError::GamertagTooShort {
            min: MIN_GAMERTAG_LEN,
        });
    }
    Ok(())
}

#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("role '{role}' is not available to a {position}")]
    InvalidRole { position: Position, role: String },

    #[error("height {height}\" is outside the {position} range [{min}\", {max}\"]")]
    HeightOutOfRange {
        position: Position,
        height: u32,
        min: u32,
        max: u32,
    },

    #[error("wingspan {wingspan}\" must lie in [{min}\", {max}\"]")]
    WingspanOutOfRange { wingspan: u32, min: u32, max: u32 },

    #[error("weight must be positive")]
    ZeroWeight,

    #[error("attribute '{attribute}' = {value} is outside [25, 99]")]
    AttributeOutOfRange { attribute: String, value: u32 },

    #[error("gamertag must be at least {min} characters long")]
    GamertagTooShort { min: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_draft() -> BuildDraft {
        BuildDraft {
            position: Position::PG,
            role: "ISO Guard".to_string(),
            height: 75,
            weight: 185,
            wingspan: 78,
            attributes: AttributeSheet {
                ball_handle: 90,
                speed_with_ball: 85,
                three_pointer: 80,
                ..AttributeSheet::floor()
            },
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert_eq!(sample_draft().validate(), Ok(()));
    }

    #[test]
    fn rejects_role_from_other_position() {
        let mut draft = sample_draft();
        draft.role = "Inside C".to_string();
        assert!(matches!(
            draft.validate(),
            Err(BuildError::InvalidRole { .. })
        ));
    }

    #[test]
    fn rejects_height_outside_position_range() {
        let mut draft = sample_draft();
        draft.height = 85; // PG tops out at 79
        assert!(matches!(
            draft.validate(),
            Err(BuildError::HeightOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_wingspan_below_height() {
        let mut draft = sample_draft();
        draft.wingspan = draft.height - 1;
        assert!(matches!(
            draft.validate(),
            Err(BuildError::WingspanOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_wingspan_beyond_reach() {
        let mut draft = sample_draft();
        draft.wingspan = draft.height + WINGSPAN_REACH + 1;
        assert!(matches!(
            draft.validate(),
            Err(BuildError::WingspanOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_attribute_above_ceiling() {
        let mut draft = sample_draft();
        draft.attributes.steal = 100;
        let err = draft.validate().unwrap_err();
        assert_eq!(
            err,
            BuildError::AttributeOutOfRange {
                attribute: "steal".to_string(),
                value: 100,
            }
        );
    }

    #[test]
    fn rejects_zero_weight() {
        let mut draft = sample_draft();
        draft.weight = 0;
        assert_eq!(draft.validate(), Err(BuildError::ZeroWeight));
    }

    #[test]
    fn gamertag_length_floor() {
        assert!(validate_gamertag("abc").is_err());
        assert!(validate_gamertag("   abc   ").is_err());
        assert!(validate_gamertag("abcd").is_ok());
    }

    #[test]
    fn attribute_lookup_covers_measured_fields() {
        let build = Build::from_draft(
            &sample_draft(),
            UserId::new("u1"),
            "Tester99".to_string(),
            Utc::now(),
        );
        assert_eq!(build.attribute("height"), Some(75));
        assert_eq!(build.attribute("weight"), Some(185));
        assert_eq!(build.attribute("wingspan"), Some(78));
        assert_eq!(build.attribute("ball_handle"), Some(90));
        assert_eq!(build.attribute("charisma"), None);
    }

    #[test]
    fn sheet_names_and_entries_agree() {
        let sheet = AttributeSheet::floor();
        assert_eq!(sheet.entries().len(), AttributeSheet::NAMES.len());
        for name in AttributeSheet::NAMES {
            assert_eq!(sheet.get(name), Some(ATTRIBUTE_MIN), "{name}");
        }
    }

    #[test]
    fn build_serialization_is_flat() {
        let build = Build::from_draft(
            &sample_draft(),
            UserId::new("u1"),
            "Tester99".to_string(),
            Utc::now(),
        );
        let json = serde_json::to_value(&build).unwrap();
        // The sheet flattens into the document: no nested "attributes" object.
        assert!(json.get("attributes").is_none());
        assert_eq!(json["ball_handle"], 90);
        assert_eq!(json["position"], "PG");
    }

    #[test]
    fn draft_toml_roundtrip() {
        let draft = sample_draft();
        let toml = toml::to_string(&draft).unwrap();
        let deser: BuildDraft = toml::from_str(&toml).unwrap();
        assert_eq!(draft, deser);
    }

    #[test]
    fn draft_defaults_fill_missing_toml_keys() {
        let deser: BuildDraft = toml::from_str("position = \"SG\"\nrole = \"Lock\"").unwrap();
        assert_eq!(deser.position, Position::SG);
        assert_eq!(deser.attributes, AttributeSheet::floor());
    }
}
