//! CSV export of the build catalog for external analysis.

use anyhow::{Context, Result};

use hooplab_core::aggregate::{category_score, Category};
use hooplab_core::domain::Build;

/// Render builds as CSV, one row per build with measured fields, like count,
/// and the four composite category scores.
///
/// Columns: id, gamertag, position, role, height, weight, wingspan, likes,
/// finishing, shooting, playmaking, defense, created_at
pub fn export_builds_csv(builds: &[Build]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "id",
        "gamertag",
        "position",
        "role",
        "height",
        "weight",
        "wingspan",
        "likes",
        "finishing",
        "shooting",
        "playmaking",
        "defense",
        "created_at",
    ])?;

    for build in builds {
        let scores = Category::ALL
            .iter()
            .map(|&c| category_score(build, c))
            .collect::<Result<Vec<i64>, _>>()
            .with_context(|| format!("aggregating build {}", build.id))?;

        wtr.write_record([
            &build.id.to_string(),
            &build.gamertag,
            build.position.code(),
            &build.role,
            &build.height.to_string(),
            &build.weight.to_string(),
            &build.wingspan.to_string(),
            &build.likes.to_string(),
            &scores[0].to_string(),
            &scores[1].to_string(),
            &scores[2].to_string(),
            &scores[3].to_string(),
            &build.created_at.to_rfc3339(),
        ])?;
    }

    let bytes = wtr.into_inner().context("flushing CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hooplab_core::domain::{AttributeSheet, BuildDraft, Position, UserId};

    fn sample_build() -> Build {
        let draft = BuildDraft {
            position: Position::SF,
            role: "Backend".to_string(),
            height: 80,
            weight: 215,
            wingspan: 84,
            attributes: AttributeSheet::floor(),
        };
        Build::from_draft(
            &draft,
            UserId::new("u1"),
            "Tester99".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn header_and_one_row() {
        let csv = export_builds_csv(&[sample_build()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id,gamertag,position,role"));
        assert!(lines[1].contains("Tester99"));
        assert!(lines[1].contains(",SF,"));
        // Floor build composites, unclamped.
        assert!(lines[1].contains(",-75,10,10,-50,"));
    }

    #[test]
    fn empty_catalog_is_just_the_header() {
        let csv = export_builds_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
