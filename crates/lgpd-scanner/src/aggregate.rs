//! Folding detections into report entries, and scoring.

use lgpd_core::{DataSeverity, DataTypeFound, Issue, PrivacyPolicyAnalysis};
use lgpd_detector::Detection;

/// Location label attached to detections run over the page text.
pub const PAGE_CONTENT_LOCATION: &str = "Page content";

/// Score every scan starts from.
pub const BASE_SCORE: i32 = 100;

/// Penalty per high-severity data category found.
pub const HIGH_DATA_TYPE_PENALTY: i32 = 10;

/// Bonus granted when a privacy policy was found.
pub const POLICY_FOUND_BONUS: i32 = 10;

/// Merge a detection batch into the accumulated data-type list.
///
/// Entries are keyed by category display name. A repeated category adds its
/// match count and appends `location`; the severity of the first batch is kept.
pub fn fold_detections(
    data_types: &mut Vec<DataTypeFound>,
    detections: &[Detection],
    location: &str,
) {
    for detection in detections {
        let name = detection.category.display_name();

        if let Some(existing) = data_types.iter_mut().find(|d| d.data_type == name) {
            existing.count += detection.matches.len();
            existing.locations.push(location.to_string());
        } else {
            data_types.push(DataTypeFound {
                data_type: name.to_string(),
                count: detection.matches.len(),
                locations: vec![location.to_string()],
                severity: detection.severity,
            });
        }
    }
}

/// Compute the overall score: penalties, then the policy bonus, then the clamp.
#[must_use]
pub fn calculate_score(
    issues: &[Issue],
    data_types: &[DataTypeFound],
    policy: &PrivacyPolicyAnalysis,
) -> u8 {
    let mut score = BASE_SCORE;

    for issue in issues {
        score = score.saturating_sub(issue.severity.penalty());
    }

    let high = data_types
        .iter()
        .filter(|d| d.severity == DataSeverity::High)
        .count();
    let high = i32::try_from(high).unwrap_or(i32::MAX);
    score = score.saturating_sub(HIGH_DATA_TYPE_PENALTY.saturating_mul(high));

    if policy.found {
        score = score.saturating_add(POLICY_FOUND_BONUS);
    }

    u8::try_from(score.clamp(0, 100)).unwrap_or(0)
}
