//! Discovery phase: ask the model which objects are present.

use crate::error::LabelError;
use crate::prompt::discovery_question;
use moondream::VisionClient;
use tracing::{debug, info};

/// Whether the model's answer means "nothing found".
///
/// This matches `"null"` exactly (ignoring case and surrounding space) and
/// any answer containing `"no "` or `"none"`. The substring checks also fire
/// on answers like `"no parking sign"`.
pub fn answer_reports_nothing(answer: &str) -> bool {
    let lowered = answer.to_lowercase();
    lowered.trim() == "null" || lowered.contains("no ") || lowered.contains("none")
}

/// Split a comma-separated answer into labels, keeping the model's order and
/// any duplicates.
pub fn parse_labels(answer: &str) -> Vec<String> {
    if answer_reports_nothing(answer) {
        return Vec::new();
    }
    answer
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run the discovery call for `image` and parse its answer.
pub async fn discover(
    client: &dyn VisionClient,
    image: &str,
    prompt: &str,
) -> Result<Vec<String>, LabelError> {
    let question = discovery_question(prompt);
    info!(prompt = %prompt.trim(), "discovering objects");
    debug!(image = %truncate(image, 50), %question, "query payload");

    let answer = client
        .query(image, &question)
        .await
        .map_err(LabelError::Discovery)?;
    debug!(%answer, "discovery answer");

    let labels = parse_labels(&answer);
    info!(?labels, "discovered objects");
    Ok(labels)
}

pub(crate) fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        assert_eq!(
            parse_labels("car, red sign up button,  dog"),
            vec!["car", "red sign up button", "dog"]
        );
    }

    #[test]
    fn drops_empty_segments() {
        assert_eq!(parse_labels(" cat,, ,dog,"), vec!["cat", "dog"]);
        assert!(parse_labels("").is_empty());
        assert!(parse_labels(" , ").is_empty());
    }

    #[test]
    fn keeps_duplicates_in_order() {
        assert_eq!(parse_labels("cat, cat, dog"), vec!["cat", "cat", "dog"]);
    }

    #[test]
    fn null_answers() {
        for answer in ["null", "NULL", " Null ", "None", "there are none", "no objects found"] {
            assert!(answer_reports_nothing(answer), "{answer}");
            assert!(parse_labels(answer).is_empty(), "{answer}");
        }
    }

    #[test]
    fn substring_heuristic_is_crude() {
        assert!(answer_reports_nothing("no parking sign, yes entry sign"));
        assert!(answer_reports_nothing("casino chips"));
        assert!(!answer_reports_nothing("nullable field, notebook"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(truncate("ééé", 2), "éé");
    }
}
