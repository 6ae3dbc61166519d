use regex::Regex;

/// Split a raw answer into the cleaned answer text and the follow-up
/// question list the service appends as a bare JSON array at the very end.
///
/// There is no delimiter between the answer and the array, so detection is
/// heuristic: first look for a trailing array whose first element starts
/// with "如何" (the common case in live traffic), then for any trailing
/// array of double-quoted comma-separated strings. Both the extraction and
/// the cleaning views are derived from this one split so they cannot
/// disagree about where the answer ends. Answers whose genuine content
/// ends in something shaped like a quoted-string array will be truncated;
/// the upstream convention was never formally specified.
pub fn split_trailing_questions(raw: &str) -> (String, Vec<String>) {
    let text = raw.trim();

    let Some(start) = find_trailing_array(text) else {
        return (text.to_string(), Vec::new());
    };

    let (answer, suffix) = text.split_at(start);
    let questions: Vec<String> = serde_json::from_str(suffix.trim()).unwrap_or_default();
    (answer.trim().to_string(), questions)
}

/// Follow-up questions appended to the raw answer, or empty when none are
/// detected or when the trailing array fails to decode.
pub fn extract_follow_ups(raw: &str) -> Vec<String> {
    split_trailing_questions(raw).1
}

/// The answer with any trailing question array stripped and whitespace
/// trimmed.
pub fn clean_answer(raw: &str) -> String {
    split_trailing_questions(raw).0
}

fn find_trailing_array(text: &str) -> Option<usize> {
    let cjk = Regex::new(r#"(?s)\[\s*"如何.*\]\s*$"#).unwrap();
    if let Some(m) = cjk.find(text) {
        return Some(m.start());
    }

    let generic = Regex::new(r#"\[\s*"[^"]*"(?:\s*,\s*"[^"]*")*\s*,?\s*\]\s*$"#).unwrap();
    generic.find(text).map(|m| m.start())
}
