use crate::api::models::SseMessage;

/// Concatenate the answer text out of a fully buffered SSE body.
///
/// Each `data:` line normally carries a JSON object whose `data` field is
/// one answer fragment. Lines that fail to decode are appended verbatim so
/// a malformed event never loses text. Fragments are joined in line order
/// with no separator; the service puts any needed whitespace inside them.
pub fn parse_sse_body(body: &str) -> String {
    let mut answer = String::new();

    for line in body.lines() {
        let Some(payload) = line.strip_prefix("data:") else {
            continue;
        };
        let payload = payload.trim();
        if payload.is_empty() {
            continue;
        }

        match serde_json::from_str::<SseMessage>(payload) {
            Ok(message) => {
                if let Some(data) = message.data {
                    answer.push_str(&data);
                }
            }
            Err(_) => answer.push_str(payload),
        }
    }

    answer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_data_fields_in_line_order() {
        let body = "data: {\"data\": \"Hello, \"}\n\ndata: {\"data\": \"world\"}\n";
        assert_eq!(parse_sse_body(body), "Hello, world");
    }

    #[test]
    fn non_json_payload_is_kept_verbatim() {
        let body = "data: {\"data\": \"a\"}\ndata: not json\ndata: {\"data\": \"b\"}\n";
        assert_eq!(parse_sse_body(body), "anot jsonb");
    }

    #[test]
    fn json_without_data_field_contributes_nothing() {
        let body = "data: {\"type\": \"ping\"}\ndata: {\"data\": \"x\"}\n";
        assert_eq!(parse_sse_body(body), "x");
    }

    #[test]
    fn ignores_comments_and_other_fields() {
        let body = ": keep-alive\nevent: message\ndata: {\"data\": \"ok\"}\n";
        assert_eq!(parse_sse_body(body), "ok");
    }

    #[test]
    fn empty_payloads_are_skipped() {
        assert_eq!(parse_sse_body("data:\ndata:   \n"), "");
    }
}
