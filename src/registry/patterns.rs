//! Step patterns recognised by the HTTP steps.

pub const MAKE_A_REQUEST: &str =
    r#"^I make a (GET|POST|PUT|DELETE|OPTIONS) request to "([^"]*)"$"#;
pub const RESPONSE_CODE_EQUALS: &str = r"^the response code equals (\d+)$";
pub const RESPONSE_IS_VALID_JSON: &str = r"^the response contains a valid JSON$";
pub const RESPONSE_IS: &str = r#"^the response is "(.*)"$"#;
pub const RESPONSE_HEADER_EQUALS: &str = r#"^the response header "(.*)" equals "(.*)"$"#;
pub const HAVE_A_REQUEST: &str = r#"^I have a (GET|POST|PUT|DELETE|OPTIONS) request "(.*)"$"#;
pub const SET_REQUEST_HEADER: &str = r#"^I set request header "(.*)" to "(.*)"$"#;
pub const SET_REQUEST_BODY: &str = r#"^I set request body to "([^"]*)"$"#;
pub const REQUEST_HAS_BODY: &str = r#"^the request has body "(.*)"$"#;
pub const MAKE_THE_REQUEST: &str = r"^I make the request$";

pub const ALL: [&str; 10] = [
    MAKE_A_REQUEST,
    RESPONSE_CODE_EQUALS,
    RESPONSE_IS_VALID_JSON,
    RESPONSE_IS,
    RESPONSE_HEADER_EQUALS,
    HAVE_A_REQUEST,
    SET_REQUEST_HEADER,
    SET_REQUEST_BODY,
    REQUEST_HAS_BODY,
    MAKE_THE_REQUEST,
];

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn captures(pattern: &str, text: &str) -> Option<Vec<String>> {
        let regex = Regex::new(pattern).unwrap();
        regex.captures(text).map(|caps| {
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect()
        })
    }

    #[test]
    fn every_pattern_compiles() {
        for pattern in ALL {
            assert!(Regex::new(pattern).is_ok(), "{pattern}");
        }
    }

    #[test]
    fn make_a_request_captures_method_and_url() {
        assert_eq!(
            captures(MAKE_A_REQUEST, r#"I make a DELETE request to "http://x.test/a""#),
            Some(vec!["DELETE".to_string(), "http://x.test/a".to_string()])
        );
        assert_eq!(
            captures(MAKE_A_REQUEST, r#"I make a PATCH request to "http://x.test/a""#),
            None
        );
    }

    #[test]
    fn response_is_captures_embedded_quotes() {
        assert_eq!(
            captures(RESPONSE_IS, r#"the response is "{"ok":true}""#),
            Some(vec![r#"{"ok":true}"#.to_string()])
        );
    }

    #[test]
    fn set_request_body_refuses_quotes() {
        assert_eq!(
            captures(SET_REQUEST_BODY, r#"I set request body to "{"a":1}""#),
            None
        );
        assert_eq!(
            captures(REQUEST_HAS_BODY, r#"the request has body "{"a":1}""#),
            Some(vec![r#"{"a":1}"#.to_string()])
        );
    }

    #[test]
    fn response_code_only_accepts_digits() {
        assert_eq!(
            captures(RESPONSE_CODE_EQUALS, "the response code equals 204"),
            Some(vec!["204".to_string()])
        );
        assert_eq!(captures(RESPONSE_CODE_EQUALS, "the response code equals OK"), None);
    }
}
