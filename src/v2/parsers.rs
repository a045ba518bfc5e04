/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use reqwest::header::{HeaderMap, LINK};
use serde::Deserialize;

// Parses strings that may be "" or null and sets to None
pub fn from_empty_str_to_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

// Finds the rel="next" target of a Link header
// e.g. `<https://api.onfido.com/v2/live_photos?page=2>; rel="next", <...>; rel="last"`
pub fn next_page_from_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .find_map(|entry| {
            let mut parts = entry.split(';');
            let target = parts.next()?.trim();
            let is_next = parts.any(|p| {
                let p = p.trim();
                p.strip_prefix("rel=")
                    .map(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "next"))
                    .unwrap_or(false)
            });
            if !is_next {
                return None;
            }
            target
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use reqwest::header::HeaderValue;

    fn link_headers(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for v in values {
            headers.append(LINK, HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn finds_next_among_other_relations() {
        let headers = link_headers(&[
            r#"<https://api.onfido.com/v2/live_photos?page=3>; rel="last", <https://api.onfido.com/v2/live_photos?page=2>; rel="next""#,
        ]);
        assert_eq!(
            next_page_from_link(&headers).as_deref(),
            Some("https://api.onfido.com/v2/live_photos?page=2")
        );
    }

    #[test]
    fn next_in_second_header_line() {
        let headers = link_headers(&[r#"</v2/a?page=1>; rel="prev""#, r#"</v2/a?page=3>; rel=next"#]);
        assert_eq!(next_page_from_link(&headers).as_deref(), Some("/v2/a?page=3"));
    }

    #[test]
    fn no_next_relation() {
        assert_eq!(next_page_from_link(&HeaderMap::new()), None);
        let headers = link_headers(&[r#"</v2/a?page=1>; rel="first", </v2/a?page=1>; rel="last""#]);
        assert_eq!(next_page_from_link(&headers), None);
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "from_empty_str_to_none")]
        value: Option<String>,
    }

    #[test]
    fn empty_and_null_strings_are_none() {
        let h: Holder = serde_json::from_str(r#"{"value": ""}"#).unwrap();
        assert_eq!(h.value, None);
        let h: Holder = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(h.value, None);
        let h: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(h.value, None);
        let h: Holder = serde_json::from_str(r#"{"value": "x.jpg"}"#).unwrap();
        assert_eq!(h.value.as_deref(), Some("x.jpg"));
    }
}
