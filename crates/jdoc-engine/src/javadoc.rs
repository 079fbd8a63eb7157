//! Parse a Javadoc comment's literal text into the structured model.
//!
//! The parser is intentionally lightweight: it handles the tag patterns the
//! merger needs without a full Javadoc grammar. Tag order is preserved as
//! written; the merger is responsible for canonical reordering.

use crate::model::{DocTag, JavaDoc, TagKind};

/// Parse a `/** ... */` comment (delimiters optional) into a [`JavaDoc`].
pub fn parse_javadoc(raw: &str) -> JavaDoc {
    let mut description_lines: Vec<String> = Vec::new();
    let mut tags: Vec<DocTag> = Vec::new();

    for line in normalize_lines(raw) {
        if let Some(rest) = line.strip_prefix('@') {
            tags.push(parse_tag(rest));
        } else if let Some(last) = tags.last_mut() {
            // continuation line of the previous tag body
            if !line.is_empty() {
                if !last.body.is_empty() {
                    last.body.push(' ');
                }
                last.body.push_str(&line);
            }
        } else {
            description_lines.push(line);
        }
    }

    while description_lines.first().is_some_and(|line| line.is_empty()) {
        description_lines.remove(0);
    }
    while description_lines.last().is_some_and(|line| line.is_empty()) {
        description_lines.pop();
    }

    JavaDoc {
        description: description_lines.join("\n"),
        tags,
    }
}

/// Strips comment delimiters and per-line `*` gutters.
fn normalize_lines(raw: &str) -> Vec<String> {
    let inner = raw.trim();
    let inner = inner.strip_prefix("/**").unwrap_or(inner);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    inner
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim().to_string()
        })
        .collect()
}

fn parse_tag(rest: &str) -> DocTag {
    let (tag, payload) = split_tag_payload(rest);
    match tag {
        "param" => parse_param(payload),
        "return" | "returns" => DocTag::returns(payload),
        "throws" | "exception" => {
            let (name, body) = split_name_body(payload);
            DocTag::throws(name, body)
        }
        "author" => DocTag::author(payload),
        other => DocTag::custom(other, payload),
    }
}

fn parse_param(payload: &str) -> DocTag {
    if let Some(stripped) = payload.strip_prefix('<') {
        if let Some((name, body)) = stripped.split_once('>') {
            return DocTag::type_param(name.trim(), body.trim());
        }
    }
    let (name, body) = split_name_body(payload);
    DocTag::param(name, body)
}

fn split_tag_payload(input: &str) -> (&str, &str) {
    let mut parts = input.splitn(2, char::is_whitespace);
    let tag = parts.next().unwrap_or("");
    let payload = parts.next().unwrap_or("").trim();
    (tag, payload)
}

fn split_name_body(payload: &str) -> (&str, &str) {
    let mut parts = payload.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("");
    let body = parts.next().unwrap_or("").trim();
    (name, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_description_and_tags() {
        let doc = parse_javadoc(
            "/**\n * Add two values.\n *\n * @param a the first value\n * @param b the second value\n * @return the sum\n * @throws IOException the io exception\n */",
        );
        assert_eq!(doc.description, "Add two values.");
        assert_eq!(doc.tags.len(), 4);
        assert_eq!(doc.tags[0], DocTag::param("a", "the first value"));
        assert_eq!(doc.tags[2], DocTag::returns("the sum"));
        assert_eq!(doc.tags[3], DocTag::throws("IOException", "the io exception"));
    }

    #[test]
    fn parses_single_line_comment() {
        let doc = parse_javadoc("/** The count. */");
        assert_eq!(doc.description, "The count.");
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn parses_type_param() {
        let doc = parse_javadoc("/** @param <T> the type parameter */");
        assert_eq!(doc.tags, vec![DocTag::type_param("T", "the type parameter")]);
    }

    #[test]
    fn keeps_unknown_tags_as_custom() {
        let doc = parse_javadoc("/**\n * @since 1.2\n * @deprecated use {@link #newer()}\n */");
        assert_eq!(doc.tags[0], DocTag::custom("since", "1.2"));
        assert_eq!(doc.tags[1], DocTag::custom("deprecated", "use {@link #newer()}"));
    }

    #[test]
    fn folds_continuation_lines_into_tag_body() {
        let doc = parse_javadoc(
            "/**\n * @param config the configuration object\n *        shared across requests\n */",
        );
        assert_eq!(
            doc.tags[0],
            DocTag::param("config", "the configuration object shared across requests")
        );
    }

    #[test]
    fn multi_line_description_survives() {
        let doc = parse_javadoc("/**\n * First line.\n *\n * Second paragraph.\n */");
        assert_eq!(doc.description, "First line.\n\nSecond paragraph.");
    }

    #[test]
    fn exception_is_an_alias_for_throws() {
        let doc = parse_javadoc("/** @exception IllegalStateException when closed */");
        assert_eq!(
            doc.tags[0],
            DocTag::throws("IllegalStateException", "when closed")
        );
    }
}
