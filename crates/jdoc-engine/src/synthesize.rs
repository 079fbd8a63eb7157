//! Tag skeleton synthesis from signature facts.
//!
//! Pure functions of their inputs: no tree access, no side effects. Bodies
//! are name-derived placeholders ("the first name" for `firstName`); the
//! merger decides whether a placeholder or user-written text survives.

use crate::model::{DocTag, JavaDoc};
use crate::settings::JavaDocSettings;
use crate::signature::{ElementKind, ParamFact, SignatureFacts};

/// Produces the synthesized comment for a declaration, tags in canonical
/// order. Never fails for a well-formed signature; an element with no
/// parameters, exceptions, or generics yields a description-only comment.
pub fn synthesize(facts: &SignatureFacts, settings: &JavaDocSettings) -> JavaDoc {
    let mut tags = Vec::new();

    if facts.kind == ElementKind::Class {
        if let Some(author) = &settings.author {
            tags.push(DocTag::author(author.clone()));
        }
    }
    for type_param in &facts.type_params {
        tags.push(DocTag::type_param(type_param.clone(), "the type parameter"));
    }
    for param in &facts.params {
        tags.push(DocTag::param(param.name.clone(), param_body(param)));
    }
    if facts.has_return() {
        tags.push(DocTag::returns(return_body(facts)));
    }
    for exception in &facts.throws {
        tags.push(DocTag::throws(
            exception.clone(),
            format!("the {}", humanize(&short_type(exception))),
        ));
    }

    let mut doc = JavaDoc {
        description: description_of(facts),
        tags,
    };
    doc.sort_tags();
    doc
}

fn description_of(facts: &SignatureFacts) -> String {
    match facts.kind {
        ElementKind::Class => format!("The type {}.", sentence_case(&facts.name)),
        ElementKind::Field => format!("The {}.", humanize(&facts.name)),
        ElementKind::Method => {
            if facts.is_constructor {
                format!("Instantiates a new {}.", sentence_case(&facts.name))
            } else if let Some(property) = accessor_property(&facts.name, "get") {
                format!("Gets the {}.", humanize(property))
            } else if let Some(property) = accessor_property(&facts.name, "set") {
                format!("Sets the {}.", humanize(property))
            } else {
                format!("{}.", sentence_case(&facts.name))
            }
        }
    }
}

fn param_body(param: &ParamFact) -> String {
    // single-letter names carry no meaning; fall back to the declared type
    if param.name.chars().count() > 1 || param.type_name.is_empty() {
        format!("the {}", humanize(&param.name))
    } else {
        format!("the {}", humanize(&short_type(&param.type_name)))
    }
}

fn return_body(facts: &SignatureFacts) -> String {
    if let Some(property) = accessor_property(&facts.name, "get") {
        return format!("the {}", humanize(property));
    }
    match &facts.return_type {
        Some(return_type) => format!("the {}", humanize(&short_type(return_type))),
        None => String::new(),
    }
}

/// `getFirstName` with prefix `get` yields `FirstName`.
fn accessor_property<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    rest.starts_with(char::is_uppercase).then_some(rest)
}

/// Unqualified base type: `java.util.List<String>[]` becomes `List`.
fn short_type(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let base = base.trim_end_matches("[]").trim();
    base.rsplit('.').next().unwrap_or(base).to_string()
}

/// Splits camelCase, SCREAMING_CASE, and acronym runs into lowercase words:
/// `JavaDocWriterImpl` becomes `java doc writer impl`.
fn humanize(name: &str) -> String {
    split_words(name).join(" ")
}

/// Humanized with the first letter capitalized: `writerImpl` becomes `Writer impl`.
fn sentence_case(name: &str) -> String {
    let mut humanized = humanize(name);
    if let Some(first) = humanized.get(..1) {
        let capital = first.to_uppercase();
        humanized.replace_range(..1, &capital);
    }
    humanized
}

fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (index, &c) in chars.iter().enumerate() {
        if c == '_' || c == '$' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[index - 1];
            let next_is_lower = chars
                .get(index + 1)
                .is_some_and(|next| next.is_lowercase());
            // break on a case flip, and before the last capital of an acronym
            // run, so "IOException" splits into "io exception"
            if prev.is_lowercase() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
