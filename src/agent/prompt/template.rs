//! Template engine for variable substitution.
//!
//! Used for the decomposition and solve prompts and for the generator
//! command line.
//!
//! # Syntax
//!
//! - `{name}` - Substitutes the value of variable `name`
//! - `{{` - Renders as literal `{`
//! - `}}` - Renders as literal `}`
//!
//! Undefined variables are an error, never an empty substitution.

use std::collections::HashMap;
use thiserror::Error;

/// Error type for template rendering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A variable was referenced but not provided.
    #[error("undefined variable '{name}' at position {position} in template")]
    UndefinedVariable { name: String, position: usize },

    /// A `{` was found without a matching `}`.
    #[error("unmatched '{{' at position {position} in template")]
    UnmatchedBrace { position: usize },

    /// An empty variable name was found (e.g., `{}`).
    #[error("empty variable name '{{}}' at position {position} in template")]
    EmptyVariableName { position: usize },
}

/// One parsed piece of a template.
enum Segment<'a> {
    Literal(char),
    Variable { name: &'a str, position: usize },
}

/// Walk the template, yielding literals and variable references in order.
fn segments(template: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut out = Vec::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push(Segment::Literal('{'));
            }
            '{' => {
                let close = template[pos + 1..]
                    .find('}')
                    .ok_or(TemplateError::UnmatchedBrace { position: pos })?;
                let raw = &template[pos + 1..pos + 1 + close];
                if raw.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position: pos });
                }
                // Skip past the name and the closing brace.
                let end = pos + 1 + close;
                while chars.next_if(|(i, _)| *i <= end).is_some() {}
                out.push(Segment::Variable {
                    name: raw.trim(),
                    position: pos,
                });
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                }
                out.push(Segment::Literal('}'));
            }
            c => out.push(Segment::Literal(c)),
        }
    }

    Ok(out)
}

/// Render a template string by substituting variables.
///
/// ```ignore
/// let vars = vars([("query", "plan a trip")]);
/// let prompt = render_template("Task: {query}", &vars)?;
/// assert_eq!(prompt, "Task: plan a trip");
/// ```
pub fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());

    for segment in segments(template)? {
        match segment {
            Segment::Literal(c) => result.push(c),
            Segment::Variable { name, position } => match variables.get(name) {
                Some(value) => result.push_str(value),
                None => {
                    return Err(TemplateError::UndefinedVariable {
                        name: name.to_string(),
                        position,
                    });
                }
            },
        }
    }

    Ok(result)
}

/// List the variable names a template references, in first-use order.
pub fn referenced_variables(template: &str) -> Result<Vec<String>, TemplateError> {
    let mut names: Vec<String> = Vec::new();
    for segment in segments(template)? {
        if let Segment::Variable { name, .. } = segment
            && !names.iter().any(|n| n == name)
        {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Helper to create a variables map from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
