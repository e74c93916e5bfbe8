use kit::indexmap::IndexMap;
use thiserror::Error;

/// Delimiter pair wrapping placeholder names in generated-source templates.
/// Chosen to survive the target language's own formatting; values carrying
/// the sequence are rejected outright to keep substitution injection-free.
pub const PLACEHOLDER_DELIMITER: &str = "@@";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unterminated placeholder delimiter at byte {0}")]
    UnterminatedPlaceholder(usize),
    #[error("invalid placeholder name '{0}', expected [a-z0-9-]+")]
    InvalidPlaceholderName(String),
    #[error("no binding provided for placeholder '{0}'")]
    UnboundPlaceholder(String),
    #[error("value bound to '{0}' contains the placeholder delimiter")]
    DelimiterInValue(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A template compiled once into an ordered literal/placeholder token list,
/// rendered any number of times against a binding map. A tiny compiler pass
/// rather than string concatenation.
#[derive(Clone, Debug)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn compile(source: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;
        while let Some(start) = rest.find(PLACEHOLDER_DELIMITER) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after_open = &rest[start + PLACEHOLDER_DELIMITER.len()..];
            let Some(end) = after_open.find(PLACEHOLDER_DELIMITER) else {
                return Err(TemplateError::UnterminatedPlaceholder(offset + start));
            };
            let name = &after_open[..end];
            if name.is_empty() || !name.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-') {
                return Err(TemplateError::InvalidPlaceholderName(name.to_string()));
            }
            segments.push(Segment::Placeholder(name.to_string()));
            let consumed = start + 2 * PLACEHOLDER_DELIMITER.len() + end;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }
        Ok(Template { segments })
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for segment in self.segments.iter() {
            if let Segment::Placeholder(name) = segment {
                if !seen.contains(&name.as_str()) {
                    seen.push(name.as_str());
                }
            }
        }
        seen
    }

    /// Substitutes every placeholder through the binding map. Bindings the
    /// template never references are ignored; placeholders with no binding,
    /// and values carrying the delimiter sequence, fail the render.
    pub fn render(&self, bindings: &IndexMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in self.segments.iter() {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = bindings
                        .get(name)
                        .ok_or_else(|| TemplateError::UnboundPlaceholder(name.clone()))?;
                    if value.contains(PLACEHOLDER_DELIMITER) {
                        return Err(TemplateError::DelimiterInValue(name.clone()));
                    }
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn literal_only_template_renders_unchanged() {
        let template = Template::compile("no placeholders here").unwrap();
        assert_eq!(template.render(&bindings(&[])).unwrap(), "no placeholders here");
    }

    #[test]
    fn substitutes_in_order() {
        let template =
            Template::compile("import { @@class@@ } from \"@@package@@\";").unwrap();
        assert_eq!(template.placeholders(), vec!["class", "package"]);
        let rendered =
            template.render(&bindings(&[("class", "EvmAdapter"), ("package", "@formtx/evm")]));
        assert_eq!(rendered.unwrap(), "import { EvmAdapter } from \"@formtx/evm\";");
    }

    #[test]
    fn adjacent_placeholders_are_parsed() {
        let template = Template::compile("@@a@@@@b@@").unwrap();
        assert_eq!(template.render(&bindings(&[("a", "1"), ("b", "2")])).unwrap(), "12");
    }

    #[test]
    fn repeated_placeholder_reported_once() {
        let template = Template::compile("@@name@@ and @@name@@ again").unwrap();
        assert_eq!(template.placeholders(), vec!["name"]);
    }

    #[test]
    fn unterminated_delimiter_is_a_compile_error() {
        let err = Template::compile("prefix @@name").unwrap_err();
        assert_eq!(err, TemplateError::UnterminatedPlaceholder(7));
    }

    #[test]
    fn uppercase_names_are_rejected() {
        let err = Template::compile("@@Name@@").unwrap_err();
        assert_eq!(err, TemplateError::InvalidPlaceholderName("Name".to_string()));
    }

    #[test]
    fn missing_binding_fails_the_render() {
        let template = Template::compile("@@function-id@@").unwrap();
        let err = template.render(&bindings(&[])).unwrap_err();
        assert_eq!(err, TemplateError::UnboundPlaceholder("function-id".to_string()));
    }

    #[test]
    fn value_containing_the_delimiter_is_rejected() {
        let template = Template::compile("const id = \"@@function-id@@\";").unwrap();
        let err = template.render(&bindings(&[("function-id", "@@evil@@")])).unwrap_err();
        assert_eq!(err, TemplateError::DelimiterInValue("function-id".to_string()));
    }

    #[test]
    fn extra_bindings_are_ignored() {
        let template = Template::compile("hello @@name@@").unwrap();
        let rendered = template.render(&bindings(&[("name", "world"), ("unused", "x")]));
        assert_eq!(rendered.unwrap(), "hello world");
    }
}
