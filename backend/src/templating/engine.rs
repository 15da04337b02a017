use super::format::FormatOptions;
use super::resolver::resolve;
use common::model::context::TemplateContext;
use common::model::processed::ProcessedTemplate;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// `{{segment(.segment)*}}` with ASCII word segments. Case-sensitive.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)\}\}").expect("placeholder pattern")
});

/// Distinct placeholder paths in `content`, in order of first appearance.
pub fn extract_placeholders(content: &str) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for caps in PLACEHOLDER.captures_iter(content) {
        let name = &caps[1];
        if !seen.iter().any(|s| s == name) {
            seen.push(name.to_string());
        }
    }
    seen
}

/// Substitutes placeholders in template text.
///
/// Each distinct placeholder is resolved once and every occurrence is
/// replaced with the same string. Text that only looks like the start of a
/// placeholder (an unclosed `{{`) is left untouched.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    options: FormatOptions,
}

impl TemplateEngine {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn process(&self, content: &str, context: &TemplateContext) -> ProcessedTemplate {
        let variables = extract_placeholders(content);
        if variables.is_empty() {
            return ProcessedTemplate {
                content: content.to_string(),
                ..Default::default()
            };
        }

        let values: HashMap<&str, String> = variables
            .iter()
            .map(|name| (name.as_str(), resolve(name, context, &self.options)))
            .collect();

        let unresolved = variables
            .iter()
            .filter(|name| values.get(name.as_str()).is_some_and(|v| v.is_empty()))
            .cloned()
            .collect();

        let substituted = PLACEHOLDER.replace_all(content, |caps: &Captures| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        });

        ProcessedTemplate {
            content: substituted.into_owned(),
            variables,
            unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templating::resolver::tests::full_context;
    use common::model::context::ClientView;
    use pretty_assertions::assert_eq;

    fn engine() -> TemplateEngine {
        TemplateEngine::default()
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let content = "Señor juez:\n\nSolicito se tenga presente. { no } {{ }} fin";
        let processed = engine().process(content, &full_context());
        assert_eq!(processed.content, content);
        assert!(processed.variables.is_empty());
        assert!(processed.unresolved.is_empty());
    }

    #[test]
    fn hello_client() {
        let context = TemplateContext {
            client: Some(ClientView {
                name: Some("Acme".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let processed = engine().process("Hello {{client.name}}", &context);
        assert_eq!(processed.content, "Hello Acme");
        assert_eq!(processed.variables, vec!["client.name".to_string()]);
    }

    #[test]
    fn repeated_placeholders_are_replaced_identically() {
        let processed = engine().process(
            "{{case.number}} / {{client.name}} / {{case.number}}",
            &full_context(),
        );
        assert_eq!(processed.content, "C-1234-2026 / Acme / C-1234-2026");
        assert_eq!(
            processed.variables,
            vec!["case.number".to_string(), "client.name".to_string()]
        );
    }

    #[test]
    fn unknown_variables_render_empty_and_are_reported() {
        let processed = engine().process(
            "Tribunal: {{tribunal.nombre}}; Caso: {{case.number}}",
            &full_context(),
        );
        assert_eq!(processed.content, "Tribunal: ; Caso: C-1234-2026");
        assert_eq!(processed.unresolved, vec!["tribunal.nombre".to_string()]);
    }

    #[test]
    fn huge_custom_amounts_keep_their_digits() {
        let mut context = TemplateContext::default();
        context
            .custom
            .insert("monto".to_string(), serde_json::json!(1e21));
        let processed = engine().process("Monto: {{custom.monto}}", &context);
        assert_eq!(processed.content, "Monto: 1.000.000.000.000.000.000.000");
    }

    #[test]
    fn unclosed_placeholder_stays_literal() {
        let processed = engine().process("Cliente {{client.name y {{case.number}}", &full_context());
        assert_eq!(processed.content, "Cliente {{client.name y C-1234-2026");
        assert_eq!(processed.variables, vec!["case.number".to_string()]);
    }

    #[test]
    fn placeholders_are_case_sensitive() {
        let processed = engine().process("{{Client.Name}}", &full_context());
        assert_eq!(processed.content, "");
        assert_eq!(processed.unresolved, vec!["Client.Name".to_string()]);
    }

    #[test]
    fn processing_is_deterministic() {
        let content = "{{case.title}} ({{case.opened_at}}) {{case.fees}} {{parte.demandada.name}}";
        let context = full_context();
        assert_eq!(engine().process(content, &context), engine().process(content, &context));
    }

    #[test]
    fn extract_keeps_first_appearance_order() {
        let names = extract_placeholders("{{b.x}} {{a.y}} {{b.x}} {{c}}");
        assert_eq!(names, vec!["b.x", "a.y", "c"]);
    }
}
