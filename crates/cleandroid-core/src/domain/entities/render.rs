use std::collections::BTreeMap;

use crate::domain::naming::{to_kebab_case, to_pascal_case, to_snake_case};

/// Variables substituted into built-in templates.
///
/// Placeholders are `{{NAME}}`. Unknown placeholders are left as-is so a
/// missing variable is visible in the output rather than silently blank.
///
/// | Variable | Example |
/// |----------|---------|
/// | `APP_NAME` | `My Notes` |
/// | `APP_NAME_PASCAL` | `MyNotes` |
/// | `APP_NAME_SNAKE` | `my_notes` |
/// | `APP_NAME_KEBAB` | `my-notes` |
///
/// Everything else is added by blueprints with [`RenderContext::with_variable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new(app_name: &str) -> Self {
        Self::default()
            .with_variable("APP_NAME", app_name)
            .with_variable("APP_NAME_PASCAL", to_pascal_case(app_name))
            .with_variable("APP_NAME_SNAKE", to_snake_case(app_name))
            .with_variable("APP_NAME_KEBAB", to_kebab_case(app_name))
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{KEY}}` in `template`.
    ///
    /// Substituted values are not rescanned, so a value containing `{{X}}`
    /// stays literal.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = &after[..end];
                    match self.variables.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("{{");
                            out.push_str(key);
                            out.push_str("}}");
                        }
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_variables() {
        let ctx = RenderContext::new("my notes app");
        assert_eq!(ctx.get("APP_NAME"), Some("my notes app"));
        assert_eq!(ctx.get("APP_NAME_PASCAL"), Some("MyNotesApp"));
        assert_eq!(ctx.get("APP_NAME_SNAKE"), Some("my_notes_app"));
        assert_eq!(ctx.get("APP_NAME_KEBAB"), Some("my-notes-app"));
    }

    #[test]
    fn renders_known_and_keeps_unknown() {
        let ctx = RenderContext::default().with_variable("PACKAGE", "com.acme");
        assert_eq!(
            ctx.render("package {{PACKAGE}}\n// {{MISSING}}"),
            "package com.acme\n// {{MISSING}}"
        );
    }

    #[test]
    fn values_are_not_rescanned() {
        let ctx = RenderContext::default()
            .with_variable("A", "{{B}}")
            .with_variable("B", "b");
        assert_eq!(ctx.render("{{A}}{{B}}"), "{{B}}b");
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        let ctx = RenderContext::default().with_variable("A", "a");
        assert_eq!(ctx.render("x {{A"), "x {{A");
    }
}
