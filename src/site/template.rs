//! `{{ variable }}` template rendering

use crate::errors::{EwtError, Result};
use include_dir::{Dir, include_dir};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static TEMPLATES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("template pattern is valid"));

/// Values available to a template
pub type TemplateContext = HashMap<&'static str, String>;

/// The embedded install page template
pub fn index_template() -> Result<&'static str> {
    embedded("index.html")
}

fn embedded(name: &str) -> Result<&'static str> {
    TEMPLATES
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| EwtError::Site(format!("Missing embedded template: {}", name)))
}

/// Replace `{{ name }}` with context values; unknown names are left as written
pub fn render_template(template: &str, context: &TemplateContext) -> String {
    VARIABLE
        .replace_all(template, |caps: &Captures| match context.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_known_variables() {
        let mut context = TemplateContext::new();
        context.insert("title", "Office".to_string());
        context.insert("chip_family", "ESP32".to_string());

        assert_eq!(
            render_template("<h1>{{title}}</h1><p>{{  chip_family }}</p>", &context),
            "<h1>Office</h1><p>ESP32</p>"
        );
    }

    #[test]
    fn test_unknown_variables_are_kept() {
        let context = TemplateContext::new();
        assert_eq!(
            render_template("{{ missing }} {{ not a var }}", &context),
            "{{ missing }} {{ not a var }}"
        );
    }

    #[test]
    fn test_values_are_not_rendered_again() {
        let mut context = TemplateContext::new();
        context.insert("yaml_content", "{{ title }}".to_string());
        context.insert("title", "Office".to_string());
        assert_eq!(render_template("{{ yaml_content }}", &context), "{{ title }}");
    }

    #[test]
    fn test_index_template_has_install_button() {
        let template = index_template().unwrap();
        assert!(template.contains("esp-web-install-button"));
        for var in [
            "title",
            "yaml_filename",
            "chip_family",
            "build_date",
            "esphome_config_html",
            "yaml_content",
            "esp_web_tools_url",
        ] {
            assert!(
                VARIABLE
                    .captures_iter(template)
                    .any(|caps| &caps[1] == var),
                "template should reference {}",
                var
            );
        }
    }
}
