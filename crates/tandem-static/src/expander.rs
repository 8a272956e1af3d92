//! Placeholder expansion.
//!
//! A page references components through literal markers: `{{name}}` for a
//! leaf component, `{{name.section}}` for one section of a compound
//! component. Substituted content may itself contain markers (components
//! embedding other components), so expansion runs in repeated passes until
//! no marker remains.

use regex::{Captures, Regex};

use tandem_components::{Component, ComponentDictionary};

/// Errors that can occur while expanding a page.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    #[error("Page references unknown component '{name}'")]
    MissingComponent { name: String },

    #[error("Component '{component}' has no section '{section}'")]
    MissingSection { component: String, section: String },

    #[error("Component '{name}' is compound and must be referenced as '{name}.section'")]
    CompoundWithoutSection { name: String },

    #[error("Cyclic component reference: expansion did not settle after {passes} passes")]
    CyclicExpansion { passes: usize },
}

/// Substitutes component markers into page text.
pub struct Expander {
    marker: Regex,
}

impl Expander {
    pub fn new() -> Self {
        // Interior whitespace is tolerated, so `{{ name }}` and `{{name}}`
        // are equivalent.
        let marker = Regex::new(r"\{\{\s*([A-Za-z0-9_-]+)(?:\.([A-Za-z0-9_-]+))?\s*\}\}")
            .expect("marker pattern is valid");

        Self { marker }
    }

    /// Expand every component marker in `text` against `dictionary`.
    ///
    /// Marker-free text comes back unchanged. The pass count is bounded by
    /// the dictionary size, so a component that directly or transitively
    /// includes itself fails with [`ExpandError::CyclicExpansion`] instead
    /// of looping forever.
    pub fn expand(
        &self,
        text: &str,
        dictionary: &ComponentDictionary,
    ) -> Result<String, ExpandError> {
        let max_passes = dictionary.len() + 1;
        let mut current = text.to_string();
        let mut passes = 0;

        while self.marker.is_match(&current) {
            if passes >= max_passes {
                return Err(ExpandError::CyclicExpansion { passes });
            }
            current = self.substitute_pass(&current, dictionary)?;
            passes += 1;
        }

        Ok(current)
    }

    /// One left-to-right substitution pass over the whole text.
    fn substitute_pass(
        &self,
        text: &str,
        dictionary: &ComponentDictionary,
    ) -> Result<String, ExpandError> {
        let mut failure: Option<ExpandError> = None;

        let result = self.marker.replace_all(text, |caps: &Captures| {
            if failure.is_some() {
                return String::new();
            }

            let name = &caps[1];
            let section = caps.get(2).map(|m| m.as_str());

            let Some(component) = dictionary.get(name) else {
                failure = Some(ExpandError::MissingComponent {
                    name: name.to_string(),
                });
                return String::new();
            };

            match component.content(section) {
                Some(body) => body.to_string(),
                None => {
                    failure = Some(match (component, section) {
                        (Component::Compound(_), None) => ExpandError::CompoundWithoutSection {
                            name: name.to_string(),
                        },
                        (_, section) => ExpandError::MissingSection {
                            component: name.to_string(),
                            section: section.unwrap_or_default().to_string(),
                        },
                    });
                    String::new()
                }
            }
        });

        match failure {
            Some(err) => Err(err),
            None => Ok(result.into_owned()),
        }
    }
}

impl Default for Expander {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn dictionary(entries: &[(&str, &str)]) -> ComponentDictionary {
        let mut dict = ComponentDictionary::new();
        for (name, body) in entries {
            dict.insert(name, Component::Leaf(body.to_string()));
        }
        dict
    }

    #[test]
    fn marker_free_text_is_unchanged() {
        let expander = Expander::new();
        let dict = dictionary(&[("header", "<h1>Hi</h1>")]);
        let text = "<p>No markers here, not even { single } braces.</p>";

        assert_eq!(expander.expand(text, &dict).unwrap(), text);
    }

    #[test]
    fn substitutes_a_leaf_marker() {
        let expander = Expander::new();
        let dict = dictionary(&[("header", "<h1>Hi</h1>")]);

        let result = expander.expand("before {{header}} after", &dict).unwrap();

        assert_eq!(result, "before <h1>Hi</h1> after");
    }

    #[test]
    fn tolerates_interior_whitespace() {
        let expander = Expander::new();
        let dict = dictionary(&[("header", "X")]);

        assert_eq!(expander.expand("{{ header }}", &dict).unwrap(), "X");
    }

    #[test]
    fn each_occurrence_is_substituted_independently() {
        let expander = Expander::new();
        let dict = dictionary(&[("dot", ".")]);

        assert_eq!(expander.expand("{{dot}}{{dot}}{{dot}}", &dict).unwrap(), "...");
    }

    #[test]
    fn nested_components_expand_over_multiple_passes() {
        let expander = Expander::new();
        let dict = dictionary(&[("a", "{{b}}"), ("b", "X")]);

        assert_eq!(expander.expand("{{a}}", &dict).unwrap(), "X");
    }

    #[test]
    fn dotted_markers_address_compound_sections() {
        let expander = Expander::new();
        let mut dict = ComponentDictionary::new();
        let mut sections = HashMap::new();
        sections.insert("head".to_string(), "<head></head>".to_string());
        dict.insert("layout", Component::Compound(sections));

        let result = expander.expand("{{layout.head}}", &dict).unwrap();

        assert_eq!(result, "<head></head>");
    }

    #[test]
    fn missing_component_is_an_error_not_an_empty_string() {
        let expander = Expander::new();
        let dict = dictionary(&[]);

        let result = expander.expand("{{nope}}", &dict);

        assert!(matches!(
            result,
            Err(ExpandError::MissingComponent { name }) if name == "nope"
        ));
    }

    #[test]
    fn missing_section_names_the_offender() {
        let expander = Expander::new();
        let mut dict = ComponentDictionary::new();
        dict.insert("layout", Component::Compound(HashMap::new()));

        let result = expander.expand("{{layout.head}}", &dict);

        assert!(matches!(
            result,
            Err(ExpandError::MissingSection { component, section })
                if component == "layout" && section == "head"
        ));
    }

    #[test]
    fn compound_without_section_is_rejected() {
        let expander = Expander::new();
        let mut dict = ComponentDictionary::new();
        dict.insert("layout", Component::Compound(HashMap::new()));

        let result = expander.expand("{{layout}}", &dict);

        assert!(matches!(
            result,
            Err(ExpandError::CompoundWithoutSection { name }) if name == "layout"
        ));
    }

    #[test]
    fn self_referential_component_fails_instead_of_hanging() {
        let expander = Expander::new();
        let dict = dictionary(&[("a", "wrap {{a}} wrap")]);

        let result = expander.expand("{{a}}", &dict);

        assert!(matches!(result, Err(ExpandError::CyclicExpansion { .. })));
    }

    #[test]
    fn mutually_recursive_components_fail_instead_of_hanging() {
        let expander = Expander::new();
        let dict = dictionary(&[("a", "{{b}}"), ("b", "{{a}}")]);

        let result = expander.expand("{{a}}", &dict);

        assert!(matches!(result, Err(ExpandError::CyclicExpansion { .. })));
    }

    #[test]
    fn substituted_content_is_not_escaped() {
        let expander = Expander::new();
        let dict = dictionary(&[("raw", "<b>&amp;</b>")]);

        assert_eq!(expander.expand("{{raw}}", &dict).unwrap(), "<b>&amp;</b>");
    }
}
