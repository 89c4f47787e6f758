//! Form request generator

use super::{Artifact, ArtifactKind, CodeGenerator, TemplateData, TemplateGenerator};
use crate::config::SketchConfig;
use crate::naming::class_basename;
use crate::rules::{field_rules, relationship_rules, Mode, RuleSet};
use crate::{Result, Schema};
use std::path::PathBuf;

pub struct ValidationGenerator<'a> {
    config: &'a SketchConfig,
    templates: &'a TemplateGenerator,
}

impl<'a> ValidationGenerator<'a> {
    pub fn new(config: &'a SketchConfig, templates: &'a TemplateGenerator) -> Self {
        Self { config, templates }
    }

    /// `<requests>/<Model>/<Model><Mode>Request.php`
    pub fn output_path(&self, schema: &Schema, mode: Mode) -> PathBuf {
        let model = class_basename(&schema.model);
        self.config
            .paths
            .requests
            .join(model)
            .join(format!("{}.php", class_name(model, mode)))
    }

    /// Field rules in declaration order, then relationship rules
    pub fn rule_sets(&self, schema: &Schema, mode: Mode) -> Result<Vec<RuleSet>> {
        let mut sets: Vec<RuleSet> = schema
            .fields
            .iter()
            .map(|field| RuleSet::new(&field.name, field_rules(field, mode)))
            .collect();

        for relation in schema.resolved_relationships()? {
            sets.extend(relationship_rules(&relation, mode));
        }

        Ok(sets)
    }

    /// Render the request class for one mode
    pub fn render(&self, schema: &Schema, mode: Mode) -> Result<String> {
        let model = class_basename(&schema.model);

        let mut data = TemplateData::new();
        data.insert("namespace", self.config.request_namespace(model));
        data.insert("class", class_name(model, mode));
        data.insert("rules", rules_body(&self.rule_sets(schema, mode)?));

        self.templates.render(TemplateGenerator::REQUEST, &data)
    }
}

impl CodeGenerator for ValidationGenerator<'_> {
    fn name(&self) -> &'static str {
        "form requests"
    }

    fn generate(&self, schema: &Schema) -> Result<Vec<Artifact>> {
        [(ArtifactKind::CreateRequest, Mode::Create), (ArtifactKind::UpdateRequest, Mode::Update)]
            .into_iter()
            .map(|(kind, mode)| -> Result<Artifact> {
                Ok(Artifact {
                    kind,
                    path: self.output_path(schema, mode),
                    content: self.render(schema, mode)?,
                })
            })
            .collect()
    }
}

/// `PostCreateRequest` or `PostUpdateRequest`
pub fn class_name(model: &str, mode: Mode) -> String {
    format!("{}{}Request", model, mode)
}

fn rules_body(sets: &[RuleSet]) -> String {
    if sets.is_empty() {
        return "return [];".to_string();
    }

    let lines: Vec<String> = sets.iter().map(|set| format!("            {}", set)).collect();
    format!("return [\n{},\n        ];", lines.join(",\n"))
}
