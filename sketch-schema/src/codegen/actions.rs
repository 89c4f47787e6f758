//! Actions class generator

use super::validation::class_name as request_class;
use super::{Artifact, ArtifactKind, CodeGenerator, TemplateData, TemplateGenerator};
use crate::config::SketchConfig;
use crate::naming::class_basename;
use crate::rules::Mode;
use crate::{Result, Schema};
use std::path::PathBuf;

pub struct ActionGenerator<'a> {
    config: &'a SketchConfig,
    templates: &'a TemplateGenerator,
}

impl<'a> ActionGenerator<'a> {
    pub fn new(config: &'a SketchConfig, templates: &'a TemplateGenerator) -> Self {
        Self { config, templates }
    }

    /// `<actions>/<Model>/<Model>Action.php`
    pub fn output_path(&self, schema: &Schema) -> PathBuf {
        let model = class_basename(&schema.model);
        self.config
            .paths
            .actions
            .join(model)
            .join(format!("{}Action.php", model))
    }

    pub fn render(&self, schema: &Schema) -> Result<String> {
        let model = class_basename(&schema.model);
        let requests = self.config.request_namespace(model);

        let mut data = TemplateData::new();
        data.insert("namespace", self.config.action_namespace(model));
        data.insert("class", format!("{}Action", model));
        data.insert("model", model.to_string());
        data.insert("model_class", format!("{}\\{}", self.config.model_namespace, model));
        data.insert(
            "create_request_class",
            format!("{}\\{}", requests, request_class(model, Mode::Create)),
        );
        data.insert(
            "update_request_class",
            format!("{}\\{}", requests, request_class(model, Mode::Update)),
        );

        self.templates.render(TemplateGenerator::ACTION, &data)
    }
}

impl CodeGenerator for ActionGenerator<'_> {
    fn name(&self) -> &'static str {
        "action"
    }

    fn generate(&self, schema: &Schema) -> Result<Vec<Artifact>> {
        Ok(vec![Artifact {
            kind: ArtifactKind::Action,
            path: self.output_path(schema),
            content: self.render(schema)?,
        }])
    }
}
