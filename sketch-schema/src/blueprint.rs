//! Starter blueprint files

use crate::config::SketchConfig;
use crate::naming::studly_case;
use crate::{Field, FieldType, PrimaryKey, Relationship, Result, Schema, SketchError};
use std::fs;
use std::path::PathBuf;

/// Writes new blueprint files under the configured blueprints directory
pub struct Blueprint<'a> {
    config: &'a SketchConfig,
}

impl<'a> Blueprint<'a> {
    pub fn new(config: &'a SketchConfig) -> Self {
        Self { config }
    }

    /// Schema written into a new blueprint for `model`
    pub fn starter_schema(&self, model: &str, soft_deletes: bool) -> Schema {
        Schema {
            model: model.to_string(),
            primary_key: PrimaryKey::default(),
            fields: vec![
                Field::new("title", FieldType::String),
                Field::new("content", FieldType::Text).nullable(),
            ],
            timestamps: self.config.timestamps,
            soft_deletes,
            relationships: vec![Relationship {
                owner_key: Some("id".to_string()),
                on_update: Some("cascade".to_string()),
                on_delete: Some("cascade".to_string()),
                ..Relationship::new("belongsTo", "User").with_foreign_key("user_id")
            }],
        }
    }

    /// Path of the blueprint for `name`, where `blog/post` maps to `Blog/Post.yaml`
    pub fn path_for(&self, name: &str) -> Result<(PathBuf, String)> {
        let segments: Vec<String> = name
            .split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(studly_case)
            .collect();

        let (model, dirs) = segments
            .split_last()
            .ok_or_else(|| SketchError::Schema("Blueprint name is required".to_string()))?;
        if segments.iter().any(|s| s.contains('.')) {
            return Err(SketchError::Schema(format!("Invalid blueprint name: {}", name)));
        }

        let mut path = self.config.paths.blueprints.clone();
        path.extend(dirs);
        path.push(format!("{}.yaml", model));
        Ok((path, model.clone()))
    }

    /// Create the blueprint file, refusing to overwrite an existing one
    pub fn create(&self, name: &str, soft_deletes: bool) -> Result<PathBuf> {
        let (path, model) = self.path_for(name)?;
        if path.exists() {
            return Err(SketchError::FileConflict(path));
        }

        let yaml = serde_yaml::to_string(&self.starter_schema(&model, soft_deletes))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SketchError::io(parent, e))?;
        }
        fs::write(&path, yaml).map_err(|e| SketchError::io(&path, e))?;

        log::info!("Created blueprint {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SchemaParser;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> SketchConfig {
        let mut config = SketchConfig::default();
        config.resolve_paths(dir.path());
        config
    }

    #[test]
    fn test_created_blueprint_parses() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let path = Blueprint::new(&config).create("post", true).unwrap();
        assert_eq!(path, dir.path().join("resources/blueprints/Post.yaml"));

        let schema = SchemaParser::parse_file(&path).unwrap();
        assert_eq!(schema.model, "Post");
        assert!(schema.soft_deletes);
        assert!(schema.timestamps);
        assert_eq!(schema.fields.len(), 2);
        assert!(schema.fields[1].nullable);
        assert_eq!(schema.relationships[0].foreign_key.as_deref(), Some("user_id"));
    }

    #[test]
    fn test_nested_name() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let path = Blueprint::new(&config).create("blog/post_comment", false).unwrap();
        assert_eq!(path, dir.path().join("resources/blueprints/Blog/PostComment.yaml"));
        assert_eq!(SchemaParser::parse_file(&path).unwrap().model, "PostComment");
    }

    #[test]
    fn test_existing_blueprint_conflicts() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let blueprint = Blueprint::new(&config);

        blueprint.create("Post", false).unwrap();
        let err = blueprint.create("Post", false).unwrap_err();
        assert!(matches!(err, SketchError::FileConflict(_)));
    }

    #[test]
    fn test_invalid_names() {
        let config = SketchConfig::default();
        let blueprint = Blueprint::new(&config);

        assert!(blueprint.path_for("").is_err());
        assert!(blueprint.path_for("../Post").is_err());
    }
}
