//! Built-in stubs for the generated PHP classes
//!
//! Each stub can be replaced through the `[stubs]` section of `sketch.toml`.
//! Placeholders are plain `{{name}}` substitutions; every fragment is
//! computed by the generators before rendering.

/// Eloquent model class
pub const MODEL_TEMPLATE: &str = include_str!("templates/model.php.hbs");

/// Anonymous migration class
pub const MIGRATION_TEMPLATE: &str = include_str!("templates/migration.php.hbs");

/// Form request class, shared by create and update
pub const REQUEST_TEMPLATE: &str = include_str!("templates/request.php.hbs");

/// CRUD actions class
pub const ACTION_TEMPLATE: &str = include_str!("templates/action.php.hbs");
