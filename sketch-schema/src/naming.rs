//! Naming conventions shared by every generator
//!
//! All functions here are pure. Table, pivot and key names derived from the
//! same model names are identical no matter which generator asks.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Irregular singular to plural forms, lowercase
static IRREGULAR_PLURALS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("person", "people"),
        ("child", "children"),
        ("man", "men"),
        ("woman", "women"),
        ("mouse", "mice"),
        ("goose", "geese"),
        ("tooth", "teeth"),
        ("foot", "feet"),
        ("ox", "oxen"),
        ("quiz", "quizzes"),
        ("hero", "heroes"),
        ("potato", "potatoes"),
        ("tomato", "tomatoes"),
        ("echo", "echoes"),
        ("thief", "thieves"),
    ])
});

/// Words with no distinct plural form
static UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "news",
];

/// Convert `PostComment` or `post-comment` to `post_comment`
pub fn snake_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 4);

    for ch in input.chars() {
        if ch == '-' || ch == ' ' || ch == '_' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if ch.is_uppercase() && !result.is_empty() && !result.ends_with('_') {
            result.push('_');
        }
        result.extend(ch.to_lowercase());
    }

    result
}

/// Convert `post_comment` to `PostComment`, keeping inner capitals
pub fn studly_case(input: &str) -> String {
    input
        .split(|c| c == '_' || c == '-' || c == ' ')
        .filter(|word| !word.is_empty())
        .map(upper_first)
        .collect()
}

/// Convert `post_comment` or `PostComment` to `postComment`
pub fn camel_case(input: &str) -> String {
    lower_first(&studly_case(input))
}

/// Pluralize the last word of `input`, preserving its leading case
pub fn pluralize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let start = last_word_start(input);
    let (head, word) = input.split_at(start);
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return input.to_string();
    }

    if let Some(plural) = IRREGULAR_PLURALS.get(lower.as_str()) {
        let plural = if word.starts_with(char::is_uppercase) {
            upper_first(plural)
        } else {
            (*plural).to_string()
        };
        return format!("{}{}", head, plural);
    }

    format!("{}{}", head, regular_plural(word, &lower))
}

fn regular_plural(word: &str, lower: &str) -> String {
    if lower.ends_with('y') && !ends_with_vowel_y(lower) {
        format!("{}ies", stem(word, 1))
    } else if lower.ends_with("sis") {
        format!("{}es", stem(word, 2))
    } else if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        format!("{}es", word)
    } else if lower.ends_with("ife") {
        format!("{}ves", stem(word, 2))
    } else if lower.ends_with("lf") || lower.ends_with("eaf") || lower.ends_with("oaf") {
        format!("{}ves", stem(word, 1))
    } else {
        format!("{}s", word)
    }
}

fn stem(word: &str, n: usize) -> &str {
    &word[..word.len() - n]
}

fn ends_with_vowel_y(lower: &str) -> bool {
    let mut chars = lower.chars().rev();
    chars.next();
    matches!(chars.next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}

/// Byte offset where the last word starts, split on capitals and separators
fn last_word_start(input: &str) -> usize {
    input
        .char_indices()
        .filter(|(i, c)| *i > 0 && (c.is_uppercase() || input[..*i].ends_with(&['_', '-', ' '][..])))
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0)
}

/// Last segment of a namespaced class name (`App\Models\User` or `Blog/Post`)
pub fn class_basename(model: &str) -> &str {
    model.rsplit(&['\\', '/'][..]).next().unwrap_or(model)
}

/// Conventional table name: `Post` becomes `posts`
pub fn table_name(model: &str) -> String {
    snake_case(&pluralize(class_basename(model)))
}

/// Join table for two models, independent of argument order
pub fn pivot_table_name(model_a: &str, model_b: &str) -> String {
    let mut tables = [table_name(model_a), table_name(model_b)];
    tables.sort();
    tables.join("_")
}

/// Conventional foreign key pointing at `model`: `User` becomes `user_id`
pub fn default_foreign_key(model: &str) -> String {
    format!("{}_id", snake_case(class_basename(model)))
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("UserAccount"), "user_account");
        assert_eq!(snake_case("XMLHttpRequest"), "x_m_l_http_request");
        assert_eq!(snake_case("already_snake"), "already_snake");
        assert_eq!(snake_case("post-comment"), "post_comment");
        assert_eq!(snake_case("Post"), "post");
    }

    #[test]
    fn test_studly_and_camel_case() {
        assert_eq!(studly_case("user_account"), "UserAccount");
        assert_eq!(studly_case("xml-http-request"), "XmlHttpRequest");
        assert_eq!(studly_case("UserAccount"), "UserAccount");
        assert_eq!(camel_case("user_account"), "userAccount");
        assert_eq!(camel_case("UserProfile"), "userProfile");
        assert_eq!(camel_case("User"), "user");
    }

    #[test]
    fn test_pluralize_regular() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("Post"), "Posts");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(pluralize("branch"), "branches");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("leaf"), "leaves");
        assert_eq!(pluralize("shelf"), "shelves");
        assert_eq!(pluralize("analysis"), "analyses");
    }

    #[test]
    fn test_pluralize_irregular_and_uncountable() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("Person"), "People");
        assert_eq!(pluralize("Child"), "Children");
        assert_eq!(pluralize("SalesPerson"), "SalesPeople");
        assert_eq!(pluralize("Equipment"), "Equipment");
        assert_eq!(pluralize("sheep"), "sheep");
    }

    #[test]
    fn test_pluralize_only_last_word() {
        assert_eq!(pluralize("PostCategory"), "PostCategories");
        assert_eq!(pluralize("user_category"), "user_categories");
    }

    #[test]
    fn test_table_name() {
        assert_eq!(table_name("Post"), "posts");
        assert_eq!(table_name("User"), "users");
        assert_eq!(table_name("PostCategory"), "post_categories");
        assert_eq!(table_name("App\\Models\\Person"), "people");
        assert_eq!(table_name("Blog/Comment"), "comments");
    }

    #[test]
    fn test_pivot_table_name_is_order_independent() {
        assert_eq!(pivot_table_name("Post", "Tag"), "posts_tags");
        assert_eq!(pivot_table_name("Tag", "Post"), "posts_tags");
        assert_eq!(pivot_table_name("User", "Role"), pivot_table_name("Role", "User"));
    }

    #[test]
    fn test_default_foreign_key() {
        assert_eq!(default_foreign_key("User"), "user_id");
        assert_eq!(default_foreign_key("BlogPost"), "blog_post_id");
        assert_eq!(default_foreign_key("App\\Models\\User"), "user_id");
    }

    #[test]
    fn test_class_basename() {
        assert_eq!(class_basename("App\\Models\\User"), "User");
        assert_eq!(class_basename("Blog/Post"), "Post");
        assert_eq!(class_basename("Post"), "Post");
    }
}
