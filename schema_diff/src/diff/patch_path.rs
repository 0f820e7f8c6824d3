//! JSON-Pointer analysis for patches against JSON-Schema documents
//!
//! Fields are addressed as `/properties/<name>` pairs, array nesting as `/items`.

use crate::json_schema::SchemaField;
use crate::path::Path;

/// Pointer fragment that marks one level of array nesting
const ITEMS_FRAGMENT: &str = "/items";

/// Dotted field name for a schema pointer; malformed pointers yield `""`
pub fn field_name_from_path(pointer: &str) -> String {
    match Path::from_schema_pointer(pointer) {
        Ok(path) => path.as_simple(),
        Err(report) => {
            tracing::debug!("Unable to derive field name: {}", report.current_context());
            String::new()
        }
    }
}

/// The pointer with its trailing `/properties/<name>` pair removed
fn parent_pointer(pointer: &str) -> Option<&str> {
    let (rest, name) = pointer.rsplit_once('/')?;
    let (parent, keyword) = rest.rsplit_once('/')?;
    (keyword == SchemaField::Properties.as_ref() && !name.is_empty()).then_some(parent)
}

/// Whether a move keeps the field inside the same parent object
pub fn is_rename_move(from: &str, to: &str) -> bool {
    match (parent_pointer(from), parent_pointer(to)) {
        (Some(from_parent), Some(to_parent)) => from_parent == to_parent,
        _ => false,
    }
}

/// Whether the destination sits under more array levels than the source
pub fn moves_into_array_boundary(from: &str, to: &str) -> bool {
    to.matches(ITEMS_FRAGMENT).count() > from.matches(ITEMS_FRAGMENT).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_follow_the_path_model() {
        assert_eq!(field_name_from_path("/properties/title"), "title");
        assert_eq!(
            field_name_from_path("/properties/user/properties/name"),
            "user.name"
        );
        assert_eq!(
            field_name_from_path("/properties/tags/items/properties/label"),
            "tags[*].label"
        );
        assert_eq!(field_name_from_path(""), "");
    }

    #[test]
    fn malformed_pointer_yields_empty_name() {
        assert_eq!(field_name_from_path("title"), "");
        assert_eq!(field_name_from_path("/properties"), "");
        assert_eq!(field_name_from_path("/definitions/x"), "");
    }

    #[test]
    fn rename_requires_same_parent() {
        assert!(is_rename_move("/properties/oldName", "/properties/newName"));
        assert!(is_rename_move(
            "/properties/user/properties/first",
            "/properties/user/properties/given"
        ));
        assert!(!is_rename_move("/properties/user/properties/name", "/properties/name"));
        assert!(!is_rename_move(
            "/properties/list/items/properties/a",
            "/properties/list/properties/a"
        ));
    }

    #[test]
    fn rename_needs_field_pointers() {
        assert!(!is_rename_move("/properties/tags/items", "/properties/tags/items"));
        assert!(!is_rename_move("", "/properties/a"));
    }

    #[test]
    fn array_boundary_counts_items_levels() {
        assert!(moves_into_array_boundary(
            "/properties/name",
            "/properties/names/items"
        ));
        assert!(moves_into_array_boundary(
            "/properties/a/items",
            "/properties/a/items/items"
        ));
        assert!(!moves_into_array_boundary(
            "/properties/a/items",
            "/properties/b/items"
        ));
        assert!(!moves_into_array_boundary(
            "/properties/a/items/properties/x",
            "/properties/x"
        ));
    }
}
