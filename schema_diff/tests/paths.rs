//! The dotted path language and its pointer forms

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests should panic on unexpected values"
)]

use schema_diff::diff::{field_name_from_path, is_rename_move, moves_into_array_boundary};
use schema_diff::{Error, Path, PathSegment};

#[test]
fn well_formed_strings_round_trip() {
    for text in ["", "a", "user.name", "tags[*]", "matrix[0][*].value", "a_b.c-d[12]"] {
        let path = Path::from_string(text).unwrap();
        assert_eq!(path.as_simple(), text);
        assert_eq!(Path::from_segments(path.segments().to_vec()), path);
    }
}

#[test]
fn malformed_segment_is_rejected() {
    for text in ["1abc", "a..b", "a[", "a[x]", "a.[0]"] {
        let report = Path::from_string(text).expect_err(text);
        assert!(matches!(report.current_context(), Error::InvalidPathSegment(_)));
    }
}

#[test]
fn transforms_leave_the_receiver_untouched() {
    let base = Path::from_string("list").unwrap();
    let item = base.child_items().child("title");
    let indexed = base.child_index(2);

    assert_eq!(base.as_simple(), "list");
    assert_eq!(item.as_simple(), "list[*].title");
    assert_eq!(indexed.as_json_pointer(), "/list/2");
    assert_eq!(item.as_json_pointer(), "/list/-/title");
    assert!(item.is_child_of(&base));
    assert!(!base.is_child_of(&base));
    assert_eq!(item.parent().parent(), base);
    assert_eq!(Path::empty().parent(), Path::empty());
    assert_eq!(item.last(), Some(&PathSegment::Property("title".to_string())));
}

#[test]
fn schema_pointers_map_to_field_names() {
    assert_eq!(
        field_name_from_path("/properties/orders/items/properties/sku"),
        "orders[*].sku"
    );
    assert_eq!(field_name_from_path("/not/a/field"), "");

    let path = Path::from_string("orders[*].sku").unwrap();
    assert_eq!(
        Path::from_schema_pointer(&path.as_schema_pointer()).unwrap(),
        path
    );
}

#[test]
fn move_classification() {
    assert!(is_rename_move("/properties/oldName", "/properties/newName"));
    assert!(!is_rename_move("/properties/user/properties/name", "/properties/name"));
    assert!(moves_into_array_boundary(
        "/properties/sku",
        "/properties/orders/items/properties/sku"
    ));
}
