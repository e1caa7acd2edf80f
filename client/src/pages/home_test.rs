use super::*;

#[test]
fn screen_id_must_be_positive_integer() {
    assert_eq!(parse_screen_id(" 42 "), Some(42));
    assert_eq!(parse_screen_id("0"), None);
    assert_eq!(parse_screen_id("orders"), None);
}

#[test]
fn menu_rows_flatten_children_under_parent() {
    let menus: Vec<Menu> = serde_json::from_str(
        r#"[{"id":1,"name":"Production","is_folder":true,"children":[{"id":2,"name":"Orders"}]}]"#,
    )
    .unwrap();
    let rows = menu_rows(&menus);
    assert_eq!(rows, vec![(0, 1, "Production".to_owned(), true), (1, 2, "Orders".to_owned(), false)]);
}

#[test]
fn status_labels_are_readable() {
    assert_eq!(status_label(ScreenStatus::InReview), "In review");
}

fn tree() -> Vec<Menu> {
    let items: Vec<Menu> = serde_json::from_str(
        r#"[
            {"id":1,"name":"Production","is_folder":true,"order_index":1},
            {"id":2,"name":"Orders","parent_id":1,"order_index":3}
        ]"#,
    )
    .unwrap();
    wire::api::build_menu_tree(items)
}

fn selection(tree: &[Menu], menu_id: i64) -> MenuWithScreens {
    MenuWithScreens { menu: find_menu(tree, menu_id).unwrap().clone(), screens: Vec::new() }
}

#[test]
fn find_menu_searches_children() {
    let tree = tree();
    assert_eq!(find_menu(&tree, 2).map(|m| m.name.as_str()), Some("Orders"));
    assert!(find_menu(&tree, 9).is_none());
}

#[test]
fn new_menu_goes_under_selected_folder_after_siblings() {
    let tree = tree();
    let folder = MenuWithScreens { menu: Menu { children: None, ..selection(&tree, 1).menu }, screens: Vec::new() };
    let body = child_menu_request(&tree, Some(&folder), " Shipments ").unwrap();
    assert_eq!(body.name, "Shipments");
    assert_eq!(body.parent_id, Some(1));
    assert_eq!(body.order_index, 4);
}

#[test]
fn new_menu_needs_a_folder_and_a_name() {
    let tree = tree();
    assert_eq!(child_menu_request(&tree, None, "Shipments"), Err("Select a folder first".to_owned()));
    assert_eq!(
        child_menu_request(&tree, Some(&selection(&tree, 2)), "Shipments"),
        Err("Select a folder first".to_owned())
    );
    assert_eq!(child_menu_request(&tree, Some(&selection(&tree, 1)), "  "), Err("name must not be empty".to_owned()));
}

#[test]
fn new_screen_goes_under_selected_menu_only() {
    let tree = tree();
    let body = screen_request(Some(&selection(&tree, 2)), "Order entry", "").unwrap();
    assert_eq!((body.menu_id, body.name.as_str(), body.description), (2, "Order entry", None));
    assert_eq!(screen_request(Some(&selection(&tree, 1)), "Order entry", ""), Err("Select a menu first".to_owned()));
    assert_eq!(screen_request(None, "Order entry", ""), Err("Select a menu first".to_owned()));
}
