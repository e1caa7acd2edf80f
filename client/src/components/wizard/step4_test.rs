use super::*;

#[test]
fn modal_fields_parse_one_per_line() {
    let fields = parse_modal_fields("Order number *\n\n  Customer  \nDue date*");
    let summary: Vec<(&str, &str, bool)> = fields.iter().map(|f| (f.id.as_str(), f.label.as_str(), f.required)).collect();
    assert_eq!(
        summary,
        vec![("field-1", "Order number", true), ("field-2", "Customer", false), ("field-3", "Due date", true)]
    );
    assert!(fields.iter().all(|f| f.field_type == ComponentType::Textbox));
}

#[test]
fn blank_field_text_has_no_fields() {
    assert!(parse_modal_fields("  \n ").is_empty());
}

#[test]
fn select_indices_map_to_modal_options() {
    assert_eq!(size_from_index("2"), ModalSize::Lg);
    assert_eq!(kind_from_index("2"), ModalKind::Confirm);
}

#[test]
fn bad_select_values_fall_back_to_defaults() {
    assert_eq!(size_from_index("9"), ModalSize::Md);
    assert_eq!(kind_from_index("x"), ModalKind::Form);
}
