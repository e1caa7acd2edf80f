use super::*;

#[test]
fn every_pattern_compiles() {
    assert_eq!(PATTERNS.len(), NAME_PATTERNS.len());
    assert!(IDENTIFIER.is_some());
}

#[test]
fn export_default_function_wins() {
    let src = "function helper() {}\nexport default function OrderList() { return null; }";
    assert_eq!(component_name(src), "OrderList");
}

#[test]
fn plain_function_declaration() {
    assert_eq!(component_name("function Dashboard() {\n  return <div/>;\n}"), "Dashboard");
}

#[test]
fn arrow_component_assigned_to_const() {
    assert_eq!(component_name("const Widget = () => <span>hi</span>;"), "Widget");
}

#[test]
fn trailing_export_default_reference() {
    let src = "const Panel = React.memo(Inner);\nexport default Panel;";
    assert_eq!(component_name(src), "Panel");
}

#[test]
fn falls_back_to_app() {
    assert_eq!(component_name("<div>static markup</div>"), FALLBACK_COMPONENT);
    assert_eq!(component_name(""), "App");
}

#[test]
fn unusable_capture_defers_to_next_pattern() {
    // `Cell<Props>` is not an identifier, so the const capture is skipped.
    let src = "const Cell<Props> = (props) => null;\nexport default Screen;";
    assert_eq!(component_name(src), "Screen");
}

#[test]
fn identifier_check() {
    assert!(is_identifier("OrderList"));
    assert!(is_identifier("$store_2"));
    assert!(!is_identifier("2fast"));
    assert!(!is_identifier("Foo<Props>"));
    assert!(!is_identifier(""));
}
