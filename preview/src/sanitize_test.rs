use super::*;

const GENERATED: &str = r#"import React, { useState, useRef } from 'react';
import { Search, Plus } from "lucide-react";

interface Row {
  id: number;
  name: string;
}

type Filter = 'all' | 'open';

export default function OrderList(props: OrderListProps<string>) {
  const [rows, setRows] = useState<Row[]>([]);
  const input = useRef<HTMLInputElement>(null);
  const count: number = rows.length;
  const onSearch = (term: string): void => setRows([]);
  return <div title="Orders: string view">{props.title}: {count}</div>;
}
"#;

#[test]
fn every_rule_compiles() {
    assert_eq!(MODULE.len(), MODULE_RULES.len());
    assert_eq!(TYPES.len(), TYPE_RULES.len());
    assert!(SENTINEL.is_some());
}

#[test]
fn strips_module_syntax() {
    let out = sanitize(GENERATED);
    assert!(!out.contains("import"));
    assert!(!out.contains("export"));
    assert!(out.contains("function OrderList("));
}

#[test]
fn strips_type_declarations_and_annotations() {
    let out = sanitize(GENERATED);
    assert!(!out.contains("interface Row"));
    assert!(!out.contains("type Filter"));
    assert!(out.contains("useState([])"));
    assert!(out.contains("useRef(null)"));
    assert!(out.contains("const count = rows.length"));
    assert!(out.contains("(term) => setRows"));
    assert!(out.contains("function OrderList(props)"));
}

#[test]
fn string_literals_survive_type_rules() {
    let out = sanitize(GENERATED);
    assert!(out.contains(r#"title="Orders: string view""#));
}

#[test]
fn template_literals_and_comments_are_protected() {
    let src = "const label = `Total: number ${n}`;\n// note: boolean flag\n/* ratio: any */\nlet x: any = 1;";
    let out = sanitize(src);
    assert!(out.contains("`Total: number ${n}`"));
    assert!(out.contains("// note: boolean flag"));
    assert!(out.contains("/* ratio: any */"));
    assert!(out.contains("let x = 1;"));
}

#[test]
fn apostrophes_in_jsx_text_are_not_strings() {
    let src = "function A() {\n  return <p>Don't panic</p>;\n}\nconst n: number = 2;";
    let out = sanitize(src);
    assert!(out.contains("<p>Don't panic</p>"));
    assert!(out.contains("const n = 2;"));
}

#[test]
fn destructured_react_globals_are_removed() {
    let out = sanitize("const { useState, useEffect } = React;\nfunction App() { return null; }");
    assert_eq!(out.trim(), "function App() { return null; }");
}

#[test]
fn trailing_default_export_reference_is_removed() {
    let out = sanitize("const Panel = () => null;\nexport default Panel;\n");
    assert!(!out.contains("export"));
    assert!(out.contains("const Panel = () => null;"));
}

#[test]
fn sanitize_is_idempotent() {
    let once = sanitize(GENERATED);
    assert_eq!(sanitize(&once), once);

    let plain = "function App() {\n  return <div className=\"p-4\">Hello</div>;\n}\n";
    assert_eq!(sanitize(plain), plain);
}

#[test]
fn sentinel_characters_in_source_disable_masking() {
    let src = "const s = '\u{E000}0\u{E001}';\nlet v: string = s;";
    let out = sanitize(src);
    assert!(out.contains("let v = s;"));
    assert!(out.contains('\u{E000}'));
}

#[test]
fn unterminated_block_comment_is_plain_text() {
    let out = sanitize("/* open\nlet v: boolean = true;");
    assert!(out.contains("let v = true;"));
}
