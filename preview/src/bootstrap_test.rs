use boa_engine::{Context, Source};

use super::*;
use crate::cycle::MountPolicy;
use crate::document::build_document;

#[test]
fn icon_catalog_has_no_duplicates() {
    let mut names = ICON_NAMES.to_vec();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), ICON_NAMES.len());
}

#[test]
fn kebab_case_matches_icon_library_names() {
    assert_eq!(kebab_case("ChevronLeft"), "chevron-left");
    assert_eq!(kebab_case("RefreshCw"), "refresh-cw");
    assert_eq!(kebab_case("X"), "x");
    assert_eq!(kebab_case("MessageSquare"), "message-square");
}

#[test]
fn icon_table_pairs_globals_with_library_names() {
    let table = icon_table();
    assert_eq!(table.len(), ICON_NAMES.len());
    assert!(table.contains(&("EyeOff", "eye-off".to_owned())));
}

#[test]
fn runtime_registers_through_callback() {
    assert!(RUNTIME_SCRIPT.contains("window.__forgeflowRegister = function"));
    assert!(RUNTIME_SCRIPT.contains("'PREVIEW_STATUS'"));
    assert!(RUNTIME_SCRIPT.contains("'SCREENSHOT_CAPTURED'"));
}

#[test]
fn runtime_can_be_inlined_in_a_script_element() {
    assert!(!RUNTIME_SCRIPT.to_ascii_lowercase().contains("</script"));
}

#[test]
fn runtime_reports_every_frame_phase() {
    for phase in ["awaiting_registration", "mounted", "not_found", "eval_fallback", "diagnostic_shown", "failed"] {
        assert!(RUNTIME_SCRIPT.contains(&format!("report('{phase}')")), "{phase}");
    }
}

// =============================================================
// Runtime behavior
// =============================================================

/// Minimal browser for the frame runtime: a DOM of plain objects, a React that
/// renders to text, a Babel that only checks syntax, and a virtual clock.
const FRAME_HARNESS: &str = r##"
var window = globalThis;
var console = { warn: function () {}, log: function () {} };
var __reports = [];
var __timers = [];
var __now = 0;

window.parent = { postMessage: function (msg) { __reports.push(msg); } };
window.addEventListener = function () {};

function setTimeout(fn, ms) {
  __timers.push({ at: __now + (ms || 0), fn: fn });
}

function __runTimers(limit) {
  var ran = 0;
  while (__timers.length > 0 && ran < limit) {
    var next = 0;
    for (var i = 1; i < __timers.length; i++) {
      if (__timers[i].at < __timers[next].at) next = i;
    }
    var timer = __timers.splice(next, 1)[0];
    __now = timer.at;
    timer.fn();
    ran += 1;
  }
  return ran;
}

var __alphabet = 'ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/';
function atob(input) {
  var out = '';
  var buffer = 0;
  var bits = 0;
  for (var i = 0; i < input.length; i++) {
    var c = input.charAt(i);
    if (c === '=') break;
    buffer = (buffer << 6) | __alphabet.indexOf(c);
    bits += 6;
    if (bits >= 8) {
      bits -= 8;
      out += String.fromCharCode((buffer >> bits) & 0xff);
    }
  }
  return out;
}

function TextDecoder() {}
TextDecoder.prototype.decode = function (bytes) {
  var out = '';
  for (var i = 0; i < bytes.length; i++) {
    var b = bytes[i];
    if (b < 0x80) {
      out += String.fromCharCode(b);
    } else if (b < 0xe0) {
      out += String.fromCharCode(((b & 0x1f) << 6) | (bytes[++i] & 0x3f));
    } else if (b < 0xf0) {
      out += String.fromCharCode(((b & 0x0f) << 12) | ((bytes[++i] & 0x3f) << 6) | (bytes[++i] & 0x3f));
    } else {
      out += String.fromCodePoint(
        ((b & 0x07) << 18) | ((bytes[++i] & 0x3f) << 12) | ((bytes[++i] & 0x3f) << 6) | (bytes[++i] & 0x3f)
      );
    }
  }
  return out;
};

function __element(tag) {
  return {
    tagName: tag,
    children: [],
    textContent: '',
    rendered: '',
    hidden: false,
    style: {},
    attributes: {},
    appendChild: function (child) {
      this.children.push(child);
      if (tag === 'body' && child.tagName === 'script') (0, eval)(child.textContent);
      return child;
    },
    replaceChildren: function () {
      this.children = Array.prototype.slice.call(arguments);
    },
    setAttribute: function (name, value) {
      this.attributes[name] = String(value);
    },
    getAttribute: function (name) {
      return name in this.attributes ? this.attributes[name] : null;
    }
  };
}

function __text(el) {
  if (el.nodeText !== undefined) return el.nodeText;
  return el.textContent + el.children.map(__text).join('');
}

var document = {
  body: __element('body'),
  nodes: {},
  getElementById: function (id) { return this.nodes[id] || null; },
  createElement: function (tag) { return __element(tag); },
  createTextNode: function (text) { return { nodeText: String(text) }; }
};

var React = {
  Component: class Component {
    constructor(props) { this.props = props; }
  },
  createElement: function (type, props) {
    return { $$typeof: 'element', type: type, props: props || {}, children: Array.prototype.slice.call(arguments, 2) };
  },
  useRef: function (initial) { return { current: initial }; },
  useEffect: function () {}
};

function __render(node) {
  if (node === null || node === undefined || node === false) return '';
  if (typeof node === 'string' || typeof node === 'number') return String(node);
  if (Array.isArray(node)) return node.map(__render).join('');
  var children = node.children.length === 1 ? node.children[0] : node.children;
  var props = Object.assign({}, node.props, { children: children });
  var type = node.type;
  if (typeof type === 'function' && type.prototype instanceof React.Component) {
    var instance = new type(props);
    try {
      return __render(instance.render());
    } catch (error) {
      if (!type.getDerivedStateFromError) throw error;
      instance.state = Object.assign({}, instance.state, type.getDerivedStateFromError(error));
      instance.componentDidCatch(error);
      return __render(instance.render());
    }
  }
  if (typeof type === 'function') return __render(type(props));
  return __render(node.children);
}

var ReactDOM = {
  createRoot: function (el) {
    return {
      render: function (tree) {
        setTimeout(function () { el.rendered = __render(tree); }, 0);
      }
    };
  }
};

var Babel = {
  transform: function (code) {
    new Function(code);
    return { code: code };
  }
};

function __install(payload, key) {
  document.nodes.root = __element('div');
  var diagnostic = __element('div');
  diagnostic.hidden = true;
  document.nodes.diagnostic = diagnostic;
  var script = __element('script');
  script.textContent = payload;
  script.setAttribute('data-key', key);
  document.nodes['forgeflow-payload'] = script;
}

function __phases() {
  return __reports.map(function (r) { return r.phase; }).join(',');
}
"##;

struct Frame {
    context: Context,
    key: String,
}

impl Frame {
    /// Loads the full preview document for `source` and runs its inline runtime.
    fn load(source: &str) -> Self {
        let doc = build_document(source, &MountPolicy::default());
        let html = doc.html.as_str();

        let tag = &html[html.find("id=\"forgeflow-payload\"").unwrap()..];
        let key = tag.split("data-key=\"").nth(1).unwrap().split('"').next().unwrap();
        let payload = tag.split_once('>').unwrap().1.split("</script>").next().unwrap();
        let runtime_start = html.rfind("<script>\n").unwrap() + "<script>\n".len();
        let runtime_end = html.rfind("</script>").unwrap();
        let runtime = &html[runtime_start..runtime_end];

        let mut frame = Self { context: Context::default(), key: doc.content_key.clone() };
        frame.eval(FRAME_HARNESS);
        frame.eval(&format!("__install(\"{payload}\", \"{key}\");"));
        frame.eval(runtime);
        frame
    }

    fn eval(&mut self, js: &str) -> String {
        let value = self.context.eval(Source::from_bytes(js)).unwrap();
        value.to_string(&mut self.context).unwrap().to_std_string_escaped()
    }

    fn run_timers(&mut self) {
        self.eval("__runTimers(1000)");
    }

    fn phases(&mut self) -> Vec<String> {
        self.eval("__phases()").split(',').filter(|p| !p.is_empty()).map(str::to_owned).collect()
    }

    fn last_attempts(&mut self) -> u32 {
        self.eval("__reports[__reports.length - 1].attempts").parse().unwrap()
    }

    fn rendered(&mut self) -> String {
        self.eval("document.nodes.root.rendered")
    }

    fn diagnostic(&mut self) -> Option<String> {
        match self.eval("document.nodes.diagnostic.hidden").as_str() {
            "true" => None,
            _ => Some(self.eval("__text(document.nodes.diagnostic)")),
        }
    }
}

#[test]
fn registered_component_mounts_on_first_attempt() {
    let mut frame = Frame::load(
        "export default function OrderList() {\n  return React.createElement('h1', null, 'Orders ready');\n}\n",
    );
    frame.run_timers();

    assert_eq!(frame.phases(), ["mounted"]);
    assert_eq!(frame.last_attempts(), 1);
    assert_eq!(frame.rendered(), "Orders ready");
    assert_eq!(frame.diagnostic(), None);
    let key = frame.key.clone();
    assert_eq!(frame.eval("__reports[0].key"), key);
}

#[test]
fn late_registration_mounts_within_the_retry_window() {
    let mut frame = Frame::load(
        "var Dashboard;\n\
         setTimeout(function () {\n\
         \x20 Dashboard = function () { return React.createElement('p', null, 'Late data'); };\n\
         \x20 window.__forgeflowRegister(Dashboard);\n\
         }, 450);\n\
         export default Dashboard;\n",
    );
    frame.run_timers();

    let phases = frame.phases();
    assert_eq!(phases.iter().filter(|p| *p == "awaiting_registration").count(), 4);
    assert_eq!(phases.last().map(String::as_str), Some("mounted"));
    assert_eq!(frame.last_attempts(), 5);
    assert_eq!(frame.rendered(), "Late data");
}

#[test]
fn never_registering_gives_up_after_exactly_max_attempts() {
    let mut frame = Frame::load("const total = 1 + 1;\n");
    frame.run_timers();

    let phases = frame.phases();
    assert_eq!(phases.iter().filter(|p| *p == "awaiting_registration").count(), 50);
    assert_eq!(&phases[50..], ["not_found", "diagnostic_shown"]);
    assert_eq!(frame.last_attempts(), 50);

    let diagnostic = frame.diagnostic().unwrap();
    assert!(diagnostic.contains("Component Not Found"), "{diagnostic}");
    assert!(diagnostic.contains("Component: App"), "{diagnostic}");
    assert!(diagnostic.contains("const total = 1 + 1;"), "{diagnostic}");
}

#[test]
fn global_defined_after_registration_mounts_through_eval_fallback() {
    let mut frame = Frame::load(
        "setTimeout(function () {\n\
         \x20 globalThis.App = function () { return React.createElement('p', null, 'Found by name'); };\n\
         }, 10);\n",
    );
    frame.run_timers();

    let phases = frame.phases();
    assert_eq!(phases.iter().filter(|p| *p == "awaiting_registration").count(), 50);
    assert_eq!(&phases[50..], ["not_found", "eval_fallback", "mounted"]);
    assert_eq!(frame.rendered(), "Found by name");
    assert_eq!(frame.diagnostic(), None);
}

#[test]
fn throwing_component_shows_rendering_error_with_name_and_excerpt() {
    let mut frame = Frame::load("export default function Broken() {\n  throw new Error('kaboom');\n}\n");
    frame.run_timers();

    assert_eq!(frame.phases(), ["mounted", "failed"]);
    let diagnostic = frame.diagnostic().unwrap();
    assert!(diagnostic.contains("Rendering Error"), "{diagnostic}");
    assert!(diagnostic.contains("Error: kaboom"), "{diagnostic}");
    assert!(diagnostic.contains("Component: Broken"), "{diagnostic}");
    assert!(diagnostic.contains("function Broken()"), "{diagnostic}");
    assert_eq!(frame.eval("document.nodes.root.hidden"), "true");
}

#[test]
fn unparseable_source_shows_setup_error_without_mounting() {
    let mut frame = Frame::load("export default function App() { return (; }\n");
    frame.run_timers();

    assert_eq!(frame.phases(), ["failed"]);
    let diagnostic = frame.diagnostic().unwrap();
    assert!(diagnostic.contains("Setup Error"), "{diagnostic}");
    assert!(diagnostic.contains("function App()"), "{diagnostic}");
}
