//! In-frame runtime.
//!
//! Everything here executes inside the sandboxed frame, never on the host
//! page. The runtime reads its payload, installs icon stand-ins as globals,
//! transpiles the component with Babel, waits for it to register itself,
//! mounts it under an error boundary and answers screenshot requests.
//!
//! Registration goes through `window.__forgeflowRegister(component)`, which
//! stores the component in a closure owned by the runtime. The mount loop
//! never looks components up by name on the global object except in the
//! final eval fallback.

/// Icon names that generated code may reference as bare globals.
pub const ICON_NAMES: [&str; 73] = [
    "Search", "Filter", "Download", "Upload", "Plus", "Minus", "X", "Check", "ChevronLeft",
    "ChevronRight", "ChevronDown", "ChevronUp", "ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown",
    "Menu", "Settings", "User", "Home", "Calendar", "Bell", "Mail", "Edit", "Trash", "Save",
    "Copy", "Eye", "EyeOff", "Lock", "Unlock", "AlertCircle", "Info", "HelpCircle", "CheckCircle",
    "XCircle", "Star", "Heart", "Share", "Link", "ExternalLink", "File", "Folder", "Image",
    "Video", "Music", "Code", "Database", "Server", "Cloud", "Wifi", "Battery", "Power", "Zap",
    "TrendingUp", "TrendingDown", "BarChart", "PieChart", "Activity", "Grid", "List", "Table",
    "Globe", "MapPin", "Phone", "MessageSquare", "Send", "Printer", "Maximize", "Minimize",
    "RefreshCw", "RotateCw", "RotateCcw",];

/// `ChevronLeft` becomes `chevron-left`.
#[must_use]
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() && i > 0 {
            out.push('-');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}

/// `(global name, icon library name)` pairs shipped in the frame payload.
#[must_use]
pub fn icon_table() -> Vec<(&'static str, String)> {
    ICON_NAMES.iter().map(|name| (*name, kebab_case(name))).collect()
}

/// Runtime loaded after the payload element. Reads everything dynamic from
/// `#forgeflow-payload`, so the text is constant.
pub const RUNTIME_SCRIPT: &str = r#"(function () {
  'use strict';

  var payloadEl = document.getElementById('forgeflow-payload');
  var rootEl = document.getElementById('root');
  var diagnosticEl = document.getElementById('diagnostic');
  var key = payloadEl ? payloadEl.getAttribute('data-key') || '' : '';
  var payload = { code: '', component: 'App', excerpt: '', maxAttempts: 50, intervalMs: 100, icons: [] };
  var attempts = 0;
  var registered = null;

  function report(phase) {
    try {
      window.parent.postMessage({ type: 'PREVIEW_STATUS', phase: phase, attempts: attempts, key: key }, '*');
    } catch (err) {
      console.warn('[preview] status report failed', err);
    }
  }

  function decode(b64) {
    var bytes = Uint8Array.from(atob(b64), function (c) { return c.charCodeAt(0); });
    return new TextDecoder().decode(bytes);
  }

  function node(tag, text) {
    var el = document.createElement(tag);
    if (text !== undefined) el.textContent = text;
    return el;
  }

  function showDiagnostic(title, rows, sections) {
    var panel = node('div');
    panel.appendChild(node('h3', title));
    rows.forEach(function (row) {
      var p = node('p');
      p.appendChild(node('strong', row[0] + ': '));
      p.appendChild(document.createTextNode(row[1]));
      panel.appendChild(p);
    });
    sections.forEach(function (section) {
      var details = node('details');
      details.appendChild(node('summary', section[0]));
      details.appendChild(node('pre', section[1]));
      panel.appendChild(details);
    });
    diagnosticEl.replaceChildren(panel);
    diagnosticEl.hidden = false;
    rootEl.hidden = true;
  }

  function excerpt() {
    return ['Code preview (first 1000 chars)', payload.excerpt];
  }

  function message(error) {
    return (error && error.message) || String(error || 'Unknown error');
  }

  function fail(error) {
    showDiagnostic(
      'Rendering Error',
      [['Error', message(error)], ['Component', payload.component]],
      [['Stack trace', (error && error.stack) || 'No stack trace'], excerpt()]
    );
    report('failed');
  }

  function createIcon(name, libraryName) {
    return function ForgeflowIcon(props) {
      var p = props || {};
      var ref = React.useRef(null);
      React.useEffect(function () {
        var host = ref.current;
        if (!host || !window.lucide) return;
        var icon = document.createElement('i');
        icon.setAttribute('data-lucide', libraryName);
        if (p.size) {
          icon.style.width = p.size + 'px';
          icon.style.height = p.size + 'px';
        }
        if (p.className) icon.className = p.className;
        if (p.color) icon.style.color = p.color;
        host.replaceChildren(icon);
        var glyphs = {};
        glyphs[name] = window.lucide.icons[name] || window.lucide.icons[libraryName];
        window.lucide.createIcons({ icons: glyphs });
      }, [p.size, p.className, p.color]);
      return React.createElement('span', {
        ref: ref,
        style: Object.assign({ display: 'inline-flex', alignItems: 'center' }, p.style)
      });
    };
  }

  class Boundary extends React.Component {
    constructor(props) {
      super(props);
      this.state = { failed: false };
    }
    static getDerivedStateFromError() {
      return { failed: true };
    }
    componentDidCatch(error) {
      fail(error);
    }
    render() {
      return this.state.failed ? null : this.props.children;
    }
  }

  function mount(component) {
    try {
      var root = ReactDOM.createRoot(rootEl);
      root.render(React.createElement(Boundary, null, React.createElement(component)));
      report('mounted');
    } catch (error) {
      fail(error);
    }
  }

  function renderable(value) {
    return typeof value === 'function' || (value !== null && typeof value === 'object' && '$$typeof' in value);
  }

  function tryMount() {
    attempts += 1;
    if (renderable(registered)) {
      mount(registered);
      return;
    }
    report('awaiting_registration');
    if (attempts < payload.maxAttempts) {
      setTimeout(tryMount, payload.intervalMs);
      return;
    }

    report('not_found');
    var fallback = null;
    try {
      fallback = (0, eval)(payload.component);
    } catch (err) {
      fallback = null;
    }
    if (renderable(fallback)) {
      report('eval_fallback');
      mount(fallback);
      return;
    }

    var available = Object.keys(window).filter(function (k) {
      return k[0] && k[0] !== k[0].toLowerCase();
    });
    showDiagnostic(
      'Component Not Found',
      [['Component', payload.component], ['Available', available.join(', ')]],
      [excerpt()]
    );
    report('diagnostic_shown');
  }

  function registration(name) {
    return '\n;(function () {\n' +
      '  if (typeof ' + name + ' !== "undefined") { window.__forgeflowRegister(' + name + '); }\n' +
      '})();\n';
  }

  window.addEventListener('message', function (event) {
    var data = event.data || {};
    if (data.type !== 'CAPTURE_SCREENSHOT') return;
    var reply = function (msg) { window.parent.postMessage(msg, '*'); };
    var body = document.body;
    try {
      html2canvas(body, {
        useCORS: true,
        logging: false,
        scale: 2,
        width: body.scrollWidth,
        height: body.scrollHeight,
        windowWidth: body.scrollWidth,
        windowHeight: body.scrollHeight
      }).then(function (canvas) {
        reply({ type: 'SCREENSHOT_CAPTURED', label: data.label, dataUrl: canvas.toDataURL('image/png') });
      }, function (error) {
        reply({ type: 'SCREENSHOT_FAILED', label: data.label, message: message(error) });
      });
    } catch (error) {
      reply({ type: 'SCREENSHOT_FAILED', label: data.label, message: message(error) });
    }
  });

  window.__forgeflowRegister = function (component) {
    registered = component;
  };

  try {
    payload = Object.assign(payload, JSON.parse(decode(payloadEl.textContent.trim())));
    payload.icons.forEach(function (pair) {
      window[pair[0]] = createIcon(pair[0], pair[1]);
    });
    var transformed = Babel.transform(payload.code, { presets: ['react'], filename: 'component.jsx' }).code;
    var script = document.createElement('script');
    script.textContent = transformed + registration(payload.component);
    document.body.appendChild(script);
    setTimeout(tryMount, payload.intervalMs);
  } catch (error) {
    showDiagnostic('Setup Error', [['Error', message(error)]], [excerpt()]);
    report('failed');
  }
})();
"#;

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;
