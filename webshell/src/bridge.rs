//! Page-side half of the message channel
//!
//! `INIT_SCRIPT` runs before any page script and exposes `window.shell`.
//! Every outgoing value is JSON-encoded, strings included, and handed to
//! wry's `window.ipc`; replies come back through `dispatch_script`.

/// Installs `window.shell` in every page the WebView loads
pub const INIT_SCRIPT: &str = r#"(function() {
  if (window.shell) return;
  var listeners = [];
  window.shell = {
    postMessage: function(value) {
      var body = JSON.stringify(value);
      window.ipc.postMessage(body === undefined ? 'null' : body);
    },
    addEventListener: function(type, fn) {
      if (type === 'message' && listeners.indexOf(fn) === -1) listeners.push(fn);
    },
    removeEventListener: function(type, fn) {
      if (type !== 'message') return;
      var i = listeners.indexOf(fn);
      if (i !== -1) listeners.splice(i, 1);
    },
    __dispatch: function(data) {
      listeners.slice().forEach(function(fn) {
        try { fn({ data: data }); } catch (e) { console.error(e); }
      });
    }
  };
})();"#;

/// Script that hands `json` to every `message` listener on the page.
///
/// `json` must be a serialized JSON value; it is embedded as a literal.
pub fn dispatch_script(json: &str) -> String {
    format!("window.shell && window.shell.__dispatch({});", json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::OutgoingMessage;
    use serde_json::Value;
    use std::process::Command;

    /// The literal a dispatch script hands to `__dispatch`
    fn embedded_literal(script: &str) -> &str {
        let start = script.find("__dispatch(").unwrap() + "__dispatch(".len();
        let end = script.rfind(");").unwrap();
        &script[start..end]
    }

    /// Runs `INIT_SCRIPT` and then `body` under node with a recording
    /// `window.ipc`. Returns None when node is not installed.
    fn run_in_node(body: &str) -> Option<Value> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.js");
        let program = format!(
            "var window = {{ ipc: {{ sent: [], postMessage: function(b) {{ window.ipc.sent.push(b); }} }} }};\n\
             var out = {{}};\n{}\n{}\nconsole.log(JSON.stringify(out));",
            INIT_SCRIPT, body
        );
        std::fs::write(&path, program).unwrap();

        let output = match Command::new("node").arg(&path).output() {
            Ok(o) => o,
            Err(_) => {
                eprintln!("node not found, skipping page-side check");
                return None;
            }
        };
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        Some(serde_json::from_slice(&output.stdout).unwrap())
    }

    #[test]
    fn test_dispatch_embeds_literal() {
        let json = OutgoingMessage::pong("ping", 5).to_json().unwrap();
        let script = dispatch_script(&json);
        assert!(script.starts_with("window.shell && window.shell.__dispatch("));

        let embedded: Value = serde_json::from_str(embedded_literal(&script)).unwrap();
        let reply: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(embedded, reply);
    }

    #[test]
    fn test_dispatch_keeps_quotes_escaped() {
        let json = serde_json::json!({ "type": "pong", "payload": "it's \"quoted\"" }).to_string();
        let script = dispatch_script(&json);
        let embedded: Value = serde_json::from_str(embedded_literal(&script)).unwrap();
        assert_eq!(embedded["payload"], "it's \"quoted\"");
    }

    #[test]
    fn test_post_message_always_encodes() {
        assert!(INIT_SCRIPT.contains("var body = JSON.stringify(value);"));
        assert!(INIT_SCRIPT.contains("window.ipc.postMessage(body === undefined ? 'null' : body);"));
        assert!(!INIT_SCRIPT.contains("typeof value"));
    }

    #[test]
    fn test_post_message_bodies() {
        let Some(out) = run_in_node(
            "window.shell.postMessage('{\"type\":\"ping\"}');\n\
             window.shell.postMessage({ type: 'ping', payload: 'x' });\n\
             window.shell.postMessage(undefined);\n\
             out.sent = window.ipc.sent;",
        ) else {
            return;
        };

        let sent: Vec<String> = serde_json::from_value(out["sent"].clone()).unwrap();
        assert_eq!(sent, vec![
            r#""{\"type\":\"ping\"}""#.to_string(),
            r#"{"type":"ping","payload":"x"}"#.to_string(),
            "null".to_string(),
        ]);
    }

    #[test]
    fn test_listeners_receive_data_and_unregister() {
        let reply = OutgoingMessage::pong("ready", 3).to_json().unwrap();
        let Some(out) = run_in_node(&format!(
            "out.first = []; out.second = [];\n\
             var a = function(e) {{ out.first.push(e.data); }};\n\
             var b = function(e) {{ out.second.push(e.data); }};\n\
             window.shell.addEventListener('message', a);\n\
             window.shell.addEventListener('message', b);\n\
             {}\n\
             window.shell.removeEventListener('message', a);\n\
             {}",
            dispatch_script(&reply),
            dispatch_script(&reply),
        )) else {
            return;
        };

        let expected: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(out["first"], Value::Array(vec![expected.clone()]));
        assert_eq!(out["second"], Value::Array(vec![expected.clone(), expected]));
    }

    #[test]
    fn test_listener_shape_in_script() {
        assert!(INIT_SCRIPT.contains("fn({ data: data })"));
        assert!(INIT_SCRIPT.contains("listeners.splice(i, 1)"));
    }
}
