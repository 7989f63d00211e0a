//! Browser Frontend
//!
//! Single HTML page for pasting links and subscriptions by hand.

const BACKGROUND_SLOT: &str = "{{BACKGROUND}}";

/// Encoded inputs longer than this are sent as the request body instead of the path.
const MAX_PATH_INPUT: usize = 8000;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Node Renamer</title>
  <style>
    :root {
      --bg: {{BACKGROUND}};
      --card-bg: rgba(255, 255, 255, 0.72);
    }
    body {
      margin: 0;
      min-height: 100vh;
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif;
      background: var(--bg);
      background-size: cover;
      background-attachment: fixed;
    }
    .card {
      width: min(860px, 92vw);
      padding: 24px;
      border-radius: 14px;
      background: var(--card-bg);
      backdrop-filter: blur(8px);
      box-shadow: 0 8px 28px rgba(0, 0, 0, 0.18);
    }
    h1 { margin-top: 0; font-size: 1.5rem; text-align: center; }
    textarea {
      box-sizing: border-box;
      width: 100%;
      height: 180px;
      padding: 10px;
      border: 1px solid #ccc;
      border-radius: 8px;
      font-family: ui-monospace, monospace;
      background: rgba(255, 255, 255, 0.5);
    }
    .options { margin: 12px 0; display: flex; gap: 18px; flex-wrap: wrap; }
    .actions { display: flex; gap: 10px; margin-bottom: 12px; }
    button {
      padding: 8px 18px;
      border: none;
      border-radius: 8px;
      color: #fff;
      cursor: pointer;
    }
    #run { background: #007aff; }
    #copy { background: #28a745; }
    footer { margin-top: 16px; font-size: 0.8rem; color: #333; }
  </style>
</head>
<body>
  <div class="card">
    <h1>Node Renamer</h1>
    <textarea id="input" placeholder="One entry per line: share links (vless://, vmess://, ss://, trojan://, tuic://, hysteria2://) or subscription URLs (https://...)"></textarea>
    <div class="options">
      <label><input type="checkbox" id="flag" checked> Flag emoji</label>
      <label><input type="checkbox" id="suffix" checked> Custom suffix</label>
      <label><input type="checkbox" id="org"> Organization</label>
    </div>
    <div class="actions">
      <button id="run" onclick="renameNodes()">Rename</button>
      <button id="copy" onclick="copyOutput()">Copy</button>
    </div>
    <textarea id="output" readonly placeholder="The encoded subscription appears here"></textarea>
  </div>
  <footer>node-renamer {{VERSION}}</footer>
  <script>
    async function renameNodes() {
      const input = document.getElementById('input').value;
      const encoded = encodeURIComponent(input);
      const inBody = encoded.length > {{MAX_PATH_INPUT}};
      try {
        const resp = await fetch('/sub/' + (inBody ? '' : encoded), {
          method: 'POST',
          headers: {
            'x-flag': String(document.getElementById('flag').checked),
            'x-suffix': String(document.getElementById('suffix').checked),
            'x-org': String(document.getElementById('org').checked)
          },
          body: inBody ? input : undefined
        });
        if (!resp.ok) throw new Error('request failed with status ' + resp.status);
        document.getElementById('output').value = await resp.text();
      } catch (error) {
        document.getElementById('output').value = 'Rename failed: ' + error.message;
      }
    }
    async function copyOutput() {
      const output = document.getElementById('output');
      try {
        await navigator.clipboard.writeText(output.value);
      } catch (_) {
        output.select();
        document.execCommand('copy');
      }
    }
  </script>
</body>
</html>
"#;

/// Render the page, using `bg_img` as the background when one is configured.
pub fn render_page(bg_img: Option<&str>) -> String {
    let background = match bg_img.map(str::trim).filter(|s| !s.is_empty()) {
        Some(url) => format!("url(\"{}\") center / cover no-repeat", escape_css_url(url)),
        None => "linear-gradient(135deg, #74ebd5 0%, #9face6 100%)".to_string(),
    };

    PAGE_TEMPLATE
        .replace(BACKGROUND_SLOT, &background)
        .replace("{{VERSION}}", env!("CARGO_PKG_VERSION"))
        .replace("{{MAX_PATH_INPUT}}", &MAX_PATH_INPUT.to_string())
}

/// Keep a configured URL from breaking out of the quoted CSS string.
fn escape_css_url(url: &str) -> String {
    url.chars()
        .filter(|c| !matches!(c, '"' | '\\' | '<' | '>' | '\n' | '\r'))
        .collect()
}
