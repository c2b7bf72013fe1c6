//! scaffold::templates
//!
//! Text templates for generated project files.

use crate::core::config::ProjectConfig;

/// Starter global script written by `init`.
pub const ALERT_SCRIPT: &str = r#"// Test Alert Script
console.log('Alert script loaded');

(function() {
  'use strict';

  // Show an alert after 5 seconds to confirm scripts are working
  setTimeout(() => {
    alert('Scripts are working! This alert came from alert.js after 5 seconds.');
    console.log('Alert shown - scripts are working correctly!');
  }, 5000);

  console.log('Alert will show in 5 seconds...');
})();
"#;

/// Inputs to the embed code template.
#[derive(Debug, Clone, Copy)]
pub struct EmbedSettings<'a> {
    pub production_url: &'a str,
    pub dev_server_url: &'a str,
    pub staging_marker: &'a str,
}

/// The snippet pasted into Webflow's site-wide custom code (head).
///
/// It sets the page's load request and bootstraps the router from the
/// environment's base URL. `SCRIPT_BASE_URL` forces the production assets on
/// a staging host.
pub fn embed_code(settings: &EmbedSettings<'_>) -> String {
    format!(
        r#"<!-- Copy this to Webflow Site Settings → Custom Code → Head -->
<script>
(function() {{
  // UNCOMMENT the next line to force PRODUCTION mode (test before going live!)
  // window.SCRIPT_BASE_URL = '{prod}';

  const isDev = location.hostname.includes('{marker}');
  const baseUrl = window.SCRIPT_BASE_URL || (isDev
    ? '{dev}'
    : '{prod}');

  // Scripts that load on EVERY page
  window.ScriptConfig = {{
    global: {{
      head: [],
      body: ['alert']  // Add your global scripts here
    }}
  }};

  // Load the router
  const script = document.createElement('script');
  script.src = baseUrl + '/router.js';
  document.head.appendChild(script);
}})();
</script>
"#,
        prod = settings.production_url,
        dev = settings.dev_server_url,
        marker = settings.staging_marker,
    )
}

/// Browser router written to `src/router.js` by `init`.
///
/// The `{{...}}` placeholders are filled in by [`router_script`].
const ROUTER_TEMPLATE: &str = r#"// Webflow Script Router
// Loads global scripts, page scripts and page styles once each, in order.

(function() {
  'use strict';

  if (window.ScriptRouter) {
    return;
  }

  const isDev = location.hostname.includes('{{STAGING_MARKER}}');
  const environment = isDev ? 'development' : 'production';
  const baseUrl = (window.SCRIPT_BASE_URL || (isDev
    ? '{{DEV_SERVER_URL}}'
    : '{{PRODUCTION_URL}}')).replace(/\/+$/, '');

  const loads = {};

  function validName(name) {
    if (typeof name !== 'string' || name === '' || /[\s?#%\\]/.test(name)) {
      return false;
    }
    if (name.startsWith('/') || name.endsWith('/')) {
      return false;
    }
    return name.split('/').every((segment) => segment !== '' && segment !== '.' && segment !== '..');
  }

  function load(kind, id, placement) {
    const key = kind + ':' + id;
    if (loads[key]) {
      return loads[key];
    }

    const isScript = kind === 'script';
    const tag = isScript ? 'script' : 'link';
    const attr = isScript ? 'data-script-id' : 'data-style-id';
    if (document.querySelector(tag + '[' + attr + '="' + id + '"]')) {
      loads[key] = Promise.resolve();
      return loads[key];
    }

    const url = baseUrl + '/' + id + (isScript ? '.js' : '.css');
    loads[key] = new Promise((resolve, reject) => {
      const node = document.createElement(tag);
      if (isScript) {
        node.src = url;
        node.async = true;
      } else {
        node.rel = 'stylesheet';
        node.href = url;
      }
      node.setAttribute(attr, id);
      node.onload = () => resolve();
      node.onerror = () => reject(new Error('Failed to load ' + id + ' from ' + url));
      (isScript && placement === 'body' ? document.body : document.head).appendChild(node);
    });
    return loads[key];
  }

  function loadScript(id, placement) {
    if (!validName(id)) {
      return Promise.reject(new Error('Invalid script name: ' + id));
    }
    return load('script', id, placement === 'head' ? 'head' : 'body');
  }

  function loadStyle(id) {
    if (!validName(id)) {
      return Promise.reject(new Error('Invalid style name: ' + id));
    }
    return load('style', id, 'head');
  }

  function placed(list) {
    if (!list) {
      return { head: [], body: [] };
    }
    if (Array.isArray(list)) {
      return { head: [], body: list };
    }
    return { head: list.head || [], body: list.body || [] };
  }

  function plan() {
    const config = window.ScriptConfig || {};
    const global = placed(config.global || window.globalScripts);
    const page = placed(config.pageScripts || window.pageScripts);
    const pageScript = config.pageScript || window.pageScript;
    const styles = [].concat(config.pageStyles || window.pageStyles || []);

    const steps = [];
    global.head.forEach((name) => steps.push(['script', 'scripts/' + name, 'head']));
    global.body.forEach((name) => steps.push(['script', 'scripts/' + name, 'body']));
    page.head.forEach((name) => steps.push(['script', 'pages/' + name, 'head']));
    if (pageScript) {
      steps.push(['script', 'pages/' + pageScript, 'body']);
    }
    page.body.forEach((name) => steps.push(['script', 'pages/' + name, 'body']));
    styles.forEach((name) => steps.push(['style', 'styles/' + name]));
    return steps;
  }

  let markReady;
  const ready = new Promise((resolve) => { markReady = resolve; });

  async function init() {
    try {
      for (const [kind, id, placement] of plan()) {
        await (kind === 'script' ? loadScript(id, placement) : loadStyle(id));
      }
    } catch (error) {
      console.error('[ScriptRouter]', error);
      return;
    }

    const detail = { baseUrl: baseUrl, environment: environment };
    markReady(detail);
    window.dispatchEvent(new CustomEvent('scriptsLoaded', { detail: detail }));
  }

  window.ScriptRouter = {
    baseUrl: baseUrl,
    environment: environment,
    loadScript: loadScript,
    loadStyle: loadStyle,
    ready: ready
  };

  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', init);
  } else {
    init();
  }
})();
"#;

/// Fill the router template with the project's URLs.
pub fn router_script(settings: &EmbedSettings<'_>) -> String {
    ROUTER_TEMPLATE
        .replace("{{PRODUCTION_URL}}", settings.production_url)
        .replace("{{DEV_SERVER_URL}}", settings.dev_server_url)
        .replace("{{STAGING_MARKER}}", settings.staging_marker)
}

/// GitHub Actions workflow publishing `dist/` to GitHub Pages.
pub const DEPLOY_WORKFLOW: &str = r#"name: Deploy to GitHub Pages

on:
  push:
    branches: [main]
  workflow_dispatch:

permissions:
  contents: read
  pages: write
  id-token: write

concurrency:
  group: pages
  cancel-in-progress: true

jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: actions/setup-node@v4
        with:
          node-version: 20
          cache: npm
      - run: npm ci
      - run: npm run build
      - uses: actions/upload-pages-artifact@v3
        with:
          path: dist

  deploy:
    needs: build
    runs-on: ubuntu-latest
    environment:
      name: github-pages
      url: ${{ steps.deployment.outputs.page_url }}
    steps:
      - id: deployment
        uses: actions/deploy-pages@v4
"#;

/// Source for a new script created by `new`.
pub fn script_source(name: &str) -> String {
    format!(
        r#"// {name} Script
// This script loads on pages where you include it

console.log('{name} script loaded');

// Add your code here
// You can access DOM elements, add event listeners, etc.

// Wait for every routed script before touching shared globals:
// window.addEventListener('scriptsLoaded', (event) => {{
//   console.log('{name} ready in', event.detail.environment);
// }});
"#
    )
}

/// Project README written by `init`.
pub fn readme(config: &ProjectConfig, embed_code: &str) -> String {
    let mut setup = vec![
        format!("- **GitHub Username:** {}", config.github_username),
        format!("- **Repository:** {}", config.repo_name),
        format!("- **Webflow Domain:** {}", config.webflow_domain),
    ];
    if !config.custom_domain.is_empty() {
        setup.push(format!("- **Production Domain:** {}", config.custom_domain));
    }
    if config.use_github_pages {
        setup.push(format!("- **GitHub Pages URL:** {}", config.github_pages_url()));
    }

    format!(
        r#"# {repo} - Webflow Scripts

## Your Project Setup

{setup}

## Webflow Embed Code

Copy this code to your Webflow Site Settings → Custom Code → Head
(it is also saved in `webflow-embed-code.html`):

```html
{embed}```

## Adding Scripts

### Global script (loads on every page)
1. Create it: `webflow-scripts new my-script`
2. Add `'my-script'` to `ScriptConfig.global.body` in the embed code
3. Publish Webflow

### Page script
1. Create `src/pages/contact.js`
2. In the page's custom code add:
   ```html
   <script>window.pageScript = 'contact';</script>
   ```
3. Publish Webflow

Scripts that depend on others should wait for the `scriptsLoaded` event.

## Project Structure

```
{repo}/
├── src/
│   ├── router.js          # Loads scripts for each page
│   ├── scripts/           # Global scripts
│   │   └── alert.js       # Example script
│   ├── pages/             # Page scripts
│   └── styles/            # Page styles
{workflow}├── .webflow-scripts.json  # Project configuration
└── webflow-embed-code.html
```

## Deploy to GitHub Pages

1. Create https://github.com/new named **{repo}**
2. Push:
   ```bash
   git remote add origin https://github.com/{user}/{repo}.git
   git push -u origin main
   ```
3. Enable Pages at https://github.com/{user}/{repo}/settings/pages

## Troubleshooting

- Check what a page will request: `webflow-scripts plan --host {domain} --fetch`
- Check the configuration: `webflow-scripts test`
"#,
        repo = config.repo_name,
        user = config.github_username,
        domain = config.webflow_domain,
        setup = setup.join("\n"),
        embed = embed_code,
        workflow = if config.use_github_pages {
            "├── .github/workflows/deploy.yml  # Pages deployment\n"
        } else {
            ""
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn config() -> ProjectConfig {
        ProjectConfig {
            github_username: "octocat".into(),
            repo_name: "site-scripts".into(),
            webflow_domain: "my-site.webflow.io".into(),
            custom_domain: String::new(),
            use_github_pages: true,
            setup_date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn settings() -> EmbedSettings<'static> {
        EmbedSettings {
            production_url: "https://octocat.github.io/site-scripts/dist",
            dev_server_url: "http://localhost:3000/src",
            staging_marker: ".webflow.io",
        }
    }

    #[test]
    fn embed_code_points_at_both_environments() {
        let code = embed_code(&settings());
        assert!(code.contains("// window.SCRIPT_BASE_URL = 'https://octocat.github.io/site-scripts/dist';"));
        assert!(code.contains("? 'http://localhost:3000/src'"));
        assert!(code.contains("location.hostname.includes('.webflow.io')"));
        assert!(code.contains("body: ['alert']"));
        assert!(code.trim_end().ends_with("</script>"));
    }

    #[test]
    fn router_script_fills_every_placeholder() {
        let router = router_script(&settings());
        assert!(!router.contains("{{"));
        assert!(router.contains(": 'https://octocat.github.io/site-scripts/dist'"));
        assert!(router.contains("? 'http://localhost:3000/src'"));
        assert!(router.contains("location.hostname.includes('.webflow.io')"));
        assert!(router.contains("new CustomEvent('scriptsLoaded'"));
        assert!(router.contains("window.ScriptRouter = {"));
    }

    #[test]
    fn deploy_workflow_publishes_dist() {
        assert!(DEPLOY_WORKFLOW.contains("actions/deploy-pages@v4"));
        assert!(DEPLOY_WORKFLOW.contains("path: dist"));
    }

    #[test]
    fn script_source_names_the_script() {
        let source = script_source("forms");
        assert!(source.starts_with("// forms Script"));
        assert!(source.contains("console.log('forms script loaded');"));
    }

    #[test]
    fn readme_lists_optional_fields_only_when_set() {
        let mut config = config();
        let text = readme(&config, "<script></script>\n");
        assert!(text.starts_with("# site-scripts - Webflow Scripts"));
        assert!(text.contains("- **GitHub Pages URL:** https://octocat.github.io/site-scripts"));
        assert!(!text.contains("Production Domain"));
        assert!(text.contains("router.js"));
        assert!(text.contains(".github/workflows/deploy.yml"));

        config.custom_domain = "example.com".into();
        config.use_github_pages = false;
        let text = readme(&config, "");
        assert!(text.contains("- **Production Domain:** example.com"));
        assert!(!text.contains("GitHub Pages URL"));
        assert!(!text.contains(".github/workflows"));
    }
}
