//! Page Route
//!
//! - GET / - The dashboard page
//!
//! A static shell: sidebar dropdown, title and three chart slots. The browser
//! fetches `/api/v1/dashboard` and draws each panel with plotly.js. Changing
//! the dropdown stores the selection and re-renders.

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::dashboard::{SELECT_LABEL, SIDEBAR_TITLE};

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{title}}</title>
<script src="{{plotly}}"></script>
<style>
  body { margin: 0; display: flex; font-family: sans-serif; color: #31333f; }
  aside { width: 18rem; min-height: 100vh; padding: 1.5rem; background: #f0f2f6; box-sizing: border-box; }
  aside select { width: 100%; padding: 0.4rem; margin-top: 0.5rem; }
  main { flex: 1; padding: 2rem 3rem; max-width: 60rem; }
  .chart { width: 100%; height: 450px; }
  #error { color: #b00020; white-space: pre-wrap; }
</style>
</head>
<body>
<aside>
  <h2>{{sidebar_title}}</h2>
  <label for="country">{{select_label}}</label>
  <select id="country"></select>
</aside>
<main>
  <h1>{{title}}</h1>
  <p id="error"></p>
  <h3 id="time-series-title"></h3>
  <div id="time-series" class="chart"></div>
  <h3 id="indicators-title"></h3>
  <div id="indicators" class="chart"></div>
  <h3 id="world-map-title"></h3>
  <div id="world-map" class="chart"></div>
</main>
<script>
const select = document.getElementById("country");
const errorBox = document.getElementById("error");

function fillOptions(countries, selected) {
  select.replaceChildren(...countries.map((name) => {
    const option = document.createElement("option");
    option.value = name;
    option.textContent = name;
    option.selected = name === selected;
    return option;
  }));
}

const PANELS = ["time-series", "indicators", "world-map"];

function drawPanel(id, panel) {
  document.getElementById(id + "-title").textContent = panel.subheader;
  Plotly.react(id, panel.figure.data, panel.figure.layout, { responsive: true });
}

function clearPanels() {
  for (const id of PANELS) {
    document.getElementById(id + "-title").textContent = "";
    Plotly.purge(id);
  }
}

async function readJson(response) {
  try {
    return await response.json();
  } catch (_) {
    return null;
  }
}

async function refresh() {
  errorBox.textContent = "";
  const response = await fetch("/api/v1/dashboard");
  const body = await readJson(response);
  if (!response.ok || !body) {
    clearPanels();
    errorBox.textContent = body && body.error
      ? body.error.message
      : `Request failed (${response.status} ${response.statusText})`;
    const countries = await readJson(await fetch("/api/v1/countries"));
    if (countries && countries.countries) fillOptions(countries.countries, countries.selected);
    return;
  }
  fillOptions(body.sidebar.options, body.sidebar.selected);
  drawPanel("time-series", body.time_series);
  drawPanel("indicators", body.indicators);
  drawPanel("world-map", body.world_map);
}

select.addEventListener("change", async () => {
  await fetch("/api/v1/selection", {
    method: "PUT",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ country: select.value }),
  });
  refresh();
});

refresh();
</script>
</body>
</html>
"#;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.render_options.title))
}

/// Fill the page template
pub fn render_page(title: &str) -> String {
    PAGE_TEMPLATE
        .replace("{{title}}", &escape_html(title))
        .replace("{{plotly}}", PLOTLY_JS)
        .replace("{{sidebar_title}}", SIDEBAR_TITLE)
        .replace("{{select_label}}", SELECT_LABEL)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
