//! Embedded single-page dashboard. The page fetches `/api/layout` once,
//! builds its controls from it, and requests a chart spec from
//! `/api/charts/:slot` whenever a control changes. Charts are drawn with
//! plotly.js.

pub const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Launch Records Dashboard</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  body { font-family: sans-serif; margin: 0 auto; max-width: 960px; padding: 16px; color: #222; }
  h1 { text-align: center; color: #503D36; font-size: 40px; }
  input[type=search], select, .slider { width: 100%; margin: 8px 0; box-sizing: border-box; }
  .slider { display: flex; gap: 12px; align-items: center; }
  .slider input { flex: 1; }
  .marks { display: flex; justify-content: space-between; font-size: 12px; color: #666; }
  .chart { min-height: 360px; margin: 16px 0; }
</style>
</head>
<body>
<h1 id="title"></h1>
<input type="search" id="site-search" hidden>
<select id="site"></select>
<div class="chart" id="pie"></div>
<p id="slider-label"></p>
<div class="slider">
  <input type="range" id="low"><input type="range" id="high">
  <span id="range-text"></span>
</div>
<div class="marks" id="marks"></div>
<div class="chart" id="scatter"></div>
<script>
let layout = null;

function emptyAnnotation() {
  return [{ text: 'No data available', showarrow: false, xref: 'paper', yref: 'paper', x: 0.5, y: 0.5 }];
}

function drawPie(target, spec) {
  const total = spec.segments.reduce((acc, s) => acc + s.value, 0);
  const trace = {
    type: 'pie',
    labels: spec.segments.map(s => s.label),
    values: spec.segments.map(s => s.value),
    marker: { colors: spec.segments.map(s => s.color) },
    sort: false,
  };
  Plotly.react(target, [trace], {
    title: { text: spec.title },
    annotations: total === 0 ? emptyAnnotation() : [],
  });
}

function drawScatter(target, spec) {
  const traces = spec.series.map(series => ({
    type: 'scatter',
    mode: 'markers',
    name: series.name,
    x: series.points.map(p => p.payload_kg),
    y: series.points.map(p => p.outcome),
    text: series.points.map(p => p.site),
    marker: { color: series.color, size: 10 },
  }));
  const empty = traces.every(t => t.x.length === 0);
  Plotly.react(target, traces, {
    title: { text: spec.title },
    xaxis: { title: { text: spec.x_label } },
    yaxis: { title: { text: spec.y_label }, tickvals: [0, 1] },
    annotations: empty ? emptyAnnotation() : [],
  });
}

async function fetchChart(slot, params) {
  const res = await fetch(`/api/charts/${slot}?` + new URLSearchParams(params));
  return res.json();
}

async function updatePie() {
  const site = document.getElementById('site').value;
  drawPie(document.getElementById('pie'), await fetchChart('success-pie-chart', { site }));
}

async function updateScatter() {
  const site = document.getElementById('site').value;
  const low = document.getElementById('low').value;
  const high = document.getElementById('high').value;
  document.getElementById('range-text').textContent = `${low} – ${high} Kg`;
  drawScatter(document.getElementById('scatter'),
    await fetchChart('success-payload-scatter-chart', { site, low, high }));
}

function onSiteChanged() {
  updatePie();
  updateScatter();
}

// Hide options whose label does not contain the query; keep the selection
// on a visible option.
function filterSites(select, query) {
  const needle = query.trim().toLowerCase();
  let firstVisible = null;
  for (const option of select.options) {
    option.hidden = needle !== '' && !option.textContent.toLowerCase().includes(needle);
    if (!option.hidden && firstVisible === null) firstVisible = option;
  }
  const current = select.options[select.selectedIndex];
  if (firstVisible !== null && (current === undefined || current.hidden)) {
    select.value = firstVisible.value;
    onSiteChanged();
  }
}

async function init() {
  layout = await (await fetch('/api/layout')).json();
  document.getElementById('title').textContent = layout.title;

  const dropdown = layout.site_dropdown;
  const select = document.getElementById('site');
  for (const opt of dropdown.options) {
    const o = document.createElement('option');
    o.value = opt.value;
    o.textContent = opt.label;
    select.appendChild(o);
  }
  select.value = dropdown.value;
  if (dropdown.searchable) {
    const search = document.getElementById('site-search');
    search.hidden = false;
    search.placeholder = dropdown.placeholder;
    search.addEventListener('input', () => filterSites(select, search.value));
  }

  const slider = layout.payload_slider;
  document.getElementById('slider-label').textContent = slider.label;
  for (const [id, value] of [['low', slider.value.low], ['high', slider.value.high]]) {
    const input = document.getElementById(id);
    input.min = slider.min;
    input.max = slider.max;
    input.step = 'any';
    input.value = value;
    input.addEventListener('change', () => {
      input.step = slider.step;
      updateScatter();
    });
  }
  const marks = document.getElementById('marks');
  for (const mark of slider.marks) {
    const span = document.createElement('span');
    span.textContent = mark.label;
    marks.appendChild(span);
  }

  select.addEventListener('change', onSiteChanged);
  onSiteChanged();
}

init();
</script>
</body>
</html>
"##;
