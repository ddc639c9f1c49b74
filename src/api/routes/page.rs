//! Dashboard Page
//!
//! - GET / - Single-page shell that renders the API's figures with Plotly.js
//!
//! Changing the country refetches the summary and the two country charts.
//! Changing the graph style refetches all four charts.

use axum::response::Html;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>COVID-19 Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
    <style>
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            display: flex;
            min-height: 100vh;
            background: #f5f5f5;
            color: #333;
        }
        aside {
            width: 260px;
            flex-shrink: 0;
            padding: 20px;
            background: white;
            box-shadow: 2px 0 4px rgba(0,0,0,0.1);
        }
        main { flex: 1; padding: 20px 40px; min-width: 0; }
        h1 { margin-top: 0; }
        label { font-weight: 600; display: block; margin: 15px 0 5px; color: #555; }
        select {
            width: 100%;
            padding: 8px;
            border: 1px solid #ddd;
            border-radius: 4px;
            font-size: 14px;
        }
        .disclaimer { color: #666; font-size: 14px; }
        .metrics { display: flex; gap: 40px; flex-wrap: wrap; margin-bottom: 20px; }
        .metric .label { font-size: 14px; color: #666; }
        .metric .value { font-size: 28px; font-weight: 600; }
        .metric .note { font-size: 12px; color: #999; max-width: 220px; }
        .country-header { display: flex; align-items: center; gap: 15px; }
        .chart {
            background: white;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            min-height: 450px;
            margin-bottom: 30px;
        }
        #chart-world-map { min-height: 800px; }
        #error {
            display: none;
            background: #fdecea;
            color: #a12622;
            border: 1px solid #f5c2c0;
            border-radius: 4px;
            padding: 10px 15px;
            margin-bottom: 20px;
        }
        footer { color: #666; font-size: 14px; margin-top: 20px; }
    </style>
</head>
<body>
    <aside>
        <h2>Filter Options</h2>
        <label for="country">Select a country:</label>
        <select id="country"></select>
        <label for="theme">Select Graph Style:</label>
        <select id="theme"></select>
    </aside>

    <main>
        <h1>📊 COVID-19 Dashboard</h1>
        <p class="disclaimer">
            <strong>📢 Disclaimer:</strong> This data is sourced from 'Our World in Data'
            and covers the period from the earliest recorded COVID-19 case up to the most
            recent data available in dataset. Some values may be missing or estimated
            based on reporting gaps.
        </p>

        <div id="error"></div>

        <h2>🌎 Global COVID-19 Summary</h2>
        <div class="metrics" id="world-metrics"></div>

        <div class="country-header">
            <h2 id="country-name"></h2>
            <img id="flag" width="80" alt="" style="display: none">
        </div>
        <div class="metrics" id="country-metrics"></div>

        <h2>📊 Active Cases vs. Recovered vs. Deaths</h2>
        <div class="chart" id="chart-composition"></div>

        <h2>📈 COVID-19 Waves (Peaks Detection)</h2>
        <div class="chart" id="chart-peaks"></div>

        <h2>🌍 Worst-hit Countries Over Time</h2>
        <div class="chart" id="chart-spread"></div>

        <h2>🗺️ Global COVID-19 Spread</h2>
        <div class="chart" id="chart-world-map"></div>

        <footer>
            Data Source: <a href="https://ourworldindata.org/coronavirus">Our World in Data</a>
        </footer>
    </main>

    <script>
        const countrySelect = document.getElementById('country');
        const themeSelect = document.getElementById('theme');
        const errorBox = document.getElementById('error');

        function escapeHtml(text) {
            const div = document.createElement('div');
            div.textContent = text;
            return div.innerHTML;
        }

        function showError(err) {
            errorBox.textContent = err.message || String(err);
            errorBox.style.display = 'block';
        }

        function fillSelect(select, values) {
            select.replaceChildren(...values.map(v => new Option(v, v)));
        }

        function clearError() {
            errorBox.textContent = '';
            errorBox.style.display = 'none';
        }

        async function getJson(url) {
            const response = await fetch(url);
            const body = await response.json();
            if (!response.ok) {
                throw new Error(body.error ? body.error.message : response.statusText);
            }
            return body;
        }

        function renderMetrics(el, metrics) {
            el.innerHTML = metrics.map(m => `
                <div class="metric">
                    <div class="label">${escapeHtml(m.label)}</div>
                    <div class="value">${escapeHtml(m.display)}</div>
                    ${m.note ? `<div class="note">${escapeHtml(m.note)}</div>` : ''}
                </div>`).join('');
        }

        async function loadSummary() {
            const country = countrySelect.value;
            const summary = await getJson(`/api/v1/summary?country=${encodeURIComponent(country)}`);
            // A later selection owns the panel
            if (countrySelect.value !== country) {
                return;
            }

            renderMetrics(document.getElementById('world-metrics'), summary.world);
            document.getElementById('country-name').textContent = summary.country;
            renderMetrics(document.getElementById('country-metrics'), summary.metrics);

            const flag = document.getElementById('flag');
            if (summary.flag_url) {
                flag.src = summary.flag_url;
                flag.alt = `${summary.country} flag`;
                flag.style.display = 'inline';
            } else {
                flag.removeAttribute('src');
                flag.style.display = 'none';
            }
        }

        async function loadChart(kind, withCountry) {
            const theme = themeSelect.value;
            const country = countrySelect.value;
            const params = new URLSearchParams({ theme });
            if (withCountry) {
                params.set('country', country);
            }
            const figure = await getJson(`/api/v1/charts/${kind}?${params}`);
            if (themeSelect.value !== theme || (withCountry && countrySelect.value !== country)) {
                return;
            }
            await Plotly.react(`chart-${kind}`, {
                data: figure.data,
                layout: figure.layout,
                frames: figure.frames || [],
                config: { responsive: true }
            });
        }

        async function run(tasks) {
            clearError();
            try {
                await Promise.all(tasks);
            } catch (err) {
                showError(err);
            }
        }

        function refreshCountry() {
            return run([loadSummary(), loadChart('composition', true), loadChart('peaks', true)]);
        }

        function refreshTheme() {
            return run([
                loadChart('composition', true),
                loadChart('peaks', true),
                loadChart('spread', false),
                loadChart('world-map', false)
            ]);
        }

        async function init() {
            try {
                const [countries, themes] = await Promise.all([
                    getJson('/api/v1/countries'),
                    getJson('/api/v1/themes')
                ]);

                fillSelect(countrySelect, countries.countries);
                if (countries.default) {
                    countrySelect.value = countries.default;
                }

                fillSelect(themeSelect, themes.themes);
                themeSelect.value = themes.default;
            } catch (err) {
                showError(err);
                return;
            }

            countrySelect.addEventListener('change', refreshCountry);
            themeSelect.addEventListener('change', refreshTheme);

            await run([
                loadSummary(),
                loadChart('composition', true),
                loadChart('peaks', true),
                loadChart('spread', false),
                loadChart('world-map', false)
            ]);
        }

        init();
    </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wires_every_endpoint() {
        for path in [
            "/api/v1/countries",
            "/api/v1/themes",
            "/api/v1/summary",
            "/api/v1/charts/",
        ] {
            assert!(INDEX_HTML.contains(path), "page does not call {}", path);
        }
        for kind in crate::charts::ChartKind::all() {
            assert!(INDEX_HTML.contains(&format!("chart-{}", kind.slug())));
        }
    }

    #[test]
    fn test_select_options_built_from_text() {
        assert!(INDEX_HTML.contains("new Option(v, v)"));
        assert!(!INDEX_HTML.contains("<option value="));
    }

    #[test]
    fn test_late_responses_are_dropped() {
        assert!(INDEX_HTML.contains("if (countrySelect.value !== country)"));
        assert!(INDEX_HTML.contains("if (themeSelect.value !== theme"));
    }

    #[test]
    fn test_heading_and_disclaimer() {
        assert!(INDEX_HTML.contains(".textContent = summary.country;"));
        assert!(INDEX_HTML.contains("📢 Disclaimer:"));
        assert!(INDEX_HTML.contains("sourced from 'Our World in Data'"));
        assert!(INDEX_HTML.contains("based on reporting gaps."));
    }
}
