//! Dashboard Page
//!
//! - GET / - The single-page dashboard
//!
//! The page only wires controls to the API: on load it fetches
//! `/api/v1/options` to fill the controls, and on every control change it
//! posts the current values to `/api/v1/charts` and hands both returned
//! figures to `Plotly.react`.

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
    <title>User Registration Dashboard</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
    <style>
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
            background: #f5f5f5;
            color: #333;
        }
        body.dark { background: #181818; color: #eee; }
        h1 { text-align: center; margin-bottom: 20px; }
        .controls {
            background: white;
            padding: 15px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            margin-bottom: 20px;
            display: flex;
            gap: 20px;
            align-items: flex-start;
            flex-wrap: wrap;
        }
        body.dark .controls { background: #262626; }
        .control-group { flex: 1; min-width: 220px; }
        label { font-weight: 600; display: block; margin-bottom: 5px; }
        select, input[type=date] {
            width: 100%;
            padding: 8px;
            border: 1px solid #ddd;
            border-radius: 4px;
            font-size: 14px;
        }
        select { min-height: 120px; }
        .inline label { display: inline; font-weight: normal; margin-right: 12px; }
        .charts { display: grid; grid-template-columns: 1fr; gap: 20px; }
        @media (min-width: 1200px) { .charts { grid-template-columns: 3fr 2fr; } }
        .chart { border-radius: 8px; min-height: 480px; }
        .status { font-size: 14px; opacity: 0.8; margin-top: 8px; }
    </style>
</head>
<body>
    <h1>User Registration Dashboard</h1>

    <div class="controls">
        <div class="control-group">
            <label for="cityFilter">Cities (none selected = all):</label>
            <select id="cityFilter" multiple></select>
        </div>
        <div class="control-group">
            <label for="startDate">From:</label>
            <input type="date" id="startDate">
            <label for="endDate">To:</label>
            <input type="date" id="endDate">
        </div>
        <div class="control-group">
            <label>Theme:</label>
            <div class="inline">
                <input type="radio" name="theme" id="themeLight" value="light" checked>
                <label for="themeLight">Light</label>
                <input type="radio" name="theme" id="themeDark" value="dark">
                <label for="themeDark">Dark</label>
            </div>
            <div class="status" id="status">Loading...</div>
        </div>
    </div>

    <div class="charts">
        <div id="trendChart" class="chart"></div>
        <div id="distributionChart" class="chart"></div>
    </div>

    <script>
        const plotConfig = { responsive: true, displayModeBar: false };
        let latestRequest = 0;

        function currentSelection() {
            const select = document.getElementById('cityFilter');
            return {
                cities: Array.from(select.selectedOptions).map(o => o.value),
                start: document.getElementById('startDate').value || null,
                end: document.getElementById('endDate').value || null,
                theme: document.querySelector('input[name=theme]:checked').value
            };
        }

        async function loadOptions() {
            const response = await fetch('/api/v1/options');
            const options = await response.json();

            const select = document.getElementById('cityFilter');
            select.innerHTML = '';
            options.cities.forEach(c => {
                const opt = document.createElement('option');
                opt.value = c.value;
                opt.textContent = c.label;
                opt.style.color = c.color;
                select.appendChild(opt);
            });

            for (const id of ['startDate', 'endDate']) {
                const input = document.getElementById(id);
                if (options.min_date) input.min = options.min_date;
                if (options.max_date) input.max = options.max_date;
            }
            document.getElementById('startDate').value = options.min_date || '';
            document.getElementById('endDate').value = options.max_date || '';
        }

        async function refresh() {
            const requestId = ++latestRequest;
            const selection = currentSelection();
            document.body.classList.toggle('dark', selection.theme === 'dark');

            try {
                const response = await fetch('/api/v1/charts', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify(selection)
                });
                const charts = await response.json();

                // A newer change superseded this one
                if (requestId !== latestRequest) return;

                Plotly.react('trendChart', charts.trend.data, charts.trend.layout, plotConfig);
                Plotly.react('distributionChart', charts.distribution.data, charts.distribution.layout, plotConfig);

                const range = charts.meta.start
                    ? `, ${charts.meta.start} to ${charts.meta.end}`
                    : ', no registrations loaded';
                document.getElementById('status').textContent =
                    `${charts.meta.filtered_rows.toLocaleString()} registrations${range}`;
            } catch (err) {
                console.error('Error:', err);
                document.getElementById('status').textContent = 'Error: ' + err;
            }
        }

        for (const id of ['cityFilter', 'startDate', 'endDate', 'themeLight', 'themeDark']) {
            document.getElementById(id).addEventListener('change', refresh);
        }

        loadOptions().then(refresh).catch(err => {
            console.error('Error:', err);
            document.getElementById('status').textContent = 'Error: ' + err;
        });
    </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_wires_controls() {
        let Html(page) = index().await;

        for id in ["cityFilter", "startDate", "endDate", "themeLight", "themeDark"] {
            assert!(page.contains(&format!("id=\"{}\"", id)), "missing control {}", id);
        }
        assert!(page.contains("/api/v1/charts"));
        assert!(page.contains("trendChart"));
        assert!(page.contains("distributionChart"));
    }
}
