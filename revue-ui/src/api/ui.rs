//! UI Routes - HTML dashboard for the review sentiment service
//!
//! Single page, vanilla HTML/CSS/JS (no frameworks). Charts are plain
//! div bars driven by the JSON chart endpoints.

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard_page))
}

/// Root page - review sentiment dashboard
async fn dashboard_page() -> impl IntoResponse {
    Html(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Revue - Customer Review Sentiment</title>
    <style>
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 960px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
        }
        h1 {
            color: #333;
            border-bottom: 2px solid #0066cc;
            padding-bottom: 10px;
        }
        .button {
            display: inline-block;
            padding: 10px 20px;
            background: #0066cc;
            color: white;
            border: none;
            border-radius: 4px;
            margin: 10px 5px;
            cursor: pointer;
        }
        .button:hover { background: #0052a3; }
        .button:disabled { background: #999; cursor: wait; }
        #status { color: #555; min-height: 1.5em; }
        #status.error { color: #b00020; }
        table { border-collapse: collapse; width: 100%; margin-top: 10px; }
        th, td { border: 1px solid #ddd; padding: 6px 10px; text-align: left; }
        th { background: #f4f6f8; }
        .bar-row { display: flex; align-items: center; margin: 3px 0; }
        .bar-label { width: 160px; font-size: 0.9em; }
        .bar {
            background: #0066cc;
            height: 18px;
            border-radius: 2px;
            margin-right: 6px;
        }
        .bar-count { font-size: 0.85em; color: #555; }
        select { padding: 6px; }
    </style>
</head>
<body>
    <h1>Customer Review Sentiment</h1>
    <p>Load the review CSV, clean the text, then score each review from 1 to 10.</p>

    <div>
        <button class="button" id="btn-load">Load Data</button>
        <button class="button" id="btn-clean">Clean Text</button>
        <button class="button" id="btn-annotate">Analyze Sentiments</button>
        <label><input type="checkbox" id="chk-force"> Recompute existing scores</label>
    </div>
    <p id="status"></p>

    <h2>Filter by product</h2>
    <select id="product-select"><option value="all">All Products</option></select>

    <h2>Customer Reviews</h2>
    <div id="review-table"></div>

    <h2>Average Sentiment by Product</h2>
    <div id="mean-chart"></div>

    <h2>Sentiment Score Distribution</h2>
    <div id="distribution-chart"></div>

    <script>
        const status = document.getElementById('status');

        function setStatus(message, isError = false) {
            status.textContent = message;
            status.className = isError ? 'error' : '';
        }

        async function call(method, url) {
            const response = await fetch(url, { method });
            const body = await response.json();
            if (!response.ok) {
                throw new Error(body.error ? body.error.message : response.statusText);
            }
            return body;
        }

        function selectedProduct() {
            return document.getElementById('product-select').value;
        }

        async function refreshProducts() {
            const data = await call('GET', '/api/products');
            const select = document.getElementById('product-select');
            const current = select.value;
            select.innerHTML = '<option value="all">All Products</option>';
            for (const product of data.products) {
                const option = document.createElement('option');
                option.value = product;
                option.textContent = product;
                select.appendChild(option);
            }
            select.value = current;
        }

        async function refreshTable() {
            const data = await call('GET', '/api/reviews?product=' + encodeURIComponent(selectedProduct()));
            const rows = data.rows.map(r => `
                <tr>
                    <td>${r.product}</td>
                    <td>${r.summary}</td>
                    <td>${r.cleaned_summary ?? ''}</td>
                    <td>${r.sentiment_score ?? ''}</td>
                    <td>${r.sentiment_10 ?? ''}</td>
                </tr>`).join('');
            document.getElementById('review-table').innerHTML = `
                <table>
                    <tr><th>Product</th><th>Summary</th><th>Cleaned</th><th>Legacy Score</th><th>Sentiment (1-10)</th></tr>
                    ${rows}
                </table>`;
        }

        function renderBars(container, entries, scale) {
            container.innerHTML = entries.map(([label, value]) => `
                <div class="bar-row">
                    <span class="bar-label">${label}</span>
                    <div class="bar" style="width:${Math.max(2, value * scale)}px"></div>
                    <span class="bar-count">${Number.isInteger(value) ? value : value.toFixed(2)}</span>
                </div>`).join('');
        }

        async function refreshCharts() {
            const product = encodeURIComponent(selectedProduct());

            const means = await call('GET', '/api/charts/mean-sentiment?product=' + product);
            renderBars(
                document.getElementById('mean-chart'),
                Object.entries(means.means),
                40
            );

            const distribution = await call('GET', '/api/charts/score-distribution?product=' + product);
            renderBars(
                document.getElementById('distribution-chart'),
                Object.entries(distribution.counts).map(([score, count]) => ['Score ' + score, count]),
                20
            );
        }

        async function refreshAll() {
            await refreshProducts();
            await refreshTable();
            await refreshCharts();
        }

        async function run(button, action) {
            button.disabled = true;
            try {
                await action();
            } catch (e) {
                setStatus(e.message, true);
            } finally {
                button.disabled = false;
            }
        }

        document.getElementById('btn-load').addEventListener('click', function () {
            run(this, async () => {
                const data = await call('POST', '/api/reviews/load');
                setStatus(`Loaded ${data.rows} reviews from ${data.source}`);
                await refreshAll();
            });
        });

        document.getElementById('btn-clean').addEventListener('click', function () {
            run(this, async () => {
                const data = await call('POST', '/api/reviews/clean');
                setStatus(`Cleaned ${data.rows_cleaned} reviews`);
                await refreshTable();
            });
        });

        document.getElementById('btn-annotate').addEventListener('click', function () {
            run(this, async () => {
                const force = document.getElementById('chk-force').checked;
                setStatus('Analyzing sentiments...');
                const data = await call('POST', '/api/reviews/annotate?force=' + force);
                const r = data.report;
                setStatus(`Analysis complete: ${r.scored} scored, ${r.invalid} invalid, ` +
                          `${r.client_errors} client errors, ${r.skipped} skipped`);
                await refreshTable();
                await refreshCharts();
            });
        });

        document.getElementById('product-select').addEventListener('change', function () {
            run(this, async () => {
                await refreshTable();
                await refreshCharts();
            });
        });
    </script>
</body>
</html>
"#,
    )
}
