//! Web UI - ticket analyzer form page
//!
//! Single embedded page: upload form, staged progress while the request is
//! in flight, then transcript, sentiment/churn gauges, a language badge,
//! and the Freshdesk delivery outcome.

use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;

use crate::AppState;

/// GET /
///
/// Analyzer form page
pub async fn root_page() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = env!("GIT_HASH");
    let build_profile = env!("BUILD_PROFILE");
    let build_timestamp = env!("BUILD_TIMESTAMP");

    let html = format!(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Ticket Analyzer</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
        }}
        header {{
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 20px;
            margin-bottom: 30px;
        }}
        .header-content {{
            display: flex;
            justify-content: space-between;
            align-items: center;
        }}
        .header-right {{
            text-align: right;
            font-size: 14px;
            color: #888;
            font-family: 'Courier New', monospace;
            line-height: 1.2;
        }}
        h1 {{
            font-size: 26px;
            margin-bottom: 5px;
            color: #4a9eff;
        }}
        .subtitle {{
            color: #888;
            font-size: 16px;
        }}
        .content {{
            padding: 0 20px 40px 20px;
            max-width: 900px;
            margin: 0 auto;
        }}
        .card {{
            background-color: #242424;
            border: 1px solid #3a3a3a;
            border-radius: 8px;
            padding: 20px;
            margin-bottom: 20px;
        }}
        h2 {{
            color: #4a9eff;
            margin-bottom: 12px;
            font-size: 18px;
        }}
        .form-group {{
            margin-bottom: 15px;
        }}
        label {{
            display: block;
            margin-bottom: 5px;
            color: #aaa;
        }}
        input[type="file"], input[type="number"], textarea {{
            width: 100%;
            background-color: #1a1a1a;
            border: 1px solid #3a3a3a;
            border-radius: 4px;
            color: #e0e0e0;
            padding: 10px;
            font-family: inherit;
        }}
        textarea {{
            min-height: 90px;
            resize: vertical;
        }}
        .button {{
            display: inline-block;
            padding: 10px 20px;
            background: #4a9eff;
            color: white;
            border: none;
            border-radius: 4px;
            font-weight: 600;
            font-size: 15px;
            cursor: pointer;
        }}
        .button:hover {{
            background: #3a8eef;
        }}
        .button:disabled {{
            background: #2a5a8f;
            cursor: not-allowed;
        }}
        .warning {{
            color: #f59e0b;
            margin-top: 10px;
            display: none;
        }}
        #progress {{
            display: none;
        }}
        .stage-label {{
            color: #4a9eff;
            margin-bottom: 8px;
        }}
        .progress-bar {{
            background-color: #1a1a1a;
            border-radius: 6px;
            overflow: hidden;
            height: 14px;
        }}
        .progress-fill {{
            background: #4a9eff;
            height: 100%;
            width: 0%;
            transition: width 0.4s ease;
        }}
        #results {{
            display: none;
        }}
        .transcript-box {{
            background-color: #1a1a1a;
            border: 1px solid #3a3a3a;
            border-radius: 4px;
            padding: 12px;
            white-space: pre-wrap;
            margin-bottom: 10px;
        }}
        .metrics {{
            display: flex;
            gap: 15px;
            flex-wrap: wrap;
        }}
        .metric {{
            flex: 1;
            min-width: 220px;
            background-color: #1a1a1a;
            border: 1px solid #3a3a3a;
            border-radius: 8px;
            padding: 15px;
            text-align: center;
        }}
        .metric-title {{
            color: #aaa;
            font-size: 13px;
            text-transform: uppercase;
            letter-spacing: 1px;
            margin-bottom: 8px;
        }}
        .gauge-value {{
            font-size: 28px;
            font-weight: 700;
            margin-bottom: 8px;
        }}
        .gauge-track {{
            background-color: #2a2a2a;
            border-radius: 6px;
            overflow: hidden;
            height: 12px;
        }}
        .gauge-fill {{
            height: 100%;
            width: 0%;
            transition: width 0.6s ease;
        }}
        .language-badge {{
            display: inline-block;
            font-size: 22px;
            font-weight: 700;
            padding: 8px 18px;
            border-radius: 16px;
            background: #17657d;
            color: #fff;
        }}
        .badge-caption {{
            color: #888;
            font-size: 12px;
            margin-top: 8px;
        }}
        .banner {{
            border-radius: 4px;
            padding: 12px;
            margin-top: 10px;
            display: none;
        }}
        .banner-success {{
            background: #10381f;
            border-left: 4px solid #10b981;
        }}
        .banner-error {{
            background: #3a1414;
            border-left: 4px solid #ef4444;
        }}
        .error-detail {{
            font-family: 'Courier New', monospace;
            font-size: 13px;
            color: #f0a0a0;
            margin-top: 8px;
            white-space: pre-wrap;
        }}
    </style>
</head>
<body>
    <header>
        <div class="header-content">
            <div>
                <h1>Ticket Analyzer</h1>
                <p class="subtitle">Audio transcription, sentiment and churn scoring, Freshdesk notes</p>
            </div>
            <div class="header-right">
                <div>v{0}</div>
                <div>{1} ({2})</div>
                <div>{3}</div>
            </div>
        </div>
    </header>
    <div class="content">

    <div class="card">
        <h2>Audio Upload</h2>
        <div class="form-group">
            <label for="audio">Audio file (MP3 or WAV)</label>
            <input type="file" id="audio" accept=".mp3,.wav">
        </div>
        <div class="form-group">
            <label for="description">Ticket description (optional)</label>
            <textarea id="description" placeholder="Any additional context for this ticket..."></textarea>
        </div>
        <div class="form-group">
            <label for="ticket-id">Ticket ID</label>
            <input type="number" id="ticket-id" min="1" step="1" value="1">
        </div>
        <button class="button" id="submit-btn" onclick="runAnalysis()">Analyze &amp; Update</button>
        <div class="warning" id="form-warning">Please upload an audio file to proceed.</div>
    </div>

    <div class="card" id="progress">
        <div class="stage-label" id="stage-label">Processing audio file...</div>
        <div class="progress-bar"><div class="progress-fill" id="progress-fill"></div></div>
    </div>

    <div id="results">
        <div class="card">
            <h2>Analysis Complete</h2>
            <div class="transcript-box" id="transcript"></div>
            <div class="metrics">
                <div class="metric">
                    <div class="metric-title" id="sentiment-title">Sentiment</div>
                    <div class="gauge-value" id="sentiment-value">-</div>
                    <div class="gauge-track"><div class="gauge-fill" id="sentiment-fill"></div></div>
                </div>
                <div class="metric">
                    <div class="metric-title">Churn Risk</div>
                    <div class="gauge-value" id="churn-value">-</div>
                    <div class="gauge-track"><div class="gauge-fill" id="churn-fill"></div></div>
                </div>
                <div class="metric">
                    <div class="metric-title">Language</div>
                    <div><span class="language-badge" id="language-badge">-</span></div>
                    <div class="badge-caption">Auto-detected</div>
                </div>
            </div>
        </div>
        <div class="card">
            <h2>Freshdesk Update</h2>
            <div class="banner banner-success" id="freshdesk-success">Ticket successfully updated in Freshdesk</div>
            <div class="banner banner-error" id="freshdesk-error">
                <div id="freshdesk-error-summary"></div>
                <div class="error-detail" id="freshdesk-error-detail"></div>
            </div>
        </div>
    </div>

    <div class="card banner banner-error" id="pipeline-error" style="display: none;">
        <div id="pipeline-error-message"></div>
    </div>

    </div>
    <script>
        // Staged labels mirroring the pipeline steps; the request is one
        // synchronous POST, so progress advances on a timer until it returns
        const STAGES = [
            ['Processing audio file...', 20],
            ['Transcribing audio...', 40],
            ['Processing language...', 60],
            ['Analyzing sentiment...', 80],
            ['Updating Freshdesk ticket...', 95]
        ];
        let stageTimer = null;

        function startProgress() {{
            let index = 0;
            document.getElementById('progress').style.display = 'block';
            setStage(index);
            stageTimer = setInterval(function() {{
                if (index < STAGES.length - 1) {{
                    index += 1;
                    setStage(index);
                }}
            }}, 1500);
        }}

        function setStage(index) {{
            document.getElementById('stage-label').textContent = STAGES[index][0];
            document.getElementById('progress-fill').style.width = STAGES[index][1] + '%';
        }}

        function stopProgress() {{
            clearInterval(stageTimer);
            document.getElementById('progress').style.display = 'none';
        }}

        async function runAnalysis() {{
            const fileInput = document.getElementById('audio');
            const warning = document.getElementById('form-warning');
            if (!fileInput.files.length) {{
                warning.style.display = 'block';
                return;
            }}
            warning.style.display = 'none';
            document.getElementById('results').style.display = 'none';
            document.getElementById('pipeline-error').style.display = 'none';
            document.getElementById('submit-btn').disabled = true;
            startProgress();

            const form = new FormData();
            form.append('audio', fileInput.files[0]);
            form.append('description', document.getElementById('description').value);
            form.append('ticket_id', document.getElementById('ticket-id').value);

            try {{
                const response = await fetch('/analyze', {{ method: 'POST', body: form }});
                const payload = await response.json();
                stopProgress();
                if (!response.ok) {{
                    showPipelineError(payload.error ? payload.error.message : 'Processing failed');
                }} else {{
                    renderResults(payload);
                }}
            }} catch (err) {{
                stopProgress();
                showPipelineError('An error occurred during processing: ' + err);
            }} finally {{
                document.getElementById('submit-btn').disabled = false;
            }}
        }}

        function showPipelineError(message) {{
            const banner = document.getElementById('pipeline-error');
            document.getElementById('pipeline-error-message').textContent = message;
            banner.style.display = 'block';
        }}

        function renderResults(result) {{
            document.getElementById('results').style.display = 'block';
            document.getElementById('transcript').textContent = result.transcript;

            const confidencePct = Math.round(result.sentiment.confidence * 100);
            document.getElementById('sentiment-title').textContent = 'Sentiment: ' + result.sentiment.label;
            document.getElementById('sentiment-value').textContent = confidencePct + '%';
            const sentimentFill = document.getElementById('sentiment-fill');
            sentimentFill.style.width = confidencePct + '%';
            sentimentFill.style.background = result.sentiment.label === 'POSITIVE' ? '#10b981' : '#ef4444';

            const churnPct = Math.round(result.churn_score * 100);
            document.getElementById('churn-value').textContent = churnPct + '%';
            const churnFill = document.getElementById('churn-fill');
            churnFill.style.width = churnPct + '%';
            churnFill.style.background =
                result.churn_score > 0.5 ? '#ef4444' : result.churn_score > 0.3 ? '#f59e0b' : '#10b981';

            document.getElementById('language-badge').textContent = result.language.toUpperCase();

            if (result.freshdesk.updated) {{
                document.getElementById('freshdesk-success').style.display = 'block';
                document.getElementById('freshdesk-error').style.display = 'none';
            }} else {{
                const summary = result.freshdesk.status
                    ? 'Failed to update ticket: HTTP ' + result.freshdesk.status
                    : 'Failed to update ticket';
                document.getElementById('freshdesk-error-summary').textContent = summary;
                document.getElementById('freshdesk-error-detail').textContent = result.freshdesk.detail || '';
                document.getElementById('freshdesk-error').style.display = 'block';
                document.getElementById('freshdesk-success').style.display = 'none';
            }}
        }}
    </script>
</body>
</html>
        "#,
        version, git_hash, build_profile, build_timestamp
    );

    Html(html)
}

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new().route("/", get(root_page))
}
