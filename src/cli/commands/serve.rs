//! Web UI server.
//!
//! Serves the single-page UI and a JSON endpoint that runs the pipeline.

use crate::cli::Output;
use crate::config::{Credentials, Settings};
use crate::error::ResumaError;
use crate::generation::{Mode, ALLOWED_MODELS};
use crate::pipeline::Pipeline;
use crate::render::{RenderedOutput, StyledBlock};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

/// Shared application state.
struct AppState {
    settings: Settings,
    credentials: Option<Credentials>,
    config_error: Option<String>,
}

/// Run the web UI server.
pub async fn run_serve(
    host: Option<&str>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    let host = host
        .map(str::to_string)
        .unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    // A missing credential is visible but non-fatal; the UI still serves
    // and shows the configuration error before any processing.
    let (credentials, config_error) = match settings.credentials() {
        Ok(c) => (Some(c), None),
        Err(e) => (None, Some(e.to_string())),
    };

    if let Some(err) = &config_error {
        Output::warning(err);
    }

    let state = Arc::new(AppState {
        settings,
        credentials,
        config_error,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/process", post(process))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Resuma Web UI");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("UI", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("Process", "POST /process");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ProcessRequest {
    /// YouTube video URL
    url: String,
    /// Output mode ("Resumo" or "Mapa Mental")
    mode: String,
    /// Creativity of the model (0.0-1.0)
    temperature: Option<f32>,
    /// Chat model from the fixed allow-list
    model: Option<String>,
}

#[derive(Serialize)]
struct ProcessResponse {
    run_id: Uuid,
    title: String,
    duration_seconds: Option<u32>,
    duration_display: String,
    transcript: String,
    mode: String,
    /// Generated text, unmodified; also the download payload.
    content: String,
    download_filename: &'static str,
    /// Styled paragraph blocks (summary mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    blocks: Option<Vec<StyledBlock>>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Html(render_page(&state))
}

async fn process(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessRequest>,
) -> impl IntoResponse {
    let credentials = match &state.credentials {
        Some(c) => c.clone(),
        None => {
            let message = state
                .config_error
                .clone()
                .unwrap_or_else(|| "API key not configured".to_string());
            return error_response(&ResumaError::Config(message));
        }
    };

    let mode: Mode = match req.mode.parse() {
        Ok(mode) => mode,
        Err(e) => return error_response(&e),
    };

    // Per-request overrides flow through the same validated settings the
    // CLI uses; there is one pipeline, not two.
    let mut settings = state.settings.clone();
    if let Some(temperature) = req.temperature {
        settings.generation.temperature = temperature;
    }
    if let Some(model) = req.model {
        settings.generation.model = model;
    }
    if let Err(e) = settings.generation.validate() {
        return error_response(&e);
    }

    let pipeline = match Pipeline::new(&settings, &credentials) {
        Ok(pipeline) => pipeline,
        Err(e) => return error_response(&e),
    };

    match pipeline.run(&req.url, mode).await {
        Ok(run) => {
            let blocks = match run.output {
                RenderedOutput::Summary(blocks) => Some(blocks),
                RenderedOutput::MindMap(_) => None,
            };

            Json(ProcessResponse {
                run_id: run.run_id,
                title: run.artifact.title.clone(),
                duration_seconds: run.artifact.duration_seconds,
                duration_display: run.artifact.duration_display(),
                transcript: run.transcript.text,
                mode: mode.to_string(),
                content: run.content.text,
                download_filename: mode.download_filename(),
                blocks,
            })
            .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Map an error to an HTTP status with a JSON body.
fn error_response(error: &ResumaError) -> axum::response::Response {
    let status = match error {
        ResumaError::InvalidUrl(_)
        | ResumaError::InvalidMode(_)
        | ResumaError::EmptyInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ResumaError::Config(_) | ResumaError::ToolNotFound(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

// === Page ===

/// Inject state-dependent values into the page template.
fn render_page(state: &AppState) -> String {
    let model_options: String = ALLOWED_MODELS
        .iter()
        .map(|model| {
            if *model == state.settings.generation.model {
                format!("<option value=\"{model}\" selected>{model}</option>")
            } else {
                format!("<option value=\"{model}\">{model}</option>")
            }
        })
        .collect();

    let config_banner = match &state.config_error {
        Some(error) => format!(
            "<div class=\"config-error\">⚠️ {}</div>",
            error.replace('<', "&lt;")
        ),
        None => String::new(),
    };

    PAGE.replace("{{model_options}}", &model_options)
        .replace("{{config_banner}}", &config_banner)
        .replace(
            "{{default_temperature}}",
            &state.settings.generation.temperature.to_string(),
        )
}

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>Resuma</title>
<script>window.markmap = { autoLoader: { manual: true } };</script>
<script src="https://cdn.jsdelivr.net/npm/markmap-autoloader@0.16"></script>
<style>
body { font-family: Arial, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; }
.config-error { background: #FDECEA; color: #B71C1C; padding: 12px; border-radius: 8px; margin-bottom: 16px; }
.controls { display: flex; gap: 12px; flex-wrap: wrap; align-items: center; margin: 12px 0; }
.controls label { font-size: 14px; color: #555; }
#url { width: 100%; padding: 10px; font-size: 16px; box-sizing: border-box; }
button { padding: 8px 16px; font-size: 14px; cursor: pointer; }
#status { color: #555; margin: 12px 0; }
.colored-paragraph { padding: 15px; margin: 10px 0; border-radius: 10px; }
#mindmap svg { width: 100%; height: 500px; }
details { margin: 12px 0; }
#info p { margin: 4px 0; }
footer { margin-top: 32px; color: #999; font-size: 12px; }
</style>
</head>
<body>
<h1>🎥 Transcrição e Análise de Vídeos do YouTube</h1>
<p>Transforme vídeos do YouTube em resumos e mapas mentais!</p>
{{config_banner}}
<form id="form">
  <input id="url" type="text" placeholder="📋 Insira o link do vídeo do YouTube">
  <div class="controls">
    <label>Tipo de saída
      <select id="mode">
        <option value="Resumo">Resumo</option>
        <option value="Mapa Mental">Mapa Mental</option>
      </select>
    </label>
    <label>Temperatura <span id="temp-value">{{default_temperature}}</span>
      <input id="temperature" type="range" min="0" max="1" step="0.05" value="{{default_temperature}}">
    </label>
    <label>Modelo LLM
      <select id="model">{{model_options}}</select>
    </label>
    <button type="submit">Processar</button>
    <button type="button" id="clear">🔄 Limpar Tudo</button>
  </div>
</form>
<div id="status"></div>
<div id="info"></div>
<details id="transcript-box" hidden>
  <summary>📄 Transcrição Completa</summary>
  <pre id="transcript" style="white-space: pre-wrap;"></pre>
</details>
<div id="result"></div>
<div id="mindmap"></div>
<button id="download" hidden>⬇️ Baixar</button>
<footer>Desenvolvido com Whisper, Groq e Llama</footer>
<script>
(function () {
  var form = document.getElementById('form');
  var status = document.getElementById('status');
  var info = document.getElementById('info');
  var transcriptBox = document.getElementById('transcript-box');
  var result = document.getElementById('result');
  var mindmap = document.getElementById('mindmap');
  var download = document.getElementById('download');
  var slider = document.getElementById('temperature');
  var payload = null;

  slider.addEventListener('input', function () {
    document.getElementById('temp-value').textContent = slider.value;
  });

  function clearAll() {
    info.innerHTML = '';
    result.innerHTML = '';
    mindmap.innerHTML = '';
    transcriptBox.hidden = true;
    download.hidden = true;
    payload = null;
  }

  document.getElementById('clear').addEventListener('click', function () {
    document.getElementById('url').value = '';
    status.textContent = '';
    clearAll();
  });

  form.addEventListener('submit', function (ev) {
    ev.preventDefault();
    clearAll();
    status.textContent = '🔊 Processando vídeo (download, transcrição, geração)...';

    var body = {
      url: document.getElementById('url').value,
      mode: document.getElementById('mode').value,
      temperature: parseFloat(slider.value),
      model: document.getElementById('model').value
    };

    fetch('/process', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(body)
    }).then(function (resp) {
      return resp.json().then(function (data) { return { ok: resp.ok, data: data }; });
    }).then(function (r) {
      if (!r.ok) {
        status.textContent = '⚠️ ' + (r.data.error || 'Erro no processamento');
        return;
      }
      status.textContent = '';
      render(r.data);
    }).catch(function (err) {
      status.textContent = '⚠️ Erro no processamento: ' + err;
    });
  });

  function render(data) {
    payload = data;
    info.innerHTML = '<p>📹 <b>Título:</b> ' + escapeHtml(data.title) + '</p>' +
      '<p>⏱️ <b>Duração:</b> ' + escapeHtml(data.duration_display) + '</p>';

    document.getElementById('transcript').textContent = data.transcript;
    transcriptBox.hidden = false;

    if (data.blocks) {
      var html = '';
      for (var i = 0; i < data.blocks.length; i++) {
        var block = data.blocks[i];
        html += '<div class="colored-paragraph" style="background-color: ' + block.background +
          '; color: ' + block.foreground + ';"><p>' + escapeHtml(block.text) + '</p></div>';
      }
      result.innerHTML = '<h3>📋 ' + escapeHtml(data.mode) + ' Gerado:</h3>' + html;
    } else {
      result.innerHTML = '<h3>🗺️ Mapa Mental</h3>';
      var holder = document.createElement('div');
      holder.className = 'markmap';
      var template = document.createElement('script');
      template.type = 'text/template';
      template.textContent = data.content;
      holder.appendChild(template);
      mindmap.appendChild(holder);
      markmap.autoLoader.renderAll();
    }

    download.hidden = false;
  }

  download.addEventListener('click', function () {
    if (!payload) return;
    var blob = new Blob([payload.content], { type: 'text/plain;charset=utf-8' });
    var link = document.createElement('a');
    link.href = URL.createObjectURL(blob);
    link.download = payload.download_filename;
    link.click();
    URL.revokeObjectURL(link.href);
  });

  function escapeHtml(text) {
    var div = document.createElement('div');
    div.textContent = text;
    return div.innerHTML;
  }
})();
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lists_all_models() {
        let state = AppState {
            settings: Settings::default(),
            credentials: None,
            config_error: None,
        };
        let page = render_page(&state);
        for model in ALLOWED_MODELS {
            assert!(page.contains(model), "page should list {model}");
        }
        assert!(!page.contains("{{model_options}}"));
        assert!(!page.contains("{{default_temperature}}"));
    }

    #[test]
    fn test_page_shows_config_error_banner() {
        let state = AppState {
            settings: Settings::default(),
            credentials: None,
            config_error: Some("GROQ_API_KEY not set".to_string()),
        };
        let page = render_page(&state);
        assert!(page.contains("GROQ_API_KEY not set"));
        assert!(page.contains("config-error"));
    }
}
