//! HTTP server: one fetch and render per request, handled sequentially.

use canopy::{escape_xml, render_treemap, AppConfig, CanopyError, DataSource, DatasetRegistry};
use tiny_http::{Header, Response, Server};

/// A response before it is handed to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reply {
    pub(crate) status: u16,
    pub(crate) content_type: &'static str,
    pub(crate) body: String,
}

impl Reply {
    fn html(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "text/html; charset=utf-8",
            body,
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.to_string(),
        }
    }
}

fn error_page(status: u16, err: &CanopyError) -> Reply {
    let heading = if status == 502 {
        "Dataset unavailable"
    } else {
        "Dataset could not be rendered"
    };
    Reply::html(
        status,
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{heading}</title></head>\n<body>\n<h1 id=\"title\">{heading}</h1>\n<p id=\"description\">{}</p>\n</body>\n</html>\n",
            escape_xml(&err.to_string())
        ),
    )
}

/// Route one request URL.
pub(crate) fn handle(
    url: &str,
    config: &AppConfig,
    registry: &DatasetRegistry,
    source: &dyn DataSource,
) -> Reply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    match path {
        "/" | "/index.html" => match render_treemap(config, registry, query, source) {
            Ok(rendering) => Reply::html(200, rendering.to_html()),
            Err(err) => {
                let status = if err.is_fetch_error() { 502 } else { 422 };
                tracing::warn!(url, status, error = %err, "render failed");
                error_page(status, &err)
            }
        },
        "/health" => Reply::text(200, "ok"),
        _ => Reply::text(404, "404 Not Found"),
    }
}

/// Serve until the process is stopped.
pub(crate) fn run(
    addr: &str,
    config: &AppConfig,
    registry: &DatasetRegistry,
    source: &dyn DataSource,
) -> Result<(), String> {
    let server = Server::http(addr).map_err(|e| format!("failed to bind {addr}: {e}"))?;
    tracing::info!(addr, "serving treemaps");
    eprintln!("Serving on http://{addr}/?data=videogames  (Ctrl+C to stop)");

    for request in server.incoming_requests() {
        let url = request.url().to_string();
        let reply = handle(&url, config, registry, source);
        tracing::info!(
            method = %request.method(),
            url,
            status = reply.status,
            "request"
        );

        let mut response = Response::from_string(reply.body).with_status_code(reply.status);
        let content_type = reply.content_type.as_bytes();
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], content_type) {
            response = response.with_header(header);
        }
        if let Err(e) = request.respond(response) {
            tracing::warn!(url, error = %e, "failed to send response");
        }
    }
    Ok(())
}
