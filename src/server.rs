//! HTML form surface, enabled with the `server` feature.

use crate::{
    models::{DownloadState, LogoStyle},
    session::{LogoSpark, Submission, SubmissionOutcome},
    synthesis::{ImageFetcher, ImageService},
};
use actix_web::{web, App, HttpResponse, HttpServer};
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Default, Deserialize)]
pub struct LogoForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub palette: String,
}

pub fn routes<S, F>(cfg: &mut web::ServiceConfig)
where
    S: ImageService + 'static,
    F: ImageFetcher + 'static,
{
    cfg.route("/", web::get().to(index))
        .route("/generate", web::post().to(generate::<S, F>));
}

pub async fn run<S, F>(host: &str, port: u16, spark: LogoSpark<S, F>) -> std::io::Result<()>
where
    S: ImageService + 'static,
    F: ImageFetcher + 'static,
{
    let spark = web::Data::new(spark);
    log::info!("🌐 Serving the logo form on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(spark.clone())
            .configure(routes::<S, F>)
    })
    .bind((host, port))?
    .run()
    .await
}

async fn index() -> HttpResponse {
    html(render_page(&LogoForm::default(), ""))
}

async fn generate<S, F>(spark: web::Data<LogoSpark<S, F>>, form: web::Form<LogoForm>) -> HttpResponse
where
    S: ImageService + 'static,
    F: ImageFetcher + 'static,
{
    let form = form.into_inner();

    let style = match LogoStyle::from_str(&form.style) {
        Ok(style) => style,
        Err(e) => {
            log::warn!("⚠️  Rejected form with style '{}': {}", form.style, e);
            return html(render_page(&form, &notice("warning", &e.to_string())));
        }
    };

    let submission = spark.submit(&form.description, style, &form.palette).await;
    html(render_page(&form, &render_submission(&submission)))
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn notice(class: &str, message: &str) -> String {
    format!(
        r#"<div class="notice {}">{}</div>"#,
        class,
        escape_html(message)
    )
}

pub fn render_submission(submission: &Submission) -> String {
    match &submission.outcome {
        SubmissionOutcome::Rejected(message) => notice("warning", message),
        SubmissionOutcome::Failed { .. } => {
            let message = submission.error_message().unwrap_or_default();
            format!(
                "{}{}",
                notice("error", &message),
                notice(
                    "error",
                    "Could not generate logo concepts. The AI may have flagged the prompt, or an API error occurred."
                )
            )
        }
        SubmissionOutcome::Presented(concepts) => {
            let mut out = String::from(
                "<h2>Here Are Your AI-Generated Logo Concepts!</h2>\n<div class=\"grid\">\n",
            );
            for concept in concepts {
                let action = match &concept.download {
                    DownloadState::Ready(download) => format!(
                        r#"<a class="download" download="{}" href="{}">Download</a>"#,
                        escape_html(&download.file_name),
                        download.data_uri()
                    ),
                    DownloadState::Unavailable(reason) => format!(
                        r#"<p class="fetch-error">Download unavailable: {}</p>"#,
                        escape_html(reason)
                    ),
                };
                out.push_str(&format!(
                    "<figure><img src=\"{}\" alt=\"{}\"><figcaption>{}</figcaption>{}</figure>\n",
                    escape_html(concept.image_reference.as_str()),
                    escape_html(&concept.caption),
                    escape_html(&concept.caption),
                    action
                ));
            }
            out.push_str("</div>");
            out
        }
    }
}

pub fn render_page(form: &LogoForm, results: &str) -> String {
    let options: String = LogoStyle::ALL
        .iter()
        .map(|style| {
            let selected = if style.label().eq_ignore_ascii_case(form.style.trim()) {
                " selected"
            } else {
                ""
            };
            format!(
                "<option value=\"{0}\"{1}>{0}</option>",
                style.label(),
                selected
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>AI Logo Spark</title>
<style>
body {{ font-family: sans-serif; max-width: 1200px; margin: 2rem auto; }}
.grid {{ display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; }}
figure img {{ width: 100%; }}
.notice.error {{ color: #b00020; }}
.notice.warning {{ color: #8a6d00; }}
.fetch-error {{ color: #b00020; }}
</style>
</head>
<body>
<h1>AI Logo Spark</h1>
<p>Turn your ideas into professional logo concepts in seconds. Describe your business and let AI do the rest.</p>
<form method="post" action="/generate">
<h3>Describe Your Vision</h3>
<label>What does your company or project do?<br>
<textarea name="description" rows="4" cols="80" placeholder="e.g., A coffee shop that uses sustainably sourced beans and has a cozy, rustic atmosphere.">{description}</textarea></label><br>
<label>Choose a logo style:<br><select name="style">{options}</select></label><br>
<label>Describe a color palette:<br>
<input name="palette" size="80" value="{palette}" placeholder="e.g., Earthy tones like brown, green, and beige"></label><br>
<button type="submit">Spark My Logos!</button>
</form>
{results}
</body>
</html>
"#,
        description = escape_html(&form.description),
        options = options,
        palette = escape_html(&form.palette),
        results = results
    )
}
