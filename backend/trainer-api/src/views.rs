use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::models::{Scenario, ScenarioImage, SubmittedAnswers, TOKEN_PALETTE};

/// Served from the root so the worker's scope covers every page.
pub const SERVICE_WORKER_PATH: &str = "/sw.js";

#[derive(Debug, Serialize)]
pub struct QuestionView<'a> {
    pub id: &'a str,
    pub prompt: &'a str,
    pub answer: Option<&'a str>,
}

/// Everything the scenario page shows.
#[derive(Debug, Serialize)]
pub struct ScenarioView<'a> {
    pub key: &'a str,
    pub title: &'a str,
    pub dispatch: &'a str,
    pub image: &'a ScenarioImage,
    pub questions: Vec<QuestionView<'a>>,
    pub submitted: bool,
    pub index: usize,
    pub count: usize,
}

impl<'a> ScenarioView<'a> {
    pub fn unsubmitted(scenario: &'a Scenario, index: usize, count: usize) -> Self {
        Self::build(scenario, None, index, count)
    }

    pub fn with_answers(
        scenario: &'a Scenario,
        answers: &'a SubmittedAnswers,
        index: usize,
        count: usize,
    ) -> Self {
        Self::build(scenario, Some(answers), index, count)
    }

    fn build(
        scenario: &'a Scenario,
        answers: Option<&'a SubmittedAnswers>,
        index: usize,
        count: usize,
    ) -> Self {
        let questions = scenario
            .questions
            .iter()
            .map(|q| QuestionView {
                id: &q.id,
                prompt: &q.prompt,
                answer: answers.map(|a| a.get(&q.id).unwrap_or_default()),
            })
            .collect();

        Self {
            key: &scenario.key,
            title: &scenario.title,
            dispatch: &scenario.dispatch,
            image: &scenario.image,
            questions,
            submitted: answers.is_some(),
            index,
            count,
        }
    }

    /// Question id to answer text; empty until a submission.
    pub fn answers(&self) -> BTreeMap<&'a str, &'a str> {
        self.questions
            .iter()
            .filter_map(|q| q.answer.map(|answer| (q.id, answer)))
            .collect()
    }
}

/// Where the page finds its static assets.
#[derive(Debug, Clone)]
pub struct PageAssets {
    pub static_prefix: String,
}

impl Default for PageAssets {
    fn default() -> Self {
        Self {
            static_prefix: "/static".to_string(),
        }
    }
}

impl PageAssets {
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.static_prefix.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

pub fn render_page(view: &ScenarioView<'_>, assets: &PageAssets) -> String {
    let mut html = String::with_capacity(4096);

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="manifest" href="{manifest}">
<link rel="stylesheet" href="{stylesheet}">
</head>
<body>
<header>
<h1>{title}</h1>
<p class="scenario-position">Scenario {position} of {count}</p>
<a class="new-scenario" href="/new">New scenario</a>
</header>
<section class="dispatch">
<h2>Dispatch</h2>
<p>{dispatch}</p>
</section>
"#,
        title = escape_html(view.title),
        manifest = escape_html(&assets.url("pwa/manifest.json")),
        stylesheet = escape_html(&assets.url("css/board.css")),
        position = view.index + 1,
        count = view.count,
        dispatch = escape_html(view.dispatch),
    );

    let _ = write!(
        html,
        r#"<section class="scene">
<div id="board" data-scenario-key="{key}">
<img class="scene-base" src="{base}" alt="{title}">
"#,
        key = escape_html(view.key),
        base = escape_html(&assets.url(&view.image.base)),
        title = escape_html(view.title),
    );
    if let Some(overlay) = &view.image.overlay {
        let _ = writeln!(
            html,
            r#"<img class="scene-overlay" src="{}" alt="">"#,
            escape_html(&assets.url(overlay))
        );
    }
    html.push_str("<div id=\"tokenLayer\"></div>\n</div>\n<div class=\"palette\">\n");
    for tool in TOKEN_PALETTE {
        let src = escape_html(&assets.url(tool.image));
        let _ = write!(
            html,
            r#"<button type="button" class="tokenbtn" data-type="{kind}" data-src="{src}" title="{label}"><img src="{src}" alt="">{label}</button>
"#,
            kind = escape_html(tool.kind),
            src = src,
            label = escape_html(tool.label),
        );
    }
    html.push_str(
        r#"</div>
<button type="button" id="clearTokens">Clear board</button>
</section>
"#,
    );

    html.push_str("<form method=\"post\" action=\"/submit\" class=\"questions\">\n");
    for question in &view.questions {
        let id = escape_html(question.id);
        let _ = write!(
            html,
            r#"<label for="{id}">{prompt}</label>
<textarea id="{id}" name="{id}" rows="4">{answer}</textarea>
"#,
            id = id,
            prompt = escape_html(question.prompt),
            answer = escape_html(question.answer.unwrap_or_default()),
        );
    }
    html.push_str("<button type=\"submit\">Submit answers</button>\n</form>\n");

    if view.submitted {
        html.push_str("<section class=\"submitted\">\n<h2>Your answers</h2>\n<dl>\n");
        for question in &view.questions {
            let answer = question.answer.unwrap_or_default();
            let shown = if answer.is_empty() {
                "(no answer)".to_string()
            } else {
                escape_html(answer)
            };
            let _ = write!(
                html,
                "<dt>{}</dt>\n<dd>{}</dd>\n",
                escape_html(question.prompt),
                shown
            );
        }
        html.push_str("</dl>\n</section>\n");
    }

    let _ = write!(
        html,
        r#"<script src="{board}"></script>
<script src="{main}" data-sw-url="{sw}" data-offline-url="/" data-manifest-url="{manifest}" data-icon192-url="{icon192}" data-icon512-url="{icon512}"></script>
</body>
</html>
"#,
        board = escape_html(&assets.url("js/board.js")),
        main = escape_html(&assets.url("js/main.js")),
        sw = SERVICE_WORKER_PATH,
        manifest = escape_html(&assets.url("pwa/manifest.json")),
        icon192 = escape_html(&assets.url("pwa/ff-icon-192.png")),
        icon512 = escape_html(&assets.url("pwa/ff-icon-512.png")),
    );

    html
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
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
