use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Redirect},
    Form,
};
use std::sync::Arc;

use crate::{
    metrics::{ANSWER_SUBMISSIONS_TOTAL, SCENARIO_ROTATIONS_TOTAL, SCENARIO_VIEWS_TOTAL},
    models::{Scenario, SubmittedAnswers},
    services::{session_selector, AppState},
    session::{Session, UserSession},
    views::{render_page, ScenarioView},
};

fn current_scenario<'a>(state: &'a AppState, session: &mut Session) -> (usize, &'a Scenario) {
    let index = session_selector::current_index(session, state.scenarios.len());
    (index, state.scenarios.get_or_first(index))
}

/// GET / - Show the current scenario with a blank answer sheet
pub async fn show_scenario(
    State(state): State<Arc<AppState>>,
    mut session: UserSession,
) -> impl IntoResponse {
    let (index, scenario) = current_scenario(&state, &mut session);
    tracing::debug!("Showing scenario {} ({})", index, scenario.key);

    SCENARIO_VIEWS_TOTAL
        .with_label_values(&[scenario.key.as_str()])
        .inc();

    let view = ScenarioView::unsubmitted(scenario, index, state.scenarios.len());
    let page = render_page(&view, &state.assets);

    (session, Html(page))
}

/// GET /new - Pick a different random scenario, then go back to /
pub async fn new_scenario(
    State(state): State<Arc<AppState>>,
    mut session: UserSession,
) -> impl IntoResponse {
    let next = session_selector::set_random_index(
        &mut session,
        state.scenarios.len(),
        &mut rand::rng(),
    );
    tracing::debug!("Rotated session to scenario {}", next);

    SCENARIO_ROTATIONS_TOTAL.inc();

    (session, Redirect::to("/"))
}

/// POST /submit - Echo the trimmed answers back on the current scenario
pub async fn submit_answers(
    State(state): State<Arc<AppState>>,
    mut session: UserSession,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> impl IntoResponse {
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            tracing::warn!("Unreadable answer form, treating as empty: {}", rejection);
            Vec::new()
        }
    };

    let (index, scenario) = current_scenario(&state, &mut session);
    let answers = SubmittedAnswers::from_form(scenario, &fields);
    tracing::info!(
        "Answers submitted for scenario {} ({} of {} filled)",
        scenario.key,
        answers.iter().filter(|(_, text)| !text.is_empty()).count(),
        answers.len()
    );

    ANSWER_SUBMISSIONS_TOTAL
        .with_label_values(&[scenario.key.as_str()])
        .inc();

    let view = ScenarioView::with_answers(scenario, &answers, index, state.scenarios.len());
    let page = render_page(&view, &state.assets);

    (session, Html(page))
}
