use rand::Rng;
use serde_json::json;

use crate::{metrics::SESSION_INDEX_RESETS_TOTAL, session::Session};

pub const SCENARIO_INDEX_KEY: &str = "scenario_idx";

/// Returns the session's scenario index, or resets it to 0 when it is absent
/// or not an integer inside `[0, count)`.
pub fn current_index(session: &mut Session, count: usize) -> usize {
    if let Some(index) = stored_index(session, count) {
        return index;
    }

    if let Some(raw) = session.get(SCENARIO_INDEX_KEY) {
        tracing::debug!("Resetting invalid scenario index {} to 0", raw);
        SESSION_INDEX_RESETS_TOTAL.inc();
    }
    session.insert(SCENARIO_INDEX_KEY, json!(0));
    0
}

/// Moves the session to a random scenario other than the current one.
pub fn set_random_index<R: Rng>(session: &mut Session, count: usize, rng: &mut R) -> usize {
    let current = current_index(session, count);
    let next = pick_excluding(count, Some(current), rng);

    session.insert(SCENARIO_INDEX_KEY, json!(next));
    next
}

/// Uniform pick in `[0, count)` skipping `excluded`.
///
/// With a single slot (or none) the answer is always 0. An `excluded` value
/// outside the range excludes nothing.
pub fn pick_excluding<R: Rng>(count: usize, excluded: Option<usize>, rng: &mut R) -> usize {
    if count <= 1 {
        return 0;
    }

    match excluded.filter(|&index| index < count) {
        Some(skip) => {
            let pick = rng.random_range(0..count - 1);
            if pick >= skip {
                pick + 1
            } else {
                pick
            }
        }
        None => rng.random_range(0..count),
    }
}

fn stored_index(session: &Session, count: usize) -> Option<usize> {
    session
        .get(SCENARIO_INDEX_KEY)?
        .as_u64()
        .and_then(|value| usize::try_from(value).ok())
        .filter(|&index| index < count)
}
