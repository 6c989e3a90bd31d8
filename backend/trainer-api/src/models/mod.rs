pub mod answer;
pub mod board;
pub mod scenario;

pub use answer::SubmittedAnswers;
pub use board::{TokenTool, TOKEN_PALETTE};
pub use scenario::{Question, Scenario, ScenarioImage};
