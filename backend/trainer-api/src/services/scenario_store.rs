use std::collections::HashSet;

use crate::models::{Question, Scenario, ScenarioImage};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("scenario catalog is empty")]
    Empty,
    #[error("duplicate scenario key `{0}`")]
    DuplicateKey(String),
    #[error("scenario `{scenario}` repeats question id `{question}`")]
    DuplicateQuestion { scenario: String, question: String },
}

/// Ordered, read-only list of training scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioStore {
    scenarios: Vec<Scenario>,
}

impl ScenarioStore {
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, CatalogError> {
        if scenarios.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut keys = HashSet::new();
        for scenario in &scenarios {
            if !keys.insert(scenario.key.as_str()) {
                return Err(CatalogError::DuplicateKey(scenario.key.clone()));
            }

            let mut ids = HashSet::new();
            for id in scenario.question_ids() {
                if !ids.insert(id) {
                    return Err(CatalogError::DuplicateQuestion {
                        scenario: scenario.key.clone(),
                        question: id.to_string(),
                    });
                }
            }
        }

        Ok(Self { scenarios })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin_scenarios())
    }

    pub fn all(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn get(&self, index: usize) -> Option<&Scenario> {
        self.scenarios.get(index)
    }

    /// Scenario at `index`, or the first one when out of range.
    pub fn get_or_first(&self, index: usize) -> &Scenario {
        self.scenarios
            .get(index)
            .unwrap_or_else(|| &self.scenarios[0])
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            key: "residential-bravo-smoke".to_string(),
            title: "Residential Fire - Bravo Side Smoke Showing".to_string(),
            dispatch: "0200 hours. Single-story residential. Neighbors report smoke showing. \
                       Wind 10 mph from the west. First-due engine staffed with 3."
                .to_string(),
            image: ScenarioImage {
                base: "images/house1.jpg".to_string(),
                overlay: None,
            },
            questions: vec![
                Question::new(
                    "q1",
                    "After performing a 3-sided search by pulling up to and past the house, \
                     you notice smoke/fire conditions on the Alpha/Bravo/Charlie/Delta side. \
                     Give your scene size-up and plan of action.",
                ),
                Question::new(
                    "q2",
                    "You pull an attack line of 200 ft of 1¾-inch with a low-pressure smooth bore nozzle. \
                     What is your PDP to obtain correct pressure at the nozzle?",
                ),
                Question::new(
                    "q3",
                    "Given the area of the home, approximately how much GPM should be needed to extinguish the fire?",
                ),
                Question::new(
                    "q4",
                    "The attack mode turns defensive. You pull a blitz line of 100 ft of 3-inch to protect the exposure \
                     on the Delta side. What would your PDP be to supply both the blitz and attack line?",
                ),
            ],
        },
        Scenario {
            key: "two-story-trapped".to_string(),
            title: "Two-Story Residential - Possible Victims Trapped".to_string(),
            dispatch: "1730 hours. Two-story residential. Caller reports smoke alarms and someone possibly still inside. \
                       Light smoke from the Alpha side. Engine staffed with 4."
                .to_string(),
            image: ScenarioImage {
                base: "images/house2.jpg".to_string(),
                overlay: None,
            },
            questions: vec![
                Question::new(
                    "q1",
                    "Give your size-up (construction, occupancy, fire location cues, life hazard) and first 5 minutes plan.",
                ),
                Question::new(
                    "q2",
                    "Where would you place the first ladder and why? Window base vs offset, and what you’re setting up for.",
                ),
                Question::new(
                    "q3",
                    "Describe how you would control the flow path while still making progress on search and attack.",
                ),
                Question::new(
                    "q4",
                    "What are your early Mayday warning signs on interior crews, and what triggers RIT deployment in your plan?",
                ),
            ],
        },
        Scenario {
            key: "attic-wind-driven".to_string(),
            title: "Attic Involvement - Wind-Influenced Fire".to_string(),
            dispatch: "2315 hours. Single-story residential. Smoke pushing from eaves on the Charlie/Delta corner. \
                       Wind gusts 15–20 mph. First-due engine staffed with 3."
                .to_string(),
            image: ScenarioImage {
                base: "images/house3.jpg".to_string(),
                overlay: None,
            },
            questions: vec![
                Question::new(
                    "q1",
                    "What indicators suggest attic involvement, and how does that change your initial line placement?",
                ),
                Question::new(
                    "q2",
                    "Walk through ventilation choice/timing (horizontal vs vertical) and how you prevent making things worse.",
                ),
                Question::new(
                    "q3",
                    "When do you call for additional resources (truck/second alarm) and what’s your reasoning?",
                ),
                Question::new(
                    "q4",
                    "If a civilian is removed with suspected smoke inhalation, what’s your immediate EMS plan \
                     (airway, oxygen, CO/cyanide considerations)?",
                ),
            ],
        },
    ]
}
