use serde::Serialize;

/// One placeable piece on the tactical board.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TokenTool {
    /// Stored with each placed token; must stay stable across releases.
    pub kind: &'static str,
    pub label: &'static str,
    /// Path relative to the static asset root.
    pub image: &'static str,
}

pub const TOKEN_PALETTE: &[TokenTool] = &[
    TokenTool {
        kind: "engine",
        label: "Engine",
        image: "tokens/engine.svg",
    },
    TokenTool {
        kind: "ladder",
        label: "Ladder",
        image: "tokens/ladder.svg",
    },
    TokenTool {
        kind: "rescue",
        label: "Rescue",
        image: "tokens/rescue.svg",
    },
    TokenTool {
        kind: "battalion",
        label: "Command",
        image: "tokens/battalion.svg",
    },
    TokenTool {
        kind: "ems",
        label: "EMS",
        image: "tokens/ems.svg",
    },
    TokenTool {
        kind: "attack-line",
        label: "Attack line",
        image: "tokens/attack-line.svg",
    },
    TokenTool {
        kind: "supply-line",
        label: "Supply line",
        image: "tokens/supply-line.svg",
    },
    TokenTool {
        kind: "hydrant",
        label: "Hydrant",
        image: "tokens/hydrant.svg",
    },
];
