//! Recipes shared across test files.

use stepgraph::config::RecipeFile;
use stepgraph::recipe::RecipeStepGraph;

use crate::builders::{RecipeFileBuilder, StepConfigBuilder};

/// Edges of the nine-step fixture, as (before, after) indices.
pub const NINE_STEP_EDGES: &[(usize, usize)] = &[
    (0, 1),
    (0, 8),
    (1, 2),
    (2, 3),
    (2, 4),
    (3, 5),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 8),
];

/// Step id used for index `i` in the nine-step fixture.
pub fn step_id(i: usize) -> String {
    format!("s{i}")
}

/// Nine steps `s0..s8` wired with [`NINE_STEP_EDGES`]. Steps 3 and 4 can
/// run in parallel; step 8 waits for both 0 and 7.
pub fn nine_step_recipe() -> RecipeFile {
    let texts = [
        "Preheat the oven",
        "Chop the onions",
        "Sweat the onions for 5 minutes",
        "Brown the mince, 8-10 minutes",
        "Boil the pasta for 12 minutes",
        "Combine everything",
        "Top with cheese",
        "Bake for 1 hour",
        "Serve",
    ];

    let mut builder = RecipeFileBuilder::new().with_name("Nine steps");
    for (i, text) in texts.iter().enumerate() {
        let mut step = StepConfigBuilder::new(&step_id(i), text);
        for (before, _) in NINE_STEP_EDGES.iter().filter(|(_, after)| *after == i) {
            step = step.after(&step_id(*before));
        }
        builder = builder.with_step(step.build());
    }
    builder.build()
}

pub fn nine_step_graph() -> RecipeStepGraph {
    RecipeStepGraph::from_recipe(&nine_step_recipe()).expect("fixture recipe is valid")
}

/// Short ribs recipe:
///
/// ```text
/// prep -> sear -> rest -> serve
///         glaze ---------/
/// ```
pub fn ribs_recipe() -> RecipeFile {
    RecipeFileBuilder::new()
        .with_name("Sticky ribs")
        .with_step(StepConfigBuilder::new("prep", "Pat the ribs dry and season").build())
        .with_step(
            StepConfigBuilder::new(
                "sear",
                "cook for about 5 min 40 seconds. Turn ribs and cook until second side is golden brown, 1–2 minutes",
            )
            .after("prep")
            .build(),
        )
        .with_step(
            StepConfigBuilder::new("rest", "Let the ribs rest for 10 seconds")
                .after("sear")
                .build(),
        )
        .with_step(StepConfigBuilder::new("glaze", "Simmer the glaze 3 minutes").build())
        .with_step(
            StepConfigBuilder::new("serve", "Brush with glaze and serve")
                .after("rest")
                .after("glaze")
                .build(),
        )
        .build()
}

pub fn ribs_graph() -> RecipeStepGraph {
    RecipeStepGraph::from_recipe(&ribs_recipe()).expect("fixture recipe is valid")
}
