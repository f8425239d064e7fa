// src/config/model.rs

use serde::Deserialize;

/// Recipe file exactly as deserialized from TOML, before validation.
///
/// ```toml
/// [recipe]
/// name = "Sticky ribs"
///
/// [session]
/// tick_seconds = 1
///
/// [[step]]
/// id = "prep"
/// text = "Season the ribs"
///
/// [[step]]
/// id = "sear"
/// text = "Cook for about 5 min 40 seconds"
/// after = ["prep"]
/// ```
///
/// Every section except `[[step]]` is optional. Use
/// [`RecipeFile::try_from`] to obtain a validated recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecipeFile {
    #[serde(default)]
    pub recipe: RecipeSection,

    #[serde(default)]
    pub session: SessionSection,

    /// Steps in authoring order.
    #[serde(default)]
    pub step: Vec<StepConfig>,
}

/// A recipe that passed validation: unique ids, known dependencies, no
/// cycles. Only constructible through `TryFrom<RawRecipeFile>`.
#[derive(Debug, Clone)]
pub struct RecipeFile {
    recipe: RecipeSection,
    session: SessionSection,
    steps: Vec<StepConfig>,
}

impl RecipeFile {
    pub(crate) fn new_unchecked(
        recipe: RecipeSection,
        session: SessionSection,
        steps: Vec<StepConfig>,
    ) -> Self {
        Self {
            recipe,
            session,
            steps,
        }
    }

    pub fn recipe(&self) -> &RecipeSection {
        &self.recipe
    }

    pub fn session(&self) -> &SessionSection {
        &self.session
    }

    pub fn steps(&self) -> &[StepConfig] {
        &self.steps
    }
}

/// `[recipe]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RecipeSection {
    #[serde(default)]
    pub name: Option<String>,
}

/// `[session]` section: how a cooking session runs.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSection {
    /// Seconds of countdown applied per tick. Must be >= 1.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u32,

    /// Stop the session once every step is completed.
    #[serde(default = "default_exit_when_finished")]
    pub exit_when_finished: bool,
}

fn default_tick_seconds() -> u32 {
    1
}

fn default_exit_when_finished() -> bool {
    true
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            tick_seconds: default_tick_seconds(),
            exit_when_finished: default_exit_when_finished(),
        }
    }
}

/// One `[[step]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    /// Unique key used by `after` lists and session commands.
    pub id: String,

    /// Free-text instruction; durations inside it become timers.
    pub text: String,

    /// Steps that must be completed before this one.
    #[serde(default)]
    pub after: Vec<String>,

    /// Durations (seconds) stored with the step, used instead of re-parsing
    /// when they line up with the text.
    #[serde(default)]
    pub timer_durations: Option<Vec<u32>>,
}
