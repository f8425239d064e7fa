#![allow(dead_code)]

use stepgraph::config::{RawRecipeFile, RecipeFile, RecipeSection, SessionSection, StepConfig};
use stepgraph::errors::Result;

/// Builder for `RecipeFile` to simplify test setup.
pub struct RecipeFileBuilder {
    recipe: RawRecipeFile,
}

impl RecipeFileBuilder {
    pub fn new() -> Self {
        Self {
            recipe: RawRecipeFile {
                recipe: RecipeSection::default(),
                session: SessionSection::default(),
                step: vec![],
            },
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.recipe.recipe.name = Some(name.to_string());
        self
    }

    pub fn with_step(mut self, step: StepConfig) -> Self {
        self.recipe.step.push(step);
        self
    }

    pub fn with_tick_seconds(mut self, secs: u32) -> Self {
        self.recipe.session.tick_seconds = secs;
        self
    }

    pub fn with_exit_when_finished(mut self, val: bool) -> Self {
        self.recipe.session.exit_when_finished = val;
        self
    }

    /// The unvalidated file, for tests that exercise validation itself.
    pub fn raw(self) -> RawRecipeFile {
        self.recipe
    }

    pub fn try_build(self) -> Result<RecipeFile> {
        RecipeFile::try_from(self.recipe)
    }

    pub fn build(self) -> RecipeFile {
        self.try_build()
            .expect("Failed to build valid recipe from builder")
    }
}

impl Default for RecipeFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `StepConfig`.
pub struct StepConfigBuilder {
    step: StepConfig,
}

impl StepConfigBuilder {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            step: StepConfig {
                id: id.to_string(),
                text: text.to_string(),
                after: vec![],
                timer_durations: None,
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.step.after.push(dep.to_string());
        self
    }

    pub fn timer_durations(mut self, durations: Vec<u32>) -> Self {
        self.step.timer_durations = Some(durations);
        self
    }

    pub fn build(self) -> StepConfig {
        self.step
    }
}
