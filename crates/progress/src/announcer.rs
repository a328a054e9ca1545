//! Prompt construction.

use turnstep_core::{DistanceUnit, Lookahead, NavigationConfig, Prompt, RouteStep};

/// Turns route steps into spoken prompts.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    unit: DistanceUnit,
    lookahead: Lookahead,
    arrival_message: String,
}

impl PromptBuilder {
    /// Create a builder for the given unit and lookahead policy.
    pub fn new(unit: DistanceUnit, lookahead: Lookahead) -> Self {
        Self {
            unit,
            lookahead,
            arrival_message: turnstep_core::DEFAULT_ARRIVAL_MESSAGE.to_string(),
        }
    }

    /// Create a builder from navigation config.
    pub fn from_config(config: &NavigationConfig) -> Self {
        Self {
            unit: config.unit,
            lookahead: config.lookahead,
            arrival_message: config.arrival_message.clone(),
        }
    }

    /// Prompt for a single step, e.g. `In 500 meters, Turn right.`
    pub fn step_prompt(&self, index: usize, step: &RouteStep) -> Prompt {
        Prompt::new(index, format!("{}.", self.clause(step)))
    }

    /// One prompt per step, in step order.
    pub fn queue(&self, steps: &[RouteStep]) -> Vec<Prompt> {
        steps
            .iter()
            .enumerate()
            .map(|(i, step)| self.step_prompt(i, step))
            .collect()
    }

    /// Opening announcement, spoken before any geofence fires.
    ///
    /// Covers the first step, and the second too under `Lookahead::Double`.
    /// Returns `None` for an empty route.
    pub fn initial_announcement(&self, steps: &[RouteStep]) -> Option<Prompt> {
        let first = steps.first()?;
        let mut text = self.clause(first);

        if self.lookahead.steps() > 1 {
            if let Some(second) = steps.get(1) {
                text.push_str(", then ");
                text.push_str(&lowercase_first(&self.clause(second)));
            }
        }

        text.push('.');
        Some(Prompt::new(0, text))
    }

    /// Phrase spoken on arrival.
    pub fn arrival(&self) -> &str {
        &self.arrival_message
    }

    fn clause(&self, step: &RouteStep) -> String {
        let instruction = step
            .instruction
            .trim()
            .trim_end_matches(['.', '!', ';', ','].as_slice());
        let instruction = if instruction.is_empty() { "continue" } else { instruction };
        format!("In {}, {}", self.unit.format(step.distance_meters), instruction)
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::from_config(&NavigationConfig::default())
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnstep_core::Coordinate;

    fn step(distance: f64, instruction: &str) -> RouteStep {
        RouteStep::new(distance, instruction, Coordinate::new(0.0, 0.0).unwrap())
    }

    fn sample_steps() -> Vec<RouteStep> {
        vec![
            step(500.0, "Turn right"),
            step(1000.0, "Turn left"),
            step(0.0, "Arrive"),
        ]
    }

    #[test]
    fn test_step_prompt_meters() {
        let builder = PromptBuilder::new(DistanceUnit::Meters, Lookahead::Single);
        let prompt = builder.step_prompt(1, &step(1000.0, "Turn left"));
        assert_eq!(prompt.step_index, 1);
        assert_eq!(prompt.text, "In 1000 meters, Turn left.");
    }

    #[test]
    fn test_step_prompt_miles() {
        let builder = PromptBuilder::new(DistanceUnit::Miles, Lookahead::Single);
        let prompt = builder.step_prompt(0, &step(500.0, "Turn right onto Market St"));
        assert_eq!(prompt.text, "In 0.31 miles, Turn right onto Market St.");
    }

    #[test]
    fn test_trailing_punctuation_not_doubled() {
        let builder = PromptBuilder::default();
        assert_eq!(builder.step_prompt(0, &step(0.0, "Arrive.")).text, "In 0 meters, Arrive.");
        assert_eq!(builder.step_prompt(0, &step(20.0, "  ")).text, "In 20 meters, continue.");
    }

    #[test]
    fn test_queue_has_one_prompt_per_step() {
        let builder = PromptBuilder::default();
        let queue = builder.queue(&sample_steps());
        assert_eq!(queue.len(), 3);
        assert_eq!(queue[2].step_index, 2);
        assert_eq!(queue[2].text, "In 0 meters, Arrive.");
    }

    #[test]
    fn test_initial_announcement_double() {
        let builder = PromptBuilder::new(DistanceUnit::Meters, Lookahead::Double);
        let prompt = builder.initial_announcement(&sample_steps()).unwrap();
        assert_eq!(
            prompt.text,
            "In 500 meters, Turn right, then in 1000 meters, Turn left."
        );
    }

    #[test]
    fn test_initial_announcement_single_or_short_route() {
        let single = PromptBuilder::new(DistanceUnit::Meters, Lookahead::Single);
        assert_eq!(
            single.initial_announcement(&sample_steps()).unwrap().text,
            "In 500 meters, Turn right."
        );

        let double = PromptBuilder::new(DistanceUnit::Meters, Lookahead::Double);
        assert_eq!(
            double.initial_announcement(&sample_steps()[..1]).unwrap().text,
            "In 500 meters, Turn right."
        );
        assert!(double.initial_announcement(&[]).is_none());
    }

    #[test]
    fn test_arrival_phrase_from_config() {
        let config = NavigationConfig::default().with_arrival_message("You have arrived.");
        assert_eq!(PromptBuilder::from_config(&config).arrival(), "You have arrived.");
        assert_eq!(PromptBuilder::default().arrival(), "Arrived at destination.");
    }
}
