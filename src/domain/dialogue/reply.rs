//! Bot replies and the texts that make them up.

use std::num::NonZeroU64;

use super::state::{Flow, Step};
use crate::domain::strength::{StrengthCalculator, Weight, ACCURATE_MAX_REPS, ACCURATE_MAX_SETS};
use crate::domain::vocabulary;

/// How the transport should render the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    /// Telegram legacy Markdown (`*bold*`, `_italic_`).
    Markdown,
}

/// A message to send back, optionally with a one-time button menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub format: TextFormat,
    /// Button labels shown in a single row, hidden after one use.
    pub buttons: Option<Vec<String>>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
            buttons: None,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Markdown,
            buttons: None,
        }
    }

    pub fn with_buttons<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buttons = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}

/// Shown whenever the bot cannot make sense of a message.
const NOT_UNDERSTOOD: &str = "I did not understand.";

/// Rendered instead of a number when the formula is undefined.
pub const UNDEFINED_RESULT: &str = "ambulance";

pub fn menu() -> Reply {
    Reply::markdown(
        "Hi, I can help you calculate your *one-rep max* or *rep weight*.\n\
         Please select an option.",
    )
    .with_buttons(vocabulary::option_labels())
}

pub fn menu_retry() -> Reply {
    Reply::plain(format!("{} Please select an option.", NOT_UNDERSTOOD))
        .with_buttons(vocabulary::option_labels())
}

/// The question asked on entering `step`.
pub fn prompt(flow: Flow, step: Step) -> Reply {
    match step {
        Step::Weight => Reply::plain(match flow {
            Flow::OneRepMax => "Enter the lifted weight",
            Flow::TargetWeight => "Enter your one-rep max",
        }),
        Step::Reps => Reply::plain("Enter the number of reps"),
        Step::Sets => Reply::plain("Enter the number of sets"),
        Step::Exercise => {
            Reply::plain("Select the exercise").with_buttons(vocabulary::exercise_labels())
        }
    }
}

/// The correction sent when the answer to `step` is not acceptable.
pub fn retry(flow: Flow, step: Step) -> Reply {
    match step {
        Step::Weight => Reply::plain(format!(
            "{}\nPlease enter {} (a positive number)",
            NOT_UNDERSTOOD,
            match flow {
                Flow::OneRepMax => "the lifted weight",
                Flow::TargetWeight => "your one-rep max",
            }
        )),
        Step::Reps => Reply::plain(format!(
            "{}\nPlease enter the number of reps (a natural number)",
            NOT_UNDERSTOOD
        )),
        Step::Sets => Reply::plain(format!(
            "{}\nPlease enter the number of sets (a natural number)",
            NOT_UNDERSTOOD
        )),
        Step::Exercise => Reply::plain(format!("{}\nPlease select the exercise.", NOT_UNDERSTOOD))
            .with_buttons(vocabulary::exercise_labels()),
    }
}

/// Inputs echoed back in a summary.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInputs<'a> {
    pub load: Weight,
    pub reps: NonZeroU64,
    pub sets: NonZeroU64,
    pub exercise_label: &'a str,
}

/// The final message of a flow.
pub fn summary(flow: Flow, inputs: &SummaryInputs<'_>, result: Option<f64>) -> Reply {
    let (load_label, result_label) = match flow {
        Flow::OneRepMax => ("Weight lifted", "Your one-rep max"),
        Flow::TargetWeight => ("One-rep max", "Your rep weight"),
    };

    let mut text = format!("_{}: {}_\n", load_label, inputs.load);
    text.push_str(&format!("_Reps: {}_\n", inputs.reps));
    text.push_str(&format!("_Sets: {}_\n", inputs.sets));
    text.push_str(&format!("_Exercise: {}_\n\n", inputs.exercise_label));

    match result {
        Some(value) => text.push_str(&format!("*{}: {}*", result_label, whole_units(value))),
        None => text.push_str(&format!("*{}: {}*", result_label, UNDEFINED_RESULT)),
    }

    if StrengthCalculator::needs_accuracy_caveat(inputs.reps, inputs.sets) {
        text.push_str(&format!(
            "\n\n_Note: the estimate is less accurate above {} reps or {} sets._",
            ACCURATE_MAX_REPS, ACCURATE_MAX_SETS
        ));
    }

    Reply::markdown(text).with_buttons(vocabulary::restart_phrases().iter().copied())
}

pub fn help() -> Reply {
    Reply::markdown(format!(
        "I estimate your *one-rep max* from a weight you lifted for several sets and reps, \
         or the *rep weight* to use for a scheme given your one-rep max.\n\n\
         Send {} to begin, then answer the questions. \
         Send {} or press \"{}\" at any time to start over.\n\n\
         Estimates are most reliable up to {} reps and {} sets.",
        vocabulary::START_COMMAND,
        vocabulary::START_COMMAND,
        vocabulary::restart_phrases().first().copied().unwrap_or(vocabulary::START_COMMAND),
        ACCURATE_MAX_REPS,
        ACCURATE_MAX_SETS,
    ))
}

/// Sent when the bot hit an internal problem with this user's session.
pub fn failure() -> Reply {
    Reply::plain(format!(
        "Sorry, something went wrong on my side. Send {} to begin again.",
        vocabulary::START_COMMAND
    ))
}

/// Results are reported in whole units, dropping the fraction.
fn whole_units(value: f64) -> i64 {
    value.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(value: u64) -> NonZeroU64 {
        NonZeroU64::new(value).unwrap()
    }

    fn inputs(reps: u64, sets: u64) -> SummaryInputs<'static> {
        SummaryInputs {
            load: Weight::new(60.0).unwrap(),
            reps: n(reps),
            sets: n(sets),
            exercise_label: "Bench press",
        }
    }

    #[test]
    fn menu_offers_both_flows() {
        let reply = menu();
        assert_eq!(reply.format, TextFormat::Markdown);
        assert_eq!(
            reply.buttons,
            Some(vec![
                "Calculate one-rep max".to_string(),
                "Calculate rep weight".to_string()
            ])
        );
    }

    #[test]
    fn exercise_prompt_and_retry_offer_exercises() {
        let expected = Some(vec!["Bench press".to_string(), "Squat or deadlift".to_string()]);
        assert_eq!(prompt(Flow::OneRepMax, Step::Exercise).buttons, expected);
        assert_eq!(retry(Flow::TargetWeight, Step::Exercise).buttons, expected);
    }

    #[test]
    fn weight_prompts_differ_by_flow() {
        assert_eq!(prompt(Flow::OneRepMax, Step::Weight).text, "Enter the lifted weight");
        assert_eq!(prompt(Flow::TargetWeight, Step::Weight).text, "Enter your one-rep max");
    }

    #[test]
    fn summary_echoes_inputs_and_truncates_result() {
        let reply = summary(Flow::OneRepMax, &inputs(6, 5), Some(75.58));
        assert_eq!(
            reply.text,
            "_Weight lifted: 60_\n_Reps: 6_\n_Sets: 5_\n_Exercise: Bench press_\n\n\
             *Your one-rep max: 75*"
        );
        assert_eq!(reply.buttons, Some(vec!["Calculate again".to_string()]));
    }

    #[test]
    fn summary_renders_undefined_result() {
        let reply = summary(Flow::TargetWeight, &inputs(6, 5), None);
        assert!(reply.text.starts_with("_One-rep max: 60_"));
        assert!(reply.text.contains("*Your rep weight: ambulance*"));
    }

    #[test]
    fn summary_adds_caveat_past_thresholds() {
        assert!(summary(Flow::OneRepMax, &inputs(9, 1), Some(1.0)).text.contains("Note:"));
        assert!(summary(Flow::OneRepMax, &inputs(1, 6), Some(1.0)).text.contains("Note:"));
        assert!(!summary(Flow::OneRepMax, &inputs(8, 5), Some(1.0)).text.contains("Note:"));
    }

    #[test]
    fn help_mentions_start_command() {
        assert!(help().text.contains("/start"));
    }
}
