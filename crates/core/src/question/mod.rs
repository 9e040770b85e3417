//! Normalisation of practice-item payloads into something renderable.

mod extract;
mod fill_missing;
mod lookup;

pub use extract::{
    AnswerOption, AnswerResult, PROMPT_FALLBACK, PromptText, extract_expected_answer,
    extract_options, extract_prompt_text, normalize_answer_result,
};
pub use fill_missing::{FillMissingConfig, FillMissingError, fill_missing_config, normalize_slot};

use crate::model::{Item, QuestionType};

/// Which input the runner shows for an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerInput {
    /// One text box per blank in the masked term.
    FillMissing,
    /// A button per option.
    Choices,
    /// Free-text input.
    Text,
}

/// Everything the runner needs to render and grade one item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionView {
    pub question_type: QuestionType,
    pub prompt: PromptText,
    pub options: Vec<AnswerOption>,
    pub fill_missing: Option<FillMissingConfig>,
    /// Expected answer from the item fields, falling back to the payload.
    pub expected: Option<String>,
}

impl QuestionView {
    #[must_use]
    pub fn build(item: &Item) -> Self {
        let question_type = item.question_type();
        let payload = item.payload();
        let options = extract_options(payload, &question_type);
        let fill_missing = fill_missing_config(payload, &question_type);
        let expected = item
            .expected_from_item()
            .or_else(|| extract_expected_answer(payload, &question_type, &options));

        Self {
            prompt: extract_prompt_text(payload),
            question_type,
            options,
            fill_missing,
            expected,
        }
    }

    #[must_use]
    pub fn input(&self) -> AnswerInput {
        if self.fill_missing.is_some() {
            AnswerInput::FillMissing
        } else if self.options.is_empty() {
            AnswerInput::Text
        } else {
            AnswerInput::Choices
        }
    }

    /// Label of the option whose value is `value`.
    #[must_use]
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }

    /// Expected answer to show after a wrong answer.
    ///
    /// Prefers what the grading response reported, then the item, then the
    /// payload. Option values are shown by their label.
    #[must_use]
    pub fn expected_display(&self, reported: Option<&str>) -> Option<String> {
        let raw = reported
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .or_else(|| self.expected.clone())?;

        let label = self
            .option_label(&raw)
            .or_else(|| {
                self.options
                    .iter()
                    .find(|option| option.label == raw)
                    .map(|option| option.label.as_str())
            })
            .map(str::to_string);

        Some(label.unwrap_or(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_fill_missing_view() {
        let item = Item::new(
            "i1",
            QuestionType::FillMissingChars,
            json!({"maskedTerm": "c_t", "definition": "A small pet", "term": "cat"}),
        );

        let view = QuestionView::build(&item);
        assert_eq!(view.input(), AnswerInput::FillMissing);
        assert_eq!(view.prompt.text, "A small pet");
        assert_eq!(view.expected.as_deref(), Some("cat"));
    }

    #[test]
    fn fill_missing_without_mask_falls_back_to_text() {
        let item = Item::new("i1", QuestionType::FillMissingChars, json!({"prompt": "Spell it"}));
        assert_eq!(QuestionView::build(&item).input(), AnswerInput::Text);
    }

    #[test]
    fn unknown_type_renders_free_text_with_prompt() {
        let item = Item::new("i1", QuestionType::parse("TYPING"), json!({"weird": [1, 2]}));
        let view = QuestionView::build(&item);

        assert_eq!(view.input(), AnswerInput::Text);
        assert!(!view.prompt.text.is_empty());
        assert!(!view.prompt.recognised);
    }

    #[test]
    fn expected_display_maps_values_to_labels() {
        let item = Item::new(
            "i1",
            QuestionType::MultipleChoice,
            json!({"question": "Pick", "options": [{"label": "Cat", "value": "c"}, {"label": "Dog", "value": "d"}], "correctOption": "c"}),
        );
        let view = QuestionView::build(&item);

        assert_eq!(view.expected_display(None).as_deref(), Some("Cat"));
        assert_eq!(view.expected_display(Some("d")).as_deref(), Some("Dog"));
        assert_eq!(view.expected_display(Some("Dog")).as_deref(), Some("Dog"));
        assert_eq!(view.expected_display(Some("fish")).as_deref(), Some("fish"));
    }

    #[test]
    fn true_false_expected_shows_label() {
        let item = Item::new("i1", QuestionType::TrueFalse, json!({"statement": "x", "correct": true}));
        let view = QuestionView::build(&item);
        assert_eq!(view.input(), AnswerInput::Choices);
        assert_eq!(view.expected_display(None).as_deref(), Some("True"));
    }
}
