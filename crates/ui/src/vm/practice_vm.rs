use services::{ItemState, PracticeRunner};
use vocab_core::model::{ItemStatus, QuestionType, Session};
use vocab_core::question::AnswerInput;
use vocab_core::score::SessionScore;

use crate::vm::time_fmt::format_timestamp;

/// One numbered pill of the item strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemPillVm {
    pub index: usize,
    pub number: usize,
    pub tone: &'static str,
    pub current: bool,
}

/// One character of a masked term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FillCellVm {
    Fixed(char),
    Slot { slot: usize, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub letter: char,
    pub label: String,
    pub value: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputVm {
    Fill(Vec<FillCellVm>),
    /// Lettered radio buttons for multiple choice, plain buttons otherwise.
    Choices { options: Vec<ChoiceVm>, lettered: bool },
    Text { value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub item_id: String,
    pub index: usize,
    pub heading: String,
    pub status_label: String,
    pub status_tone: &'static str,
    pub prompt: String,
    pub prompt_recognised: bool,
    pub input: InputVm,
    pub answered: bool,
    pub loading: bool,
    pub message: Option<String>,
    pub expected: Option<String>,
    pub payload_debug: String,
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeVm {
    pub session_id: String,
    pub title: String,
    pub status_label: String,
    pub active: bool,
    pub total: usize,
    pub answered: usize,
    pub score_line: Option<String>,
    pub error: Option<String>,
    pub pills: Vec<ItemPillVm>,
    pub current: Option<QuestionVm>,
}

fn status_label(state: &ItemState) -> String {
    match state.result().and_then(|result| result.status.as_deref()) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().to_uppercase(),
        _ => state
            .item()
            .raw_status()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map_or_else(|| ItemStatus::Pending.as_str().to_string(), str::to_uppercase),
    }
}

fn input_vm(state: &ItemState) -> InputVm {
    let view = state.view();
    match (view.input(), &view.fill_missing) {
        (AnswerInput::FillMissing, Some(config)) => {
            let values = state.fill_values();
            let cells = config
                .masked_term()
                .chars()
                .enumerate()
                .map(|(index, ch)| match config.slot_of(index) {
                    Some(slot) => FillCellVm::Slot {
                        slot,
                        value: values.get(slot).cloned().unwrap_or_default(),
                    },
                    None => FillCellVm::Fixed(ch),
                })
                .collect();
            InputVm::Fill(cells)
        }
        (AnswerInput::Choices, _) => {
            let chosen = state.answer_text();
            let options = view
                .options
                .iter()
                .zip('A'..='Z')
                .map(|(option, letter)| ChoiceVm {
                    letter,
                    label: option.label.clone(),
                    value: option.value.clone(),
                    selected: option.value == chosen,
                })
                .collect();
            InputVm::Choices {
                options,
                lettered: view.question_type == QuestionType::MultipleChoice,
            }
        }
        _ => InputVm::Text {
            value: state.answer_text(),
        },
    }
}

fn question_vm(runner: &PracticeRunner, index: usize, state: &ItemState) -> QuestionVm {
    let view = state.view();
    let status = state.status();
    let last = runner.items().len().saturating_sub(1);
    QuestionVm {
        item_id: state.item().id.to_string(),
        index,
        heading: format!("Question {}: {}", index + 1, view.question_type.label()),
        status_label: status_label(state),
        status_tone: status.tone(),
        prompt: view.prompt.text.clone(),
        prompt_recognised: view.prompt.recognised,
        input: input_vm(state),
        answered: status.is_answered(),
        loading: runner.is_loading(),
        message: state.message().map(str::to_string),
        expected: state.expected_display(),
        payload_debug: serde_json::to_string_pretty(state.item().payload())
            .unwrap_or_else(|_| state.item().payload().to_string()),
        previous: index.checked_sub(1),
        next: (index < last).then_some(index + 1),
    }
}

#[must_use]
pub fn map_practice(runner: &PracticeRunner) -> PracticeVm {
    let session = runner.session();
    let current_index = runner.current_index();
    let pills = runner
        .items()
        .iter()
        .enumerate()
        .map(|(index, state)| ItemPillVm {
            index,
            number: index + 1,
            tone: state.status().tone(),
            current: index == current_index,
        })
        .collect();

    PracticeVm {
        session_id: session.id.to_string(),
        title: session.title(),
        status_label: session.status().label().to_string(),
        active: session.is_active(),
        total: runner.items().len(),
        answered: runner.answered_count(),
        score_line: SessionScore::from_session(session).map(|score| score.to_string()),
        error: runner.error().map(str::to_string),
        pills,
        current: runner
            .current()
            .map(|state| question_vm(runner, current_index, state)),
    }
}

/// Row of the recent-sessions list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentSessionVm {
    pub id: String,
    pub href: String,
    pub title: String,
    pub status_label: String,
    pub progress_label: String,
    pub score_line: Option<String>,
    pub started_at: String,
}

#[must_use]
pub fn map_recent_session(session: &Session) -> RecentSessionVm {
    let id = session.id.to_string();
    RecentSessionVm {
        href: format!("/dashboard/practice/{}", urlencoding::encode(&id)),
        title: session.title(),
        status_label: session.status().label().to_string(),
        progress_label: format!(
            "{}/{} answered",
            session.answered_count(),
            session.items().len()
        ),
        score_line: SessionScore::from_session(session).map(|score| score.to_string()),
        started_at: format_timestamp(
            session
                .started_at
                .as_deref()
                .or(session.created_at.as_deref()),
        ),
        id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use services::AnswerInput as Submitted;
    use vocab_core::fixed_clock;
    use vocab_core::model::Item;

    fn runner() -> PracticeRunner {
        let session = Session::new(
            "s1",
            vec![
                Item::new(
                    "i1",
                    QuestionType::MultipleChoice,
                    json!({"question": "Pick the animal", "options": ["cat", "car"], "correctIndex": 0}),
                ),
                Item::new("i2", QuestionType::FillMissingChars, json!({"maskedTerm": "c_t"})),
            ],
        );
        PracticeRunner::new(session, &fixed_clock())
    }

    #[test]
    fn maps_choices_with_letters() {
        let vm = map_practice(&runner());
        let current = vm.current.unwrap();
        assert_eq!(current.heading, "Question 1: MULTIPLE_CHOICE");
        assert_eq!(current.status_label, "PENDING");
        assert_eq!(current.next, Some(1));
        assert_eq!(current.previous, None);
        let InputVm::Choices { options, lettered } = current.input else {
            panic!("expected choices");
        };
        assert!(lettered);
        assert_eq!(options[1].letter, 'B');
        assert_eq!(options[1].label, "car");
        assert!(vm.pills[0].current);
    }

    #[test]
    fn maps_fill_cells_and_wrong_answer_expected() {
        let clock = fixed_clock();
        let mut runner = runner();
        runner
            .begin_submit(&"i1".into(), Submitted::Text("car".into()), &clock)
            .unwrap();
        runner.finish_submit(
            &"i1".into(),
            Ok(vocab_core::question::AnswerResult {
                status: Some("wrong".into()),
                message: Some("Not quite.".into()),
                expected: None,
            }),
            &clock,
        );
        runner.go_to(0, &clock);

        let vm = map_practice(&runner);
        let first = vm.current.clone().unwrap();
        assert_eq!(first.status_label, "WRONG");
        assert_eq!(first.expected.as_deref(), Some("cat"));
        assert_eq!(first.message.as_deref(), Some("Not quite."));
        assert_eq!(vm.pills[0].tone, "wrong");
        assert_eq!(vm.answered, 1);

        runner.go_to(1, &clock);
        let second = map_practice(&runner).current.unwrap();
        assert_eq!(
            second.input,
            InputVm::Fill(vec![
                FillCellVm::Fixed('c'),
                FillCellVm::Slot {
                    slot: 0,
                    value: String::new()
                },
                FillCellVm::Fixed('t'),
            ])
        );
    }

    #[test]
    fn recent_session_row() {
        let mut session = Session::new("s 1", vec![Item::default().with_status("CORRECT")]);
        session.started_at = Some("2024-05-01T10:00:00Z".into());
        let row = map_recent_session(&session);
        assert_eq!(row.href, "/dashboard/practice/s%201");
        assert_eq!(row.progress_label, "1/1 answered");
        assert_eq!(row.started_at, "2024-05-01 10:00");
        assert_eq!(row.title, "Practice session");
    }
}
