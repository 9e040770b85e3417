use api::InMemoryPracticeApi;
use serde_json::json;
use services::{AnswerInput, Clock, PracticeLoopService, SubmitOutcome};
use vocab_core::fixed_now;
use vocab_core::model::{Item, ItemStatus, QuestionType, Session, SessionStatus};
use vocab_core::score::SessionScore;

fn daily_session() -> Session {
    Session::new(
        "daily-1",
        vec![
            Item::new(
                "q1",
                QuestionType::MultipleChoice,
                json!({"question": "Which animal purrs?", "options": ["cat", "dog"], "expected": "cat"}),
            ),
            Item::new(
                "q2",
                QuestionType::FillMissingChars,
                json!({"maskedTerm": "d_g", "term": "dog"}),
            ),
        ],
    )
}

#[tokio::test]
async fn daily_session_runs_to_completion() {
    let api = InMemoryPracticeApi::new().with_session(daily_session());
    let service = PracticeLoopService::new(Clock::fixed(fixed_now()));

    let session = service.start_daily(&api).await.unwrap();
    let id = session.id.clone();
    assert_eq!(service.store().len(), 1);

    let report = service
        .submit(&api, &id, &"q1".into(), AnswerInput::Text("cat".into()))
        .await
        .unwrap();
    assert_eq!(report.outcome, SubmitOutcome::Advanced(1));

    let report = service
        .submit(&api, &id, &"q2".into(), AnswerInput::Slots(vec!["o".into()]))
        .await
        .unwrap();
    assert_eq!(report.outcome, SubmitOutcome::Finished);
    assert!(
        report
            .runner
            .items()
            .iter()
            .all(|state| state.status() == ItemStatus::Correct)
    );

    let runner = service.complete(&api, &id).await.unwrap();
    assert_eq!(runner.session().status(), SessionStatus::Completed);
    assert!(service.store().is_empty());
    let score = SessionScore::from_session(runner.session()).unwrap();
    assert!(score.to_string().contains("Correct: 2/2"));

    let answers: Vec<String> = api
        .answers()
        .into_iter()
        .map(|recorded| recorded.submission.answer)
        .collect();
    assert_eq!(answers, ["cat", "dog"]);
}
