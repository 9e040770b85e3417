use api::ImportResult;
use serde_json::json;
use services::{PracticeRunner, import};
use vocab_core::fixed_clock;
use vocab_core::model::{
    ContributionDetail, ContributionQueueItem, Item, ListQuery, Page, PageRequest, QuestionType,
    Role, Session, UserProfile, Vocabulary,
};

use super::*;
use crate::render_page;
use crate::vm::map_practice;

fn learner() -> UserProfile {
    UserProfile {
        id: "u1".into(),
        email: Some("ana@example.com".into()),
        display_name: Some("Ana".into()),
        role: Some(Role::User),
        daily_goal: Some(10),
        ..UserProfile::default()
    }
}

fn admin() -> UserProfile {
    UserProfile {
        role: Some(Role::Admin),
        display_name: Some("Root".into()),
        ..learner()
    }
}

fn page_of<T>(content: Vec<T>) -> Page<T> {
    let total = content.len() as u64;
    Page {
        content,
        total_elements: total,
        total_pages: 1,
        number: 0,
        size: 20,
    }
}

fn query() -> ListQuery {
    ListQuery::new(PageRequest::new(0, 20))
}

#[test]
fn login_page_renders_form_and_error() {
    let html = render_page(
        LoginPage,
        LoginPageProps {
            flash: Flash::error("Wrong email or password"),
            email: "ana@example.com".into(),
        },
    );
    assert!(
        html.starts_with("<!DOCTYPE html><html lang=\"en\"><head"),
        "missing document root in {html}"
    );
    assert!(html.ends_with("</body></html>"), "unterminated document in {html}");
    assert!(html.contains("action=\"/login\""), "missing form in {html}");
    assert!(html.contains("Wrong email or password"), "missing flash in {html}");
    assert!(html.contains("ana@example.com"), "missing prefill in {html}");
    assert!(!html.contains("Log out"), "public page shows nav in {html}");
}

#[test]
fn practice_page_renders_current_question() {
    let session = Session::new(
        "s1",
        vec![
            Item::new(
                "i1",
                QuestionType::MultipleChoice,
                json!({"question": "Pick the animal", "options": ["cat", "car"]}),
            ),
            Item::new("i2", QuestionType::FillMissingChars, json!({"maskedTerm": "c_t"})),
        ],
    );
    let runner = PracticeRunner::new(session, &fixed_clock());
    let html = render_page(
        PracticeSessionPage,
        PracticeSessionPageProps {
            viewer: learner(),
            flash: Flash::default(),
            practice: ViewState::Ready(map_practice(&runner)),
        },
    );
    assert!(html.contains("Question 1: MULTIPLE_CHOICE"), "missing heading in {html}");
    assert!(html.contains("Pick the animal"), "missing prompt in {html}");
    assert!(html.contains("/dashboard/practice/s1/answer"), "missing answer form in {html}");
    assert!(html.contains("/dashboard/practice/s1/complete"), "missing complete form in {html}");
    assert!(html.contains("0/2 answered"), "missing progress in {html}");
    assert!(html.contains("Raw payload"), "missing payload details in {html}");
}

#[test]
fn practice_page_renders_fill_slots() {
    let session = Session::new(
        "s2",
        vec![Item::new("i1", QuestionType::FillMissingChars, json!({"maskedTerm": "c_t"}))],
    );
    let runner = PracticeRunner::new(session, &fixed_clock());
    let html = render_page(
        PracticeSessionPage,
        PracticeSessionPageProps {
            viewer: learner(),
            flash: Flash::default(),
            practice: ViewState::Ready(map_practice(&runner)),
        },
    );
    assert!(html.contains("name=\"slot-0\""), "missing slot input in {html}");
    assert!(html.contains("data-fill-slot"), "missing slot marker in {html}");
}

#[test]
fn practice_page_renders_load_error() {
    let html = render_page(
        PracticeSessionPage,
        PracticeSessionPageProps {
            viewer: learner(),
            flash: Flash::default(),
            practice: ViewState::Error(ViewError::new("Cannot reach the server")),
        },
    );
    assert!(html.contains("Could not load this section."), "missing error state in {html}");
    assert!(html.contains("Cannot reach the server"), "missing error detail in {html}");
}

#[test]
fn library_page_renders_cards_and_add_form() {
    let vocab = Vocabulary {
        id: "v1".into(),
        term: Some("serendipity".into()),
        definition: Some("a happy accident".into()),
        ..Vocabulary::default()
    };
    let html = render_page(
        LibraryPage,
        LibraryPageProps {
            viewer: learner(),
            flash: Flash::notice("Added"),
            query: query().filter("query", Some("ser")),
            topics: Vec::new(),
            vocab: ViewState::Ready(page_of(vec![vocab])),
        },
    );
    assert!(html.contains("serendipity"), "missing term in {html}");
    assert!(html.contains("/dashboard/library/v1/add"), "missing add form in {html}");
    assert!(html.contains("data-live-search"), "missing live search in {html}");
    assert!(html.contains("value=\"ser\""), "missing filter value in {html}");
}

#[test]
fn admin_nav_is_shown_for_admins() {
    let html = render_page(
        DashboardPage,
        DashboardPageProps {
            viewer: admin(),
            flash: Flash::default(),
            my_vocab: ViewState::Ready(Page::default()),
            recent: Vec::new(),
        },
    );
    assert!(html.contains("Admin console"), "missing admin switch in {html}");
    assert!(html.contains("Welcome back, Root"), "missing greeting in {html}");
    assert!(html.contains("No practice sessions yet."), "missing empty state in {html}");
}

#[test]
fn import_page_renders_preview_and_result() {
    let preview =
        import::preview_text("term;definition\ncat;a small animal\n").expect("preview parses");
    let html = render_page(
        AdminImportPage,
        AdminImportPageProps {
            viewer: admin(),
            flash: Flash::default(),
            file_name: Some("words.csv".into()),
            preview: Some(preview),
            result: Some(ImportResult {
                total_rows: 1,
                imported_rows: 1,
                failed_rows: 0,
                errors: Vec::new(),
            }),
        },
    );
    assert!(html.contains("a small animal"), "missing preview row in {html}");
    assert!(html.contains("Missing required column(s): language"), "missing column warning in {html}");
    assert!(html.contains("Import result"), "missing result in {html}");
}

#[test]
fn reviews_page_offers_review_form_for_open_contribution() {
    let queue_item = ContributionQueueItem {
        id: "c1".into(),
        term: Some("ephemeral".into()),
        ..ContributionQueueItem::default()
    };
    let detail: ContributionDetail = serde_json::from_value(json!({
        "contribution": {"id": "c1", "term": "ephemeral", "status": "SUBMITTED"},
        "reviewLogs": [{"id": "l1", "action": "SUBMIT", "actorDisplayName": "Ana"}]
    }))
    .expect("detail decodes");
    let html = render_page(
        AdminReviewsPage,
        AdminReviewsPageProps {
            viewer: admin(),
            flash: Flash::default(),
            query: query(),
            queue: ViewState::Ready(page_of(vec![queue_item])),
            selected: Some(ViewState::Ready(detail)),
        },
    );
    assert!(html.contains("selected=c1"), "missing selection link in {html}");
    assert!(html.contains("action=\"/admin/reviews/c1\""), "missing review form in {html}");
    assert!(html.contains("Submit review"), "missing submit button in {html}");
    assert!(html.contains("Learner view"), "missing learner switch in {html}");
}
