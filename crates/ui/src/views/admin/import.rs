use api::ImportResult;
use dioxus::prelude::*;
use services::ImportPreview;
use services::import::REQUIRED_COLUMNS;
use vocab_core::model::UserProfile;

use super::super::layout::{Chrome, Document, Flash};

const PATH: &str = "/admin/vocab/import";

/// Submit button value asking for a preview only.
pub const INTENT_PREVIEW: &str = "preview";
/// Submit button value asking for the upload.
pub const INTENT_IMPORT: &str = "import";

#[derive(Props, Clone, PartialEq)]
pub struct AdminImportPageProps {
    pub viewer: UserProfile,
    pub flash: Flash,
    pub file_name: Option<String>,
    pub preview: Option<ImportPreview>,
    pub result: Option<ImportResult>,
}

#[component]
fn PreviewTable(preview: ImportPreview) -> Element {
    let shown = preview.rows.len();
    let missing = preview.missing_columns.join(", ");
    rsx! {
        section { class: "card",
            h2 { "Preview" }
            p { class: "muted", "Showing {shown} of {preview.total_rows} row(s)." }
            if !preview.missing_columns.is_empty() {
                p { class: "flash flash--error", role: "alert",
                    "Missing required column(s): {missing}"
                }
            }
            table { class: "table",
                thead {
                    tr {
                        th { "Term" }
                        th { "Definition" }
                        th { "Language" }
                        th { "Definition (VI)" }
                        th { "Examples" }
                        th { "Phonetic" }
                        th { "Part of speech" }
                        th { "Topics" }
                        th { "Status" }
                    }
                }
                tbody {
                    for (index, row) in preview.rows.iter().enumerate() {
                        tr { key: "{index}",
                            td { "{row.term}" }
                            td { "{row.definition}" }
                            td { "{row.language}" }
                            td { "{row.definition_vi}" }
                            td { "{row.examples}" }
                            td { "{row.phonetic}" }
                            td { "{row.part_of_speech}" }
                            td { "{row.topic_ids}" }
                            td { "{row.status}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ResultSummary(result: ImportResult) -> Element {
    rsx! {
        section { class: "card",
            h2 { "Import result" }
            dl { class: "facts",
                dt { "Total rows" }
                dd { "{result.total_rows}" }
                dt { "Imported" }
                dd { "{result.imported_rows}" }
                dt { "Failed" }
                dd { "{result.failed_rows}" }
            }
            if !result.errors.is_empty() {
                ul { class: "import-errors",
                    for (index, error) in result.errors.iter().enumerate() {
                        li { key: "{index}",
                            if let Some(row) = error.row {
                                strong { "Row {row}: " }
                            }
                            {error.message.clone().unwrap_or_else(|| "Unknown error".to_string())}
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn AdminImportPage(props: AdminImportPageProps) -> Element {
    let chrome = Chrome::admin("Import vocabulary", "/admin/vocab/import", props.viewer.clone(), props.flash.clone());
    let required = REQUIRED_COLUMNS.join(", ");

    rsx! {
        Document { chrome,
            section { class: "card",
                p { "Upload a UTF-8 CSV file separated by commas, semicolons or tabs." }
                p { class: "muted", "Required columns: {required}. Optional: definitionVi, examples, phonetic, partOfSpeech, topicIds, status." }
                form { class: "form", method: "post", action: PATH, enctype: "multipart/form-data",
                    input { r#type: "file", name: "file", accept: ".csv,text/csv", required: true }
                    if let Some(name) = props.file_name.as_ref() {
                        p { class: "muted", "Last file: {name}" }
                    }
                    div { class: "toolbar",
                        button { class: "btn btn-secondary", r#type: "submit", name: "intent", value: INTENT_PREVIEW, "Preview" }
                        button { class: "btn btn-primary", r#type: "submit", name: "intent", value: INTENT_IMPORT, "Import" }
                    }
                }
            }
            if let Some(preview) = props.preview.clone() {
                PreviewTable { preview }
            }
            if let Some(result) = props.result.clone() {
                ResultSummary { result }
            }
        }
    }
}
