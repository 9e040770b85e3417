use dioxus::prelude::*;
use services::forms::VocabForm;
use vocab_core::model::{Topic, Vocabulary};

use super::components::{TextArea, TextField};

/// Prefill a vocabulary form from an existing entry.
#[must_use]
pub fn form_from_vocab(vocab: &Vocabulary) -> VocabForm {
    VocabForm {
        term: vocab.term.clone().unwrap_or_default(),
        definition: vocab.definition.clone().unwrap_or_default(),
        definition_vi: vocab.definition_vi.clone().unwrap_or_default(),
        examples: vocab.example_texts().join("\n"),
        phonetic: vocab.phonetic.clone().unwrap_or_default(),
        part_of_speech: vocab.part_of_speech.clone().unwrap_or_default(),
        language: vocab.language.clone().unwrap_or_default(),
        topic_ids: vocab
            .topic_ids
            .iter()
            .flatten()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Inputs shared by the contribution and admin vocabulary forms.
#[component]
pub fn VocabFields(form: VocabForm, topics: Vec<Topic>) -> Element {
    rsx! {
        div { class: "field-grid",
            TextField { label: "Term".to_string(), name: "term".to_string(), value: form.term.clone(), required: true }
            TextField { label: "Language".to_string(), name: "language".to_string(), value: form.language.clone() }
            TextField { label: "Phonetic".to_string(), name: "phonetic".to_string(), value: form.phonetic.clone() }
            TextField { label: "Part of speech".to_string(), name: "partOfSpeech".to_string(), value: form.part_of_speech.clone() }
        }
        TextArea { label: "Definition".to_string(), name: "definition".to_string(), value: form.definition.clone() }
        TextArea { label: "Definition (Vietnamese)".to_string(), name: "definitionVi".to_string(), value: form.definition_vi.clone(), rows: 2 }
        TextArea { label: "Examples (one per line)".to_string(), name: "examples".to_string(), value: form.examples.clone(), rows: 4 }
        TextField { label: "Topic ids (comma separated)".to_string(), name: "topicIds".to_string(), value: form.topic_ids.clone() }
        if !topics.is_empty() {
            details { class: "topic-hint",
                summary { "Available topics" }
                ul { class: "compact-list",
                    for topic in topics {
                        li { key: "{topic.id}",
                            code { "{topic.id}" }
                            " {topic.name()}"
                        }
                    }
                }
            }
        }
    }
}
