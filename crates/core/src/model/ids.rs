string_id! {
    /// Identifier of an account.
    UserId
}

string_id! {
    /// Identifier of a topic.
    TopicId
}

string_id! {
    /// Identifier of a library vocabulary entry.
    VocabId
}

string_id! {
    /// Identifier of a practice session.
    SessionId
}

string_id! {
    /// Identifier of a single question item inside a session.
    ItemId
}

string_id! {
    /// Identifier of a learner contribution.
    ContributionId
}

string_id! {
    ActivityLogId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let from_text: SessionId = serde_json::from_str("\"s-1\"").unwrap();
        let from_number: SessionId = serde_json::from_str("42").unwrap();

        assert_eq!(from_text.as_str(), "s-1");
        assert_eq!(from_number.as_str(), "42");
        assert_eq!(format!("{from_number:?}"), "SessionId(42)");
    }
}
