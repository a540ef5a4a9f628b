//! Integration tests for the Nyaya library.
//! These tests require a reachable backend in the environment to run.

#[cfg(test)]
mod tests {
    use nyaya::chat::{ChatConfig, ChatSession};
    use nyaya::{Language, LegalArea, Nyaya, QueryRequest, UserType};

    #[tokio::test]
    async fn test_simple_query() {
        // This test requires NYAYA_QUERY_URL to point at a live backend
        let query_url = std::env::var("NYAYA_QUERY_URL").ok();
        if query_url.is_none() {
            eprintln!("Skipping test: NYAYA_QUERY_URL not set");
            return;
        }

        let client = Nyaya::new(query_url).expect("Failed to create client");

        let history = vec![nyaya::Message::user("What is an FIR under the IPC?")];
        let request = QueryRequest::new(
            "What is an FIR under the IPC?",
            &history,
            Language::English,
            LegalArea::Ipc,
            UserType::Advocate,
        )
        .expect("Failed to build request");

        let response = client.query(&request).await;
        assert!(
            response.is_ok(),
            "Query should succeed against a live backend"
        );
        let response = response.unwrap();
        assert!(!response.ai_answer.is_empty());
    }

    #[tokio::test]
    async fn test_full_session_round_trip() {
        let query_url = std::env::var("NYAYA_QUERY_URL").ok();
        if query_url.is_none() {
            eprintln!("Skipping test: NYAYA_QUERY_URL not set");
            return;
        }

        let client = Nyaya::new(query_url).expect("Failed to create client");
        let config = ChatConfig::new()
            .with_language(Language::English)
            .with_legal_area(LegalArea::Rti)
            .with_user_type(UserType::Common);
        let mut session = ChatSession::new(client, config);
        session.state_mut().start().expect("Session should start");

        session
            .state_mut()
            .set_draft("How do I file an RTI application?");
        let reply = session.send().await;
        assert!(reply.is_ok(), "Turn should round-trip");
        assert_eq!(session.message_count(), 2);
        assert!(!session.state().in_flight());
    }
}
