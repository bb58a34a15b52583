use std::sync::Arc;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{Chat, ChatError, ChatInput, Language, SessionStore, new_session_id};
use crate::core::AppConfig;
use crate::openai::OpenAiClient;

/// Chat from the terminal using the same session handling as the
/// API. Every line is sent as part of one session.
pub async fn run(language: &str) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let config = AppConfig::default();
    let client = OpenAiClient::new(
        &config.openai_api_hostname,
        &config.openai_api_key,
        &config.openai_model,
        config.upstream_timeout,
    );
    let chat = Chat::new(SessionStore::new(config.session_limits), Arc::new(client));
    let language = Language::from_code(Some(language));
    let session_id = new_session_id();

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let result = chat
                    .next_msg(ChatInput {
                        session_id: Some(session_id.clone()),
                        message: Some(line),
                        language,
                    })
                    .await;
                match result {
                    Ok(reply) => println!("{}", reply.message),
                    // Blank lines are skipped rather than sent
                    Err(ChatError::InvalidRequest) => continue,
                    Err(e) => println!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
