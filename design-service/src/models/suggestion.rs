use serde::Serialize;
use serde_json::Value;
use service_core::error::AppError;
use validator::Validate;

/// Longest prompt accepted, in characters.
pub const MAX_PROMPT_CHARS: usize = 1000;

#[derive(Debug, Clone, Validate)]
pub struct SuggestionRequest {
    #[validate(length(
        max = 1000,
        message = "Prompt is too long. Maximum 1000 characters allowed."
    ))]
    pub prompt: String,
}

impl SuggestionRequest {
    /// Validate a raw request body. Checks run in a fixed order so the caller
    /// always gets the most basic problem first.
    pub fn parse(body: Option<Value>) -> Result<Self, AppError> {
        let prompt = body
            .as_ref()
            .and_then(Value::as_object)
            .and_then(|obj| obj.get("prompt"))
            .ok_or_else(|| AppError::BadRequest("Prompt is required.".to_string()))?;

        let prompt = prompt
            .as_str()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                AppError::BadRequest("Prompt must be a non-empty string.".to_string())
            })?;

        let request = Self {
            prompt: prompt.to_string(),
        };
        request.validate()?;

        Ok(request)
    }

    /// The full instruction sent to the model.
    pub fn to_model_prompt(&self) -> String {
        format!(
            r#"
You are an expert UI/UX and graphic designer.
A user is asking for design suggestions for the following concept: "{}".

Please provide 3 distinct and creative design ideas. For each idea, suggest:
1.  A concept or theme.
2.  A color palette (with hex codes).
3.  Font pairings (one for headings, one for body).
4.  A brief layout description.

Format your response clearly.
"#,
            self.prompt
        )
    }
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestions: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error_message(result: Result<SuggestionRequest, AppError>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            Err(AppError::ValidationError(errors)) => errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_default(),
            other => panic!("expected a validation failure, got {:?}", other),
        }
    }

    #[test]
    fn accepts_prompt_at_limit() {
        let prompt = "a".repeat(MAX_PROMPT_CHARS);
        let request = SuggestionRequest::parse(Some(json!({ "prompt": prompt }))).unwrap();
        assert_eq!(request.prompt.len(), 1000);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let prompt = "é".repeat(1000);
        assert!(SuggestionRequest::parse(Some(json!({ "prompt": prompt }))).is_ok());
    }

    #[test]
    fn rejects_missing_body_and_field() {
        assert_eq!(error_message(SuggestionRequest::parse(None)), "Prompt is required.");
        assert_eq!(
            error_message(SuggestionRequest::parse(Some(json!({ "topic": "x" })))),
            "Prompt is required."
        );
        assert_eq!(
            error_message(SuggestionRequest::parse(Some(json!("prompt")))),
            "Prompt is required."
        );
    }

    #[test]
    fn rejects_non_string_and_blank() {
        for body in [
            json!({ "prompt": 12 }),
            json!({ "prompt": null }),
            json!({ "prompt": "" }),
            json!({ "prompt": " \n\t " }),
        ] {
            assert_eq!(
                error_message(SuggestionRequest::parse(Some(body))),
                "Prompt must be a non-empty string."
            );
        }
    }

    #[test]
    fn rejects_overlong_prompt() {
        let prompt = "a".repeat(1001);
        assert_eq!(
            error_message(SuggestionRequest::parse(Some(json!({ "prompt": prompt })))),
            "Prompt is too long. Maximum 1000 characters allowed."
        );
    }

    #[test]
    fn blank_check_wins_over_length() {
        let prompt = " ".repeat(1500);
        assert_eq!(
            error_message(SuggestionRequest::parse(Some(json!({ "prompt": prompt })))),
            "Prompt must be a non-empty string."
        );
    }

    #[test]
    fn model_prompt_embeds_concept_and_asks_for_three_ideas() {
        let request = SuggestionRequest {
            prompt: "a coffee shop menu".to_string(),
        };
        let text = request.to_model_prompt();

        assert!(text.contains(r#"concept: "a coffee shop menu"."#));
        assert!(text.contains("Please provide 3 distinct and creative design ideas"));
        assert!(text.contains("hex codes"));
        assert!(text.contains("one for headings, one for body"));
        assert!(text.contains("layout description"));
    }
}
