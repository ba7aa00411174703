//! Answer outcomes and the boundary response shapes.
//!
//! The engine distinguishes business outcomes (refusals, missing index,
//! ungrounded retrieval) from system failures. Everything in this module is
//! a successful outcome from the caller's perspective; the HTTP collaborator
//! serializes these shapes as-is with a 200-equivalent status.

use serde::{Deserialize, Serialize};

/// Notice returned when a query arrives before any upload.
pub const NOTICE_NO_INDEX: &str = "No documents uploaded";

/// Notice returned when the query fails the safety policy.
pub const NOTICE_QUERY_POLICY: &str = "Sorry, your query violates our safety policy.";

/// Notice returned when retrieval finds nothing usable to ground an answer.
pub const NOTICE_UNGROUNDED: &str =
    "Sorry, I could not find relevant information in your documents. The answer may not be reliable.";

/// Notice returned when the generated answer fails the safety policy.
pub const NOTICE_ANSWER_POLICY: &str =
    "Sorry, the response violates our safety policy. Please rephrase your query.";

/// A generated answer with the sources that grounded it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    /// The generated answer text.
    pub content: String,
    /// Distinct source identifiers of the retrieved segments, in first-seen
    /// retrieval order.
    pub sources: Vec<String>,
}

/// Terminal outcome of one query-answering request.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// The full pipeline ran and produced a grounded, policy-clean answer.
    Answered(Answer),
    /// No index has ever been built; nothing to retrieve from.
    NoIndex,
    /// The query failed the safety check; retrieval was skipped.
    QueryRejected,
    /// Retrieval produced no usable context; generation was skipped.
    Ungrounded,
    /// The generated answer failed the safety check and was suppressed.
    AnswerRejected,
}

impl AnswerOutcome {
    /// Convert into the wire-shape the collaborator serializes.
    pub fn into_response(self) -> QueryResponse {
        match self {
            AnswerOutcome::Answered(answer) => {
                QueryResponse::Answered { response: answer.content, sources: answer.sources }
            }
            AnswerOutcome::NoIndex => QueryResponse::Error { error: NOTICE_NO_INDEX.to_string() },
            AnswerOutcome::QueryRejected => {
                QueryResponse::Notice { response: NOTICE_QUERY_POLICY.to_string() }
            }
            AnswerOutcome::Ungrounded => {
                QueryResponse::Notice { response: NOTICE_UNGROUNDED.to_string() }
            }
            AnswerOutcome::AnswerRejected => {
                QueryResponse::Notice { response: NOTICE_ANSWER_POLICY.to_string() }
            }
        }
    }
}

/// Wire shape of a query response.
///
/// Serializes untagged so the payloads match the service contract exactly:
/// `{"response": ..., "sources": [...]}` for answers, `{"response": ...}`
/// for notices, and `{"error": ...}` for the missing-index case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum QueryResponse {
    /// A grounded answer with its sources.
    Answered {
        /// The generated answer text.
        response: String,
        /// Source identifiers for transparency.
        sources: Vec<String>,
    },
    /// A fixed notice (policy refusal or grounding warning).
    Notice {
        /// The notice text.
        response: String,
    },
    /// The missing-index error payload.
    Error {
        /// The error text.
        error: String,
    },
}

/// Wire shape of a successful ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestReceipt {
    /// Always `"uploaded"`.
    pub status: String,
    /// Number of segments indexed from the document.
    pub segments: usize,
}

impl IngestReceipt {
    pub(crate) fn new(segments: usize) -> Self {
        Self { status: "uploaded".to_string(), segments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answered_serializes_with_sources() {
        let response = AnswerOutcome::Answered(Answer {
            content: "The sky is blue.".into(),
            sources: vec!["notes.txt".into()],
        })
        .into_response();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["response"], "The sky is blue.");
        assert_eq!(json["sources"][0], "notes.txt");
    }

    #[test]
    fn no_index_serializes_as_error_payload() {
        let json = serde_json::to_value(AnswerOutcome::NoIndex.into_response()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "No documents uploaded" }));
    }

    #[test]
    fn notices_carry_only_a_response_field() {
        let json = serde_json::to_value(AnswerOutcome::QueryRejected.into_response()).unwrap();
        assert_eq!(json, serde_json::json!({ "response": NOTICE_QUERY_POLICY }));
    }

    #[test]
    fn receipt_reports_uploaded() {
        let json = serde_json::to_value(IngestReceipt::new(3)).unwrap();
        assert_eq!(json["status"], "uploaded");
        assert_eq!(json["segments"], 3);
    }
}
