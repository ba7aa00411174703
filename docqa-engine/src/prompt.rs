//! Prompt shaping for the answer generator.

use docqa_rag::RetrievalHit;

/// Build the generation prompt from retrieved segments and the query.
///
/// Concatenates segment contents as a context block, then asks the question.
/// Whitespace-only segments are skipped; the grounding gate guarantees at
/// least one usable segment remains by the time this is called.
pub fn build_prompt(query: &str, hits: &[RetrievalHit]) -> String {
    let context = hits
        .iter()
        .map(|hit| hit.segment.content.trim())
        .filter(|content| !content.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Use the following context to answer the question. If the context \
         does not contain the answer, say so.\n\n\
         Context:\n{context}\n\nQuestion: {query}\nAnswer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use docqa_rag::Segment;

    fn hit(content: &str) -> RetrievalHit {
        RetrievalHit {
            segment: Segment {
                content: content.to_string(),
                source: "doc.txt".to_string(),
                sequence_index: 0,
            },
            distance: 0.1,
        }
    }

    #[test]
    fn prompt_contains_context_and_question() {
        let prompt = build_prompt("What color is the sky?", &[hit("The sky is blue.")]);
        assert!(prompt.contains("The sky is blue."));
        assert!(prompt.contains("Question: What color is the sky?"));
    }

    #[test]
    fn whitespace_segments_are_skipped() {
        let prompt = build_prompt("q", &[hit("   "), hit("useful fact")]);
        assert!(prompt.contains("useful fact"));
        assert!(!prompt.contains("   \n"));
    }
}
