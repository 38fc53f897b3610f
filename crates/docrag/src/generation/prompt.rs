//! Prompt template for grounded question answering

/// Prompt builder for document-grounded queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the question-answering prompt.
    ///
    /// The instruction text is fixed: it is the generator's behavioral
    /// contract (answer only from the context, otherwise say the information
    /// cannot be found). Only the context and question vary.
    pub fn build_prompt(context: &str, query: &str) -> String {
        format!(
            r#"You are an intelligent assistant that answers questions based *only* on the provided document context.
If the answer is not available in the context, state that you cannot find the information in the document.

Document Context:
{context}

Question: {query}

Answer:"#,
            context = context,
            query = query
        )
    }
}
