//! RAG engine: retrieve, assemble, generate

use std::sync::Arc;

use docqa_core::{
    CompletionProvider, ConversationSession, Embedder, Error, Result, ScoredChunk, VectorIndex,
};

use crate::corpus::{CorpusStore, DEFAULT_TOP_K};

const INSTRUCTION: &str = "You are a question answering assistant. \
Answer using only the provided context. \
If the answer is not contained in the context, say so explicitly.";

/// Configuration for the RAG engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of chunks retrieved per question
    pub top_k: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K }
    }
}

/// Answers questions by grounding completions in retrieved corpus chunks.
///
/// Each call runs the same pipeline: one retrieval against the corpus
/// store, prompt assembly, one generation against the completion
/// capability. Failures propagate typed to the caller; nothing is retried
/// here. The engine holds no conversation state — queries are independent
/// unless the caller passes a session into
/// [`answer_with_session`](Self::answer_with_session).
pub struct RagEngine<E: Embedder, I: VectorIndex, C: CompletionProvider> {
    store: Arc<CorpusStore<E, I>>,
    completion: Arc<C>,
    config: EngineConfig,
}

impl<E: Embedder, I: VectorIndex, C: CompletionProvider> RagEngine<E, I, C> {
    /// Create an engine with the default configuration
    pub fn new(store: Arc<CorpusStore<E, I>>, completion: Arc<C>) -> Self {
        Self::with_config(store, completion, EngineConfig::default())
    }

    /// Create an engine with a custom configuration
    pub fn with_config(
        store: Arc<CorpusStore<E, I>>,
        completion: Arc<C>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            completion,
            config,
        }
    }

    /// Answer a single query, independent of any prior turns
    pub async fn answer(&self, query: &str) -> Result<String> {
        self.answer_inner(query, None).await
    }

    /// Answer a query with the caller-owned chat history injected into the
    /// prompt. The session is read, never mutated; appending the exchange
    /// afterwards is the caller's job.
    pub async fn answer_with_session(
        &self,
        query: &str,
        session: &ConversationSession,
    ) -> Result<String> {
        self.answer_inner(query, Some(session)).await
    }

    async fn answer_inner(
        &self,
        query: &str,
        history: Option<&ConversationSession>,
    ) -> Result<String> {
        let retrieved = self.store.search(query, self.config.top_k).await?;
        tracing::debug!(retrieved = retrieved.len(), "assembling grounded prompt");

        // Zero retrieved chunks still go through generation: the
        // instruction makes the model state the insufficiency instead of
        // this layer short-circuiting.
        let prompt = build_prompt(&retrieved, query, history);

        let answer = self
            .completion
            .complete(&prompt)
            .await
            .map_err(completion_failure)?;

        tracing::debug!(chars = answer.len(), "generated answer");
        Ok(answer)
    }
}

/// Concatenate retrieved chunk texts, in ranked order, into one context block
fn build_context(chunks: &[ScoredChunk]) -> String {
    let mut context = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        context.push_str(&format!("{}. {}\n", i + 1, chunk.text));
    }
    context
}

fn build_prompt(
    chunks: &[ScoredChunk],
    query: &str,
    history: Option<&ConversationSession>,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(INSTRUCTION);
    prompt.push_str("\n\nContext:\n");
    prompt.push_str(&build_context(chunks));

    if let Some(session) = history.filter(|s| !s.is_empty()) {
        prompt.push_str("\nConversation so far:\n");
        for turn in session.turns() {
            prompt.push_str(&format!("{}: {}\n", turn.role, turn.content));
        }
    }

    prompt.push_str("\nQuestion: ");
    prompt.push_str(query);
    prompt
}

fn completion_failure(err: Error) -> Error {
    match err {
        e @ Error::Completion(_) => e,
        other => Error::Completion(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryIndex;
    use crate::testing::{CapturingCompletion, FailingCompletion, HashEmbedder, NullIndex};

    async fn seeded_engine(
        completion: Arc<CapturingCompletion>,
    ) -> RagEngine<HashEmbedder, MemoryIndex, CapturingCompletion> {
        let store = Arc::new(
            CorpusStore::attach(
                "engine-test",
                Arc::new(HashEmbedder::new()),
                Arc::new(MemoryIndex::new()),
            )
            .await
            .unwrap(),
        );
        store
            .ingest(&[
                "Tesla was founded in 2003.".to_string(),
                "Elon Musk was born in 1971.".to_string(),
            ])
            .await
            .unwrap();
        RagEngine::new(store, completion)
    }

    #[tokio::test]
    async fn test_answer_returns_completion_text_verbatim() {
        let completion = Arc::new(CapturingCompletion::new("Tesla was founded in 2003."));
        let engine = seeded_engine(completion.clone()).await;

        let answer = engine.answer("When was Tesla founded?").await.unwrap();
        assert_eq!(answer, "Tesla was founded in 2003.");
    }

    #[tokio::test]
    async fn test_answer_issues_one_retrieval_and_one_generation() {
        let completion = Arc::new(CapturingCompletion::new("answer"));
        let index = Arc::new(NullIndex::new());
        let store = Arc::new(
            CorpusStore::attach("engine-test", Arc::new(HashEmbedder::new()), index.clone())
                .await
                .unwrap(),
        );
        let engine = RagEngine::new(store, completion.clone());

        engine.answer("a question").await.unwrap();
        assert_eq!(index.queries(), 1);
        assert_eq!(completion.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_contains_instruction_context_and_query() {
        let completion = Arc::new(CapturingCompletion::new("answer"));
        let engine = seeded_engine(completion.clone()).await;

        engine.answer("When was Tesla founded?").await.unwrap();

        let prompt = completion.last_prompt().unwrap();
        assert!(prompt.contains("Answer using only the provided context"));
        assert!(prompt.contains("Tesla was founded in 2003."));
        assert!(prompt.ends_with("Question: When was Tesla founded?"));
    }

    #[tokio::test]
    async fn test_empty_corpus_still_generates() {
        let completion = Arc::new(CapturingCompletion::new(
            "The context does not contain that information.",
        ));
        let store = Arc::new(
            CorpusStore::attach(
                "empty-corpus",
                Arc::new(HashEmbedder::new()),
                Arc::new(MemoryIndex::new()),
            )
            .await
            .unwrap(),
        );
        let engine = RagEngine::new(store, completion.clone());

        let answer = engine.answer("Anything?").await.unwrap();
        assert_eq!(answer, "The context does not contain that information.");
        assert_eq!(completion.calls(), 1);

        let prompt = completion.last_prompt().unwrap();
        assert!(prompt.contains("Context:\n"));
    }

    #[tokio::test]
    async fn test_completion_error_surfaces_as_completion_failure() {
        let store = Arc::new(
            CorpusStore::attach(
                "engine-test",
                Arc::new(HashEmbedder::new()),
                Arc::new(MemoryIndex::new()),
            )
            .await
            .unwrap(),
        );
        let completion = Arc::new(FailingCompletion::new());
        let engine = RagEngine::new(store, completion.clone());

        let err = engine.answer("a question").await.unwrap_err();
        assert!(matches!(err, Error::Completion(_)));
        assert_eq!(completion.calls(), 1);
    }

    #[tokio::test]
    async fn test_session_history_is_injected_but_not_required() {
        let completion = Arc::new(CapturingCompletion::new("answer"));
        let engine = seeded_engine(completion.clone()).await;

        let mut session = ConversationSession::new();
        session.push_user("When was Tesla founded?");
        session.push_assistant("Tesla was founded in 2003.");

        engine
            .answer_with_session("And who founded it?", &session)
            .await
            .unwrap();

        let prompt = completion.last_prompt().unwrap();
        assert!(prompt.contains("Conversation so far:"));
        assert!(prompt.contains("user: When was Tesla founded?"));
        assert!(prompt.contains("assistant: Tesla was founded in 2003."));
        assert_eq!(session.len(), 2);

        // The stateless path never mentions history
        engine.answer("And who founded it?").await.unwrap();
        let prompt = completion.last_prompt().unwrap();
        assert!(!prompt.contains("Conversation so far:"));
    }

    #[tokio::test]
    async fn test_empty_session_adds_no_history_block() {
        let completion = Arc::new(CapturingCompletion::new("answer"));
        let engine = seeded_engine(completion.clone()).await;

        let session = ConversationSession::new();
        engine.answer_with_session("A question?", &session).await.unwrap();

        let prompt = completion.last_prompt().unwrap();
        assert!(!prompt.contains("Conversation so far:"));
    }
}
