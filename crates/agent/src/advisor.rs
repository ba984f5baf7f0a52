//! The per-request reply pipeline.

use std::sync::Arc;

use tracing::{error, info, warn};

use techadvisor_core::catalog::Catalog;
use techadvisor_core::domain::product::Product;
use techadvisor_core::query::{classify_category, extract_budget, is_on_topic};

use crate::cache::{CacheConfig, ReplyCache};
use crate::llm::LlmClient;
use crate::prompt::PromptTemplate;
use crate::validation::{ReplyPolicy, ReplyVerdict};

/// Sent when the message contains no phone/laptop vocabulary at all.
pub const OFF_TOPIC_REPLY: &str = "I\u{2019}m your tech advisor for phones and laptops! \
    Ask me something like \u{2018}best gaming phone under \u{20b9}50K\u{2019} or \
    \u{2018}laptop for work under \u{20b9}60K\u{2019}.";

/// Sent when the model gateway fails for any reason.
pub const MODEL_FAILURE_REPLY: &str =
    "Sorry, something went wrong. Please try again later.";

/// Sent when the model output fails the reply policy.
pub const REPHRASE_REPLY: &str = "Sorry, I couldn't find suitable products. Try rephrasing \
    your query (e.g., 'gaming laptop under \u{20b9}80000').";

/// Orchestrates one chat message end to end: topic gate, cache lookup,
/// shortlist, prompt assembly, model call, reply policy, cache insert.
///
/// Holds only process-scoped immutable state plus the shared reply
/// cache, so one instance serves all concurrent requests.
pub struct AdvisorService {
    catalog: Arc<Catalog>,
    template: PromptTemplate,
    llm: Arc<dyn LlmClient>,
    policy: ReplyPolicy,
    cache: ReplyCache,
}

impl AdvisorService {
    pub fn new(
        catalog: Arc<Catalog>,
        template: PromptTemplate,
        llm: Arc<dyn LlmClient>,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            catalog,
            template,
            llm,
            policy: ReplyPolicy::default(),
            cache: ReplyCache::new(cache_config),
        }
    }

    /// Answer a validated, non-empty chat message. Always produces a
    /// reply; every failure mode collapses into one of the fixed
    /// fallback strings.
    pub async fn answer(&self, message: &str) -> String {
        let cache_key = message.to_lowercase();

        if !is_on_topic(message) {
            info!(event_name = "advisor.off_topic", query = %message, "non-product query detected");
            self.cache.insert(cache_key, OFF_TOPIC_REPLY.to_string());
            return OFF_TOPIC_REPLY.to_string();
        }

        if let Some(cached) = self.cache.get(&cache_key) {
            info!(event_name = "advisor.cache_hit", query = %cache_key, "serving cached reply");
            return cached;
        }
        info!(event_name = "advisor.cache_miss", query = %cache_key, "generating fresh reply");

        let budget = extract_budget(message);
        let category = classify_category(message);
        let shortlist = self.catalog.shortlist(budget, category);
        info!(
            event_name = "advisor.shortlist",
            query = %cache_key,
            budget = ?budget,
            category = ?category,
            candidates = shortlist.len(),
            "catalog narrowed"
        );

        let reply = self.generate_reply(message, &shortlist).await;
        self.cache.insert(cache_key, reply.clone());
        reply
    }

    async fn generate_reply(&self, message: &str, shortlist: &[Product]) -> String {
        let prompt = match self.template.build(message, shortlist) {
            Ok(prompt) => prompt,
            Err(error) => {
                error!(event_name = "advisor.prompt_failed", error = %error, "prompt assembly failed");
                return MODEL_FAILURE_REPLY.to_string();
            }
        };

        match self.llm.generate(&prompt).await {
            Ok(raw) => {
                let reply = raw.trim();
                match self.policy.evaluate(reply) {
                    ReplyVerdict::Accept => reply.to_string(),
                    ReplyVerdict::Reject { reason } => {
                        warn!(
                            event_name = "advisor.reply_rejected",
                            reason_code = reason.reason_code(),
                            words = reply.split_whitespace().count(),
                            "model reply failed the reply policy"
                        );
                        REPHRASE_REPLY.to_string()
                    }
                }
            }
            Err(error) => {
                error!(event_name = "advisor.model_failed", error = %error, "model gateway call failed");
                MODEL_FAILURE_REPLY.to_string()
            }
        }
    }
}
