//! Static catalogue of gateway model identifiers offered in the model picker.
//!
//! The list is advisory: it populates the UI and nothing else. Identifiers not
//! in the list are still forwarded to the gateway untouched.

use serde::Serialize;

/// Model selected when the node is first added
pub const DEFAULT_MODEL: &str = "blackboxai/openai/gpt-4o";

/// One entry of the model picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    /// Human-readable label, `Vendor: Model`
    #[serde(rename = "name")]
    pub label: &'static str,
    /// Value forwarded to the gateway as `model`
    #[serde(rename = "value")]
    pub identifier: &'static str,
}

impl ModelOption {
    pub const fn new(label: &'static str, identifier: &'static str) -> Self {
        Self { label, identifier }
    }

    /// Vendor of the model: `openai` for `blackboxai/openai/gpt-4o`, and the
    /// gateway itself (`blackboxai`) for native ids such as `blackboxai/qwen3-max`
    pub fn vendor(&self) -> Option<&'static str> {
        let mut segments = self.identifier.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(vendor), Some(_)) => Some(vendor),
            (Some(root), Some(_), None) => Some(root),
            _ => None,
        }
    }
}

pub static MODEL_CATALOGUE: &[ModelOption] = &[
    // OpenAI Models
    ModelOption::new("OpenAI: GPT-4o", "blackboxai/openai/gpt-4o"),
    ModelOption::new("OpenAI: GPT-4o Mini", "blackboxai/openai/gpt-4o-mini"),
    ModelOption::new("OpenAI: GPT-4 Turbo", "blackboxai/openai/gpt-4-turbo"),
    ModelOption::new("OpenAI: GPT-4", "blackboxai/openai/gpt-4"),
    ModelOption::new("OpenAI: GPT-4.1", "blackboxai/openai/gpt-4.1"),
    ModelOption::new("OpenAI: GPT-4.1 Mini", "blackboxai/openai/gpt-4.1-mini"),
    ModelOption::new("OpenAI: GPT-4.1 Nano", "blackboxai/openai/gpt-4.1-nano"),
    ModelOption::new("OpenAI: GPT-5", "blackboxai/openai/gpt-5"),
    ModelOption::new("OpenAI: GPT-5 Pro", "blackboxai/openai/gpt-5-pro"),
    ModelOption::new("OpenAI: GPT-5 Mini", "blackboxai/openai/gpt-5-mini"),
    ModelOption::new("OpenAI: GPT-5 Nano", "blackboxai/openai/gpt-5-nano"),
    ModelOption::new("OpenAI: GPT-5.1", "blackboxai/openai/gpt-5.1"),
    ModelOption::new("OpenAI: GPT-5.1 Codex", "blackboxai/openai/gpt-5.1-codex"),
    ModelOption::new("OpenAI: GPT-5.2", "blackboxai/openai/gpt-5.2"),
    ModelOption::new("OpenAI: GPT-5.2 Codex", "blackboxai/openai/gpt-5.2-codex"),
    ModelOption::new("OpenAI: GPT-3.5 Turbo", "blackboxai/openai/gpt-3.5-turbo"),
    ModelOption::new("OpenAI: O1", "blackboxai/openai/o1"),
    ModelOption::new("OpenAI: O1 Pro", "blackboxai/openai/o1-pro"),
    ModelOption::new("OpenAI: O3", "blackboxai/openai/o3"),
    ModelOption::new("OpenAI: O3 Mini", "blackboxai/openai/o3-mini"),
    ModelOption::new("OpenAI: O3 Pro", "blackboxai/openai/o3-pro"),
    ModelOption::new("OpenAI: O4 Mini", "blackboxai/openai/o4-mini"),
    ModelOption::new("OpenAI: ChatGPT-4o Latest", "blackboxai/openai/chatgpt-4o-latest"),
    // Anthropic Claude Models
    ModelOption::new("Anthropic: Claude Sonnet 4.5", "blackboxai/anthropic/claude-sonnet-4.5"),
    ModelOption::new("Anthropic: Claude Opus 4.5", "blackboxai/anthropic/claude-opus-4.5"),
    ModelOption::new("Anthropic: Claude Opus 4.1", "blackboxai/anthropic/claude-opus-4.1"),
    ModelOption::new("Anthropic: Claude Opus 4", "blackboxai/anthropic/claude-opus-4"),
    ModelOption::new("Anthropic: Claude Sonnet 4", "blackboxai/anthropic/claude-sonnet-4"),
    ModelOption::new("Anthropic: Claude 3.7 Sonnet", "blackboxai/anthropic/claude-3.7-sonnet"),
    ModelOption::new("Anthropic: Claude 3.7 Sonnet (Thinking)", "blackboxai/anthropic/claude-3.7-sonnet:thinking"),
    ModelOption::new("Anthropic: Claude 3.5 Haiku", "blackboxai/anthropic/claude-3.5-haiku"),
    ModelOption::new("Anthropic: Claude 3 Haiku", "blackboxai/anthropic/claude-3-haiku"),
    ModelOption::new("Anthropic: Claude Haiku 4.5", "blackboxai/anthropic/claude-haiku-4.5"),
    // Google Gemini Models
    ModelOption::new("Google: Gemini 3 Pro Preview", "blackboxai/google/gemini-3-pro-preview"),
    ModelOption::new("Google: Gemini 2.5 Pro", "blackboxai/google/gemini-2.5-pro"),
    ModelOption::new("Google: Gemini 2.5 Pro Preview", "blackboxai/google/gemini-2.5-pro-preview"),
    ModelOption::new("Google: Gemini 2.5 Flash", "blackboxai/google/gemini-2.5-flash"),
    ModelOption::new("Google: Gemini 2.5 Flash Lite", "blackboxai/google/gemini-2.5-flash-lite"),
    ModelOption::new("Google: Gemini 2.0 Flash", "blackboxai/google/gemini-2.0-flash-001"),
    ModelOption::new("Google: Gemini 2.0 Flash Lite", "blackboxai/google/gemini-2.0-flash-lite-001"),
    ModelOption::new("Google: Gemini 3 Flash Preview", "blackboxai/google/gemini-3-flash-preview"),
    ModelOption::new("Google: Gemma 3 12B", "blackboxai/google/gemma-3-12b-it"),
    ModelOption::new("Google: Gemma 3 4B", "blackboxai/google/gemma-3-4b-it"),
    ModelOption::new("Google: Gemma 2 27B", "blackboxai/google/gemma-2-27b-it"),
    // DeepSeek Models
    ModelOption::new("DeepSeek: V3.2", "blackboxai/deepseek/deepseek-v3.2"),
    ModelOption::new("DeepSeek: V3.1", "blackboxai/deepseek/deepseek-chat-v3.1"),
    ModelOption::new("DeepSeek: Chat", "blackboxai/deepseek/deepseek-chat"),
    ModelOption::new("DeepSeek: R1", "blackboxai/deepseek/deepseek-r1"),
    ModelOption::new("DeepSeek: R1 0528", "blackboxai/deepseek/deepseek-r1-0528"),
    ModelOption::new("DeepSeek: R1 Distill Qwen 32B", "blackboxai/deepseek/deepseek-r1-distill-qwen-32b"),
    // Meta Llama Models
    ModelOption::new("Meta: Llama 4 Maverick", "blackboxai/meta-llama/llama-4-maverick"),
    ModelOption::new("Meta: Llama 4 Scout", "blackboxai/meta-llama/llama-4-scout"),
    ModelOption::new("Meta: Llama 3.3 70B Instruct", "blackboxai/meta-llama/llama-3.3-70b-instruct"),
    ModelOption::new("Meta: Llama 3.1 405B Instruct", "blackboxai/meta-llama/llama-3.1-405b-instruct"),
    ModelOption::new("Meta: Llama 3.1 70B Instruct", "blackboxai/meta-llama/llama-3.1-70b-instruct"),
    ModelOption::new("Meta: Llama 3.1 8B Instruct", "blackboxai/meta-llama/llama-3.1-8b-instruct"),
    ModelOption::new("Meta: Llama 3.2 11B Vision", "blackboxai/meta-llama/llama-3.2-11b-vision-instruct"),
    ModelOption::new("Meta: Llama 3.2 3B Instruct", "blackboxai/meta-llama/llama-3.2-3b-instruct"),
    // Qwen Models
    ModelOption::new("Qwen: Qwen3 Max", "blackboxai/qwen/qwen3-max"),
    ModelOption::new("Qwen: Qwen3 Coder", "blackboxai/qwen/qwen3-coder"),
    ModelOption::new("Qwen: Qwen3 Coder Plus", "blackboxai/qwen/qwen3-coder-plus"),
    ModelOption::new("Qwen: Qwen3 235B A22B", "blackboxai/qwen/qwen3-235b-a22b"),
    ModelOption::new("Qwen: Qwen3 32B", "blackboxai/qwen/qwen3-32b"),
    ModelOption::new("Qwen: Qwen3 8B", "blackboxai/qwen/qwen3-8b"),
    ModelOption::new("Qwen: Qwen Max", "blackboxai/qwen/qwen-max"),
    ModelOption::new("Qwen: Qwen Plus", "blackboxai/qwen/qwen-plus"),
    ModelOption::new("Qwen: Qwen Turbo", "blackboxai/qwen/qwen-turbo"),
    ModelOption::new("Qwen: QwQ 32B", "blackboxai/qwen/qwq-32b"),
    // Mistral Models
    ModelOption::new("Mistral: Large 2512", "blackboxai/mistralai/mistral-large-2512"),
    ModelOption::new("Mistral: Large 2411", "blackboxai/mistralai/mistral-large-2411"),
    ModelOption::new("Mistral: Large", "blackboxai/mistralai/mistral-large"),
    ModelOption::new("Mistral: Medium 3.1", "blackboxai/mistralai/mistral-medium-3.1"),
    ModelOption::new("Mistral: Medium 3", "blackboxai/mistralai/mistral-medium-3"),
    ModelOption::new("Mistral: Small 3.2 24B", "blackboxai/mistralai/mistral-small-3.2-24b-instruct"),
    ModelOption::new("Mistral: Nemo", "blackboxai/mistralai/mistral-nemo"),
    ModelOption::new("Mistral: Mixtral 8x22B", "blackboxai/mistralai/mixtral-8x22b-instruct"),
    ModelOption::new("Mistral: Mixtral 8x7B", "blackboxai/mistralai/mixtral-8x7b-instruct"),
    ModelOption::new("Mistral: Codestral 2508", "blackboxai/mistralai/codestral-2508"),
    ModelOption::new("Mistral: Devstral Medium", "blackboxai/mistralai/devstral-medium"),
    ModelOption::new("Mistral: Devstral Small", "blackboxai/mistralai/devstral-small"),
    ModelOption::new("Mistral: Pixtral Large", "blackboxai/mistralai/pixtral-large-2411"),
    // xAI Grok Models
    ModelOption::new("xAI: Grok 4", "blackboxai/x-ai/grok-4"),
    ModelOption::new("xAI: Grok 4 Fast", "blackboxai/x-ai/grok-4-fast"),
    ModelOption::new("xAI: Grok 4.1 Fast", "blackboxai/x-ai/grok-4.1-fast"),
    ModelOption::new("xAI: Grok 3", "blackboxai/x-ai/grok-3"),
    ModelOption::new("xAI: Grok 3 Mini", "blackboxai/x-ai/grok-3-mini"),
    ModelOption::new("xAI: Grok Code Fast", "blackboxai/x-ai/grok-code-fast-1"),
    // Cohere Models
    ModelOption::new("Cohere: Command A", "blackboxai/cohere/command-a"),
    ModelOption::new("Cohere: Command R Plus", "blackboxai/cohere/command-r-plus-08-2024"),
    ModelOption::new("Cohere: Command R", "blackboxai/cohere/command-r-08-2024"),
    // Perplexity Models
    ModelOption::new("Perplexity: Sonar Pro", "blackboxai/perplexity/sonar-pro"),
    ModelOption::new("Perplexity: Sonar", "blackboxai/perplexity/sonar"),
    ModelOption::new("Perplexity: Sonar Deep Research", "blackboxai/perplexity/sonar-deep-research"),
    ModelOption::new("Perplexity: Sonar Reasoning Pro", "blackboxai/perplexity/sonar-reasoning-pro"),
    // Amazon Nova Models
    ModelOption::new("Amazon: Nova Premier", "blackboxai/amazon/nova-premier-v1"),
    ModelOption::new("Amazon: Nova Pro", "blackboxai/amazon/nova-pro-v1"),
    ModelOption::new("Amazon: Nova Lite", "blackboxai/amazon/nova-lite-v1"),
    ModelOption::new("Amazon: Nova Micro", "blackboxai/amazon/nova-micro-v1"),
    // Microsoft Models
    ModelOption::new("Microsoft: Phi-4", "blackboxai/microsoft/phi-4"),
    ModelOption::new("Microsoft: WizardLM 2 8x22B", "blackboxai/microsoft/wizardlm-2-8x22b"),
    // NVIDIA Models
    ModelOption::new("NVIDIA: Nemotron 3 Nano 30B", "blackboxai/nvidia/nemotron-3-nano-30b-a3b"),
    ModelOption::new("NVIDIA: Nemotron Nano 9B V2", "blackboxai/nvidia/nemotron-nano-9b-v2"),
    ModelOption::new("NVIDIA: Llama 3.1 Nemotron 70B", "blackboxai/nvidia/llama-3.1-nemotron-70b-instruct"),
    ModelOption::new("NVIDIA: Llama 3.3 Nemotron Super 49B", "blackboxai/nvidia/llama-3.3-nemotron-super-49b-v1.5"),
    // Minimax Models
    ModelOption::new("Minimax: M2.1", "blackboxai/minimax/minimax-m2.1"),
    ModelOption::new("Minimax: M2", "blackboxai/minimax/minimax-m2"),
    ModelOption::new("Minimax: M1", "blackboxai/minimax/minimax-m1"),
    ModelOption::new("Minimax: 01", "blackboxai/minimax/minimax-01"),
    // AI21 Models
    ModelOption::new("AI21: Jamba Large 1.7", "blackboxai/ai21/jamba-large-1.7"),
    ModelOption::new("AI21: Jamba Mini 1.7", "blackboxai/ai21/jamba-mini-1.7"),
    // Moonshot Kimi Models
    ModelOption::new("Moonshot: Kimi K2.5", "blackboxai/moonshotai/kimi-k2.5"),
    ModelOption::new("Moonshot: Kimi K2", "blackboxai/moonshotai/kimi-k2"),
    ModelOption::new("Moonshot: Kimi K2 Thinking", "blackboxai/moonshotai/kimi-k2-thinking"),
    ModelOption::new("Moonshot: Kimi Dev 72B", "blackboxai/moonshotai/kimi-dev-72b"),
    // Z-AI GLM Models
    ModelOption::new("Z-AI: GLM 4.7", "blackboxai/z-ai/glm-4.7"),
    ModelOption::new("Z-AI: GLM 4.6", "blackboxai/z-ai/glm-4.6"),
    ModelOption::new("Z-AI: GLM 4.5", "blackboxai/z-ai/glm-4.5"),
    ModelOption::new("Z-AI: GLM 4 32B", "blackboxai/z-ai/glm-4-32b"),
    // Arcee AI Models
    ModelOption::new("Arcee: Virtuoso Large", "blackboxai/arcee-ai/virtuoso-large"),
    ModelOption::new("Arcee: Coder Large", "blackboxai/arcee-ai/coder-large"),
    ModelOption::new("Arcee: Maestro Reasoning", "blackboxai/arcee-ai/maestro-reasoning"),
    // Inflection Models
    ModelOption::new("Inflection: Inflection 3 Productivity", "blackboxai/inflection/inflection-3-productivity"),
    ModelOption::new("Inflection: Inflection 3 Pi", "blackboxai/inflection/inflection-3-pi"),
    // Blackbox Native Models
    ModelOption::new("Blackbox: Search", "blackboxai/blackbox-search"),
    ModelOption::new("Blackbox: Qwen3 Coder", "blackboxai/qwen3-coder"),
    ModelOption::new("Blackbox: Qwen3 Max", "blackboxai/qwen3-max"),
    // Other Models
    ModelOption::new("Writer: Palmyra X5", "blackboxai/writer/palmyra-x5"),
    ModelOption::new("Inception: Mercury", "blackboxai/inception/mercury"),
    ModelOption::new("Inception: Mercury Coder", "blackboxai/inception/mercury-coder"),
    ModelOption::new("ByteDance: Seed 1.6", "blackboxai/bytedance-seed/seed-1.6"),
    ModelOption::new("StepFun: Step3", "blackboxai/stepfun-ai/step3"),
    ModelOption::new("Prime Intellect: Intellect 3", "blackboxai/prime-intellect/intellect-3"),
];

/// Look up a catalogue entry by identifier
pub fn find(identifier: &str) -> Option<&'static ModelOption> {
    MODEL_CATALOGUE.iter().find(|m| m.identifier == identifier)
}

pub fn is_known(identifier: &str) -> bool {
    find(identifier).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identifiers_and_labels_are_unique_and_non_empty() {
        let mut ids = HashSet::new();
        let mut labels = HashSet::new();
        for m in MODEL_CATALOGUE {
            assert!(!m.identifier.trim().is_empty());
            assert!(!m.label.trim().is_empty());
            assert!(ids.insert(m.identifier), "duplicate identifier {}", m.identifier);
            assert!(labels.insert(m.label), "duplicate label {}", m.label);
        }
        assert_eq!(ids.len(), MODEL_CATALOGUE.len());
    }

    #[test]
    fn every_identifier_is_routed_through_the_gateway() {
        assert!(MODEL_CATALOGUE.iter().all(|m| m.identifier.starts_with("blackboxai/")));
        assert!(MODEL_CATALOGUE.iter().all(|m| m.vendor().is_some()));
    }

    #[test]
    fn default_model_is_listed_first() {
        assert_eq!(MODEL_CATALOGUE[0].identifier, DEFAULT_MODEL);
        assert!(is_known(DEFAULT_MODEL));
    }

    #[test]
    fn lookup() {
        let m = find("blackboxai/deepseek/deepseek-r1").unwrap();
        assert_eq!(m.vendor(), Some("deepseek"));
        assert!(!is_known("blackboxai/nobody/nothing"));
    }

    #[test]
    fn native_models_belong_to_the_gateway() {
        for id in ["blackboxai/blackbox-search", "blackboxai/qwen3-coder", "blackboxai/qwen3-max"] {
            assert_eq!(find(id).unwrap().vendor(), Some("blackboxai"), "{}", id);
        }
        assert_eq!(find("blackboxai/qwen/qwen3-coder").unwrap().vendor(), Some("qwen"));
        assert_eq!(ModelOption::new("Bare", "gpt-4o").vendor(), None);
    }

    #[test]
    fn serializes_as_host_option() {
        let json = serde_json::to_value(MODEL_CATALOGUE[0]).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "OpenAI: GPT-4o", "value": DEFAULT_MODEL }));
    }
}
