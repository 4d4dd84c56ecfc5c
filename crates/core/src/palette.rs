use serde::{Deserialize, Serialize};

/// Display tone for a model name. Model names are free text, so anything
/// unrecognised lands in `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelTone {
    Opus,
    Sonnet,
    Kimi,
    GrokFast,
    Grok,
    Default,
}

// Longer keys first so `grok-fast` is not swallowed by `grok`.
const MODEL_KEYS: &[(&str, ModelTone)] = &[
    ("opus", ModelTone::Opus),
    ("sonnet", ModelTone::Sonnet),
    ("kimi", ModelTone::Kimi),
    ("grok-fast", ModelTone::GrokFast),
    ("grok", ModelTone::Grok),
];

impl ModelTone {
    pub fn for_model(model: &str) -> Self {
        let model = model.to_lowercase();
        MODEL_KEYS
            .iter()
            .find(|(key, _)| model.contains(key))
            .map(|(_, tone)| *tone)
            .unwrap_or(ModelTone::Default)
    }

    pub fn color(self) -> &'static str {
        match self {
            ModelTone::Opus => "#a855f7",
            ModelTone::Sonnet => "#3b82f6",
            ModelTone::Kimi => "#10b981",
            ModelTone::GrokFast => "#f59e0b",
            ModelTone::Grok => "#f97316",
            ModelTone::Default => "#64748b",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModelTone::Opus => "opus",
            ModelTone::Sonnet => "sonnet",
            ModelTone::Kimi => "kimi",
            ModelTone::GrokFast => "grok-fast",
            ModelTone::Grok => "grok",
            ModelTone::Default => "default",
        }
    }
}
