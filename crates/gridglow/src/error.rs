use std::fmt;

/// Pipeline stage a shader module belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    /// No compatible rendering context could be acquired. The effect is
    /// simply disabled.
    #[error("unsupported rendering environment: {0}")]
    Unsupported(String),
    #[error("failed to compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("failed to link render pipeline: {log}")]
    Link { log: String },
    #[error("surface error: {0}")]
    Surface(String),
}

impl EffectError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, EffectError::Unsupported(_))
    }
}
