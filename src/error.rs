use thiserror::Error;

pub type Result<T> = std::result::Result<T, BenchError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// Strategies disagreed on a corpus sample; timing is not attempted.
    #[error("mismatch at sample {index} ({path}): {}", render_outputs(.outputs))]
    EquivalenceMismatch {
        index: usize,
        path: String,
        outputs: Vec<(&'static str, &'static str)>,
    },

    #[error("invalid benchmark settings: {0}")]
    InvalidSettings(String),
}

fn render_outputs(outputs: &[(&'static str, &'static str)]) -> String {
    outputs
        .iter()
        .map(|(name, content_type)| format!("{name} -> {content_type}"))
        .collect::<Vec<_>>()
        .join(", ")
}
