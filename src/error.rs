//! Error types for the phase-diagram pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagramError {
    /// Drawing or image encoding failed, including an unwritable output path.
    #[error("render error: {0}")]
    Render(String),

    /// The computed field disagrees with the analytic threshold.
    #[error(
        "threshold theorem violated: {false_positives} entangled points below r_c, \
         {false_negatives} separable points above r_c, {negative} negative values"
    )]
    TheoremViolation {
        false_positives: usize,
        false_negatives: usize,
        negative: usize,
    },
}

pub type Result<T> = std::result::Result<T, DiagramError>;

/// Collapse a `plotters` drawing error into [`DiagramError::Render`].
pub(crate) fn render_err<E: std::fmt::Display>(err: E) -> DiagramError {
    DiagramError::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_errors_become_render() {
        let err = render_err("No such file or directory (os error 2)");
        match &err {
            DiagramError::Render(msg) => assert!(msg.contains("os error 2")),
            other => panic!("expected a render error, got {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "render error: No such file or directory (os error 2)"
        );
    }

    #[test]
    fn violation_message_counts_every_kind() {
        let err = DiagramError::TheoremViolation {
            false_positives: 1,
            false_negatives: 2,
            negative: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("1 entangled points below r_c"));
        assert!(msg.contains("2 separable points above r_c"));
        assert!(msg.contains("3 negative values"));
    }
}
