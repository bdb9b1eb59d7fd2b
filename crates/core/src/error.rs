use thiserror::Error;

/// Errors surfaced by plugin lifecycle operations.
///
/// The hook contract itself is infallible (a declined capability is a
/// routing decision, not an error); this type covers session
/// establishment and delivery around it.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("chat session error: {0}")]
    Connection(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = PluginError::Connection("login rejected".into());
        assert_eq!(err.to_string(), "chat session error: login rejected");
    }

    #[test]
    fn anyhow_errors_convert() {
        let err: PluginError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, PluginError::Other(_)));
    }
}
