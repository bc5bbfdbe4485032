//! Gateway behavior without a working Python install.

use textlab_core::{LoadError, ModelGateway};
use textlab_spacy::{SpacyConfig, SpacyGateway};

#[test]
fn missing_interpreter_is_unavailable() {
    let config = SpacyConfig::default().with_python("/nonexistent/textlab/python");
    let Err(err) = SpacyGateway::new(config).load() else { panic!("expected load to fail") };

    match err {
        LoadError::Unavailable { reason } => assert!(reason.contains("/nonexistent/textlab/python")),
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn worker_exiting_before_handshake_is_unavailable() {
    let config = SpacyConfig::default().with_python("true");
    let Err(err) = SpacyGateway::new(config).load() else { panic!("expected load to fail") };

    assert_eq!(err, LoadError::Unavailable { reason: "worker exited".to_owned() });
}

#[test]
fn default_config() {
    let config = SpacyConfig::default().with_model("en_core_web_md");
    assert_eq!(config.python, "python3");
    assert_eq!(config.model, "en_core_web_md");
}
