use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use songlore_core::TopicTable;

use crate::error::CliError;

/// Load the topic table from `path`, or the built-in table when `None`.
pub(crate) fn load_topic_table(path: Option<&Path>) -> Result<TopicTable, CliError> {
    let Some(path) = path else {
        return Ok(TopicTable::default());
    };
    let content = std::fs::read_to_string(path).map_err(|e| {
        CliError::config(format!("Failed to read topics file {}: {}", path.display(), e))
    })?;
    let table = TopicTable::from_toml_str(&content)?;
    log::debug!(
        "Loaded {} topic rules from {}",
        table.rules().len(),
        path.display()
    );
    Ok(table)
}

/// Print the topic of a piece of text.
pub(crate) fn run_classify(text: &[String], topics: Option<&Path>) -> Result<(), CliError> {
    let table = load_topic_table(topics)?;
    let joined = text.join(" ");
    log::info!("{}", table.classify(&joined));
    Ok(())
}

/// List the active topic table.
pub(crate) fn run_topics(topics: Option<&Path>) -> Result<(), CliError> {
    let table = load_topic_table(topics)?;
    let origin = match topics {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };

    log::info!(
        "{} {}",
        "Topics".if_supports_color(Stdout, |t| t.bold()),
        format!("({}, first match wins)", origin).if_supports_color(Stdout, |t| t.dimmed()),
    );
    for (i, rule) in table.rules().iter().enumerate() {
        log::info!(
            "  {:>2}. {} {}",
            i + 1,
            format!("{}:", rule.label).if_supports_color(Stdout, |t| t.cyan()),
            rule.keywords.join(", "),
        );
    }
    log::info!(
        "  {}",
        format!("anything else: {}", songlore_core::DEFAULT_TOPIC)
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_when_no_path() {
        let table = load_topic_table(None).unwrap();
        assert_eq!(table.rules()[0].label, "love");
    }

    #[test]
    fn test_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topics.toml");
        std::fs::write(
            &path,
            "[[topic]]\nlabel = \"weather\"\nkeywords = [\"Rain\", \"sun\"]\n",
        )
        .unwrap();

        let table = load_topic_table(Some(&path)).unwrap();
        assert_eq!(table.classify("Purple RAIN"), "weather");
        assert_eq!(table.classify("love"), "other");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_topic_table(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_invalid_file_is_topics_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topics.toml");
        std::fs::write(&path, "[[topic]]\nlabel = \"\"\nkeywords = [\"x\"]\n").unwrap();
        let err = load_topic_table(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Topics(_)));
    }
}
