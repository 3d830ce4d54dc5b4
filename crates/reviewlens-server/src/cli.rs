//! Offline subcommands: run the pipelines over a JSON file without
//! starting the server.

use std::path::Path;

use anyhow::Context;
use reviewlens_core::Review;
use reviewlens_runtime::Orchestrator;

/// Read a review file: either a bare array or `{"reviews": [...]}`.
pub fn read_reviews(path: &Path) -> anyhow::Result<Vec<Review>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let reviews = match value {
        serde_json::Value::Object(mut map) => map
            .remove("reviews")
            .context("expected an array of reviews or an object with a \"reviews\" field")?,
        other => other,
    };
    serde_json::from_value(reviews).context("Invalid review record")
}

/// `reviewlens analyze <reviews.json> <category>`
pub async fn analyze(orchestrator: &Orchestrator, path: &Path, category: &str) -> anyhow::Result<()> {
    let reviews = read_reviews(path)?;
    if orchestrator.registry().get(category).is_none() {
        eprintln!(
            "Warning: category '{}' is not configured; every review will be classified as other",
            category
        );
    }
    let analysis = orchestrator.analyze(&reviews, category).await?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

/// `reviewlens categories`
pub fn print_categories(orchestrator: &Orchestrator) {
    let registry = orchestrator.registry();
    println!("{} categories:", registry.len());
    for id in registry.category_ids() {
        if let Some(config) = registry.get(id) {
            println!("  {:<14} {}", id, config.essence_aspect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVIEW: &str = r#"{"id":"r1","author":"a","platform":"blog","date":"2024-05-01","rating":4,"content":"good"}"#;

    #[test]
    fn test_read_bare_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        std::fs::write(&path, format!("[{}]", REVIEW)).unwrap();
        let reviews = read_reviews(&path).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, "r1");
    }

    #[test]
    fn test_read_wrapped_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        std::fs::write(&path, format!(r#"{{"reviews":[{},{}]}}"#, REVIEW, REVIEW)).unwrap();
        assert_eq!(read_reviews(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_read_rejects_bad_rating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        std::fs::write(&path, format!("[{}]", REVIEW.replace("\"rating\":4", "\"rating\":9"))).unwrap();
        assert!(read_reviews(&path).is_err());
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_reviews(Path::new("/nonexistent/reviews.json")).is_err());
    }
}
