use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::classify_types::BatchOutcome;
use crate::models::wardrobe_types::{ImageRef, WardrobeItem};
use crate::output::BatchProgressBar;
use crate::services::classifier::batch::BatchClassifier;
use crate::services::classifier::remote::RemoteClassifier;
use crate::services::classifier::ImageClassifier;
use crate::services::fs_service;
use crate::services::wardrobe_service::WardrobeStore;
use clap::Args;
use std::num::NonZeroUsize;
use tracing::{info, warn};

/// Arguments for the `analyze` command.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Image files, folders, http(s) URLs or data URIs
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Recurse into subfolders
    #[arg(short, long)]
    pub recursive: bool,

    /// Classifier endpoint (overrides config)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Maximum concurrent classification requests (default: unbounded)
    #[arg(long)]
    pub max_concurrency: Option<NonZeroUsize>,

    /// Print the batch outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub async fn analyze(args: &AnalyzeArgs, config: &AppConfig, store: &WardrobeStore) -> Result<(), AppError> {
    let images = fs_service::collect_image_refs(&args.inputs, args.recursive)?;
    if images.is_empty() {
        return Err("No images found in the given inputs".into());
    }

    let limit = config.selection_limit();
    if images.len() > limit {
        return Err(format!(
            "Selected {} images, but at most {} can be analyzed at once",
            images.len(),
            limit
        )
        .into());
    }

    let endpoint = args
        .endpoint
        .clone()
        .or_else(|| config.classifier.endpoint.clone())
        .ok_or_else(|| AppError {
            message: "No classifier endpoint configured. Set classifier.endpoint or pass --endpoint."
                .to_string(),
        })?;

    let classifier = RemoteClassifier::new(endpoint, config.timeout())?.with_api_key(config.api_key());
    let batch = BatchClassifier::new()
        .with_max_concurrency(args.max_concurrency.or_else(|| config.max_concurrency()));

    let outcome = run_batch(&batch, images, &classifier, !args.no_progress && !args.json).await;
    let added = store_successes(store, &outcome)?;
    info!("Added {} item(s) to the wardrobe", added);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.failed_count > 0 {
        println!("Upload results: {}", outcome.summary());
        for image in &outcome.failed {
            println!("  could not analyze {}", image.short());
        }
    } else {
        println!("Added {} item(s) to the wardrobe", added);
    }

    if outcome.total > 0 && outcome.succeeded_count == 0 {
        return Err(format!("None of the {} image(s) could be analyzed", outcome.total).into());
    }

    Ok(())
}

/// Run one batch with a progress bar.
///
/// The first Ctrl-C cancels the batch and abandons in-flight requests; a
/// second one exits the process.
pub async fn run_batch<C>(
    batch: &BatchClassifier,
    images: Vec<ImageRef>,
    classifier: &C,
    show_progress: bool,
) -> BatchOutcome
where
    C: ImageClassifier + ?Sized,
{
    let progress = BatchProgressBar::new(images.len(), show_progress);

    batch.reset_cancel_flag();
    let canceller = batch.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("Interrupted, cancelling remaining images (press Ctrl-C again to quit)");
        canceller.cancel();
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });

    let outcome = batch
        .classify_batch(images, classifier, |snapshot| progress.update(snapshot))
        .await;

    interrupt.abort();
    outcome
}

/// Merge successful classifications into the wardrobe, returning how many were added.
pub fn store_successes(store: &WardrobeStore, outcome: &BatchOutcome) -> Result<usize, AppError> {
    let items: Vec<WardrobeItem> = outcome
        .succeeded
        .iter()
        .map(WardrobeItem::from_classification)
        .collect();
    let added = items.len();
    store.add_items(items)?;
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wardrobe_types::{ClassificationResult, ClothingCategory};
    use crate::services::db::Database;

    fn store() -> WardrobeStore {
        WardrobeStore::new(Database::in_memory().unwrap())
    }

    #[tokio::test]
    async fn rejects_selection_over_limit() {
        let mut config = AppConfig::default();
        config.wardrobe.selection_limit = Some(1);
        config.classifier.endpoint = Some("http://127.0.0.1:9/classify".into());
        let args = AnalyzeArgs {
            inputs: vec![
                "data:image/png;base64,AAAA".into(),
                "data:image/png;base64,BBBB".into(),
            ],
            ..AnalyzeArgs::default()
        };

        let err = analyze(&args, &config, &store()).await.unwrap_err();
        assert!(err.message.contains("at most 1"));
    }

    #[tokio::test]
    async fn requires_an_endpoint() {
        let args = AnalyzeArgs {
            inputs: vec!["data:image/png;base64,AAAA".into()],
            ..AnalyzeArgs::default()
        };

        let err = analyze(&args, &AppConfig::default(), &store()).await.unwrap_err();
        assert!(err.message.contains("No classifier endpoint"));
    }

    #[tokio::test]
    async fn fails_when_no_image_could_be_analyzed() {
        let store = store();
        let mut config = AppConfig::default();
        config.classifier.timeout_secs = Some(2);
        let args = AnalyzeArgs {
            inputs: vec![
                "data:image/png;base64,AAAA".into(),
                "data:image/png;base64,BBBB".into(),
            ],
            // nothing listens on the discard port
            endpoint: Some("http://127.0.0.1:9/classify".into()),
            no_progress: true,
            ..AnalyzeArgs::default()
        };

        let err = analyze(&args, &config, &store).await.unwrap_err();
        assert!(err.message.contains("None of the 2 image(s)"));
        assert_eq!(store.total_items().unwrap(), 0);
    }

    #[tokio::test]
    async fn run_batch_clears_a_stale_cancellation() {
        let batch = BatchClassifier::new();
        batch.cancel();
        let classify = |image: ImageRef| async move {
            Ok::<_, crate::error::ClassifyError>(ClassificationResult {
                source_ref: image,
                category: ClothingCategory::Top,
                label: "Tee".into(),
                color: "grey".into(),
            })
        };

        let outcome = run_batch(&batch, vec!["a.jpg".into()], &classify, false).await;
        assert_eq!(outcome.succeeded_count, 1);
        assert!(!batch.is_cancelled());
    }

    #[test]
    fn store_successes_adds_only_succeeded_items() {
        let store = store();
        let outcome = BatchOutcome {
            total: 2,
            succeeded: vec![ClassificationResult {
                source_ref: "a.jpg".into(),
                category: ClothingCategory::Accessory,
                label: "Watch".into(),
                color: "silver".into(),
            }],
            failed: vec!["b.jpg".into()],
            succeeded_count: 1,
            failed_count: 1,
        };

        assert_eq!(store_successes(&store, &outcome).unwrap(), 1);
        let items = store.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].image_uri, "a.jpg");
    }
}
