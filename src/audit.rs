//! Page audit: extract, resolve, score
//!
//! Extraction is the only async step. Once raw metadata is in hand the rest
//! is a pure function of it.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chromiumoxide::Page;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::manager::BrowserManager;
use crate::metadata::{RawMetadata, ResolvedMetadata, resolve};
use crate::navigate::{NavigateOptions, open_page};
use crate::page_extractor::extract_raw_metadata;
use crate::rules::{FacebookRules, RuleSet, ScoredResult, TwitterRules};

/// Anything that can hand over the raw tags of one page
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_metadata(&self) -> Result<RawMetadata>;
}

#[async_trait]
impl MetadataSource for Page {
    async fn fetch_metadata(&self) -> Result<RawMetadata> {
        extract_raw_metadata(self).await
    }
}

/// A snapshot captured earlier
#[async_trait]
impl MetadataSource for RawMetadata {
    async fn fetch_metadata(&self) -> Result<RawMetadata> {
        Ok(self.clone())
    }
}

/// Both scored results for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub facebook: ScoredResult,
    pub twitter: ScoredResult,
}

impl AuditReport {
    /// Results in emission order: facebook, then twitter
    pub fn results(&self) -> [&ScoredResult; 2] {
        [&self.facebook, &self.twitter]
    }

    pub fn into_results(self) -> Vec<ScoredResult> {
        vec![self.facebook, self.twitter]
    }

    /// Weighted page score in [0, 1]
    pub fn overall_score(&self) -> f64 {
        self.results().iter().map(|r| r.weight * r.score).sum()
    }
}

/// Score already extracted metadata.
pub fn evaluate(raw: &RawMetadata) -> AuditReport {
    evaluate_resolved(&resolve(raw))
}

pub fn evaluate_resolved(resolved: &ResolvedMetadata) -> AuditReport {
    AuditReport {
        facebook: FacebookRules::evaluate(resolved),
        twitter: TwitterRules::evaluate(resolved),
    }
}

/// Fetch metadata from `source` and score it.
///
/// # Errors
/// Whatever `fetch_metadata` returns, unchanged. No partial report is built.
pub async fn audit<S>(source: &S) -> Result<AuditReport>
where
    S: MetadataSource + ?Sized,
{
    let raw = source.fetch_metadata().await?;
    let report = evaluate(&raw);
    info!(
        facebook = report.facebook.score,
        twitter = report.twitter.score,
        overall = report.overall_score(),
        "Audit complete"
    );
    Ok(report)
}

/// Report for a URL, as produced by `audit_url`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAudit {
    pub url: String,
    pub audited_at: DateTime<Utc>,
    pub overall_score: f64,
    #[serde(flatten)]
    pub report: AuditReport,
}

/// Load `url` in the shared browser and audit it.
///
/// The page is closed afterwards whatever the outcome; a failure to close is
/// only logged.
pub async fn audit_url(
    manager: &BrowserManager,
    url: &str,
    options: &NavigateOptions,
) -> Result<PageAudit> {
    let page = open_page(manager, url, options).await?;
    let outcome = audit(&page).await;

    if let Err(e) = page.close().await {
        warn!("Failed to close audited page: {}", e);
    }

    let report = outcome?;
    Ok(PageAudit {
        url: url.to_string(),
        audited_at: Utc::now(),
        overall_score: report.overall_score(),
        report,
    })
}
