use crate::core::models::site::BindingSite;
use crate::engine::config::RankingConfig;
use tracing::{info, instrument};

/// The accepted sites, best first, with the threshold that admitted them.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSites {
    pub sites: Vec<BindingSite>,
    pub threshold: f64,
    /// `true` when nothing cleared the primary threshold and the relaxed one was used.
    pub relaxed: bool,
}

/// Stable sort by descending druggability score.
pub fn sort_by_score(sites: &mut [BindingSite]) {
    sites.sort_by(|a, b| b.druggability_score.total_cmp(&a.druggability_score));
}

pub fn filter_by_threshold(sites: &[BindingSite], threshold: f64) -> Vec<BindingSite> {
    sites
        .iter()
        .filter(|site| site.druggability_score >= threshold)
        .cloned()
        .collect()
}

/// Orders the scored sites and applies the adaptive acceptance threshold.
///
/// Equal scores keep their discovery order. If no site reaches `config.threshold`, the
/// full list is filtered again at `config.relaxed_threshold`.
#[instrument(skip_all, name = "site_ranking", fields(scored = sites.len()))]
pub fn rank_sites(mut sites: Vec<BindingSite>, config: &RankingConfig) -> RankedSites {
    sort_by_score(&mut sites);

    let accepted = filter_by_threshold(&sites, config.threshold);
    if !accepted.is_empty() || sites.is_empty() {
        info!(accepted = accepted.len(), threshold = config.threshold, "Sites ranked.");
        return RankedSites {
            sites: accepted,
            threshold: config.threshold,
            relaxed: false,
        };
    }

    let accepted = filter_by_threshold(&sites, config.relaxed_threshold);
    info!(
        accepted = accepted.len(),
        threshold = config.relaxed_threshold,
        "No site cleared the primary threshold, relaxed threshold applied."
    );
    RankedSites {
        sites: accepted,
        threshold: config.relaxed_threshold,
        relaxed: true,
    }
}
