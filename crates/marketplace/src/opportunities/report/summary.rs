use super::super::domain::{SwuOpportunity, SwuOpportunityStatus, SwuProposalSlim};
use super::super::scores::{round_score, ScoreDisplay};
use super::views::ReportCard;
use serde::Serialize;

/// Fold over the proposals that carry a total score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreStatistics {
    pub scored: usize,
    pub highest: Option<f64>,
    pub average: Option<f64>,
}

/// Highest and mean total score over the scored subset only.
///
/// Unscored proposals contribute nothing; an empty subset yields `None` for
/// both values rather than a zero or NaN. The mean is `sum / count` over the
/// same subset.
pub fn score_statistics(proposals: &[SwuProposalSlim]) -> ScoreStatistics {
    let (highest, sum, scored) = proposals
        .iter()
        .filter_map(|proposal| proposal.total_score)
        .fold((None::<f64>, 0.0_f64, 0_usize), |(highest, sum, count), score| {
            let highest = Some(highest.map_or(score, |current| current.max(score)));
            (highest, sum + score, count + 1)
        });

    ScoreStatistics {
        scored,
        highest,
        average: (scored > 0).then(|| sum / scored as f64),
    }
}

/// Report-card figures for an opportunity's proposals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportCardSummary {
    pub num_proposals: u32,
    pub highest_score: Option<f64>,
    pub average_score: Option<f64>,
}

/// Builds the report card. The proposal count comes from the opportunity's
/// upstream reporting, not from the (possibly filtered) visible list, and the
/// score figures stay hidden until the opportunity is awarded.
pub fn aggregate(opportunity: &SwuOpportunity, proposals: &[SwuProposalSlim]) -> ReportCardSummary {
    let num_proposals = opportunity.reported_num_proposals();

    if opportunity.status != SwuOpportunityStatus::Awarded {
        return ReportCardSummary {
            num_proposals,
            highest_score: None,
            average_score: None,
        };
    }

    let statistics = score_statistics(proposals);
    ReportCardSummary {
        num_proposals,
        highest_score: statistics.highest,
        average_score: statistics.average,
    }
}

impl ReportCardSummary {
    pub fn rounded(self, decimals: u32) -> Self {
        Self {
            num_proposals: self.num_proposals,
            highest_score: self.highest_score.map(|score| round_score(score, decimals)),
            average_score: self.average_score.map(|score| round_score(score, decimals)),
        }
    }

    pub fn cards(&self, display: &ScoreDisplay) -> Vec<ReportCard> {
        let proposals_value = if self.num_proposals == 0 {
            display.placeholder.clone()
        } else {
            self.num_proposals.to_string()
        };

        vec![
            ReportCard {
                icon: "comment-dollar",
                icon_color: None,
                name: if self.num_proposals == 1 {
                    "Proposal"
                } else {
                    "Proposals"
                },
                value: proposals_value,
            },
            ReportCard {
                icon: "star-full",
                icon_color: Some("c-report-card-icon-highlight"),
                name: "Top Score",
                value: display.format(self.highest_score),
            },
            ReportCard {
                icon: "star-half",
                icon_color: Some("c-report-card-icon-highlight"),
                name: "Avg. Score",
                value: display.format(self.average_score),
            },
        ]
    }
}
