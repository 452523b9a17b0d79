use super::domain::{ScoreKey, SwuProposalSlim};
use std::cmp::Ordering;

/// Public-sector ordering for a proposal list.
///
/// Scored proposals come first, highest score first. Proposals without a value
/// for `key` always sort after scored ones, so a missing score never reads as a
/// zero that outranks nothing. Ties fall back to the proponent name; callers
/// sort stably so equal names keep their fetch order.
pub fn compare_proposals_for_public_sector(
    a: &SwuProposalSlim,
    b: &SwuProposalSlim,
    key: ScoreKey,
) -> Ordering {
    match (a.score(key), b.score(key)) {
        (Some(left), Some(right)) => right
            .total_cmp(&left)
            .then_with(|| compare_proponent_names(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_proponent_names(a, b),
    }
}

pub fn sort_proposals_for_public_sector(proposals: &mut [SwuProposalSlim], key: ScoreKey) {
    proposals.sort_by(|a, b| compare_proposals_for_public_sector(a, b, key));
}

fn compare_proponent_names(a: &SwuProposalSlim, b: &SwuProposalSlim) -> Ordering {
    let (left, right) = (a.proponent_name(), b.proponent_name());
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}
