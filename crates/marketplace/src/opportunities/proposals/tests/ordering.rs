use proptest::prelude::*;

use super::common::*;
use crate::opportunities::domain::{ScoreKey, SwuProposalSlim, SwuProposalStatus};
use crate::opportunities::ordering::{compare_proposals_for_public_sector, sort_proposals_for_public_sector};
use std::cmp::Ordering;

fn ids(proposals: &[SwuProposalSlim]) -> Vec<&str> {
    proposals.iter().map(|proposal| proposal.id.0.as_str()).collect()
}

#[test]
fn scored_proposals_lead_in_descending_order() {
    let mut proposals = evaluated_proposals();
    sort_proposals_for_public_sector(&mut proposals, ScoreKey::Total);
    assert_eq!(ids(&proposals), vec!["p-2", "p-1", "p-3", "p-4"]);
}

#[test]
fn zero_score_outranks_a_missing_one() {
    let mut proposals = vec![
        proposal("p-1", "Absent Inc", SwuProposalStatus::Submitted, None),
        proposal(
            "p-2",
            "Zero Ltd",
            SwuProposalStatus::EvaluatedTeamScenario,
            Some(0.0),
        ),
    ];
    sort_proposals_for_public_sector(&mut proposals, ScoreKey::Total);
    assert_eq!(ids(&proposals), vec!["p-2", "p-1"]);
}

#[test]
fn ties_fall_back_to_case_insensitive_name() {
    let mut proposals = vec![
        proposal("p-1", "zephyr", SwuProposalStatus::EvaluatedTeamScenario, Some(80.0)),
        proposal("p-2", "Acme", SwuProposalStatus::EvaluatedTeamScenario, Some(80.0)),
        proposal("p-3", "beta", SwuProposalStatus::EvaluatedTeamScenario, Some(80.0)),
    ];
    sort_proposals_for_public_sector(&mut proposals, ScoreKey::Total);
    assert_eq!(ids(&proposals), vec!["p-2", "p-3", "p-1"]);
}

#[test]
fn identical_names_keep_fetch_order() {
    let mut proposals = vec![
        proposal("p-1", "Same Co", SwuProposalStatus::Submitted, None),
        proposal("p-2", "Same Co", SwuProposalStatus::Submitted, None),
    ];
    sort_proposals_for_public_sector(&mut proposals, ScoreKey::Total);
    assert_eq!(ids(&proposals), vec!["p-1", "p-2"]);
}

#[test]
fn individuals_sort_by_their_own_name() {
    let mut proposals = vec![
        individual("p-1", "Morgan Reyes", Some(60.0)),
        proposal("p-2", "Kestrel Labs", SwuProposalStatus::EvaluatedTeamScenario, Some(60.0)),
    ];
    sort_proposals_for_public_sector(&mut proposals, ScoreKey::Total);
    assert_eq!(ids(&proposals), vec!["p-2", "p-1"]);
}

#[test]
fn other_score_keys_order_by_their_column() {
    let mut low = proposal("p-1", "Low", SwuProposalStatus::EvaluatedTeamScenario, Some(90.0));
    low.price_score = Some(10.0);
    let mut high = proposal("p-2", "High", SwuProposalStatus::EvaluatedTeamScenario, Some(50.0));
    high.price_score = Some(95.0);

    assert_eq!(
        compare_proposals_for_public_sector(&low, &high, ScoreKey::Price),
        Ordering::Greater
    );
    assert_eq!(
        compare_proposals_for_public_sector(&low, &high, ScoreKey::Total),
        Ordering::Less
    );
}

fn arbitrary_proposal() -> impl Strategy<Value = SwuProposalSlim> {
    (
        "[a-f]{1,3}",
        "[A-Za-z]{1,6}",
        proptest::option::of(0.0_f64..=100.0),
    )
        .prop_map(|(id, name, total)| {
            proposal(&id, &name, SwuProposalStatus::EvaluatedTeamScenario, total)
        })
}

proptest! {
    #[test]
    fn missing_scores_never_precede_present_ones(
        mut proposals in proptest::collection::vec(arbitrary_proposal(), 0..12)
    ) {
        sort_proposals_for_public_sector(&mut proposals, ScoreKey::Total);
        let first_missing = proposals
            .iter()
            .position(|proposal| proposal.total_score.is_none())
            .unwrap_or(proposals.len());
        prop_assert!(proposals[first_missing..]
            .iter()
            .all(|proposal| proposal.total_score.is_none()));
    }

    #[test]
    fn present_scores_are_non_increasing(
        mut proposals in proptest::collection::vec(arbitrary_proposal(), 0..12)
    ) {
        sort_proposals_for_public_sector(&mut proposals, ScoreKey::Total);
        let scores: Vec<f64> = proposals.iter().filter_map(|proposal| proposal.total_score).collect();
        prop_assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn sorting_is_idempotent(
        mut proposals in proptest::collection::vec(arbitrary_proposal(), 0..12)
    ) {
        sort_proposals_for_public_sector(&mut proposals, ScoreKey::Total);
        let once = proposals.clone();
        sort_proposals_for_public_sector(&mut proposals, ScoreKey::Total);
        prop_assert_eq!(once, proposals);
    }
}
