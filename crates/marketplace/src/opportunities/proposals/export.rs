use super::super::domain::SwuProposalSlim;
use super::super::presentation::swu_proposal_status_to_title_case;
use super::super::scores::ScoreDisplay;
use crate::users::UserType;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv flush failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    #[serde(rename = "Proposal ID")]
    proposal_id: &'a str,
    #[serde(rename = "Proponent")]
    proponent: &'a str,
    #[serde(rename = "Status")]
    status: &'static str,
    #[serde(rename = "Team Questions")]
    questions: String,
    #[serde(rename = "Code Challenge")]
    challenge: String,
    #[serde(rename = "Team Scenario")]
    scenario: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Total")]
    total: String,
}

/// Writes one CSV row per proposal, in the order given.
///
/// With `anonymous` set, organizations are listed under their anonymous
/// proponent name. Individuals have no anonymous name and keep their own.
pub fn write_proposals_csv<W: Write>(
    writer: W,
    proposals: &[SwuProposalSlim],
    display: &ScoreDisplay,
    anonymous: bool,
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for proposal in proposals {
        let proponent = if anonymous {
            proposal
                .anonymous_name()
                .unwrap_or_else(|| proposal.proponent_name())
        } else {
            proposal.proponent_name()
        };

        csv.serialize(ExportRecord {
            proposal_id: &proposal.id.0,
            proponent,
            status: swu_proposal_status_to_title_case(proposal.status, UserType::Government),
            questions: display.format(proposal.questions_score),
            challenge: display.format(proposal.challenge_score),
            scenario: display.format(proposal.scenario_score),
            price: display.format(proposal.price_score),
            total: display.format(proposal.total_score),
        })?;
    }
    csv.flush()?;
    Ok(())
}

pub fn proposals_csv(
    proposals: &[SwuProposalSlim],
    display: &ScoreDisplay,
    anonymous: bool,
) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_proposals_csv(&mut buffer, proposals, display, anonymous)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
