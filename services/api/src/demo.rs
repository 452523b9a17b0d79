use crate::cli::Viewer;
use crate::infra::{
    load_snapshot, seed_snapshot, InMemoryAwardNotifier, InMemoryOpportunityRepository,
    SEED_OPPORTUNITY_ID,
};
use clap::Args;
use marketplace::config::AppConfig;
use marketplace::error::AppError;
use marketplace::opportunities::proposals::{
    modal_view, update, ModalId, ProposalReviewService, ProposalsTabMsg, ProposalsTabView, Toast,
};
use marketplace::opportunities::{OpportunityId, ScoreDisplay};
use marketplace::users::UserType;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Opportunity snapshot (JSON with `opportunity` and `proposals`)
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Role whose labels are rendered
    #[arg(long, value_enum, default_value_t = Viewer::Government)]
    pub(crate) viewer: Viewer,
    /// Also print the CSV export when it is available
    #[arg(long)]
    pub(crate) csv: bool,
    /// Use anonymous proponent names in the CSV export
    #[arg(long)]
    pub(crate) anonymous: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Proposal to award. Defaults to the top-ranked awardable proposal.
    #[arg(long)]
    pub(crate) award: Option<String>,
    /// Stop after the confirmation modal without awarding.
    #[arg(long)]
    pub(crate) dry_run: bool,
}

type DemoService = ProposalReviewService<InMemoryOpportunityRepository, InMemoryAwardNotifier>;

fn score_display() -> Result<ScoreDisplay, AppError> {
    let config = AppConfig::load()?;
    Ok(ScoreDisplay::from_config(&config.marketplace))
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        snapshot,
        viewer,
        csv,
        anonymous,
    } = args;

    let snapshot = load_snapshot(&snapshot)?;
    let opportunity_id = snapshot.opportunity.id.clone();
    let service = DemoService::new(
        Arc::new(InMemoryOpportunityRepository::from_snapshot(snapshot)),
        Arc::new(InMemoryAwardNotifier::default()),
        score_display()?,
    );

    let view = service.view(&opportunity_id, viewer.into())?;
    for line in render_tab(&view) {
        println!("{line}");
    }

    if csv {
        if view.show_export_link {
            let export = service.export_csv(&opportunity_id, viewer.into(), anonymous)?;
            println!();
            print!("{export}");
        } else {
            println!("\nCSV export becomes available once the code challenge is complete.");
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { award, dry_run } = args;

    let notifier = InMemoryAwardNotifier::default();
    let service = DemoService::new(
        Arc::new(InMemoryOpportunityRepository::from_snapshot(seed_snapshot())),
        Arc::new(notifier.clone()),
        score_display()?,
    );
    let opportunity_id = OpportunityId(SEED_OPPORTUNITY_ID.to_string());
    let viewer = UserType::Government;

    println!("Digital Marketplace award demo");
    let view = service.view(&opportunity_id, viewer)?;
    for line in render_tab(&view) {
        println!("{line}");
    }

    let state = service.load_tab(&opportunity_id, viewer)?;
    let gate = state.gate();
    let candidate = match award {
        Some(id) => state.proposals.iter().find(|proposal| proposal.id.0 == id),
        None => state.proposals.iter().find(|proposal| gate.allows(proposal)),
    };
    let Some(candidate) = candidate.cloned() else {
        println!("\nNo proposal can be awarded on this opportunity.");
        return Ok(());
    };

    let (state, _) = update(state, ProposalsTabMsg::ShowModal(ModalId::Award(candidate.id.clone())));
    if let Some(modal) = modal_view(&state) {
        println!("\n{}", modal.title);
        println!("  {}", modal.body);
        let actions: Vec<&str> = modal.actions.iter().map(|action| action.text).collect();
        println!("  [{}]", actions.join("] ["));
    }

    if dry_run {
        println!("\nDry run: award for {} not submitted.", candidate.proponent_name());
        return Ok(());
    }

    let outcome = service.award(&opportunity_id, &candidate.id, viewer)?;
    for toast in &outcome.toasts {
        println!("\n{}", render_toast(toast));
    }

    let view = ProposalsTabView::build(&outcome.state, service.display());
    for line in render_tab(&view) {
        println!("{line}");
    }
    println!("\nNotices queued: {}", notifier.notices().len());
    Ok(())
}

fn render_toast(toast: &Toast) -> String {
    format!("[{:?}] {}: {}", toast.kind, toast.title, toast.body)
}

/// Plain-text rendering of the proposals tab.
pub(crate) fn render_tab(view: &ProposalsTabView) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "{} ({}) [{}]",
            view.opportunity_title, view.opportunity_id.0, view.opportunity_badge.text
        ),
    ];

    let cards: Vec<String> = view
        .report_cards
        .iter()
        .map(|card| format!("{}: {}", card.name, card.value))
        .collect();
    lines.push(format!("Report card: {}", cards.join(" | ")));

    if let Some(message) = view.not_available_message {
        lines.push(message.to_string());
        return lines;
    }

    let header: Vec<&str> = view
        .head_cells
        .iter()
        .map(|cell| if cell.label.is_empty() { "Action" } else { cell.label })
        .collect();
    lines.push(header.join(" | "));

    for row in &view.rows {
        let proponent = match &row.proponent.anonymous_name {
            Some(anonymous) => format!("{} ({anonymous})", row.proponent.name),
            None => row.proponent.name.clone(),
        };
        let mut cells = vec![
            proponent,
            row.status.text.to_string(),
            row.questions.clone(),
            row.challenge.clone(),
            row.scenario.clone(),
            row.price.clone(),
            row.total.clone(),
        ];
        if view.can_proposals_be_awarded {
            cells.push(if row.award_action.is_some() {
                "Award".to_string()
            } else {
                String::new()
            });
        }
        lines.push(cells.join(" | "));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_service() -> DemoService {
        DemoService::new(
            Arc::new(InMemoryOpportunityRepository::from_snapshot(seed_snapshot())),
            Arc::new(InMemoryAwardNotifier::default()),
            ScoreDisplay::default(),
        )
    }

    #[test]
    fn render_tab_lists_ranked_rows_with_award_column() {
        let service = seeded_service();
        let view = service
            .view(
                &OpportunityId(SEED_OPPORTUNITY_ID.to_string()),
                UserType::Government,
            )
            .expect("seeded view");

        let lines = render_tab(&view);
        assert!(lines[1].starts_with("Permitting Modernization Sprint"));
        assert_eq!(lines[2], "Report card: Proposals: 4 | Top Score: - | Avg. Score: -");
        assert_eq!(lines[3], "Proponent | Status | TQ | CC | TS | Price | Total | Action");
        assert!(lines[4].starts_with("Fraser Valley Digital (Proponent 1) | Evaluated (TS)"));
        assert!(lines[4].ends_with("84.35% | Award"));
        assert!(lines[6].starts_with("Avery Lindqvist | Under Review (TS)"));
    }

    #[test]
    fn render_tab_after_award_shows_report_card() {
        let service = seeded_service();
        let outcome = service
            .award(
                &OpportunityId(SEED_OPPORTUNITY_ID.to_string()),
                &marketplace::opportunities::ProposalId("prop-102".to_string()),
                UserType::Admin,
            )
            .expect("award succeeds");

        let view = ProposalsTabView::build(&outcome.state, service.display());
        let lines = render_tab(&view);
        assert!(lines[1].ends_with("[Awarded]"));
        assert!(lines[2].contains("Top Score: 84.35%"));
        assert_eq!(lines[3], "Proponent | Status | TQ | CC | TS | Price | Total");
        assert_eq!(render_toast(&outcome.toasts[0]), "[Success] Opportunity Awarded: This opportunity has been awarded.");
    }
}
