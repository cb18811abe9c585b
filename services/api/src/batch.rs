use crate::infra::build_scoring_service;
use chrono::Local;
use clap::Args;
use lead_scoring::config::AppConfig;
use lead_scoring::error::AppError;
use lead_scoring::workflows::leads::scoring::RuleScore;
use lead_scoring::workflows::leads::{LeadImporter, Offer, RuleScorer, ScoredLead};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Offer definition as JSON (`name`, `value_props`, `ideal_use_cases`)
    #[arg(long)]
    pub(crate) offer: PathBuf,
    /// Lead CSV with a name,role,company,industry,location,linkedin_bio header
    #[arg(long)]
    pub(crate) leads: PathBuf,
    /// Write the results export to this path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Print the rule breakdown under each lead
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) fn load_offer(path: &Path) -> Result<Offer, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        offer,
        leads,
        output,
        explain,
    } = args;

    let config = AppConfig::load()?;
    let offer = load_offer(&offer)?;
    let leads = LeadImporter::from_path(leads)?;

    let service = build_scoring_service(config.classifier)?;
    service.set_offer(offer.clone());
    service.add_leads(leads.clone());
    let summary = service.score().await?;

    let mut rows: Vec<(ScoredLead, RuleScore)> = service
        .results()
        .into_iter()
        .zip(&leads)
        .map(|(result, lead)| (result, RuleScorer::score(lead, &offer)))
        .collect();
    rows.sort_by(|left, right| right.0.score.cmp(&left.0.score));

    println!("Lead scoring run: {}", offer.name);
    println!(
        "Scored {} leads at {}",
        summary.results_count,
        summary.completed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    );
    println!();
    for line in render_ranking(&rows, explain) {
        println!("{line}");
    }

    if let Some(path) = output {
        std::fs::write(&path, service.export_csv()?)?;
        println!("\nResults written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn render_ranking(rows: &[(ScoredLead, RuleScore)], explain: bool) -> Vec<String> {
    let mut lines = vec![format!("{:>3}  {:>5}  {:<6}  {}", "#", "Score", "Intent", "Lead")];

    for (rank, (result, rule_score)) in rows.iter().enumerate() {
        lines.push(format!(
            "{:>3}  {:>5}  {:<6}  {} ({} @ {})",
            rank + 1,
            result.score,
            result.intent.label(),
            result.name,
            result.role,
            result.company
        ));
        lines.push(format!("{:17}{}", "", result.reason));

        if explain {
            lines.push(format!(
                "{:17}rules {} + ai {}",
                "", result.raw_rule_score, result.raw_ai_points
            ));
            for component in &rule_score.components {
                lines.push(format!(
                    "{:19}{}: {} ({})",
                    "",
                    component.factor.label(),
                    component.points,
                    component.notes
                ));
            }
        }
    }

    lines
}
