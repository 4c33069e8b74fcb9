use crate::infra::{build_grading_service, ApiGradingService};
use clap::Args;
use pitchgrade::config::AppConfig;
use pitchgrade::error::AppError;
use pitchgrade::grading::{
    CounterLineup, Grade, LineupRecommendation, OpponentWeaknessReport, TeamId, TradeResult,
};

/// Number of arms each side offers in the demo trade.
const DEMO_TRADE_SIZE: usize = 2;

#[derive(Args, Debug)]
pub(crate) struct GradeArgs {
    /// Scoring profile key (standard, strikeout, groundball, control, clutch, sabermetrics)
    #[arg(long)]
    pub(crate) profile: Option<String>,
    /// Pitcher names as they appear in the season table
    #[arg(required = true)]
    pub(crate) names: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Team whose lineup is recommended and countered
    #[arg(long, default_value_t = 1)]
    pub(crate) team: u64,
    /// Opponent team to analyze
    #[arg(long, default_value_t = 2)]
    pub(crate) opponent: u64,
    /// Profile for the lineup and trade sections
    #[arg(long)]
    pub(crate) profile: Option<String>,
}

pub(crate) fn run_grade(args: GradeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_grading_service(&config)?;
    let profile = args.profile.as_deref();

    let resolved = service.evaluator().registry().resolve_or_standard(profile);
    let grades = service.grade_players(&args.names, profile)?;
    print!("{}", render_grades(&resolved.label, &grades));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_grading_service(&config)?;
    print!("{}", demo_report(&service, &args)?);
    Ok(())
}

fn demo_report(service: &ApiGradingService, args: &DemoArgs) -> Result<String, AppError> {
    let team = TeamId(args.team);
    let opponent = TeamId(args.opponent);
    let profile = args.profile.as_deref();

    let mut out = String::from("Pitcher grading demo\nProfiles:\n");
    for summary in service.profiles() {
        out.push_str(&format!("  {:<13} {}\n", summary.key, summary.label));
    }

    let lineup = service.recommend_lineup(team, profile)?;
    out.push_str(&format!("\nRecommended lineup for team {team}\n"));
    out.push_str(&render_lineup(&lineup));

    let opposing = service.recommend_lineup(opponent, profile)?;
    let side_a = top_names(&lineup, DEMO_TRADE_SIZE);
    let side_b = top_names(&opposing, DEMO_TRADE_SIZE);
    let trade = service.evaluate_trade(&side_a, &side_b, profile)?;
    out.push_str(&format!(
        "\nTrade: team {team} top {} for team {opponent} top {}\n",
        side_a.len(),
        side_b.len()
    ));
    out.push_str(&render_trade(&trade));

    let report = service.analyze_opponent(opponent)?;
    out.push_str(&format!("\nOpponent weaknesses for team {opponent}\n"));
    out.push_str(&render_weaknesses(&report));

    let counter = service.counter_lineup(opponent, team, None)?;
    out.push_str(&format!("\nCounter lineup for team {team}\n"));
    out.push_str(&render_counter(&counter));

    Ok(out)
}

fn top_names(recommendation: &LineupRecommendation, count: usize) -> Vec<String> {
    recommendation
        .lineup
        .iter()
        .take(count)
        .map(|entry| entry.name.clone())
        .collect()
}

fn render_grades(profile_name: &str, grades: &[Grade]) -> String {
    let mut out = format!("{profile_name} grades\n");
    for grade in grades {
        out.push_str(&format!(
            "  {:<24} {:>6.2}  {:<11} {}\n",
            grade.player_name,
            grade.score,
            grade.tier().label(),
            grade.analysis
        ));
    }
    out
}

fn render_lineup(recommendation: &LineupRecommendation) -> String {
    let mut out = String::new();
    for entry in &recommendation.lineup {
        out.push_str(&format!(
            "  {}. {:<24} {:<3} {:>6.2}\n",
            entry.rank, entry.name, entry.position, entry.score
        ));
    }
    out.push_str(&format!("  {}\n", recommendation.explanation));
    out
}

fn render_trade(trade: &TradeResult) -> String {
    format!(
        "  Side A {:>7.2} | Side B {:>7.2} | diff {:+.2}\n  Winner: {} (fairness {:.2}%)\n  {}\n",
        trade.side_a.total_grade(),
        trade.side_b.total_grade(),
        trade.diff,
        trade.winner.label(),
        trade.fairness_pct,
        trade.suggestion
    )
}

fn render_weaknesses(report: &OpponentWeaknessReport) -> String {
    let mut out = format!("  Average grade {:.2}\n", report.average_grade);
    for pitcher in &report.pitchers {
        out.push_str(&format!(
            "  {:<24} {:>6.2}  {}\n",
            pitcher.player_name,
            pitcher.grade,
            pitcher.weaknesses.as_deref().unwrap_or("no clear weakness")
        ));
    }
    out
}

fn render_counter(counter: &CounterLineup) -> String {
    let mut out = format!(
        "  Strategy {} | {}\n",
        counter.strategy, counter.opponent_weaknesses.summary
    );
    for entry in &counter.lineup {
        out.push_str(&format!(
            "  {}. {:<24} {:>6.2}\n",
            entry.rank, entry.name, entry.score
        ));
    }
    out
}
