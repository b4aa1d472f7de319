use crate::infra::read_json_input;
use crate::routes::MatchRequest;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use congregation_ai::config::AppConfig;
use congregation_ai::error::AppError;
use congregation_ai::workflows::analytics::{
    DonationRow, ExecutiveReport, PeriodMetrics, ReportPeriod, TrendInputs,
};
use congregation_ai::workflows::platform::{PlatformHealth, TenantSnapshot};
use congregation_ai::workflows::volunteers::{
    recommend, AssignmentNeed, AutoAssignment, AvailabilityMatrix, Daypart, VolunteerCandidate,
    VolunteerId, VolunteerProfile, VolunteerRecommendation, Weekday,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AutoAssignArgs {
    /// JSON file with `need` and `candidates`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the raw JSON result instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// JSON file with an array of volunteer profiles
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Maximum number of recommendations to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct HealthReportArgs {
    /// JSON file with `period`, `metrics` and optional `trends`
    #[arg(long)]
    pub(crate) input: PathBuf,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Ministry category used for the matching walk-through
    #[arg(long, default_value = "CULTO")]
    pub(crate) category: String,
    /// Skip the health report and tenant monitor portion of the demo.
    #[arg(long)]
    pub(crate) skip_report: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportInput {
    pub(crate) period: ReportPeriod,
    #[serde(default)]
    pub(crate) metrics: PeriodMetrics,
    #[serde(default)]
    pub(crate) trends: TrendInputs,
}

pub(crate) fn run_auto_assign(args: AutoAssignArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = config.scoring.match_engine()?;
    let request: MatchRequest = read_json_input(&args.input)?;

    let outcome = engine.auto_assign(&request.need, &request.candidates)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        render_auto_assignment(&outcome);
    }
    Ok(())
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let profiles: Vec<VolunteerProfile> = read_json_input(&args.input)?;
    let recommendations = recommend(&profiles, args.limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        render_recommendations(&recommendations);
    }
    Ok(())
}

pub(crate) fn run_health_report(args: HealthReportArgs) -> Result<(), AppError> {
    let input: ReportInput = read_json_input(&args.input)?;
    let report = ExecutiveReport::generate(input.period, &input.metrics, &input.trends)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_health_report(&report);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        category,
        skip_report,
    } = args;

    let config = AppConfig::load()?;
    let engine = config.scoring.match_engine()?;

    println!("Congregation scoring demo");
    let candidates = demo_candidates();
    let need = AssignmentNeed::for_category(category.as_str()).with_assigned("samuel");

    let ranking = engine.rank(&need, &candidates)?;
    println!("\nCandidate ranking for {}", ranking.category);
    for (position, entry) in ranking.ranked.iter().enumerate() {
        println!(
            "{:>2}. {} | raw {} | match {}% | {} active assignment(s)",
            position + 1,
            entry.display_name,
            entry.raw_score,
            entry.match_percent,
            entry.current_assignments
        );
        for component in &entry.components {
            println!(
                "      - {:?}: {} ({})",
                component.factor, component.score, component.notes
            );
        }
    }
    for exclusion in &ranking.excluded {
        println!(
            "    excluded {}: {}",
            exclusion.volunteer_id.as_str(),
            exclusion.reason.label()
        );
    }

    let outcome = engine.auto_assign(&need, &candidates)?;
    render_auto_assignment(&outcome);

    let profiles: Vec<VolunteerProfile> = candidates
        .into_iter()
        .map(|candidate| candidate.profile)
        .collect();
    render_recommendations(&recommend(&profiles, Some(3)));

    if skip_report {
        return Ok(());
    }

    let end = Utc::now();
    let period = ReportPeriod::new(end - Duration::days(30), end)?;
    let report =
        ExecutiveReport::generate(period, &demo_metrics(), &demo_trends(period.start))?;
    render_health_report(&report);

    let platform = PlatformHealth::summarize(&demo_tenants())?;
    println!("\nPlatform tenant health");
    println!(
        "- {} tenants | {} active | {} healthy | {} at risk | average score {}",
        platform.summary.total_tenants,
        platform.summary.active_tenants,
        platform.summary.healthy_tenants,
        platform.summary.at_risk_tenants,
        platform.summary.average_health_score
    );
    for tenant in &platform.tenants {
        println!(
            "  - {}: {} ({} risk)",
            tenant.name, tenant.health_score, tenant.risk_label
        );
    }
    for alert in &platform.alerts {
        println!("  CRITICAL {}", alert.message);
    }

    Ok(())
}

fn render_auto_assignment(outcome: &AutoAssignment) {
    println!(
        "\nAuto-assignment for {}: {} ({} of {} eligible)",
        outcome.category, outcome.message, outcome.assigned_count, outcome.eligible_count
    );
    println!("Required roles: {}", outcome.required_roles.join(", "));
    for assignment in &outcome.assignments {
        let basis = if assignment.role_matched {
            "skill match"
        } else {
            "open slot"
        };
        println!(
            "- {} -> {} ({basis}, raw {})",
            assignment.display_name, assignment.role, assignment.raw_score
        );
    }
}

fn render_recommendations(recommendations: &[VolunteerRecommendation]) {
    println!("\nVolunteer recommendations");
    if recommendations.is_empty() {
        println!("- none (no active volunteers)");
    }
    for recommendation in recommendations {
        println!(
            "- {} | {}% | {} priority",
            recommendation.display_name,
            recommendation.match_percent,
            recommendation.priority.label()
        );
        for note in &recommendation.reasoning {
            println!("    {note}");
        }
    }
}

fn render_health_report(report: &ExecutiveReport) {
    let health = &report.health;
    println!(
        "\nChurch health {} to {}",
        report.period.start.date_naive(),
        report.period.end.date_naive()
    );
    println!(
        "- Overall {} ({}) | growth {} | engagement {} | financial {} | ministry {} | community {}",
        health.overall,
        report.band_label,
        health.growth,
        health.engagement,
        health.financial,
        health.ministry,
        health.community
    );
    println!(
        "- {} members | {} new | {:.2} donated ({:.2} average)",
        report.digest.total_members,
        report.digest.new_members,
        report.digest.donation_total,
        report.digest.average_donation
    );

    if !report.achievements.is_empty() {
        println!("Achievements:");
        for achievement in &report.achievements {
            println!("  - {}: {}", achievement.title, achievement.detail);
        }
    }
    if !report.challenges.is_empty() {
        println!("Challenges:");
        for challenge in &report.challenges {
            println!(
                "  - [{}] {}: {}",
                challenge.severity.label(),
                challenge.title,
                challenge.detail
            );
        }
    }
    if !report.recommendations.is_empty() {
        println!("Recommendations:");
        for recommendation in &report.recommendations {
            println!(
                "  - [{}] {}: {}",
                recommendation.priority.label(),
                recommendation.title,
                recommendation.action
            );
        }
    }

    println!("Trend:");
    for bucket in &report.trends.buckets {
        println!(
            "  - {}: {} new | {:.2} donated | {} events",
            bucket.start.date_naive(),
            bucket.new_members,
            bucket.donation_total,
            bucket.events
        );
    }
}

fn demo_profile(id: &str, name: &str, primary: &[&str], skills: &[&str]) -> VolunteerProfile {
    VolunteerProfile {
        id: VolunteerId::new(id),
        display_name: name.to_string(),
        primary_gifts: primary.iter().map(|gift| gift.to_string()).collect(),
        secondary_gifts: Vec::new(),
        ministry_passions: Vec::new(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        past_assignments: 0,
        active: true,
        availability: None,
    }
}

fn demo_candidates() -> Vec<VolunteerCandidate> {
    let mut maria = demo_profile("maria", "María López", &["Música", "Enseñanza"], &[]);
    maria.ministry_passions = vec!["Alabanza".to_string()];
    maria.past_assignments = 6;
    maria.availability = Some(
        AvailabilityMatrix::default()
            .with_slot(Weekday::Sunday, Daypart::Morning)
            .with_slot(Weekday::Wednesday, Daypart::Evening),
    );

    let mut jose = demo_profile("jose", "José Pérez", &[], &["Sonido en vivo"]);
    jose.past_assignments = 3;

    let mut ana = demo_profile("ana", "Ana Ruiz", &["Servicio"], &["Hospitalidad"]);
    ana.secondary_gifts = vec!["Misericordia".to_string()];

    let samuel = demo_profile("samuel", "Samuel Ortiz", &["Música"], &[]);

    let mut elena = demo_profile("elena", "Elena Vargas", &["Liderazgo"], &["Ujier"]);
    elena.past_assignments = 2;

    let mut tomas = demo_profile("tomas", "Tomás Rey", &["Música"], &[]);
    tomas.active = false;

    vec![
        VolunteerCandidate {
            profile: maria,
            current_assignments: 1,
            has_conflict: false,
        },
        VolunteerCandidate {
            profile: jose,
            current_assignments: 0,
            has_conflict: false,
        },
        VolunteerCandidate {
            profile: ana,
            current_assignments: 0,
            has_conflict: true,
        },
        VolunteerCandidate {
            profile: samuel,
            current_assignments: 0,
            has_conflict: false,
        },
        VolunteerCandidate {
            profile: elena,
            current_assignments: 2,
            has_conflict: false,
        },
        VolunteerCandidate {
            profile: tomas,
            current_assignments: 0,
            has_conflict: false,
        },
    ]
}

fn demo_metrics() -> PeriodMetrics {
    PeriodMetrics {
        total_members: 180,
        new_members: 6,
        members_at_period_start: Some(174),
        retained_members: Some(118),
        check_ins: 520,
        events_held: 9,
        expected_attendance: 400,
        actual_attendance: 230,
        donation_total: 7_450.0,
        donation_count: 61,
        donor_count: 48,
        active_volunteers: 14,
        active_automation_rules: 0,
    }
}

fn demo_trends(start: DateTime<Utc>) -> TrendInputs {
    TrendInputs {
        member_joined: [2, 9, 11, 17, 24, 28]
            .iter()
            .map(|day| start + Duration::days(*day))
            .collect(),
        donations: (0..30)
            .step_by(3)
            .map(|day| DonationRow {
                at: start + Duration::days(day) + Duration::hours(11),
                amount: 120.0 + (day as f64) * 15.0,
            })
            .collect(),
        events: [0, 7, 14, 21, 28]
            .iter()
            .map(|day| start + Duration::days(*day) + Duration::hours(10))
            .collect(),
    }
}

fn demo_tenants() -> Vec<TenantSnapshot> {
    let tenant = |id: &str, name: &str| TenantSnapshot {
        tenant_id: id.to_string(),
        name: name.to_string(),
        active: true,
        member_count: 0,
        recent_events: 0,
        recent_donations: 0,
        donation_total: 0.0,
        active_users: 0,
        days_since_created: 0,
    };

    vec![
        TenantSnapshot {
            member_count: 180,
            recent_events: 9,
            recent_donations: 61,
            donation_total: 7_450.0,
            active_users: 5,
            days_since_created: 420,
            ..tenant("central", "Iglesia Central")
        },
        TenantSnapshot {
            member_count: 14,
            recent_events: 2,
            active_users: 1,
            days_since_created: 20,
            ..tenant("esperanza", "Comunidad Esperanza")
        },
        TenantSnapshot {
            active: false,
            member_count: 3,
            days_since_created: 95,
            ..tenant("norte", "Iglesia del Norte")
        },
    ]
}
