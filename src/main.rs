use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use manor_audit::audit::domain::{
    AgeRange, Appliance, ApplianceCategory, EnergyBill, EnvelopeAssessment, EnvelopeRating,
    Equipment, EquipmentType, Home, Room,
};
use manor_audit::audit::report::HomeReport;
use manor_audit::config::AppConfig;
use manor_audit::error::AppError;
use manor_audit::{http, telemetry};
use std::sync::atomic::Ordering;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Manor Audit",
    about = "Run the home energy audit engine from the command line or as an HTTP service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Generate an audit report for a representative demo home
    Audit {
        #[command(subcommand)]
        command: AuditCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum AuditCommand {
    /// Grade the demo home and print its upgrade report
    Report(AuditReportArgs),
}

#[derive(Args, Debug)]
struct AuditReportArgs {
    /// Electricity rate in $/kWh (defaults to the configured rate)
    #[arg(long)]
    electricity_rate: Option<f64>,
    /// Emit the report as JSON instead of flat text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Audit {
            command: AuditCommand::Report(args),
        } => run_audit_report(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (app, readiness) = http::router(config.rates);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);

    info!(?config.environment, %addr, "home energy audit service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_audit_report(args: AuditReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let mut rates = config.rates;
    if let Some(rate) = args.electricity_rate {
        rates.electricity = rate;
    }

    let home = demo_home();
    let report = HomeReport::build(&home, &rates);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?
        );
    } else {
        print!("{}", report.render());
    }

    Ok(())
}

/// A 1990s single-family home with aging HVAC, mixed lighting, and one
/// scanned bill. Keeps the demo output representative of a real audit.
fn demo_home() -> Home {
    let mut home = Home::new("Demo Home");
    home.total_sqft = Some(1800.0);
    home.rooms.push(Room {
        name: "Living Room".to_string(),
        square_footage: 350.0,
    });

    let mut ac = Equipment::new(EquipmentType::CentralAc, AgeRange::Years15To20);
    ac.estimated_efficiency = 10.0;
    home.equipment.push(ac);
    let mut furnace = Equipment::new(EquipmentType::Furnace, AgeRange::Years10To15);
    furnace.estimated_efficiency = 85.0;
    home.equipment.push(furnace);
    home.equipment.push(Equipment::new(
        EquipmentType::WaterHeaterTank,
        AgeRange::Years10To15,
    ));

    let mut bulbs = Appliance::new(ApplianceCategory::IncandescentBulb);
    bulbs.quantity = 8;
    home.appliances.push(bulbs);
    home.appliances
        .push(Appliance::new(ApplianceCategory::Refrigerator));
    let mut tv = Appliance::new(ApplianceCategory::Television);
    tv.quantity = 2;
    home.appliances.push(tv);
    home.appliances
        .push(Appliance::new(ApplianceCategory::GamingConsole));
    home.appliances
        .push(Appliance::new(ApplianceCategory::Desktop));

    let mut bill = EnergyBill::new(1050.0, 178.50);
    bill.billing_period_start = NaiveDate::from_ymd_opt(2026, 6, 12);
    bill.billing_period_end = NaiveDate::from_ymd_opt(2026, 7, 12);
    home.energy_bills.push(bill);

    home.envelope = Some(EnvelopeAssessment {
        attic_insulation: EnvelopeRating::Poor,
        air_sealing: EnvelopeRating::Fair,
        weatherstripping: EnvelopeRating::Poor,
    });

    home
}

#[cfg(test)]
mod tests {
    use super::*;
    use manor_audit::audit::grading::EfficiencyGrade;
    use manor_audit::config::RatePlan;

    #[test]
    fn demo_home_produces_a_full_report() {
        let home = demo_home();
        assert!(home.validate().is_ok());

        let report = HomeReport::build(&home, &RatePlan::default());
        assert_ne!(report.grade, EfficiencyGrade::A);
        assert!(!report.upgrades.is_empty());
        assert!(!report.recommendations.is_empty());

        let text = report.render();
        assert!(text.contains("Energy Audit Report: Demo Home"));
    }
}
