use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

mod db;
mod error;
mod features;
mod history;
mod models;
mod predict;
mod report;
mod schema;
mod temporal;

use error::SchemaError;
use models::{DailySurvey, EmployeeRecord, NewEmployee};
use predict::LogisticModel;
use schema::BusinessTravel;

#[derive(Parser)]
#[command(name = "workday-pulse")]
#[command(about = "Workday satisfaction tracker backed by an attrition model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Add an employee from a JSON record
    AddEmployee {
        #[arg(long)]
        json: PathBuf,
    },
    /// Submit a workday evaluation and score it
    Submit {
        #[arg(long)]
        employee_id: i64,
        /// Environment satisfaction, 1-4
        #[arg(long)]
        environment: i32,
        /// Job involvement, 1-4
        #[arg(long)]
        involvement: i32,
        /// Job satisfaction, 1-4
        #[arg(long)]
        satisfaction: i32,
        /// Overtime worked, 0 or 1
        #[arg(long)]
        overtime: i32,
        /// Performance rating, 1-4
        #[arg(long)]
        performance: i32,
        /// Work-life balance, 1-4
        #[arg(long)]
        balance: i32,
        /// Non-Travel, Travel_Rarely or Travel_Frequently
        #[arg(long, default_value = "Travel_Rarely")]
        travel: String,
        /// Survey date, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "model/attrition.json")]
        model: PathBuf,
    },
    /// Import workday evaluations from a CSV file and score each row
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "model/attrition.json")]
        model: PathBuf,
    },
    /// Show the satisfaction history for one employee
    History {
        #[arg(long)]
        employee_id: i64,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    let today = Utc::now().date_naive();

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool, today).await?;
            println!("Seed data inserted.");
        }
        Commands::AddEmployee { json } => {
            let raw = std::fs::read_to_string(&json)
                .with_context(|| format!("failed to read {}", json.display()))?;
            let new: NewEmployee = serde_json::from_str(&raw)
                .with_context(|| format!("malformed employee record {}", json.display()))?;
            let id = db::next_employee_id(&pool).await?;
            let employee = EmployeeRecord::create(id, new, today)?;
            db::insert_employee(&pool, &employee).await?;
            println!("Employee {} added with id {id}.", employee.full_name());
        }
        Commands::Submit {
            employee_id,
            environment,
            involvement,
            satisfaction,
            overtime,
            performance,
            balance,
            travel,
            date,
            model,
        } => {
            let employee = db::fetch_employee(&pool, employee_id)
                .await?
                .ok_or(SchemaError::UnknownEmployee(employee_id))?;
            let model = LogisticModel::from_path(&model)?;
            let survey = DailySurvey {
                employee_id,
                date: date.unwrap_or(today),
                environment_satisfaction: environment,
                job_involvement: involvement,
                job_satisfaction: satisfaction,
                over_time: overtime,
                performance_rating: performance,
                work_life_balance: balance,
                business_travel: travel.parse::<BusinessTravel>()?,
            };

            let (prediction, record) = features::run(&employee, &survey, &model, today)?;
            db::insert_survey(&pool, &survey, &format!("submit-{}", Uuid::new_v4())).await?;
            db::insert_score(&pool, &record).await?;

            println!(
                "{}: attrition label {}, probability {:.3}, satisfaction {:.1}%",
                employee.full_name(),
                prediction.label,
                prediction.probability,
                record.satisfaction_pct()
            );
            print_history(&db::fetch_scores(&pool, employee_id).await?);
        }
        Commands::Import { csv, model } => {
            let model = LogisticModel::from_path(&model)?;
            let rows = db::read_survey_csv(&csv)?;
            let mut scored = 0usize;
            let mut skipped = 0usize;

            for (survey, source_key) in rows {
                let employee = db::fetch_employee(&pool, survey.employee_id)
                    .await?
                    .ok_or(SchemaError::UnknownEmployee(survey.employee_id))?;
                let (_, record) = features::run(&employee, &survey, &model, today)?;
                if db::insert_survey(&pool, &survey, &source_key).await? {
                    db::insert_score(&pool, &record).await?;
                    scored += 1;
                } else {
                    skipped += 1;
                }
            }

            println!(
                "Scored {scored} evaluations from {} ({skipped} already imported).",
                csv.display()
            );
        }
        Commands::History { employee_id } => {
            let employee = db::fetch_employee(&pool, employee_id)
                .await?
                .ok_or(SchemaError::UnknownEmployee(employee_id))?;
            println!("Satisfaction history for {}:", employee.full_name());
            print_history(&db::fetch_scores(&pool, employee_id).await?);
        }
        Commands::Report { out } => {
            let employees = db::fetch_employees(&pool).await?;
            let scores = db::fetch_all_scores(&pool).await?;
            let report = report::build_report(&employees, &scores);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn print_history(scores: &[models::ScoreRecord]) {
    match history::view(scores) {
        history::SatisfactionView::Empty => println!("No check-ins yet."),
        history::SatisfactionView::Point(point) => {
            println!("Satisfaction on {}: {:.1}%", point.date, point.satisfaction_pct);
        }
        history::SatisfactionView::Series(points) => {
            for point in points {
                println!("- {}: {:.1}%", point.date, point.satisfaction_pct);
            }
        }
    }
}
