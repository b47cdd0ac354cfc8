use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{DailySurvey, EmployeeRecord, ScoreRecord};
use crate::schema::{BusinessTravel, Department, EducationField, Gender, JobRole, MaritalStatus};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Next employee id over the stored collection. An empty table is a normal
/// first-run state and yields 1.
pub async fn next_employee_id(pool: &PgPool) -> anyhow::Result<i64> {
    let row = sqlx::query("SELECT COALESCE(MAX(id), 0) + 1 AS next_id FROM workday_pulse.employees")
        .fetch_one(pool)
        .await?;
    Ok(row.get("next_id"))
}

pub async fn insert_employee(pool: &PgPool, employee: &EmployeeRecord) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO workday_pulse.employees
        (id, first_name, last_name, birth_date, gender, marital_status,
         department, job_role, education_field, education, job_level,
         monthly_income, num_companies_worked, percent_salary_hike,
         contract_start_date, current_role_start_date, last_promotion_date,
         last_manager_change_date, total_working_years, years_with_curr_manager)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
        "#,
    )
    .bind(employee.id)
    .bind(&employee.first_name)
    .bind(&employee.last_name)
    .bind(employee.birth_date)
    .bind(employee.gender.as_str())
    .bind(employee.marital_status.as_str())
    .bind(employee.department.as_str())
    .bind(employee.job_role.as_str())
    .bind(employee.education_field.as_str())
    .bind(employee.education)
    .bind(employee.job_level)
    .bind(employee.monthly_income)
    .bind(employee.num_companies_worked)
    .bind(employee.percent_salary_hike)
    .bind(employee.contract_start_date)
    .bind(employee.current_role_start_date)
    .bind(employee.last_promotion_date)
    .bind(employee.last_manager_change_date)
    .bind(employee.total_working_years)
    .bind(employee.years_with_curr_manager)
    .execute(pool)
    .await?;
    Ok(())
}

fn employee_from_row(row: &sqlx::postgres::PgRow) -> anyhow::Result<EmployeeRecord> {
    Ok(EmployeeRecord {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        birth_date: row.get("birth_date"),
        gender: row.get::<String, _>("gender").parse::<Gender>()?,
        marital_status: row
            .get::<String, _>("marital_status")
            .parse::<MaritalStatus>()?,
        department: row.get::<String, _>("department").parse::<Department>()?,
        job_role: row.get::<String, _>("job_role").parse::<JobRole>()?,
        education_field: row
            .get::<String, _>("education_field")
            .parse::<EducationField>()?,
        education: row.get("education"),
        job_level: row.get("job_level"),
        monthly_income: row.get("monthly_income"),
        num_companies_worked: row.get("num_companies_worked"),
        percent_salary_hike: row.get("percent_salary_hike"),
        contract_start_date: row.get("contract_start_date"),
        current_role_start_date: row.get("current_role_start_date"),
        last_promotion_date: row.get("last_promotion_date"),
        last_manager_change_date: row.get("last_manager_change_date"),
        total_working_years: row.get("total_working_years"),
        years_with_curr_manager: row.get("years_with_curr_manager"),
    })
}

pub async fn fetch_employees(pool: &PgPool) -> anyhow::Result<Vec<EmployeeRecord>> {
    let rows = sqlx::query("SELECT * FROM workday_pulse.employees ORDER BY id")
        .fetch_all(pool)
        .await?;
    rows.iter().map(employee_from_row).collect()
}

pub async fn fetch_employee(pool: &PgPool, id: i64) -> anyhow::Result<Option<EmployeeRecord>> {
    let row = sqlx::query("SELECT * FROM workday_pulse.employees WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(employee_from_row).transpose()
}

/// Stores the raw submission alongside the derived score, keyed for
/// idempotent re-imports. Returns false when the key was already present.
pub async fn insert_survey(
    pool: &PgPool,
    survey: &DailySurvey,
    source_key: &str,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO workday_pulse.surveys
        (id, employee_id, survey_date, environment_satisfaction, job_involvement,
         job_satisfaction, over_time, performance_rating, work_life_balance,
         business_travel, source_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (source_key) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(survey.employee_id)
    .bind(survey.date)
    .bind(survey.environment_satisfaction)
    .bind(survey.job_involvement)
    .bind(survey.job_satisfaction)
    .bind(survey.over_time)
    .bind(survey.performance_rating)
    .bind(survey.work_life_balance)
    .bind(survey.business_travel.as_str())
    .bind(source_key)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_score(pool: &PgPool, score: &ScoreRecord) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO workday_pulse.scores
        (id, employee_id, scored_on, attrition_probability)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(score.employee_id)
    .bind(score.date)
    .bind(score.attrition_probability)
    .execute(pool)
    .await?;
    Ok(())
}

/// Full score history for one employee, date ascending with same-day
/// records in insertion order.
pub async fn fetch_scores(pool: &PgPool, employee_id: i64) -> anyhow::Result<Vec<ScoreRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT employee_id, scored_on, attrition_probability
        FROM workday_pulse.scores
        WHERE employee_id = $1
        ORDER BY scored_on, recorded_at
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| ScoreRecord {
            employee_id: row.get("employee_id"),
            date: row.get("scored_on"),
            attrition_probability: row.get("attrition_probability"),
        })
        .collect())
}

pub async fn fetch_all_scores(pool: &PgPool) -> anyhow::Result<Vec<ScoreRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT employee_id, scored_on, attrition_probability
        FROM workday_pulse.scores
        ORDER BY employee_id, scored_on, recorded_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| ScoreRecord {
            employee_id: row.get("employee_id"),
            date: row.get("scored_on"),
            attrition_probability: row.get("attrition_probability"),
        })
        .collect())
}

/// Reads surveys from a CSV export. Categorical strings go through the
/// closed-enum decode, so an unknown value fails the row before anything
/// touches the pipeline.
pub fn read_survey_csv(csv_path: &std::path::Path) -> anyhow::Result<Vec<(DailySurvey, String)>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        employee_id: i64,
        date: NaiveDate,
        environment_satisfaction: i32,
        job_involvement: i32,
        job_satisfaction: i32,
        over_time: i32,
        performance_rating: i32,
        work_life_balance: i32,
        business_travel: String,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut surveys = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let business_travel: BusinessTravel = row.business_travel.parse()?;
        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));
        surveys.push((
            DailySurvey {
                employee_id: row.employee_id,
                date: row.date,
                environment_satisfaction: row.environment_satisfaction,
                job_involvement: row.job_involvement,
                job_satisfaction: row.job_satisfaction,
                over_time: row.over_time,
                performance_rating: row.performance_rating,
                work_life_balance: row.work_life_balance,
                business_travel,
            },
            source_key,
        ));
    }

    Ok(surveys)
}

/// Realistic starter data: the three employees the demo sign-in screen
/// offers, plus an existing score history for the first one.
pub async fn seed(pool: &PgPool, today: NaiveDate) -> anyhow::Result<()> {
    use crate::models::NewEmployee;

    let seed_employees = vec![
        NewEmployee {
            first_name: "Avery".to_string(),
            last_name: "Lindgren".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1991, 4, 12).context("invalid date")?,
            gender: Gender::Female,
            marital_status: MaritalStatus::Single,
            department: Department::Sales,
            job_role: JobRole::SalesExecutive,
            education_field: EducationField::Marketing,
            education: 3,
            job_level: 2,
            monthly_income: 5400,
            num_companies_worked: 2,
            percent_salary_hike: 12,
            contract_start_date: NaiveDate::from_ymd_opt(2019, 2, 4).context("invalid date")?,
            current_role_start_date: NaiveDate::from_ymd_opt(2022, 7, 1).context("invalid date")?,
            last_promotion_date: NaiveDate::from_ymd_opt(2022, 7, 1).context("invalid date")?,
            last_manager_change_date: NaiveDate::from_ymd_opt(2024, 3, 18)
                .context("invalid date")?,
        },
        NewEmployee {
            first_name: "Jules".to_string(),
            last_name: "Moreau".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1986, 11, 3).context("invalid date")?,
            gender: Gender::Male,
            marital_status: MaritalStatus::Married,
            department: Department::ResearchAndDevelopment,
            job_role: JobRole::ResearchScientist,
            education_field: EducationField::LifeSciences,
            education: 4,
            job_level: 3,
            monthly_income: 7300,
            num_companies_worked: 3,
            percent_salary_hike: 15,
            contract_start_date: NaiveDate::from_ymd_opt(2014, 9, 15).context("invalid date")?,
            current_role_start_date: NaiveDate::from_ymd_opt(2018, 1, 8).context("invalid date")?,
            last_promotion_date: NaiveDate::from_ymd_opt(2020, 6, 1).context("invalid date")?,
            last_manager_change_date: NaiveDate::from_ymd_opt(2021, 10, 4)
                .context("invalid date")?,
        },
        NewEmployee {
            first_name: "Kiara".to_string(),
            last_name: "Patel".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1995, 8, 22).context("invalid date")?,
            gender: Gender::Female,
            marital_status: MaritalStatus::Divorced,
            department: Department::HumanResources,
            job_role: JobRole::HumanResources,
            education_field: EducationField::HumanResources,
            education: 2,
            job_level: 1,
            monthly_income: 3100,
            num_companies_worked: 1,
            percent_salary_hike: 11,
            contract_start_date: NaiveDate::from_ymd_opt(2021, 5, 10).context("invalid date")?,
            current_role_start_date: NaiveDate::from_ymd_opt(2021, 5, 10).context("invalid date")?,
            last_promotion_date: NaiveDate::from_ymd_opt(2021, 5, 10).context("invalid date")?,
            last_manager_change_date: NaiveDate::from_ymd_opt(2023, 2, 20)
                .context("invalid date")?,
        },
    ];

    for new in seed_employees {
        let id = next_employee_id(pool).await?;
        let employee = EmployeeRecord::create(id, new, today)
            .map_err(|e| anyhow::anyhow!("seed employee rejected: {e}"))?;
        let existing = sqlx::query("SELECT id FROM workday_pulse.employees WHERE first_name = $1 AND last_name = $2")
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .fetch_optional(pool)
            .await?;
        if existing.is_none() {
            insert_employee(pool, &employee).await?;
        }
    }

    let seed_scores = [
        (NaiveDate::from_ymd_opt(2026, 8, 3).context("invalid date")?, 0.22),
        (NaiveDate::from_ymd_opt(2026, 8, 17).context("invalid date")?, 0.31),
    ];
    for (date, probability) in seed_scores {
        let already = sqlx::query(
            "SELECT id FROM workday_pulse.scores WHERE employee_id = $1 AND scored_on = $2",
        )
        .bind(1i64)
        .bind(date)
        .fetch_optional(pool)
        .await?;
        if already.is_none() {
            insert_score(
                pool,
                &ScoreRecord {
                    employee_id: 1,
                    date,
                    attrition_probability: probability,
                },
            )
            .await?;
        }
    }

    Ok(())
}
