//! The feature schema the trained attrition classifier was fit against.
//!
//! This module is the single source of truth for the column order, the
//! closed category sets, and the dummy layout. The encoder and the
//! assembler both read from here; neither carries its own column list, so
//! the two cannot drift apart.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Stand-in for an input field the survey does not collect yet. The model
/// was trained against this exact constant; replacing it with a real
/// distance input requires retraining.
pub const DISTANCE_FROM_HOME_PLACEHOLDER: f64 = 10.0;

/// Column names, in no particular order here; [`FEATURE_COLUMNS`] fixes
/// the order the classifier expects.
pub mod col {
    pub const AGE: &str = "Age";
    pub const BUSINESS_TRAVEL: &str = "BusinessTravel";
    pub const DISTANCE_FROM_HOME: &str = "DistanceFromHome";
    pub const EDUCATION: &str = "Education";
    pub const ENVIRONMENT_SATISFACTION: &str = "EnvironmentSatisfaction";
    pub const GENDER: &str = "Gender";
    pub const JOB_INVOLVEMENT: &str = "JobInvolvement";
    pub const JOB_LEVEL: &str = "JobLevel";
    pub const JOB_SATISFACTION: &str = "JobSatisfaction";
    pub const MONTHLY_INCOME: &str = "MonthlyIncome";
    pub const NUM_COMPANIES_WORKED: &str = "NumCompaniesWorked";
    pub const OVER_TIME: &str = "OverTime";
    pub const PERCENT_SALARY_HIKE: &str = "PercentSalaryHike";
    pub const PERFORMANCE_RATING: &str = "PerformanceRating";
    pub const TOTAL_WORKING_YEARS: &str = "TotalWorkingYears";
    pub const WORK_LIFE_BALANCE: &str = "WorkLifeBalance";
    pub const YEARS_AT_COMPANY: &str = "YearsAtCompany";
    pub const YEARS_IN_CURRENT_ROLE: &str = "YearsInCurrentRole";
    pub const YEARS_SINCE_LAST_PROMOTION: &str = "YearsSinceLastPromotion";
    pub const YEARS_WITH_CURR_MANAGER: &str = "YearsWithCurrManager";

    pub const DEPARTMENT_RESEARCH_AND_DEVELOPMENT: &str = "Department_Research & Development";
    pub const DEPARTMENT_SALES: &str = "Department_Sales";

    pub const EDUCATION_FIELD_LIFE_SCIENCES: &str = "EducationField_Life Sciences";
    pub const EDUCATION_FIELD_MARKETING: &str = "EducationField_Marketing";
    pub const EDUCATION_FIELD_MEDICAL: &str = "EducationField_Medical";
    pub const EDUCATION_FIELD_OTHER: &str = "EducationField_Other";
    pub const EDUCATION_FIELD_TECHNICAL_DEGREE: &str = "EducationField_Technical Degree";

    pub const JOB_ROLE_HUMAN_RESOURCES: &str = "JobRole_Human Resources";
    pub const JOB_ROLE_LABORATORY_TECHNICIAN: &str = "JobRole_Laboratory Technician";
    pub const JOB_ROLE_MANAGER: &str = "JobRole_Manager";
    pub const JOB_ROLE_MANUFACTURING_DIRECTOR: &str = "JobRole_Manufacturing Director";
    pub const JOB_ROLE_RESEARCH_DIRECTOR: &str = "JobRole_Research Director";
    pub const JOB_ROLE_RESEARCH_SCIENTIST: &str = "JobRole_Research Scientist";
    pub const JOB_ROLE_SALES_EXECUTIVE: &str = "JobRole_Sales Executive";
    pub const JOB_ROLE_SALES_REPRESENTATIVE: &str = "JobRole_Sales Representative";

    pub const MARITAL_STATUS_MARRIED: &str = "MaritalStatus_Married";
    pub const MARITAL_STATUS_SINGLE: &str = "MaritalStatus_Single";
}

pub const FEATURE_COUNT: usize = 37;

/// The exact column order the classifier artifact expects. Reordering this
/// list without retraining corrupts every prediction silently, which makes
/// it the single most safety-critical constant in the crate.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    col::AGE,
    col::BUSINESS_TRAVEL,
    col::DISTANCE_FROM_HOME,
    col::EDUCATION,
    col::ENVIRONMENT_SATISFACTION,
    col::GENDER,
    col::JOB_INVOLVEMENT,
    col::JOB_LEVEL,
    col::JOB_SATISFACTION,
    col::MONTHLY_INCOME,
    col::NUM_COMPANIES_WORKED,
    col::OVER_TIME,
    col::PERCENT_SALARY_HIKE,
    col::PERFORMANCE_RATING,
    col::TOTAL_WORKING_YEARS,
    col::WORK_LIFE_BALANCE,
    col::YEARS_AT_COMPANY,
    col::YEARS_IN_CURRENT_ROLE,
    col::YEARS_SINCE_LAST_PROMOTION,
    col::YEARS_WITH_CURR_MANAGER,
    col::DEPARTMENT_RESEARCH_AND_DEVELOPMENT,
    col::DEPARTMENT_SALES,
    col::EDUCATION_FIELD_LIFE_SCIENCES,
    col::EDUCATION_FIELD_MARKETING,
    col::EDUCATION_FIELD_MEDICAL,
    col::EDUCATION_FIELD_OTHER,
    col::EDUCATION_FIELD_TECHNICAL_DEGREE,
    col::JOB_ROLE_HUMAN_RESOURCES,
    col::JOB_ROLE_LABORATORY_TECHNICIAN,
    col::JOB_ROLE_MANAGER,
    col::JOB_ROLE_MANUFACTURING_DIRECTOR,
    col::JOB_ROLE_RESEARCH_DIRECTOR,
    col::JOB_ROLE_RESEARCH_SCIENTIST,
    col::JOB_ROLE_SALES_EXECUTIVE,
    col::JOB_ROLE_SALES_REPRESENTATIVE,
    col::MARITAL_STATUS_MARRIED,
    col::MARITAL_STATUS_SINGLE,
];

/// Department, dummy-encoded drop-first. Human Resources is the dropped
/// reference category: all dummy columns zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Human Resources")]
    HumanResources,
    #[serde(rename = "Research & Development")]
    ResearchAndDevelopment,
    Sales,
}

impl Department {
    pub const DUMMY_COLUMNS: [&'static str; 2] = [
        col::DEPARTMENT_RESEARCH_AND_DEVELOPMENT,
        col::DEPARTMENT_SALES,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::HumanResources => "Human Resources",
            Department::ResearchAndDevelopment => "Research & Development",
            Department::Sales => "Sales",
        }
    }

    /// Dummy column this value sets to 1, or None for the dropped category.
    pub fn dummy_column(&self) -> Option<&'static str> {
        match self {
            Department::HumanResources => None,
            Department::ResearchAndDevelopment => {
                Some(col::DEPARTMENT_RESEARCH_AND_DEVELOPMENT)
            }
            Department::Sales => Some(col::DEPARTMENT_SALES),
        }
    }
}

impl FromStr for Department {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Human Resources" => Ok(Department::HumanResources),
            "Research & Development" => Ok(Department::ResearchAndDevelopment),
            "Sales" => Ok(Department::Sales),
            other => Err(SchemaError::UnknownCategory {
                field: "Department",
                value: other.to_string(),
            }),
        }
    }
}

/// Education field, dummy-encoded drop-first; Human Resources dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationField {
    #[serde(rename = "Human Resources")]
    HumanResources,
    #[serde(rename = "Life Sciences")]
    LifeSciences,
    Marketing,
    Medical,
    Other,
    #[serde(rename = "Technical Degree")]
    TechnicalDegree,
}

impl EducationField {
    pub const DUMMY_COLUMNS: [&'static str; 5] = [
        col::EDUCATION_FIELD_LIFE_SCIENCES,
        col::EDUCATION_FIELD_MARKETING,
        col::EDUCATION_FIELD_MEDICAL,
        col::EDUCATION_FIELD_OTHER,
        col::EDUCATION_FIELD_TECHNICAL_DEGREE,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationField::HumanResources => "Human Resources",
            EducationField::LifeSciences => "Life Sciences",
            EducationField::Marketing => "Marketing",
            EducationField::Medical => "Medical",
            EducationField::Other => "Other",
            EducationField::TechnicalDegree => "Technical Degree",
        }
    }

    pub fn dummy_column(&self) -> Option<&'static str> {
        match self {
            EducationField::HumanResources => None,
            EducationField::LifeSciences => Some(col::EDUCATION_FIELD_LIFE_SCIENCES),
            EducationField::Marketing => Some(col::EDUCATION_FIELD_MARKETING),
            EducationField::Medical => Some(col::EDUCATION_FIELD_MEDICAL),
            EducationField::Other => Some(col::EDUCATION_FIELD_OTHER),
            EducationField::TechnicalDegree => Some(col::EDUCATION_FIELD_TECHNICAL_DEGREE),
        }
    }
}

impl FromStr for EducationField {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Human Resources" => Ok(EducationField::HumanResources),
            "Life Sciences" => Ok(EducationField::LifeSciences),
            "Marketing" => Ok(EducationField::Marketing),
            "Medical" => Ok(EducationField::Medical),
            "Other" => Ok(EducationField::Other),
            "Technical Degree" => Ok(EducationField::TechnicalDegree),
            other => Err(SchemaError::UnknownCategory {
                field: "EducationField",
                value: other.to_string(),
            }),
        }
    }
}

/// Job role, dummy-encoded drop-first; Healthcare Representative dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobRole {
    #[serde(rename = "Healthcare Representative")]
    HealthcareRepresentative,
    #[serde(rename = "Human Resources")]
    HumanResources,
    #[serde(rename = "Laboratory Technician")]
    LaboratoryTechnician,
    Manager,
    #[serde(rename = "Manufacturing Director")]
    ManufacturingDirector,
    #[serde(rename = "Research Director")]
    ResearchDirector,
    #[serde(rename = "Research Scientist")]
    ResearchScientist,
    #[serde(rename = "Sales Executive")]
    SalesExecutive,
    #[serde(rename = "Sales Representative")]
    SalesRepresentative,
}

impl JobRole {
    pub const DUMMY_COLUMNS: [&'static str; 8] = [
        col::JOB_ROLE_HUMAN_RESOURCES,
        col::JOB_ROLE_LABORATORY_TECHNICIAN,
        col::JOB_ROLE_MANAGER,
        col::JOB_ROLE_MANUFACTURING_DIRECTOR,
        col::JOB_ROLE_RESEARCH_DIRECTOR,
        col::JOB_ROLE_RESEARCH_SCIENTIST,
        col::JOB_ROLE_SALES_EXECUTIVE,
        col::JOB_ROLE_SALES_REPRESENTATIVE,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobRole::HealthcareRepresentative => "Healthcare Representative",
            JobRole::HumanResources => "Human Resources",
            JobRole::LaboratoryTechnician => "Laboratory Technician",
            JobRole::Manager => "Manager",
            JobRole::ManufacturingDirector => "Manufacturing Director",
            JobRole::ResearchDirector => "Research Director",
            JobRole::ResearchScientist => "Research Scientist",
            JobRole::SalesExecutive => "Sales Executive",
            JobRole::SalesRepresentative => "Sales Representative",
        }
    }

    pub fn dummy_column(&self) -> Option<&'static str> {
        match self {
            JobRole::HealthcareRepresentative => None,
            JobRole::HumanResources => Some(col::JOB_ROLE_HUMAN_RESOURCES),
            JobRole::LaboratoryTechnician => Some(col::JOB_ROLE_LABORATORY_TECHNICIAN),
            JobRole::Manager => Some(col::JOB_ROLE_MANAGER),
            JobRole::ManufacturingDirector => Some(col::JOB_ROLE_MANUFACTURING_DIRECTOR),
            JobRole::ResearchDirector => Some(col::JOB_ROLE_RESEARCH_DIRECTOR),
            JobRole::ResearchScientist => Some(col::JOB_ROLE_RESEARCH_SCIENTIST),
            JobRole::SalesExecutive => Some(col::JOB_ROLE_SALES_EXECUTIVE),
            JobRole::SalesRepresentative => Some(col::JOB_ROLE_SALES_REPRESENTATIVE),
        }
    }
}

impl FromStr for JobRole {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Healthcare Representative" => Ok(JobRole::HealthcareRepresentative),
            "Human Resources" => Ok(JobRole::HumanResources),
            "Laboratory Technician" => Ok(JobRole::LaboratoryTechnician),
            "Manager" => Ok(JobRole::Manager),
            "Manufacturing Director" => Ok(JobRole::ManufacturingDirector),
            "Research Director" => Ok(JobRole::ResearchDirector),
            "Research Scientist" => Ok(JobRole::ResearchScientist),
            "Sales Executive" => Ok(JobRole::SalesExecutive),
            "Sales Representative" => Ok(JobRole::SalesRepresentative),
            other => Err(SchemaError::UnknownCategory {
                field: "JobRole",
                value: other.to_string(),
            }),
        }
    }
}

/// Marital status, dummy-encoded drop-first; Divorced dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Divorced,
    Married,
    Single,
}

impl MaritalStatus {
    pub const DUMMY_COLUMNS: [&'static str; 2] =
        [col::MARITAL_STATUS_MARRIED, col::MARITAL_STATUS_SINGLE];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Divorced => "Divorced",
            MaritalStatus::Married => "Married",
            MaritalStatus::Single => "Single",
        }
    }

    pub fn dummy_column(&self) -> Option<&'static str> {
        match self {
            MaritalStatus::Divorced => None,
            MaritalStatus::Married => Some(col::MARITAL_STATUS_MARRIED),
            MaritalStatus::Single => Some(col::MARITAL_STATUS_SINGLE),
        }
    }
}

impl FromStr for MaritalStatus {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Divorced" => Ok(MaritalStatus::Divorced),
            "Married" => Ok(MaritalStatus::Married),
            "Single" => Ok(MaritalStatus::Single),
            other => Err(SchemaError::UnknownCategory {
                field: "MaritalStatus",
                value: other.to_string(),
            }),
        }
    }
}

/// Business travel frequency, label-encoded to the integer code the
/// training data used (alphabetical label order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessTravel {
    #[serde(rename = "Non-Travel")]
    NonTravel,
    #[serde(rename = "Travel_Frequently")]
    TravelFrequently,
    #[serde(rename = "Travel_Rarely")]
    TravelRarely,
}

impl BusinessTravel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessTravel::NonTravel => "Non-Travel",
            BusinessTravel::TravelFrequently => "Travel_Frequently",
            BusinessTravel::TravelRarely => "Travel_Rarely",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            BusinessTravel::NonTravel => 0,
            BusinessTravel::TravelFrequently => 1,
            BusinessTravel::TravelRarely => 2,
        }
    }
}

impl FromStr for BusinessTravel {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Non-Travel" => Ok(BusinessTravel::NonTravel),
            "Travel_Frequently" => Ok(BusinessTravel::TravelFrequently),
            "Travel_Rarely" => Ok(BusinessTravel::TravelRarely),
            other => Err(SchemaError::UnknownCategory {
                field: "BusinessTravel",
                value: other.to_string(),
            }),
        }
    }
}

/// Gender, label-encoded (alphabetical label order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
        }
    }
}

impl FromStr for Gender {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Female" => Ok(Gender::Female),
            "Male" => Ok(Gender::Male),
            other => Err(SchemaError::UnknownCategory {
                field: "Gender",
                value: other.to_string(),
            }),
        }
    }
}

/// Ordinal survey rating, 1 through 4.
pub fn check_rating(field: &'static str, value: i32) -> Result<(), SchemaError> {
    if (1..=4).contains(&value) {
        Ok(())
    } else {
        Err(SchemaError::CodeOutOfRange {
            field,
            value,
            allowed: "1..=4",
        })
    }
}

/// Yes/no flag encoded 0 or 1.
pub fn check_flag(field: &'static str, value: i32) -> Result<(), SchemaError> {
    if value == 0 || value == 1 {
        Ok(())
    } else {
        Err(SchemaError::CodeOutOfRange {
            field,
            value,
            allowed: "0..=1",
        })
    }
}

/// Education and job level, 1 through 5.
pub fn check_level(field: &'static str, value: i32) -> Result<(), SchemaError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(SchemaError::CodeOutOfRange {
            field,
            value,
            allowed: "1..=5",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn schema_has_exactly_37_distinct_columns() {
        let unique: HashSet<&str> = FEATURE_COLUMNS.iter().copied().collect();
        assert_eq!(FEATURE_COLUMNS.len(), 37);
        assert_eq!(unique.len(), 37);
    }

    #[test]
    fn dummy_columns_all_appear_in_schema() {
        let all: HashSet<&str> = FEATURE_COLUMNS.iter().copied().collect();
        for name in Department::DUMMY_COLUMNS
            .iter()
            .chain(EducationField::DUMMY_COLUMNS.iter())
            .chain(JobRole::DUMMY_COLUMNS.iter())
            .chain(MaritalStatus::DUMMY_COLUMNS.iter())
        {
            assert!(all.contains(name), "{name} not in FEATURE_COLUMNS");
        }
    }

    #[test]
    fn dropped_categories_have_no_dummy_column() {
        assert_eq!(Department::HumanResources.dummy_column(), None);
        assert_eq!(EducationField::HumanResources.dummy_column(), None);
        assert_eq!(JobRole::HealthcareRepresentative.dummy_column(), None);
        assert_eq!(MaritalStatus::Divorced.dummy_column(), None);
    }

    #[test]
    fn unknown_categories_are_rejected() {
        let err = "Engineering".parse::<Department>().unwrap_err();
        assert_eq!(
            err,
            crate::error::SchemaError::UnknownCategory {
                field: "Department",
                value: "Engineering".to_string(),
            }
        );
        assert!("Astrology".parse::<EducationField>().is_err());
        assert!("Astronaut".parse::<JobRole>().is_err());
        assert!("Complicated".parse::<MaritalStatus>().is_err());
        assert!("Commute".parse::<BusinessTravel>().is_err());
    }

    #[test]
    fn labels_round_trip_through_from_str() {
        for role in [
            JobRole::HealthcareRepresentative,
            JobRole::HumanResources,
            JobRole::LaboratoryTechnician,
            JobRole::Manager,
            JobRole::ManufacturingDirector,
            JobRole::ResearchDirector,
            JobRole::ResearchScientist,
            JobRole::SalesExecutive,
            JobRole::SalesRepresentative,
        ] {
            assert_eq!(role.as_str().parse::<JobRole>().unwrap(), role);
        }
    }

    #[test]
    fn ordinal_checks_enforce_closed_sets() {
        assert!(check_rating("JobSatisfaction", 1).is_ok());
        assert!(check_rating("JobSatisfaction", 4).is_ok());
        assert!(check_rating("JobSatisfaction", 0).is_err());
        assert!(check_rating("JobSatisfaction", 5).is_err());
        assert!(check_flag("OverTime", 0).is_ok());
        assert!(check_flag("OverTime", 2).is_err());
        assert!(check_level("Education", 5).is_ok());
        assert!(check_level("Education", 6).is_err());
    }

    #[test]
    fn travel_codes_follow_label_order() {
        assert_eq!(BusinessTravel::NonTravel.code(), 0);
        assert_eq!(BusinessTravel::TravelFrequently.code(), 1);
        assert_eq!(BusinessTravel::TravelRarely.code(), 2);
        assert_eq!(Gender::Female.code(), 0);
        assert_eq!(Gender::Male.code(), 1);
    }
}
