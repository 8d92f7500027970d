//! Profile scraping scripts: the single-profile scraper and the Sales
//! Navigator search export.

use phantomlink_core::{Credentials, Result};
use serde_json::{json, Value};

use crate::agent::{AgentDefinition, PhantomScript, RawOutput};
use crate::models::{Job, Profile};
use crate::wire;

/// Scrapes one public profile page into a [`Profile`].
pub struct ProfileScraper;

fn profile_jobs(row: &Value) -> Vec<Job> {
    // The script flattens current and previous position into one row.
    let jobs = vec![
        Job {
            company_url: wire::text(row, "linkedinCompanyUrl"),
            company_name: wire::text(row, "companyName"),
            title: wire::text(row, "linkedinJobTitle"),
            date_range: wire::text(row, "dateRange"),
            started_since: wire::text(row, "startedSince"),
            description: wire::text(row, "linkedinJobDescription"),
            location: wire::text(row, "linkedinJobLocation"),
        },
        Job {
            company_url: wire::text(row, "linkedinPreviousCompanyUrl"),
            company_name: wire::text(row, "linkedinPreviousCompanyName"),
            title: wire::text(row, "linkedinPreviousJobTitle"),
            date_range: wire::text(row, "linkedinPreviousJobDateRange"),
            started_since: wire::text(row, "linkedinPreviousStartedSince"),
            description: wire::text(row, "linkedinPreviousJobDescription"),
            location: wire::text(row, "linkedinPreviousJobLocation"),
        },
    ];
    jobs.into_iter().filter(|job| !job.is_blank()).collect()
}

/// Skills arrive either as a list or as one comma-separated string.
fn profile_skills(row: &Value) -> Vec<String> {
    match row.get("linkedinSkillsLabel") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn profile_from_row(row: &Value) -> Profile {
    Profile {
        linkedin_url: wire::text(row, "linkedinProfileUrl"),
        first_name: wire::text(row, "firstName"),
        last_name: wire::text(row, "lastName"),
        headline: wire::text(row, "linkedinHeadline"),
        location: wire::text(row, "location"),
        company: wire::text(row, "companyName"),
        job_title: wire::text(row, "linkedinJobTitle"),
        about: wire::text(row, "linkedinDescription"),
        skills: profile_skills(row),
        jobs: profile_jobs(row),
        company_industry: wire::opt_text(row, "companyIndustry"),
        linkedin_user_id: wire::opt_text(row, "linkedinProfileId"),
        linkedin_urn: wire::opt_text(row, "linkedinProfileUrn"),
        raw_data: row.as_object().cloned(),
    }
}

impl PhantomScript for ProfileScraper {
    type Input = String;
    type Output = Option<Profile>;

    fn definition(&self) -> AgentDefinition {
        AgentDefinition {
            script_id: "3112",
            script: "LinkedIn Profile Scraper.js",
            name: "LinkedIn Profile Scraper (API)",
        }
    }

    fn launch_argument(&self, credentials: &Credentials, linkedin_url: &String) -> Value {
        json!({
            "userAgent": credentials.user_agent,
            "sessionCookie": credentials.session_cookie,
            "spreadsheetUrl": linkedin_url,
            "takeScreenshot": false,
            "updateCrmContacts": false,
            "numberOfAddsPerLaunch": 10,
            "takePartialScreenshot": false,
            "saveImg": false
        })
    }

    fn decode(&self, output: &RawOutput) -> Result<Option<Profile>> {
        let Some(rows) = output.result_value()? else {
            return Ok(None);
        };
        let profile = rows
            .as_array()
            .and_then(|rows| rows.first())
            .map(profile_from_row);
        Ok(profile)
    }
}

/// Exports profiles matching a Sales Navigator search URL. The search page
/// yields thinner rows than the profile scraper, so skills and job history
/// stay empty.
pub struct SalesNavigatorSearch {
    pub nb_results: u32,
}

impl Default for SalesNavigatorSearch {
    fn default() -> Self {
        Self { nb_results: 20 }
    }
}

impl PhantomScript for SalesNavigatorSearch {
    type Input = String;
    type Output = Vec<Profile>;

    fn definition(&self) -> AgentDefinition {
        AgentDefinition {
            script_id: "6988",
            script: "Sales Navigator Search Export.js",
            name: "Sales Navigator Search Export (API)",
        }
    }

    fn launch_argument(&self, credentials: &Credentials, search_url: &String) -> Value {
        json!({
            "userAgent": credentials.user_agent,
            "sessionCookie": credentials.session_cookie,
            "salesNavigatorSearchUrl": search_url,
            "inputType": "salesNavigatorSearchUrl",
            "numberOfProfiles": 2500,
            "numberOfLinesPerLaunch": 20,
            "removeDuplicateProfiles": false,
            "numberOfResultsPerSearch": self.nb_results
        })
    }

    fn decode(&self, output: &RawOutput) -> Result<Vec<Profile>> {
        let Some(rows) = output.result_value()? else {
            return Ok(Vec::new());
        };
        let Some(rows) = rows.as_array() else {
            return Ok(Vec::new());
        };

        let profiles = rows
            .iter()
            .filter(|row| !wire::text(row, "defaultProfileUrl").is_empty())
            .map(|row| Profile {
                linkedin_url: wire::text(row, "defaultProfileUrl"),
                first_name: wire::text(row, "firstName"),
                last_name: wire::text(row, "lastName"),
                headline: wire::text(row, "title"),
                location: wire::text(row, "location"),
                company: wire::text(row, "companyName"),
                job_title: wire::text(row, "title"),
                about: wire::text_any(row, &["summary", "titleDescription"]),
                raw_data: row.as_object().cloned(),
                ..Profile::default()
            })
            .collect();
        Ok(profiles)
    }
}
