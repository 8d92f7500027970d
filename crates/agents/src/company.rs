//! Company page scraper.

use phantomlink_core::{Credentials, Result};
use serde_json::{json, Value};

use crate::agent::{AgentDefinition, PhantomScript, RawOutput};
use crate::models::Company;
use crate::wire;

pub struct CompanyScraper;

fn company_from_row(row: &Value) -> Company {
    Company {
        name: wire::text(row, "name"),
        description: wire::opt_text(row, "description"),
        tag_line: wire::opt_text(row, "tagLine"),
        website: wire::opt_text(row, "website"),
        location: wire::opt_text(row, "location"),
        country: wire::opt_text(row, "country"),
        city: wire::opt_text(row, "city"),
        geographic_area: wire::opt_text_any(row, &["geographicArea", "companyAddress"]),
        year_founded: wire::opt_text_any(row, &["yearFounded", "founded"]),
        currency: wire::opt_text(row, "currency"),
        min_revenue: wire::opt_text(row, "minRevenue"),
        max_revenue: wire::opt_text(row, "maxRevenue"),
        growth_6mth: wire::opt_text(row, "growth6Mth"),
        growth_1yr: wire::opt_text(row, "growth1Yr"),
        growth_2yr: wire::opt_text(row, "growth2Yr"),
        industry: wire::opt_text(row, "industry"),
        size: wire::opt_text(row, "companySize"),
        specialties: wire::opt_text(row, "specialties"),
        ld_id: wire::opt_text_any(row, &["mainCompanyID", "linkedinID"]),
        employees: wire::opt_text(row, "employeesOnLinkedIn"),
        linkedin: wire::opt_text(row, "companyUrl"),
        phone: wire::opt_text(row, "phone"),
        linkedin_sn: wire::opt_text_any(row, &["salesNavigatorCompanyUrl", "salesNavigatorLink"]),
    }
}

impl PhantomScript for CompanyScraper {
    type Input = String;
    type Output = Option<Company>;

    fn definition(&self) -> AgentDefinition {
        AgentDefinition {
            script_id: "3296",
            script: "LinkedIn Company Scraper.js",
            name: "LinkedIn Company Scraper (API)",
        }
    }

    fn launch_argument(&self, credentials: &Credentials, linkedin_url: &String) -> Value {
        json!({
            "userAgent": credentials.user_agent,
            "sessionCookie": credentials.session_cookie,
            "spreadsheetUrl": linkedin_url,
            "delayBetween": 2
        })
    }

    fn decode(&self, output: &RawOutput) -> Result<Option<Company>> {
        let Some(rows) = output.result_value()? else {
            return Ok(None);
        };
        let company = rows
            .as_array()
            .and_then(|rows| rows.first())
            .map(company_from_row);
        Ok(company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_company_row_with_renamed_columns() {
        let output = RawOutput {
            status: Some("finished".to_string()),
            result_object: Some(
                r#"[{
                    "name": "Initech",
                    "companyAddress": "Bavaria",
                    "founded": "1999",
                    "industry": "Software",
                    "companySize": "51-200",
                    "linkedinID": "1234",
                    "companyUrl": "https://www.linkedin.com/company/initech/",
                    "salesNavigatorLink": "https://www.linkedin.com/sales/company/1234"
                }]"#
                .to_string(),
            ),
            output: None,
        };
        let company = CompanyScraper.decode(&output).unwrap().unwrap();
        assert_eq!(company.name, "Initech");
        assert_eq!(company.geographic_area.as_deref(), Some("Bavaria"));
        assert_eq!(company.year_founded.as_deref(), Some("1999"));
        assert_eq!(company.ld_id.as_deref(), Some("1234"));
        assert_eq!(
            company.linkedin_sn.as_deref(),
            Some("https://www.linkedin.com/sales/company/1234")
        );
        assert!(company.phone.is_none());
    }

    #[test]
    fn test_decode_without_result_object_is_none() {
        assert!(CompanyScraper
            .decode(&RawOutput::default())
            .unwrap()
            .is_none());
    }
}
