//! Typed records produced by the scraping scripts.
//!
//! Field order is declaration order and drives every rendering, so it is kept
//! stable even where a different grouping would read better.

use phantomlink_core::record::{FieldSpec, FieldValue, Record, RecordSchema, TypeSpec};
use serde_json::{Map, Value};

/// LinkedIn job experience model.
#[derive(Debug, Clone, Default)]
pub struct Job {
    pub company_url: String,
    pub company_name: String,
    pub title: String,
    pub date_range: String,
    pub started_since: String,
    pub description: String,
    pub location: String,
}

pub static JOB_SCHEMA: RecordSchema = RecordSchema {
    name: "Job",
    doc: Some("LinkedIn job experience model"),
    fields: &[
        FieldSpec {
            name: "company_url",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "company_name",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "title",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "date_range",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "started_since",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "description",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "location",
            description: None,
            ty: TypeSpec::Text,
        },
    ],
};

fn job_schema() -> &'static RecordSchema {
    &JOB_SCHEMA
}

static JOB_TY: TypeSpec = TypeSpec::Record(job_schema);

impl Record for Job {
    fn schema(&self) -> &'static RecordSchema {
        &JOB_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::text(&self.company_url),
            FieldValue::text(&self.company_name),
            FieldValue::text(&self.title),
            FieldValue::text(&self.date_range),
            FieldValue::text(&self.started_since),
            FieldValue::text(&self.description),
            FieldValue::text(&self.location),
        ]
    }
}

impl Job {
    /// A job row is meaningful when any column survived scraping.
    pub fn is_blank(&self) -> bool {
        self.values().iter().all(FieldValue::is_empty)
    }
}

/// LinkedIn profile model.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub linkedin_url: String,
    pub first_name: String,
    pub last_name: String,
    pub headline: String,
    pub location: String,
    pub company: String,
    pub job_title: String,
    pub about: String,
    pub skills: Vec<String>,
    pub jobs: Vec<Job>,
    pub company_industry: Option<String>,
    pub linkedin_user_id: Option<String>,
    pub linkedin_urn: Option<String>,
    pub raw_data: Option<Map<String, Value>>,
}

pub static PROFILE_SCHEMA: RecordSchema = RecordSchema {
    name: "Profile",
    doc: Some("LinkedIn profile model"),
    fields: &[
        FieldSpec {
            name: "linkedin_url",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "first_name",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "last_name",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "headline",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "location",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "company",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "job_title",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "about",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "skills",
            description: None,
            ty: TypeSpec::List(&TypeSpec::Text),
        },
        FieldSpec {
            name: "jobs",
            description: None,
            ty: TypeSpec::List(&JOB_TY),
        },
        FieldSpec {
            name: "company_industry",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "linkedin_user_id",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "linkedin_urn",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "raw_data",
            description: Some("untouched row as returned by the scraper"),
            ty: TypeSpec::Optional(&TypeSpec::Map(&TypeSpec::Text, &TypeSpec::Text)),
        },
    ],
};

impl Record for Profile {
    fn schema(&self) -> &'static RecordSchema {
        &PROFILE_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::text(&self.linkedin_url),
            FieldValue::text(&self.first_name),
            FieldValue::text(&self.last_name),
            FieldValue::text(&self.headline),
            FieldValue::text(&self.location),
            FieldValue::text(&self.company),
            FieldValue::text(&self.job_title),
            FieldValue::text(&self.about),
            FieldValue::text_list(&self.skills),
            FieldValue::record_list(&self.jobs),
            FieldValue::opt_text(&self.company_industry),
            FieldValue::opt_text(&self.linkedin_user_id),
            FieldValue::opt_text(&self.linkedin_urn),
            FieldValue::opt_map(&self.raw_data),
        ]
    }
}

/// LinkedIn message thread model.
#[derive(Debug, Clone, Default)]
pub struct Thread {
    pub thread_id: String,
    pub participants: Vec<String>,
    pub last_message: String,
    pub last_message_date: String,
    pub last_message_author_name: String,
    pub timestamp: String,
    pub is_last_message_from_me: bool,
    pub read_status: bool,
    pub linkedin_url: String,
}

pub static THREAD_SCHEMA: RecordSchema = RecordSchema {
    name: "Thread",
    doc: Some("LinkedIn message thread model"),
    fields: &[
        FieldSpec {
            name: "thread_id",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "participants",
            description: None,
            ty: TypeSpec::List(&TypeSpec::Text),
        },
        FieldSpec {
            name: "last_message",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "last_message_date",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "last_message_author_name",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "timestamp",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "is_last_message_from_me",
            description: None,
            ty: TypeSpec::Bool,
        },
        FieldSpec {
            name: "read_status",
            description: None,
            ty: TypeSpec::Bool,
        },
        FieldSpec {
            name: "linkedin_url",
            description: None,
            ty: TypeSpec::Text,
        },
    ],
};

impl Record for Thread {
    fn schema(&self) -> &'static RecordSchema {
        &THREAD_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::text(&self.thread_id),
            FieldValue::text_list(&self.participants),
            FieldValue::text(&self.last_message),
            FieldValue::text(&self.last_message_date),
            FieldValue::text(&self.last_message_author_name),
            FieldValue::text(&self.timestamp),
            FieldValue::flag(self.is_last_message_from_me),
            FieldValue::flag(self.read_status),
            FieldValue::text(&self.linkedin_url),
        ]
    }
}

/// LinkedIn message model.
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub date: String,
    pub author: String,
    pub message: String,
    pub connection_degree: Option<String>,
}

pub static MESSAGE_SCHEMA: RecordSchema = RecordSchema {
    name: "Message",
    doc: Some("LinkedIn message model"),
    fields: &[
        FieldSpec {
            name: "date",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "author",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "message",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "connection_degree",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
    ],
};

impl Record for Message {
    fn schema(&self) -> &'static RecordSchema {
        &MESSAGE_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::text(&self.date),
            FieldValue::text(&self.author),
            FieldValue::text(&self.message),
            FieldValue::opt_text(&self.connection_degree),
        ]
    }
}

/// LinkedIn activity/post model.
#[derive(Debug, Clone)]
pub struct Activity {
    pub url: Option<String>,
    pub attached_url: Option<String>,
    pub kind: Option<String>,
    pub text: Option<String>,
    pub like_count: Option<i64>,
    pub comment_count: Option<i64>,
    pub repost_count: Option<i64>,
    pub date: Option<String>,
    pub profile_url: Option<String>,
    pub timestamp: Option<String>,
    pub comment: Option<String>,
    pub platform: String,
}

impl Default for Activity {
    fn default() -> Self {
        Self {
            url: None,
            attached_url: None,
            kind: None,
            text: None,
            like_count: None,
            comment_count: None,
            repost_count: None,
            date: None,
            profile_url: None,
            timestamp: None,
            comment: None,
            platform: "linkedin".to_string(),
        }
    }
}

pub static ACTIVITY_SCHEMA: RecordSchema = RecordSchema {
    name: "Activity",
    doc: Some("LinkedIn activity/post model"),
    fields: &[
        FieldSpec {
            name: "url",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "attached_url",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "type",
            description: Some("Post, Article or Comment"),
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "text",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "like_count",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Int),
        },
        FieldSpec {
            name: "comment_count",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Int),
        },
        FieldSpec {
            name: "repost_count",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Int),
        },
        FieldSpec {
            name: "date",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "profile_url",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "timestamp",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "comment",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "platform",
            description: None,
            ty: TypeSpec::Text,
        },
    ],
};

impl Record for Activity {
    fn schema(&self) -> &'static RecordSchema {
        &ACTIVITY_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::opt_text(&self.url),
            FieldValue::opt_text(&self.attached_url),
            FieldValue::opt_text(&self.kind),
            FieldValue::opt_text(&self.text),
            FieldValue::opt_int(self.like_count),
            FieldValue::opt_int(self.comment_count),
            FieldValue::opt_int(self.repost_count),
            FieldValue::opt_text(&self.date),
            FieldValue::opt_text(&self.profile_url),
            FieldValue::opt_text(&self.timestamp),
            FieldValue::opt_text(&self.comment),
            FieldValue::text(&self.platform),
        ]
    }
}

/// LinkedIn company model.
#[derive(Debug, Clone, Default)]
pub struct Company {
    pub name: String,
    pub description: Option<String>,
    pub tag_line: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub geographic_area: Option<String>,
    pub year_founded: Option<String>,
    pub currency: Option<String>,
    pub min_revenue: Option<String>,
    pub max_revenue: Option<String>,
    pub growth_6mth: Option<String>,
    pub growth_1yr: Option<String>,
    pub growth_2yr: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub specialties: Option<String>,
    pub ld_id: Option<String>,
    pub employees: Option<String>,
    pub linkedin: Option<String>,
    pub phone: Option<String>,
    pub linkedin_sn: Option<String>,
}

pub static COMPANY_SCHEMA: RecordSchema = RecordSchema {
    name: "Company",
    doc: Some("LinkedIn company model"),
    fields: &[
        FieldSpec {
            name: "name",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "description",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "tag_line",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "website",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "location",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "country",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "city",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "geographic_area",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "year_founded",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "currency",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "min_revenue",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "max_revenue",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "growth_6mth",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "growth_1yr",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "growth_2yr",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "industry",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "size",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "specialties",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "ld_id",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "employees",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "linkedin",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "phone",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "linkedin_sn",
            description: Some("Sales Navigator company URL"),
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
    ],
};

impl Record for Company {
    fn schema(&self) -> &'static RecordSchema {
        &COMPANY_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::text(&self.name),
            FieldValue::opt_text(&self.description),
            FieldValue::opt_text(&self.tag_line),
            FieldValue::opt_text(&self.website),
            FieldValue::opt_text(&self.location),
            FieldValue::opt_text(&self.country),
            FieldValue::opt_text(&self.city),
            FieldValue::opt_text(&self.geographic_area),
            FieldValue::opt_text(&self.year_founded),
            FieldValue::opt_text(&self.currency),
            FieldValue::opt_text(&self.min_revenue),
            FieldValue::opt_text(&self.max_revenue),
            FieldValue::opt_text(&self.growth_6mth),
            FieldValue::opt_text(&self.growth_1yr),
            FieldValue::opt_text(&self.growth_2yr),
            FieldValue::opt_text(&self.industry),
            FieldValue::opt_text(&self.size),
            FieldValue::opt_text(&self.specialties),
            FieldValue::opt_text(&self.ld_id),
            FieldValue::opt_text(&self.employees),
            FieldValue::opt_text(&self.linkedin),
            FieldValue::opt_text(&self.phone),
            FieldValue::opt_text(&self.linkedin_sn),
        ]
    }
}

/// LinkedIn connection model.
#[derive(Debug, Clone, Default)]
pub struct Connection {
    pub linkedin_url: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub job_title: Option<String>,
    pub date_connected: Option<String>,
}

pub static CONNECTION_SCHEMA: RecordSchema = RecordSchema {
    name: "Connection",
    doc: Some("LinkedIn connection model"),
    fields: &[
        FieldSpec {
            name: "linkedin_url",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "first_name",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "last_name",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "full_name",
            description: None,
            ty: TypeSpec::Text,
        },
        FieldSpec {
            name: "job_title",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
        FieldSpec {
            name: "date_connected",
            description: None,
            ty: TypeSpec::Optional(&TypeSpec::Text),
        },
    ],
};

impl Record for Connection {
    fn schema(&self) -> &'static RecordSchema {
        &CONNECTION_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::text(&self.linkedin_url),
            FieldValue::text(&self.first_name),
            FieldValue::text(&self.last_name),
            FieldValue::text(&self.full_name),
            FieldValue::opt_text(&self.job_title),
            FieldValue::opt_text(&self.date_connected),
        ]
    }
}

/// Every record type this crate produces, for schema listings.
pub fn schemas() -> &'static [&'static RecordSchema] {
    static ALL_SCHEMAS: &[&RecordSchema] = &[
        &PROFILE_SCHEMA,
        &JOB_SCHEMA,
        &COMPANY_SCHEMA,
        &THREAD_SCHEMA,
        &MESSAGE_SCHEMA,
        &ACTIVITY_SCHEMA,
        &CONNECTION_SCHEMA,
    ];
    ALL_SCHEMAS
}
