// The static descriptor table and the optional supplement file.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use snafu::prelude::*;

use crate::app::io_common::read_decoded;
use crate::app::*;

/// The text shown for a code that has no entry in the table.
pub const PLACEHOLDER_SUMMARY: &str = "A description for this profile is not yet available.";

struct TypeProfile {
    summary: &'static str,
    majors: &'static [&'static str],
    careers: &'static [&'static str],
}

/// The resolved descriptive text for one result code. Built for every
/// lookup, whether or not the code is in the table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Descriptor {
    pub code: String,
    pub summary: String,
    pub majors: Vec<String>,
    pub careers: Vec<String>,
    /// Extra bullets from the supplement file, empty when none apply.
    pub notes: Vec<String>,
}

static TYPE_PROFILES: [(&str, TypeProfile); 16] = [
    ("INTJ", TypeProfile {
        summary: "Strategic and deliberate, with a strength for setting long-term goals in structured environments.",
        majors: &["Computer science", "Data science", "Business administration", "Public policy"],
        careers: &["Strategy planner", "Data analyst", "Management consultant", "Product manager"],
    }),
    ("INTP", TypeProfile {
        summary: "Logical and inquisitive, preferring to analyze concepts and dig deeply into ideas.",
        majors: &["Mathematics", "Physics", "Philosophy", "Software engineering"],
        careers: &["Researcher", "Systems architect", "Algorithm engineer", "Technical writer"],
    }),
    ("ENTJ", TypeProfile {
        summary: "A goal-driven leader with a strength for organizing people and delivering results.",
        majors: &["Business administration", "Economics", "Law", "Industrial engineering"],
        careers: &["Executive", "Project lead", "Entrepreneur", "Operations manager"],
    }),
    ("ENTP", TypeProfile {
        summary: "Challenging and inventive, enjoying experiments with new approaches and ideas.",
        majors: &["Entrepreneurship", "Media studies", "Marketing", "Engineering"],
        careers: &["Founder", "Product strategist", "Creative director", "Consultant"],
    }),
    ("INFJ", TypeProfile {
        summary: "Insightful and empathetic, strongest in work centered on people and values.",
        majors: &["Psychology", "Education", "Social work", "Literature"],
        careers: &["Counselor", "Teacher", "Writer", "Nonprofit coordinator"],
    }),
    ("INFP", TypeProfile {
        summary: "An idealist with clear personal values, drawn to meaningful work.",
        majors: &["Psychology", "Social welfare", "Language and literature", "Arts and culture"],
        careers: &["Counseling and welfare", "Author or editor", "Content planner", "Education roles"],
    }),
    ("ENFJ", TypeProfile {
        summary: "A natural mentor who lifts group morale and guides people toward shared goals.",
        majors: &["Education", "Communication", "Human resources", "Public health"],
        careers: &["Teacher", "HR manager", "Community organizer", "Coach"],
    }),
    ("ENFP", TypeProfile {
        summary: "Enthusiastic and idea-rich, strong at connecting people with possibilities.",
        majors: &["Communication", "Design", "International studies", "Marketing"],
        careers: &["Campaign planner", "Journalist", "Designer", "Public relations"],
    }),
    ("ISTJ", TypeProfile {
        summary: "Diligent and responsible, reliable at following rules and procedures.",
        majors: &["Accounting", "Public administration", "Engineering", "Statistics"],
        careers: &["Accountant", "Civil servant", "Quality engineer", "Auditor"],
    }),
    ("ISFJ", TypeProfile {
        summary: "Considerate and devoted, attentive to the needs of the people around them.",
        majors: &["Nursing", "Education", "Social work", "Nutrition"],
        careers: &["Nurse", "Elementary teacher", "Care coordinator", "Librarian"],
    }),
    ("ESTJ", TypeProfile {
        summary: "Practical and organized, a manager type that runs work and people efficiently.",
        majors: &["Business administration", "Industrial engineering", "Law", "Logistics"],
        careers: &["Operations manager", "Site supervisor", "Financial officer", "Administrator"],
    }),
    ("ESFJ", TypeProfile {
        summary: "Cooperative and sociable, strong at coordinating relationships and teamwork.",
        majors: &["Hospitality", "Education", "Public health", "Communication"],
        careers: &["Event coordinator", "School counselor", "Customer success", "Health educator"],
    }),
    ("ISTP", TypeProfile {
        summary: "A hands-on problem solver, strongest when operating and fixing real things.",
        majors: &["Mechanical engineering", "Computer engineering", "Aviation", "Industrial design"],
        careers: &["Field engineer", "Technician", "Pilot", "Systems operator"],
    }),
    ("ISFP", TypeProfile {
        summary: "Sensitive and present-focused, an artist type that values direct experience.",
        majors: &["Fine arts", "Design", "Culinary arts", "Veterinary science"],
        careers: &["Designer", "Photographer", "Chef", "Animal care specialist"],
    }),
    ("ESTP", TypeProfile {
        summary: "Active with sharp practical sense, an adventurer who learns by doing.",
        majors: &["Sports science", "Business administration", "Emergency services", "Marketing"],
        careers: &["Sales lead", "Paramedic", "Athletic trainer", "Field operations"],
    }),
    ("ESFP", TypeProfile {
        summary: "Sociable and upbeat, enjoying activities shared with other people.",
        majors: &["Performing arts", "Tourism", "Early childhood education", "Media production"],
        careers: &["Performer", "Tour planner", "Kindergarten teacher", "Broadcast staff"],
    }),
];

static INTEREST_PROFILES: [(char, TypeProfile); 6] = [
    ('R', TypeProfile {
        summary: "Realistic: practical work with tools, machines and the outdoors.",
        majors: &["Mechanical engineering", "Agriculture", "Construction management"],
        careers: &["Technician", "Engineer", "Equipment operator"],
    }),
    ('I', TypeProfile {
        summary: "Investigative: analytical work built on observation and research.",
        majors: &["Biology", "Chemistry", "Computer science", "Mathematics"],
        careers: &["Scientist", "Analyst", "Laboratory researcher"],
    }),
    ('A', TypeProfile {
        summary: "Artistic: expressive work in unstructured, creative settings.",
        majors: &["Fine arts", "Music", "Creative writing", "Design"],
        careers: &["Artist", "Designer", "Writer", "Musician"],
    }),
    ('S', TypeProfile {
        summary: "Social: work centered on helping, teaching and caring for people.",
        majors: &["Education", "Nursing", "Social work", "Psychology"],
        careers: &["Teacher", "Counselor", "Nurse", "Social worker"],
    }),
    ('E', TypeProfile {
        summary: "Enterprising: persuading and leading people toward goals.",
        majors: &["Business administration", "Political science", "Marketing"],
        careers: &["Manager", "Salesperson", "Entrepreneur"],
    }),
    ('C', TypeProfile {
        summary: "Conventional: organized work with data, records and procedures.",
        majors: &["Accounting", "Finance", "Office administration"],
        careers: &["Accountant", "Bookkeeper", "Administrator"],
    }),
];

/// The descriptor store: the built-in tables plus the optional supplement.
pub struct DescriptorBook {
    supplement: HashMap<String, Vec<String>>,
}

impl DescriptorBook {
    /// Builds the book, merging the optional two-column supplement file
    /// (code, note). An absent file yields an empty supplement.
    pub fn with_supplement(path: &Option<String>) -> AppResult<DescriptorBook> {
        let supplement = match path {
            None => HashMap::new(),
            Some(p) if !Path::new(p).exists() => {
                info!("No supplement file at {:?}, continuing without it", p);
                HashMap::new()
            }
            Some(p) => read_supplement(p)?,
        };
        Ok(DescriptorBook { supplement })
    }

    /// Resolves a four-letter code. A miss returns the placeholder text
    /// rather than failing.
    pub fn lookup_type(&self, code: &str) -> Descriptor {
        let hit = TYPE_PROFILES.iter().find(|(c, _)| *c == code);
        self.resolve(code, hit.map(|(_, p)| p))
    }

    /// Resolves one interest category letter, with the same miss policy.
    pub fn lookup_interest(&self, letter: char) -> Descriptor {
        let hit = INTEREST_PROFILES.iter().find(|(c, _)| *c == letter);
        self.resolve(&letter.to_string(), hit.map(|(_, p)| p))
    }

    fn resolve(&self, code: &str, profile: Option<&TypeProfile>) -> Descriptor {
        if profile.is_none() {
            debug!("resolve: no profile for code {:?}, using placeholder", code);
        }
        let notes = self.supplement.get(code).cloned().unwrap_or_default();
        match profile {
            Some(p) => Descriptor {
                code: code.to_string(),
                summary: p.summary.to_string(),
                majors: p.majors.iter().map(|s| s.to_string()).collect(),
                careers: p.careers.iter().map(|s| s.to_string()).collect(),
                notes,
            },
            None => Descriptor {
                code: code.to_string(),
                summary: PLACEHOLDER_SUMMARY.to_string(),
                majors: Vec::new(),
                careers: Vec::new(),
                notes,
            },
        }
    }
}

fn read_supplement(path: &str) -> AppResult<HashMap<String, Vec<String>>> {
    let text = read_decoded(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut res: HashMap<String, Vec<String>> = HashMap::new();
    for (idx, record_r) in rdr.records().enumerate() {
        let record = record_r.context(CsvParseSnafu {})?;
        let code = record.get(0).map(|s| s.trim().to_uppercase());
        let note = record.get(1).map(|s| s.trim().to_string());
        match (code, note) {
            (Some(code), _) if idx == 0 && code.eq_ignore_ascii_case("code") => {
                // Header row.
            }
            (Some(code), Some(note)) if !code.is_empty() && !note.is_empty() => {
                res.entry(code).or_default().push(note);
            }
            _ => {
                warn!("read_supplement: line {}: incomplete row, skipping", idx + 1);
            }
        }
    }
    debug!("read_supplement: {} codes supplemented", res.len());
    Ok(res)
}
