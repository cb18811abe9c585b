use super::super::domain::Lead;
use super::normalizer::normalize_header;
use std::io::Read;

pub(crate) fn parse_leads<R: Read>(reader: R) -> Result<Vec<Lead>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = LeadColumns::from_headers(csv_reader.headers()?);

    let mut leads = Vec::new();
    for record in csv_reader.records() {
        leads.push(columns.lead(&record?));
    }

    Ok(leads)
}

/// Positions of the known lead columns within the header row.
#[derive(Debug, Default)]
struct LeadColumns {
    name: Option<usize>,
    role: Option<usize>,
    company: Option<usize>,
    industry: Option<usize>,
    location: Option<usize>,
    linkedin_bio: Option<usize>,
}

impl LeadColumns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut columns = Self::default();
        for (index, header) in headers.iter().enumerate() {
            let slot = match normalize_header(header).as_str() {
                "name" => &mut columns.name,
                "role" => &mut columns.role,
                "company" => &mut columns.company,
                "industry" => &mut columns.industry,
                "location" => &mut columns.location,
                "linkedin_bio" => &mut columns.linkedin_bio,
                _ => continue,
            };
            // first occurrence wins for duplicated headers
            slot.get_or_insert(index);
        }
        columns
    }

    /// Builds a lead from one row; absent columns and short rows read as "".
    fn lead(&self, record: &csv::StringRecord) -> Lead {
        let cell = |column: Option<usize>| {
            column
                .and_then(|index| record.get(index))
                .unwrap_or_default()
                .to_string()
        };

        Lead {
            name: cell(self.name),
            role: cell(self.role),
            company: cell(self.company),
            industry: cell(self.industry),
            location: cell(self.location),
            linkedin_bio: cell(self.linkedin_bio),
        }
    }
}
