use thiserror::Error;

use crate::domain::FishRecord;

const REQUIRED_COLUMNS: [&str; 8] = [
    "ocean",
    "species",
    "archetype",
    "common_name",
    "title",
    "depth",
    "latitude",
    "longitude",
];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to fetch dataset: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to parse JSON dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset is missing the {0:?} column")]
    MissingColumn(&'static str),
    #[error("malformed CSV row on line {line}: expected {expected} fields, got {got}")]
    MalformedRow {
        line: usize,
        expected: usize,
        got: usize,
    },
    #[error("dataset has no header row")]
    MissingHeader,
}

/// Loads the dataset once from a local path or an `http(s)://` URL. This is
/// the session's single suspension point: no retries, no partial results.
pub async fn load_dataset(source: &str) -> Result<Vec<FishRecord>, DatasetError> {
    let text = if source.starts_with("http://") || source.starts_with("https://") {
        reqwest::get(source)
            .await?
            .error_for_status()?
            .text()
            .await?
    } else {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| DatasetError::Io {
                path: source.to_string(),
                source: e,
            })?
    };

    parse_dataset(source, &text)
}

/// Picks the format by extension: `.json` is a serde array, everything else
/// is CSV with a header row.
pub fn parse_dataset(source: &str, text: &str) -> Result<Vec<FishRecord>, DatasetError> {
    let path = source.split(['?', '#']).next().unwrap_or(source);
    if path.to_lowercase().ends_with(".json") {
        Ok(serde_json::from_str(text)?)
    } else {
        parse_csv(text)
    }
}

fn parse_csv(text: &str) -> Result<Vec<FishRecord>, DatasetError> {
    let mut lines = text.lines().enumerate();
    let header = lines
        .next()
        .map(|(_, line)| split_row(line))
        .ok_or(DatasetError::MissingHeader)?;

    let mut columns = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(DatasetError::MissingColumn(name))?;
    }
    let thumbnail = header.iter().position(|h| h.trim() == "thumbnail");

    let mut records = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_row(line);
        let width = columns.iter().chain(thumbnail.iter()).max().map_or(0, |m| m + 1);
        if fields.len() < width {
            return Err(DatasetError::MalformedRow {
                line: index + 1,
                expected: width,
                got: fields.len(),
            });
        }

        records.push(FishRecord {
            ocean: fields[columns[0]].clone(),
            species: fields[columns[1]].clone(),
            archetype: fields[columns[2]].clone(),
            common_name: fields[columns[3]].clone(),
            title: fields[columns[4]].clone(),
            depth: fields[columns[5]].clone(),
            latitude: fields[columns[6]].clone(),
            longitude: fields[columns[7]].clone(),
            thumbnail: thumbnail
                .map(|col| fields[col].clone())
                .filter(|t| !t.is_empty()),
        });
    }

    Ok(records)
}

/// Splits one CSV row. Double quotes delimit fields containing commas;
/// a doubled quote inside a quoted field is a literal quote.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "ocean,species,archetype,common_name,title,depth,latitude,longitude,thumbnail";

    #[test]
    fn parses_a_csv_dataset() {
        let text = format!(
            "{HEADER}\nPacific,Reef Fish,Predator,Grouper,Epinephelus,10,-8.5,150.0,http://x/g.jpg\n"
        );
        let records = parse_dataset("fishes.csv", &text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].common_name, "Grouper");
        assert_eq!(records[0].thumbnail.as_deref(), Some("http://x/g.jpg"));
    }

    #[test]
    fn quoted_fields_may_contain_commas_and_quotes() {
        let text = format!(
            "{HEADER}\nPacific,\"Eel-like Fish\",Prey,\"Moray, giant\",\"Gymnothorax \"\"javanicus\"\"\",30,0,0,\n"
        );
        let records = parse_dataset("fishes.csv", &text).unwrap();
        assert_eq!(records[0].common_name, "Moray, giant");
        assert_eq!(records[0].title, "Gymnothorax \"javanicus\"");
        assert_eq!(records[0].thumbnail, None);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = format!("{HEADER}\n\nPacific,Reef Fish,Prey,Sardine,Sardinops,5,0,0,\n\n");
        assert_eq!(parse_dataset("fishes.csv", &text).unwrap().len(), 1);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let text = "ocean,species,archetype,common_name,title,depth,latitude\n";
        match parse_dataset("fishes.csv", text) {
            Err(DatasetError::MissingColumn(name)) => assert_eq!(name, "longitude"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn short_rows_are_rejected_with_their_line_number() {
        let text = format!("{HEADER}\nPacific,Reef Fish\n");
        match parse_dataset("fishes.csv", &text) {
            Err(DatasetError::MalformedRow { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_json_dataset() {
        let text = r#"[{
            "ocean": "Atlantic", "species": "Pelagic Fish", "archetype": "Predator",
            "common_name": "Bluefin Tuna", "title": "Thunnus thynnus",
            "depth": "80", "latitude": "35.0", "longitude": "-40.0"
        }]"#;
        let records = parse_dataset("fishes.json", text).unwrap();
        assert_eq!(records[0].ocean, "Atlantic");
        assert_eq!(records[0].thumbnail, None);
    }

    #[test]
    fn json_detection_ignores_query_strings() {
        let records = parse_dataset("https://example.org/fishes.json?v=2", "[]").unwrap();
        assert!(records.is_empty());
    }
}
